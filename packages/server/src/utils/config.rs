use gabi_engine::WinRules;
use once_cell::sync::Lazy;
use std::env;

use crate::models::config::DebugConfig;

pub static CONFIG: Lazy<Config> = Lazy::new(Config::from_env);

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub allowed_origin: String,
    /// Fixed seed for role draws and Kapre drag-downs. Random when unset.
    pub seed: Option<u64>,
    pub debug: DebugConfig,
    /// `GABI_CREATURE_PARITY=true` lets creatures win once they match the
    /// living villagers.
    pub win_rules: WinRules,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            host: env::var("GABI_HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: env::var("GABI_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(8080),
            allowed_origin: env::var("GABI_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            seed: env::var("GABI_SEED").ok().and_then(|v| v.parse().ok()),
            debug: DebugConfig::from_env(),
            win_rules: WinRules {
                creature_parity: env::var("GABI_CREATURE_PARITY")
                    .map(|v| v == "true")
                    .unwrap_or(false),
            },
        }
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

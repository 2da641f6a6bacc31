use std::env;

#[derive(Debug, Clone)]
pub struct DebugConfig {
    // broadcast role assignments over the WebSocket
    pub show_player_roles: bool,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            show_player_roles: cfg!(debug_assertions) || env::var("GABI_DEBUG").is_ok(),
        }
    }
}

impl DebugConfig {
    pub fn from_env() -> Self {
        let debug_mode = env::var("GABI_DEBUG")
            .map(|v| v == "true")
            .unwrap_or_else(|_| cfg!(debug_assertions));
        let show_player_roles = env::var("GABI_DEBUG_SHOW_ROLES")
            .map(|v| v == "true")
            .unwrap_or(debug_mode);

        Self { show_player_roles }
    }
}

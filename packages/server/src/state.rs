use axum::extract::ws::Message;
use gabi_engine::{GameEvent, MemoryStore, OutputPort, PhaseController, WinRules};
use std::sync::Arc;
use tokio::sync::{broadcast, Mutex};
use tracing::debug;

use crate::models::config::DebugConfig;
use crate::models::game::EventNotification;
use crate::utils::config::Config;

pub type GameController = PhaseController<MemoryStore, BroadcastOutput>;

#[derive(Clone)]
pub struct AppState {
    pub game: Arc<Mutex<GameController>>,
    pub channel: broadcast::Sender<Message>,
}

impl AppState {
    pub fn new() -> Self {
        Self::build(None, &DebugConfig::default(), WinRules::default())
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::build(Some(seed), &DebugConfig::default(), WinRules::default())
    }

    pub fn from_config(config: &Config) -> Self {
        Self::build(config.seed, &config.debug, config.win_rules.clone())
    }

    fn build(seed: Option<u64>, debug_config: &DebugConfig, rules: WinRules) -> Self {
        let (tx, _) = broadcast::channel(1000);
        let output = BroadcastOutput {
            tx: tx.clone(),
            show_roles: debug_config.show_player_roles,
        };
        let controller = match seed {
            Some(seed) => PhaseController::with_seed(MemoryStore::new(), output, seed),
            None => PhaseController::new(MemoryStore::new(), output),
        };
        AppState {
            game: Arc::new(Mutex::new(controller.with_rules(rules))),
            channel: tx,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

/// Output port that fans every game event out to the connected sockets.
pub struct BroadcastOutput {
    tx: broadcast::Sender<Message>,
    show_roles: bool,
}

impl BroadcastOutput {
    fn redact(&self, event: GameEvent) -> GameEvent {
        match event {
            GameEvent::Distribution { summary, .. } if !self.show_roles => {
                GameEvent::Distribution {
                    summary,
                    assignments: Vec::new(),
                }
            }
            other => other,
        }
    }
}

impl OutputPort for BroadcastOutput {
    fn emit(&mut self, event: GameEvent) {
        let event = self.redact(event);
        let notification = EventNotification {
            message_type: "game_event".to_string(),
            event: match serde_json::to_value(&event) {
                Ok(value) => value,
                Err(e) => {
                    debug!("failed to encode game event: {}", e);
                    return;
                }
            },
            timestamp: chrono::Utc::now().to_rfc3339(),
        };

        if let Ok(message_text) = serde_json::to_string(&notification) {
            if let Err(e) = self.tx.send(Message::Text(message_text)) {
                debug!("no websocket listeners: {}", e);
            }
        }
    }
}

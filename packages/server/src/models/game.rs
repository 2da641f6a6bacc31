use gabi_engine::models::{ActionKind, PlayerId};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGameRequest {
    pub player_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NightActionRequest {
    pub actor_id: PlayerId,
    pub kind: ActionKind,
    #[serde(default)]
    pub target_id: Option<PlayerId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteRequest {
    pub target_id: PlayerId,
}

/// Envelope for everything pushed over the WebSocket.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventNotification {
    pub message_type: String,
    pub event: serde_json::Value,
    pub timestamp: String,
}

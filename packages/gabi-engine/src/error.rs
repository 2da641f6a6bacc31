use crate::models::{ActionKind, Phase, PlayerId, Role};

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum GameError {
    #[error("player count must be between 6 and 12, got {0}")]
    InvalidPlayerCount(usize),
    #[error("player {actor} cannot act now{}", turn_hint(.expected))]
    OutOfTurnSubmission {
        actor: PlayerId,
        expected: Option<PlayerId>,
    },
    #[error("invalid target {} for {}: {reason}", target_label(.target), action_label(.kind))]
    InvalidTarget {
        kind: Option<ActionKind>,
        target: Option<PlayerId>,
        reason: &'static str,
    },
    #[error("{kind} requires a target")]
    MissingTarget { kind: ActionKind },
    #[error("{role} cannot use {kind} on day {day}")]
    ActionNotAllowed {
        role: Role,
        kind: ActionKind,
        day: u32,
    },
    #[error("`{command}` is not available during the {phase} phase")]
    WrongPhase {
        command: &'static str,
        phase: Phase,
    },
    #[error("player {0} no longer exists or is dead")]
    StaleReference(PlayerId),
    #[error("persisted value for `{key}` is corrupt, using the default")]
    CorruptPersistedState { key: &'static str },
    #[error(transparent)]
    Store(#[from] StoreError),
}

fn turn_hint(expected: &Option<PlayerId>) -> String {
    match expected {
        Some(id) => format!(", it is player {}'s turn", id),
        None => String::new(),
    }
}

fn target_label(target: &Option<PlayerId>) -> String {
    match target {
        Some(id) => id.to_string(),
        None => "none".to_string(),
    }
}

fn action_label(kind: &Option<ActionKind>) -> String {
    match kind {
        Some(kind) => kind.to_string(),
        None => "the vote".to_string(),
    }
}

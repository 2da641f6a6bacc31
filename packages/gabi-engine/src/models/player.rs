use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use super::action::ActionKind;
use super::role::Role;

pub type PlayerId = u32;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub id: PlayerId,
    pub role: Role,
    pub alive: bool,
    #[serde(default)]
    pub action_history: Vec<PastAction>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub cooldown: Cooldown,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PastAction {
    pub day: u32,
    pub kind: ActionKind,
    pub target_id: Option<PlayerId>,
}

/// `cursed` and `silenced` last until cured; the two protection flags are
/// wiped at the start of every night.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Status {
    pub cursed: bool,
    pub silenced: bool,
    pub protected: bool,
    pub spy_protected: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cooldown {
    pub last_used_day: Option<u32>,
    /// Targets a Bagani has already guarded; each may be guarded once per game.
    pub protected_targets: BTreeSet<PlayerId>,
}

impl Player {
    pub fn new(id: PlayerId, role: Role) -> Self {
        Self {
            id,
            role,
            alive: true,
            action_history: Vec::new(),
            status: Status::default(),
            cooldown: Cooldown::default(),
        }
    }
}

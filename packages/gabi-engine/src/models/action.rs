use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::player::PlayerId;
use super::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    Skip,
    Kill,
    Attack,
    Curse,
    Block,
    SpyCheck,
    Cancel,
    Silence,
    RevealHint,
    Heal,
    ProtectOnce,
    AntiSpyProtect,
    RevealExact,
    Lockdown,
    ForceVote,
}

/// What a kind accepts as its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetRule {
    NoTarget,
    Other,
    SelfAllowed,
}

impl ActionKind {
    pub const ALL: [ActionKind; 15] = [
        ActionKind::Skip,
        ActionKind::Kill,
        ActionKind::Attack,
        ActionKind::Curse,
        ActionKind::Block,
        ActionKind::SpyCheck,
        ActionKind::Cancel,
        ActionKind::Silence,
        ActionKind::RevealHint,
        ActionKind::Heal,
        ActionKind::ProtectOnce,
        ActionKind::AntiSpyProtect,
        ActionKind::RevealExact,
        ActionKind::Lockdown,
        ActionKind::ForceVote,
    ];

    pub fn target_rule(self) -> TargetRule {
        match self {
            ActionKind::Skip | ActionKind::Block | ActionKind::Lockdown | ActionKind::ForceVote => {
                TargetRule::NoTarget
            }
            ActionKind::Heal | ActionKind::ProtectOnce => TargetRule::SelfAllowed,
            _ => TargetRule::Other,
        }
    }

    pub fn is_lethal(self) -> bool {
        matches!(self, ActionKind::Kill | ActionKind::Attack)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ActionKind::Skip => "skip",
            ActionKind::Kill => "kill",
            ActionKind::Attack => "attack",
            ActionKind::Curse => "curse",
            ActionKind::Block => "block",
            ActionKind::SpyCheck => "spy_check",
            ActionKind::Cancel => "cancel",
            ActionKind::Silence => "silence",
            ActionKind::RevealHint => "reveal_hint",
            ActionKind::Heal => "heal",
            ActionKind::ProtectOnce => "protect_once",
            ActionKind::AntiSpyProtect => "anti_spy_protect",
            ActionKind::RevealExact => "reveal_exact",
            ActionKind::Lockdown => "lockdown",
            ActionKind::ForceVote => "force_vote",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action kind `{0}`")]
pub struct ParseActionKindError(String);

impl FromStr for ActionKind {
    type Err = ParseActionKindError;

    /// Accepts `spy_check`, `spy-check` and any letter case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        ActionKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == normalized)
            .ok_or_else(|| ParseActionKindError(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightAction {
    pub actor_id: PlayerId,
    pub role: Role,
    pub kind: ActionKind,
    pub target_id: Option<PlayerId>,
    pub day: u32,
}

/// Night-scoped switches derived from the whole batch before anything resolves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NightFlags {
    pub lockdown: bool,
    pub block_human_abilities: bool,
    pub babaylan_blocked: bool,
    pub bell_forced_vote: bool,
    pub blocker_actor_id: Option<PlayerId>,
}

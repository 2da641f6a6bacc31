use serde::{Deserialize, Serialize};

use super::action::NightAction;
use super::player::PlayerId;
use super::role::Role;

/// What an information ability learned about its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "insight", content = "role", rename_all = "snake_case")]
pub enum Insight {
    CreatureSuspect,
    HasAbility,
    LikelyNormal,
    NoAbility,
    ExactRole(Role),
}

impl Insight {
    /// The tri-state hint a Manunugis receives. Never the exact role.
    pub fn hint_for(role: Role) -> Self {
        match role {
            Role::Creature(_) => Insight::CreatureSuspect,
            Role::AbilityVillager(_) => Insight::HasAbility,
            Role::NormalVillager => Insight::LikelyNormal,
        }
    }

    /// The ability-or-not answer a spy receives.
    pub fn spy_report_for(role: Role) -> Self {
        match role {
            Role::AbilityVillager(_) => Insight::HasAbility,
            _ => Insight::NoAbility,
        }
    }

    pub fn describe(self) -> String {
        match self {
            Insight::CreatureSuspect => "may be a creature".to_string(),
            Insight::HasAbility => "has an ability".to_string(),
            Insight::LikelyNormal => "is likely a normal villager".to_string(),
            Insight::NoAbility => "has no villager ability".to_string(),
            Insight::ExactRole(role) => format!("is the {}", role),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revelation {
    pub actor_id: PlayerId,
    pub target_id: PlayerId,
    pub insight: Insight,
}

/// Who cursed whom, and on which night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurseMark {
    pub caster_id: PlayerId,
    pub target_id: PlayerId,
    pub day: u32,
}

/// Outcome of one night's resolution, shown once during the day and
/// discarded after the vote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolvedNight {
    pub day: u32,
    pub notes: Vec<String>,
    /// Unique, in order of death.
    pub deaths: Vec<PlayerId>,
    pub actions: Vec<NightAction>,
    pub revelations: Vec<Revelation>,
    pub curses: Vec<CurseMark>,
    pub forced_vote: bool,
}

impl ResolvedNight {
    pub fn new(day: u32, actions: Vec<NightAction>) -> Self {
        Self {
            day,
            actions,
            ..Default::default()
        }
    }

    pub fn note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn record_death(&mut self, player_id: PlayerId) {
        if !self.deaths.contains(&player_id) {
            self.deaths.push(player_id);
        }
    }
}

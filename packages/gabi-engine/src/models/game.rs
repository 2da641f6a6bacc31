use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::{NightAction, NightFlags};
use super::night::ResolvedNight;
use super::player::{Player, PlayerId};
use super::role::Faction;
use super::rule::SURVIVAL_DAY_LIMIT;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    Lobby,
    Night,
    Day,
    Vote,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Lobby => "Lobby",
            Phase::Night => "Night",
            Phase::Day => "Day",
            Phase::Vote => "Vote",
        };
        f.write_str(name)
    }
}

/// Everything a game needs between two commands. Loaded from and saved to
/// the store on every step.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub phase: Phase,
    pub roster: Vec<Player>,
    pub current_day: u32,
    pub turn_index: usize,
    pub pending_actions: Vec<NightAction>,
    pub flags: NightFlags,
    pub resolved_night: Option<ResolvedNight>,
}

impl Default for Session {
    fn default() -> Self {
        Self {
            phase: Phase::Lobby,
            roster: Vec::new(),
            current_day: 1,
            turn_index: 0,
            pending_actions: Vec::new(),
            flags: NightFlags::default(),
            resolved_night: None,
        }
    }
}

impl Session {
    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.roster.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: PlayerId) -> Option<&mut Player> {
        self.roster.iter_mut().find(|p| p.id == id)
    }

    pub fn living(&self) -> impl Iterator<Item = &Player> {
        self.roster.iter().filter(|p| p.alive)
    }

    pub fn living_ids(&self) -> Vec<PlayerId> {
        self.living().map(|p| p.id).collect()
    }

    pub fn dead_ids(&self) -> Vec<PlayerId> {
        self.roster.iter().filter(|p| !p.alive).map(|p| p.id).collect()
    }

    pub fn is_alive(&self, id: PlayerId) -> bool {
        self.player(id).map(|p| p.alive).unwrap_or(false)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum WinReason {
    CreaturesEliminated,
    SurvivedDayLimit,
    CreatureParity,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    InProgress,
    VillagerWin(WinReason),
    CreatureWin(WinReason),
}

impl GameResult {
    pub fn is_over(self) -> bool {
        !matches!(self, GameResult::InProgress)
    }

    pub fn winner(self) -> Option<Faction> {
        match self {
            GameResult::InProgress => None,
            GameResult::VillagerWin(_) => Some(Faction::Villagers),
            GameResult::CreatureWin(_) => Some(Faction::Creatures),
        }
    }

    pub fn reason(self) -> Option<WinReason> {
        match self {
            GameResult::InProgress => None,
            GameResult::VillagerWin(reason) | GameResult::CreatureWin(reason) => Some(reason),
        }
    }

    pub fn announcement(self) -> Option<String> {
        let text = match self {
            GameResult::InProgress => return None,
            GameResult::VillagerWin(WinReason::SurvivedDayLimit) => format!(
                "Villagers win! The village held out past day {}.",
                SURVIVAL_DAY_LIMIT
            ),
            GameResult::VillagerWin(_) => {
                "Villagers win! Every creature has been eliminated.".to_string()
            }
            GameResult::CreatureWin(_) => {
                "Creatures win! They now equal or outnumber the villagers.".to_string()
            }
        };
        Some(text)
    }
}

use serde::{Deserialize, Serialize};

pub const MIN_PLAYERS: usize = 6;
pub const MAX_PLAYERS: usize = 12;

/// Villagers win by survival once the day counter passes this value.
pub const SURVIVAL_DAY_LIMIT: u32 = 10;

/// How many roles of each category a table of a given size receives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distribution {
    pub creatures: usize,
    pub abilities: usize,
    pub villagers: usize,
}

impl Distribution {
    pub fn for_players(player_count: usize) -> Option<Self> {
        let (creatures, abilities, villagers) = match player_count {
            6 => (1, 2, 3),
            7 => (1, 2, 4),
            8 => (2, 3, 3),
            9 => (2, 3, 4),
            10 => (3, 4, 3),
            11 => (3, 4, 4),
            12 => (4, 4, 4),
            _ => return None,
        };
        Some(Self {
            creatures,
            abilities,
            villagers,
        })
    }

    pub fn total(&self) -> usize {
        self.creatures + self.abilities + self.villagers
    }

    pub fn summary(&self) -> String {
        let creature_label = if self.creatures > 1 {
            "Creatures"
        } else {
            "Creature"
        };
        format!(
            "[{} Players]\nCreature - {} {}\nVillager with abilities - {} players\nNormal Villager - {} players",
            self.total(),
            self.creatures,
            creature_label,
            self.abilities,
            self.villagers
        )
    }
}

/// Which game-days a role may use its ability on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimingGate {
    EvenDays,
    EveryThirdDay,
    Always,
}

impl TimingGate {
    pub fn allows(self, day: u32) -> bool {
        match self {
            TimingGate::EvenDays => day % 2 == 0,
            TimingGate::EveryThirdDay => day % 3 == 0,
            TimingGate::Always => true,
        }
    }
}

/// Optional win rules.
///
/// `creature_parity` awards the game to the creatures once they equal or
/// outnumber the living villagers. Off by default.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinRules {
    pub creature_parity: bool,
}

use serde::{Deserialize, Serialize};
use std::fmt;

use super::action::ActionKind;
use super::rule::TimingGate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Creature {
    Aswang,
    Mananangal,
    Mangkukulam,
    Kapre,
    Tikbalang,
    Tiktik,
    Duwende,
    Tiyanak,
}

impl Creature {
    pub const ALL: [Creature; 8] = [
        Creature::Aswang,
        Creature::Mananangal,
        Creature::Mangkukulam,
        Creature::Kapre,
        Creature::Tikbalang,
        Creature::Tiktik,
        Creature::Duwende,
        Creature::Tiyanak,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Ability {
    Manunugis,
    Albularyo,
    Bagani,
    MangAanting,
    Babaylan,
    Kapitan,
    Kampanero,
}

impl Ability {
    pub const ALL: [Ability; 7] = [
        Ability::Manunugis,
        Ability::Albularyo,
        Ability::Bagani,
        Ability::MangAanting,
        Ability::Babaylan,
        Ability::Kapitan,
        Ability::Kampanero,
    ];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Faction {
    Creatures,
    Villagers,
}

impl fmt::Display for Faction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Faction::Creatures => write!(f, "Creatures"),
            Faction::Villagers => write!(f, "Villagers"),
        }
    }
}

/// A player's hidden identity. The category decides faction and timing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "category", content = "name")]
pub enum Role {
    Creature(Creature),
    AbilityVillager(Ability),
    NormalVillager,
}

impl Role {
    pub fn faction(self) -> Faction {
        match self {
            Role::Creature(_) => Faction::Creatures,
            Role::AbilityVillager(_) | Role::NormalVillager => Faction::Villagers,
        }
    }

    pub fn is_creature(self) -> bool {
        matches!(self, Role::Creature(_))
    }

    /// The one non-skip action this role may submit at night.
    pub fn night_action(self) -> Option<ActionKind> {
        let kind = match self {
            Role::Creature(Creature::Aswang) => ActionKind::Kill,
            Role::Creature(Creature::Mananangal) | Role::Creature(Creature::Kapre) => {
                ActionKind::Attack
            }
            Role::Creature(Creature::Mangkukulam) => ActionKind::Curse,
            Role::Creature(Creature::Tikbalang) => ActionKind::Block,
            Role::Creature(Creature::Tiktik) => ActionKind::SpyCheck,
            Role::Creature(Creature::Duwende) => ActionKind::Cancel,
            Role::Creature(Creature::Tiyanak) => ActionKind::Silence,
            Role::AbilityVillager(Ability::Manunugis) => ActionKind::RevealHint,
            Role::AbilityVillager(Ability::Albularyo) => ActionKind::Heal,
            Role::AbilityVillager(Ability::Bagani) => ActionKind::ProtectOnce,
            Role::AbilityVillager(Ability::MangAanting) => ActionKind::AntiSpyProtect,
            Role::AbilityVillager(Ability::Babaylan) => ActionKind::RevealExact,
            Role::AbilityVillager(Ability::Kapitan) => ActionKind::Lockdown,
            Role::AbilityVillager(Ability::Kampanero) => ActionKind::ForceVote,
            Role::NormalVillager => return None,
        };
        Some(kind)
    }

    pub fn timing(self) -> TimingGate {
        match self {
            Role::Creature(_) => TimingGate::EvenDays,
            Role::AbilityVillager(Ability::Kapitan) => TimingGate::EveryThirdDay,
            Role::AbilityVillager(Ability::Albularyo)
            | Role::AbilityVillager(Ability::MangAanting) => TimingGate::Always,
            Role::AbilityVillager(_) => TimingGate::EvenDays,
            Role::NormalVillager => TimingGate::Always,
        }
    }

    /// Whoever kills this role (or votes it out) loses one more life with it.
    pub fn is_drag_down(self) -> bool {
        self == Role::Creature(Creature::Kapre)
    }

    pub fn is_curse_caster(self) -> bool {
        self == Role::Creature(Creature::Mangkukulam)
    }

    /// Ignores human-ability blocks and cannot be exact-revealed.
    pub fn is_spy_immune(self) -> bool {
        self == Role::AbilityVillager(Ability::MangAanting)
    }

    pub fn is_reveal_exact(self) -> bool {
        self == Role::AbilityVillager(Ability::Babaylan)
    }

    pub fn name(self) -> &'static str {
        match self {
            Role::Creature(Creature::Aswang) => "Aswang",
            Role::Creature(Creature::Mananangal) => "Mananangal",
            Role::Creature(Creature::Mangkukulam) => "Mangkukulam",
            Role::Creature(Creature::Kapre) => "Kapre",
            Role::Creature(Creature::Tikbalang) => "Tikbalang",
            Role::Creature(Creature::Tiktik) => "Tiktik",
            Role::Creature(Creature::Duwende) => "Duwende",
            Role::Creature(Creature::Tiyanak) => "Tiyanak",
            Role::AbilityVillager(Ability::Manunugis) => "Manunugis",
            Role::AbilityVillager(Ability::Albularyo) => "Albularyo",
            Role::AbilityVillager(Ability::Bagani) => "Bagani",
            Role::AbilityVillager(Ability::MangAanting) => "Mang-aanting",
            Role::AbilityVillager(Ability::Babaylan) => "Babaylan",
            Role::AbilityVillager(Ability::Kapitan) => "Kapitan",
            Role::AbilityVillager(Ability::Kampanero) => "Kampanero",
            Role::NormalVillager => "Villager",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

//! Persistence port.
//!
//! The engine keeps no game state in memory between commands. Every entry
//! point loads a [`Session`] through [`SessionRepository::load`] and writes
//! it back with [`SessionRepository::save`], so a game can be suspended and
//! resumed from any backend implementing [`GameStore`].

use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use tracing::warn;

use crate::error::{GameError, StoreError};
use crate::models::{NightAction, NightFlags, Phase, Player, ResolvedNight, Session};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreKey {
    Roster,
    CurrentDay,
    TurnIndex,
    PendingActions,
    Flags,
    ResolvedNight,
    Phase,
}

impl StoreKey {
    pub const ALL: [StoreKey; 7] = [
        StoreKey::Roster,
        StoreKey::CurrentDay,
        StoreKey::TurnIndex,
        StoreKey::PendingActions,
        StoreKey::Flags,
        StoreKey::ResolvedNight,
        StoreKey::Phase,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            StoreKey::Roster => "roster",
            StoreKey::CurrentDay => "currentDay",
            StoreKey::TurnIndex => "turnIndex",
            StoreKey::PendingActions => "pendingActions",
            StoreKey::Flags => "flags",
            StoreKey::ResolvedNight => "resolvedNight",
            StoreKey::Phase => "phase",
        }
    }
}

/// Key/value storage for JSON payloads. Each `set` replaces the whole value.
pub trait GameStore {
    fn get(&self, key: StoreKey) -> Option<Value>;
    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), StoreError>;
    /// Swaps the whole content for `entries` in one write. On error the
    /// previous content must still be in place.
    fn replace(&mut self, entries: Vec<(StoreKey, Value)>) -> Result<(), StoreError>;
    fn clear(&mut self) -> Result<(), StoreError>;
}

#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<&'static str, Value>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl GameStore for MemoryStore {
    fn get(&self, key: StoreKey) -> Option<Value> {
        self.entries.get(key.as_str()).cloned()
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), StoreError> {
        self.entries.insert(key.as_str(), value);
        Ok(())
    }

    fn replace(&mut self, entries: Vec<(StoreKey, Value)>) -> Result<(), StoreError> {
        self.entries = entries
            .into_iter()
            .map(|(key, value)| (key.as_str(), value))
            .collect();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.entries.clear();
        Ok(())
    }
}

pub struct SessionRepository;

impl SessionRepository {
    /// Missing or malformed keys fall back to their documented defaults.
    pub fn load<S: GameStore + ?Sized>(store: &S) -> Session {
        let defaults = Session::default();
        Session {
            phase: read_or(store, StoreKey::Phase, Phase::default()),
            roster: read_or::<_, Vec<Player>>(store, StoreKey::Roster, defaults.roster),
            current_day: read_or(store, StoreKey::CurrentDay, defaults.current_day).max(1),
            turn_index: read_or(store, StoreKey::TurnIndex, defaults.turn_index),
            pending_actions: read_or::<_, Vec<NightAction>>(
                store,
                StoreKey::PendingActions,
                defaults.pending_actions,
            ),
            flags: read_or::<_, NightFlags>(store, StoreKey::Flags, defaults.flags),
            resolved_night: read_or::<_, Option<ResolvedNight>>(
                store,
                StoreKey::ResolvedNight,
                None,
            ),
        }
    }

    /// Serializes every key up front and hands the store one whole-session
    /// write, so a failed save leaves the previous session intact.
    pub fn save<S: GameStore + ?Sized>(store: &mut S, session: &Session) -> Result<(), StoreError> {
        let entries = vec![
            (StoreKey::Roster, serde_json::to_value(&session.roster)?),
            (StoreKey::CurrentDay, serde_json::to_value(session.current_day)?),
            (StoreKey::TurnIndex, serde_json::to_value(session.turn_index)?),
            (
                StoreKey::PendingActions,
                serde_json::to_value(&session.pending_actions)?,
            ),
            (StoreKey::Flags, serde_json::to_value(&session.flags)?),
            (
                StoreKey::ResolvedNight,
                serde_json::to_value(&session.resolved_night)?,
            ),
            (StoreKey::Phase, serde_json::to_value(session.phase)?),
        ];
        store.replace(entries)
    }
}

fn read_or<S, T>(store: &S, key: StoreKey, default: T) -> T
where
    S: GameStore + ?Sized,
    T: DeserializeOwned,
{
    let Some(value) = store.get(key) else {
        return default;
    };
    match serde_json::from_value(value) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(
                "{} ({})",
                GameError::CorruptPersistedState { key: key.as_str() },
                e
            );
            default
        }
    }
}

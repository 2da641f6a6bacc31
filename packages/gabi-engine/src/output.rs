//! Output port: everything a front end needs to render the game.

use serde::{Deserialize, Serialize};

use crate::models::{ActionKind, Faction, PlayerId, Revelation, Role, WinReason};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PhaseSignal {
    GoToNight,
    GoToDay,
    GoToVote,
    GoToLobby,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    pub player_id: PlayerId,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetOption {
    pub player_id: PlayerId,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionOption {
    pub kind: ActionKind,
    pub targets: Vec<TargetOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnPrompt {
    pub day: u32,
    pub actor_id: PlayerId,
    pub role: Role,
    pub options: Vec<ActionOption>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GameEvent {
    Distribution {
        summary: String,
        assignments: Vec<Assignment>,
    },
    Transition {
        signal: PhaseSignal,
    },
    Prompt(TurnPrompt),
    NightResolved {
        day: u32,
        notes: Vec<String>,
        deaths: Vec<PlayerId>,
        revelations: Vec<Revelation>,
        alive: Vec<PlayerId>,
        dead: Vec<PlayerId>,
    },
    VoteOptions {
        day: u32,
        targets: Vec<PlayerId>,
    },
    VoteResolved {
        target_id: PlayerId,
        deaths: Vec<PlayerId>,
        cured: Vec<PlayerId>,
    },
    Victory {
        winner: Faction,
        reason: WinReason,
        announcement: String,
    },
}

pub trait OutputPort {
    fn emit(&mut self, event: GameEvent);
}

impl<O: OutputPort + ?Sized> OutputPort for &mut O {
    fn emit(&mut self, event: GameEvent) {
        (**self).emit(event)
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NullOutput;

impl OutputPort for NullOutput {
    fn emit(&mut self, _event: GameEvent) {}
}

/// Keeps every event; handy for tests and replay.
#[derive(Debug, Default, Clone)]
pub struct RecordingOutput {
    pub events: Vec<GameEvent>,
}

impl RecordingOutput {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn take(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn signals(&self) -> Vec<PhaseSignal> {
        self.events
            .iter()
            .filter_map(|event| match event {
                GameEvent::Transition { signal } => Some(*signal),
                _ => None,
            })
            .collect()
    }
}

impl OutputPort for RecordingOutput {
    fn emit(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}

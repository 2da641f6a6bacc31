//! Phase controller: Lobby → Night → Day → Vote → Night ...
//!
//! Every public method starts from the persisted session and saves it again
//! before returning. The controller itself holds only the ports and the
//! random source, so a fresh controller over the same store picks the game
//! up exactly where the previous one left it.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::error::GameError;
use crate::models::{
    ActionKind, Distribution, GameResult, Phase, PlayerId, ResolvedNight, Session, WinRules,
};
use crate::output::{Assignment, GameEvent, OutputPort, PhaseSignal, TurnPrompt};
use crate::services::registry::{self, Submission};
use crate::services::scheduler::{self, Turn};
use crate::services::vote_resolver::{self, VoteReport};
use crate::services::{night_resolver, role_assigner, win_condition};
use crate::store::{GameStore, SessionRepository};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteOutcome {
    pub report: VoteReport,
    pub result: GameResult,
    pub session: Session,
}

pub struct PhaseController<S, O> {
    store: S,
    output: O,
    rng: StdRng,
    rules: WinRules,
}

impl<S: GameStore, O: OutputPort> PhaseController<S, O> {
    pub fn new(store: S, output: O) -> Self {
        Self::from_rng(store, output, StdRng::from_entropy())
    }

    pub fn with_seed(store: S, output: O, seed: u64) -> Self {
        Self::from_rng(store, output, StdRng::seed_from_u64(seed))
    }

    fn from_rng(store: S, output: O, rng: StdRng) -> Self {
        Self {
            store,
            output,
            rng,
            rules: WinRules::default(),
        }
    }

    pub fn with_rules(mut self, rules: WinRules) -> Self {
        self.rules = rules;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    /// get-state
    pub fn state(&self) -> Session {
        SessionRepository::load(&self.store)
    }

    /// new-game: deals roles, wipes any previous session and opens night 1.
    pub fn new_game(&mut self, player_count: usize) -> Result<Session, GameError> {
        let roster = role_assigner::assign_roles(player_count, &mut self.rng)?;
        let distribution = Distribution::for_players(player_count)
            .ok_or(GameError::InvalidPlayerCount(player_count))?;

        self.store.clear()?;
        info!(players = player_count, "new game");
        self.output.emit(GameEvent::Distribution {
            summary: distribution.summary(),
            assignments: roster
                .iter()
                .map(|p| Assignment {
                    player_id: p.id,
                    role: p.role,
                })
                .collect(),
        });

        let mut session = Session {
            roster,
            ..Session::default()
        };
        self.begin_night(&mut session)?;
        Ok(session)
    }

    /// The current turn, or `None` when no night turn is open.
    pub fn prompt(&self) -> Result<Option<TurnPrompt>, GameError> {
        let session = self.load_in(Phase::Night, "prompt")?;
        Ok(scheduler::prompt(&session))
    }

    /// submit-action
    pub fn submit(
        &mut self,
        actor_id: PlayerId,
        kind: ActionKind,
        target_id: Option<PlayerId>,
    ) -> Result<Session, GameError> {
        let mut session = self.load_in(Phase::Night, "submit-action")?;
        match registry::submit(&mut session, actor_id, kind, target_id)? {
            Submission::Continue => {
                SessionRepository::save(&mut self.store, &session)?;
                self.emit_prompt(&session);
            }
            Submission::NightComplete | Submission::ForcedVote => {
                SessionRepository::save(&mut self.store, &session)?;
                self.finish_night(&mut session)?;
            }
        }
        Ok(session)
    }

    /// Day → Vote.
    pub fn proceed(&mut self) -> Result<Session, GameError> {
        let mut session = self.load_in(Phase::Day, "proceed")?;
        self.open_vote(&mut session)?;
        Ok(session)
    }

    /// cast-vote: the first vote is the whole village's decision.
    pub fn cast_vote(&mut self, target_id: PlayerId) -> Result<VoteOutcome, GameError> {
        let mut session = self.load_in(Phase::Vote, "cast-vote")?;
        let report = vote_resolver::resolve_vote(&mut session, target_id, &mut self.rng)?;
        self.output.emit(GameEvent::VoteResolved {
            target_id,
            deaths: report.deaths.clone(),
            cured: report.cured.clone(),
        });

        session.current_day += 1;
        session.pending_actions.clear();
        session.resolved_night = None;

        let result = self.evaluate(&session);
        if result.is_over() {
            session = self.conclude(result)?;
        } else {
            self.begin_night(&mut session)?;
        }
        Ok(VoteOutcome {
            report,
            result,
            session,
        })
    }

    pub fn evaluate_win(&self) -> GameResult {
        let session = self.state();
        if session.roster.is_empty() {
            return GameResult::InProgress;
        }
        self.evaluate(&session)
    }

    /// Re-enters whatever the persisted phase is waiting for.
    pub fn resume(&mut self) -> Result<Session, GameError> {
        let mut session = self.state();
        match session.phase {
            Phase::Lobby => self.output.emit(GameEvent::Transition {
                signal: PhaseSignal::GoToLobby,
            }),
            Phase::Night => {
                let bell_rung = session
                    .pending_actions
                    .iter()
                    .any(|a| a.kind == ActionKind::ForceVote);
                if bell_rung || matches!(scheduler::next_actor(&session), Turn::NightComplete) {
                    self.finish_night(&mut session)?;
                } else {
                    self.output.emit(GameEvent::Transition {
                        signal: PhaseSignal::GoToNight,
                    });
                    self.emit_prompt(&session);
                }
            }
            Phase::Day => {
                if let Some(night) = &session.resolved_night {
                    self.emit_night(&session, night);
                }
                self.output.emit(GameEvent::Transition {
                    signal: PhaseSignal::GoToDay,
                });
            }
            Phase::Vote => {
                self.output.emit(GameEvent::Transition {
                    signal: PhaseSignal::GoToVote,
                });
                self.emit_vote_options(&session);
            }
        }
        Ok(session)
    }

    fn load_in(&self, phase: Phase, command: &'static str) -> Result<Session, GameError> {
        let session = self.state();
        if session.phase != phase {
            return Err(GameError::WrongPhase {
                command,
                phase: session.phase,
            });
        }
        Ok(session)
    }

    fn evaluate(&self, session: &Session) -> GameResult {
        win_condition::evaluate(&session.roster, session.current_day, &self.rules)
    }

    /// Resets everything night-scoped before the first turn is offered.
    fn begin_night(&mut self, session: &mut Session) -> Result<(), GameError> {
        session.phase = Phase::Night;
        session.turn_index = 0;
        session.pending_actions.clear();
        session.flags = Default::default();
        for player in &mut session.roster {
            player.status.protected = false;
            player.status.spy_protected = false;
        }
        SessionRepository::save(&mut self.store, session)?;

        info!(day = session.current_day, "night falls");
        self.output.emit(GameEvent::Transition {
            signal: PhaseSignal::GoToNight,
        });
        self.emit_prompt(session);
        Ok(())
    }

    /// Resolves the batch unless this night was already resolved before an
    /// interruption, then moves to the day (or straight to the vote).
    fn finish_night(&mut self, session: &mut Session) -> Result<(), GameError> {
        let night = match &session.resolved_night {
            Some(night) if night.day == session.current_day => {
                warn!(day = night.day, "night already resolved, resuming transition");
                night.clone()
            }
            _ => {
                let night = night_resolver::resolve_night(session);
                session.resolved_night = Some(night.clone());
                SessionRepository::save(&mut self.store, session)?;
                night
            }
        };
        self.emit_night(session, &night);

        if session.living().next().is_none() {
            let result = self.evaluate(session);
            *session = self.conclude(result)?;
            return Ok(());
        }

        if night.forced_vote {
            self.open_vote(session)
        } else {
            session.phase = Phase::Day;
            SessionRepository::save(&mut self.store, session)?;
            self.output.emit(GameEvent::Transition {
                signal: PhaseSignal::GoToDay,
            });
            Ok(())
        }
    }

    fn open_vote(&mut self, session: &mut Session) -> Result<(), GameError> {
        session.phase = Phase::Vote;
        SessionRepository::save(&mut self.store, session)?;
        self.output.emit(GameEvent::Transition {
            signal: PhaseSignal::GoToVote,
        });
        self.emit_vote_options(session);
        Ok(())
    }

    /// Announces the result and wipes the store, back to the lobby.
    fn conclude(&mut self, result: GameResult) -> Result<Session, GameError> {
        self.store.clear()?;
        if let (Some(winner), Some(reason)) = (result.winner(), result.reason()) {
            info!(%winner, ?reason, "game over");
            self.output.emit(GameEvent::Victory {
                winner,
                reason,
                announcement: result.announcement().unwrap_or_default(),
            });
        }
        self.output.emit(GameEvent::Transition {
            signal: PhaseSignal::GoToLobby,
        });
        Ok(Session::default())
    }

    fn emit_prompt(&mut self, session: &Session) {
        if let Some(prompt) = scheduler::prompt(session) {
            self.output.emit(GameEvent::Prompt(prompt));
        }
    }

    fn emit_night(&mut self, session: &Session, night: &ResolvedNight) {
        self.output.emit(GameEvent::NightResolved {
            day: night.day,
            notes: night.notes.clone(),
            deaths: night.deaths.clone(),
            revelations: night.revelations.clone(),
            alive: session.living_ids(),
            dead: session.dead_ids(),
        });
    }

    fn emit_vote_options(&mut self, session: &Session) {
        self.output.emit(GameEvent::VoteOptions {
            day: session.current_day,
            targets: session.living_ids(),
        });
    }
}

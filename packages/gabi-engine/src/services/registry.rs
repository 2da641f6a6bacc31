use tracing::debug;

use crate::error::GameError;
use crate::models::{ActionKind, NightAction, PastAction, PlayerId, Session, TargetRule};
use crate::services::scheduler::{self, Turn};

/// What the controller should do after a submission was recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    Continue,
    NightComplete,
    /// The bell was rung: resolve now, remaining actors forfeit their turn.
    ForcedVote,
}

/// Records the scheduled actor's single choice for tonight and moves the
/// turn forward. Nothing is changed when validation fails.
pub fn submit(
    session: &mut Session,
    actor_id: PlayerId,
    kind: ActionKind,
    target_id: Option<PlayerId>,
) -> Result<Submission, GameError> {
    let day = session.current_day;
    let actor = match scheduler::next_actor(session) {
        Turn::Actor(actor) if actor.id == actor_id => actor,
        Turn::Actor(actor) => {
            return Err(GameError::OutOfTurnSubmission {
                actor: actor_id,
                expected: Some(actor.id),
            })
        }
        Turn::NightComplete => {
            return Err(GameError::OutOfTurnSubmission {
                actor: actor_id,
                expected: None,
            })
        }
    };

    if kind != ActionKind::Skip && scheduler::usable_kind(actor, day) != Some(kind) {
        return Err(GameError::ActionNotAllowed {
            role: actor.role,
            kind,
            day,
        });
    }

    let target_id = match kind.target_rule() {
        TargetRule::NoTarget => {
            if target_id.is_some() {
                return Err(GameError::InvalidTarget {
                    kind: Some(kind),
                    target: target_id,
                    reason: "this action takes no target",
                });
            }
            None
        }
        rule => {
            let target = target_id.ok_or(GameError::MissingTarget { kind })?;
            if !session.is_alive(target) {
                return Err(GameError::InvalidTarget {
                    kind: Some(kind),
                    target: Some(target),
                    reason: "not a living player",
                });
            }
            if target == actor_id && rule != TargetRule::SelfAllowed {
                return Err(GameError::InvalidTarget {
                    kind: Some(kind),
                    target: Some(target),
                    reason: "cannot target yourself",
                });
            }
            if kind == ActionKind::ProtectOnce && actor.cooldown.protected_targets.contains(&target)
            {
                return Err(GameError::InvalidTarget {
                    kind: Some(kind),
                    target: Some(target),
                    reason: "already guarded once this game",
                });
            }
            Some(target)
        }
    };

    let role = actor.role;
    session.pending_actions.push(NightAction {
        actor_id,
        role,
        kind,
        target_id,
        day,
    });
    if let Some(actor) = session.player_mut(actor_id) {
        actor.action_history.push(PastAction {
            day,
            kind,
            target_id,
        });
        if kind != ActionKind::Skip {
            actor.cooldown.last_used_day = Some(day);
        }
        if let (ActionKind::ProtectOnce, Some(target)) = (kind, target_id) {
            actor.cooldown.protected_targets.insert(target);
        }
    }
    scheduler::advance(session);
    debug!(actor = actor_id, %kind, ?target_id, day, "night action recorded");

    if kind == ActionKind::ForceVote {
        return Ok(Submission::ForcedVote);
    }
    Ok(match scheduler::next_actor(session) {
        Turn::Actor(_) => Submission::Continue,
        Turn::NightComplete => Submission::NightComplete,
    })
}

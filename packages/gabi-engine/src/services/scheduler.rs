//! Night turn order.
//!
//! Turns walk the living roster in seat order. The list is rebuilt from the
//! session on every call, so dead players never get a slot back.

use crate::models::{ActionKind, Player, Role, Session, TargetRule};
use crate::output::{ActionOption, TargetOption, TurnPrompt};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Turn<'a> {
    Actor(&'a Player),
    NightComplete,
}

pub fn can_act(role: Role, day: u32) -> bool {
    role.timing().allows(day)
}

pub fn next_actor(session: &Session) -> Turn<'_> {
    match session.living().nth(session.turn_index) {
        Some(player) => Turn::Actor(player),
        None => Turn::NightComplete,
    }
}

pub fn advance(session: &mut Session) {
    session.turn_index += 1;
}

/// The ability `player` may actually use tonight, if any. A silenced player
/// or one whose role is gated out today only gets to skip.
pub fn usable_kind(player: &Player, day: u32) -> Option<ActionKind> {
    if player.status.silenced || !can_act(player.role, day) {
        return None;
    }
    player.role.night_action()
}

pub fn legal_options(session: &Session, actor: &Player) -> Vec<ActionOption> {
    let mut options = Vec::with_capacity(2);
    if let Some(kind) = usable_kind(actor, session.current_day) {
        let targets = match kind.target_rule() {
            TargetRule::NoTarget => Vec::new(),
            rule => session
                .living()
                .filter(|p| rule == TargetRule::SelfAllowed || p.id != actor.id)
                .map(|p| TargetOption {
                    player_id: p.id,
                    enabled: !(kind == ActionKind::ProtectOnce
                        && actor.cooldown.protected_targets.contains(&p.id)),
                })
                .collect(),
        };
        options.push(ActionOption { kind, targets });
    }
    options.push(ActionOption {
        kind: ActionKind::Skip,
        targets: Vec::new(),
    });
    options
}

pub fn prompt(session: &Session) -> Option<TurnPrompt> {
    match next_actor(session) {
        Turn::Actor(actor) => Some(TurnPrompt {
            day: session.current_day,
            actor_id: actor.id,
            role: actor.role,
            options: legal_options(session, actor),
        }),
        Turn::NightComplete => None,
    }
}

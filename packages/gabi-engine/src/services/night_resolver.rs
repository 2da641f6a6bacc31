//! Night resolution.
//!
//! A night's batch is resolved in four passes and the order is part of the
//! rules:
//!
//! 0. flags are derived from the whole batch, so they apply to every action
//!    no matter when it was submitted;
//! 1. non-lethal actions, in submission order;
//! 2. kills and attacks, in submission order;
//! 3. curses that nobody cured.
//!
//! Actions whose actor or target has vanished or died are dropped without a
//! note. That is what a resumed, partially applied night looks like.

use tracing::{debug, info};

use crate::error::GameError;
use crate::models::{
    ActionKind, CurseMark, Insight, NightAction, NightFlags, Player, PlayerId, ResolvedNight,
    Revelation, Session,
};

/// Pass 0.
pub fn derive_flags(batch: &[NightAction], roster: &[Player]) -> NightFlags {
    let mut flags = NightFlags::default();
    for action in batch {
        match action.kind {
            ActionKind::Lockdown => flags.lockdown = true,
            ActionKind::Block => {
                flags.block_human_abilities = true;
                flags.blocker_actor_id.get_or_insert(action.actor_id);
            }
            ActionKind::Cancel => {
                let on_babaylan = action
                    .target_id
                    .and_then(|id| roster.iter().find(|p| p.id == id))
                    .map(|target| target.role.is_reveal_exact())
                    .unwrap_or(false);
                if on_babaylan {
                    flags.babaylan_blocked = true;
                }
            }
            ActionKind::ForceVote => flags.bell_forced_vote = true,
            _ => {}
        }
    }
    flags
}

/// Resolves `session.pending_actions` against the roster, applying deaths and
/// status changes to the session. The caller stores the returned record.
pub fn resolve_night(session: &mut Session) -> ResolvedNight {
    let batch = session.pending_actions.clone();
    let mut night = ResolvedNight::new(session.current_day, batch.clone());

    session.flags = derive_flags(&batch, &session.roster);
    let flags = session.flags.clone();
    night.forced_vote = flags.bell_forced_vote;

    for action in &batch {
        if action.kind.is_lethal() || action.kind == ActionKind::Skip {
            continue;
        }
        if let Err(e) = resolve_non_lethal(session, &flags, action, &mut night) {
            debug!(actor = action.actor_id, kind = %action.kind, "dropped: {}", e);
        }
    }

    for action in batch.iter().filter(|a| a.kind.is_lethal()) {
        if let Err(e) = resolve_lethal(session, &flags, action, &mut night) {
            debug!(actor = action.actor_id, kind = %action.kind, "dropped: {}", e);
        }
    }

    resolve_curses(session, &mut night);

    info!(
        day = night.day,
        deaths = ?night.deaths,
        forced_vote = night.forced_vote,
        "night resolved"
    );
    night
}

fn living(session: &Session, id: PlayerId) -> Result<&Player, GameError> {
    session
        .player(id)
        .filter(|p| p.alive)
        .ok_or(GameError::StaleReference(id))
}

fn living_target(session: &Session, action: &NightAction) -> Result<PlayerId, GameError> {
    let id = action.target_id.ok_or(GameError::MissingTarget { kind: action.kind })?;
    living(session, id).map(|p| p.id)
}

/// The human-ability block voids every non-creature action except the
/// spy-immune role's.
fn is_blocked(flags: &NightFlags, action: &NightAction) -> bool {
    flags.block_human_abilities && !action.role.is_creature() && !action.role.is_spy_immune()
}

fn label(id: PlayerId) -> String {
    format!("Player {}", id)
}

fn resolve_non_lethal(
    session: &mut Session,
    flags: &NightFlags,
    action: &NightAction,
    night: &mut ResolvedNight,
) -> Result<(), GameError> {
    living(session, action.actor_id)?;
    let actor = label(action.actor_id);
    let role = action.role;

    if is_blocked(flags, action) {
        match action.kind {
            // lockdown and bell were already raised from the whole batch
            ActionKind::Lockdown | ActionKind::ForceVote => night.note(format!(
                "The {} ({}) was led astray, but their call had already gone out.",
                role, actor
            )),
            _ => night.note(format!(
                "The {} ({}) was led astray; their ability had no effect.",
                role, actor
            )),
        }
        return Ok(());
    }

    match action.kind {
        ActionKind::Block => {
            night.note("A Tikbalang walked the village paths; human abilities were blocked.");
        }
        ActionKind::Lockdown => {
            night.note("The Kapitan declared a lockdown for the night.");
        }
        ActionKind::ForceVote => {
            night.note("The Kampanero rang the bell, calling the village to an early vote.");
        }
        ActionKind::Cancel => {
            let target = living_target(session, action)?;
            if flags.babaylan_blocked && living(session, target)?.role.is_reveal_exact() {
                night.note("A Duwende clouded the Babaylan's sight.");
            } else {
                night.note(format!("A Duwende played tricks on {}.", label(target)));
            }
        }
        ActionKind::RevealHint => {
            let target = living(session, living_target(session, action)?)?;
            let insight = Insight::hint_for(target.role);
            reveal(night, action.actor_id, target.id, insight);
            night.note(format!("The Manunugis tracked {}.", label(target.id)));
        }
        ActionKind::SpyCheck => {
            let target = living(session, living_target(session, action)?)?;
            if target.status.spy_protected {
                night.note(format!(
                    "An amulet hid {} from the Tiktik's spying.",
                    label(target.id)
                ));
            } else {
                let insight = Insight::spy_report_for(target.role);
                reveal(night, action.actor_id, target.id, insight);
                night.note(format!("A Tiktik spied on {}.", label(target.id)));
            }
        }
        ActionKind::RevealExact => {
            let target = living(session, living_target(session, action)?)?;
            if flags.babaylan_blocked {
                night.note("The Babaylan's vision was clouded and revealed nothing.");
            } else if target.role.is_spy_immune() {
                night.note(format!(
                    "The Babaylan could not see through {}'s amulet.",
                    label(target.id)
                ));
            } else {
                let insight = Insight::ExactRole(target.role);
                reveal(night, action.actor_id, target.id, insight);
                night.note(format!("The Babaylan saw into {}.", label(target.id)));
            }
        }
        ActionKind::AntiSpyProtect => {
            let target = living_target(session, action)?;
            set_status(session, target, |p| p.status.spy_protected = true);
            night.note(format!("The Mang-aanting gave {} an amulet.", label(target)));
        }
        ActionKind::Curse => {
            let target = living_target(session, action)?;
            set_status(session, target, |p| p.status.cursed = true);
            night.curses.push(CurseMark {
                caster_id: action.actor_id,
                target_id: target,
                day: action.day,
            });
            night.note(format!("A Mangkukulam cursed {}.", label(target)));
        }
        ActionKind::Silence => {
            let target = living_target(session, action)?;
            set_status(session, target, |p| p.status.silenced = true);
            night.note(format!("A Tiyanak's cry silenced {}.", label(target)));
        }
        ActionKind::Heal => {
            let target = living_target(session, action)?;
            set_status(session, target, |p| {
                p.status.protected = true;
                p.status.cursed = false;
                p.status.silenced = false;
            });
            night.note(format!("The Albularyo tended to {}.", label(target)));
        }
        ActionKind::ProtectOnce => {
            let target = living_target(session, action)?;
            set_status(session, target, |p| p.status.protected = true);
            night.note(format!("The Bagani stood guard over {}.", label(target)));
        }
        ActionKind::Kill | ActionKind::Attack | ActionKind::Skip => {}
    }
    debug!(actor = action.actor_id, kind = %action.kind, target = ?action.target_id, "resolved");
    Ok(())
}

fn resolve_lethal(
    session: &mut Session,
    flags: &NightFlags,
    action: &NightAction,
    night: &mut ResolvedNight,
) -> Result<(), GameError> {
    living(session, action.actor_id)?;
    let target = living_target(session, action)?;

    if flags.lockdown {
        night.note(format!(
            "The lockdown prevented an attack on {}.",
            label(target)
        ));
        return Ok(());
    }

    let victim = living(session, target)?;
    if victim.status.protected {
        night.note(format!("{} was protected from an attack.", label(target)));
        return Ok(());
    }
    let drags_down = victim.role.is_drag_down();

    kill(session, target, night);
    night.note(format!("{} was killed in the night.", label(target)));

    if drags_down && session.is_alive(action.actor_id) {
        kill(session, action.actor_id, night);
        night.note(format!(
            "The dying Kapre dragged its killer, {}, down with it.",
            label(action.actor_id)
        ));
    }
    Ok(())
}

/// Pass 3: armed curses on unprotected players take their victims.
fn resolve_curses(session: &mut Session, night: &mut ResolvedNight) {
    let doomed: Vec<PlayerId> = session
        .living()
        .filter(|p| p.status.cursed && !p.status.protected)
        .map(|p| p.id)
        .collect();
    for id in doomed {
        kill(session, id, night);
        night.note(format!("{} succumbed to a curse.", label(id)));
    }
}

fn kill(session: &mut Session, id: PlayerId, night: &mut ResolvedNight) {
    if let Some(player) = session.player_mut(id) {
        player.alive = false;
        night.record_death(id);
        info!(player = id, role = %player.role, "player died");
    }
}

fn set_status(session: &mut Session, id: PlayerId, apply: impl FnOnce(&mut Player)) {
    if let Some(player) = session.player_mut(id) {
        apply(player);
    }
}

fn reveal(night: &mut ResolvedNight, actor_id: PlayerId, target_id: PlayerId, insight: Insight) {
    night.revelations.push(Revelation {
        actor_id,
        target_id,
        insight,
    });
}

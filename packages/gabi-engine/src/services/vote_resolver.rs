use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::GameError;
use crate::models::{PlayerId, Session};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReport {
    pub target_id: PlayerId,
    /// The voted-out player first, then anyone dragged down with them.
    pub deaths: Vec<PlayerId>,
    /// Players whose curse was lifted because their curser was voted out.
    pub cured: Vec<PlayerId>,
}

/// Applies the village's decision. Voting ignores protection entirely.
pub fn resolve_vote<R: Rng + ?Sized>(
    session: &mut Session,
    target_id: PlayerId,
    rng: &mut R,
) -> Result<VoteReport, GameError> {
    let role = match session.player(target_id) {
        Some(player) if player.alive => player.role,
        _ => {
            return Err(GameError::InvalidTarget {
                kind: None,
                target: Some(target_id),
                reason: "only a living player can be voted out",
            })
        }
    };

    let mut report = VoteReport {
        target_id,
        deaths: vec![target_id],
        cured: Vec::new(),
    };
    if let Some(player) = session.player_mut(target_id) {
        player.alive = false;
    }
    info!(player = target_id, %role, "voted out");

    if role.is_drag_down() {
        let remaining = session.living_ids();
        if let Some(&dragged) = remaining.choose(rng) {
            if let Some(player) = session.player_mut(dragged) {
                player.alive = false;
            }
            report.deaths.push(dragged);
            info!(player = dragged, "dragged down by the voted-out Kapre");
        }
    }

    if role.is_curse_caster() {
        let victims: Vec<PlayerId> = session
            .resolved_night
            .iter()
            .flat_map(|night| night.curses.iter())
            .filter(|mark| mark.caster_id == target_id)
            .map(|mark| mark.target_id)
            .collect();
        for victim in victims {
            if let Some(player) = session.player_mut(victim) {
                if player.alive && player.status.cursed {
                    player.status.cursed = false;
                    report.cured.push(victim);
                    info!(player = victim, "curse lifted");
                }
            }
        }
    }

    Ok(report)
}

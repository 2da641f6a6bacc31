use rand::seq::SliceRandom;
use rand::Rng;
use std::iter;

use crate::error::GameError;
use crate::models::{Ability, Creature, Distribution, Player, PlayerId, Role};

/// Deals roles for a table of `player_count` players.
///
/// Creature and ability roles are drawn without replacement, normal villagers
/// fill the rest, and the whole hand is shuffled before seats are numbered
/// `1..=player_count`.
pub fn assign_roles<R: Rng + ?Sized>(
    player_count: usize,
    rng: &mut R,
) -> Result<Vec<Player>, GameError> {
    let distribution =
        Distribution::for_players(player_count).ok_or(GameError::InvalidPlayerCount(player_count))?;

    let mut roles: Vec<Role> = Vec::with_capacity(player_count);
    roles.extend(
        Creature::ALL
            .choose_multiple(rng, distribution.creatures)
            .map(|creature| Role::Creature(*creature)),
    );
    roles.extend(
        Ability::ALL
            .choose_multiple(rng, distribution.abilities)
            .map(|ability| Role::AbilityVillager(*ability)),
    );
    roles.extend(iter::repeat(Role::NormalVillager).take(distribution.villagers));
    roles.shuffle(rng);

    Ok(roles
        .into_iter()
        .enumerate()
        .map(|(seat, role)| Player::new(seat as PlayerId + 1, role))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rejects_unsupported_sizes() {
        let mut rng = StdRng::seed_from_u64(1);
        for n in [0, 5, 13, 40] {
            assert!(matches!(
                assign_roles(n, &mut rng),
                Err(GameError::InvalidPlayerCount(got)) if got == n
            ));
        }
    }

    #[test]
    fn seats_are_sequential_and_alive() {
        let mut rng = StdRng::seed_from_u64(7);
        let roster = assign_roles(9, &mut rng).unwrap();
        let ids: Vec<_> = roster.iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=9).collect::<Vec<_>>());
        assert!(roster.iter().all(|p| p.alive && p.action_history.is_empty()));
    }
}

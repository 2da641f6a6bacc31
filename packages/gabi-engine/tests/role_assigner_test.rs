use std::collections::HashSet;

use gabi_engine::models::{Distribution, Role, MAX_PLAYERS, MIN_PLAYERS};
use gabi_engine::services::role_assigner::assign_roles;
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_category_counts_match_distribution() {
    for n in MIN_PLAYERS..=MAX_PLAYERS {
        let expected = Distribution::for_players(n).unwrap();
        for seed in 0..10 {
            let mut rng = StdRng::seed_from_u64(seed);
            let roster = assign_roles(n, &mut rng).unwrap();

            let creatures = roster.iter().filter(|p| p.role.is_creature()).count();
            let abilities = roster
                .iter()
                .filter(|p| matches!(p.role, Role::AbilityVillager(_)))
                .count();
            let villagers = roster
                .iter()
                .filter(|p| p.role == Role::NormalVillager)
                .count();

            assert_eq!(roster.len(), n);
            assert_eq!(creatures, expected.creatures, "creatures for {} players", n);
            assert_eq!(abilities, expected.abilities, "abilities for {} players", n);
            assert_eq!(villagers, expected.villagers, "villagers for {} players", n);
        }
    }
}

#[test]
fn test_special_roles_are_never_dealt_twice() {
    for seed in 0..50 {
        let mut rng = StdRng::seed_from_u64(seed);
        let roster = assign_roles(MAX_PLAYERS, &mut rng).unwrap();
        let specials: Vec<Role> = roster
            .iter()
            .map(|p| p.role)
            .filter(|role| *role != Role::NormalVillager)
            .collect();
        let unique: HashSet<Role> = specials.iter().copied().collect();
        assert_eq!(unique.len(), specials.len());
    }
}

#[test]
fn test_same_seed_same_deal() {
    let a = assign_roles(8, &mut StdRng::seed_from_u64(11)).unwrap();
    let b = assign_roles(8, &mut StdRng::seed_from_u64(11)).unwrap();
    assert_eq!(a, b);
}

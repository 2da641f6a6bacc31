use gabi_engine::models::{
    Ability, CurseMark, Creature, Phase, Player, PlayerId, ResolvedNight, Role, Session,
};
use gabi_engine::services::vote_resolver::resolve_vote;
use gabi_engine::GameError;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn table(roles: &[Role]) -> Session {
    Session {
        phase: Phase::Vote,
        current_day: 2,
        roster: roles
            .iter()
            .enumerate()
            .map(|(i, role)| Player::new(i as PlayerId + 1, *role))
            .collect(),
        ..Session::default()
    }
}

#[test]
fn test_voting_out_kapre_takes_exactly_one_more() {
    for seed in 0..20 {
        let mut s = table(&[
            Role::Creature(Creature::Kapre),
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::AbilityVillager(Ability::Bagani),
            Role::NormalVillager,
        ]);
        let mut rng = StdRng::seed_from_u64(seed);

        let report = resolve_vote(&mut s, 1, &mut rng).unwrap();

        assert_eq!(report.deaths.len(), 2);
        assert_eq!(report.deaths[0], 1);
        assert_ne!(report.deaths[1], 1);
        assert_eq!(s.living_ids().len(), 4);
    }
}

#[test]
fn test_voting_out_a_villager_kills_only_them() {
    let mut s = table(&[
        Role::Creature(Creature::Aswang),
        Role::NormalVillager,
        Role::NormalVillager,
    ]);
    let mut rng = StdRng::seed_from_u64(3);

    let report = resolve_vote(&mut s, 2, &mut rng).unwrap();

    assert_eq!(report.deaths, vec![2]);
    assert!(report.cured.is_empty());
}

#[test]
fn test_voting_out_mangkukulam_cures_its_victims() {
    let mut s = table(&[
        Role::Creature(Creature::Mangkukulam),
        Role::NormalVillager,
        Role::NormalVillager,
        Role::NormalVillager,
    ]);
    s.roster[2].status.cursed = true;
    s.roster[3].status.cursed = true;
    let mut night = ResolvedNight::new(2, Vec::new());
    night.curses.push(CurseMark {
        caster_id: 1,
        target_id: 3,
        day: 2,
    });
    // cursed by somebody else
    night.curses.push(CurseMark {
        caster_id: 9,
        target_id: 4,
        day: 2,
    });
    s.resolved_night = Some(night);
    let mut rng = StdRng::seed_from_u64(0);

    let report = resolve_vote(&mut s, 1, &mut rng).unwrap();

    assert_eq!(report.cured, vec![3]);
    assert!(!s.player(3).unwrap().status.cursed);
    assert!(s.player(4).unwrap().status.cursed);
}

#[test]
fn test_vote_on_dead_player_is_rejected() {
    let mut s = table(&[Role::Creature(Creature::Aswang), Role::NormalVillager]);
    s.roster[1].alive = false;
    let before = s.clone();
    let mut rng = StdRng::seed_from_u64(0);

    let err = resolve_vote(&mut s, 2, &mut rng).unwrap_err();

    assert!(matches!(err, GameError::InvalidTarget { kind: None, .. }));
    assert_eq!(s, before);
    assert!(resolve_vote(&mut s, 42, &mut rng).is_err());
}

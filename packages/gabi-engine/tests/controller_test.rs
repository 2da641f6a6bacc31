use gabi_engine::models::{
    Ability, ActionKind, Creature, Faction, GameResult, Phase, Player, PlayerId, Role, Session,
    WinReason,
};
use gabi_engine::{
    GameError, GameEvent, GameStore, MemoryStore, PhaseController, PhaseSignal, RecordingOutput,
    SessionRepository, StoreError, StoreKey, WinRules,
};
use serde_json::Value;
use std::io;

type Controller = PhaseController<MemoryStore, RecordingOutput>;

/// Memory store that starts refusing writes once `writes_left` runs out.
#[derive(Default)]
struct FlakyStore {
    inner: MemoryStore,
    writes_left: Option<usize>,
}

impl FlakyStore {
    fn spend_write(&mut self) -> Result<(), StoreError> {
        match self.writes_left.as_mut() {
            Some(0) => Err(io::Error::new(io::ErrorKind::Other, "disk full").into()),
            Some(n) => {
                *n -= 1;
                Ok(())
            }
            None => Ok(()),
        }
    }
}

impl GameStore for FlakyStore {
    fn get(&self, key: StoreKey) -> Option<Value> {
        self.inner.get(key)
    }

    fn set(&mut self, key: StoreKey, value: Value) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.set(key, value)
    }

    fn replace(&mut self, entries: Vec<(StoreKey, Value)>) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.replace(entries)
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.spend_write()?;
        self.inner.clear()
    }
}

fn controller(seed: u64) -> Controller {
    PhaseController::with_seed(MemoryStore::new(), RecordingOutput::new(), seed)
}

fn table(roles: &[Role], phase: Phase, day: u32) -> Session {
    Session {
        phase,
        current_day: day,
        roster: roles
            .iter()
            .enumerate()
            .map(|(i, role)| Player::new(i as PlayerId + 1, *role))
            .collect(),
        ..Session::default()
    }
}

/// A controller whose store already holds a hand-built table.
fn seeded_controller(roles: &[Role], phase: Phase, day: u32) -> Controller {
    let mut store = MemoryStore::new();
    SessionRepository::save(&mut store, &table(roles, phase, day)).unwrap();
    PhaseController::with_seed(store, RecordingOutput::new(), 5)
}

fn flaky_controller(
    roles: &[Role],
    phase: Phase,
    day: u32,
) -> PhaseController<FlakyStore, RecordingOutput> {
    let mut store = FlakyStore::default();
    SessionRepository::save(&mut store, &table(roles, phase, day)).unwrap();
    PhaseController::with_seed(store, RecordingOutput::new(), 5)
}

fn skip_rest_of_night(ctrl: &mut Controller) {
    while let Ok(Some(prompt)) = ctrl.prompt() {
        ctrl.submit(prompt.actor_id, ActionKind::Skip, None).unwrap();
    }
}

#[test]
fn test_full_round_through_every_phase() {
    let mut ctrl = controller(42);

    let session = ctrl.new_game(6).unwrap();
    assert_eq!(session.phase, Phase::Night);
    assert_eq!(session.current_day, 1);
    assert_eq!(session.roster.len(), 6);

    let events = ctrl.output_mut().take();
    assert!(matches!(events[0], GameEvent::Distribution { .. }));
    assert!(matches!(
        events[1],
        GameEvent::Transition { signal: PhaseSignal::GoToNight }
    ));
    assert!(matches!(&events[2], GameEvent::Prompt(p) if p.actor_id == 1 && p.day == 1));

    skip_rest_of_night(&mut ctrl);
    assert_eq!(ctrl.state().phase, Phase::Day);
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToDay]);
    assert_eq!(ctrl.state().resolved_night.map(|n| n.day), Some(1));

    ctrl.output_mut().take();
    ctrl.proceed().unwrap();
    assert_eq!(ctrl.state().phase, Phase::Vote);
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToVote]);

    let villager = ctrl
        .state()
        .roster
        .iter()
        .find(|p| p.role == Role::NormalVillager)
        .map(|p| p.id)
        .unwrap();
    ctrl.output_mut().take();
    let outcome = ctrl.cast_vote(villager).unwrap();

    assert_eq!(outcome.result, GameResult::InProgress);
    assert_eq!(outcome.report.deaths, vec![villager]);
    assert_eq!(outcome.session.phase, Phase::Night);
    assert_eq!(outcome.session.current_day, 2);
    assert!(outcome.session.pending_actions.is_empty());
    assert!(outcome.session.resolved_night.is_none());
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToNight]);
    assert_eq!(ctrl.state(), outcome.session);
}

#[test]
fn test_commands_in_the_wrong_phase_are_rejected() {
    let mut ctrl = controller(1);

    assert!(matches!(
        ctrl.proceed(),
        Err(GameError::WrongPhase { phase: Phase::Lobby, .. })
    ));
    assert!(matches!(ctrl.prompt(), Err(GameError::WrongPhase { .. })));

    ctrl.new_game(7).unwrap();
    assert!(matches!(
        ctrl.cast_vote(1),
        Err(GameError::WrongPhase { phase: Phase::Night, .. })
    ));
    assert!(matches!(ctrl.proceed(), Err(GameError::WrongPhase { .. })));
}

#[test]
fn test_invalid_player_count_leaves_store_untouched() {
    let mut ctrl = controller(1);
    assert!(matches!(
        ctrl.new_game(13),
        Err(GameError::InvalidPlayerCount(13))
    ));
    assert!(ctrl.store().is_empty());
    assert!(ctrl.output().events.is_empty());
}

#[test]
fn test_rejected_submission_keeps_turn() {
    let mut ctrl = seeded_controller(
        &[
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Night,
        1,
    );

    // creatures do not hunt on odd nights
    assert!(matches!(
        ctrl.submit(1, ActionKind::Kill, Some(2)),
        Err(GameError::ActionNotAllowed { day: 1, .. })
    ));
    assert!(matches!(
        ctrl.submit(2, ActionKind::Skip, None),
        Err(GameError::OutOfTurnSubmission { expected: Some(1), .. })
    ));
    assert_eq!(ctrl.state().turn_index, 0);
    assert_eq!(ctrl.prompt().unwrap().map(|p| p.actor_id), Some(1));
}

#[test]
fn test_resume_from_a_copied_store() {
    let mut first = controller(9);
    first.new_game(8).unwrap();
    first.submit(1, ActionKind::Skip, None).unwrap();
    first.submit(2, ActionKind::Skip, None).unwrap();
    let saved = first.state();

    let mut second = PhaseController::with_seed(first.store().clone(), RecordingOutput::new(), 0);
    let resumed = second.resume().unwrap();

    assert_eq!(resumed, saved);
    assert_eq!(resumed.turn_index, 2);
    let events = &second.output().events;
    assert!(matches!(
        events[0],
        GameEvent::Transition { signal: PhaseSignal::GoToNight }
    ));
    assert!(matches!(&events[1], GameEvent::Prompt(p) if p.actor_id == 3));

    skip_rest_of_night(&mut second);
    assert_eq!(second.state().phase, Phase::Day);
}

#[test]
fn test_resume_finishes_an_interrupted_night() {
    let mut ctrl = seeded_controller(
        &[
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Night,
        2,
    );
    ctrl.submit(1, ActionKind::Kill, Some(2)).unwrap();
    let mut session = ctrl.state();
    session.turn_index = session.living().count();
    SessionRepository::save(ctrl.store_mut(), &session).unwrap();

    ctrl.output_mut().take();
    let resumed = ctrl.resume().unwrap();

    assert_eq!(resumed.phase, Phase::Day);
    assert!(!resumed.is_alive(2));
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToDay]);

    // a second resume replays the day without resolving anything again
    ctrl.output_mut().take();
    let again = ctrl.resume().unwrap();
    assert_eq!(again, resumed);
    assert!(matches!(
        ctrl.output().events[0],
        GameEvent::NightResolved { day: 2, .. }
    ));
}

#[test]
fn test_bell_skips_the_day() {
    let mut ctrl = seeded_controller(
        &[
            Role::AbilityVillager(Ability::Kampanero),
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Night,
        2,
    );

    let session = ctrl.submit(1, ActionKind::ForceVote, None).unwrap();

    assert_eq!(session.phase, Phase::Vote);
    assert!(session.flags.bell_forced_vote);
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToVote]);
    assert!(session.resolved_night.as_ref().unwrap().forced_vote);
    // the Aswang never got its turn
    assert_eq!(session.living().count(), 6);
}

#[test]
fn test_voting_out_last_creature_ends_the_game() {
    let mut ctrl = seeded_controller(
        &[
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Vote,
        4,
    );

    let outcome = ctrl.cast_vote(1).unwrap();

    assert_eq!(
        outcome.result,
        GameResult::VillagerWin(WinReason::CreaturesEliminated)
    );
    assert_eq!(outcome.session, Session::default());
    assert!(ctrl.store().is_empty());
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToLobby]);
    assert!(ctrl.output().events.iter().any(|e| matches!(
        e,
        GameEvent::Victory { winner: Faction::Villagers, .. }
    )));
    assert_eq!(ctrl.evaluate_win(), GameResult::InProgress);
}

#[test]
fn test_surviving_past_day_ten_wins() {
    let mut ctrl = seeded_controller(
        &[
            Role::Creature(Creature::Aswang),
            Role::Creature(Creature::Tiktik),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Vote,
        10,
    );

    let outcome = ctrl.cast_vote(3).unwrap();

    assert_eq!(
        outcome.result,
        GameResult::VillagerWin(WinReason::SurvivedDayLimit)
    );
    assert!(ctrl.store().is_empty());
}

#[test]
fn test_night_with_no_survivors_concludes() {
    let mut ctrl = seeded_controller(
        &[Role::Creature(Creature::Aswang), Role::Creature(Creature::Kapre)],
        Phase::Night,
        2,
    );

    ctrl.submit(1, ActionKind::Kill, Some(2)).unwrap();
    let session = ctrl.state();
    assert_eq!(session.phase, Phase::Night);

    ctrl.output_mut().take();
    let session = ctrl.submit(2, ActionKind::Skip, None).unwrap();
    assert_eq!(session, Session::default());
    assert!(ctrl.store().is_empty());
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToLobby]);
}

#[test]
fn test_store_round_trip_is_lossless_mid_game() {
    let mut ctrl = controller(77);
    ctrl.new_game(10).unwrap();
    ctrl.submit(1, ActionKind::Skip, None).unwrap();

    let mut copy = MemoryStore::new();
    SessionRepository::save(&mut copy, &ctrl.state()).unwrap();
    assert_eq!(SessionRepository::load(&copy), ctrl.state());
    assert!(copy.get(gabi_engine::StoreKey::Phase).is_some());
}

#[test]
fn test_failed_vote_save_keeps_the_previous_session() {
    let mut ctrl = flaky_controller(
        &[
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Vote,
        3,
    );
    let before = ctrl.state();

    ctrl.store_mut().writes_left = Some(0);
    assert!(matches!(ctrl.cast_vote(2), Err(GameError::Store(_))));
    assert_eq!(ctrl.state(), before);

    ctrl.store_mut().writes_left = None;
    let outcome = ctrl.cast_vote(2).unwrap();
    assert_eq!(outcome.session.phase, Phase::Night);
    assert_eq!(outcome.session.current_day, 4);
    assert_eq!(outcome.session.living_ids(), vec![1, 3, 4, 5, 6]);
}

#[test]
fn test_resume_after_unsaved_bell_goes_to_vote() {
    let mut ctrl = flaky_controller(
        &[
            Role::AbilityVillager(Ability::Kampanero),
            Role::Creature(Creature::Aswang),
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
            Role::NormalVillager,
        ],
        Phase::Night,
        2,
    );

    // the submission is stored, the resolved night is not
    ctrl.store_mut().writes_left = Some(1);
    assert!(ctrl.submit(1, ActionKind::ForceVote, None).is_err());
    let stored = ctrl.state();
    assert_eq!(stored.phase, Phase::Night);
    assert_eq!(stored.pending_actions.len(), 1);
    assert!(stored.resolved_night.is_none());

    ctrl.store_mut().writes_left = None;
    ctrl.output_mut().take();
    let resumed = ctrl.resume().unwrap();

    assert_eq!(resumed.phase, Phase::Vote);
    assert!(resumed.resolved_night.as_ref().unwrap().forced_vote);
    assert_eq!(resumed.living().count(), 6);
    assert_eq!(ctrl.output().signals(), vec![PhaseSignal::GoToVote]);
    assert_eq!(ctrl.state().phase, Phase::Vote);
}

#[test]
fn test_parity_rule_can_be_switched_on() {
    let roles = [
        Role::Creature(Creature::Aswang),
        Role::Creature(Creature::Tiktik),
        Role::NormalVillager,
        Role::NormalVillager,
        Role::NormalVillager,
    ];

    let outcome = seeded_controller(&roles, Phase::Vote, 3)
        .cast_vote(3)
        .unwrap();
    assert_eq!(outcome.result, GameResult::InProgress);

    let mut ctrl = seeded_controller(&roles, Phase::Vote, 3).with_rules(WinRules {
        creature_parity: true,
    });
    let outcome = ctrl.cast_vote(3).unwrap();
    assert_eq!(
        outcome.result,
        GameResult::CreatureWin(WinReason::CreatureParity)
    );
    assert!(ctrl.store().is_empty());
}

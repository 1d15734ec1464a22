//! Whole-game checks driven through the public API.

use std::collections::HashSet;

use proptest::prelude::*;
use tombcrawl::{
    GameConfig, GameStatus, PlayerAction, PlayerCommand, Session,
    app::replay,
    input::ScriptedInput,
};

fn seeded(seed: u64) -> GameConfig {
    GameConfig {
        seed: Some(seed),
        ..GameConfig::default()
    }
}

fn explored(session: &Session) -> usize {
    let grid = session.grid();
    grid.points().filter(|p| grid.is_explored(*p)).count()
}

fn check_world(session: &Session) {
    let store = session.store();
    let grid = session.grid();
    let mut blockers = HashSet::new();
    for entity in store.handles() {
        let point = store.position(entity).expect("on-map actors have a position");
        assert!(!grid.is_wall(point), "{} stands in rock", store.name(entity));
        if store.blocks(entity) {
            assert!(blockers.insert(point), "two blockers share {point:?}");
        }
    }

    if let Some(stats) = session.player_stats() {
        assert!(stats.hp <= stats.max_hp);
        assert_eq!(stats.hp <= 0, session.status() == GameStatus::Dead);
    }
    for item in session.inventory().items() {
        assert!(!store.is_on_map(*item));
    }
}

#[test]
fn fresh_game_is_consistent() {
    let session = Session::new(seeded(2024)).expect("session");
    assert!(!session.rooms().is_empty());
    for (i, a) in session.rooms().iter().enumerate() {
        for b in &session.rooms()[i + 1..] {
            assert!(!a.intersect(b));
        }
    }

    let spawn = session.store().player_point();
    assert_eq!(spawn, session.rooms()[0].center());
    assert_eq!(session.status(), GameStatus::Playing);
    assert!(session.visibility().can_see(spawn));
    assert!(session.log().contains("Welcome stranger!"));
    check_world(&session);
}

#[test]
fn scripted_replay_matches_direct_play() {
    let script = ScriptedInput::from_script("# a short stroll\nllkkhhjj\ng\n");
    let (state, summary) = replay(seeded(99), script).expect("replay");
    assert_eq!(summary.keys, 9);
    assert!(!summary.quit);

    let mut direct = Session::new(seeded(99)).expect("session");
    let moves = [(1, 0), (1, 0), (0, -1), (0, -1), (-1, 0), (-1, 0), (0, 1), (0, 1)];
    for (dx, dy) in moves {
        direct.step(PlayerCommand::Move { dx, dy });
    }
    direct.step(PlayerCommand::PickUp);

    assert_eq!(direct.turn(), summary.turns);
    assert_eq!(direct.store().player_point(), state.session().store().player_point());
    assert_eq!(direct.player_stats(), state.session().player_stats());
}

#[test]
fn quit_is_always_available() {
    let mut session = Session::new(seeded(5)).expect("session");
    assert_eq!(session.step(PlayerCommand::Quit).action, PlayerAction::Exit);
    assert_eq!(session.turn(), 0);
}

fn command() -> impl Strategy<Value = PlayerCommand> {
    prop_oneof![
        6 => (-1i32..=1, -1i32..=1).prop_map(|(dx, dy)| PlayerCommand::Move { dx, dy }),
        1 => Just(PlayerCommand::PickUp),
        1 => (0usize..3).prop_map(PlayerCommand::UseItem),
        1 => (0usize..3).prop_map(PlayerCommand::DropItem),
        1 => Just(PlayerCommand::OpenInventory),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    #[test]
    fn invariants_hold_through_random_play(
        seed in any::<u64>(),
        commands in prop::collection::vec(command(), 1..120),
    ) {
        let mut session = Session::new(seeded(seed)).expect("session");
        let mut last_explored = explored(&session);
        let mut dead = false;

        for command in commands {
            let before = session.turn();
            let report = session.step(command);

            let took_turn = report.action == PlayerAction::TookTurn;
            prop_assert_eq!(session.turn(), before + u64::from(took_turn));
            if dead {
                prop_assert_eq!(report.action, PlayerAction::DidntTakeTurn);
            }
            dead = session.status() == GameStatus::Dead;

            let now = explored(&session);
            prop_assert!(now >= last_explored);
            last_explored = now;
            check_world(&session);
        }
        prop_assert!(session.visibility().can_see(session.store().player_point()));
    }
}

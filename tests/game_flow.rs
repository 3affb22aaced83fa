//! End-to-end play through the game controller on a virtual clock

use std::time::Duration;

use glam::IVec2;

use spirolaterals::consts::{PATTERN_COUNT, SLOT_COUNT};
use spirolaterals::outcome::Outcome;
use spirolaterals::patterns::{EMBEDDED_PATTERNS, PatternStore};
use spirolaterals::platform::{
    Control, Entity, InputCommand, ManualScheduler, RecordingRenderer, RecordingScore,
};
use spirolaterals::sim::{Heading, RunPhase, Termination, trace_run};
use spirolaterals::{GameController, LayoutConfig, SessionState};

type Game = GameController<ManualScheduler, RecordingRenderer, RecordingScore>;

fn new_game(session: SessionState, store: PatternStore) -> Game {
    GameController::new(
        session,
        LayoutConfig::landscape(),
        store,
        ManualScheduler::new(),
        RecordingRenderer::new(),
        RecordingScore::default(),
    )
}

fn game() -> Game {
    new_game(SessionState::default(), PatternStore::embedded())
}

/// Fire timers until the run ends; returns the number of ticks taken
fn play_out(game: &mut Game) -> u32 {
    let mut ticks = 0;
    while let Some(handle) = game.scheduler_mut().pop_next() {
        if game.fire(handle).is_some() {
            ticks += 1;
        }
    }
    ticks
}

#[test]
fn test_solving_awards_bonus_once() {
    let mut g = game();
    g.handle(InputCommand::Run);
    play_out(&mut g);
    assert_eq!(g.score().value, 6);
    assert_eq!(g.score().last_solved, Some(1));

    g.handle(InputCommand::Run);
    play_out(&mut g);
    let verdict = g.last_verdict().unwrap();
    assert_eq!(verdict.outcome, Outcome::Success);
    assert!(!verdict.awarded);
    assert_eq!(g.score().value, 6);
    assert!(g.next_enabled());
}

#[test]
fn test_ticks_follow_delay() {
    let mut g = game();
    g.set_delay(100);
    g.handle(InputCommand::Run);
    let ticks = play_out(&mut g);
    assert_eq!(ticks, 32);
    assert_eq!(g.scheduler().now(), Duration::from_millis(3200));
}

#[test]
fn test_stop_mid_run_is_not_judged() {
    let mut g = game();
    g.handle(InputCommand::Run);
    for _ in 0..5 {
        let h = g.scheduler_mut().pop_next().unwrap();
        g.fire(h);
    }
    g.handle(InputCommand::Stop);
    assert_eq!(g.phase(), RunPhase::Stopped(Termination::Cancelled));
    assert_eq!(g.scheduler().pending(), 0);
    assert_eq!(g.last_verdict(), None);
    assert_eq!(g.score().value, 0);
    assert!(g.renderer().control_enabled(Control::Run));

    let success = g.registry().handle(Entity::SuccessBanner);
    let failure = g.registry().handle(Entity::FailureBanner);
    assert!(!g.renderer().is_visible(success));
    assert!(!g.renderer().is_visible(failure));
}

#[test]
fn test_out_of_bounds_is_judged_and_splotted() {
    let mut g = game();
    g.set_steps([5; SLOT_COUNT]);
    g.handle(InputCommand::Run);
    let ticks = play_out(&mut g);
    assert_eq!(ticks, 10);

    let exit = IVec2::new(900, 100);
    assert_eq!(
        g.phase(),
        RunPhase::Stopped(Termination::OutOfBounds {
            heading: Heading::Right,
            at: exit
        })
    );
    assert_eq!(
        g.renderer().markers(),
        vec![(IVec2::new(850, 75), Heading::Right)]
    );
    let splot = g.registry().handle(Entity::Splot);
    assert!(g.renderer().is_visible(splot));
    for h in Heading::ALL {
        assert!(!g.renderer().is_visible(g.registry().turtle(h)));
    }

    let verdict = g.last_verdict().unwrap();
    assert_eq!(verdict.outcome, Outcome::Failure);
    let failure = g.registry().handle(Entity::FailureBanner);
    assert!(g.renderer().is_visible(failure));
    assert!(!g.next_enabled());
    assert!(!g.renderer().control_enabled(Control::NextLevel));
}

#[test]
fn test_out_of_bounds_matching_goal_still_succeeds() {
    let goal = "55555\n";
    let mut g = new_game(SessionState::default(), PatternStore::from_text(goal));
    g.set_steps([5; SLOT_COUNT]);
    g.handle(InputCommand::Run);
    play_out(&mut g);
    assert!(matches!(
        g.phase(),
        RunPhase::Stopped(Termination::OutOfBounds { .. })
    ));
    assert_eq!(g.last_verdict().unwrap().outcome, Outcome::Success);
    assert_eq!(g.score().value, 6);
}

#[test]
fn test_start_while_running_is_ignored() {
    let mut g = game();
    g.handle(InputCommand::Run);
    let h = g.scheduler_mut().pop_next().unwrap();
    g.fire(h);
    g.handle(InputCommand::Run);
    assert_eq!(g.simulation().ticks, 1);
    assert_eq!(g.scheduler().pending(), 1);
}

#[test]
fn test_edit_during_run_stops_it() {
    let mut g = game();
    g.handle(InputCommand::Run);
    g.handle(InputCommand::SetValue(4));
    assert!(!g.is_running());
    assert_eq!(g.scheduler().pending(), 0);
    assert_eq!(g.steps().values(), &[4, 1, 1, 3, 2]);
}

#[test]
fn test_advance_wraps_after_last_level() {
    let session = SessionState {
        level: PATTERN_COUNT,
        last: Some(PATTERN_COUNT),
        ..SessionState::default()
    };
    let mut g = new_game(session, PatternStore::embedded());
    assert_eq!(g.pattern(), PATTERN_COUNT);
    // Already solved, so Next starts unlocked
    assert!(g.next_enabled());
    g.handle(InputCommand::NextLevel);
    assert_eq!(g.pattern(), 1);
    assert!(!g.next_enabled());
}

#[test]
fn test_missing_table_resets_to_level_one() {
    let dir = tempfile::tempdir().unwrap();
    let store = PatternStore::from_path(dir.path().join("patterns.dat"));
    let session = SessionState {
        level: 40,
        ..SessionState::default()
    };
    let g = new_game(session, store);
    assert_eq!(g.pattern(), 1);
    assert_eq!(g.goal().values(), &[1, 1, 1, 3, 2]);
}

#[test]
fn test_session_round_trip_through_controller() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("session.json");

    let mut g = game();
    g.handle(InputCommand::SlowDown);
    g.handle(InputCommand::Run);
    play_out(&mut g);
    g.handle(InputCommand::NextLevel);
    g.session().save(&path).unwrap();

    let restored = SessionState::load(&path).unwrap();
    assert_eq!(
        restored,
        SessionState {
            score: 6,
            level: 2,
            last: Some(1),
            delay: 525,
        }
    );
    let g = new_game(restored, PatternStore::embedded());
    assert_eq!(g.display().updates, vec![6]);
    assert!(!g.next_enabled());
}

#[test]
fn test_portrait_layout_plays_the_same() {
    let mut g = game();
    g.set_layout(LayoutConfig::portrait());
    g.handle(InputCommand::Run);
    assert_eq!(play_out(&mut g), 32);
    assert_eq!(g.last_verdict().unwrap().outcome, Outcome::Success);
}

#[test]
fn test_bundled_patterns_fit_both_layouts() {
    let store = PatternStore::embedded();
    assert_eq!(EMBEDDED_PATTERNS.lines().count(), PATTERN_COUNT as usize);
    for layout in [LayoutConfig::landscape(), LayoutConfig::portrait()] {
        for index in 1..=PATTERN_COUNT {
            let goal = store.try_load(index).unwrap();
            let trace = trace_run(
                goal.values(),
                layout.player_origin,
                &layout.bounds(),
                layout.player_unit,
            );
            assert_eq!(
                trace.termination,
                Termination::Completed,
                "pattern {index} leaves the {:?} box",
                layout.orientation
            );
        }
    }
}

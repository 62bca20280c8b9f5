//! End-to-end session scenarios

use slope_runner::RunnerTuning;
use slope_runner::sim::{
    EndCause, GameEvent, GameSession, GameState, Obstacle, PowerUp, SessionPhase, TickInput,
};

/// Tuning with no random obstacles so runs are only ended by what a test places
fn clear_track() -> RunnerTuning {
    RunnerTuning {
        obstacle_chance: 0.0,
        ..RunnerTuning::default()
    }
}

fn straight() -> TickInput {
    TickInput::tilt(0.0)
}

fn distance(session: &GameSession) -> u64 {
    session.state().map_or(0, |s| s.distance_score())
}

fn speed(session: &GameSession) -> f32 {
    session.state().map_or(0.0, |s| s.progression.speed)
}

#[test]
fn speed_ramps_every_fifty_without_powerup() {
    let mut session = GameSession::new(clear_track()).expect("valid tuning");
    session.start(PowerUp::None, 1);
    assert!((speed(&session) - 0.18).abs() < 1e-6);

    let mut speed_ups = Vec::new();
    while distance(&session) < 50 {
        for event in session.tick(&straight()) {
            if let GameEvent::SpeedIncreased { speed } = event {
                speed_ups.push(speed);
            }
        }
    }
    assert_eq!(speed_ups.len(), 1);
    assert!((speed(&session) - 0.22).abs() < 1e-5);

    while distance(&session) < 100 {
        session.tick(&straight());
    }
    assert!((speed(&session) - 0.26).abs() < 1e-5);
    assert_eq!(session.phase(), SessionPhase::Running);
}

#[test]
fn slow_motion_ramps_every_hundred() {
    let mut session = GameSession::new(clear_track()).expect("valid tuning");
    session.start(PowerUp::SlowMotion, 2);

    let mut ramp_distances = Vec::new();
    while distance(&session) < 250 {
        let events = session.tick(&straight());
        if events.iter().any(|e| matches!(e, GameEvent::SpeedIncreased { .. })) {
            ramp_distances.push(distance(&session));
        }
    }
    assert_eq!(ramp_distances, vec![100, 200]);
    assert!((speed(&session) - 0.26).abs() < 1e-5);
}

#[test]
fn double_points_doubles_score_but_not_ramp() {
    let mut session = GameSession::new(clear_track()).expect("valid tuning");
    session.start(PowerUp::DoublePoints, 3);

    while distance(&session) < 60 {
        session.tick(&straight());
        assert_eq!(session.view().score, 2 * distance(&session));
    }
    // Score passed 100 but the ramp only fired once, at distance 50
    assert!(session.view().score >= 120);
    assert!((speed(&session) - 0.22).abs() < 1e-5);
}

#[test]
fn speed_up_notice_clears_after_ninety_ticks() {
    let mut session = GameSession::new(clear_track()).expect("valid tuning");
    session.start(PowerUp::None, 4);

    loop {
        let events = session.tick(&straight());
        if events.iter().any(|e| matches!(e, GameEvent::SpeedIncreased { .. })) {
            break;
        }
    }
    assert!(session.view().speed_up_notice);
    for _ in 0..89 {
        session.tick(&straight());
    }
    assert!(session.view().speed_up_notice);
    session.tick(&straight());
    assert!(!session.view().speed_up_notice);
}

#[test]
fn shield_absorbs_two_hits_and_breaks_on_third() {
    let tuning = clear_track();
    let mut state = GameState::new(5, PowerUp::Shield, &tuning);
    for z in [5.0, 10.0, 15.0] {
        state.world.obstacles.insert(Obstacle { x: 0.0, z });
    }
    let mut session = GameSession::new(tuning).expect("valid tuning");
    session.restore(state);
    assert_eq!(session.view().shield_remaining, Some(3));

    let mut outcomes = Vec::new();
    while session.phase() == SessionPhase::Running {
        for event in session.tick(&straight()) {
            match event {
                GameEvent::ShieldAbsorbed { remaining } => {
                    outcomes.push(format!("absorbed:{}", remaining));
                    assert_eq!(session.phase(), SessionPhase::Running);
                }
                GameEvent::GameOver { cause, .. } => outcomes.push(format!("over:{:?}", cause)),
                _ => {}
            }
        }
        assert!(distance(&session) < 30, "third hit should end the run");
    }

    assert_eq!(outcomes, vec!["absorbed:2", "absorbed:1", "over:Collision"]);
    let view = session.view();
    assert!(view.game_over && view.show_end_screen);
    assert_eq!(view.shield_remaining, Some(0));
    assert_eq!(view.end_cause, Some(EndCause::Collision));
}

#[test]
fn unshielded_run_ends_on_first_hit() {
    let tuning = clear_track();
    let mut state = GameState::new(6, PowerUp::DoublePoints, &tuning);
    state.world.obstacles.insert(Obstacle { x: 0.5, z: 8.0 });
    let mut session = GameSession::new(tuning).expect("valid tuning");
    session.restore(state);

    while session.phase() == SessionPhase::Running {
        session.tick(&straight());
    }
    assert_eq!(session.view().end_cause, Some(EndCause::Collision));
    assert_eq!(session.final_score(), Some(session.view().score));
}

#[test]
fn steering_off_the_edge_ends_by_falling() {
    let mut session = GameSession::new(clear_track()).expect("valid tuning");
    session.start(PowerUp::Shield, 7);
    for _ in 0..30 {
        session.tick(&straight());
    }
    let mut fell = false;
    while session.phase() == SessionPhase::Running {
        let events = session.tick(&TickInput::tilt(-1.0));
        fell |= events.contains(&GameEvent::FellOffTrack);
    }
    assert!(fell);
    assert_eq!(session.view().end_cause, Some(EndCause::FellOffTrack));
    // Shield never helps against falling
    assert_eq!(session.view().shield_remaining, Some(3));
}

#[test]
fn pause_freezes_everything() {
    let mut session = GameSession::new(RunnerTuning::default()).expect("valid tuning");
    session.start(PowerUp::None, 8);
    for _ in 0..120 {
        session.tick(&straight());
    }
    assert!(session.pause());
    let frozen_state = session.state().cloned();
    let frozen_view = session.view().clone();
    let frozen_json = serde_json::to_string(&frozen_state).expect("state serializes");

    for i in 0..100 {
        let tilt = if i % 2 == 0 { 0.9 } else { -0.9 };
        assert!(session.tick(&TickInput::tilt(tilt)).is_empty());
    }

    assert_eq!(session.state().cloned(), frozen_state);
    assert_eq!(session.view(), &frozen_view);
    let json = serde_json::to_string(&session.state().cloned()).expect("state serializes");
    assert_eq!(json, frozen_json);

    assert!(session.resume());
    session.tick(&straight());
    let ticks_before = frozen_state.map_or(0, |s| s.time_ticks);
    assert!(session.state().map_or(0, |s| s.time_ticks) > ticks_before);
}

#[test]
fn quit_then_start_matches_fresh_session() {
    let tuning = RunnerTuning::default();

    let mut reused = GameSession::new(tuning.clone()).expect("valid tuning");
    reused.start(PowerUp::DoublePoints, 42);
    for _ in 0..100 {
        reused.tick(&TickInput::tilt(0.2));
    }
    assert!(reused.quit());
    assert_eq!(reused.view().end_cause, Some(EndCause::Quit));
    reused.start(PowerUp::Shield, 99);

    let mut fresh = GameSession::new(tuning).expect("valid tuning");
    fresh.start(PowerUp::Shield, 99);

    assert_eq!(reused.state(), fresh.state());
    assert_eq!(reused.view(), fresh.view());
    assert_eq!(reused.phase(), SessionPhase::Running);
}

#[test]
fn lifecycle_misuse_is_a_no_op() {
    let mut session = GameSession::new(RunnerTuning::default()).expect("valid tuning");
    assert!(!session.resume());
    assert!(session.tick(&straight()).is_empty());
    assert!(session.state().is_none());

    session.start(PowerUp::None, 10);
    assert!(session.trigger_game_over(EndCause::Collision));
    let ended = session.state().cloned();
    assert!(!session.trigger_game_over(EndCause::Collision));
    assert!(session.tick(&straight()).is_empty());
    assert!(!session.resume());
    assert_eq!(session.state().cloned(), ended);
}

//! Fixed timestep simulation tick
//!
//! Order within one tick: player physics, collisions and scoring, then track
//! generation and retirement around the new position.

use super::collision::{apply_speed_progression, resolve_collisions, scaled_score};
use super::physics;
use super::state::{EndCause, GameEvent, GameState};
use crate::tuning::RunnerTuning;

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TickInput {
    /// Latest normalized tilt sample in `[-1, 1]`; `None` keeps the current lateral offset
    pub tilt: Option<f32>,
}

impl TickInput {
    pub fn tilt(sample: f32) -> Self {
        Self { tilt: Some(sample) }
    }
}

/// Advance the game state by one tick and report what happened.
///
/// A finished state is left untouched.
pub fn tick(state: &mut GameState, input: &TickInput, tuning: &RunnerTuning) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if state.is_finished() {
        return events;
    }

    state.time_ticks += 1;

    // Player movement
    let step = physics::step(
        &mut state.player,
        state.progression.speed,
        input.tilt,
        &state.world,
        tuning,
    );
    if step.started_falling {
        log::debug!(
            "left the track at x={:.2}, z={:.2}",
            state.player.lateral(),
            state.player.forward()
        );
        events.push(GameEvent::FellOffTrack);
    }
    if step.hit_floor {
        finish(state, EndCause::FellOffTrack, &mut events);
        return events;
    }

    // Collisions (suppressed while falling)
    let report = resolve_collisions(&state.player, &mut state.world, &mut state.powerup, tuning);
    for _ in &report.absorbed {
        events.push(GameEvent::ShieldAbsorbed {
            remaining: state.powerup.shield_remaining().unwrap_or(0),
        });
    }
    if report.fatal.is_some() {
        events.push(GameEvent::ObstacleHit);
        finish(state, EndCause::Collision, &mut events);
        return events;
    }

    // Score and speed ramp (unscaled distance drives the ramp)
    let distance = state.distance_score();
    state.score = scaled_score(distance, state.powerup.score_multiplier);
    if let Some(speed) = apply_speed_progression(
        &mut state.progression,
        distance,
        state.powerup.speed_up_interval,
        tuning.speed_increment,
    ) {
        log::info!("Speed increased to {:.2} at distance {}", speed, distance);
        events.push(GameEvent::SpeedIncreased { speed });
    }

    // Procedural geometry
    let z = state.player.forward();
    let camera_z = state.camera_z(tuning);
    state.world.ensure_generated(z, &mut state.rng, tuning);
    state.world.retire_stale(z, camera_z, tuning);

    events
}

/// Mark the state finished and emit the game-over event (first call only)
pub fn finish(state: &mut GameState, cause: EndCause, events: &mut Vec<GameEvent>) {
    if state.finished.is_some() {
        return;
    }
    state.finished = Some(cause);
    log::info!(
        "Game over ({}) at tick {} with score {}",
        cause.as_str(),
        state.time_ticks,
        state.score
    );
    events.push(GameEvent::GameOver {
        cause,
        score: state.score,
    });
}

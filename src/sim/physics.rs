//! Player movement: forward roll, tilt steering, falling
//!
//! Lateral position is set straight from the tilt sample each tick, not
//! integrated. Leaving the track is permanent; the ball accelerates
//! downward until it passes the fall floor.

use super::state::{MotionState, PlayerState};
use super::track::TrackWorld;
use crate::tuning::RunnerTuning;

/// What one physics step did
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StepOutcome {
    /// The ball left the track this tick
    pub started_falling: bool,
    /// The ball dropped below the fall floor this tick
    pub hit_floor: bool,
}

/// Lateral offset for a normalized tilt sample (clamped to `[-1, 1]`)
#[inline]
pub fn lateral_from_tilt(tilt: f32, tuning: &RunnerTuning) -> f32 {
    tilt.clamp(-1.0, 1.0) * tuning.tilt_sensitivity
}

/// Advance the player by one tick
pub fn step(
    player: &mut PlayerState,
    speed: f32,
    tilt: Option<f32>,
    world: &TrackWorld,
    tuning: &RunnerTuning,
) -> StepOutcome {
    let mut outcome = StepOutcome::default();

    player.pos.z += speed;
    if let Some(tilt) = tilt.filter(|t| t.is_finite()) {
        player.pos.x = lateral_from_tilt(tilt, tuning);
    }

    if player.motion == MotionState::OnTrack
        && !world.supports(player.pos.x, player.pos.z, tuning)
    {
        player.motion = MotionState::Falling;
        player.fall_velocity = 0.0;
        outcome.started_falling = true;
    }

    match player.motion {
        MotionState::Falling => {
            player.fall_velocity += tuning.fall_acceleration;
            player.pos.y -= player.fall_velocity;
            player.rotation += speed * tuning.falling_roll_rate;
            outcome.hit_floor = player.pos.y < tuning.fall_floor;
        }
        MotionState::OnTrack => {
            player.pos.y = tuning.rest_height;
            player.rotation += speed * tuning.roll_rate;
        }
    }

    outcome
}

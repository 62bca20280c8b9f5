//! Obstacle collisions, scoring and speed progression
//!
//! Overlap is an axis-aligned box test on the lateral and forward axes.
//! Score is whole distance units times the power-up multiplier, but the speed
//! ramp always looks at the unscaled distance.

use super::arena::EntityId;
use super::powerup::{CollisionOutcome, PowerUpState};
use super::state::{Obstacle, PlayerState, Progression};
use super::track::TrackWorld;
use crate::tuning::RunnerTuning;

/// Result of settling this tick's collisions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CollisionReport {
    /// Obstacles the shield absorbed (already removed from the world)
    pub absorbed: Vec<EntityId>,
    /// Obstacle that ended the run, if any
    pub fatal: Option<EntityId>,
}

/// Whether the player overlaps an obstacle
#[inline]
pub fn overlaps(player: &PlayerState, obstacle: &Obstacle, threshold: f32) -> bool {
    (obstacle.x - player.pos.x).abs() < threshold && (obstacle.z - player.pos.z).abs() < threshold
}

/// Obstacles currently touching the player, in id order
pub fn detect(player: &PlayerState, world: &TrackWorld, threshold: f32) -> Vec<EntityId> {
    world
        .obstacles
        .iter()
        .filter(|(_, obstacle)| overlaps(player, obstacle, threshold))
        .map(|(id, _)| id)
        .collect()
}

/// Detect and settle collisions; stops at the first fatal hit
pub fn resolve_collisions(
    player: &PlayerState,
    world: &mut TrackWorld,
    powerup: &mut PowerUpState,
    tuning: &RunnerTuning,
) -> CollisionReport {
    let mut report = CollisionReport::default();
    if player.is_falling() {
        return report;
    }

    for id in detect(player, world, tuning.collision_threshold) {
        match powerup.resolve_collision() {
            CollisionOutcome::Absorbed => {
                world.obstacles.remove(id);
                log::debug!(
                    "shield absorbed obstacle {:?}, {} hit(s) left",
                    id,
                    powerup.shield_remaining().unwrap_or(0)
                );
                report.absorbed.push(id);
            }
            CollisionOutcome::Fatal => {
                log::debug!("fatal collision with obstacle {:?}", id);
                report.fatal = Some(id);
                break;
            }
        }
    }

    report
}

/// Reported score for an unscaled distance score
#[inline]
pub fn scaled_score(distance_score: u64, multiplier: u64) -> u64 {
    distance_score.saturating_mul(multiplier)
}

/// Apply a speed increase if the distance crossed a new interval multiple.
/// Returns the new speed when it changed.
pub fn apply_speed_progression(
    progression: &mut Progression,
    distance_score: u64,
    interval: u64,
    increment: f32,
) -> Option<f32> {
    if interval == 0 || distance_score < progression.last_speed_up_score + interval {
        return None;
    }
    progression.last_speed_up_score = (distance_score / interval) * interval;
    progression.speed += increment;
    Some(progression.speed)
}

//! Procedural track, obstacles and scenery
//!
//! Track segments tile the forward axis contiguously. New segments appear as
//! the player approaches the look-ahead horizon and are retired once far
//! enough behind. Obstacles and buildings retire relative to the trailing
//! camera so they stay on screen a little longer than the player's own pass.

use glam::Vec3;
use rand::Rng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::arena::Arena;
use super::state::{Building, Obstacle, TrackSegment};
use crate::consts::*;
use crate::tuning::RunnerTuning;

/// Obstacle layouts a new row may use (picked uniformly)
///
/// `Single` and `Cluster` can land where no gap is reachable; passability is
/// only guaranteed for `Double` and `TripleWall`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObstaclePattern {
    /// One cube anywhere across the track
    Single,
    /// Two cubes with a gap in the middle
    Double,
    /// Three-slot wall with exactly one slot open
    TripleWall { gap: usize },
    /// Two cubes side by side
    Cluster,
}

impl ObstaclePattern {
    pub fn choose(rng: &mut Pcg32) -> Self {
        match rng.random_range(0..4) {
            0 => ObstaclePattern::Single,
            1 => ObstaclePattern::Double,
            2 => ObstaclePattern::TripleWall {
                gap: rng.random_range(0..TRIPLE_SLOTS.len()),
            },
            _ => ObstaclePattern::Cluster,
        }
    }

    /// Lateral offsets of the cubes in this row
    pub fn lateral_offsets(&self, rng: &mut Pcg32) -> Vec<f32> {
        match *self {
            ObstaclePattern::Single => {
                vec![rng.random_range(-SINGLE_SPAWN_RANGE..=SINGLE_SPAWN_RANGE)]
            }
            ObstaclePattern::Double => vec![-DOUBLE_OFFSET, DOUBLE_OFFSET],
            ObstaclePattern::TripleWall { gap } => TRIPLE_SLOTS
                .iter()
                .enumerate()
                .filter(|(slot, _)| *slot != gap)
                .map(|(_, x)| *x)
                .collect(),
            ObstaclePattern::Cluster => {
                let base = rng.random_range(CLUSTER_BASE_MIN..=CLUSTER_BASE_MAX);
                vec![base, base + CLUSTER_SPACING]
            }
        }
    }
}

/// Entities created by one `ensure_generated` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnCounts {
    pub segments: usize,
    pub obstacles: usize,
    pub buildings: usize,
}

/// Entities removed by one `retire_stale` call
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RetireCounts {
    pub segments: usize,
    pub obstacles: usize,
    pub buildings: usize,
}

/// All live procedural geometry
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrackWorld {
    pub segments: Arena<TrackSegment>,
    pub obstacles: Arena<Obstacle>,
    pub buildings: Arena<Building>,
    /// Centre of the furthest segment generated so far
    last_segment_z: Option<f32>,
    /// Base position of the furthest building row generated so far
    last_building_row_z: Option<f32>,
}

impl TrackWorld {
    /// Clear everything and lay down the initial visible window
    pub fn reset_initial(&mut self, rng: &mut Pcg32, tuning: &RunnerTuning) {
        self.segments.clear();
        self.obstacles.clear();
        self.buildings.clear();
        self.last_segment_z = None;
        self.last_building_row_z = None;

        let length = tuning.segment_length;
        for i in 0..tuning.initial_segments {
            let z = i as f32 * length;
            self.spawn_segment(z);
            if i >= FIRST_OBSTACLE_SEGMENT && rng.random::<f32>() < tuning.obstacle_chance {
                self.spawn_obstacle_row(z + length / 2.0, rng);
            }
        }

        for i in 0..tuning.initial_building_rows {
            self.spawn_building_row(i as f32 * length, rng, tuning);
        }
    }

    /// Make sure track and scenery reach the look-ahead horizon
    pub fn ensure_generated(
        &mut self,
        player_z: f32,
        rng: &mut Pcg32,
        tuning: &RunnerTuning,
    ) -> SpawnCounts {
        let length = tuning.segment_length;
        let mut counts = SpawnCounts::default();

        let track_horizon = player_z + length * tuning.track_lookahead_segments;
        loop {
            match self.last_segment_z {
                None => {
                    self.spawn_segment(0.0);
                    counts.segments += 1;
                }
                Some(last) if track_horizon > last => {
                    self.spawn_segment(last + length);
                    counts.segments += 1;
                    if rng.random::<f32>() < tuning.obstacle_chance {
                        counts.obstacles += self.spawn_obstacle_row(last + length / 2.0, rng);
                    }
                }
                Some(_) => break,
            }
        }

        let scenery_horizon = player_z + length * tuning.building_lookahead_segments;
        loop {
            let row_z = match self.last_building_row_z {
                None => 0.0,
                Some(last) if scenery_horizon > last => last + length,
                Some(_) => break,
            };
            counts.buildings += self.spawn_building_row(row_z, rng, tuning);
        }

        counts
    }

    /// Drop geometry the player and camera have left behind
    pub fn retire_stale(
        &mut self,
        player_z: f32,
        camera_z: f32,
        tuning: &RunnerTuning,
    ) -> RetireCounts {
        let segment_lag = tuning.segment_length * tuning.track_retire_segments;
        let obstacle_cutoff = camera_z - tuning.obstacle_retire_margin;
        let building_cutoff = camera_z - tuning.building_retire_margin;

        RetireCounts {
            segments: self.segments.retain(|s| player_z - s.z <= segment_lag),
            obstacles: self.obstacles.retain(|o| o.z >= obstacle_cutoff),
            buildings: self.buildings.retain(|b| b.pos.z >= building_cutoff),
        }
    }

    /// Segment whose half-length window contains `z`
    ///
    /// Windows are closed so the seam between two segments is covered.
    pub fn segment_at(&self, z: f32, tuning: &RunnerTuning) -> Option<&TrackSegment> {
        let half = tuning.segment_length / 2.0;
        self.segments.values().find(|s| (s.z - z).abs() <= half)
    }

    /// Whether the point (lateral `x`, forward `z`) is on the drivable surface
    pub fn supports(&self, x: f32, z: f32, tuning: &RunnerTuning) -> bool {
        let half_width = tuning.half_track_width();
        self.segment_at(z, tuning).is_some() && (-half_width..=half_width).contains(&x)
    }

    pub fn last_segment_z(&self) -> Option<f32> {
        self.last_segment_z
    }

    fn spawn_segment(&mut self, z: f32) {
        self.segments.insert(TrackSegment { z });
        self.last_segment_z = Some(z);
    }

    /// Place one obstacle row at `z`; returns the number of cubes spawned
    pub fn spawn_obstacle_row(&mut self, z: f32, rng: &mut Pcg32) -> usize {
        let pattern = ObstaclePattern::choose(rng);
        let offsets = pattern.lateral_offsets(rng);
        for x in &offsets {
            self.obstacles.insert(Obstacle { x: *x, z });
        }
        log::trace!("obstacle row {:?} at z={:.1}", pattern, z);
        offsets.len()
    }

    fn spawn_building_row(&mut self, z: f32, rng: &mut Pcg32, tuning: &RunnerTuning) -> usize {
        let mut spawned = 0;
        for side in [-1.0f32, 1.0] {
            for i in 0..tuning.buildings_per_side {
                let x = side * (tuning.building_distance + i as f32 * tuning.building_spacing);
                let height =
                    rng.random_range(tuning.building_min_height..=tuning.building_max_height);
                let jitter = if tuning.building_jitter > 0.0 {
                    rng.random_range(-tuning.building_jitter..=tuning.building_jitter)
                } else {
                    0.0
                };
                self.buildings.insert(Building {
                    pos: Vec3::new(x, height / 2.0, z + jitter),
                    height,
                });
                spawned += 1;
            }
        }
        self.last_building_row_z = Some(z);
        spawned
    }
}

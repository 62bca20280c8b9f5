//! Game state and core simulation types
//!
//! Everything one run needs to be reproduced from its seed lives here.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::powerup::{PowerUp, PowerUpState};
use super::track::TrackWorld;
use crate::tuning::RunnerTuning;

/// Whether the ball is rolling on the track or has left it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MotionState {
    #[default]
    OnTrack,
    /// One-way: a falling ball never returns to the track
    Falling,
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndCause {
    /// Dropped below the fall floor after leaving the track
    FellOffTrack,
    /// Hit an obstacle with no shield capacity left
    Collision,
    /// Player left voluntarily
    Quit,
}

impl EndCause {
    pub fn as_str(&self) -> &'static str {
        match self {
            EndCause::FellOffTrack => "fell off track",
            EndCause::Collision => "collision",
            EndCause::Quit => "quit",
        }
    }
}

/// Something gameplay-relevant that happened during a tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball left the track surface
    FellOffTrack,
    /// Shield took a hit; `remaining` more hits before it breaks
    ShieldAbsorbed { remaining: u32 },
    /// Obstacle hit with no protection left
    ObstacleHit,
    /// Permanent forward speed increase
    SpeedIncreased { speed: f32 },
    /// Run ended
    GameOver { cause: EndCause, score: u64 },
}

/// The player's ball
///
/// Axes: `x` is lateral offset, `y` is height, `z` is forward distance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerState {
    pub pos: Vec3,
    /// Downward speed while falling (grows every tick)
    pub fall_velocity: f32,
    /// Cosmetic roll angle (radians)
    pub rotation: f32,
    pub motion: MotionState,
}

impl PlayerState {
    pub fn new(rest_height: f32) -> Self {
        Self {
            pos: Vec3::new(0.0, rest_height, 0.0),
            fall_velocity: 0.0,
            rotation: 0.0,
            motion: MotionState::OnTrack,
        }
    }

    #[inline]
    pub fn lateral(&self) -> f32 {
        self.pos.x
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.pos.y
    }

    #[inline]
    pub fn forward(&self) -> f32 {
        self.pos.z
    }

    pub fn is_falling(&self) -> bool {
        self.motion == MotionState::Falling
    }
}

/// A fixed-length strip of track centred on `z`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackSegment {
    pub z: f32,
}

/// An obstacle cube
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub x: f32,
    pub z: f32,
}

/// A cosmetic building flanking the track
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub pos: Vec3,
    pub height: f32,
}

/// Forward speed and the speed-up bookkeeping
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Progression {
    /// Distance per tick
    pub speed: f32,
    /// Highest interval multiple already rewarded with a speed-up
    pub last_speed_up_score: u64,
}

impl Progression {
    pub fn new(base_speed: f32) -> Self {
        Self {
            speed: base_speed,
            last_speed_up_score: 0,
        }
    }
}

/// Complete state of one run (deterministic, serializable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Procedural generation RNG
    pub rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub player: PlayerState,
    pub progression: Progression,
    pub powerup: PowerUpState,
    pub world: TrackWorld,
    /// Reported score (multiplier applied)
    pub score: u64,
    /// Set once the run has ended; ticks become no-ops
    pub finished: Option<EndCause>,
}

impl GameState {
    /// Fresh run: player at the origin, initial track window generated
    pub fn new(seed: u64, selection: PowerUp, tuning: &RunnerTuning) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let mut world = TrackWorld::default();
        world.reset_initial(&mut rng, tuning);

        Self {
            seed,
            rng,
            time_ticks: 0,
            player: PlayerState::new(tuning.rest_height),
            progression: Progression::new(tuning.base_speed),
            powerup: PowerUpState::from_selection(selection, tuning),
            world,
            score: 0,
            finished: None,
        }
    }

    /// Unscaled score: whole distance units travelled
    pub fn distance_score(&self) -> u64 {
        self.player.forward().max(0.0).floor() as u64
    }

    /// Forward position of the trailing camera
    pub fn camera_z(&self, tuning: &RunnerTuning) -> f32 {
        self.player.forward() - tuning.camera_offset
    }

    pub fn is_finished(&self) -> bool {
        self.finished.is_some()
    }
}

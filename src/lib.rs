//! Slope Runner - A tilt-steered endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (track generation, physics, collisions, sessions)
//! - `platform`: Sensor feed and fixed-step clock
//! - `persistence`: JSON save/load for profile data
//! - `tuning`: Data-driven game balance
//! - `ranks` / `credits`: End-of-run rank tiers and the local credit ledger

pub mod credits;
pub mod persistence;
pub mod platform;
pub mod ranks;
pub mod sim;
pub mod tuning;

pub use credits::{CreditLedger, LedgerError};
pub use ranks::{BestRecord, Rank};
pub use tuning::{RunnerTuning, TuningError};

/// Game configuration constants
pub mod consts {
    /// Nominal simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Fixed simulation timestep
    pub const SIM_DT: f32 = 1.0 / TICK_RATE as f32;
    /// Maximum substeps per frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Track geometry
    pub const SEGMENT_LENGTH: f32 = 10.0;
    pub const TRACK_WIDTH: f32 = 4.0;
    pub const INITIAL_SEGMENTS: u32 = 25;
    /// Segments ahead of the player that must exist
    pub const TRACK_LOOKAHEAD_SEGMENTS: f32 = 3.0;
    /// Segments behind the player before a segment is retired
    pub const TRACK_RETIRE_SEGMENTS: f32 = 3.0;
    /// First initial segment index that may carry obstacles
    pub const FIRST_OBSTACLE_SEGMENT: u32 = 2;

    /// Obstacles
    pub const OBSTACLE_CHANCE: f32 = 0.5;
    pub const COLLISION_THRESHOLD: f32 = 0.7;
    /// Single cube lateral spawn range (+/-)
    pub const SINGLE_SPAWN_RANGE: f32 = 1.5;
    /// Double cube lateral offset (+/-), gap in the middle
    pub const DOUBLE_OFFSET: f32 = 1.0;
    /// Triple wall slot positions (one is always left open)
    pub const TRIPLE_SLOTS: [f32; 3] = [-1.5, 0.0, 1.5];
    /// Cluster base range and spacing between its two cubes
    pub const CLUSTER_BASE_MIN: f32 = -1.0;
    pub const CLUSTER_BASE_MAX: f32 = 0.5;
    pub const CLUSTER_SPACING: f32 = 0.7;

    /// Background buildings
    pub const INITIAL_BUILDING_ROWS: u32 = 30;
    pub const BUILDINGS_PER_SIDE: u32 = 8;
    pub const BUILDING_SPACING: f32 = 4.5;
    pub const BUILDING_DISTANCE: f32 = 60.0;
    pub const BUILDING_MIN_HEIGHT: f32 = 4.0;
    pub const BUILDING_MAX_HEIGHT: f32 = 18.0;
    pub const BUILDING_JITTER: f32 = 2.0;
    pub const BUILDING_LOOKAHEAD_SEGMENTS: f32 = 5.0;

    /// Camera trails the player by this much; obstacles and buildings retire behind it
    pub const CAMERA_OFFSET: f32 = 15.0;
    pub const OBSTACLE_RETIRE_MARGIN: f32 = 2.0;
    pub const BUILDING_RETIRE_MARGIN: f32 = 10.0;

    /// Player physics
    pub const REST_HEIGHT: f32 = 0.4;
    pub const FALL_ACCELERATION: f32 = 0.025;
    pub const FALL_FLOOR: f32 = -5.0;
    pub const ROLL_RATE: f32 = 1.5;
    pub const FALLING_ROLL_RATE: f32 = 2.0;
    pub const TILT_SENSITIVITY: f32 = 3.0;

    /// Speed progression
    pub const BASE_SPEED: f32 = 0.18;
    pub const SPEED_INCREMENT: f32 = 0.04;
    pub const SPEED_UP_INTERVAL: u64 = 50;
    pub const SLOW_MOTION_INTERVAL: u64 = 100;
    /// Speed-up notice lifetime (1.5 s at the nominal tick rate)
    pub const SPEED_UP_NOTICE_TICKS: u32 = 90;

    /// Power-ups
    pub const SHIELD_MAX_HITS: u32 = 3;
    pub const DOUBLE_POINTS_MULTIPLIER: u64 = 2;
}

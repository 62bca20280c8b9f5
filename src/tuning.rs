//! Data-driven game balance
//!
//! [`RunnerTuning`] mirrors every constant in [`crate::consts`]. Loading a
//! JSON document overrides only the fields it names; everything else keeps
//! the compile-time default.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Shortest segment that still advances at far-track f32 magnitudes
const MIN_SEGMENT_LENGTH: f32 = 0.5;

/// Problems loading or validating a tuning document
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("tuning document is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Runtime-tunable simulation parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerTuning {
    // === Track ===
    pub segment_length: f32,
    pub track_width: f32,
    pub initial_segments: u32,
    pub track_lookahead_segments: f32,
    pub track_retire_segments: f32,

    // === Obstacles ===
    pub obstacle_chance: f32,
    pub collision_threshold: f32,

    // === Buildings ===
    pub initial_building_rows: u32,
    pub buildings_per_side: u32,
    pub building_spacing: f32,
    pub building_distance: f32,
    pub building_min_height: f32,
    pub building_max_height: f32,
    pub building_jitter: f32,
    pub building_lookahead_segments: f32,

    // === Camera / retirement ===
    pub camera_offset: f32,
    pub obstacle_retire_margin: f32,
    pub building_retire_margin: f32,

    // === Player physics ===
    pub rest_height: f32,
    pub fall_acceleration: f32,
    pub fall_floor: f32,
    pub roll_rate: f32,
    pub falling_roll_rate: f32,
    pub tilt_sensitivity: f32,

    // === Speed progression ===
    pub base_speed: f32,
    pub speed_increment: f32,
    pub speed_up_interval: u64,
    pub slow_motion_interval: u64,
    pub speed_up_notice_ticks: u32,

    // === Power-ups ===
    pub shield_max_hits: u32,
    pub double_points_multiplier: u64,
}

impl Default for RunnerTuning {
    fn default() -> Self {
        Self {
            segment_length: SEGMENT_LENGTH,
            track_width: TRACK_WIDTH,
            initial_segments: INITIAL_SEGMENTS,
            track_lookahead_segments: TRACK_LOOKAHEAD_SEGMENTS,
            track_retire_segments: TRACK_RETIRE_SEGMENTS,

            obstacle_chance: OBSTACLE_CHANCE,
            collision_threshold: COLLISION_THRESHOLD,

            initial_building_rows: INITIAL_BUILDING_ROWS,
            buildings_per_side: BUILDINGS_PER_SIDE,
            building_spacing: BUILDING_SPACING,
            building_distance: BUILDING_DISTANCE,
            building_min_height: BUILDING_MIN_HEIGHT,
            building_max_height: BUILDING_MAX_HEIGHT,
            building_jitter: BUILDING_JITTER,
            building_lookahead_segments: BUILDING_LOOKAHEAD_SEGMENTS,

            camera_offset: CAMERA_OFFSET,
            obstacle_retire_margin: OBSTACLE_RETIRE_MARGIN,
            building_retire_margin: BUILDING_RETIRE_MARGIN,

            rest_height: REST_HEIGHT,
            fall_acceleration: FALL_ACCELERATION,
            fall_floor: FALL_FLOOR,
            roll_rate: ROLL_RATE,
            falling_roll_rate: FALLING_ROLL_RATE,
            tilt_sensitivity: TILT_SENSITIVITY,

            base_speed: BASE_SPEED,
            speed_increment: SPEED_INCREMENT,
            speed_up_interval: SPEED_UP_INTERVAL,
            slow_motion_interval: SLOW_MOTION_INTERVAL,
            speed_up_notice_ticks: SPEED_UP_NOTICE_TICKS,

            shield_max_hits: SHIELD_MAX_HITS,
            double_points_multiplier: DOUBLE_POINTS_MULTIPLIER,
        }
    }
}

impl RunnerTuning {
    /// Parse a (possibly partial) JSON document and validate the result
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Serialize to pretty JSON (handy as a template for overrides)
    pub fn to_json(&self) -> Result<String, TuningError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Half of the drivable width
    pub fn half_track_width(&self) -> f32 {
        self.track_width / 2.0
    }

    /// Reject values that would break generation or progression
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        let finite = [
            ("segment_length", self.segment_length),
            ("track_width", self.track_width),
            ("track_lookahead_segments", self.track_lookahead_segments),
            ("track_retire_segments", self.track_retire_segments),
            ("obstacle_chance", self.obstacle_chance),
            ("collision_threshold", self.collision_threshold),
            ("building_spacing", self.building_spacing),
            ("building_distance", self.building_distance),
            ("building_min_height", self.building_min_height),
            ("building_max_height", self.building_max_height),
            ("building_jitter", self.building_jitter),
            ("building_lookahead_segments", self.building_lookahead_segments),
            ("camera_offset", self.camera_offset),
            ("obstacle_retire_margin", self.obstacle_retire_margin),
            ("building_retire_margin", self.building_retire_margin),
            ("rest_height", self.rest_height),
            ("fall_acceleration", self.fall_acceleration),
            ("fall_floor", self.fall_floor),
            ("roll_rate", self.roll_rate),
            ("falling_roll_rate", self.falling_roll_rate),
            ("tilt_sensitivity", self.tilt_sensitivity),
            ("base_speed", self.base_speed),
            ("speed_increment", self.speed_increment),
        ];
        if let Some((field, _)) = finite.iter().find(|(_, v)| !v.is_finite()) {
            return invalid(field, "must be finite");
        }

        if self.segment_length < MIN_SEGMENT_LENGTH {
            return invalid("segment_length", "must be at least 0.5");
        }
        if self.track_width <= 0.0 {
            return invalid("track_width", "must be positive");
        }
        if self.initial_segments == 0 {
            return invalid("initial_segments", "must be at least 1");
        }
        if self.track_lookahead_segments < 0.0 {
            return invalid("track_lookahead_segments", "must not be negative");
        }
        // Anything under half a segment retires the segment the player is on
        if self.track_retire_segments < 0.5 {
            return invalid("track_retire_segments", "must be at least 0.5");
        }
        if !(0.0..=1.0).contains(&self.obstacle_chance) {
            return invalid("obstacle_chance", "must be within [0, 1]");
        }
        if self.collision_threshold <= 0.0 {
            return invalid("collision_threshold", "must be positive");
        }
        if self.building_spacing < 0.0 {
            return invalid("building_spacing", "must not be negative");
        }
        if self.building_min_height > self.building_max_height {
            return invalid("building_min_height", "must not exceed building_max_height");
        }
        if self.building_jitter < 0.0 {
            return invalid("building_jitter", "must not be negative");
        }
        if self.building_lookahead_segments < 0.0 {
            return invalid("building_lookahead_segments", "must not be negative");
        }
        if self.camera_offset < 0.0 {
            return invalid("camera_offset", "must not be negative");
        }
        if self.obstacle_retire_margin < 0.0 {
            return invalid("obstacle_retire_margin", "must not be negative");
        }
        if self.building_retire_margin < 0.0 {
            return invalid("building_retire_margin", "must not be negative");
        }
        if self.fall_acceleration <= 0.0 {
            return invalid("fall_acceleration", "must be positive");
        }
        if self.fall_floor >= self.rest_height {
            return invalid("fall_floor", "must be below rest_height");
        }
        if self.tilt_sensitivity < 0.0 {
            return invalid("tilt_sensitivity", "must not be negative");
        }
        if self.base_speed <= 0.0 {
            return invalid("base_speed", "must be positive");
        }
        if self.speed_increment < 0.0 {
            return invalid("speed_increment", "must not be negative");
        }
        if self.speed_up_interval == 0 {
            return invalid("speed_up_interval", "must be non-zero");
        }
        if self.slow_motion_interval == 0 {
            return invalid("slow_motion_interval", "must be non-zero");
        }
        if self.shield_max_hits == 0 {
            return invalid("shield_max_hits", "must be at least 1");
        }
        if self.double_points_multiplier == 0 {
            return invalid("double_points_multiplier", "must be at least 1");
        }
        Ok(())
    }
}

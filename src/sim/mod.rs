//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod arena;
pub mod collision;
pub mod physics;
pub mod powerup;
pub mod session;
pub mod state;
pub mod tick;
pub mod track;

pub use arena::{Arena, EntityId};
pub use collision::{CollisionReport, apply_speed_progression, resolve_collisions, scaled_score};
pub use physics::{StepOutcome, lateral_from_tilt};
pub use powerup::{CollisionOutcome, PowerUp, PowerUpState};
pub use session::{GameSession, SessionPhase, SessionView};
pub use state::{
    Building, EndCause, GameEvent, GameState, MotionState, Obstacle, PlayerState, Progression,
    TrackSegment,
};
pub use tick::{TickInput, tick};
pub use track::{ObstaclePattern, RetireCounts, SpawnCounts, TrackWorld};

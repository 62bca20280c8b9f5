//! Platform abstraction layer
//!
//! Handles the edges between the simulation and the device:
//! - Tilt sensor samples (latest value wins)
//! - Wall-clock frames to fixed simulation ticks

pub mod clock;
pub mod tilt;

pub use clock::FixedStep;
pub use tilt::TiltFeed;

//! Latest-sample tilt feed
//!
//! The sensor callback publishes at its own rate; the tick loop reads once per
//! tick. Only the newest sample is kept, so samples arriving between two ticks
//! are dropped. One writer and one reader; no locking.

use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

/// Shared cell holding the most recent normalized tilt sample
#[derive(Debug, Clone, Default)]
pub struct TiltFeed {
    bits: Arc<AtomicU32>,
}

impl TiltFeed {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a normalized sample (clamped to `[-1, 1]`). Non-finite samples are ignored.
    pub fn publish(&self, sample: f32) {
        if !sample.is_finite() {
            log::warn!("dropping non-finite tilt sample");
            return;
        }
        self.bits
            .store(sample.clamp(-1.0, 1.0).to_bits(), Ordering::Release);
    }

    /// Store a device roll reading. Roll is inverted so tilting right steers right.
    pub fn publish_device_roll(&self, roll: f64) {
        self.publish(-(roll as f32));
    }

    /// Most recent sample (0.0 until something is published)
    pub fn latest(&self) -> f32 {
        f32::from_bits(self.bits.load(Ordering::Acquire))
    }
}

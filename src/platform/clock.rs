//! Frame time to fixed ticks
//!
//! Frames arrive at whatever rate the host manages; the simulation only ever
//! sees whole fixed ticks. Leftover time carries into the next frame.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Fixed-timestep accumulator
#[derive(Debug, Clone)]
pub struct FixedStep {
    dt: f32,
    max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(dt: f32, max_substeps: u32) -> Self {
        Self {
            dt,
            max_substeps,
            accumulator: 0.0,
        }
    }

    /// Add a frame's elapsed time and return how many ticks to run.
    ///
    /// Long frames are capped at 0.1 s and at `max_substeps` ticks so a stall
    /// never turns into a burst of catch-up ticks.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        self.accumulator += frame_dt.clamp(0.0, 0.1);

        let mut ticks = 0;
        while self.accumulator >= self.dt && ticks < self.max_substeps {
            self.accumulator -= self.dt;
            ticks += 1;
        }
        if ticks == self.max_substeps {
            self.accumulator = self.accumulator.min(self.dt);
        }
        ticks
    }

    /// Forget pending time
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

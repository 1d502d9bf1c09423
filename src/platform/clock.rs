//! Frame-time accumulator
//!
//! Converts variable display frame deltas into a whole number of fixed
//! simulation ticks so motion keeps its ~60 ticks/second feel on 30, 60 or
//! 144 Hz displays. Leftover time under one tick carries over to the next
//! frame; anything beyond the substep cap is dropped so the game slows down
//! rather than fast-forwarding after a stall.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedStep {
    accumulator: f32,
    step: f32,
    max_substeps: u32,
}

impl Default for FixedStep {
    fn default() -> Self {
        Self::new(SIM_DT, MAX_SUBSTEPS)
    }
}

impl FixedStep {
    pub fn new(step: f32, max_substeps: u32) -> Self {
        Self {
            accumulator: 0.0,
            step,
            max_substeps,
        }
    }

    /// Add a frame's elapsed seconds; returns how many ticks to run now
    pub fn accumulate(&mut self, frame_dt: f32) -> u32 {
        // Negative or NaN deltas (clock hiccups) count as zero
        let dt = if frame_dt.is_finite() { frame_dt.clamp(0.0, MAX_FRAME_DT) } else { 0.0 };
        self.accumulator += dt;

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < self.max_substeps {
            self.accumulator -= self.step;
            substeps += 1;
        }
        // Time the substep cap could not run is dropped, not banked
        self.accumulator = self.accumulator.min(self.step);
        substeps
    }

    /// Discard banked time (used when the simulation stops)
    pub fn clear(&mut self) {
        self.accumulator = 0.0;
    }

    /// Fraction of a tick banked, for render interpolation
    pub fn alpha(&self) -> f32 {
        (self.accumulator / self.step).clamp(0.0, 1.0)
    }
}

//! Fixed-timestep accumulator for the host loop

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame time fed into the accumulator (seconds)
pub const MAX_FRAME_DT: f32 = 0.1;

/// Turns variable frame times into a whole number of ticks.
///
/// The backlog is capped at one frame's worth of substeps, so a slow stretch
/// doesn't leave the table fast-forwarding afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedStep {
    accumulator: f32,
}

impl FixedStep {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `dt` seconds and return how many ticks to run this frame
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= SIM_DT && steps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            steps += 1;
        }

        self.accumulator = self.accumulator.min(SIM_DT * MAX_SUBSTEPS as f32);
        steps
    }

    /// Unspent time carried into the next frame
    pub fn backlog(&self) -> f32 {
        self.accumulator
    }
}

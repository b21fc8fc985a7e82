//! Fixed timestep accumulator
//!
//! Hosts render at whatever rate the display gives them. This converts the
//! variable frame delta into a whole number of fixed simulation steps.

use crate::consts::{MAX_FRAME_DT, MAX_SUBSTEPS, SIM_DT};

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    /// Length of one simulation step (seconds)
    pub step: f32,
    /// Upper bound on steps per frame
    pub max_substeps: u32,
    accumulator: f32,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(SIM_DT)
    }
}

impl FixedTimestep {
    pub fn new(step: f32) -> Self {
        Self {
            step,
            max_substeps: MAX_SUBSTEPS,
            accumulator: 0.0,
        }
    }

    /// Feed one frame delta, returns how many fixed steps to run
    ///
    /// Time that would exceed `max_substeps` is dropped rather than carried,
    /// so a long stall never snowballs into ever-longer frames.
    pub fn advance(&mut self, frame_dt: f32) -> u32 {
        if self.step <= 0.0 || !frame_dt.is_finite() {
            return 0;
        }
        self.accumulator += frame_dt.clamp(0.0, MAX_FRAME_DT);

        let mut steps = 0;
        while self.accumulator >= self.step && steps < self.max_substeps {
            self.accumulator -= self.step;
            steps += 1;
        }
        if steps == self.max_substeps && self.accumulator >= self.step {
            log::debug!("Dropping {:.4}s of simulation backlog", self.accumulator);
            self.accumulator = 0.0;
        }
        steps
    }

    /// Fraction of a step left over (for render interpolation)
    pub fn alpha(&self) -> f32 {
        if self.step <= 0.0 {
            0.0
        } else {
            self.accumulator / self.step
        }
    }

    pub fn reset(&mut self) {
        self.accumulator = 0.0;
    }
}

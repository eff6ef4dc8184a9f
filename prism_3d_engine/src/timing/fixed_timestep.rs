//! Fixed-timestep accumulator
//!
//! Wall-clock time is accumulated and consumed in whole steps of `dt`.
//! The remainder gives the interpolation factor between the last two
//! simulation states.

use crate::engine_warn;
use crate::error::{Error, Result};

/// Steps per `advance` when no explicit cap is set
pub const DEFAULT_MAX_STEPS: u32 = 1024;

/// Outcome of one `FixedTimestep::advance`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    /// Discrete steps executed
    pub steps: u32,
    /// `acc / dt` after stepping, in `[0, 1)`
    pub alpha: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FixedTimestep {
    dt: f32,
    acc: f32,
    max_steps: u32,
}

impl FixedTimestep {
    /// `dt` must be finite and strictly positive.
    pub fn new(dt: f32) -> Result<Self> {
        if !(dt.is_finite() && dt > 0.0) {
            return Err(Error::InvalidConfig(format!(
                "fixed timestep must be finite and > 0, got {}",
                dt
            )));
        }
        Ok(Self { dt, acc: 0.0, max_steps: DEFAULT_MAX_STEPS })
    }

    /// Cap the steps run per `advance`. Backlog beyond the cap is dropped.
    pub fn with_max_steps(mut self, max_steps: u32) -> Self {
        self.max_steps = max_steps.max(1);
        self
    }

    pub fn max_steps(&self) -> u32 {
        self.max_steps
    }

    pub fn dt(&self) -> f32 {
        self.dt
    }

    /// Unconsumed time in seconds
    pub fn accumulator(&self) -> f32 {
        self.acc
    }

    /// Interpolation factor in `[0, 1)`
    pub fn alpha(&self) -> f32 {
        // acc < dt can still round to 1.0 after the division
        (self.acc / self.dt).min(1.0 - f32::EPSILON)
    }

    /// Accumulate `delta` and call `step(dt)` once per whole step.
    ///
    /// Negative, NaN and infinite deltas count as zero. At most `max_steps`
    /// steps run per call; the whole-step backlog beyond that is dropped.
    pub fn advance<F>(&mut self, delta: f32, mut step: F) -> StepReport
    where
        F: FnMut(f32),
    {
        if delta.is_infinite() && delta > 0.0 {
            engine_warn!("prism3d::FixedTimestep", "Ignoring infinite frame delta");
        } else if delta > 0.0 {
            self.acc += delta;
        }

        let mut steps = 0;
        while self.acc >= self.dt {
            // also ends the loop once `acc - dt` stops changing acc
            if steps >= self.max_steps {
                let dropped = self.acc - self.acc % self.dt;
                engine_warn!(
                    "prism3d::FixedTimestep",
                    "Step cap of {} reached, dropping {:.4}s of simulation time",
                    steps, dropped
                );
                self.acc %= self.dt;
                break;
            }
            step(self.dt);
            self.acc -= self.dt;
            steps += 1;
        }

        StepReport { steps, alpha: self.alpha() }
    }

    pub fn reset(&mut self) {
        self.acc = 0.0;
    }
}

//! Frame timing, fixed-timestep stepping and state interpolation

mod fixed_timestep;
mod frame_timer;
mod interpolation;

pub use fixed_timestep::{FixedTimestep, StepReport, DEFAULT_MAX_STEPS};
pub use frame_timer::{FrameTimer, DEFAULT_MAX_DELTA};
pub use interpolation::{Interpolated, Lerp};

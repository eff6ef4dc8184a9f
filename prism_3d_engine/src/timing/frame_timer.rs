//! Wall-clock frame timer

use std::time::Instant;

/// Longest frame delta passed on to the simulation, in seconds
pub const DEFAULT_MAX_DELTA: f32 = 0.25;

/// Tracks per-frame delta time.
///
/// Deltas are clamped to `[0, max_delta]` so a stalled frame (debugger,
/// window drag) does not flood the fixed-timestep loop.
#[derive(Debug, Clone)]
pub struct FrameTimer {
    last_frame: Instant,
    max_delta: f32,
    delta: f32,
    elapsed: f64,
    frame_count: u64,
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::with_max_delta(DEFAULT_MAX_DELTA)
    }

    pub fn with_max_delta(max_delta: f32) -> Self {
        Self {
            last_frame: Instant::now(),
            max_delta: max_delta.max(0.0),
            delta: 0.0,
            elapsed: 0.0,
            frame_count: 0,
        }
    }

    /// Measure the time since the previous tick and advance by it.
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let raw = (now - self.last_frame).as_secs_f32();
        self.last_frame = now;
        self.advance(raw)
    }

    /// Advance by an explicit delta (tests, replays). Returns the clamped delta.
    pub fn advance(&mut self, delta: f32) -> f32 {
        // NaN maps to 0
        let delta = if delta > 0.0 { delta.min(self.max_delta) } else { 0.0 };
        self.delta = delta;
        self.elapsed += delta as f64;
        self.frame_count += 1;
        delta
    }

    /// Delta of the last frame in seconds
    pub fn delta(&self) -> f32 {
        self.delta
    }

    /// Sum of clamped deltas in seconds
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    pub fn max_delta(&self) -> f32 {
        self.max_delta
    }
}

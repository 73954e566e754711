//! Frame clock
//!
//! Turns display-refresh timestamps into a dt multiplier where 1.0 is one
//! conceptual 60 Hz frame.

use crate::consts::{MAX_DT, OPTIMAL_FRAME_MS};

/// Converts raw timestamps (milliseconds) into clamped frame multipliers
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    last_time: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self { last_time: None }
    }

    /// Forget the previous timestamp; the next `advance` yields 0
    pub fn reset(&mut self) {
        self.last_time = None;
    }

    /// Seed the previous timestamp (session start)
    pub fn seed(&mut self, now: f64) {
        self.last_time = Some(now);
    }

    /// Compute dt for a frame stamped `now`, clamped to [0, MAX_DT]
    pub fn advance(&mut self, now: f64) -> f32 {
        let last = self.last_time.unwrap_or(now);
        self.last_time = Some(now);

        let dt = ((now - last) / OPTIMAL_FRAME_MS) as f32;
        if dt.is_finite() { dt.clamp(0.0, MAX_DT) } else { 0.0 }
    }
}

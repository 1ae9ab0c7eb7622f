//! Real frame time measurement.
//!
//! One tick per frame; there is no fixed-step accumulator because the clock
//! scales whatever real time passed. A single long frame (debugger pause,
//! window drag) is clamped so the simulation does not leap.

use std::time::Instant;
use tracing::warn;

/// Default clamp for a single frame delta, in seconds.
pub const MAX_FRAME_TIME: f64 = 0.25; // 4 FPS minimum

pub struct FrameTimer {
    previous_time: Instant,
    max_frame_time: f64,
    frame_count: u64,
    total_real_time: f64,
}

impl FrameTimer {
    /// Start measuring from now.
    #[must_use]
    pub fn new(max_frame_time: f64) -> Self {
        Self {
            previous_time: Instant::now(),
            max_frame_time,
            frame_count: 0,
            total_real_time: 0.0,
        }
    }

    /// Measure the time since the previous tick and count a frame.
    pub fn tick(&mut self) -> f64 {
        let now = Instant::now();
        let frame_time = now.duration_since(self.previous_time).as_secs_f64();
        self.previous_time = now;
        self.advance(frame_time)
    }

    /// Count a frame of explicit length. Negative or NaN input counts as
    /// zero; anything over the limit is clamped.
    pub fn advance(&mut self, frame_time: f64) -> f64 {
        let mut frame_time = if frame_time >= 0.0 { frame_time } else { 0.0 };
        if frame_time > self.max_frame_time {
            warn!(
                "Frame time {:.1}ms exceeds maximum, clamping to {:.1}ms",
                frame_time * 1000.0,
                self.max_frame_time * 1000.0
            );
            frame_time = self.max_frame_time;
        }
        self.frame_count += 1;
        self.total_real_time += frame_time;
        frame_time
    }

    #[must_use]
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Sum of every (clamped) frame delta.
    #[must_use]
    pub fn total_real_time(&self) -> f64 {
        self.total_real_time
    }

    #[must_use]
    pub fn max_frame_time(&self) -> f64 {
        self.max_frame_time
    }
}

impl Default for FrameTimer {
    fn default() -> Self {
        Self::new(MAX_FRAME_TIME)
    }
}

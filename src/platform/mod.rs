//! Platform abstraction layer
//!
//! Turns the display's irregular frame callbacks into whole simulation ticks,
//! so play speed is the same on 60 Hz and 144 Hz screens.

use crate::consts::{MAX_SUBSTEPS, SIM_DT};

/// Longest frame delta honored; anything longer (tab switch, debugger) is clamped
pub const MAX_FRAME_DT: f32 = 0.1;

/// Fixed-step accumulator
#[derive(Debug, Clone, Default)]
pub struct FrameClock {
    accumulator: f32,
    last_time_ms: Option<f64>,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a frame timestamp in milliseconds (e.g. from requestAnimationFrame).
    /// Returns how many ticks to run this frame.
    pub fn advance_to(&mut self, now_ms: f64) -> u32 {
        let dt = match self.last_time_ms {
            Some(last) => ((now_ms - last) / 1000.0) as f32,
            None => SIM_DT,
        };
        self.last_time_ms = Some(now_ms);
        self.advance(dt)
    }

    /// Accumulate `dt` seconds and return the number of whole ticks due
    pub fn advance(&mut self, dt: f32) -> u32 {
        self.accumulator += dt.clamp(0.0, MAX_FRAME_DT);

        let mut substeps = 0;
        while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
            self.accumulator -= SIM_DT;
            substeps += 1;
        }
        // Drop any backlog past the cap instead of replaying it next frame
        if substeps == MAX_SUBSTEPS {
            self.accumulator = self.accumulator.min(SIM_DT * 0.5);
        }
        substeps
    }

    /// Forget timing history (after a pause or restart)
    pub fn reset(&mut self) {
        self.accumulator = 0.0;
        self.last_time_ms = None;
    }
}

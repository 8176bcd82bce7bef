//! Frames-per-second estimate, refreshed once per second

use crate::clock::{Timestamp, elapsed_seconds};

#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frames: u32,
    window_start: Option<Timestamp>,
    fps: f64,
}

impl FpsCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a frame at `now`. The first call only latches the window start.
    pub fn record(&mut self, now: Timestamp) {
        let Some(start) = self.window_start else {
            self.window_start = Some(now);
            return;
        };

        self.frames += 1;
        let elapsed = elapsed_seconds(start, now);
        if elapsed > 1.0 {
            self.fps = self.frames as f64 / elapsed;
            self.frames = 0;
            self.window_start = Some(now);
        }
    }

    pub fn fps(&self) -> f64 {
        self.fps
    }

    /// Frames counted in the current window
    pub fn pending_frames(&self) -> u32 {
        self.frames
    }

    /// Overlay text, e.g. "FPS: 60"
    pub fn label(&self) -> String {
        format!("FPS: {}", self.fps.round() as i64)
    }
}

//! Headless driver
//!
//! Runs the host at a fixed display rate against a [`HeadlessSurface`],
//! advancing a [`ManualClock`] by one refresh interval per frame. Scripted
//! input is delivered before the frame it is scheduled for.

use crate::app::Host;
use crate::clock::ManualClock;
use crate::error::Error;
use crate::input::{InputEvent, KeyCode};
use crate::renderer::HeadlessSurface;
use crate::script::Behavior;

/// Input scheduled for a frame index
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScriptedInput {
    pub frame: u64,
    pub event: InputEvent,
}

/// Summary of a headless run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunReport {
    pub frames: u64,
    /// Largest number of draw calls in one frame
    pub peak_draw_calls: usize,
    /// Largest number of quads in one frame
    pub peak_quads: usize,
    pub fps: f64,
    pub quit_early: bool,
}

#[derive(Debug, Clone)]
pub struct HeadlessRunner {
    frames: u64,
    refresh_hz: f64,
    inputs: Vec<ScriptedInput>,
}

impl HeadlessRunner {
    pub fn new(frames: u64, refresh_hz: f64) -> Self {
        Self {
            frames,
            refresh_hz: refresh_hz.max(1.0),
            inputs: Vec::new(),
        }
    }

    pub fn with_inputs(mut self, mut inputs: Vec<ScriptedInput>) -> Self {
        inputs.sort_by_key(|i| i.frame);
        self.inputs = inputs;
        self
    }

    /// Drive `host` for the configured number of frames
    pub fn run<B: Behavior>(
        &self,
        host: &mut Host<B, ManualClock>,
        surface: &mut HeadlessSurface,
    ) -> Result<RunReport, Error> {
        let interval = 1.0 / self.refresh_hz;
        let clock = host.clock().clone();
        let mut report = RunReport::default();
        let mut pending = self.inputs.iter().peekable();

        log::info!(
            "Headless run: {} frames at {} Hz",
            self.frames,
            self.refresh_hz
        );

        for frame in 0..self.frames {
            while let Some(input) = pending.next_if(|i| i.frame <= frame) {
                if host.handle_event(surface, &input.event) {
                    report.quit_early = true;
                }
            }
            if report.quit_early {
                break;
            }

            host.frame(surface)?;
            clock.advance_secs(interval);

            let stats = host.last_stats();
            report.frames += 1;
            report.peak_draw_calls = report
                .peak_draw_calls
                .max(stats.blit_calls + stats.fill_calls);
            report.peak_quads = report.peak_quads.max(stats.quads);
        }

        report.fps = host.fps().fps();
        log::info!(
            "Headless run done: {} frames, peak {} draw calls / {} quads, {:.0} fps",
            report.frames,
            report.peak_draw_calls,
            report.peak_quads,
            report.fps
        );
        Ok(report)
    }
}

/// Tap SPACE every `every` frames and sweep the ship up and down, so a
/// headless run has something to shoot at
pub fn autopilot(frames: u64, every: u64) -> Vec<ScriptedInput> {
    let every = every.max(2);
    let mut inputs = Vec::new();
    for start in (0..frames).step_by(every as usize) {
        inputs.push(ScriptedInput {
            frame: start,
            event: InputEvent::key_down(KeyCode::SPACE),
        });
        inputs.push(ScriptedInput {
            frame: start + 1,
            event: InputEvent::key_up(KeyCode::SPACE),
        });
    }

    let sweep = every * 8;
    for (n, start) in (0..frames).step_by(sweep as usize).enumerate() {
        let key = if n % 2 == 0 { KeyCode::UP } else { KeyCode::DOWN };
        inputs.push(ScriptedInput {
            frame: start,
            event: InputEvent::key_down(key),
        });
        inputs.push(ScriptedInput {
            frame: start + sweep / 2,
            event: InputEvent::key_up(key),
        });
    }
    inputs
}

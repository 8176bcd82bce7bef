//! Fixed-timestep scheduler
//!
//! Runs the simulation at a fixed rate regardless of the display rate and
//! reports how far the render time sits between the last two tick
//! boundaries, so the display can interpolate.
//!
//! ```text
//!   last_game_time ... render_time ... game_time
//! ```

use crate::consts::PHYS_DT;

#[derive(Debug, Clone)]
pub struct FixedTimestep {
    dt: f64,
    /// Start of the tick span the display interpolates over
    last_game_time: f64,
    /// End of the most recently run tick
    game_time: f64,
    /// Most ticks one frame may run before the backlog is dropped
    max_steps: u32,
    total_steps: u64,
}

impl Default for FixedTimestep {
    fn default() -> Self {
        Self::new(PHYS_DT, 240)
    }
}

impl FixedTimestep {
    pub fn new(dt: f64, max_steps: u32) -> Self {
        Self {
            dt,
            last_game_time: 0.0,
            game_time: 0.0,
            max_steps: max_steps.max(1),
            total_steps: 0,
        }
    }

    /// Run every tick due by `render_time` (seconds since start).
    ///
    /// `step` receives `true` only for the first tick of this call; that tick
    /// archives the state the display interpolates from. Returns the
    /// interpolation fraction.
    pub fn advance(&mut self, render_time: f64, mut step: impl FnMut(bool)) -> f32 {
        let mut save = true;
        let mut steps = 0u32;

        while self.game_time <= render_time {
            if steps == self.max_steps {
                let behind = ((render_time - self.game_time) / self.dt).floor() + 1.0;
                log::warn!(
                    "Simulation fell {} ticks behind, skipping backlog",
                    behind as u64
                );
                self.game_time += behind * self.dt;
                break;
            }

            if save {
                self.last_game_time = self.game_time;
            }
            self.game_time += self.dt;
            step(save);
            save = false;
            steps += 1;
        }

        self.total_steps += u64::from(steps);
        self.fraction(render_time)
    }

    /// Where `render_time` sits in [last_game_time, game_time], or 0 when the
    /// span is empty or already behind.
    pub fn fraction(&self, render_time: f64) -> f32 {
        if self.game_time > self.last_game_time && render_time >= self.last_game_time {
            let f = (render_time - self.last_game_time) / (self.game_time - self.last_game_time);
            f.clamp(0.0, 1.0) as f32
        } else {
            0.0
        }
    }

    pub fn game_time(&self) -> f64 {
        self.game_time
    }

    pub fn last_game_time(&self) -> f64 {
        self.last_game_time
    }

    /// Ticks run since creation
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }
}

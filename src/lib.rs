//! Scroller - a side-scrolling arcade shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (entities, collisions, explosions)
//! - `scheduler`: Fixed timestep decoupled from the display rate
//! - `renderer`: Batched quad renderer and display surfaces
//! - `app`: Frame orchestration around a pluggable `Behavior`
//! - `platform`: Headless and windowed drivers

pub mod app;
pub mod assets;
pub mod audio;
pub mod clock;
pub mod error;
pub mod fps;
pub mod game;
pub mod input;
pub mod platform;
pub mod renderer;
pub mod scheduler;
pub mod script;
pub mod settings;
pub mod sim;

pub use app::Host;
pub use error::{AssetError, Error, ScriptError};
pub use game::Scroller;
pub use script::{Behavior, ScriptContext};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Simulation rate (ticks per second)
    pub const PHYS_FPS: f64 = 60.0;
    /// Fixed simulation timestep in seconds
    pub const PHYS_DT: f64 = 1.0 / PHYS_FPS;

    /// Logical play area; everything is laid out in this pixel space
    pub const ASSUMED_W: f32 = 800.0;
    pub const ASSUMED_H: f32 = 600.0;

    /// Ship speed in pixels per tick (tuned for 30 Hz, doubled for 60 Hz)
    pub const SHIP_SPEED: f32 = 5.0 * 2.0;

    /// Enemies enter from the right edge and drift left
    pub const ENEMY_SIZE: f32 = 64.0;
    pub const ENEMY_SPEED: f32 = 2.0 * 2.0;
    /// Ticks between enemy spawns (2 seconds at 60 Hz)
    pub const ENEMY_SPAWN_RATE: u32 = 120;

    pub const BULLET_SIZE: f32 = 5.0;
    pub const BULLET_SPEED: f32 = 8.0 * 2.0;
    pub const BULLET_COLOR: [f32; 4] = [1.0, 1.0, 0.0, 1.0];

    /// Background scroll in pixels per tick
    pub const BACKGROUND_SPEED: f32 = 2.0;

    /// Particles per explosion
    pub const EXPLOSION_PARTICLES: usize = 50;
    pub const PARTICLE_COLOR: [f32; 3] = [1.0, 0.5, 0.0];
}

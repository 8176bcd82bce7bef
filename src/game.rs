//! The scroller itself, as a [`Behavior`]
//!
//! Owns the world, the fixed-timestep scheduler and the held-key table.
//! Each frame it runs the ticks that are due, turns game events into sounds
//! and draws the world at the interpolated position.

use glam::Vec2;

use crate::audio::SoundEffect;
use crate::error::ScriptError;
use crate::input::{InputEvent, InputState, KeyCode};
use crate::renderer::{Sprites, draw_world};
use crate::scheduler::FixedTimestep;
use crate::script::{Behavior, ScriptContext};
use crate::sim::{GameEvent, TickInput, World, tick};

pub const SHIP_IMAGE: &str = "ship.png";
pub const ENEMY_IMAGE: &str = "enemy.png";
pub const BACKGROUND_IMAGE: &str = "background.png";

#[derive(Debug)]
pub struct Scroller {
    seed: u64,
    scheduler: FixedTimestep,
    /// Created by `on_init` once the sprites are loaded
    world: Option<World>,
    sprites: Option<Sprites>,
    keys: InputState,
    /// Fresh SPACE presses not yet turned into bullets
    pending_shots: u32,
    paused: bool,
}

impl Scroller {
    pub fn new(seed: u64, scheduler: FixedTimestep) -> Self {
        Self {
            seed,
            scheduler,
            world: None,
            sprites: None,
            keys: InputState::new(),
            pending_shots: 0,
            paused: false,
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self::new(seed, FixedTimestep::default())
    }

    pub fn world(&self) -> Option<&World> {
        self.world.as_ref()
    }

    pub fn world_mut(&mut self) -> Option<&mut World> {
        self.world.as_mut()
    }

    pub fn sprites(&self) -> Option<Sprites> {
        self.sprites
    }

    pub fn scheduler(&self) -> &FixedTimestep {
        &self.scheduler
    }

    pub fn keys(&self) -> &InputState {
        &self.keys
    }

    pub fn pending_shots(&self) -> u32 {
        self.pending_shots
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        if self.paused {
            self.pending_shots = 0;
        }
        log::info!("{}", if self.paused { "Paused" } else { "Resumed" });
    }
}

impl Behavior for Scroller {
    fn on_init(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
        let sprites = Sprites {
            ship: ctx.load_image(SHIP_IMAGE)?,
            enemy: ctx.load_image(ENEMY_IMAGE)?,
            background: ctx.load_image(BACKGROUND_IMAGE)?,
        };

        let ship_size = Vec2::new(
            ctx.image_width(sprites.ship) as f32,
            ctx.image_height(sprites.ship) as f32,
        );
        let background_width = ctx.image_width(sprites.background) as f32;

        self.world = Some(World::new(self.seed, ship_size, background_width));
        self.sprites = Some(sprites);
        log::info!("Game initialized with seed: {}", self.seed);
        Ok(())
    }

    fn on_frame(
        &mut self,
        ctx: &mut ScriptContext<'_>,
        _width: u32,
        _height: u32,
        elapsed: f64,
    ) -> Result<(), ScriptError> {
        let (Some(world), Some(sprites)) = (self.world.as_mut(), self.sprites) else {
            return Err(ScriptError::msg("frame before on_init"));
        };

        let keys = self.keys;
        let paused = self.paused;
        let pending_shots = &mut self.pending_shots;

        let fraction = self.scheduler.advance(elapsed, |save| {
            if paused {
                world.settle();
                return;
            }
            // Queued shots go out on the first tick of the frame
            let shots = if save { std::mem::take(pending_shots) } else { 0 };
            tick(world, &TickInput::new(keys, shots), save);
        });

        for event in world.drain_events() {
            match event {
                GameEvent::Shot => ctx.play(SoundEffect::Shot),
                GameEvent::Explosion { at } => {
                    log::debug!("Enemy destroyed at ({:.0}, {:.0})", at.x, at.y);
                    ctx.play(SoundEffect::Explosion);
                }
                GameEvent::EnemySpawned { y } => log::trace!("Enemy spawned at y={:.0}", y),
            }
        }

        draw_world(world, &sprites, fraction, ctx);
        Ok(())
    }

    fn on_event(
        &mut self,
        _ctx: &mut ScriptContext<'_>,
        event: &InputEvent,
    ) -> Result<(), ScriptError> {
        match *event {
            InputEvent::KeyDown { key, repeat, .. } => {
                let fresh = self.keys.press(key);
                if key == KeyCode::SPACE && fresh && !repeat && !self.paused {
                    self.pending_shots += 1;
                }
            }
            InputEvent::KeyUp { key, .. } => {
                self.keys.release(key);
                if key == KeyCode::P {
                    self.toggle_pause();
                }
            }
            InputEvent::QuitRequested => {}
        }
        Ok(())
    }
}

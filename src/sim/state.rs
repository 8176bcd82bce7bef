//! World state: every entity, counter and RNG the simulation touches
//!
//! One explicit context object, created at startup and passed to `tick`.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::entity::Actor;
use super::particle::Explosion;
use crate::consts::*;

/// Something the presentation layer may want to react to (sound, logs)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GameEvent {
    /// A bullet left the ship
    Shot,
    /// An enemy was destroyed at this point
    Explosion { at: Vec2 },
    /// A new enemy entered at the right edge
    EnemySpawned { y: f32 },
}

/// Horizontally wrapping background strip
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    pub x: f32,
    pub old_x: f32,
    /// Width of one background tile; the strip wraps after this many pixels
    pub width: f32,
}

impl Background {
    pub fn new(width: f32) -> Self {
        Self {
            x: 0.0,
            old_x: 0.0,
            width,
        }
    }

    pub fn scroll(&mut self, save: bool) {
        if save {
            self.old_x = self.x;
        }
        self.x -= BACKGROUND_SPEED;
        if self.x <= -self.width {
            self.x += self.width;
            self.old_x += self.width;
        }
    }

    #[inline]
    pub fn interpolated(&self, fraction: f32) -> f32 {
        self.old_x + (self.x - self.old_x) * fraction
    }
}

/// Complete simulation state (deterministic for a given seed and input trace)
#[derive(Debug, Clone)]
pub struct World {
    /// Run seed for reproducibility
    pub seed: u64,
    pub rng: Pcg32,
    pub ship: Actor,
    /// Live bullets in firing order
    pub bullets: Vec<Actor>,
    /// Live enemies in spawn order
    pub enemies: Vec<Actor>,
    pub explosions: Vec<Explosion>,
    pub background: Background,
    /// Ticks since the last enemy spawn
    pub spawn_counter: u32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Events emitted since the last `drain_events`
    events: Vec<GameEvent>,
}

impl World {
    /// Ship starts centered; sizes come from the loaded sprites
    pub fn new(seed: u64, ship_size: Vec2, background_width: f32) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
            ship: Actor::ship(Vec2::new(ASSUMED_W / 2.0, ASSUMED_H / 2.0), ship_size),
            bullets: Vec::new(),
            enemies: Vec::new(),
            explosions: Vec::new(),
            background: Background::new(background_width),
            spawn_counter: 0,
            time_ticks: 0,
            events: Vec::new(),
        }
    }

    pub fn spawn_bullet(&mut self) {
        let bullet = Actor::bullet(self.ship.muzzle());
        self.bullets.push(bullet);
        self.events.push(GameEvent::Shot);
    }

    pub fn spawn_enemy(&mut self, y: f32) {
        self.enemies.push(Actor::enemy(Vec2::new(ASSUMED_W, y)));
        self.events.push(GameEvent::EnemySpawned { y });
    }

    pub fn spawn_explosion(&mut self, at: Vec2) {
        let explosion = Explosion::new(at, &mut self.rng);
        self.explosions.push(explosion);
        self.events.push(GameEvent::Explosion { at });
    }

    /// Freeze interpolation: every old position becomes the current one
    pub fn settle(&mut self) {
        self.background.old_x = self.background.x;
        self.ship.settle();
        for actor in self.bullets.iter_mut().chain(self.enemies.iter_mut()) {
            actor.settle();
        }
        for explosion in &mut self.explosions {
            explosion.settle();
        }
    }

    pub fn particle_count(&self) -> usize {
        self.explosions.iter().map(|e| e.particles.len()).sum()
    }

    pub fn drain_events(&mut self) -> std::vec::Drain<'_, GameEvent> {
        self.events.drain(..)
    }
}

//! Fixed timestep simulation tick
//!
//! Core game step that advances the world deterministically by 1/60 s.

use glam::Vec2;
use rand::Rng;

use super::collision::overlaps;
use super::state::World;
use crate::consts::*;
use crate::input::{InputState, KeyCode};

/// Input for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Held keys
    pub keys: InputState,
    /// Shots queued since the previous tick
    pub shots: u32,
}

impl TickInput {
    pub fn new(keys: InputState, shots: u32) -> Self {
        Self { keys, shots }
    }
}

/// Ship velocity from held direction keys (eight-way)
pub fn ship_velocity(keys: &InputState) -> Vec2 {
    let held = |a: KeyCode, b: KeyCode| keys.is_down(a) || keys.is_down(b);

    let x = if held(KeyCode::LEFT, KeyCode::A) {
        -SHIP_SPEED
    } else if held(KeyCode::RIGHT, KeyCode::D) {
        SHIP_SPEED
    } else {
        0.0
    };
    let y = if held(KeyCode::UP, KeyCode::W) {
        -SHIP_SPEED
    } else if held(KeyCode::DOWN, KeyCode::S) {
        SHIP_SPEED
    } else {
        0.0
    };
    Vec2::new(x, y)
}

/// Advance the world by one fixed timestep.
///
/// `save` is true for the first tick run in a rendered frame; that tick
/// archives the positions the display interpolates from.
pub fn tick(world: &mut World, input: &TickInput, save: bool) {
    world.time_ticks += 1;

    world.background.scroll(save);

    world.ship.vel = ship_velocity(&input.keys);
    world.ship.integrate(save);

    // Bullets: integrate, drop the ones past the right edge
    world.bullets.retain_mut(|bullet| {
        bullet.integrate(save);
        bullet.pos.x <= ASSUMED_W
    });

    // Newly fired bullets appear at the muzzle after the ship has moved
    for _ in 0..input.shots {
        world.spawn_bullet();
    }

    world.spawn_counter += 1;
    if world.spawn_counter >= ENEMY_SPAWN_RATE {
        let y = world.rng.random_range(0.0..ASSUMED_H - ENEMY_SIZE);
        world.spawn_enemy(y);
        world.spawn_counter = 0;
    }

    update_enemies(world, save);

    for explosion in &mut world.explosions {
        explosion.update(save);
    }
    world.explosions.retain(|e| e.is_alive());
}

/// Move enemies and resolve combat against the ship and bullets.
///
/// An enemy touching the ship explodes (the ship is unharmed). Otherwise every
/// bullet overlapping it is consumed, and a single explosion marks the kill.
fn update_enemies(world: &mut World, save: bool) {
    let enemies = std::mem::take(&mut world.enemies);
    let mut survivors = Vec::with_capacity(enemies.len());

    for mut enemy in enemies {
        enemy.integrate(save);

        if enemy.pos.x < -enemy.size.x {
            continue;
        }

        let target = enemy.rect();
        let destroyed = if overlaps(&world.ship.rect(), &target) {
            true
        } else {
            let before = world.bullets.len();
            world.bullets.retain(|b| !overlaps(&b.rect(), &target));
            world.bullets.len() != before
        };

        if destroyed {
            world.spawn_explosion(enemy.center());
        } else {
            survivors.push(enemy);
        }
    }

    // Nothing spawns enemies during the loop, but keep any that did
    survivors.append(&mut world.enemies);
    world.enemies = survivors;
}

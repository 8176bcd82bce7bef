//! Per-kind draw dispatch for the world
//!
//! Everything is drawn at its interpolated position. Order: background
//! (twice, for the wrap), ship, bullets, enemies, explosion particles.

use crate::consts::{ASSUMED_H, BULLET_COLOR, PARTICLE_COLOR};
use crate::sim::{Actor, World};

/// Where the scene goes: anything that can blit loaded images and fill
/// rectangles in logical pixels
pub trait Canvas {
    fn blit(&mut self, image: usize, x: f32, y: f32, w: f32, h: f32);
    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]);
}

/// Image handles of the game's sprites
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sprites {
    pub ship: usize,
    pub enemy: usize,
    pub background: usize,
}

pub fn draw_world(world: &World, sprites: &Sprites, fraction: f32, canvas: &mut dyn Canvas) {
    let bg = &world.background;
    let bg_x = bg.interpolated(fraction);
    canvas.blit(sprites.background, bg_x, 0.0, bg.width, ASSUMED_H);
    canvas.blit(sprites.background, bg_x + bg.width, 0.0, bg.width, ASSUMED_H);

    draw_actor(canvas, sprites.ship, &world.ship, fraction);

    for bullet in &world.bullets {
        let p = bullet.interpolated(fraction);
        canvas.fill(p.x, p.y, bullet.size.x, bullet.size.y, BULLET_COLOR);
    }

    for enemy in &world.enemies {
        draw_actor(canvas, sprites.enemy, enemy, fraction);
    }

    let [r, g, b] = PARTICLE_COLOR;
    for particle in world.explosions.iter().flat_map(|e| &e.particles) {
        let size = particle.actor.size;
        // Centered on the particle position
        let p = particle.actor.interpolated(fraction) - size / 2.0;
        canvas.fill(p.x, p.y, size.x, size.y, [r, g, b, particle.alpha]);
    }
}

fn draw_actor(canvas: &mut dyn Canvas, image: usize, actor: &Actor, fraction: f32) {
    let p = actor.interpolated(fraction);
    canvas.blit(image, p.x, p.y, actor.size.x, actor.size.y);
}

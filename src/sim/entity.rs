//! Movable rectangles: ship, enemies, bullets and particles

use glam::Vec2;

use super::collision::Rect;
use crate::consts::*;

/// Closed set of entity variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Ship,
    Enemy,
    Bullet,
    Particle,
}

/// A moving rectangle with the position it had at the start of the last
/// archived tick, for interpolated display.
#[derive(Debug, Clone, PartialEq)]
pub struct Actor {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub old_pos: Vec2,
    pub size: Vec2,
    pub vel: Vec2,
}

impl Actor {
    pub fn new(kind: EntityKind, pos: Vec2, size: Vec2, vel: Vec2) -> Self {
        Self {
            kind,
            pos,
            old_pos: pos,
            size,
            vel,
        }
    }

    /// Player ship, sized after its sprite
    pub fn ship(pos: Vec2, size: Vec2) -> Self {
        Self::new(EntityKind::Ship, pos, size, Vec2::ZERO)
    }

    pub fn enemy(pos: Vec2) -> Self {
        Self::new(
            EntityKind::Enemy,
            pos,
            Vec2::splat(ENEMY_SIZE),
            Vec2::new(-ENEMY_SPEED, 0.0),
        )
    }

    pub fn bullet(pos: Vec2) -> Self {
        Self::new(
            EntityKind::Bullet,
            pos,
            Vec2::splat(BULLET_SIZE),
            Vec2::new(BULLET_SPEED, 0.0),
        )
    }

    /// Advance one tick. With `save`, the pre-move position becomes `old_pos`.
    #[inline]
    pub fn integrate(&mut self, save: bool) {
        if save {
            self.old_pos = self.pos;
        }
        self.pos += self.vel;
    }

    /// Make the display position stop moving (old = current)
    #[inline]
    pub fn settle(&mut self) {
        self.old_pos = self.pos;
    }

    /// Display position: `old + (current - old) * fraction`
    #[inline]
    pub fn interpolated(&self, fraction: f32) -> Vec2 {
        self.old_pos.lerp(self.pos, fraction)
    }

    #[inline]
    pub fn rect(&self) -> Rect {
        Rect::from_pos_size(self.pos, self.size)
    }

    #[inline]
    pub fn center(&self) -> Vec2 {
        self.pos + self.size / 2.0
    }

    /// Where a fired bullet appears: right edge, vertically centered
    pub fn muzzle(&self) -> Vec2 {
        Vec2::new(
            self.pos.x + self.size.x,
            self.pos.y + self.size.y / 2.0 - BULLET_SIZE / 2.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integrate_archives_on_save() {
        let mut bullet = Actor::bullet(Vec2::new(10.0, 20.0));
        bullet.integrate(true);
        assert_eq!(bullet.old_pos, Vec2::new(10.0, 20.0));
        assert_eq!(bullet.pos, Vec2::new(26.0, 20.0));

        // Second tick in the same frame keeps the frame's start position
        bullet.integrate(false);
        assert_eq!(bullet.old_pos, Vec2::new(10.0, 20.0));
        assert_eq!(bullet.pos, Vec2::new(42.0, 20.0));
    }

    #[test]
    fn test_zero_velocity_is_stationary() {
        let mut ship = Actor::ship(Vec2::new(400.0, 300.0), Vec2::new(48.0, 32.0));
        for i in 0..10 {
            ship.integrate(i % 3 == 0);
        }
        assert_eq!(ship.pos, Vec2::new(400.0, 300.0));
        assert_eq!(ship.old_pos, ship.pos);
    }

    #[test]
    fn test_interpolated() {
        let mut enemy = Actor::enemy(Vec2::new(800.0, 100.0));
        enemy.integrate(true);
        assert_eq!(enemy.interpolated(0.0), Vec2::new(800.0, 100.0));
        assert_eq!(enemy.interpolated(1.0), Vec2::new(796.0, 100.0));
        assert_eq!(enemy.interpolated(0.5), Vec2::new(798.0, 100.0));
    }

    #[test]
    fn test_muzzle() {
        let ship = Actor::ship(Vec2::new(400.0, 300.0), Vec2::new(48.0, 32.0));
        assert_eq!(ship.muzzle(), Vec2::new(448.0, 313.5));
    }
}

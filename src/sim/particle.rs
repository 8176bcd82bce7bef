//! Explosion particles

use glam::Vec2;
use rand::Rng;

use super::entity::{Actor, EntityKind};
use crate::consts::EXPLOSION_PARTICLES;

/// A short-lived square spark that fades out over `max_life` ticks
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub actor: Actor,
    /// Ticks lived so far
    pub life: f32,
    /// Lifetime in ticks, randomized in [25, 40)
    pub max_life: f32,
    /// 1 at birth, 0 at death
    pub alpha: f32,
}

impl Particle {
    pub fn spawn(origin: Vec2, rng: &mut impl Rng) -> Self {
        let vel = Vec2::new(
            (rng.random_range(0.0f32..4.0) - 2.0) * 2.0,
            (rng.random_range(0.0f32..4.0) - 2.0) * 2.0,
        );
        let max_life = (rng.random_range(0.0f32..30.0) + 50.0) / 2.0;
        let side = rng.random_range(0.0f32..2.0) + 1.0;

        Self {
            actor: Actor::new(EntityKind::Particle, origin, Vec2::splat(side), vel),
            life: 0.0,
            max_life,
            alpha: 1.0,
        }
    }

    pub fn update(&mut self, save: bool) {
        self.actor.integrate(save);
        self.life += 1.0;
        self.alpha = 1.0 - self.life / self.max_life;
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.life < self.max_life
    }
}

/// A burst of particles; owns them exclusively
#[derive(Debug, Clone, PartialEq)]
pub struct Explosion {
    pub origin: Vec2,
    pub particles: Vec<Particle>,
}

impl Explosion {
    pub fn new(origin: Vec2, rng: &mut impl Rng) -> Self {
        let particles = (0..EXPLOSION_PARTICLES)
            .map(|_| Particle::spawn(origin, rng))
            .collect();
        Self { origin, particles }
    }

    /// Advance every particle and drop the expired ones (order preserved)
    pub fn update(&mut self, save: bool) {
        self.particles.retain_mut(|p| {
            p.update(save);
            p.is_alive()
        });
    }

    pub fn settle(&mut self) {
        for p in &mut self.particles {
            p.actor.settle();
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.particles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_particle_ranges() {
        let mut rng = Pcg32::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::spawn(Vec2::ZERO, &mut rng);
            assert!((25.0..40.0).contains(&p.max_life));
            assert!((1.0..3.0).contains(&p.actor.size.x));
            assert_eq!(p.actor.size.x, p.actor.size.y);
            assert!(p.actor.vel.x >= -4.0 && p.actor.vel.x < 4.0);
            assert!(p.actor.vel.y >= -4.0 && p.actor.vel.y < 4.0);
            assert_eq!(p.alpha, 1.0);
        }
    }

    #[test]
    fn test_alpha_fades() {
        let mut rng = Pcg32::seed_from_u64(1);
        let mut p = Particle::spawn(Vec2::ZERO, &mut rng);
        p.max_life = 30.0;
        for _ in 0..15 {
            p.update(true);
        }
        assert!((p.alpha - 0.5).abs() < 1e-6);
        for _ in 0..15 {
            p.update(true);
        }
        assert!(!p.is_alive());
    }

    #[test]
    fn test_explosion_burns_out() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut explosion = Explosion::new(Vec2::new(100.0, 100.0), &mut rng);
        assert_eq!(explosion.particles.len(), EXPLOSION_PARTICLES);

        let slowest = explosion
            .particles
            .iter()
            .map(|p| p.max_life)
            .fold(0.0f32, f32::max);

        let mut last = explosion.particles.len();
        let mut ticks = 0;
        while explosion.is_alive() {
            explosion.update(true);
            ticks += 1;
            assert!(explosion.particles.len() <= last);
            last = explosion.particles.len();
        }
        assert_eq!(ticks, slowest.ceil() as usize);
    }
}

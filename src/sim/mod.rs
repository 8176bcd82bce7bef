//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only (one call to `tick` = one 1/60 s step)
//! - Seeded RNG only
//! - Stable iteration order (survivors keep their relative order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod entity;
pub mod particle;
pub mod state;
pub mod tick;

pub use collision::{Rect, overlaps};
pub use entity::{Actor, EntityKind};
pub use particle::{Explosion, Particle};
pub use state::{Background, GameEvent, World};
pub use tick::{TickInput, tick};

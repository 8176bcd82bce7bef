//! Logical pixel space to normalized device coordinates
//!
//! Callers lay everything out in an 800x600 space with y pointing down. The
//! GPU wants [-1, 1] with y pointing up.

use glam::{Mat4, Vec2, Vec4};

use crate::consts::{ASSUMED_H, ASSUMED_W};

/// Column-major transform: scale by (2/W, -2/H), then translate by (-1, 1)
#[rustfmt::skip]
pub const TRANSFORM: [f32; 16] = [
    2.0 / ASSUMED_W, 0.0, 0.0, 0.0,
    0.0, -2.0 / ASSUMED_H, 0.0, 0.0,
    0.0, 0.0, 1.0, 0.0,
    -1.0, 1.0, 0.0, 1.0,
];

pub fn transform_matrix() -> Mat4 {
    Mat4::from_cols_array(&TRANSFORM)
}

/// Map a logical pixel position to NDC
pub fn to_ndc(p: Vec2) -> Vec2 {
    let v = transform_matrix() * Vec4::new(p.x, p.y, 0.0, 1.0);
    Vec2::new(v.x, v.y)
}

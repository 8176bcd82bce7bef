//! Quad generation for 2D primitives
//!
//! A quad is two triangles sharing the (x+w, y) / (x, y+h) diagonal:
//!
//! ```text
//!    2  |  0
//! ------+------
//!    3  |  1
//! ```

use super::vertex::{BlitVertex, FillVertex};

/// Vertices per quad
pub const QUAD_VERTICES: usize = 6;

/// Append a textured quad covering the whole texture
pub fn push_textured_quad(out: &mut Vec<BlitVertex>, x: f32, y: f32, w: f32, h: f32) {
    out.extend_from_slice(&[
        BlitVertex::new(x + w, y + h, 1.0, 1.0),
        BlitVertex::new(x + w, y, 1.0, 0.0),
        BlitVertex::new(x, y + h, 0.0, 1.0),
        BlitVertex::new(x + w, y, 1.0, 0.0),
        BlitVertex::new(x, y + h, 0.0, 1.0),
        BlitVertex::new(x, y, 0.0, 0.0),
    ]);
}

/// Append a flat-colored quad
pub fn push_colored_quad(out: &mut Vec<FillVertex>, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
    out.extend_from_slice(&[
        FillVertex::new(x + w, y + h, color),
        FillVertex::new(x + w, y, color),
        FillVertex::new(x, y + h, color),
        FillVertex::new(x + w, y, color),
        FillVertex::new(x, y + h, color),
        FillVertex::new(x, y, color),
    ]);
}

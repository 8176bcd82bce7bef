//! Per-frame quad batching
//!
//! Every textured quad goes into the bucket of its image; buckets are kept in
//! the order their image was first drawn (for the whole session, not per
//! frame), so layering follows first appearance rather than draw order.
//! Flat-colored quads share one list drawn after all images.

use std::collections::HashMap;

use super::shapes::{QUAD_VERTICES, push_colored_quad, push_textured_quad};
use super::surface::{DisplaySurface, ImageId};
use super::vertex::{BlitVertex, FillVertex};

#[derive(Debug, Default)]
pub struct Batcher {
    /// Image id -> position in `buckets`
    index: HashMap<ImageId, usize>,
    buckets: Vec<(ImageId, Vec<BlitVertex>)>,
    fill: Vec<FillVertex>,
}

/// What `submit` issued
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmitStats {
    pub blit_calls: usize,
    pub fill_calls: usize,
    pub quads: usize,
}

impl Batcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty every list, keeping the allocations for the next frame
    pub fn reset(&mut self) {
        for (_, verts) in &mut self.buckets {
            verts.clear();
        }
        self.fill.clear();
    }

    /// Queue a textured quad at the given logical pixel rectangle
    pub fn blit_px(&mut self, image: ImageId, x: f32, y: f32, w: f32, h: f32) {
        let slot = match self.index.get(&image) {
            Some(&slot) => slot,
            None => {
                self.buckets.push((image, Vec::new()));
                let slot = self.buckets.len() - 1;
                self.index.insert(image, slot);
                slot
            }
        };
        push_textured_quad(&mut self.buckets[slot].1, x, y, w, h);
    }

    /// Queue a flat-colored quad
    pub fn fill_px(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        push_colored_quad(&mut self.fill, x, y, w, h, color);
    }

    /// Forget an image's bucket (after the image itself is released)
    pub fn forget(&mut self, image: ImageId) {
        if let Some(slot) = self.index.remove(&image) {
            self.buckets.remove(slot);
            for s in self.index.values_mut() {
                if *s > slot {
                    *s -= 1;
                }
            }
        }
    }

    /// Issue one draw call per non-empty image bucket, then one for fills
    pub fn submit(&self, surface: &mut dyn DisplaySurface) -> SubmitStats {
        let mut stats = SubmitStats::default();

        for (image, verts) in &self.buckets {
            if verts.is_empty() {
                continue;
            }
            surface.draw_blit(*image, verts);
            stats.blit_calls += 1;
            stats.quads += verts.len() / QUAD_VERTICES;
        }

        if !self.fill.is_empty() {
            surface.draw_fill(&self.fill);
            stats.fill_calls += 1;
            stats.quads += self.fill.len() / QUAD_VERTICES;
        }

        stats
    }

    pub fn blit_vertices(&self, image: ImageId) -> &[BlitVertex] {
        self.index
            .get(&image)
            .map(|&slot| self.buckets[slot].1.as_slice())
            .unwrap_or(&[])
    }

    pub fn fill_vertices(&self) -> &[FillVertex] {
        &self.fill
    }

    pub fn is_empty(&self) -> bool {
        self.fill.is_empty() && self.buckets.iter().all(|(_, v)| v.is_empty())
    }
}

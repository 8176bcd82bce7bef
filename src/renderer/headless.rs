//! Display surface that records what it was asked to draw

use std::collections::BTreeMap;

use super::surface::{DisplaySurface, ImageId, TextOverlay};
use super::vertex::{BlitVertex, FillVertex};
use crate::error::Error;

/// One recorded draw call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DrawCall {
    Blit { image: ImageId, vertices: usize },
    Fill { vertices: usize },
}

#[derive(Debug, Default)]
pub struct HeadlessSurface {
    size: (u32, u32),
    next_id: u32,
    /// Live images and their dimensions
    images: BTreeMap<ImageId, (u32, u32)>,
    destroyed: Vec<ImageId>,
    clear: [f32; 4],
    calls: Vec<DrawCall>,
    last_blit: Vec<BlitVertex>,
    last_fill: Vec<FillVertex>,
    text: Option<String>,
    frames: u64,
}

impl HeadlessSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            size: (width, height),
            next_id: 1,
            ..Default::default()
        }
    }

    /// Draw calls since the last `begin_frame`
    pub fn draw_calls(&self) -> &[DrawCall] {
        &self.calls
    }

    /// Vertices of the most recent fill call
    pub fn last_fill(&self) -> &[FillVertex] {
        &self.last_fill
    }

    /// Vertices of the most recent blit call
    pub fn last_blit(&self) -> &[BlitVertex] {
        &self.last_blit
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear
    }

    pub fn overlay_text(&self) -> Option<&str> {
        self.text.as_deref()
    }

    pub fn frames_presented(&self) -> u64 {
        self.frames
    }

    pub fn live_images(&self) -> usize {
        self.images.len()
    }

    pub fn destroyed_images(&self) -> &[ImageId] {
        &self.destroyed
    }
}

impl DisplaySurface for HeadlessSurface {
    fn create_image(&mut self, width: u32, height: u32, rgba: &[u8]) -> ImageId {
        debug_assert_eq!(rgba.len(), (width * height * 4) as usize);
        let id = ImageId(self.next_id);
        self.next_id += 1;
        self.images.insert(id, (width, height));
        id
    }

    fn destroy_image(&mut self, id: ImageId) {
        if self.images.remove(&id).is_none() {
            log::error!("Image {:?} destroyed twice", id);
        }
        self.destroyed.push(id);
    }

    fn size(&self) -> (u32, u32) {
        self.size
    }

    fn begin_frame(&mut self, clear: [f32; 4]) {
        self.clear = clear;
        self.calls.clear();
        self.text = None;
    }

    fn draw_blit(&mut self, image: ImageId, vertices: &[BlitVertex]) {
        self.calls.push(DrawCall::Blit {
            image,
            vertices: vertices.len(),
        });
        self.last_blit.clear();
        self.last_blit.extend_from_slice(vertices);
    }

    fn draw_fill(&mut self, vertices: &[FillVertex]) {
        self.calls.push(DrawCall::Fill {
            vertices: vertices.len(),
        });
        self.last_fill.clear();
        self.last_fill.extend_from_slice(vertices);
    }

    fn present(&mut self) -> Result<(), Error> {
        self.frames += 1;
        Ok(())
    }
}

impl TextOverlay for HeadlessSurface {
    fn draw_text(&mut self, _canvas: (f32, f32), text: &str) {
        self.text = Some(text.to_owned());
    }
}

//! Presentation contracts the renderer draws through
//!
//! Implemented by the wgpu backend (`pipeline`) and by the recording
//! `HeadlessSurface`.

use super::vertex::{BlitVertex, FillVertex};
use crate::error::Error;

/// Backend-assigned identity of an uploaded image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ImageId(pub u32);

pub trait DisplaySurface {
    /// Upload a tightly packed RGBA8 bitmap
    fn create_image(&mut self, width: u32, height: u32, rgba: &[u8]) -> ImageId;

    /// Release an uploaded image. Called exactly once per image.
    fn destroy_image(&mut self, id: ImageId);

    /// Drawable size in physical pixels
    fn size(&self) -> (u32, u32);

    /// Start a frame cleared to `clear`
    fn begin_frame(&mut self, clear: [f32; 4]);

    /// One textured draw call
    fn draw_blit(&mut self, image: ImageId, vertices: &[BlitVertex]);

    /// One flat-color draw call
    fn draw_fill(&mut self, vertices: &[FillVertex]);

    /// Finish and show the frame
    fn present(&mut self) -> Result<(), Error>;
}

/// Debug text drawn over the frame
pub trait TextOverlay {
    fn draw_text(&mut self, canvas: (f32, f32), text: &str);
}

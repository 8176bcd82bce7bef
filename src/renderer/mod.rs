//! 2D rendering
//!
//! Everything is laid out in an 800x600 logical pixel space and drawn through
//! a [`DisplaySurface`]: the wgpu backend when the `gpu` feature is on, or the
//! recording [`HeadlessSurface`].

pub mod batch;
pub mod headless;
#[cfg(feature = "gpu")]
pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod surface;
pub mod transform;
pub mod vertex;

pub use batch::{Batcher, SubmitStats};
pub use headless::{DrawCall, HeadlessSurface};
#[cfg(feature = "gpu")]
pub use pipeline::GpuSurface;
pub use scene::{Canvas, Sprites, draw_world};
pub use surface::{DisplaySurface, ImageId, TextOverlay};
pub use vertex::{BlitVertex, FillVertex};

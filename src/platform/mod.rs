//! Drivers that own the loop
//!
//! - `headless`: fixed refresh rate against a recording surface and a
//!   manual clock
//! - `desktop`: winit window and wgpu surface (feature `gpu`)

#[cfg(feature = "gpu")]
pub mod desktop;
pub mod headless;

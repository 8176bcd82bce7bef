//! Pluggable game logic
//!
//! A [`Behavior`] is driven by the host through three callbacks and talks
//! back through a [`ScriptContext`]: load images, queue quads, set the clear
//! color, play sounds. The native game is one such behavior; anything else
//! that wants the same frame loop implements the trait too.

use crate::assets::{ImageLoader, ImageStore};
use crate::audio::{Audio, SoundEffect};
use crate::error::{AssetError, ScriptError};
use crate::input::InputEvent;
use crate::renderer::{Batcher, Canvas, DisplaySurface};

pub trait Behavior {
    /// Called once before the first frame. An error here aborts startup.
    fn on_init(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError>;

    /// Called every display frame with the drawable size and the seconds
    /// since the first frame. Errors are logged; the frame is still shown.
    fn on_frame(
        &mut self,
        ctx: &mut ScriptContext<'_>,
        width: u32,
        height: u32,
        elapsed: f64,
    ) -> Result<(), ScriptError>;

    /// Called for each input event the host does not consume itself
    fn on_event(
        &mut self,
        _ctx: &mut ScriptContext<'_>,
        _event: &InputEvent,
    ) -> Result<(), ScriptError> {
        Ok(())
    }
}

/// Host services available inside a callback
pub struct ScriptContext<'a> {
    pub(crate) surface: &'a mut dyn DisplaySurface,
    pub(crate) images: &'a mut ImageStore,
    pub(crate) loader: &'a dyn ImageLoader,
    pub(crate) batcher: &'a mut Batcher,
    pub(crate) audio: &'a mut Audio,
    pub(crate) clear_color: &'a mut [f32; 4],
}

impl ScriptContext<'_> {
    /// Load an image by name; returns its index
    pub fn load_image(&mut self, name: &str) -> Result<usize, AssetError> {
        self.images.load(&mut *self.surface, self.loader, name)
    }

    pub fn image_width(&self, index: usize) -> u32 {
        self.images.width(index)
    }

    pub fn image_height(&self, index: usize) -> u32 {
        self.images.height(index)
    }

    /// Queue image `index` stretched over a logical pixel rectangle.
    /// An invalid index is logged and ignored.
    pub fn draw_blit_px(&mut self, index: usize, x: f32, y: f32, w: f32, h: f32) {
        if let Some(image) = self.images.checked(index) {
            self.batcher.blit_px(image.id, x, y, w, h);
        }
    }

    #[allow(clippy::too_many_arguments)]
    pub fn draw_fill_px(&mut self, x: f32, y: f32, w: f32, h: f32, r: f32, g: f32, b: f32, a: f32) {
        self.batcher.fill_px(x, y, w, h, [r, g, b, a]);
    }

    pub fn clear_color(&self) -> [f32; 4] {
        *self.clear_color
    }

    pub fn set_clear_color(&mut self, color: [f32; 4]) {
        *self.clear_color = color;
    }

    pub fn play(&mut self, effect: SoundEffect) {
        self.audio.play(effect);
    }
}

impl Canvas for ScriptContext<'_> {
    fn blit(&mut self, image: usize, x: f32, y: f32, w: f32, h: f32) {
        self.draw_blit_px(image, x, y, w, h);
    }

    fn fill(&mut self, x: f32, y: f32, w: f32, h: f32, color: [f32; 4]) {
        let [r, g, b, a] = color;
        self.draw_fill_px(x, y, w, h, r, g, b, a);
    }
}

//! Frame orchestration
//!
//! [`Host`] owns everything a [`Behavior`] needs across frames and runs one
//! display frame at a time:
//!
//! 1. read the clock and update the FPS estimate
//! 2. clear the batch lists and let the behavior queue its quads
//! 3. start the pass, submit the batches, draw the FPS overlay, present
//!
//! Input is filtered through the quit chord first, and F1 toggles the FPS
//! overlay. Errors from `on_frame` and `on_event` are logged and the loop
//! carries on; an `on_init` error is fatal.

use crate::assets::{AssetLoader, ImageLoader, ImageStore};
use crate::audio::Audio;
use crate::clock::{Clock, Timestamp, elapsed_seconds};
use crate::error::Error;
use crate::fps::FpsCounter;
use crate::input::{InputEvent, KeyCode};
use crate::renderer::vertex::colors;
use crate::renderer::{Batcher, DisplaySurface, SubmitStats, TextOverlay};
use crate::script::{Behavior, ScriptContext};
use crate::settings::Settings;

pub struct Host<B: Behavior, C: Clock> {
    behavior: B,
    clock: C,
    /// Time of the first frame
    start: Option<Timestamp>,
    fps: FpsCounter,
    images: ImageStore,
    loader: Box<dyn ImageLoader>,
    batcher: Batcher,
    audio: Audio,
    clear_color: [f32; 4],
    show_fps: bool,
    quit_requested: bool,
    frames: u64,
    last_stats: SubmitStats,
}

impl<B: Behavior, C: Clock> Host<B, C> {
    /// Silent host with built-in assets and the FPS overlay on
    pub fn new(behavior: B, clock: C) -> Self {
        Self {
            behavior,
            clock,
            start: None,
            fps: FpsCounter::new(),
            images: ImageStore::new(),
            loader: Box::new(AssetLoader::default()),
            batcher: Batcher::new(),
            audio: Audio::silent(),
            clear_color: colors::CLEAR,
            show_fps: true,
            quit_requested: false,
            frames: 0,
            last_stats: SubmitStats::default(),
        }
    }

    /// Host configured from settings; opens the audio device if sound is on
    pub fn from_settings(behavior: B, clock: C, settings: &Settings) -> Result<Self, Error> {
        let mut host = Self::new(behavior, clock);
        host.loader = Box::new(AssetLoader::new(settings.asset_dir.clone()));
        host.audio = Audio::open(settings.sound)?;
        host.clear_color = settings.clear_color;
        host.show_fps = settings.show_fps;
        Ok(host)
    }

    pub fn set_loader(&mut self, loader: Box<dyn ImageLoader>) {
        self.loader = loader;
    }

    pub fn set_audio(&mut self, audio: Audio) {
        self.audio = audio;
    }

    pub fn set_show_fps(&mut self, show: bool) {
        self.show_fps = show;
    }

    pub fn behavior(&self) -> &B {
        &self.behavior
    }

    pub fn behavior_mut(&mut self) -> &mut B {
        &mut self.behavior
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn fps(&self) -> &FpsCounter {
        &self.fps
    }

    pub fn images(&self) -> &ImageStore {
        &self.images
    }

    pub fn clear_color(&self) -> [f32; 4] {
        self.clear_color
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// What the last frame submitted
    pub fn last_stats(&self) -> SubmitStats {
        self.last_stats
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    /// Run the behavior's `on_init`
    pub fn init(&mut self, surface: &mut dyn DisplaySurface) -> Result<(), Error> {
        log::info!("Initializing behavior");
        let mut ctx = ScriptContext {
            surface,
            images: &mut self.images,
            loader: self.loader.as_ref(),
            batcher: &mut self.batcher,
            audio: &mut self.audio,
            clear_color: &mut self.clear_color,
        };
        self.behavior.on_init(&mut ctx).map_err(Error::Script)
    }

    /// Deliver one input event. Returns true once quitting was requested.
    pub fn handle_event(&mut self, surface: &mut dyn DisplaySurface, event: &InputEvent) -> bool {
        if event.is_quit_chord() {
            log::info!("Quit requested");
            self.quit_requested = true;
            return true;
        }
        if let InputEvent::KeyDown {
            key: KeyCode::F1,
            repeat: false,
            ..
        } = *event
        {
            self.show_fps = !self.show_fps;
            log::debug!("FPS overlay {}", if self.show_fps { "on" } else { "off" });
        }

        let mut ctx = ScriptContext {
            surface,
            images: &mut self.images,
            loader: self.loader.as_ref(),
            batcher: &mut self.batcher,
            audio: &mut self.audio,
            clear_color: &mut self.clear_color,
        };
        if let Err(e) = self.behavior.on_event(&mut ctx, event) {
            log::error!("on_event failed: {}", e);
        }
        self.quit_requested
    }

    /// Run one display frame
    pub fn frame<S: DisplaySurface + TextOverlay>(&mut self, surface: &mut S) -> Result<(), Error> {
        let now = self.clock.now();
        let start = *self.start.get_or_insert(now);
        let elapsed = elapsed_seconds(start, now);
        self.fps.record(now);

        self.batcher.reset();
        let (width, height) = surface.size();
        {
            let mut ctx = ScriptContext {
                surface: &mut *surface,
                images: &mut self.images,
                loader: self.loader.as_ref(),
                batcher: &mut self.batcher,
                audio: &mut self.audio,
                clear_color: &mut self.clear_color,
            };
            // Whatever was queued before the error is still drawn
            if let Err(e) = self.behavior.on_frame(&mut ctx, width, height, elapsed) {
                log::error!("on_frame failed: {}", e);
            }
        }

        surface.begin_frame(self.clear_color);
        self.last_stats = self.batcher.submit(surface);
        if self.show_fps {
            surface.draw_text((width as f32, height as f32), &self.fps.label());
        }
        surface.present()?;

        self.frames += 1;
        Ok(())
    }

    /// Release every image. Safe to call more than once.
    pub fn shutdown(&mut self, surface: &mut dyn DisplaySurface) {
        log::info!("Shutting down after {} frames", self.frames);
        for image in self.images.iter() {
            self.batcher.forget(image.id);
        }
        self.images.release_all(surface);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::error::ScriptError;
    use crate::input::Modifiers;
    use crate::renderer::{DrawCall, HeadlessSurface};

    /// Draws one image and a fill, counts callbacks
    #[derive(Default)]
    struct Probe {
        image: usize,
        frames: u32,
        events: u32,
        last_elapsed: f64,
    }

    impl Behavior for Probe {
        fn on_init(&mut self, ctx: &mut ScriptContext<'_>) -> Result<(), ScriptError> {
            self.image = ctx.load_image("enemy")?;
            Ok(())
        }

        fn on_frame(
            &mut self,
            ctx: &mut ScriptContext<'_>,
            _width: u32,
            _height: u32,
            elapsed: f64,
        ) -> Result<(), ScriptError> {
            self.frames += 1;
            self.last_elapsed = elapsed;
            ctx.draw_blit_px(self.image, 0.0, 0.0, 64.0, 64.0);
            ctx.draw_fill_px(0.0, 0.0, 1.0, 1.0, 1.0, 1.0, 1.0, 1.0);
            Ok(())
        }

        fn on_event(
            &mut self,
            _ctx: &mut ScriptContext<'_>,
            _event: &InputEvent,
        ) -> Result<(), ScriptError> {
            self.events += 1;
            Ok(())
        }
    }

    fn host() -> (Host<Probe, ManualClock>, HeadlessSurface, ManualClock) {
        let clock = ManualClock::new();
        let mut host = Host::new(Probe::default(), clock.clone());
        let mut surface = HeadlessSurface::new(800, 600);
        host.init(&mut surface).unwrap();
        (host, surface, clock)
    }

    #[test]
    fn test_frame_submits_and_presents() {
        let (mut host, mut surface, clock) = host();
        host.frame(&mut surface).unwrap();
        clock.advance_secs(0.25);
        host.frame(&mut surface).unwrap();

        assert_eq!(host.behavior().frames, 2);
        assert_eq!(host.behavior().last_elapsed, 0.25);
        assert_eq!(surface.frames_presented(), 2);
        assert_eq!(surface.draw_calls().len(), 2);
        assert!(matches!(surface.draw_calls()[1], DrawCall::Fill { vertices: 6 }));
        assert_eq!(surface.overlay_text(), Some("FPS: 0"));
    }

    #[test]
    fn test_overlay_can_be_hidden() {
        let (mut host, mut surface, _clock) = host();
        host.set_show_fps(false);
        host.frame(&mut surface).unwrap();
        assert_eq!(surface.overlay_text(), None);
    }

    #[test]
    fn test_f1_toggles_overlay() {
        let (mut host, mut surface, _clock) = host();
        host.handle_event(&mut surface, &InputEvent::key_down(KeyCode::F1));
        host.frame(&mut surface).unwrap();
        assert_eq!(surface.overlay_text(), None);
        // Still forwarded to the behavior
        assert_eq!(host.behavior().events, 1);

        // Held key repeats do not toggle back
        let repeat = InputEvent::KeyDown {
            key: KeyCode::F1,
            modifiers: Modifiers::empty(),
            repeat: true,
        };
        host.handle_event(&mut surface, &repeat);
        host.frame(&mut surface).unwrap();
        assert_eq!(surface.overlay_text(), None);

        host.handle_event(&mut surface, &InputEvent::key_down(KeyCode::F1));
        host.frame(&mut surface).unwrap();
        assert_eq!(surface.overlay_text(), Some("FPS: 0"));
    }

    #[test]
    fn test_quit_chord() {
        let (mut host, mut surface, _clock) = host();
        let plain_q = InputEvent::key_down(KeyCode::Q);
        assert!(!host.handle_event(&mut surface, &plain_q));
        assert_eq!(host.behavior().events, 1);

        let cmd_q = InputEvent::KeyDown {
            key: KeyCode::Q,
            modifiers: Modifiers::SUPER,
            repeat: false,
        };
        assert!(host.handle_event(&mut surface, &cmd_q));
        assert!(host.quit_requested());
        // Chord is not forwarded
        assert_eq!(host.behavior().events, 1);
    }

    #[test]
    fn test_shutdown_releases_once() {
        let (mut host, mut surface, _clock) = host();
        host.shutdown(&mut surface);
        host.shutdown(&mut surface);
        assert_eq!(surface.destroyed_images().len(), 1);
        assert_eq!(surface.live_images(), 0);
    }

    #[test]
    fn test_clear_color_from_settings() {
        let settings = Settings {
            clear_color: [0.2, 0.0, 0.0, 1.0],
            sound: false,
            ..Default::default()
        };
        let host = Host::from_settings(Probe::default(), ManualClock::new(), &settings).unwrap();
        let mut surface = HeadlessSurface::new(800, 600);
        let mut host = host;
        host.init(&mut surface).unwrap();
        host.frame(&mut surface).unwrap();
        assert_eq!(surface.clear_color(), [0.2, 0.0, 0.0, 1.0]);
    }
}

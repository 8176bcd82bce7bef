//! Sound effects
//!
//! Procedurally generated tones, no sound files. With the `audio` feature
//! they go to the default output device through rodio; without it, or when
//! sound is switched off, every request is dropped.

use crate::error::Error;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundEffect {
    /// Bullet fired
    Shot,
    /// Enemy destroyed
    Explosion,
}

impl SoundEffect {
    /// Playback volume (0.0 - 1.0)
    pub fn volume(self) -> f32 {
        match self {
            SoundEffect::Shot => 0.2,
            SoundEffect::Explosion => 0.5,
        }
    }
}

/// Something that can make noise
pub trait AudioPlayer {
    fn play(&mut self, effect: SoundEffect, volume: f32);
}

/// Drops every request
#[derive(Debug, Default)]
pub struct SilentAudio;

impl AudioPlayer for SilentAudio {
    fn play(&mut self, effect: SoundEffect, _volume: f32) {
        log::trace!("(silent) {:?}", effect);
    }
}

#[cfg(feature = "audio")]
pub use device::RodioAudio;

#[cfg(feature = "audio")]
mod device {
    use std::time::Duration;

    use rodio::source::{SineWave, Source};
    use rodio::{OutputStream, OutputStreamBuilder};

    use super::{AudioPlayer, SoundEffect};
    use crate::error::Error;

    /// Default output device; the stream must outlive every queued sound
    pub struct RodioAudio {
        stream: OutputStream,
    }

    impl RodioAudio {
        pub fn open() -> Result<Self, Error> {
            let mut stream = OutputStreamBuilder::open_default_stream()
                .map_err(|e| Error::Audio(e.to_string()))?;
            stream.log_on_drop(false);
            log::info!("Audio output opened");
            Ok(Self { stream })
        }
    }

    impl AudioPlayer for RodioAudio {
        fn play(&mut self, effect: SoundEffect, volume: f32) {
            let mixer = self.stream.mixer();
            match effect {
                // Short high blip
                SoundEffect::Shot => mixer.add(
                    SineWave::new(880.0)
                        .take_duration(Duration::from_millis(60))
                        .amplify(volume),
                ),
                // Low rumble with a thump underneath
                SoundEffect::Explosion => mixer.add(
                    SineWave::new(90.0)
                        .take_duration(Duration::from_millis(350))
                        .amplify(volume * 0.7)
                        .mix(
                            SineWave::new(45.0)
                                .take_duration(Duration::from_millis(200))
                                .amplify(volume * 0.5),
                        ),
                ),
            }
        }
    }
}

/// Switchable front end over an [`AudioPlayer`]
pub struct Audio {
    player: Box<dyn AudioPlayer>,
    enabled: bool,
}

impl Default for Audio {
    fn default() -> Self {
        Self::silent()
    }
}

impl Audio {
    /// Open the output device when `enabled`; a missing device is fatal
    pub fn open(enabled: bool) -> Result<Self, Error> {
        if !enabled {
            log::info!("Sound disabled");
            return Ok(Self::silent());
        }

        #[cfg(feature = "audio")]
        {
            Ok(Self::with_player(Box::new(RodioAudio::open()?), true))
        }

        #[cfg(not(feature = "audio"))]
        {
            log::info!("Built without the audio feature - sound disabled");
            Ok(Self::silent())
        }
    }

    pub fn silent() -> Self {
        Self {
            player: Box::new(SilentAudio),
            enabled: false,
        }
    }

    pub fn with_player(player: Box<dyn AudioPlayer>, enabled: bool) -> Self {
        Self { player, enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn play(&mut self, effect: SoundEffect) {
        if self.enabled {
            self.player.play(effect, effect.volume());
        }
    }
}

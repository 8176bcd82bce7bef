//! Game settings
//!
//! Defaults, overridden by an optional JSON file, then the environment
//! (`NOSOUND`), then command line flags (applied by the binary).

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::{ASSUMED_H, ASSUMED_W};
use crate::error::Error;

/// Environment variable that turns sound off when set (any value)
pub const NOSOUND_ENV: &str = "NOSOUND";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Window ===
    pub width: u32,
    pub height: u32,
    pub title: String,

    // === HUD ===
    /// Show the FPS counter
    pub show_fps: bool,
    /// Background pass color (RGBA)
    pub clear_color: [f32; 4],

    // === Audio ===
    pub sound: bool,

    // === Simulation ===
    /// RNG seed; random when absent
    pub seed: Option<u64>,
    /// Most ticks one frame may run before the backlog is skipped
    pub max_catch_up_ticks: u32,

    /// Directory searched for image files before the built-in sprites
    pub asset_dir: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            width: ASSUMED_W as u32,
            height: ASSUMED_H as u32,
            title: "Scroller".to_string(),

            show_fps: true,
            clear_color: crate::renderer::vertex::colors::CLEAR,

            sound: true,

            seed: None,
            max_catch_up_ticks: 240,

            asset_dir: None,
        }
    }
}

impl Settings {
    /// Parse settings from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load from a JSON file
    pub fn load(path: &Path) -> Result<Self, Error> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Apply environment overrides
    pub fn apply_env(&mut self) {
        self.apply_nosound(std::env::var_os(NOSOUND_ENV).is_some());
    }

    fn apply_nosound(&mut self, nosound: bool) {
        if nosound {
            log::info!("{} set - sound off", NOSOUND_ENV);
            self.sound = false;
        }
    }

    /// The configured seed, or one drawn from the OS
    pub fn resolve_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let s = Settings::default();
        assert_eq!((s.width, s.height), (800, 600));
        assert!(s.sound);
        assert!(s.show_fps);
        assert_eq!(s.max_catch_up_ticks, 240);
        assert_eq!(s.seed, None);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "sound": false, "seed": 42 }"#).unwrap();
        assert!(!s.sound);
        assert_eq!(s.seed, Some(42));
        assert_eq!(s.title, "Scroller");
        assert_eq!(s.width, 800);
    }

    #[test]
    fn test_bad_json_is_config_error() {
        let err = Settings::from_json("{ width: ").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_json_roundtrip() {
        let mut s = Settings::default();
        s.clear_color = [0.1, 0.2, 0.3, 1.0];
        s.asset_dir = Some(PathBuf::from("assets"));
        let back = Settings::from_json(&s.to_json().unwrap()).unwrap();
        assert_eq!(back, s);
    }

    #[test]
    fn test_nosound() {
        let mut s = Settings::default();
        s.apply_nosound(false);
        assert!(s.sound);
        s.apply_nosound(true);
        assert!(!s.sound);
    }

    #[test]
    fn test_fixed_seed() {
        let s = Settings {
            seed: Some(9),
            ..Default::default()
        };
        assert_eq!(s.resolve_seed(), 9);
    }
}

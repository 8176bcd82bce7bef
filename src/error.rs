//! Error types
//!
//! Startup failures (assets, audio device, GPU surface, config) are fatal and
//! surface as [`Error`] from the library; `main` logs them and exits.

use thiserror::Error;

/// Failure to produce a decoded image
#[derive(Debug, Error)]
pub enum AssetError {
    #[error("image `{0}` not found")]
    NotFound(String),
    #[error("failed to decode image `{name}`: {source}")]
    Decode {
        name: String,
        #[source]
        source: image::ImageError,
    },
    #[error("image `{0}` has zero size")]
    Empty(String),
}

/// Failure raised from a behavior callback
#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Asset(#[from] AssetError),
}

impl ScriptError {
    pub fn msg(text: impl Into<String>) -> Self {
        ScriptError::Message(text.into())
    }
}

/// Top-level error
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error("on_init failed: {0}")]
    Script(#[source] ScriptError),
    #[error("audio device: {0}")]
    Audio(String),
    #[error("display surface: {0}")]
    Surface(String),
    #[error("invalid settings: {0}")]
    Config(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

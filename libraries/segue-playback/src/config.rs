//! Player configuration

use crate::error::{PlaybackError, Result};
use crate::types::RepeatMode;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the queued player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaybackConfig {
    /// Advance to the next item when the current one finishes (default: true)
    #[serde(default = "default_automatically_play_next_song")]
    pub automatically_play_next_song: bool,

    /// Repeat mode for automatic advance (default: Off)
    #[serde(default)]
    pub repeat_mode: RepeatMode,
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            automatically_play_next_song: default_automatically_play_next_song(),
            repeat_mode: RepeatMode::default(),
        }
    }
}

impl PlaybackConfig {
    /// Load configuration from an optional file and the environment
    ///
    /// Environment variables are prefixed with `SEGUE_`, e.g.
    /// `SEGUE_AUTOMATICALLY_PLAY_NEXT_SONG=false`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut settings = config::Config::builder();

        if let Some(path) = path {
            settings = settings.add_source(config::File::from(path));
        }

        settings = settings.add_source(config::Environment::with_prefix("SEGUE").try_parsing(true));

        let config = settings
            .build()
            .map_err(|e| PlaybackError::Config(e.to_string()))?;

        config
            .try_deserialize()
            .map_err(|e| PlaybackError::Config(e.to_string()))
    }
}

fn default_automatically_play_next_song() -> bool {
    true
}

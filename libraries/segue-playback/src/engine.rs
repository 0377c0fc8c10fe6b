//! Single-item playback engine seam
//!
//! Abstracts the platform player that can hold and play exactly one item.

use crate::error::LoadError;
use crate::types::{PlaybackState, QueueItem};

/// Platform-agnostic single-item player
///
/// Implementors own decoding and output; the controller only tells them
/// what to load and when to play. The engine is the source of truth for
/// what is currently loaded: a new `load` supersedes any pending one.
///
/// The "item finished" notification is not part of this trait. The host
/// forwards it by calling [`QueuedPlayer::on_item_playback_ended`] on the
/// control thread.
///
/// [`QueuedPlayer::on_item_playback_ended`]: crate::QueuedPlayer::on_item_playback_ended
pub trait PlaybackEngine<T: QueueItem> {
    /// Load `item`, replacing whatever is loaded
    ///
    /// # Arguments
    /// * `item` - Item to load
    /// * `play_when_ready` - Start playback once the item is ready
    ///
    /// # Returns
    /// * `Ok(())` - Load was issued
    /// * `Err(_)` - Item cannot be loaded (format, unreachable source, ...)
    fn load(&mut self, item: &T, play_when_ready: bool) -> Result<(), LoadError>;

    /// Start or resume playback of the loaded item
    fn play(&mut self);

    /// Pause playback
    fn pause(&mut self);

    /// Stop playback and unload the item
    fn stop(&mut self);

    /// Seek within the loaded item (seconds from start)
    fn seek(&mut self, position: f64);

    /// Playback offset of the loaded item in seconds
    fn current_time(&self) -> f64;

    /// Current engine state
    fn state(&self) -> PlaybackState;
}

/// Engine that records every call, for tests
#[cfg(test)]
#[derive(Debug, Default)]
pub struct RecordingEngine {
    pub loads: Vec<(String, bool)>,
    pub seeks: Vec<f64>,
    pub position: f64,
    pub state: Option<PlaybackState>,
    pub fail_source: Option<String>,
}

#[cfg(test)]
impl<T: QueueItem> PlaybackEngine<T> for RecordingEngine {
    fn load(&mut self, item: &T, play_when_ready: bool) -> Result<(), LoadError> {
        if self.fail_source.as_deref() == Some(item.source()) {
            return Err(LoadError::UnsupportedFormat(item.source().to_string()));
        }
        self.loads.push((item.source().to_string(), play_when_ready));
        self.position = 0.0;
        self.state = Some(if play_when_ready {
            PlaybackState::Playing
        } else {
            PlaybackState::Paused
        });
        Ok(())
    }

    fn play(&mut self) {
        self.state = Some(PlaybackState::Playing);
    }

    fn pause(&mut self) {
        self.state = Some(PlaybackState::Paused);
    }

    fn stop(&mut self) {
        self.state = Some(PlaybackState::Stopped);
        self.position = 0.0;
    }

    fn seek(&mut self, position: f64) {
        self.seeks.push(position);
        self.position = position;
    }

    fn current_time(&self) -> f64 {
        self.position
    }

    fn state(&self) -> PlaybackState {
        self.state.unwrap_or(PlaybackState::Stopped)
    }
}

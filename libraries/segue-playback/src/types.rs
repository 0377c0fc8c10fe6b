//! Core types for queue playback

use serde::{Deserialize, Serialize};
use std::fmt::Debug;
use std::time::Duration;

/// A playable unit held by the queue
///
/// Items are identified by their position in the queue, not by value:
/// two equal items at different indices are different entries.
pub trait QueueItem: Clone + Debug {
    /// Location the playback engine loads (file path or URL)
    fn source(&self) -> &str;

    /// Display title, if the item carries one
    fn title(&self) -> Option<&str> {
        None
    }
}

/// Track information for queue management
///
/// Ready-made item type for hosts that don't bring their own.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// Track identifier from the host library
    pub id: String,

    /// File path or URL handed to the engine
    pub source: String,

    /// Track title
    pub title: String,

    /// Artist name
    pub artist: String,

    /// Album name (optional)
    pub album: Option<String>,

    /// Track duration, when known up front
    pub duration: Option<Duration>,
}

impl Track {
    /// Create a track with only an id and a source
    pub fn new(id: impl Into<String>, source: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: source.into(),
            title: String::new(),
            artist: String::new(),
            album: None,
            duration: None,
        }
    }
}

impl QueueItem for Track {
    fn source(&self) -> &str {
        &self.source
    }

    fn title(&self) -> Option<&str> {
        if self.title.is_empty() {
            None
        } else {
            Some(&self.title)
        }
    }
}

/// Playback state reported by the engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackState {
    /// Nothing loaded, or playback stopped
    Stopped,

    /// Loading/buffering an item
    Loading,

    /// Currently playing
    Playing,

    /// Paused mid-item
    Paused,
}

impl PlaybackState {
    /// Whether the engine intends to be producing audio
    pub fn is_active(self) -> bool {
        matches!(self, PlaybackState::Playing | PlaybackState::Loading)
    }
}

/// Repeat mode applied when an item finishes on its own
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RepeatMode {
    /// Stop when the queue ends
    #[default]
    Off,

    /// Restart the current item
    Track,

    /// Wrap to the first item after the last one
    Queue,
}

/// Automatic advance state machine
///
/// ```text
/// PlayingCurrent ──finished──▶ EndedNaturally ──auto──▶ Advancing
///       ▲                                                  │
///       └───────────── next loaded ◀───────────────────────┤
///                                                          ▼
///                                        IdleAtEnd (no next item)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AdvanceState {
    /// An item is loaded and owned by the engine
    PlayingCurrent,

    /// The current item finished and nothing was loaded after it
    EndedNaturally,

    /// Automatic advance is loading the next item
    Advancing,

    /// Automatic advance found no next item
    IdleAtEnd,
}

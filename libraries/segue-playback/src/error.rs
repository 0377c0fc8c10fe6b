//! Error types for queue playback

use thiserror::Error;

/// Structural errors raised by the playlist store
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The queue holds no items
    #[error("Queue is empty")]
    Empty,

    /// There is no item after the current one
    #[error("No next item in queue")]
    NoNextItem,

    /// There is no item before the current one
    #[error("No previous item in queue")]
    NoPreviousItem,

    /// Index does not address an existing item
    #[error("Index {index} out of range for queue of {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    /// Insertion position lies outside `0..=len`
    #[error("Cannot insert at {index} into queue of {len} items")]
    InvalidInsertion { index: usize, len: usize },
}

/// Errors raised by the playback engine when an item cannot be loaded
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The engine cannot decode this kind of source
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// The source could not be reached
    #[error("Source unreachable: {0}")]
    Unreachable(String),

    /// Any other engine failure
    #[error("Engine error: {0}")]
    Engine(String),
}

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Playlist store rejected the operation
    #[error("Queue error: {0}")]
    Queue(#[from] QueueError),

    /// Playback engine failed to load an item
    #[error("Load error: {0}")]
    Load(#[from] LoadError),

    /// Configuration could not be read
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PlaybackError {
    /// Whether this error came from the playlist store
    pub fn is_queue_error(&self) -> bool {
        matches!(self, PlaybackError::Queue(_))
    }
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;

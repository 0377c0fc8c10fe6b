//! Playback Events
//!
//! Event-based communication for UI synchronization during queue playback.
//! Every item transition produces at most two events, always in this order:
//! - track-level `PlaybackEnded` (always)
//! - queue-level `TrackEnded` (navigational reasons only)
//!
//! Other events report state changes, queue mutations and queue end.

use crate::types::PlaybackState;
use serde::{Deserialize, Serialize};

/// Why the current item stopped playing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEndedReason {
    /// Item played through to its end
    PlayedUntilEnd,
    /// Player was explicitly stopped
    PlayerStopped,
    /// Caller skipped to the next item
    SkippedToNext,
    /// Caller skipped to the previous item
    SkippedToPrevious,
    /// Caller jumped to an arbitrary index
    JumpedToIndex,
}

impl PlaybackEndedReason {
    /// Whether this ending moves the queue cursor
    ///
    /// Natural end and explicit stop do not advance the queue by themselves,
    /// so they produce no queue-level event.
    pub fn is_navigational(self) -> bool {
        !matches!(
            self,
            PlaybackEndedReason::PlayedUntilEnd | PlaybackEndedReason::PlayerStopped
        )
    }
}

/// Queue-level transition record
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackEndedEvent {
    /// Index of the item that just ended
    pub index: usize,
    /// Playback offset of that item in seconds at the moment it ended
    pub position: f64,
    /// Index the queue moves to, `None` when the queue is exhausted
    pub next_index: Option<usize>,
}

/// The ordered event pair produced by one transition
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransitionEvents {
    /// Reason for the track-level event
    pub reason: PlaybackEndedReason,
    /// Queue-level event, present for navigational reasons with a current item
    pub track_ended: Option<TrackEndedEvent>,
}

impl TransitionEvents {
    /// Build the pair for `reason`
    ///
    /// `current` is `(index, position)` of the ending item, if any.
    pub fn new(
        reason: PlaybackEndedReason,
        current: Option<(usize, f64)>,
        next_index: Option<usize>,
    ) -> Self {
        let track_ended = match current {
            Some((index, position)) if reason.is_navigational() => Some(TrackEndedEvent {
                index,
                position,
                next_index,
            }),
            _ => None,
        };

        Self {
            reason,
            track_ended,
        }
    }

    /// Events in emission order
    pub fn into_events(self) -> impl Iterator<Item = PlaybackEvent> {
        std::iter::once(PlaybackEvent::PlaybackEnded {
            reason: self.reason,
        })
        .chain(self.track_ended.map(PlaybackEvent::TrackEnded))
    }
}

/// Events emitted by the queued player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Track-level: the current item stopped playing
    PlaybackEnded {
        /// Why it stopped
        reason: PlaybackEndedReason,
    },

    /// Queue-level: an item ended and the queue is moving
    TrackEnded(TrackEndedEvent),

    /// Playback state or position materially changed
    StateChanged {
        /// Engine state
        state: PlaybackState,
        /// Current queue index, if any
        current_index: Option<usize>,
        /// Position in the current item (seconds)
        current_time: f64,
    },

    /// Queue changed (items added/removed/reordered)
    QueueChanged {
        /// New queue length
        length: usize,
    },

    /// Automatic advance stopped at the last item
    QueueEnded {
        /// Index of the last item
        index: usize,
    },

    /// Error swallowed by automatic advance
    Error {
        /// Error message
        message: String,
    },
}

//! Segue - Queue Playback
//!
//! Queue-aware playback control layered over a player that can only hold
//! one item at a time.
//!
//! This crate provides:
//! - Ordered playlist store with a current-item cursor
//! - Next / previous / jump navigation mirrored into engine loads
//! - Insert, remove, move and truncate operations
//! - Transition events (track-level + queue-level) for every item change
//! - Best-effort automatic advance when an item finishes
//! - Repeat modes for automatic advance (Off, Track, Queue)
//!
//! # Architecture
//!
//! `segue-playback` does no decoding or audio output. The platform player
//! is plugged in through the [`PlaybackEngine`] trait; the host forwards the
//! engine's "item finished" notification to
//! [`QueuedPlayer::on_item_playback_ended`] and drains events with
//! [`QueuedPlayer::drain_events`].
//!
//! # Example: Basic Queue Playback
//!
//! ```rust
//! use segue_playback::{
//!     LoadError, PlaybackConfig, PlaybackEngine, PlaybackEvent, PlaybackState, QueuedPlayer,
//!     Track,
//! };
//!
//! // Implement PlaybackEngine for your platform
//! #[derive(Default)]
//! struct MyEngine {
//!     state: Option<PlaybackState>,
//! }
//!
//! impl PlaybackEngine<Track> for MyEngine {
//!     fn load(&mut self, _item: &Track, play_when_ready: bool) -> Result<(), LoadError> {
//!         self.state = Some(if play_when_ready {
//!             PlaybackState::Playing
//!         } else {
//!             PlaybackState::Paused
//!         });
//!         Ok(())
//!     }
//!     fn play(&mut self) { self.state = Some(PlaybackState::Playing); }
//!     fn pause(&mut self) { self.state = Some(PlaybackState::Paused); }
//!     fn stop(&mut self) { self.state = Some(PlaybackState::Stopped); }
//!     fn seek(&mut self, _position: f64) {}
//!     fn current_time(&self) -> f64 { 0.0 }
//!     fn state(&self) -> PlaybackState { self.state.unwrap_or(PlaybackState::Stopped) }
//! }
//!
//! let mut player = QueuedPlayer::new(MyEngine::default(), PlaybackConfig::default());
//!
//! // The first item of an empty queue is loaded right away
//! player
//!     .add_all(
//!         vec![
//!             Track::new("1", "/music/one.flac"),
//!             Track::new("2", "/music/two.flac"),
//!         ],
//!         true,
//!     )
//!     .unwrap();
//! assert_eq!(player.current_index(), Some(0));
//!
//! // Engine reports the item finished: the player advances on its own
//! player.on_item_playback_ended();
//! assert_eq!(player.current_index(), Some(1));
//!
//! for event in player.drain_events() {
//!     if let PlaybackEvent::TrackEnded(ended) = event {
//!         println!("{} ended, next {:?}", ended.index, ended.next_index);
//!     }
//! }
//! ```

mod config;
mod engine;
mod error;
pub mod events;
mod manager;
pub mod queue;
pub mod types;

// Public exports
pub use config::PlaybackConfig;
pub use engine::PlaybackEngine;
pub use error::{LoadError, PlaybackError, QueueError, Result};
pub use events::{PlaybackEndedReason, PlaybackEvent, TrackEndedEvent, TransitionEvents};
pub use manager::QueuedPlayer;
pub use queue::{QueueManager, Removal};
pub use types::{AdvanceState, PlaybackState, QueueItem, RepeatMode, Track};

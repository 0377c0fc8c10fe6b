//! Queued player - core orchestration
//!
//! Keeps the playlist store and the single-item engine in sync and turns
//! item transitions into events.

use crate::{
    config::PlaybackConfig,
    engine::PlaybackEngine,
    error::{PlaybackError, QueueError, Result},
    events::{PlaybackEndedReason, PlaybackEvent, TransitionEvents},
    queue::QueueManager,
    types::{AdvanceState, PlaybackState, QueueItem, RepeatMode},
};
use tracing::{debug, info, warn};

/// Queue-aware playback controller
///
/// Every mutation is applied to the queue first and mirrored into a load
/// on the engine when it changes the current item. The controller keeps no
/// position of its own: the queue owns the cursor, the engine owns the
/// playback offset.
///
/// All methods are expected to run on one control thread, the same one that
/// forwards the engine's "item finished" notification.
pub struct QueuedPlayer<T, E>
where
    T: QueueItem,
    E: PlaybackEngine<T>,
{
    engine: E,
    queue: QueueManager<T>,

    // Settings
    automatically_play_next_song: bool,
    repeat_mode: RepeatMode,

    advance: AdvanceState,

    // Event queue for UI synchronization
    pending_events: Vec<PlaybackEvent>,
}

impl<T, E> QueuedPlayer<T, E>
where
    T: QueueItem,
    E: PlaybackEngine<T>,
{
    /// Create a player over `engine` with an empty queue
    pub fn new(engine: E, config: PlaybackConfig) -> Self {
        Self {
            engine,
            queue: QueueManager::new(),
            automatically_play_next_song: config.automatically_play_next_song,
            repeat_mode: config.repeat_mode,
            advance: AdvanceState::EndedNaturally,
            pending_events: Vec::new(),
        }
    }

    // ===== Loading =====

    /// Load `item` into the engine and make it the current queue entry
    ///
    /// The current entry is replaced in place; other indices don't move.
    pub fn load(&mut self, item: T, play_when_ready: bool) -> Result<()> {
        debug!(source = item.source(), play_when_ready, "Loading item");
        self.engine.load(&item, play_when_ready)?;
        self.queue.replace_current(item);
        self.advance = AdvanceState::PlayingCurrent;
        self.emit_queue_changed();
        self.emit_state_changed();
        Ok(())
    }

    // ===== Adding =====

    /// Add one item
    ///
    /// With no current item it becomes the only entry and is loaded right
    /// away. Otherwise it is appended without touching playback.
    pub fn add(&mut self, item: T, play_when_ready: bool) -> Result<()> {
        let load = self.queue.current().is_none();
        self.queue.add(item);
        self.emit_queue_changed();

        if load {
            self.load_current(play_when_ready)?;
        }
        Ok(())
    }

    /// Add a batch of items
    ///
    /// If the queue was empty the first item of the batch is loaded.
    pub fn add_all(&mut self, items: Vec<T>, play_when_ready: bool) -> Result<()> {
        if items.is_empty() {
            return Ok(());
        }

        let load = self.queue.current().is_none();
        self.queue.add_all(items);
        self.emit_queue_changed();

        if load {
            self.load_current(play_when_ready)?;
        }
        Ok(())
    }

    /// Insert a batch at `index` (`0..=len`) without loading anything
    pub fn insert_all(&mut self, items: Vec<T>, index: usize) -> Result<()> {
        self.queue.insert_all(items, index)?;
        self.emit_queue_changed();
        Ok(())
    }

    // ===== Navigation =====

    /// Skip to next item
    #[allow(clippy::should_implement_trait)]
    pub fn next(&mut self) -> Result<()> {
        let reason = PlaybackEndedReason::SkippedToNext;
        let next_index = self.compute_next_index(reason, None);
        self.emit_playback_end_events(reason, next_index);

        self.queue.next()?;
        debug!(index = ?self.queue.current_index(), "Skipped to next item");
        self.load_current(true)
    }

    /// Go back to previous item
    pub fn previous(&mut self) -> Result<()> {
        let reason = PlaybackEndedReason::SkippedToPrevious;
        let next_index = self.compute_next_index(reason, None);
        self.emit_playback_end_events(reason, next_index);

        self.queue.previous()?;
        debug!(index = ?self.queue.current_index(), "Skipped to previous item");
        self.load_current(true)
    }

    /// Jump to the item at `index`
    ///
    /// Jumping to the current index restarts the loaded item instead of
    /// reloading it, leaving it paused unless `play_when_ready` is set.
    pub fn jump_to_item(&mut self, index: usize, play_when_ready: bool) -> Result<()> {
        let reason = PlaybackEndedReason::JumpedToIndex;
        let next_index = self.compute_next_index(reason, Some(index));
        self.emit_playback_end_events(reason, next_index);

        let restart = self.queue.current_index() == Some(index);
        self.queue.jump(index)?;
        debug!(index, restart, "Jumped to item");

        if restart {
            self.engine.seek(0.0);
            if play_when_ready {
                self.engine.play();
            } else {
                self.engine.pause();
            }
            self.advance = AdvanceState::PlayingCurrent;
            self.emit_state_changed();
            Ok(())
        } else {
            self.load_current(play_when_ready)
        }
    }

    // ===== Removal / Reordering =====

    /// Remove the item at `index`
    ///
    /// When the current item is removed, the item that takes its place is
    /// loaded, playing if the engine was playing. Removing the last
    /// remaining item stops the engine.
    ///
    /// The removal is applied before the replacement is loaded. If that load
    /// fails the error is returned, the item stays removed and is dropped.
    pub fn remove_item(&mut self, index: usize) -> Result<T> {
        let removal = self.queue.remove(index)?;
        self.emit_queue_changed();

        if removal.current_changed {
            if self.queue.current().is_some() {
                let play_when_ready = self.engine.state().is_active();
                debug!(index, play_when_ready, "Removed current item, loading replacement");
                self.load_current(play_when_ready)?;
            } else {
                debug!("Removed last item, stopping engine");
                self.engine.stop();
                self.advance = AdvanceState::IdleAtEnd;
                self.emit_state_changed();
            }
        }

        Ok(removal.item)
    }

    /// Move the item at `from` to `to`
    pub fn move_item(&mut self, from: usize, to: usize) -> Result<()> {
        self.queue.move_item(from, to)?;
        self.emit_queue_changed();
        Ok(())
    }

    /// Drop every item after the current one
    pub fn remove_upcoming_items(&mut self) {
        self.queue.remove_upcoming();
        self.emit_queue_changed();
    }

    /// Drop every item before the current one
    pub fn remove_previous_items(&mut self) {
        self.queue.remove_previous();
        self.emit_queue_changed();
    }

    /// Stop playback and empty the queue
    pub fn clear(&mut self) {
        self.stop();
        self.queue.clear();
        self.emit_queue_changed();
    }

    // ===== Playback Control =====

    /// Start or resume playback
    pub fn play(&mut self) {
        self.engine.play();
        self.emit_state_changed();
    }

    /// Pause playback
    pub fn pause(&mut self) {
        self.engine.pause();
        self.emit_state_changed();
    }

    /// Seek within the current item (seconds)
    pub fn seek(&mut self, position: f64) {
        self.engine.seek(position);
        self.emit_state_changed();
    }

    /// Stop playback
    ///
    /// Keeps the queue and its cursor. Emits only the track-level event.
    pub fn stop(&mut self) {
        self.emit_playback_end_events(PlaybackEndedReason::PlayerStopped, None);
        self.engine.stop();
        self.emit_state_changed();
    }

    // ===== Automatic Advance =====

    /// Handle the engine's "item finished" notification
    ///
    /// Automatic advance is best effort: running out of items is the
    /// normal terminal state, not an error, so nothing is returned to the
    /// caller. The player stays idle on the last item and emits
    /// `QueueEnded`.
    pub fn on_item_playback_ended(&mut self) {
        self.emit_playback_end_events(PlaybackEndedReason::PlayedUntilEnd, None);
        self.advance = AdvanceState::EndedNaturally;

        if !self.automatically_play_next_song {
            debug!("Automatic advance disabled");
            return;
        }

        self.advance = AdvanceState::Advancing;
        let mode = self.repeat_mode;
        let result = match mode {
            RepeatMode::Track => {
                self.engine.seek(0.0);
                self.engine.play();
                self.advance = AdvanceState::PlayingCurrent;
                self.emit_state_changed();
                Ok(())
            }
            RepeatMode::Queue if self.queue.next_items().is_empty() && !self.queue.is_empty() => {
                debug!("Repeating queue from the start");
                self.jump_to_item(0, true)
            }
            RepeatMode::Off | RepeatMode::Queue => self.next(),
        };

        match result {
            Ok(()) => {}
            Err(PlaybackError::Queue(err)) => {
                info!(%err, "Automatic advance reached end of queue");
                self.advance = AdvanceState::IdleAtEnd;
                if let Some(index) = self.queue.current_index() {
                    self.pending_events.push(PlaybackEvent::QueueEnded { index });
                }
            }
            Err(err) => {
                warn!(%err, "Automatic advance failed to load next item");
                self.advance = AdvanceState::EndedNaturally;
                self.emit_error(err.to_string());
            }
        }
    }

    /// Forward an engine state change to observers
    pub fn on_engine_state_changed(&mut self) {
        self.emit_state_changed();
    }

    // ===== Transition Events =====

    /// Index the queue moves to for a transition with `reason`
    ///
    /// * `SkippedToNext` - `current + 1`, `None` past the last item
    /// * `SkippedToPrevious` - `current - 1`, clamped at 0
    /// * `JumpedToIndex` - `target` clamped to the last index, `None` without a target
    /// * `PlayedUntilEnd`, `PlayerStopped` - `None`
    ///
    /// Always `None` while the queue has no current item.
    pub fn compute_next_index(
        &self,
        reason: PlaybackEndedReason,
        target: Option<usize>,
    ) -> Option<usize> {
        let current = self.queue.current_index()?;
        let last = self.queue.len() - 1;

        match reason {
            PlaybackEndedReason::SkippedToNext => (current < last).then_some(current + 1),
            PlaybackEndedReason::SkippedToPrevious => Some(current.saturating_sub(1)),
            PlaybackEndedReason::JumpedToIndex => target.map(|t| t.min(last)),
            PlaybackEndedReason::PlayedUntilEnd | PlaybackEndedReason::PlayerStopped => None,
        }
    }

    /// Emit the events for the item that is ending
    ///
    /// Always emits `PlaybackEnded`. Navigational reasons add a
    /// `TrackEnded` carrying the live engine position. Must be called
    /// before the queue moves.
    pub fn emit_playback_end_events(
        &mut self,
        reason: PlaybackEndedReason,
        next_index: Option<usize>,
    ) {
        let current = self
            .queue
            .current_index()
            .map(|index| (index, self.engine.current_time()));

        let transition = TransitionEvents::new(reason, current, next_index);
        self.pending_events.extend(transition.into_events());
    }

    // ===== Settings =====

    /// Whether a natural end advances to the next item
    pub fn automatically_play_next_song(&self) -> bool {
        self.automatically_play_next_song
    }

    /// Enable or disable automatic advance
    pub fn set_automatically_play_next_song(&mut self, enabled: bool) {
        self.automatically_play_next_song = enabled;
    }

    /// Get current repeat mode
    pub fn repeat_mode(&self) -> RepeatMode {
        self.repeat_mode
    }

    /// Set repeat mode
    pub fn set_repeat_mode(&mut self, mode: RepeatMode) {
        self.repeat_mode = mode;
    }

    // ===== State Queries =====

    /// All items in playback order
    pub fn items(&self) -> &[T] {
        self.queue.items()
    }

    /// Currently loaded item
    pub fn current_item(&self) -> Option<&T> {
        self.queue.current()
    }

    /// Index of the current item
    pub fn current_index(&self) -> Option<usize> {
        self.queue.current_index()
    }

    /// Items before the current one
    pub fn previous_items(&self) -> &[T] {
        self.queue.previous_items()
    }

    /// Items after the current one
    pub fn next_items(&self) -> &[T] {
        self.queue.next_items()
    }

    /// Read-only view of the queue
    pub fn queue(&self) -> &QueueManager<T> {
        &self.queue
    }

    /// Engine state
    pub fn state(&self) -> PlaybackState {
        self.engine.state()
    }

    /// Position in the current item (seconds)
    pub fn current_time(&self) -> f64 {
        self.engine.current_time()
    }

    /// Automatic advance state
    pub fn advance_state(&self) -> AdvanceState {
        self.advance
    }

    /// The underlying engine
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// The underlying engine, mutably
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns every event emitted since the last drain, in order.
    pub fn drain_events(&mut self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.pending_events.is_empty()
    }

    /// Emit a state update carrying the current position
    pub fn emit_position_update(&mut self) {
        self.emit_state_changed();
    }

    /// Load the queue's current item into the engine
    fn load_current(&mut self, play_when_ready: bool) -> Result<()> {
        let item = self.queue.current().cloned().ok_or(QueueError::Empty)?;
        debug!(
            index = ?self.queue.current_index(),
            source = item.source(),
            play_when_ready,
            "Loading current item"
        );
        self.engine.load(&item, play_when_ready)?;
        self.advance = AdvanceState::PlayingCurrent;
        self.emit_state_changed();
        Ok(())
    }

    fn emit_state_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::StateChanged {
            state: self.engine.state(),
            current_index: self.queue.current_index(),
            current_time: self.engine.current_time(),
        });
    }

    fn emit_queue_changed(&mut self) {
        self.pending_events.push(PlaybackEvent::QueueChanged {
            length: self.queue.len(),
        });
    }

    fn emit_error(&mut self, message: String) {
        self.pending_events.push(PlaybackEvent::Error { message });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::RecordingEngine;
    use crate::events::TrackEndedEvent;
    use crate::types::Track;

    fn create_test_track(id: &str) -> Track {
        Track::new(id, format!("/music/{}.mp3", id))
    }

    fn player_with(ids: &[&str]) -> QueuedPlayer<Track, RecordingEngine> {
        let mut player = QueuedPlayer::new(RecordingEngine::default(), PlaybackConfig::default());
        player
            .add_all(ids.iter().map(|id| create_test_track(id)).collect(), true)
            .unwrap();
        player.drain_events();
        player
    }

    fn track_ended(events: &[PlaybackEvent]) -> Vec<TrackEndedEvent> {
        events
            .iter()
            .filter_map(|e| match e {
                PlaybackEvent::TrackEnded(t) => Some(*t),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn next_index_absent_on_last_item() {
        let mut player = player_with(&["1", "2", "3", "4", "5"]);
        player.jump_to_item(4, true).unwrap();

        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::SkippedToNext, None),
            None
        );
    }

    #[test]
    fn previous_index_clamped_at_start() {
        let player = player_with(&["1", "2"]);
        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::SkippedToPrevious, None),
            Some(0)
        );
    }

    #[test]
    fn jump_index_clamped_to_last() {
        let player = player_with(&["1", "2", "3"]);
        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::JumpedToIndex, Some(10)),
            Some(2)
        );
        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::JumpedToIndex, None),
            None
        );
    }

    #[test]
    fn terminal_reasons_have_no_next_index() {
        let player = player_with(&["1", "2"]);
        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::PlayedUntilEnd, None),
            None
        );
        assert_eq!(
            player.compute_next_index(PlaybackEndedReason::PlayerStopped, None),
            None
        );
    }

    #[test]
    fn next_emits_pair_with_live_position() {
        let mut player = player_with(&["1", "2"]);
        player.engine_mut().position = 42.0;

        player.next().unwrap();
        let events = player.drain_events();

        assert_eq!(
            events[0],
            PlaybackEvent::PlaybackEnded {
                reason: PlaybackEndedReason::SkippedToNext
            }
        );
        assert_eq!(
            events[1],
            PlaybackEvent::TrackEnded(TrackEndedEvent {
                index: 0,
                position: 42.0,
                next_index: Some(1),
            })
        );
        assert_eq!(player.current_index(), Some(1));
    }

    #[test]
    fn next_on_last_item_fails_after_emitting() {
        let mut player = player_with(&["1"]);

        let err = player.next().unwrap_err();
        assert!(matches!(err, PlaybackError::Queue(QueueError::NoNextItem)));

        let events = player.drain_events();
        assert_eq!(
            track_ended(&events),
            vec![TrackEndedEvent {
                index: 0,
                position: 0.0,
                next_index: None,
            }]
        );
        assert_eq!(player.engine().loads.len(), 1);
    }

    #[test]
    fn jump_to_current_index_restarts() {
        let mut player = player_with(&["1", "2"]);
        player.engine_mut().position = 30.0;

        player.jump_to_item(0, true).unwrap();

        assert_eq!(player.engine().loads.len(), 1);
        assert_eq!(player.engine().seeks, vec![0.0]);
        assert_eq!(player.current_time(), 0.0);
    }

    #[test]
    fn stop_emits_track_level_event_only() {
        let mut player = player_with(&["1", "2"]);
        player.stop();

        let events = player.drain_events();
        assert!(events.contains(&PlaybackEvent::PlaybackEnded {
            reason: PlaybackEndedReason::PlayerStopped
        }));
        assert!(track_ended(&events).is_empty());
        assert_eq!(player.state(), PlaybackState::Stopped);
        assert_eq!(player.current_index(), Some(0));
    }

    #[test]
    fn finished_item_advances_automatically() {
        let mut player = player_with(&["1", "2"]);

        player.on_item_playback_ended();

        assert_eq!(player.current_index(), Some(1));
        assert_eq!(player.advance_state(), AdvanceState::PlayingCurrent);
        let events = player.drain_events();
        assert_eq!(
            events[0],
            PlaybackEvent::PlaybackEnded {
                reason: PlaybackEndedReason::PlayedUntilEnd
            }
        );
        assert_eq!(
            events[1],
            PlaybackEvent::PlaybackEnded {
                reason: PlaybackEndedReason::SkippedToNext
            }
        );
    }

    #[test]
    fn finished_last_item_goes_idle() {
        let mut player = player_with(&["1", "2"]);
        player.next().unwrap();
        player.drain_events();

        player.on_item_playback_ended();

        assert_eq!(player.current_index(), Some(1));
        assert_eq!(player.advance_state(), AdvanceState::IdleAtEnd);
        let events = player.drain_events();
        assert!(events.contains(&PlaybackEvent::QueueEnded { index: 1 }));
        assert!(!events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[test]
    fn advance_never_leaves_player_advancing() {
        let mut player = player_with(&["1", "2"]);

        player.on_item_playback_ended();
        assert_eq!(player.advance_state(), AdvanceState::PlayingCurrent);

        player.on_item_playback_ended();
        assert_eq!(player.advance_state(), AdvanceState::IdleAtEnd);

        // A repeated notification at the end is handled again
        player.drain_events();
        player.on_item_playback_ended();
        assert!(player
            .drain_events()
            .contains(&PlaybackEvent::QueueEnded { index: 1 }));
    }

    #[test]
    fn disabled_auto_advance_stays_on_item() {
        let mut player = player_with(&["1", "2"]);
        player.set_automatically_play_next_song(false);

        player.on_item_playback_ended();

        assert_eq!(player.current_index(), Some(0));
        assert_eq!(player.advance_state(), AdvanceState::EndedNaturally);
        assert_eq!(player.engine().loads.len(), 1);
    }

    #[test]
    fn repeat_track_restarts_current_item() {
        let mut player = player_with(&["1", "2"]);
        player.set_repeat_mode(RepeatMode::Track);
        player.engine_mut().position = 180.0;

        player.on_item_playback_ended();

        assert_eq!(player.current_index(), Some(0));
        assert_eq!(player.engine().seeks, vec![0.0]);
        assert_eq!(player.state(), PlaybackState::Playing);
    }

    #[test]
    fn repeat_queue_wraps_to_first_item() {
        let mut player = player_with(&["1", "2"]);
        player.set_repeat_mode(RepeatMode::Queue);
        player.next().unwrap();

        player.on_item_playback_ended();

        assert_eq!(player.current_index(), Some(0));
        assert_eq!(player.advance_state(), AdvanceState::PlayingCurrent);
        assert_eq!(player.engine().loads.last().unwrap().0, "/music/1.mp3");
    }

    #[test]
    fn auto_advance_swallows_load_error() {
        let mut player = player_with(&["1", "2"]);
        player.engine_mut().fail_source = Some("/music/2.mp3".to_string());

        player.on_item_playback_ended();

        assert_eq!(player.advance_state(), AdvanceState::EndedNaturally);
        let events = player.drain_events();
        assert!(events
            .iter()
            .any(|e| matches!(e, PlaybackEvent::Error { .. })));
    }

    #[test]
    fn explicit_load_error_propagates() {
        let mut player = player_with(&["1", "2"]);
        player.engine_mut().fail_source = Some("/music/2.mp3".to_string());

        let err = player.next().unwrap_err();
        assert!(matches!(err, PlaybackError::Load(_)));
    }
}

/// Common test utilities and fixtures
use segue_playback::{
    LoadError, PlaybackConfig, PlaybackEngine, PlaybackEvent, PlaybackState, QueuedPlayer,
    Track, TrackEndedEvent,
};

/// Engine that records loads and lets tests drive position and failures
#[derive(Debug, Default)]
pub struct FakeEngine {
    pub loads: Vec<(String, bool)>,
    pub seeks: Vec<f64>,
    pub stops: usize,
    pub position: f64,
    pub state: Option<PlaybackState>,
    pub failing_sources: Vec<String>,
}

impl PlaybackEngine<Track> for FakeEngine {
    fn load(&mut self, item: &Track, play_when_ready: bool) -> Result<(), LoadError> {
        if self.failing_sources.iter().any(|s| s == &item.source) {
            return Err(LoadError::Unreachable(item.source.clone()));
        }
        self.loads.push((item.id.clone(), play_when_ready));
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
        self.stops += 1;
        self.position = 0.0;
        self.state = Some(PlaybackState::Stopped);
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

pub type TestPlayer = QueuedPlayer<Track, FakeEngine>;

pub fn create_track(id: &str) -> Track {
    let mut track = Track::new(id, format!("/music/{}.mp3", id));
    track.title = format!("Track {}", id);
    track.artist = "Test Artist".to_string();
    track
}

pub fn create_tracks(count: usize) -> Vec<Track> {
    (0..count).map(|i| create_track(&i.to_string())).collect()
}

/// Empty player with default configuration
pub fn empty_player() -> TestPlayer {
    QueuedPlayer::new(FakeEngine::default(), PlaybackConfig::default())
}

/// Player with `count` tracks, the first one loaded and playing, events drained
pub fn player_with_tracks(count: usize) -> TestPlayer {
    let mut player = empty_player();
    player.add_all(create_tracks(count), true).unwrap();
    player.drain_events();
    player
}

pub fn ids(tracks: &[Track]) -> Vec<&str> {
    tracks.iter().map(|t| t.id.as_str()).collect()
}

pub fn track_ended_events(events: &[PlaybackEvent]) -> Vec<TrackEndedEvent> {
    events
        .iter()
        .filter_map(|e| match e {
            PlaybackEvent::TrackEnded(t) => Some(*t),
            _ => None,
        })
        .collect()
}

/// Transition events only (track-level + queue-level), in order
pub fn transition_events(events: &[PlaybackEvent]) -> Vec<PlaybackEvent> {
    events
        .iter()
        .filter(|e| {
            matches!(
                e,
                PlaybackEvent::PlaybackEnded { .. } | PlaybackEvent::TrackEnded(_)
            )
        })
        .cloned()
        .collect()
}

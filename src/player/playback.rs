use std::path::PathBuf;

use super::audio_backend::{AudioBackend, PlatformAudioBackend};
use crate::media::{AudioRecord, format_time};

/// Observable playback state shared by every control in the viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PlaybackState {
    /// Ordinal of the loaded clip
    pub active_ordinal: Option<u32>,
    pub is_playing: bool,
    /// Display number of the image whose clip was started last.
    /// Survives pause so the player title stays put.
    pub owning_display_number: Option<u32>,
}

/// How a play request treats the owning image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Owner {
    Keep,
    Set(u32),
    Clear,
}

/// Result of a play request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Clip loaded and started from zero
    Started,
    /// Clip was already playing and got paused instead
    Paused,
    /// Backend refused to play the clip
    Failed,
}

/// Drives the audio backend and keeps [`PlaybackState`] consistent
pub struct PlaybackController {
    state: PlaybackState,
    /// Asset of the active clip, kept to restart it after it ended
    loaded_path: Option<PathBuf>,
    current_position: f32,
    total_duration: f32,
    /// Current volume (0.0 - 1.0)
    volume: f32,
    audio_backend: Option<Box<dyn AudioBackend>>,
}

// Manual Debug implementation since dyn AudioBackend doesn't implement Debug usefully
impl std::fmt::Debug for PlaybackController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PlaybackController")
            .field("state", &self.state)
            .field("loaded_path", &self.loaded_path)
            .field("current_position", &self.current_position)
            .field("total_duration", &self.total_duration)
            .field("volume", &self.volume)
            .field("audio_backend", &self.audio_backend.as_ref().map(|_| "<audio backend>"))
            .finish()
    }
}

impl PlaybackController {
    /// Create a controller on the platform backend. If the backend cannot be
    /// initialized the controller still tracks state, silently.
    pub fn new(volume: f32) -> Self {
        let mut backend = PlatformAudioBackend::new();
        match backend.init() {
            Ok(()) => {
                log::info!("Audio backend initialized successfully");
                Self::with_backend(Box::new(backend), volume)
            }
            Err(e) => {
                log::error!("Failed to initialize audio backend: {e}");
                Self::silent(volume)
            }
        }
    }

    /// Create a controller on an already initialized backend
    pub fn with_backend(backend: Box<dyn AudioBackend>, volume: f32) -> Self {
        let mut controller = Self::silent(volume);
        controller.audio_backend = Some(backend);
        controller.apply_volume();
        controller
    }

    /// Create a controller with no audio output
    pub fn silent(volume: f32) -> Self {
        Self {
            state: PlaybackState::default(),
            loaded_path: None,
            current_position: 0.0,
            total_duration: 0.0,
            volume: volume.clamp(0.0, 1.0),
            audio_backend: None,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing
    }

    /// Whether sound actually reaches an output device
    pub fn has_output(&self) -> bool {
        self.audio_backend
            .as_ref()
            .is_some_and(|backend| backend.is_available())
    }

    pub fn has_loaded_audio(&self) -> bool {
        self.state.active_ordinal.is_some()
    }

    /// Whether controls bound to `ordinal` should show the pause icon
    pub fn is_ordinal_playing(&self, ordinal: u32) -> bool {
        self.state.is_playing && self.state.active_ordinal == Some(ordinal)
    }

    /// Play `audio` from the start, or pause it if it is the clip already playing.
    ///
    /// A different clip that is playing is stopped and rewound first. `owner`
    /// only takes effect when the clip actually starts.
    pub fn play(&mut self, audio: &AudioRecord, owner: Owner) -> PlayOutcome {
        if self.is_ordinal_playing(audio.ordinal) {
            self.pause();
            return PlayOutcome::Paused;
        }

        if self.state.is_playing {
            self.stop_backend();
        }

        self.state.active_ordinal = Some(audio.ordinal);
        self.loaded_path = Some(audio.asset_path.clone());
        self.current_position = 0.0;
        self.total_duration = 0.0;

        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.play_audio(&audio.asset_path) {
                log::error!("Failed to play {}: {}", audio.display_name, e);
                // the previous clip is already stopped, nothing is loaded now
                self.state = PlaybackState::default();
                self.loaded_path = None;
                return PlayOutcome::Failed;
            }
            self.total_duration = backend.get_duration();
        }

        self.state.is_playing = true;
        match owner {
            Owner::Keep => {}
            Owner::Set(display_number) => self.state.owning_display_number = Some(display_number),
            Owner::Clear => self.state.owning_display_number = None,
        }
        log::debug!("Playing {} (ordinal {})", audio.display_name, audio.ordinal);
        PlayOutcome::Started
    }

    /// Pause playback. The owning image is kept.
    pub fn pause(&mut self) {
        if !self.state.is_playing {
            return;
        }
        self.state.is_playing = false;

        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.pause() {
                // nothing loaded in the backend
                if e.contains("No audio playing") {
                    log::debug!("Pause called but no audio is currently playing");
                } else {
                    log::error!("Failed to pause audio: {e}");
                }
            }
            self.current_position = backend.get_position();
        }
    }

    /// Resume the loaded clip without reloading it. No-op when nothing is loaded.
    pub fn resume(&mut self) {
        if self.state.is_playing {
            return;
        }
        let Some(path) = self.loaded_path.clone() else {
            return;
        };

        if let Some(backend) = &mut self.audio_backend {
            let result = if backend.has_finished() {
                // the sound ran out, playing again starts over
                self.current_position = 0.0;
                backend.play_audio(&path)
            } else {
                backend.resume()
            };
            if let Err(e) = result {
                log::error!("Failed to resume audio: {e}");
                return;
            }
        }
        self.state.is_playing = true;
    }

    /// Play/pause button of the player bar
    pub fn toggle(&mut self) {
        if self.state.is_playing {
            self.pause();
        } else {
            self.resume();
        }
    }

    /// The clip reached its end. Nothing else starts.
    pub fn on_ended(&mut self) {
        if self.state.is_playing {
            log::debug!("Clip {:?} finished", self.state.active_ordinal);
        }
        self.state.is_playing = false;
        self.current_position = self.total_duration;
    }

    /// Sync position from the backend and detect natural completion.
    /// Returns true when the clip ended during this poll.
    pub fn poll_backend(&mut self) -> bool {
        let Some(backend) = &self.audio_backend else {
            return false;
        };

        if !self.state.is_playing {
            return false;
        }

        self.current_position = backend.get_position();
        let duration = backend.get_duration();
        if duration > 0.0 {
            self.total_duration = duration;
        }

        if backend.has_finished() {
            self.on_ended();
            return true;
        }
        false
    }

    /// Set the volume (0.0 - 1.0)
    pub fn set_volume(&mut self, volume: f32) {
        self.volume = volume.clamp(0.0, 1.0);
        self.apply_volume();
    }

    pub fn volume(&self) -> f32 {
        self.volume
    }

    /// Playback position in seconds
    pub fn position(&self) -> f32 {
        self.current_position
    }

    pub fn duration(&self) -> f32 {
        self.total_duration
    }

    /// Get playback progress as a ratio (0.0 - 1.0)
    pub fn progress(&self) -> f32 {
        if self.total_duration > 0.0 {
            (self.current_position / self.total_duration).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }

    pub fn format_position(&self) -> String {
        format_time(self.current_position)
    }

    pub fn format_duration(&self) -> String {
        format_time(self.total_duration)
    }

    fn stop_backend(&mut self) {
        self.current_position = 0.0;
        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.stop() {
                if e.contains("No audio playing") {
                    log::debug!("Stop called but no audio is currently playing");
                } else {
                    log::error!("Failed to stop audio: {e}");
                }
            }
        }
    }

    fn apply_volume(&mut self) {
        if let Some(backend) = &mut self.audio_backend {
            if let Err(e) = backend.set_volume(self.volume) {
                log::error!("Failed to set audio volume: {e}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::audio_backend::mock::{BackendCall, MockBackend};

    fn clip(ordinal: u32) -> AudioRecord {
        AudioRecord {
            ordinal,
            display_name: format!("Durood {ordinal}"),
            file_name: format!("{ordinal:02}.mp3"),
            asset_path: PathBuf::from(format!("assets/audio/{ordinal:02}.mp3")),
        }
    }

    #[test]
    fn same_clip_toggles_then_restarts() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);

        assert_eq!(player.play(&clip(3), Owner::Keep), PlayOutcome::Started);
        assert_eq!(player.play(&clip(3), Owner::Keep), PlayOutcome::Paused);
        assert!(!player.is_playing());
        assert_eq!(player.play(&clip(3), Owner::Keep), PlayOutcome::Started);
        assert!(player.is_ordinal_playing(3));

        let path = clip(3).asset_path;
        assert_eq!(
            log.borrow().transport_calls(),
            vec![
                BackendCall::Play(path.clone()),
                BackendCall::Pause,
                BackendCall::Play(path),
            ]
        );
    }

    #[test]
    fn switching_clips_stops_previous_first() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);

        player.play(&clip(1), Owner::Keep);
        player.play(&clip(2), Owner::Keep);

        assert_eq!(player.state().active_ordinal, Some(2));
        assert_eq!(
            log.borrow().transport_calls(),
            vec![
                BackendCall::Play(clip(1).asset_path),
                BackendCall::Stop,
                BackendCall::Play(clip(2).asset_path),
            ]
        );
    }

    #[test]
    fn resume_without_loaded_clip_is_noop() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);
        player.resume();
        assert!(!player.is_playing());
        assert!(log.borrow().transport_calls().is_empty());
    }

    #[test]
    fn resume_continues_without_reload() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);
        player.play(&clip(5), Owner::Keep);
        player.pause();
        player.resume();
        assert!(player.is_ordinal_playing(5));
        assert_eq!(
            log.borrow().transport_calls(),
            vec![
                BackendCall::Play(clip(5).asset_path),
                BackendCall::Pause,
                BackendCall::Resume,
            ]
        );
    }

    #[test]
    fn owner_survives_pause_and_changes_only_on_start() {
        let (backend, _log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);

        player.play(&clip(7), Owner::Set(10));
        player.pause();
        assert_eq!(player.state().owning_display_number, Some(10));

        player.play(&clip(7), Owner::Keep);
        // tapping the playing clip from another image pauses, owner stays
        assert_eq!(player.play(&clip(7), Owner::Set(11)), PlayOutcome::Paused);
        assert_eq!(player.state().owning_display_number, Some(10));

        player.play(&clip(8), Owner::Set(11));
        assert_eq!(player.state().owning_display_number, Some(11));
    }

    #[test]
    fn natural_end_stops_without_advancing() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);
        player.play(&clip(1), Owner::Keep);

        log.borrow_mut().finish();
        assert!(player.poll_backend());
        assert!(!player.is_playing());
        assert_eq!(player.state().active_ordinal, Some(1));
        assert_eq!(log.borrow().transport_calls().len(), 1);

        // play button after the end starts the clip over
        player.toggle();
        assert!(player.is_playing());
        assert_eq!(
            log.borrow().transport_calls().last(),
            Some(&BackendCall::Play(clip(1).asset_path))
        );
    }

    #[test]
    fn failed_start_leaves_player_stopped() {
        let (backend, log) = MockBackend::new();
        log.borrow_mut().fail_play = true;
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);

        assert!(player.has_output());
        assert_eq!(player.play(&clip(2), Owner::Set(5)), PlayOutcome::Failed);
        assert!(!player.is_playing());
        assert_eq!(player.state().active_ordinal, None);
        assert_eq!(player.state().owning_display_number, None);
        player.resume();
        assert!(!player.is_playing());
    }

    #[test]
    fn silent_controller_tracks_state() {
        let mut player = PlaybackController::silent(0.5);
        assert!(!player.has_output());
        player.play(&clip(4), Owner::Set(7));
        assert!(player.is_ordinal_playing(4));
        player.toggle();
        assert!(!player.is_playing());
        player.toggle();
        assert!(player.is_playing());
        assert!(!player.poll_backend());
    }

    #[test]
    fn volume_is_clamped_and_forwarded() {
        let (backend, log) = MockBackend::new();
        let mut player = PlaybackController::with_backend(Box::new(backend), 1.0);
        player.set_volume(1.5);
        assert_eq!(player.volume(), 1.0);
        assert_eq!(log.borrow().calls.last(), Some(&BackendCall::SetVolume(1.0)));
    }
}

use std::path::Path;
use std::time::Instant;

use kira::{
    AudioManager,
    AudioManagerSettings,
    DefaultBackend,
    Tween,
    sound::FromFileError,
    sound::PlaybackState,
    sound::streaming::{StreamingSoundData, StreamingSoundHandle},
};

use crate::player::audio_backend::trait_def::AudioBackend;

/// Native audio backend implementation using kira
pub struct NativeAudioBackend {
    /// Audio manager for playback
    manager: Option<AudioManager<DefaultBackend>>,
    /// Handle to the currently loaded sound
    sound_handle: Option<StreamingSoundHandle<FromFileError>>,
    /// Position at the last pause or seek, in seconds
    current_position: f32,
    /// Start time of playback for position tracking
    playback_start_time: Option<Instant>,
    /// Position when playback started
    playback_start_position: f32,
    /// Audio duration in seconds
    duration: f32,
    /// Is currently playing
    is_playing: bool,
    /// Whether backend initialization succeeded
    initialized: bool,
    /// Current volume level (0.0 - 1.0)
    volume: f32,
}

impl NativeAudioBackend {
    /// Create a new native audio backend
    pub fn new() -> Self {
        Self {
            manager: None,
            sound_handle: None,
            current_position: 0.0,
            playback_start_time: None,
            playback_start_position: 0.0,
            duration: 0.0,
            is_playing: false,
            initialized: false,
            volume: 1.0,
        }
    }

    fn probe_duration(file_path: &Path) -> f32 {
        match mp3_duration::from_path(file_path) {
            Ok(duration) => duration.as_secs_f32(),
            Err(e) => {
                log::debug!("No duration for {}: {:?}", file_path.display(), e);
                0.0
            }
        }
    }

    fn volume_to_decibels(volume: f32) -> f32 {
        let clamped = volume.clamp(0.0, 1.0);
        if clamped <= 0.0 {
            -80.0
        } else {
            20.0 * clamped.log10()
        }
    }
}

impl AudioBackend for NativeAudioBackend {
    fn init(&mut self) -> Result<(), String> {
        match AudioManager::<DefaultBackend>::new(AudioManagerSettings::default()) {
            Ok(manager) => {
                self.manager = Some(manager);
                self.initialized = true;
                Ok(())
            }
            Err(e) => {
                self.initialized = false;
                Err(format!("Failed to initialize audio manager: {e}"))
            }
        }
    }

    fn play_audio(&mut self, file_path: &Path) -> Result<(), String> {
        if !self.initialized {
            return Err("Audio backend not initialized".to_owned());
        }

        let manager = self
            .manager
            .as_mut()
            .ok_or_else(|| "Audio manager not available".to_owned())?;

        if let Some(mut handle) = self.sound_handle.take() {
            handle.stop(Tween::default());
        }

        let sound_data = StreamingSoundData::from_file(file_path)
            .map_err(|e| format!("Failed to load {}: {e}", file_path.display()))?;

        let mut handle = manager
            .play(sound_data)
            .map_err(|e| format!("Failed to start audio playback: {e}"))?;

        self.duration = Self::probe_duration(file_path);
        self.current_position = 0.0;
        self.playback_start_time = Some(Instant::now());
        self.playback_start_position = 0.0;
        self.is_playing = true;

        let volume_db = Self::volume_to_decibels(self.volume);
        handle.set_volume(volume_db, Tween::default());

        self.sound_handle = Some(handle);
        Ok(())
    }

    fn pause(&mut self) -> Result<(), String> {
        if let Some(handle) = &mut self.sound_handle {
            if self.is_playing {
                if let Some(start_time) = self.playback_start_time {
                    let elapsed = start_time.elapsed().as_secs_f32();
                    self.current_position = self.playback_start_position + elapsed;
                }
            }

            handle.pause(Tween::default());
            self.is_playing = false;
            Ok(())
        } else {
            Err("No audio playing".to_owned())
        }
    }

    fn resume(&mut self) -> Result<(), String> {
        if let Some(handle) = &mut self.sound_handle {
            handle.resume(Tween::default());

            self.playback_start_time = Some(Instant::now());
            self.playback_start_position = self.current_position;
            self.is_playing = true;
            Ok(())
        } else {
            Err("No audio loaded".to_owned())
        }
    }

    fn stop(&mut self) -> Result<(), String> {
        if let Some(mut handle) = self.sound_handle.take() {
            self.current_position = 0.0;
            self.playback_start_position = 0.0;
            self.playback_start_time = None;
            self.is_playing = false;

            handle.stop(Tween::default());
            Ok(())
        } else {
            Err("No audio playing".to_owned())
        }
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), String> {
        self.volume = volume;
        if let Some(handle) = &mut self.sound_handle {
            let volume_db = Self::volume_to_decibels(self.volume);
            handle.set_volume(volume_db, Tween::default());
        }
        Ok(())
    }

    fn has_finished(&self) -> bool {
        // stop() drops the handle, so a stopped handle means the sound ran out
        self.sound_handle
            .as_ref()
            .is_some_and(|handle| matches!(handle.state(), PlaybackState::Stopped))
    }

    fn get_position(&self) -> f32 {
        if !self.is_playing {
            return self.current_position;
        }

        if let Some(start_time) = self.playback_start_time {
            let elapsed = start_time.elapsed().as_secs_f32();
            let position = self.playback_start_position + elapsed;
            if self.duration > 0.0 {
                position.min(self.duration)
            } else {
                position
            }
        } else {
            self.current_position
        }
    }

    fn get_duration(&self) -> f32 {
        self.duration
    }

    fn is_available(&self) -> bool {
        self.initialized
    }
}

impl Default for NativeAudioBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for NativeAudioBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeAudioBackend")
            .field("duration", &self.duration)
            .field("is_playing", &self.is_playing)
            .field("initialized", &self.initialized)
            .field("volume", &self.volume)
            .field("manager", &self.manager.as_ref().map(|_| "<audio manager>"))
            .field("sound_handle", &self.sound_handle.as_ref().map(|_| "<sound handle>"))
            .finish()
    }
}

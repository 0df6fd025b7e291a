use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Result, ViewerError};

/// Config file looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "viewer_config.json";

/// A specially named clip appended after the numbered audio range
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpecialAudio {
    pub file_name: String,
    pub display_name: String,
}

impl SpecialAudio {
    fn new(file_name: &str, display_name: &str) -> Self {
        Self {
            file_name: file_name.to_owned(),
            display_name: display_name.to_owned(),
        }
    }
}

/// Viewer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing keys keep their defaults
pub struct ViewerConfig {
    /// Directory holding `screen_<n>.png`
    pub images_path: PathBuf,
    /// Directory holding the audio clips
    pub audio_path: PathBuf,
    pub total_images: u32,
    pub total_audio: u32,
    /// Local path or `http(s)://` URL of the image/audio mapping
    pub mapping_source: String,
    /// How long startup waits for the mapping before building from the default rule
    pub mapping_wait_ms: u64,
    /// Prefix of audio display names and of the player title
    pub title_prefix: String,
    pub special_audio: Vec<SpecialAudio>,
    /// Horizontal distance a swipe or drag must exceed to navigate
    pub swipe_threshold: f32,
    /// Motion below this is a tap, not a gesture
    pub drag_slop: f32,
    pub scroll_debounce_ms: u64,
    /// Playback volume (0.0 - 1.0)
    pub volume: f32,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            images_path: PathBuf::from("assets/images"),
            audio_path: PathBuf::from("assets/audio"),
            total_images: 43,
            total_audio: 38,
            mapping_source: "assets/mapping.json".to_owned(),
            mapping_wait_ms: 500,
            title_prefix: "Durood".to_owned(),
            special_audio: vec![
                SpecialAudio::new("15(1).mp3", "Durood 15 (1)"),
                SpecialAudio::new("15(2).mp3", "Durood 15 (2)"),
                SpecialAudio::new("20(1).mp3", "Durood 20 (1)"),
                SpecialAudio::new("20(2).mp3", "Durood 20 (2)"),
                SpecialAudio::new("ringtone1.mp3", "Ringtone"),
            ],
            swipe_threshold: 50.0,
            drag_slop: 10.0,
            scroll_debounce_ms: 150,
            volume: 1.0,
        }
    }
}

impl ViewerConfig {
    /// Parse a config from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or the values fail validation.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Load `path` if it exists, falling back to defaults on any failure.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load(path) {
            Ok(config) => {
                log::info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("Ignoring config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Point every asset location at `root`, laid out as `images/`, `audio/` and `mapping.json`.
    pub fn with_assets_root(mut self, root: &Path) -> Self {
        self.images_path = root.join("images");
        self.audio_path = root.join("audio");
        self.mapping_source = root.join("mapping.json").to_string_lossy().into_owned();
        self
    }

    /// Check value ranges.
    ///
    /// # Errors
    ///
    /// Returns [`ViewerError::InvalidConfig`] describing the first bad value.
    pub fn validate(&self) -> Result<()> {
        if self.total_images == 0 {
            return Err(ViewerError::InvalidConfig {
                reason: "total_images must be at least 1".to_owned(),
            });
        }
        if !(self.swipe_threshold > 0.0) {
            return Err(ViewerError::InvalidConfig {
                reason: format!("swipe_threshold must be positive, got {}", self.swipe_threshold),
            });
        }
        if self.drag_slop < 0.0 || self.drag_slop > self.swipe_threshold {
            return Err(ViewerError::InvalidConfig {
                reason: format!(
                    "drag_slop must lie in 0..={}, got {}",
                    self.swipe_threshold, self.drag_slop
                ),
            });
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(ViewerError::InvalidConfig {
                reason: format!("volume must lie in 0.0..=1.0, got {}", self.volume),
            });
        }
        Ok(())
    }

    /// Path of the image asset for `file_index`
    pub fn image_path(&self, file_index: u32) -> PathBuf {
        self.images_path.join(format!("screen_{file_index}.png"))
    }

    /// Path of an audio asset by file name
    pub fn audio_file_path(&self, file_name: &str) -> PathBuf {
        self.audio_path.join(file_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ViewerConfig::from_json_str(r#"{ "total_images": 10 }"#).unwrap();
        assert_eq!(config.total_images, 10);
        assert_eq!(config.total_audio, 38);
        assert_eq!(config.special_audio.len(), 5);
        assert_eq!(config.swipe_threshold, 50.0);
        assert_eq!(config.mapping_wait_ms, 500);
    }

    #[test]
    fn rejects_zero_images() {
        let err = ViewerConfig::from_json_str(r#"{ "total_images": 0 }"#).unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig { .. }));
    }

    #[test]
    fn rejects_slop_above_threshold() {
        let err =
            ViewerConfig::from_json_str(r#"{ "swipe_threshold": 20.0, "drag_slop": 30.0 }"#)
                .unwrap_err();
        assert!(matches!(err, ViewerError::InvalidConfig { .. }));
    }

    #[test]
    fn assets_root_rewrites_paths() {
        let config = ViewerConfig::default().with_assets_root(Path::new("/srv/app"));
        assert_eq!(config.image_path(7), PathBuf::from("/srv/app/images/screen_7.png"));
        assert_eq!(
            config.audio_file_path("07.mp3"),
            PathBuf::from("/srv/app/audio/07.mp3")
        );
        assert_eq!(config.mapping_source, "/srv/app/mapping.json");
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = ViewerConfig::load_or_default(Path::new("definitely/not/here.json"));
        assert_eq!(config, ViewerConfig::default());
    }
}

use std::path::Path;

/// Audio playback backend trait
/// Defines the interface for platform-specific audio playback implementations
pub trait AudioBackend: std::fmt::Debug {
    /// Initialize the audio backend
    fn init(&mut self) -> Result<(), String>;

    /// Load the file at `file_path` and play it from the start
    fn play_audio(&mut self, file_path: &Path) -> Result<(), String>;

    /// Pause audio playback
    fn pause(&mut self) -> Result<(), String>;

    /// Resume audio playback
    fn resume(&mut self) -> Result<(), String>;

    /// Stop audio playback and rewind to zero
    fn stop(&mut self) -> Result<(), String>;

    /// Set the volume (0.0 - 1.0)
    fn set_volume(&mut self, volume: f32) -> Result<(), String>;

    /// Check if the loaded sound ran to its natural end
    fn has_finished(&self) -> bool;

    /// Get the current playback position in seconds
    fn get_position(&self) -> f32;

    /// Get the duration of the current audio in seconds
    fn get_duration(&self) -> f32;

    /// Check if the backend is available (properly initialized)
    fn is_available(&self) -> bool;
}

//! Audio playback: backend seam and the playback state machine.

pub mod audio_backend;
pub mod playback;

pub use audio_backend::AudioBackend;
pub use playback::{Owner, PlayOutcome, PlaybackController, PlaybackState};

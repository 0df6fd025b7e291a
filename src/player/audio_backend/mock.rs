//! Recording backend for tests.

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use super::AudioBackend;

/// A call observed by [`MockBackend`]
#[derive(Debug, Clone, PartialEq)]
pub enum BackendCall {
    Play(PathBuf),
    Pause,
    Resume,
    Stop,
    SetVolume(f32),
}

/// Shared view of what a [`MockBackend`] did, kept by the test after the
/// backend is boxed
#[derive(Debug, Default)]
pub struct MockLog {
    pub calls: Vec<BackendCall>,
    pub playing: bool,
    pub finished: bool,
    pub fail_play: bool,
}

#[derive(Debug, Default)]
pub struct MockBackend {
    log: Rc<RefCell<MockLog>>,
}

impl MockBackend {
    pub fn new() -> (Self, Rc<RefCell<MockLog>>) {
        let log = Rc::new(RefCell::new(MockLog::default()));
        (
            Self {
                log: Rc::clone(&log),
            },
            log,
        )
    }
}

impl MockLog {
    /// Calls other than volume changes
    pub fn transport_calls(&self) -> Vec<BackendCall> {
        self.calls
            .iter()
            .filter(|c| !matches!(c, BackendCall::SetVolume(_)))
            .cloned()
            .collect()
    }

    /// Simulate the sound running out
    pub fn finish(&mut self) {
        self.playing = false;
        self.finished = true;
    }
}

impl AudioBackend for MockBackend {
    fn init(&mut self) -> Result<(), String> {
        Ok(())
    }

    fn play_audio(&mut self, file_path: &Path) -> Result<(), String> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BackendCall::Play(file_path.to_path_buf()));
        if log.fail_play {
            return Err("mock play failure".to_owned());
        }
        log.playing = true;
        log.finished = false;
        Ok(())
    }

    fn pause(&mut self) -> Result<(), String> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BackendCall::Pause);
        log.playing = false;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), String> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BackendCall::Resume);
        log.playing = true;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), String> {
        let mut log = self.log.borrow_mut();
        log.calls.push(BackendCall::Stop);
        log.playing = false;
        Ok(())
    }

    fn set_volume(&mut self, volume: f32) -> Result<(), String> {
        self.log.borrow_mut().calls.push(BackendCall::SetVolume(volume));
        Ok(())
    }

    fn has_finished(&self) -> bool {
        self.log.borrow().finished
    }

    fn get_position(&self) -> f32 {
        0.0
    }

    fn get_duration(&self) -> f32 {
        0.0
    }

    fn is_available(&self) -> bool {
        true
    }
}

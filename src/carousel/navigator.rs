use serde::{Deserialize, Serialize};

use crate::player::PlaybackController;

/// Carousel step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Next,
    Prev,
}

/// Current carousel position, clamped to `[0, len - 1]`.
///
/// Moving never wraps around. Any move first silences playback: leaving an
/// image always pauses its clip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CarouselNavigator {
    index: usize,
    len: usize,
}

impl CarouselNavigator {
    pub fn new(len: usize) -> Self {
        Self { index: 0, len }
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn is_at_start(&self) -> bool {
        self.index == 0
    }

    pub fn is_at_end(&self) -> bool {
        self.index + 1 >= self.len
    }

    /// Step one image. Pauses playback first, then moves unless already at
    /// the boundary. Returns true if the position changed.
    pub fn navigate(&mut self, direction: Direction, playback: &mut PlaybackController) -> bool {
        if playback.is_playing() {
            playback.pause();
        }

        let target = match direction {
            Direction::Next if !self.is_at_end() => self.index + 1,
            Direction::Prev if !self.is_at_start() => self.index - 1,
            _ => return false,
        };
        log::debug!("Carousel {:?}: {} -> {}", direction, self.index, target);
        self.index = target;
        true
    }

    /// Reconcile the position with what is actually on screen. Playback is
    /// paused only if the position really changes.
    pub fn jump_to(&mut self, index: usize, playback: &mut PlaybackController) -> bool {
        if self.len == 0 {
            return false;
        }
        let target = index.min(self.len - 1);
        if target == self.index {
            return false;
        }
        if playback.is_playing() {
            playback.pause();
        }
        log::debug!("Carousel jump: {} -> {}", self.index, target);
        self.index = target;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::media::AudioRecord;
    use crate::player::Owner;
    use std::path::PathBuf;

    fn playing_controller() -> PlaybackController {
        let mut playback = PlaybackController::silent(1.0);
        let clip = AudioRecord {
            ordinal: 1,
            display_name: "Durood 1".to_owned(),
            file_name: "01.mp3".to_owned(),
            asset_path: PathBuf::from("01.mp3"),
        };
        playback.play(&clip, Owner::Set(4));
        playback
    }

    #[test]
    fn clamps_at_both_ends() {
        let mut playback = PlaybackController::silent(1.0);
        let mut nav = CarouselNavigator::new(3);

        assert!(!nav.navigate(Direction::Prev, &mut playback));
        assert_eq!(nav.index(), 0);

        assert!(nav.navigate(Direction::Next, &mut playback));
        assert!(nav.navigate(Direction::Next, &mut playback));
        assert!(!nav.navigate(Direction::Next, &mut playback));
        assert_eq!(nav.index(), 2);
        assert!(nav.is_at_end());
    }

    #[test]
    fn navigate_pauses_even_at_boundary() {
        let mut playback = playing_controller();
        let mut nav = CarouselNavigator::new(3);

        assert!(!nav.navigate(Direction::Prev, &mut playback));
        assert!(!playback.is_playing());
        assert_eq!(playback.state().owning_display_number, Some(4));
    }

    #[test]
    fn jump_to_same_index_keeps_playing() {
        let mut playback = playing_controller();
        let mut nav = CarouselNavigator::new(5);

        assert!(!nav.jump_to(0, &mut playback));
        assert!(playback.is_playing());

        assert!(nav.jump_to(3, &mut playback));
        assert!(!playback.is_playing());
        assert_eq!(nav.index(), 3);
    }

    #[test]
    fn jump_to_clamps_out_of_range() {
        let mut playback = PlaybackController::silent(1.0);
        let mut nav = CarouselNavigator::new(4);
        assert!(nav.jump_to(99, &mut playback));
        assert_eq!(nav.index(), 3);

        let mut empty = CarouselNavigator::new(0);
        assert!(!empty.jump_to(1, &mut playback));
        assert!(!empty.navigate(Direction::Next, &mut playback));
    }
}

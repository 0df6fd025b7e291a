use std::time::{Duration, Instant};

use crate::carousel::{
    CarouselNavigator, Direction, GestureSource, ScrollDebouncer, Span, SwipeGesture,
    visible_index,
};
use crate::config::ViewerConfig;
use crate::media::{ImageRecord, MediaCatalog};
use crate::player::{Owner, PlayOutcome, PlaybackController, PlaybackState};

/// Owns the catalog, playback and carousel position for one viewer session.
///
/// Every operation is a plain state transition, the UI layer only translates
/// input events into calls on this type and draws what it reports.
#[derive(Debug)]
pub struct MediaController {
    catalog: MediaCatalog,
    playback: PlaybackController,
    navigator: CarouselNavigator,
    gesture: SwipeGesture,
    scroll: ScrollDebouncer,
    title_prefix: String,
}

impl MediaController {
    pub fn new(config: &ViewerConfig, catalog: MediaCatalog, playback: PlaybackController) -> Self {
        let navigator = CarouselNavigator::new(catalog.image_count());
        Self {
            catalog,
            playback,
            navigator,
            gesture: SwipeGesture::new(config.swipe_threshold, config.drag_slop),
            scroll: ScrollDebouncer::new(Duration::from_millis(config.scroll_debounce_ms)),
            title_prefix: config.title_prefix.clone(),
        }
    }

    pub fn catalog(&self) -> &MediaCatalog {
        &self.catalog
    }

    pub fn playback(&self) -> &PlaybackController {
        &self.playback
    }

    pub fn playback_mut(&mut self) -> &mut PlaybackController {
        &mut self.playback
    }

    pub fn state(&self) -> PlaybackState {
        self.playback.state()
    }

    /// Carousel index of the image on screen
    pub fn position(&self) -> usize {
        self.navigator.index()
    }

    pub fn current_image(&self) -> Option<&ImageRecord> {
        self.catalog.image_at(self.navigator.index())
    }

    // ---- playback ----

    /// Play the clip bound to image `file_index`. Images without audio are a
    /// no-op and return `None`.
    pub fn play_audio_for_image(&mut self, file_index: u32) -> Option<PlayOutcome> {
        let display_number = self.catalog.image(file_index)?.display_number;
        let Some(audio) = self.catalog.audio_for_image(file_index) else {
            log::debug!("Image {file_index} has no audio");
            return None;
        };
        Some(self.playback.play(audio, Owner::Set(display_number)))
    }

    /// Play clip `ordinal`, or pause it if it is the one playing.
    pub fn play_by_ordinal(&mut self, ordinal: u32) -> Option<PlayOutcome> {
        let Some(audio) = self.catalog.audio_by_ordinal(ordinal) else {
            log::debug!("No audio clip with ordinal {ordinal}");
            return None;
        };
        Some(self.playback.play(audio, Owner::Keep))
    }

    /// Play from the audio list. Starting a clip no image owns clears the
    /// owning image so the title falls back to the clip name.
    pub fn play_listed_audio(&mut self, ordinal: u32) -> Option<PlayOutcome> {
        let audio = self.catalog.audio_by_ordinal(ordinal)?;
        let owner = if self.playback.state().active_ordinal == Some(ordinal) {
            Owner::Keep
        } else {
            Owner::Clear
        };
        Some(self.playback.play(audio, owner))
    }

    pub fn pause(&mut self) {
        self.playback.pause();
    }

    pub fn resume(&mut self) {
        self.playback.resume();
    }

    /// Player bar play/pause button
    pub fn toggle(&mut self) {
        self.playback.toggle();
    }

    pub fn on_ended(&mut self) {
        self.playback.on_ended();
    }

    /// Per-frame sync with the audio backend. Returns true if a clip ended.
    pub fn poll_backend(&mut self) -> bool {
        self.playback.poll_backend()
    }

    pub fn is_ordinal_playing(&self, ordinal: u32) -> bool {
        self.playback.is_ordinal_playing(ordinal)
    }

    /// Whether image `file_index` names a clip that exists in the audio list
    pub fn has_playable_audio(&self, file_index: u32) -> bool {
        self.catalog.audio_for_image(file_index).is_some()
    }

    /// Whether the play button on image `file_index` should show pause
    pub fn is_image_playing(&self, file_index: u32) -> bool {
        self.catalog
            .audio_for_image(file_index)
            .is_some_and(|audio| self.playback.is_ordinal_playing(audio.ordinal))
    }

    /// Player bar title: the owning image's number if known, else the clip name
    pub fn title(&self) -> Option<String> {
        let state = self.playback.state();
        let ordinal = state.active_ordinal?;
        if let Some(display_number) = state.owning_display_number {
            return Some(format!("{} {}", self.title_prefix, display_number));
        }
        self.catalog
            .audio_by_ordinal(ordinal)
            .map(|audio| audio.display_name.clone())
    }

    // ---- navigation ----

    /// Step the carousel; always silences playback first.
    pub fn navigate(&mut self, direction: Direction) -> bool {
        self.navigator.navigate(direction, &mut self.playback)
    }

    pub fn jump_to(&mut self, index: usize) -> bool {
        self.navigator.jump_to(index, &mut self.playback)
    }

    pub fn gesture(&self) -> &SwipeGesture {
        &self.gesture
    }

    pub fn gesture_begin(&mut self, source: GestureSource, x: f32, y: f32) {
        self.gesture.begin(source, x, y);
    }

    pub fn gesture_update(&mut self, source: GestureSource, x: f32, y: f32) {
        self.gesture.update(source, x, y);
    }

    /// Finish a gesture; a recognized swipe navigates once. Returns true if
    /// the carousel moved.
    pub fn gesture_end(&mut self, source: GestureSource, x: f32) -> bool {
        match self.gesture.end(source, x) {
            Some(direction) => self.navigate(direction),
            None => false,
        }
    }

    pub fn gesture_leave(&mut self, source: GestureSource) -> bool {
        match self.gesture.leave(source) {
            Some(direction) => self.navigate(direction),
            None => false,
        }
    }

    /// Record passive scrolling of the carousel strip
    pub fn note_scroll(&mut self, now: Instant) {
        self.scroll.note_scroll(now);
    }

    /// Time until a pending scroll settles, if one is pending
    pub fn scroll_settles_in(&self, now: Instant) -> Option<Duration> {
        self.scroll.remaining(now)
    }

    /// Once scrolling has been idle long enough, reconcile the position with
    /// the item on screen. Returns true if the position changed.
    pub fn settle_scroll(&mut self, now: Instant, container: Span, items: &[Span]) -> bool {
        if !self.scroll.poll(now) {
            return false;
        }
        match visible_index(container, items) {
            Some(index) => self.jump_to(index),
            None => false,
        }
    }
}

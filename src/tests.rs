use std::cell::RefCell;
use std::rc::Rc;
use std::time::{Duration, Instant};

use crate::carousel::{Direction, GestureSource, Span};
use crate::config::ViewerConfig;
use crate::controller::MediaController;
use crate::media::{MappingTable, MediaCatalog};
use crate::player::audio_backend::mock::{BackendCall, MockBackend, MockLog};
use crate::player::{PlayOutcome, PlaybackController};

fn make_controller(
    config: &ViewerConfig,
    mapping: &MappingTable,
) -> (MediaController, Rc<RefCell<MockLog>>) {
    let (backend, log) = MockBackend::new();
    let playback = PlaybackController::with_backend(Box::new(backend), config.volume);
    let catalog = MediaCatalog::build(config, mapping);
    (MediaController::new(config, catalog, playback), log)
}

fn default_controller() -> (MediaController, Rc<RefCell<MockLog>>) {
    let config = ViewerConfig::default();
    let mapping = MappingTable::load_or_fallback("unreachable/mapping.json", config.total_images);
    make_controller(&config, &mapping)
}

#[test]
fn leading_images_are_silent() {
    let (mut controller, log) = default_controller();
    for file_index in 1..=3 {
        assert!(!controller.catalog().image(file_index).unwrap().has_audio);
        assert_eq!(controller.play_audio_for_image(file_index), None);
    }
    assert_eq!(controller.state().active_ordinal, None);
    assert!(log.borrow().transport_calls().is_empty());
}

#[test]
fn unreachable_mapping_resolves_image_ten_to_clip_seven() {
    let (mut controller, log) = default_controller();
    assert_eq!(controller.catalog().image_count(), 43);

    let image = controller.catalog().image(10).unwrap();
    assert_eq!(image.audio_file_name.as_deref(), Some("07.mp3"));
    assert!(!controller.catalog().image(2).unwrap().has_audio);

    assert_eq!(controller.play_audio_for_image(10), Some(PlayOutcome::Started));
    let state = controller.state();
    assert_eq!(state.active_ordinal, Some(7));
    assert_eq!(state.owning_display_number, Some(10));
    assert!(state.is_playing);
    assert_eq!(
        log.borrow().transport_calls(),
        vec![BackendCall::Play(ViewerConfig::default().audio_file_path("07.mp3"))]
    );
}

#[test]
fn default_rule_names_every_clip_by_offset() {
    let (controller, _log) = default_controller();
    for image in controller.catalog().images().iter().filter(|i| i.file_index > 3) {
        let expected = format!("{:02}.mp3", image.file_index - 3);
        assert_eq!(image.audio_file_name.as_deref(), Some(expected.as_str()));
    }
}

#[test]
fn tapping_same_clip_pauses_then_restarts() {
    let (mut controller, log) = default_controller();
    assert_eq!(controller.play_by_ordinal(4), Some(PlayOutcome::Started));
    assert_eq!(controller.play_by_ordinal(4), Some(PlayOutcome::Paused));
    assert!(!controller.state().is_playing);
    assert_eq!(controller.play_by_ordinal(4), Some(PlayOutcome::Started));

    // no stop in between: consecutive taps pause, they never rewind
    assert!(!log.borrow().transport_calls().contains(&BackendCall::Stop));
}

#[test]
fn pause_keeps_owning_image() {
    let (mut controller, _log) = default_controller();
    controller.play_audio_for_image(12);
    controller.pause();
    let state = controller.state();
    assert!(!state.is_playing);
    assert_eq!(state.owning_display_number, Some(12));
    assert_eq!(controller.title().as_deref(), Some("Durood 12"));

    controller.play_audio_for_image(15);
    assert_eq!(controller.state().owning_display_number, Some(15));
}

#[test]
fn list_playback_falls_back_to_clip_name() {
    let (mut controller, _log) = default_controller();
    controller.play_audio_for_image(5);
    assert_eq!(controller.title().as_deref(), Some("Durood 5"));

    controller.play_listed_audio(43);
    assert_eq!(controller.state().owning_display_number, None);
    assert_eq!(controller.title().as_deref(), Some("Ringtone"));

    // pausing from the list keeps the title
    controller.play_listed_audio(43);
    assert!(!controller.state().is_playing);
    assert_eq!(controller.title().as_deref(), Some("Ringtone"));
}

#[test]
fn every_control_reflects_shared_state() {
    let (mut controller, _log) = default_controller();
    controller.play_audio_for_image(6);
    assert!(controller.is_image_playing(6));
    assert!(controller.is_ordinal_playing(3));
    assert!(!controller.is_image_playing(7));

    controller.play_listed_audio(3);
    assert!(!controller.is_image_playing(6));
    assert!(!controller.is_ordinal_playing(3));
}

#[test]
fn navigation_clamps_without_wrapping() {
    let (mut controller, _log) = default_controller();
    assert!(!controller.navigate(Direction::Prev));
    assert_eq!(controller.position(), 0);

    controller.jump_to(42);
    assert!(!controller.navigate(Direction::Next));
    assert_eq!(controller.position(), 42);
}

#[test]
fn navigating_silences_playback_first() {
    let (mut controller, log) = default_controller();
    controller.jump_to(5);
    controller.play_audio_for_image(6);
    assert!(controller.navigate(Direction::Next));
    assert!(!controller.state().is_playing);
    assert_eq!(log.borrow().transport_calls().last(), Some(&BackendCall::Pause));
}

#[test]
fn sixty_unit_drag_steps_once_and_pauses() {
    let (mut controller, log) = default_controller();
    controller.jump_to(5);
    controller.play_audio_for_image(6);
    assert!(controller.state().is_playing);

    controller.gesture_begin(GestureSource::Mouse, 300.0, 200.0);
    controller.gesture_update(GestureSource::Mouse, 270.0, 200.0);
    controller.gesture_update(GestureSource::Mouse, 240.0, 200.0);
    assert!(controller.gesture_end(GestureSource::Mouse, 240.0));

    assert_eq!(controller.position(), 6);
    assert!(!controller.state().is_playing);
    let pauses = log
        .borrow()
        .transport_calls()
        .iter()
        .filter(|c| **c == BackendCall::Pause)
        .count();
    assert_eq!(pauses, 1);

    // the finished gesture does not fire again
    assert!(!controller.gesture_end(GestureSource::Mouse, 240.0));
    assert_eq!(controller.position(), 6);
}

#[test]
fn scroll_settles_onto_visible_image() {
    let (mut controller, _log) = default_controller();
    controller.play_audio_for_image(4);

    let start = Instant::now();
    controller.note_scroll(start);
    let container = Span::new(0.0, 400.0);
    let items: Vec<Span> = (0..43)
        .map(|i| {
            let left = i as f32 * 400.0 - 800.0;
            Span::new(left, left + 400.0)
        })
        .collect();

    assert!(!controller.settle_scroll(start + Duration::from_millis(50), container, &items));
    assert!(controller.state().is_playing);

    assert!(controller.settle_scroll(start + Duration::from_millis(200), container, &items));
    assert_eq!(controller.position(), 2);
    assert!(!controller.state().is_playing);
}

#[test]
fn natural_end_does_not_advance() {
    let (mut controller, log) = default_controller();
    controller.play_audio_for_image(9);
    log.borrow_mut().finish();
    assert!(controller.poll_backend());
    let state = controller.state();
    assert!(!state.is_playing);
    assert_eq!(state.active_ordinal, Some(6));
    assert_eq!(controller.position(), 0);
}

#[test]
fn loaded_mapping_drives_owner_number() {
    let config = ViewerConfig {
        total_images: 8,
        ..ViewerConfig::default()
    };
    let mapping = MappingTable::from_json_str(
        r#"[
            { "fileIndex": 8, "imageNumber": 21, "audioFile": "20(1).mp3", "hasAudio": true }
        ]"#,
    )
    .unwrap();
    let (mut controller, _log) = make_controller(&config, &mapping);

    assert_eq!(controller.play_audio_for_image(8), Some(PlayOutcome::Started));
    assert_eq!(controller.state().active_ordinal, Some(41));
    assert_eq!(controller.title().as_deref(), Some("Durood 21"));
}

#[test]
fn failed_switch_does_not_keep_previous_owner() {
    let (mut controller, log) = default_controller();
    assert_eq!(controller.play_audio_for_image(10), Some(PlayOutcome::Started));

    log.borrow_mut().fail_play = true;
    assert_eq!(controller.play_audio_for_image(12), Some(PlayOutcome::Failed));

    let state = controller.state();
    assert_eq!(state.active_ordinal, None);
    assert!(!state.is_playing);
    assert_eq!(state.owning_display_number, None);
    assert_eq!(controller.title(), None);
    assert!(!controller.playback().has_loaded_audio());

    // the old clip was stopped before the failed start
    assert!(log.borrow().transport_calls().contains(&BackendCall::Stop));
}

#[test]
fn only_images_with_a_listed_clip_are_playable() {
    let (mut controller, log) = default_controller();
    assert!(controller.has_playable_audio(4));
    assert!(controller.has_playable_audio(41));
    assert!(!controller.has_playable_audio(2));

    // default rule names 40.mp3 for image 43, past the 38 numbered clips
    assert!(controller.catalog().image(43).unwrap().has_audio);
    assert!(!controller.has_playable_audio(43));
    assert_eq!(controller.play_audio_for_image(43), None);
    assert!(log.borrow().transport_calls().is_empty());
}

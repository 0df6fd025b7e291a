use std::time::Instant;

use egui::{
    Align, Align2, Button, Color32, CornerRadius, FontId, Key, PointerButton, Rect, RichText,
    ScrollArea, Sense, Stroke, StrokeKind, TouchPhase, Ui, Vec2,
};
use egui_phosphor::regular;

use super::texture_cache::TextureCache;
use crate::carousel::{Direction, GestureSource, Span};
use crate::controller::MediaController;
use crate::media::ImageRecord;

const PLAY_BUTTON_SIZE: f32 = 56.0;

/// Horizontal image carousel, one screen-wide item per image
#[derive(Debug, Default)]
pub struct Gallery {
    /// Carousel index the strip should be scrolled to on the next frame
    pending_scroll: Option<usize>,
    /// Horizontal scroll offset seen last frame
    last_offset: Option<f32>,
}

impl Gallery {
    pub fn show(
        &mut self,
        ui: &mut Ui,
        controller: &mut MediaController,
        textures: &mut TextureCache,
    ) {
        let total = controller.catalog().image_count();
        if total == 0 {
            ui.vertical_centered(|ui| {
                ui.add_space(20.0);
                ui.label(RichText::new(regular::IMAGE_BROKEN).size(32.0).weak());
                ui.label(RichText::new("No images").weak());
            });
            return;
        }

        show_counter(ui, controller);

        let carousel_rect = ui.available_rect_before_wrap();
        if handle_input(ui, controller, carousel_rect) {
            self.pending_scroll = Some(controller.position());
        }

        let item_size = carousel_rect.size();
        let scroll_target = self.pending_scroll.take();
        // a horizontal drag owns the input until it ends
        let claimed = controller.gesture().claims_input();
        let output = ScrollArea::horizontal()
            .id_salt("carousel")
            .auto_shrink([false, false])
            .drag_to_scroll(false)
            .animated(false)
            .enable_scrolling(!claimed)
            .scroll_bar_visibility(egui::scroll_area::ScrollBarVisibility::AlwaysHidden)
            .show(ui, |ui| {
                ui.spacing_mut().item_spacing = Vec2::ZERO;
                ui.horizontal(|ui| {
                    let mut spans = Vec::with_capacity(total);
                    for index in 0..total {
                        let (rect, _) = ui.allocate_exact_size(item_size, Sense::hover());
                        spans.push(Span::new(rect.left(), rect.right()));
                        if scroll_target == Some(index) {
                            ui.scroll_to_rect(rect, Some(Align::Min));
                        }
                        if ui.is_rect_visible(rect) {
                            show_item(ui, rect, index, controller, textures);
                        }
                    }
                    spans
                })
                .inner
            });

        let now = Instant::now();
        let offset = output.state.offset.x;
        if self.last_offset.is_some_and(|last| last != offset) && scroll_target.is_none() {
            controller.note_scroll(now);
        }
        self.last_offset = Some(offset);

        let container = Span::new(output.inner_rect.left(), output.inner_rect.right());
        if controller.settle_scroll(now, container, &output.inner) {
            log::debug!("Carousel settled on index {}", controller.position());
        }
        if let Some(remaining) = controller.scroll_settles_in(now) {
            ui.ctx().request_repaint_after(remaining);
        }
    }
}

fn show_counter(ui: &mut Ui, controller: &MediaController) {
    let total = controller.catalog().image_count();
    ui.horizontal(|ui| {
        if let Some(image) = controller.current_image() {
            ui.label(RichText::new(format!("{} {}", regular::HASH, image.display_number)).strong());
        }
        ui.with_layout(egui::Layout::right_to_left(Align::Center), |ui| {
            ui.label(
                RichText::new(format!("{} / {}", controller.position() + 1, total))
                    .monospace()
                    .weak(),
            );
        });
    });
}

/// Feed this frame's raw input into the controller. Returns true if the
/// carousel moved.
fn handle_input(ui: &Ui, controller: &mut MediaController, area: Rect) -> bool {
    let mut moved = false;

    let (events, left, right) = ui.input(|i| {
        (
            i.events.clone(),
            i.key_pressed(Key::ArrowLeft),
            i.key_pressed(Key::ArrowRight),
        )
    });
    if left {
        moved |= controller.navigate(Direction::Prev);
    }
    if right {
        moved |= controller.navigate(Direction::Next);
    }

    for event in &events {
        match event {
            egui::Event::Touch { phase, pos, .. } => match phase {
                TouchPhase::Start => {
                    if area.contains(*pos) {
                        controller.gesture_begin(GestureSource::Touch, pos.x, pos.y);
                    }
                }
                TouchPhase::Move => {
                    controller.gesture_update(GestureSource::Touch, pos.x, pos.y);
                }
                TouchPhase::End => {
                    moved |= controller.gesture_end(GestureSource::Touch, pos.x);
                }
                TouchPhase::Cancel => {
                    moved |= controller.gesture_leave(GestureSource::Touch);
                }
            },
            egui::Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                if *pressed {
                    if area.contains(*pos) {
                        controller.gesture_begin(GestureSource::Mouse, pos.x, pos.y);
                    }
                } else {
                    moved |= controller.gesture_end(GestureSource::Mouse, pos.x);
                }
            }
            egui::Event::PointerMoved(pos) => {
                if area.contains(*pos) {
                    controller.gesture_update(GestureSource::Mouse, pos.x, pos.y);
                } else {
                    moved |= controller.gesture_leave(GestureSource::Mouse);
                }
            }
            egui::Event::PointerGone => {
                moved |= controller.gesture_leave(GestureSource::Mouse);
            }
            _ => {}
        }
    }

    moved
}

fn show_item(
    ui: &mut Ui,
    rect: Rect,
    index: usize,
    controller: &mut MediaController,
    textures: &mut TextureCache,
) {
    let Some(image) = controller.catalog().image_at(index).cloned() else {
        return;
    };

    // follow the finger while a drag is in progress
    let drag = controller.gesture().drag_offset();
    let image_rect = if index == controller.position() {
        rect.translate(Vec2::new(drag, 0.0))
    } else {
        rect
    };

    match textures.get(ui.ctx(), &image) {
        Some(texture) => {
            ui.put(
                image_rect.shrink(8.0),
                egui::Image::from_texture(texture).max_size(image_rect.shrink(8.0).size()),
            );
        }
        None => paint_placeholder(ui, image_rect.shrink(8.0), &image),
    }

    paint_number(ui, image_rect, &image);

    if controller.has_playable_audio(image.file_index) {
        let playing = controller.is_image_playing(image.file_index);
        let icon = if playing { regular::PAUSE } else { regular::PLAY };
        let button_rect = Rect::from_center_size(
            image_rect.right_bottom() - Vec2::splat(PLAY_BUTTON_SIZE),
            Vec2::splat(PLAY_BUTTON_SIZE),
        );
        let button = Button::new(RichText::new(icon).size(28.0).color(Color32::WHITE))
            .fill(Color32::from_black_alpha(160))
            .corner_radius(CornerRadius::same((PLAY_BUTTON_SIZE / 2.0) as u8));
        let hover = if playing { "Pause" } else { "Play" };
        if ui.put(button_rect, button).on_hover_text(hover).clicked() {
            if let Some(outcome) = controller.play_audio_for_image(image.file_index) {
                log::debug!("Image {} play button: {:?}", image.file_index, outcome);
            }
        }
    }
}

fn paint_number(ui: &Ui, rect: Rect, image: &ImageRecord) {
    let label = match &image.arabic_number {
        Some(arabic) => format!("{}  {}", image.display_number, arabic),
        None => image.display_number.to_string(),
    };
    let painter = ui.painter();
    let galley = painter.layout_no_wrap(label, FontId::proportional(16.0), Color32::WHITE);
    let badge = Rect::from_min_size(rect.left_top() + Vec2::splat(16.0), galley.size())
        .expand(6.0);
    painter.rect_filled(badge, 6.0, Color32::from_black_alpha(160));
    painter.galley(badge.min + Vec2::splat(6.0), galley, Color32::WHITE);
}

fn paint_placeholder(ui: &Ui, rect: Rect, image: &ImageRecord) {
    let painter = ui.painter();
    painter.rect_stroke(
        rect,
        8.0,
        Stroke::new(1.0, ui.visuals().weak_text_color()),
        StrokeKind::Inside,
    );
    painter.text(
        rect.center(),
        Align2::CENTER_CENTER,
        format!("{} {}", regular::IMAGE_BROKEN, image.asset_path.display()),
        FontId::proportional(14.0),
        ui.visuals().weak_text_color(),
    );
}

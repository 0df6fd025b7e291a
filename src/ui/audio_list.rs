use egui::{Align, Button, Layout, RichText, ScrollArea, Ui};
use egui_phosphor::regular;

use crate::controller::MediaController;
use crate::media::{DurationLabel, DurationProbe};

/// Audio list component: every clip with its duration and a play button
#[derive(Debug, Default)]
pub struct AudioList;

impl AudioList {
    pub fn show(
        &mut self,
        ui: &mut Ui,
        controller: &mut MediaController,
        durations: &DurationProbe,
    ) {
        let mut clicked_ordinal = None;

        ui.vertical(|ui| {
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                ui.heading(format!("{} Audio", regular::MUSIC_NOTES));
                ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                    ui.label(RichText::new(controller.catalog().audio().len().to_string()).weak());
                });
            });
            ui.add_space(8.0);

            let audio = controller.catalog().audio();
            if audio.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.add_space(20.0);
                    ui.label(RichText::new(regular::FILE_DASHED).size(32.0).weak());
                    ui.add_space(8.0);
                    ui.label(RichText::new("No audio clips").weak());
                });
                return;
            }

            let active = controller.state().active_ordinal;
            let row_height = 40.0;
            ScrollArea::vertical().auto_shrink([false, true]).show_rows(
                ui,
                row_height,
                audio.len(),
                |ui, row_range| {
                    for clip in audio.iter().skip(row_range.start).take(row_range.len()) {
                        let is_active = active == Some(clip.ordinal);
                        let is_playing = controller.is_ordinal_playing(clip.ordinal);

                        let row_width = ui.available_width();
                        let (id, rect) = ui.allocate_space(egui::vec2(row_width, row_height));
                        let response = ui.interact(rect, id, egui::Sense::click());

                        let painter = ui.painter();
                        if response.hovered() || is_active {
                            let bg_color = if is_active {
                                ui.visuals().selection.bg_fill
                            } else {
                                ui.visuals().widgets.hovered.bg_fill.gamma_multiply(0.3)
                            };
                            painter.rect_filled(rect, 4.0, bg_color);
                        }

                        let ui_builder = egui::UiBuilder::new()
                            .max_rect(rect)
                            .layout(Layout::left_to_right(Align::Center));
                        ui.scope_builder(ui_builder, |ui| {
                            ui.add_space(8.0);

                            let icon = if is_playing { regular::PAUSE } else { regular::PLAY };
                            let play_btn = Button::new(RichText::new(icon).size(18.0)).frame(false);
                            let hover = if is_playing { "Pause" } else { "Play" };
                            if ui.add(play_btn).on_hover_text(hover).clicked() {
                                clicked_ordinal = Some(clip.ordinal);
                            }

                            ui.style_mut().wrap_mode = Some(egui::TextWrapMode::Truncate);
                            let text_color = if is_active {
                                ui.visuals().selection.stroke.color
                            } else {
                                ui.visuals().widgets.inactive.text_color()
                            };
                            ui.label(RichText::new(&clip.display_name).color(text_color));

                            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                                ui.add_space(8.0);
                                let label = durations.label(clip.ordinal);
                                let text = RichText::new(label.text()).monospace();
                                let text = match label {
                                    DurationLabel::Known(_) => text,
                                    DurationLabel::Loading | DurationLabel::Unavailable => {
                                        text.weak()
                                    }
                                };
                                ui.label(text);
                            });
                        });

                        if response.clicked() {
                            clicked_ordinal = Some(clip.ordinal);
                        }
                        response.on_hover_text(&clip.file_name);
                    }
                },
            );
        });

        // Process actions outside the UI loops
        if let Some(ordinal) = clicked_ordinal {
            if let Some(outcome) = controller.play_listed_audio(ordinal) {
                log::debug!("Audio list clip {ordinal}: {outcome:?}");
            }
        }
    }
}

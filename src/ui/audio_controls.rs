use egui::{widgets::Slider, Align, Color32, CornerRadius, Frame, Layout, ProgressBar, RichText, Ui};
use egui_phosphor::regular;

use crate::controller::MediaController;

/// Player bar shown once any clip has been loaded
#[derive(Debug, Default)]
pub struct AudioControls {
    /// Volume to restore when unmuting
    muted_volume: Option<f32>,
}

impl AudioControls {
    pub fn show(&mut self, ui: &mut Ui, controller: &mut MediaController) {
        let is_playing = controller.playback().is_playing();
        let title = controller.title();

        Frame::new()
            .inner_margin(8.0)
            .fill(ui.visuals().window_fill)
            .corner_radius(CornerRadius::same(6))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    // Play/pause button with phosphor icons
                    let (play_icon, play_color) = if is_playing {
                        (regular::PAUSE_CIRCLE, Color32::from_rgb(255, 200, 100))
                    } else {
                        (regular::PLAY_CIRCLE, Color32::from_rgb(100, 255, 150))
                    };
                    let rich_text = RichText::new(play_icon).size(28.0).color(play_color);
                    if ui.add(egui::Button::new(rich_text).frame(false)).clicked() {
                        controller.toggle();
                    }

                    match &title {
                        Some(title) => ui.label(
                            RichText::new(title)
                                .color(ui.visuals().strong_text_color())
                                .size(16.0),
                        ),
                        None => ui.label(
                            RichText::new("No audio loaded").color(ui.visuals().weak_text_color()),
                        ),
                    };

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        self.show_volume(ui, controller);
                        if !controller.playback().has_output() {
                            ui.label(
                                RichText::new(format!("{} No audio device", regular::WARNING))
                                    .color(ui.visuals().warn_fg_color),
                            )
                            .on_hover_text("Playback state is tracked but nothing is heard");
                        }
                    });
                });

                ui.add_space(4.0);

                let playback = controller.playback();
                ui.horizontal(|ui| {
                    ui.label(RichText::new(playback.format_position()).monospace().size(14.0));
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(playback.format_duration()).monospace().size(14.0));
                        ui.add(
                            ProgressBar::new(playback.progress())
                                .desired_height(6.0)
                                .desired_width(ui.available_width()),
                        );
                    });
                });
            });
    }

    fn show_volume(&mut self, ui: &mut Ui, controller: &mut MediaController) {
        let volume = controller.playback().volume();

        // right to left: slider first, speaker button second
        let mut percent = volume * 100.0;
        let slider_response = ui
            .scope(|ui| {
                ui.spacing_mut().slider_width = 90.0;
                ui.add(Slider::new(&mut percent, 0.0..=100.0).show_value(false))
            })
            .inner;
        if slider_response.changed() {
            self.muted_volume = None;
            controller.playback_mut().set_volume(percent / 100.0);
        }

        let volume_icon = if volume <= 0.0 {
            regular::SPEAKER_NONE
        } else if volume < 0.33 {
            regular::SPEAKER_LOW
        } else {
            regular::SPEAKER_HIGH
        };
        let volume_color = if volume <= 0.0 {
            Color32::from_gray(150)
        } else {
            Color32::from_rgb(100, 150, 255)
        };
        let button = egui::Button::new(RichText::new(volume_icon).size(16.0).color(volume_color));
        if ui.add(button).clicked() {
            match self.muted_volume.take() {
                Some(previous) => controller.playback_mut().set_volume(previous),
                None => {
                    self.muted_volume = Some(volume);
                    controller.playback_mut().set_volume(0.0);
                }
            }
        }
    }
}

use std::path::PathBuf;

use egui::{Context, RichText, ViewportCommand};
use egui_phosphor::regular;
use serde::{Deserialize, Serialize};

/// Central view shown below the menu bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub enum Tab {
    #[default]
    Gallery,
    Audio,
}

/// What the user asked for from the menu this frame
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TopPanelAction {
    None,
    OpenAssets(PathBuf),
}

/// Top menu panel component
#[derive(Debug, Default)]
pub struct TopPanel {
    about_open: bool,
}

impl TopPanel {
    /// Display the menu bar and the view tabs
    pub fn show(&mut self, ctx: &Context, active_tab: &mut Tab) -> TopPanelAction {
        let mut action = TopPanelAction::None;

        if self.about_open {
            egui::Window::new("About Durood Viewer")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .open(&mut self.about_open)
                .show(ctx, |ui| {
                    ui.label("Durood Viewer\n\nSwipe through the durood screens and listen to their recitations.");
                    ui.add_space(8.0);
                    ui.label(
                        RichText::new("Drag, swipe or use the arrow keys to change screens.").weak(),
                    );
                });
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            egui::MenuBar::new().ui(ui, |ui| {
                ui.menu_button("File", |ui| {
                    if ui
                        .button(format!("{} Open assets folder…", regular::FOLDER_OPEN))
                        .clicked()
                    {
                        ui.close();
                        if let Some(dir) = rfd::FileDialog::new()
                            .set_title("Select Assets Folder")
                            .pick_folder()
                        {
                            action = TopPanelAction::OpenAssets(dir);
                        }
                    }
                    ui.separator();
                    if ui.button("Quit").clicked() {
                        ui.ctx().send_viewport_cmd(ViewportCommand::Close);
                    }
                });

                ui.menu_button("Help", |ui| {
                    if ui.button("About").clicked() {
                        self.about_open = true;
                        ui.close();
                    }
                });

                ui.separator();
                ui.selectable_value(
                    active_tab,
                    Tab::Gallery,
                    format!("{} Gallery", regular::IMAGES),
                );
                ui.selectable_value(
                    active_tab,
                    Tab::Audio,
                    format!("{} Audio", regular::MUSIC_NOTES),
                );
            });
        });

        action
    }
}

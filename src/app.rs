use std::path::Path;
use std::time::Duration;

use crate::config::ViewerConfig;
use crate::controller::MediaController;
use crate::media::{DurationProbe, MappingLoader, MediaCatalog};
use crate::player::PlaybackController;
use crate::ui::{AudioList, AudioControls, Gallery, Tab, TextureCache, TopPanel, TopPanelAction};

/// State that survives restarts.
/// We derive Deserialize/Serialize so we can persist it on shutdown.
#[derive(Debug, serde::Deserialize, serde::Serialize)]
#[serde(default)] // if we add new fields, give them default values when deserializing old state
struct ViewerPrefs {
    active_tab: Tab,
    /// Last volume the user picked, overrides the configured one
    volume: Option<f32>,
}

impl Default for ViewerPrefs {
    fn default() -> Self {
        Self {
            active_tab: Tab::Gallery,
            volume: None,
        }
    }
}

/// A loaded session: catalog, playback and carousel position
struct Session {
    controller: MediaController,
    durations: DurationProbe,
}

impl Session {
    /// Build the catalog right away. The mapping is applied only if it
    /// settles within `mapping_wait_ms`, otherwise the default rule is used.
    fn start(config: &ViewerConfig, volume: f32) -> Self {
        log::info!("Loading mapping from {}", config.mapping_source);
        let mapping = MappingLoader::resolve_within(
            config.mapping_source.clone(),
            config.total_images,
            Duration::from_millis(config.mapping_wait_ms),
        );
        let catalog = MediaCatalog::build(config, &mapping);
        let playback = PlaybackController::new(volume);
        let durations = DurationProbe::spawn(catalog.audio());
        Self {
            controller: MediaController::new(config, catalog, playback),
            durations,
        }
    }
}

pub struct ViewerApp {
    config: ViewerConfig,
    prefs: ViewerPrefs,
    session: Session,
    top_panel: TopPanel,
    gallery: Gallery,
    audio_list: AudioList,
    audio_controls: AudioControls,
    textures: TextureCache,
}

impl ViewerApp {
    /// Called once before the first frame.
    pub fn new(cc: &eframe::CreationContext<'_>, config: ViewerConfig) -> Self {
        cc.egui_ctx.set_visuals(egui::Visuals::dark());

        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        // Load previous preferences (if any).
        // Note that you must enable the `persistence` feature for this to work.
        let prefs: ViewerPrefs = cc
            .storage
            .and_then(|storage| eframe::get_value(storage, eframe::APP_KEY))
            .unwrap_or_default();

        let session = Session::start(&config, prefs.volume.unwrap_or(config.volume));
        Self {
            config,
            prefs,
            session,
            top_panel: TopPanel::default(),
            gallery: Gallery::default(),
            audio_list: AudioList::default(),
            audio_controls: AudioControls::default(),
            textures: TextureCache::default(),
        }
    }

    /// Switch to another assets folder, dropping the current session
    fn open_assets(&mut self, root: &Path) {
        log::info!("Opening assets folder {}", root.display());
        let volume = self.session.controller.playback().volume();
        self.prefs.volume = Some(volume);
        self.session.controller.pause();
        self.config = self.config.clone().with_assets_root(root);
        self.textures.clear();
        self.gallery = Gallery::default();
        self.session = Session::start(&self.config, volume);
    }
}

impl eframe::App for ViewerApp {
    /// Called by the frame work to save state before shutdown.
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        self.prefs.volume = Some(self.session.controller.playback().volume());
        eframe::set_value(storage, eframe::APP_KEY, &self.prefs);
    }

    /// Called each time the UI needs repainting, which may be many times per second.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        match self.top_panel.show(ctx, &mut self.prefs.active_tab) {
            TopPanelAction::OpenAssets(root) => self.open_assets(&root),
            TopPanelAction::None => {}
        }

        let session = &mut self.session;
        if session.durations.poll() {
            ctx.request_repaint();
        }
        if !session.durations.is_finished() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        if session.controller.poll_backend() {
            log::debug!("Clip finished");
        }
        if session.controller.playback().is_playing() {
            // keep the progress bar moving
            ctx.request_repaint();
        }

        if session.controller.playback().has_loaded_audio() {
            egui::TopBottomPanel::bottom("player_bar").show(ctx, |ui| {
                self.audio_controls.show(ui, &mut session.controller);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match self.prefs.active_tab {
            Tab::Gallery => self
                .gallery
                .show(ui, &mut session.controller, &mut self.textures),
            Tab::Audio => self
                .audio_list
                .show(ui, &mut session.controller, &session.durations),
        });
    }
}

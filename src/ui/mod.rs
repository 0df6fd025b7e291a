// UI component modules
mod audio_controls;
mod audio_list;
mod gallery;
mod texture_cache;
mod top_panel;

pub use audio_controls::AudioControls;
pub use audio_list::AudioList;
pub use gallery::Gallery;
pub use texture_cache::TextureCache;
pub use top_panel::{Tab, TopPanel, TopPanelAction};

use std::path::PathBuf;

use super::mapping::{MappingEntry, MappingTable};
use crate::config::ViewerConfig;

/// A carousel image
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageRecord {
    /// 1-based asset number
    pub file_index: u32,
    /// Number shown to the user
    pub display_number: u32,
    pub has_audio: bool,
    pub audio_file_name: Option<String>,
    pub arabic_number: Option<String>,
    pub asset_path: PathBuf,
}

/// A playable audio clip
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AudioRecord {
    /// 1-based position in the combined standard + special list
    pub ordinal: u32,
    pub display_name: String,
    pub file_name: String,
    pub asset_path: PathBuf,
}

/// Images and audio clips for one session. Immutable once built.
#[derive(Debug, Clone, Default)]
pub struct MediaCatalog {
    images: Vec<ImageRecord>,
    audio: Vec<AudioRecord>,
}

impl MediaCatalog {
    /// Build the catalog from `config`, applying `mapping` to the images.
    pub fn build(config: &ViewerConfig, mapping: &MappingTable) -> Self {
        let images = build_images(config, mapping);
        let audio = build_audio(config);
        log::info!(
            "Catalog ready: {} images, {} audio clips ({} mapping)",
            images.len(),
            audio.len(),
            if mapping.is_fallback() { "default" } else { "loaded" }
        );
        Self { images, audio }
    }

    pub fn images(&self) -> &[ImageRecord] {
        &self.images
    }

    pub fn audio(&self) -> &[AudioRecord] {
        &self.audio
    }

    pub fn image_count(&self) -> usize {
        self.images.len()
    }

    /// Image at carousel position `index`
    pub fn image_at(&self, index: usize) -> Option<&ImageRecord> {
        self.images.get(index)
    }

    pub fn image(&self, file_index: u32) -> Option<&ImageRecord> {
        self.images.iter().find(|img| img.file_index == file_index)
    }

    pub fn audio_by_ordinal(&self, ordinal: u32) -> Option<&AudioRecord> {
        self.audio.iter().find(|a| a.ordinal == ordinal)
    }

    pub fn audio_by_file_name(&self, file_name: &str) -> Option<&AudioRecord> {
        self.audio.iter().find(|a| a.file_name == file_name)
    }

    /// Audio clip bound to the image with `file_index`, if any
    pub fn audio_for_image(&self, file_index: u32) -> Option<&AudioRecord> {
        let image = self.image(file_index)?;
        if !image.has_audio {
            return None;
        }
        let file_name = image.audio_file_name.as_deref()?;
        self.audio_by_file_name(file_name)
    }
}

fn build_images(config: &ViewerConfig, mapping: &MappingTable) -> Vec<ImageRecord> {
    (1..=config.total_images)
        .map(|file_index| {
            let entry = match mapping.resolve(file_index) {
                Some(entry) => entry.clone(),
                None => {
                    if !mapping.is_fallback() {
                        log::debug!("Image {file_index} missing from mapping, using default rule");
                    }
                    MappingEntry::default_for(file_index)
                }
            };
            let audio_file_name = entry.audio().map(str::to_owned);
            ImageRecord {
                file_index,
                display_number: entry.display_number,
                has_audio: audio_file_name.is_some(),
                audio_file_name,
                arabic_number: entry.arabic_number,
                asset_path: config.image_path(file_index),
            }
        })
        .collect()
}

fn build_audio(config: &ViewerConfig) -> Vec<AudioRecord> {
    let standard = (1..=config.total_audio).map(|n| {
        let file_name = format!("{n:02}.mp3");
        AudioRecord {
            ordinal: n,
            display_name: format!("{} {}", config.title_prefix, n),
            asset_path: config.audio_file_path(&file_name),
            file_name,
        }
    });

    let special = config
        .special_audio
        .iter()
        .zip(config.total_audio + 1..)
        .map(|(special, ordinal)| AudioRecord {
            ordinal,
            display_name: special.display_name.clone(),
            file_name: special.file_name.clone(),
            asset_path: config.audio_file_path(&special.file_name),
        });

    standard.chain(special).collect()
}

//! Image to audio mapping table.
//!
//! The table is either loaded from a JSON file (local path or HTTP URL) or
//! synthesized from the default rule: the first [`SILENT_LEADING_IMAGES`]
//! images carry no audio and image `i` plays clip `i - 3` after that.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ViewerError};

/// Number of leading images without audio under the default rule
pub const SILENT_LEADING_IMAGES: u32 = 3;

/// One record of the mapping file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingEntry {
    /// Asset number, matches the `screen_<n>.png` suffix
    pub file_index: u32,
    /// Number shown to the user, may differ from `file_index`
    #[serde(rename = "imageNumber", alias = "displayNumber")]
    pub display_number: u32,
    #[serde(default)]
    pub audio_file: Option<String>,
    #[serde(default)]
    pub has_audio: bool,
    #[serde(default)]
    pub arabic_number: Option<String>,
    /// Carried for completeness, playback ignores it
    #[serde(default)]
    pub contains_multiple: bool,
    /// Carried for completeness, playback ignores it
    #[serde(default)]
    pub numbers: Vec<serde_json::Value>,
}

impl MappingEntry {
    /// Entry produced by the default rule for `file_index`
    pub fn default_for(file_index: u32) -> Self {
        let audio_file = default_audio_file_name(file_index);
        Self {
            file_index,
            display_number: file_index,
            has_audio: audio_file.is_some(),
            audio_file,
            arabic_number: None,
            contains_multiple: false,
            numbers: Vec::new(),
        }
    }

    /// Audio file name, only when the entry claims audio and names a file
    pub fn audio(&self) -> Option<&str> {
        if self.has_audio {
            self.audio_file.as_deref().filter(|name| !name.is_empty())
        } else {
            None
        }
    }
}

/// Audio file name the default rule assigns to `file_index`.
pub fn default_audio_file_name(file_index: u32) -> Option<String> {
    if file_index <= SILENT_LEADING_IMAGES {
        return None;
    }
    Some(format!("{:02}.mp3", file_index - SILENT_LEADING_IMAGES))
}

/// Where a mapping table came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MappingOrigin {
    Loaded,
    Fallback,
}

/// Ordered mapping table, looked up linearly by `file_index`
#[derive(Debug, Clone, PartialEq)]
pub struct MappingTable {
    entries: Vec<MappingEntry>,
    origin: MappingOrigin,
}

impl MappingTable {
    /// Table synthesized from the default rule for images `1..=total_images`
    pub fn fallback(total_images: u32) -> Self {
        Self {
            entries: (1..=total_images).map(MappingEntry::default_for).collect(),
            origin: MappingOrigin::Fallback,
        }
    }

    /// Parse a mapping from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a JSON array of mapping records.
    pub fn from_json_str(text: &str) -> Result<Self> {
        let entries: Vec<MappingEntry> = serde_json::from_str(text)?;
        Ok(Self {
            entries,
            origin: MappingOrigin::Loaded,
        })
    }

    /// Load a mapping from a local path or an `http(s)://` URL.
    ///
    /// # Errors
    ///
    /// Returns an error on IO or network failure, non-success HTTP status, or
    /// malformed JSON.
    pub fn load(source: &str) -> Result<Self> {
        if is_remote(source) {
            let client = reqwest::blocking::Client::builder()
                .build()
                .map_err(|e| ViewerError::Network {
                    url: source.to_owned(),
                    reason: e.to_string(),
                })?;
            return Self::load_with(&client, source);
        }
        Self::from_json_str(&std::fs::read_to_string(source)?)
    }

    /// [`Self::load`] with a caller supplied HTTP client for remote sources.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with(client: &reqwest::blocking::Client, source: &str) -> Result<Self> {
        let text = if is_remote(source) {
            fetch_remote(client, source)?
        } else {
            std::fs::read_to_string(source)?
        };
        Self::from_json_str(&text)
    }

    /// Load `source`, synthesizing the default table on any failure.
    pub fn load_or_fallback(source: &str, total_images: u32) -> Self {
        match Self::load(source) {
            Ok(table) => {
                log::info!(
                    "Loaded image mapping from {} ({} entries)",
                    source,
                    table.entries.len()
                );
                table
            }
            Err(e) => {
                log::warn!("Mapping unavailable ({e}), using default mapping");
                Self::fallback(total_images)
            }
        }
    }

    /// First entry whose `file_index` equals `file_index`
    pub fn resolve(&self, file_index: u32) -> Option<&MappingEntry> {
        self.entries.iter().find(|e| e.file_index == file_index)
    }

    pub fn origin(&self) -> MappingOrigin {
        self.origin
    }

    pub fn is_fallback(&self) -> bool {
        self.origin == MappingOrigin::Fallback
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}

fn fetch_remote(client: &reqwest::blocking::Client, url: &str) -> Result<String> {
    let network_error = |e: reqwest::Error| ViewerError::Network {
        url: url.to_owned(),
        reason: e.to_string(),
    };

    let response = client.get(url).send().map_err(network_error)?;

    if !response.status().is_success() {
        return Err(ViewerError::HttpStatus {
            url: url.to_owned(),
            status: response.status().as_u16(),
        });
    }

    response.text().map_err(network_error)
}

//! Media catalog: images, audio clips and the mapping that binds them.

pub mod catalog;
pub mod duration_probe;
pub mod mapping;
pub mod mapping_loader;

// Re-export main types
pub use catalog::{AudioRecord, ImageRecord, MediaCatalog};
pub use duration_probe::{DurationLabel, DurationProbe, format_time};
pub use mapping::{MappingEntry, MappingTable};
pub use mapping_loader::MappingLoader;

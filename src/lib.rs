#![warn(clippy::all, rust_2018_idioms)]

mod app;
pub mod carousel;
pub mod config;
pub mod controller;
pub mod error;
pub mod media;
pub mod player;
mod ui;

#[cfg(test)]
mod tests;

pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use controller::MediaController;
pub use error::ViewerError;

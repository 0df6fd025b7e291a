//! Carousel position and the input recognizers that move it.

pub mod gesture;
pub mod navigator;
pub mod scroll;

pub use gesture::{GestureSource, SwipeGesture};
pub use navigator::{CarouselNavigator, Direction};
pub use scroll::{ScrollDebouncer, Span, visible_index};

//! Swipe and drag recognition.
//!
//! Touch and mouse share one recognizer. A gesture first has to move past the
//! drag slop to count as a drag at all; on release, a horizontal travel longer
//! than the swipe threshold turns into exactly one carousel step.

use super::navigator::Direction;

/// Input device a gesture comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureSource {
    Touch,
    Mouse,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct ActiveGesture {
    source: GestureSource,
    start_x: f32,
    start_y: f32,
    last_x: f32,
    dragging: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SwipeGesture {
    threshold: f32,
    slop: f32,
    active: Option<ActiveGesture>,
}

impl SwipeGesture {
    pub fn new(threshold: f32, slop: f32) -> Self {
        Self {
            threshold,
            slop,
            active: None,
        }
    }

    /// Finger down or mouse button pressed. A gesture from the other source
    /// in progress wins.
    pub fn begin(&mut self, source: GestureSource, x: f32, y: f32) {
        if self.active.is_some_and(|g| g.source != source) {
            return;
        }
        self.active = Some(ActiveGesture {
            source,
            start_x: x,
            start_y: y,
            last_x: x,
            dragging: false,
        });
    }

    /// Finger or mouse moved
    pub fn update(&mut self, source: GestureSource, x: f32, y: f32) {
        let slop = self.slop;
        let Some(gesture) = self.active.as_mut().filter(|g| g.source == source) else {
            return;
        };
        gesture.last_x = x;
        if gesture.dragging {
            return;
        }

        let dx = (gesture.start_x - x).abs();
        let dy = (gesture.start_y - y).abs();
        gesture.dragging = match source {
            // vertical scrolling keeps the touch until horizontal travel dominates
            GestureSource::Touch => dx > slop && dx > dy,
            GestureSource::Mouse => dx > slop,
        };
    }

    /// Finger lifted or mouse button released at `x`
    pub fn end(&mut self, source: GestureSource, x: f32) -> Option<Direction> {
        let gesture = self.active.filter(|g| g.source == source)?;
        self.active = None;
        if !gesture.dragging {
            return None;
        }

        let diff = gesture.start_x - x;
        if diff.abs() <= self.threshold {
            return None;
        }
        // finger travelling right to left brings the next image in
        Some(if diff > 0.0 {
            Direction::Next
        } else {
            Direction::Prev
        })
    }

    /// Pointer left the carousel mid-drag: ends the gesture at the last known position
    pub fn leave(&mut self, source: GestureSource) -> Option<Direction> {
        let last_x = self.active.filter(|g| g.source == source)?.last_x;
        self.end(source, last_x)
    }

    /// Whether a horizontal drag owns the input, so default scrolling should be suppressed
    pub fn claims_input(&self) -> bool {
        self.active.is_some_and(|g| g.dragging)
    }

    /// Horizontal offset of the drag in progress, for visual feedback
    pub fn drag_offset(&self) -> f32 {
        match self.active {
            Some(g) if g.dragging => g.last_x - g.start_x,
            _ => 0.0,
        }
    }
}

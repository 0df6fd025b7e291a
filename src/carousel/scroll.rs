use std::time::{Duration, Instant};

/// Fires once after scrolling has been idle for `delay`
#[derive(Debug, Clone)]
pub struct ScrollDebouncer {
    delay: Duration,
    last_scroll: Option<Instant>,
}

impl ScrollDebouncer {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            last_scroll: None,
        }
    }

    /// Record scroll activity at `now`, restarting the quiet period
    pub fn note_scroll(&mut self, now: Instant) {
        self.last_scroll = Some(now);
    }

    /// True exactly once per burst, when the quiet period has elapsed
    pub fn poll(&mut self, now: Instant) -> bool {
        match self.last_scroll {
            Some(at) if now.saturating_duration_since(at) >= self.delay => {
                self.last_scroll = None;
                true
            }
            _ => false,
        }
    }

    /// Time left until [`Self::poll`] fires, for scheduling a repaint
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.last_scroll
            .map(|at| self.delay.saturating_sub(now.saturating_duration_since(at)))
    }
}

/// Horizontal extent of a laid out item or viewport
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Span {
    pub left: f32,
    pub right: f32,
}

impl Span {
    pub fn new(left: f32, right: f32) -> Self {
        Self { left, right }
    }

    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    fn center(&self) -> f32 {
        (self.left + self.right) / 2.0
    }
}

/// Index of the item that mostly occupies `container`.
///
/// An item qualifies when it sticks out of the container by at most half its
/// width on either side. When several qualify, the one closest to the
/// container's center wins.
pub fn visible_index(container: Span, items: &[Span]) -> Option<usize> {
    let container_center = container.center();
    items
        .iter()
        .enumerate()
        .filter(|(_, item)| {
            let half = item.width() / 2.0;
            item.left >= container.left - half && item.right <= container.right + half
        })
        .min_by(|(_, a), (_, b)| {
            let da = (a.center() - container_center).abs();
            let db = (b.center() - container_center).abs();
            da.total_cmp(&db)
        })
        .map(|(index, _)| index)
}

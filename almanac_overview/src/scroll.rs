// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scrollable content areas.

/// A horizontally scrollable content area.
///
/// Widths and offsets are in the host's layout units. Implementations clamp
/// [`set_scroll_left`](Self::set_scroll_left) the way the host's scroll container does.
pub trait ScrollArea {
    /// Full width of the scrollable content.
    fn scroll_width(&self) -> f64;

    /// Width of the visible part of the content.
    fn client_width(&self) -> f64;

    /// Current horizontal scroll offset.
    fn scroll_left(&self) -> f64;

    /// Scrolls to `left`.
    fn set_scroll_left(&mut self, left: f64);
}

/// An in-memory [`ScrollArea`] that clamps offsets to `0..=scroll_width - client_width`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    scroll_width: f64,
    client_width: f64,
    scroll_left: f64,
}

impl ScrollState {
    /// Creates a scroll area scrolled to the start.
    pub fn new(scroll_width: f64, client_width: f64) -> Self {
        Self {
            scroll_width,
            client_width,
            scroll_left: 0.0,
        }
    }

    /// Returns a copy scrolled to `left`.
    pub fn with_scroll_left(mut self, left: f64) -> Self {
        self.set_scroll_left(left);
        self
    }

    /// Largest reachable scroll offset.
    pub fn max_scroll_left(&self) -> f64 {
        (self.scroll_width - self.client_width).max(0.0)
    }

    /// Changes the content and viewport widths, re-clamping the current offset.
    pub fn resize(&mut self, scroll_width: f64, client_width: f64) {
        self.scroll_width = scroll_width;
        self.client_width = client_width;
        self.set_scroll_left(self.scroll_left);
    }
}

impl ScrollArea for ScrollState {
    fn scroll_width(&self) -> f64 {
        self.scroll_width
    }

    fn client_width(&self) -> f64 {
        self.client_width
    }

    fn scroll_left(&self) -> f64 {
        self.scroll_left
    }

    fn set_scroll_left(&mut self, left: f64) {
        self.scroll_left = if left.is_nan() {
            0.0
        } else {
            left.clamp(0.0, self.max_scroll_left())
        };
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn offsets_are_clamped_to_the_content() {
        let mut area = ScrollState::new(2400.0, 240.0);
        area.set_scroll_left(-5.0);
        assert_eq!(area.scroll_left(), 0.0);
        area.set_scroll_left(5000.0);
        assert_eq!(area.scroll_left(), 2160.0);
        area.set_scroll_left(f64::NAN);
        assert_eq!(area.scroll_left(), 0.0);
    }

    #[test]
    fn resize_reclamps_the_offset() {
        let mut area = ScrollState::new(2400.0, 240.0).with_scroll_left(2000.0);
        area.resize(1200.0, 240.0);
        assert_eq!(area.scroll_left(), 960.0);
        area.resize(200.0, 240.0);
        assert_eq!(area.scroll_left(), 0.0);
        assert_eq!(area.max_scroll_left(), 0.0);
    }
}

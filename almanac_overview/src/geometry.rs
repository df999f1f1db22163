// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Handle geometry.
//!
//! The handle stands for the visible part of the content: its width is the visible fraction
//! of the wrapper, and its travel `0..=max_handle_x` maps linearly onto the scroll travel
//! `0..=max_scroll`.

use kurbo::Rect;

use crate::scroll::ScrollArea;

/// Smallest handle width, so the handle stays grabbable on long content.
pub const MIN_HANDLE_WIDTH: f64 = 40.0;

/// Navigator settings.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NavigatorConfig {
    /// Smallest handle width in wrapper units.
    pub min_handle_width: f64,
}

impl Default for NavigatorConfig {
    fn default() -> Self {
        Self {
            min_handle_width: MIN_HANDLE_WIDTH,
        }
    }
}

impl NavigatorConfig {
    /// Sets the smallest handle width.
    pub fn with_min_handle_width(mut self, width: f64) -> Self {
        self.min_handle_width = width;
        self
    }
}

/// A snapshot of a scroll area's geometry.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    /// Full content width.
    pub total_width: f64,
    /// Visible width.
    pub visible_width: f64,
    /// Current scroll offset.
    pub scroll_offset: f64,
}

impl ScrollMetrics {
    /// Reads the current geometry of `area`.
    pub fn read(area: &(impl ScrollArea + ?Sized)) -> Self {
        Self {
            total_width: area.scroll_width(),
            visible_width: area.client_width(),
            scroll_offset: area.scroll_left(),
        }
    }
}

/// Handle size and position for a given scroll state and wrapper width.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HandleGeometry {
    /// Visible fraction of the content, in `0..=1`.
    pub ratio: f64,
    /// Handle width in wrapper units.
    pub handle_width: f64,
    /// Handle offset from the wrapper's left edge.
    pub handle_left: f64,
    /// Largest handle offset.
    pub max_handle_x: f64,
    /// Largest scroll offset.
    pub max_scroll: f64,
}

impl HandleGeometry {
    /// Computes the handle for `metrics` inside a wrapper `wrapper_width` wide.
    pub fn compute(metrics: ScrollMetrics, wrapper_width: f64, config: &NavigatorConfig) -> Self {
        let ScrollMetrics {
            total_width,
            visible_width,
            scroll_offset,
        } = metrics;
        let ratio = if total_width > 0.0 {
            (visible_width / total_width).min(1.0)
        } else {
            1.0
        };
        let handle_width = (ratio * wrapper_width).max(config.min_handle_width);
        let max_handle_x = (wrapper_width - handle_width).max(0.0);
        let max_scroll = (total_width - visible_width).max(0.0);
        let handle_left = if max_scroll > 0.0 {
            (scroll_offset / max_scroll).clamp(0.0, 1.0) * max_handle_x
        } else {
            0.0
        };
        Self {
            ratio,
            handle_width,
            handle_left,
            max_handle_x,
            max_scroll,
        }
    }

    /// Returns `true` if wrapper position `x` falls on the handle (edges included).
    pub fn contains(&self, x: f64) -> bool {
        x >= self.handle_left && x <= self.handle_left + self.handle_width
    }

    /// Clamps a handle offset to the handle's travel.
    pub fn clamp_left(&self, left: f64) -> f64 {
        left.clamp(0.0, self.max_handle_x)
    }

    /// Scroll offset corresponding to handle offset `left`.
    pub fn scroll_for_left(&self, left: f64) -> f64 {
        let ratio = if self.max_handle_x > 0.0 {
            left / self.max_handle_x
        } else {
            0.0
        };
        ratio * self.max_scroll
    }

    /// The handle as a rectangle `height` tall.
    pub fn rect(&self, height: f64) -> Rect {
        Rect::new(
            self.handle_left,
            0.0,
            self.handle_left + self.handle_width,
            height,
        )
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn metrics(total_width: f64, visible_width: f64, scroll_offset: f64) -> ScrollMetrics {
        ScrollMetrics {
            total_width,
            visible_width,
            scroll_offset,
        }
    }

    #[test]
    fn reference_scenario() {
        let g = HandleGeometry::compute(
            metrics(2400.0, 240.0, 1080.0),
            300.0,
            &NavigatorConfig::default(),
        );
        assert_eq!(g.ratio, 0.1);
        assert_eq!(g.handle_width, 40.0);
        assert_eq!(g.max_handle_x, 260.0);
        assert_eq!(g.max_scroll, 2160.0);
        assert_eq!(g.handle_left, 130.0);
        assert_eq!(g.rect(24.0), Rect::new(130.0, 0.0, 170.0, 24.0));
    }

    #[test]
    fn handle_stays_inside_the_wrapper() {
        let config = NavigatorConfig::default();
        for total in [0.0, 100.0, 240.0, 800.0, 2400.0, 10_000.0] {
            for wrapper in [20.0, 40.0, 300.0, 1000.0] {
                for step in 0..=20 {
                    let scroll = f64::from(step) * total / 10.0 - 50.0;
                    let g = HandleGeometry::compute(metrics(total, 240.0, scroll), wrapper, &config);
                    assert!(g.handle_width >= 40.0, "{g:?}");
                    assert!(g.handle_left >= 0.0, "{g:?}");
                    assert!(g.handle_left <= g.max_handle_x, "{g:?}");
                    assert!(g.max_handle_x <= (wrapper - 40.0).max(0.0), "{g:?}");
                }
            }
        }
    }

    #[test]
    fn content_that_fits_fills_the_wrapper() {
        let g = HandleGeometry::compute(
            metrics(200.0, 240.0, 0.0),
            300.0,
            &NavigatorConfig::default(),
        );
        assert_eq!(g.ratio, 1.0);
        assert_eq!(g.handle_width, 300.0);
        assert_eq!(g.max_scroll, 0.0);
        assert_eq!(g.handle_left, 0.0);
        assert_eq!(g.scroll_for_left(10.0), 0.0);

        let empty = HandleGeometry::compute(metrics(0.0, 0.0, 0.0), 300.0, &NavigatorConfig::default());
        assert_eq!(empty.ratio, 1.0);
    }

    #[test]
    fn scroll_handle_scroll_round_trip() {
        let config = NavigatorConfig::default();
        for k in 0..=2160 {
            let scroll = f64::from(k);
            let g = HandleGeometry::compute(metrics(2400.0, 240.0, scroll), 300.0, &config);
            let back = g.scroll_for_left(g.handle_left);
            assert!((back - scroll).abs() < 1e-9, "{scroll} -> {back}");
        }
    }

    #[test]
    fn min_handle_width_is_configurable() {
        let config = NavigatorConfig::default().with_min_handle_width(60.0);
        let g = HandleGeometry::compute(metrics(2400.0, 240.0, 0.0), 300.0, &config);
        assert_eq!(g.handle_width, 60.0);
        assert_eq!(g.max_handle_x, 240.0);
    }
}

// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Demo chart panels.

use almanac_series::{Field, TimeWindow, accumulate};
use almanac_sync::{ChartPanel, CoordinateMapping, IndexScale, PanelId, PanelRegistry};
use kurbo::{BezPath, Rect};
use peniko::Color;

/// Horizontal pixels per hourly sample.
pub(crate) const PX_PER_HOUR: f64 = 8.0;
/// Left gutter reserved for the y axis; the plots start here.
pub(crate) const PLOT_ORIGIN: f64 = 48.0;
/// Height of one panel.
pub(crate) const PANEL_HEIGHT: f64 = 120.0;
/// Gap between stacked panels.
pub(crate) const PANEL_GAP: f64 = 16.0;

/// A panel that only records what the synchronizer asks of it.
#[derive(Debug)]
pub(crate) struct DemoPanel {
    id: PanelId,
    scale: IndexScale,
    active: Option<usize>,
    redraws: usize,
}

impl DemoPanel {
    pub(crate) fn new(id: PanelId, scale: IndexScale) -> Self {
        Self {
            id,
            scale,
            active: None,
            redraws: 0,
        }
    }
}

impl ChartPanel for DemoPanel {
    fn mapping(&self) -> &dyn CoordinateMapping {
        &self.scale
    }

    fn set_active_index(&mut self, index: Option<usize>) {
        self.active = index;
    }

    fn redraw_immediate(&mut self) {
        self.redraws += 1;
        log::debug!(
            "{} redraw #{} with active index {:?}",
            self.id,
            self.redraws,
            self.active
        );
    }
}

/// The x scale shared by every panel, in plot-local pixels.
pub(crate) fn plot_scale(window: &TimeWindow) -> IndexScale {
    let width = window.len().saturating_sub(1) as f64 * PX_PER_HOUR;
    IndexScale::new(window.len(), (0.0, width))
}

/// Registers one panel per [`PanelId`], replacing whatever was registered before.
pub(crate) fn register_all(registry: &mut PanelRegistry, scale: IndexScale) {
    for id in PanelId::ALL {
        registry.register(id, Box::new(DemoPanel::new(id, scale)));
    }
}

/// Vertical placement of a panel inside the stacked charts.
pub(crate) fn panel_frame(id: PanelId, plot_width: f64) -> Rect {
    let row = PanelId::ALL.iter().position(|p| *p == id).unwrap_or(0) as f64;
    let y0 = row * (PANEL_HEIGHT + PANEL_GAP);
    Rect::new(PLOT_ORIGIN, y0, PLOT_ORIGIN + plot_width, y0 + PANEL_HEIGHT)
}

/// The series a panel draws, and its colour.
pub(crate) fn panel_series(id: PanelId, window: &TimeWindow) -> (Vec<f64>, Color) {
    let column = |field| window.column(field).map(<[f64]>::to_vec).unwrap_or_default();
    match id {
        PanelId::Temperature => (column(Field::Temperature), Color::from_rgb8(0xd3, 0x2f, 0x2f)),
        PanelId::Atmosphere => (column(Field::CloudCover), Color::from_rgb8(0x60, 0x7d, 0x8b)),
        PanelId::Precipitation => (
            accumulate(window.column(Field::Precipitation).unwrap_or_default()),
            Color::from_rgb8(0x19, 0x76, 0xd2),
        ),
        PanelId::Wind => (column(Field::WindSpeed), Color::from_rgb8(0x38, 0x8e, 0x3c)),
    }
}

/// A polyline of `values` over `scale`, fitted into `frame` by the values' finite range.
pub(crate) fn series_path(values: &[f64], scale: &IndexScale, frame: Rect) -> BezPath {
    let (min, max) = values
        .iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
            (lo.min(v), hi.max(v))
        });
    let range = if max > min { max - min } else { 1.0 };
    let mut path = BezPath::new();
    let mut pen_down = false;
    for (i, &v) in values.iter().enumerate() {
        if !v.is_finite() {
            pen_down = false;
            continue;
        }
        let x = frame.x0 + scale.index_to_pixel(i);
        let y = frame.y1 - (v - min) / range * frame.height();
        if pen_down {
            path.line_to((x, y));
        } else {
            path.move_to((x, y));
            pen_down = true;
        }
    }
    path
}

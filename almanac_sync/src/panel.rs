// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Chart panels as seen by the synchronizer.

use core::fmt;

use crate::scale::CoordinateMapping;

/// Identifies one of the stacked forecast panels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PanelId {
    /// Temperature, feels-like and dew point.
    Temperature,
    /// Cloud cover, humidity and pressure.
    Atmosphere,
    /// Precipitation amount, probability and running total.
    Precipitation,
    /// Wind speed, gusts and direction.
    Wind,
}

impl PanelId {
    /// All panels, top to bottom.
    pub const ALL: [Self; 4] = [
        Self::Temperature,
        Self::Atmosphere,
        Self::Precipitation,
        Self::Wind,
    ];

    /// Short lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Temperature => "temperature",
            Self::Atmosphere => "atmosphere",
            Self::Precipitation => "precipitation",
            Self::Wind => "wind",
        }
    }
}

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A live, independently rendered chart panel.
///
/// Implementations wrap whatever the host renderer uses. The synchronizer only ever asks for
/// the panel's coordinate mapping, sets its highlighted index, and asks for a redraw that must
/// not animate.
pub trait ChartPanel {
    /// The panel's current index ↔ pixel mapping.
    fn mapping(&self) -> &dyn CoordinateMapping;

    /// Highlights the point at `index` in every dataset, or clears the highlight.
    fn set_active_index(&mut self, index: Option<usize>);

    /// Redraws the panel without animation.
    fn redraw_immediate(&mut self);
}

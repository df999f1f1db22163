// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The "now" marker.

use almanac_series::{LocalClock, TimeWindow};
use chrono::{DateTime, Utc};
use kurbo::{Line, Point};

use crate::panel::PanelId;
use crate::registry::PanelRegistry;
use crate::scale::CoordinateMapping;

/// Horizontal position of the current local hour inside an aligned window.
///
/// Computed once per render; it does not track the clock afterwards.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NowMarker {
    hour_index: usize,
    x: Option<f64>,
}

impl NowMarker {
    /// Places the marker using `mapping`.
    ///
    /// The window starts at local midnight, so the current local hour of day is also the
    /// marker's window index. The marker is hidden when that index is not a point of `window`
    /// or when there is no mapping.
    pub fn locate(
        window: &TimeWindow,
        clock: LocalClock,
        now: DateTime<Utc>,
        mapping: Option<&dyn CoordinateMapping>,
    ) -> Self {
        let hour_index = clock.hour_of_day(now) as usize;
        let x = mapping
            .filter(|_| hour_index < window.len())
            .map(|m| m.index_to_pixel(hour_index));
        if x.is_none() {
            log::debug!(
                "now marker hidden: hour {hour_index}, window of {}",
                window.len()
            );
        }
        Self { hour_index, x }
    }

    /// Places the marker using the mapping of the `reference` panel in `registry`.
    pub fn locate_in(
        window: &TimeWindow,
        clock: LocalClock,
        now: DateTime<Utc>,
        registry: &PanelRegistry,
        reference: PanelId,
    ) -> Self {
        let mapping = registry.get(reference).map(|b| b.mapping());
        Self::locate(window, clock, now, mapping)
    }

    /// Local hour of day, which is also the window index of the marker.
    pub fn hour_index(&self) -> usize {
        self.hour_index
    }

    /// Pixel position of the marker, or `None` if it is hidden.
    pub fn x(&self) -> Option<f64> {
        self.x
    }

    /// Returns `true` if the marker should be drawn.
    pub fn is_visible(&self) -> bool {
        self.x.is_some()
    }

    /// The marker as a vertical line from `y0` to `y1`, if visible.
    pub fn line(&self, y0: f64, y1: f64) -> Option<Line> {
        let x = self.x?;
        Some(Line::new(Point::new(x, y0), Point::new(x, y1)))
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::boxed::Box;
    use alloc::vec::Vec;

    use almanac_series::{Field, HourlySeries};
    use chrono::{NaiveDate, TimeDelta, TimeZone};

    use super::*;
    use crate::scale::IndexScale;

    fn hourly(n: usize) -> HourlySeries {
        let start = NaiveDate::from_ymd_opt(2026, 10, 13)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let time: Vec<_> = (0..n)
            .map(|i| start + TimeDelta::hours(i64::try_from(i).unwrap()))
            .collect();
        HourlySeries::new(time, [(Field::Temperature, alloc::vec![0.0; n])]).unwrap()
    }

    struct Fixed(IndexScale);

    impl crate::ChartPanel for Fixed {
        fn mapping(&self) -> &dyn CoordinateMapping {
            &self.0
        }

        fn set_active_index(&mut self, _index: Option<usize>) {}

        fn redraw_immediate(&mut self) {}
    }

    #[test]
    fn marker_sits_on_the_local_hour() {
        let clock = LocalClock::new(-25200);
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 21, 0, 0).unwrap();
        let window = TimeWindow::align(&hourly(480), clock, now);

        let mut registry = PanelRegistry::new();
        registry.register(
            PanelId::Temperature,
            Box::new(Fixed(IndexScale::new(window.len(), (0.0, 480.0)))),
        );
        let marker = NowMarker::locate_in(&window, clock, now, &registry, PanelId::Temperature);
        assert_eq!(marker.hour_index(), 14);
        assert_eq!(marker.x(), Some(28.0));

        let line = marker.line(0.0, 600.0).unwrap();
        assert_eq!(line.p0, Point::new(28.0, 0.0));
        assert_eq!(line.p1, Point::new(28.0, 600.0));
    }

    #[test]
    fn marker_is_hidden_without_a_reference_panel() {
        let clock = LocalClock::new(0);
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let window = TimeWindow::align(&hourly(480), clock, now);
        let marker = NowMarker::locate_in(&window, clock, now, &PanelRegistry::new(), PanelId::Wind);
        assert_eq!(marker.hour_index(), 9);
        assert!(!marker.is_visible());
        assert_eq!(marker.line(0.0, 1.0), None);
    }

    #[test]
    fn marker_is_hidden_past_the_end_of_a_short_window() {
        // Only 77 hourly rows: 5 of them fall on local today.
        let clock = LocalClock::new(0);
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 9, 0, 0).unwrap();
        let window = TimeWindow::align(&hourly(77), clock, now);
        assert_eq!(window.len(), 5);
        let scale = IndexScale::new(window.len(), (0.0, 100.0));
        let marker = NowMarker::locate(&window, clock, now, Some(&scale as &dyn CoordinateMapping));
        assert!(!marker.is_visible());
    }
}

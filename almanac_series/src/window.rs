// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Timezone-aligned display windows.
//!
//! Every chart panel plots the same [`TimeWindow`]: the hourly records starting at local
//! midnight of "today" for the forecast location. Anchoring all panels to one origin means a
//! data index `i` names the same hour everywhere, which is what the cursor and the now-marker
//! rely on.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Timelike, Utc};

use crate::clock::LocalClock;
use crate::field::Field;
use crate::series::HourlySeries;

/// Number of hourly samples in a full window: 240 intervals plus the closing boundary point.
pub const WINDOW_LEN: usize = 241;

/// Samples per local day.
pub const HOURS_PER_DAY: usize = 24;

/// Returns the first row whose local date is `today`.
pub fn find_start_index(time: &[NaiveDateTime], today: NaiveDate) -> Option<usize> {
    time.iter().position(|t| t.date() == today)
}

/// Returns the first daily row on or after `today`, or `0` if every row is in the past.
pub fn daily_start_index(dates: &[NaiveDate], today: NaiveDate) -> usize {
    dates.iter().position(|d| *d >= today).unwrap_or(0)
}

/// A fixed-length slice of an [`HourlySeries`] starting at local midnight of today.
#[derive(Clone, Debug, PartialEq)]
pub struct TimeWindow {
    start_index: usize,
    today: NaiveDate,
    today_found: bool,
    series: HourlySeries,
}

impl TimeWindow {
    /// Aligns `series` to local today with the default [`WINDOW_LEN`].
    pub fn align(series: &HourlySeries, clock: LocalClock, now: DateTime<Utc>) -> Self {
        Self::align_with_len(series, clock, now, WINDOW_LEN)
    }

    /// Aligns `series` to local today, keeping at most `len` records.
    ///
    /// If no record falls on local today the window starts at the first record. That is a
    /// degraded mode (the window may show the wrong day); it is logged and reported by
    /// [`TimeWindow::today_found`].
    pub fn align_with_len(
        series: &HourlySeries,
        clock: LocalClock,
        now: DateTime<Utc>,
        len: usize,
    ) -> Self {
        let today = clock.today(now);
        let found = find_start_index(series.time(), today);
        if found.is_none() {
            log::warn!(
                "local today {today} not found in {} hourly records, starting from 0",
                series.len()
            );
        }
        let start_index = found.unwrap_or(0);
        let series = series.slice(start_index, len);
        log::debug!(
            "aligned window: start {start_index}, {} records, offset {}s",
            series.len(),
            clock.utc_offset_seconds()
        );
        Self {
            start_index,
            today,
            today_found: found.is_some(),
            series,
        }
    }

    /// Index of the window's first record in the source series.
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    /// The local date the window was aligned to.
    pub fn today(&self) -> NaiveDate {
        self.today
    }

    /// Whether a record on local today was found.
    pub fn today_found(&self) -> bool {
        self.today_found
    }

    /// Number of records in the window.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// Returns `true` if the window has no records.
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// The windowed records.
    pub fn series(&self) -> &HourlySeries {
        &self.series
    }

    /// The windowed timestamps.
    pub fn time(&self) -> &[NaiveDateTime] {
        self.series.time()
    }

    /// A windowed column, if present upstream.
    pub fn column(&self, field: Field) -> Option<&[f64]> {
        self.series.column(field)
    }

    /// Local hour of day of the record at `index`.
    pub fn hour_at(&self, index: usize) -> Option<u32> {
        self.time().get(index).map(|t| t.hour())
    }
}

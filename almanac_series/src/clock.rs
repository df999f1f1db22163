// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Local wall-clock time for a forecast location.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Timelike, Utc};

/// Converts UTC instants into the forecast location's local wall-clock time.
///
/// The upstream source reports the location's offset as a signed number of seconds; this is all
/// the timezone information the display layer needs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct LocalClock {
    utc_offset_seconds: i32,
}

impl LocalClock {
    /// Creates a clock for the given UTC offset (east of UTC is positive).
    pub const fn new(utc_offset_seconds: i32) -> Self {
        Self { utc_offset_seconds }
    }

    /// Returns the configured UTC offset in seconds.
    pub const fn utc_offset_seconds(self) -> i32 {
        self.utc_offset_seconds
    }

    /// Returns the local wall-clock time at `now`.
    ///
    /// If applying the offset would leave chrono's calendar range, the UTC wall-clock time is
    /// returned instead.
    pub fn local_time(self, now: DateTime<Utc>) -> NaiveDateTime {
        let utc = now.naive_utc();
        TimeDelta::try_seconds(i64::from(self.utc_offset_seconds))
            .and_then(|offset| utc.checked_add_signed(offset))
            .unwrap_or_else(|| {
                log::warn!(
                    "utc offset {}s overflows the calendar at {utc}, using UTC",
                    self.utc_offset_seconds
                );
                utc
            })
    }

    /// Returns the local calendar date at `now`.
    pub fn today(self, now: DateTime<Utc>) -> NaiveDate {
        self.local_time(now).date()
    }

    /// Returns the local hour of day (`0..=23`) at `now`.
    pub fn hour_of_day(self, now: DateTime<Utc>) -> u32 {
        self.local_time(now).hour()
    }

    /// Returns the local wall-clock time right now.
    #[cfg(feature = "std")]
    pub fn now_local(self) -> NaiveDateTime {
        self.local_time(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use chrono::{Datelike, TimeZone};

    use super::*;

    #[test]
    fn negative_offset_can_move_to_previous_day() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 3, 30, 0).unwrap();
        let clock = LocalClock::new(-7 * 3600);
        assert_eq!(clock.today(now).day(), 15);
        assert_eq!(clock.hour_of_day(now), 20);
    }

    #[test]
    fn positive_offset_can_move_to_next_day() {
        let now = Utc.with_ymd_and_hms(2026, 10, 16, 22, 0, 0).unwrap();
        let clock = LocalClock::new(5 * 3600 + 1800);
        assert_eq!(clock.today(now).day(), 17);
        assert_eq!(clock.hour_of_day(now), 3);
    }

    #[test]
    fn overflowing_offset_falls_back_to_utc() {
        let now = DateTime::<Utc>::MAX_UTC;
        let clock = LocalClock::new(3600);
        assert_eq!(clock.local_time(now), now.naive_utc());
    }
}

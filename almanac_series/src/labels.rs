// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hour labels for axes and tooltips (en-US only).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use chrono::{NaiveDateTime, Timelike};

use crate::window::{HOURS_PER_DAY, TimeWindow};

fn twelve_hour(hour: u32) -> (u32, &'static str) {
    let meridiem = if hour >= 12 { "PM" } else { "AM" };
    let h = match hour % 12 {
        0 => 12,
        h => h,
    };
    (h, meridiem)
}

/// Formats an axis label: `"Mon 12 AM"` at midnight, `"3 PM"` otherwise.
pub fn hour_label(t: NaiveDateTime) -> String {
    let (h, meridiem) = twelve_hour(t.hour());
    if t.hour() == 0 {
        format!("{} {h} {meridiem}", t.format("%a"))
    } else {
        format!("{h} {meridiem}")
    }
}

/// Formats a tooltip title: `"Mon, 3 PM"`.
pub fn tooltip_title(t: NaiveDateTime) -> String {
    let (h, meridiem) = twelve_hour(t.hour());
    format!("{}, {h} {meridiem}", t.format("%a"))
}

/// Returns the x-axis labels for `window`: one label at the start of every day, `None` between.
pub fn axis_labels(window: &TimeWindow) -> Vec<Option<String>> {
    window
        .time()
        .iter()
        .enumerate()
        .map(|(i, t)| (i % HOURS_PER_DAY == 0).then(|| hour_label(*t)))
        .collect()
}

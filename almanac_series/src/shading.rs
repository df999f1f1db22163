// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Night-time background spans.

extern crate alloc;

use alloc::vec::Vec;
use core::ops::Range;

use crate::window::TimeWindow;

/// Returns `true` for hours between 18:00 and 06:00.
pub fn is_night_hour(hour: u32) -> bool {
    hour >= 18 || hour < 6
}

/// Returns the maximal runs of night-time intervals in `window`.
///
/// A span `a..b` covers the intervals from sample `a` to sample `b`; the closing boundary point
/// never starts an interval.
pub fn night_spans(window: &TimeWindow) -> Vec<Range<usize>> {
    let intervals = window.len().saturating_sub(1);
    let mut spans: Vec<Range<usize>> = Vec::new();
    for i in 0..intervals {
        if !window.hour_at(i).is_some_and(is_night_hour) {
            continue;
        }
        match spans.last_mut() {
            Some(last) if last.end == i => last.end = i + 1,
            _ => spans.push(i..i + 1),
        }
    }
    spans
}

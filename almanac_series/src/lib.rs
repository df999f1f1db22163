// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hourly forecast series and the timezone-aligned display window.
//!
//! This crate is the data layer underneath the Almanac chart panels:
//! - **Series** hold the upstream forecast column-wise ([`HourlySeries`], [`DailySeries`]) and
//!   decode directly from the upstream JSON payload ([`Forecast`]).
//! - **Windows** slice a series to a fixed number of hourly points starting at local midnight
//!   of "today" for a given UTC offset ([`TimeWindow`]), so that index `i` means the same hour
//!   in every panel.
//! - **Derived series** (running precipitation totals, precipitation kind, night spans, axis
//!   labels) are computed from a window without touching the renderer.
//!
//! Nothing here reads a clock implicitly: every entry point takes the current UTC instant, and
//! `std` builds add [`LocalClock::now_local`] as a convenience.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod clock;
mod field;
#[cfg(not(feature = "std"))]
mod float;
mod labels;
mod precip;
mod series;
mod shading;
mod window;

pub use clock::LocalClock;
pub use field::Field;
pub use labels::{axis_labels, hour_label, tooltip_title};
pub use precip::{PrecipKind, accumulate, precip_kinds};
pub use series::{DailySeries, Forecast, HourlySeries, SeriesError};
pub use shading::{is_night_hour, night_spans};
pub use window::{HOURS_PER_DAY, TimeWindow, WINDOW_LEN, daily_start_index, find_start_index};

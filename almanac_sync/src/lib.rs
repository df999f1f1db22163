// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cursor synchronization across independently rendered chart panels.
//!
//! Every panel plots the same aligned window (see [`almanac_series::TimeWindow`]) but owns its
//! own renderer and pixel extent. This crate keeps them in agreement:
//! - [`PanelRegistry`] is the live set of panels, keyed by [`PanelId`].
//! - [`CursorSynchronizer`] turns pointer and touch positions into one active index and
//!   broadcasts it to every registered panel, coalescing pointer moves per frame
//!   ([`FrameScheduler`]).
//! - [`NowMarker`] places the current local hour on the reference panel.
//!
//! Panels are reached only through the [`ChartPanel`] and [`CoordinateMapping`] traits;
//! [`IndexScale`] is a plain linear mapping for hosts that do not bring their own.

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

mod cursor;
#[cfg(not(feature = "std"))]
mod float;
mod frame;
mod now;
mod panel;
mod registry;
mod scale;

pub use cursor::{CursorEvent, CursorState, CursorSynchronizer, TouchResponse};
pub use frame::{FrameFlag, FrameScheduler};
pub use now::NowMarker;
pub use panel::{ChartPanel, PanelId};
pub use registry::{PanelBinding, PanelRegistry};
pub use scale::{CoordinateMapping, IndexScale};

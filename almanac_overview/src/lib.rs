// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! An overview ("minimap") for a horizontally scrolling forecast.
//!
//! The overview shows the whole forecast horizon as a small trend line ([`Thumbnail`]) with a
//! handle on top that stands for the visible part of the charts. [`HandleGeometry`] is the
//! pure mapping between scroll state and handle; [`ViewportNavigator`] turns drag and
//! click-to-snap gestures on the handle into scrolling of a [`ScrollArea`].
//!
//! ```
//! use almanac_overview::{ScrollArea, ScrollState, ViewportNavigator};
//!
//! let mut area = ScrollState::new(2400.0, 240.0).with_scroll_left(1080.0);
//! let mut nav = ViewportNavigator::new(300.0, &area);
//! assert_eq!(nav.geometry().handle_left, 130.0);
//!
//! nav.press(280.0, &mut area);
//! nav.release();
//! assert_eq!(area.scroll_left(), 2160.0);
//! ```

#![no_std]

extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

#[cfg(not(feature = "std"))]
mod float;
mod geometry;
mod navigator;
mod scroll;
mod thumbnail;

pub use geometry::{HandleGeometry, MIN_HANDLE_WIDTH, NavigatorConfig, ScrollMetrics};
pub use navigator::{DragState, Press, ViewportNavigator};
pub use scroll::{ScrollArea, ScrollState};
pub use thumbnail::{Thumbnail, ThumbnailScene, ThumbnailStyle, render_thumbnail};

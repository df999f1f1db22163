// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag and snap gestures on the overview handle.

use crate::geometry::{HandleGeometry, NavigatorConfig, ScrollMetrics};
use crate::scroll::ScrollArea;

/// Whether the handle is being dragged.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    /// No gesture in progress.
    #[default]
    Idle,
    /// A pointer or single touch holds the handle.
    Dragging {
        /// Wrapper position where the drag started.
        pointer_start_x: f64,
        /// Handle offset when the drag started.
        handle_start_left: f64,
    },
}

/// How a press on the wrapper was handled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Press {
    /// The press landed on the handle; it is now being dragged.
    Grabbed,
    /// The press landed beside the handle; the handle jumped there and is now being dragged.
    Snapped,
}

/// Keeps an overview handle in step with a [`ScrollArea`] and turns gestures on it into
/// scrolling.
///
/// All positions are in wrapper coordinates (`0` is the wrapper's left edge). Pointer and
/// single-touch gestures use the same entry points. The scroll area's geometry is re-read on
/// every event; the navigator itself only remembers the displayed handle and the drag origin.
#[derive(Clone, Debug)]
pub struct ViewportNavigator {
    config: NavigatorConfig,
    wrapper_width: f64,
    geometry: HandleGeometry,
    drag: DragState,
}

impl ViewportNavigator {
    /// Creates a navigator for a wrapper `wrapper_width` wide, with the default config.
    pub fn new(wrapper_width: f64, area: &(impl ScrollArea + ?Sized)) -> Self {
        Self::with_config(NavigatorConfig::default(), wrapper_width, area)
    }

    /// Creates a navigator with an explicit config.
    pub fn with_config(
        config: NavigatorConfig,
        wrapper_width: f64,
        area: &(impl ScrollArea + ?Sized),
    ) -> Self {
        let mut navigator = Self {
            config,
            wrapper_width,
            geometry: HandleGeometry::default(),
            drag: DragState::Idle,
        };
        navigator.sync(area);
        navigator
    }

    /// The displayed handle.
    pub fn geometry(&self) -> HandleGeometry {
        self.geometry
    }

    /// The current gesture.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging { .. })
    }

    /// The wrapper width.
    pub fn wrapper_width(&self) -> f64 {
        self.wrapper_width
    }

    /// The navigator settings.
    pub fn config(&self) -> &NavigatorConfig {
        &self.config
    }

    fn measure(&self, area: &(impl ScrollArea + ?Sized)) -> HandleGeometry {
        HandleGeometry::compute(ScrollMetrics::read(area), self.wrapper_width, &self.config)
    }

    /// Recomputes the displayed handle from `area`.
    pub fn sync(&mut self, area: &(impl ScrollArea + ?Sized)) {
        self.geometry = self.measure(area);
    }

    /// Starts a gesture at wrapper position `x`.
    ///
    /// A press on the handle grabs it. A press beside it centres the handle on `x` (clamped to
    /// the wrapper), scrolls `area` to match, and grabs the handle at its new position, so the
    /// same gesture can continue as a drag. The host should suppress its default handling of
    /// the press in both cases.
    pub fn press(&mut self, x: f64, area: &mut (impl ScrollArea + ?Sized)) -> Press {
        let geometry = self.measure(&*area);
        if geometry.contains(x) {
            self.geometry = geometry;
            self.drag = DragState::Dragging {
                pointer_start_x: x,
                handle_start_left: geometry.handle_left,
            };
            return Press::Grabbed;
        }

        let left = geometry.clamp_left(x - geometry.handle_width / 2.0);
        area.set_scroll_left(geometry.scroll_for_left(left));
        self.sync(&*area);
        log::trace!("snapped handle to {left} for press at {x}");
        self.drag = DragState::Dragging {
            pointer_start_x: x,
            handle_start_left: left,
        };
        Press::Snapped
    }

    /// Continues a drag to wrapper position `x`, scrolling `area`.
    ///
    /// Returns `false` (and does nothing) when no drag is in progress; otherwise the host
    /// should suppress its default handling of the move.
    pub fn drag_to(&mut self, x: f64, area: &mut (impl ScrollArea + ?Sized)) -> bool {
        let DragState::Dragging {
            pointer_start_x,
            handle_start_left,
        } = self.drag
        else {
            return false;
        };
        let geometry = self.measure(&*area);
        let left = geometry.clamp_left(handle_start_left + (x - pointer_start_x));
        area.set_scroll_left(geometry.scroll_for_left(left));
        self.sync(&*area);
        true
    }

    /// Ends the gesture. There is no inertia.
    pub fn release(&mut self) {
        self.drag = DragState::Idle;
    }

    /// Follows scrolling that did not come from the navigator. Ignored while dragging.
    pub fn content_scrolled(&mut self, area: &(impl ScrollArea + ?Sized)) {
        if !self.is_dragging() {
            self.sync(area);
        }
    }

    /// Follows a change of the wrapper width, the content width, or both.
    pub fn resize(&mut self, wrapper_width: f64, area: &(impl ScrollArea + ?Sized)) {
        self.wrapper_width = wrapper_width;
        self.sync(area);
    }
}

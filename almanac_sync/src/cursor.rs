// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Cross-panel cursor synchronization.
//!
//! One pointer position on the plotting surface becomes one data index, and that index is
//! highlighted in every live panel at once. Pointer moves arrive far more often than frames,
//! so they are coalesced: only the latest position per frame is resolved, and a broadcast only
//! happens when the resolved index actually changes.
//!
//! ```text
//!            pointer_moved ──► (frame) ──► index in window ──► Active(i)
//!   Idle ◄── pointer_left                  outside window ──► ignored
//!            touch_moved ─────────────────────────┘
//! ```

use crate::frame::{FrameScheduler, MoveCoalescer};
use crate::panel::PanelId;
use crate::registry::PanelRegistry;
use crate::scale::round_index;

/// Whether a cursor index is currently highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CursorState {
    /// Nothing highlighted.
    #[default]
    Idle,
    /// The given window index is highlighted in every panel.
    Active(usize),
}

/// A change the host should reflect outside the panels (crosshair, readouts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CursorEvent {
    /// Every panel now highlights `index`; the crosshair belongs at `crosshair_x`.
    Activated {
        /// Highlighted window index.
        index: usize,
        /// Crosshair position in the coordinate space of the shared plotting surface.
        crosshair_x: f64,
    },
    /// Every panel's highlight was cleared; hide the crosshair.
    Cleared,
}

/// Outcome of a touch move.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchResponse {
    /// The resulting change, if any.
    pub event: Option<CursorEvent>,
    /// Whether the host must suppress native scrolling for this touch.
    pub prevent_default: bool,
}

/// Resolves pointer and touch positions into a single active index shared by all panels.
///
/// Pointer positions are given in the coordinate space of the shared plotting surface. The
/// reference panel's mapping converts them to data indices, after subtracting the reference
/// panel's left offset within that surface (see [`with_panel_origin`](Self::with_panel_origin)).
#[derive(Clone, Debug)]
pub struct CursorSynchronizer {
    reference: PanelId,
    panel_origin: f64,
    window_len: usize,
    state: CursorState,
    last_broadcast: Option<usize>,
    moves: MoveCoalescer,
}

impl CursorSynchronizer {
    /// Creates an idle synchronizer for a window of `window_len` indices.
    pub fn new(reference: PanelId, window_len: usize) -> Self {
        Self {
            reference,
            panel_origin: 0.0,
            window_len,
            state: CursorState::Idle,
            last_broadcast: None,
            moves: MoveCoalescer::default(),
        }
    }

    /// Sets the reference panel's left offset within the shared plotting surface.
    pub fn with_panel_origin(mut self, origin: f64) -> Self {
        self.panel_origin = origin;
        self
    }

    /// The panel whose mapping resolves pointer positions.
    pub fn reference(&self) -> PanelId {
        self.reference
    }

    /// Number of indices in the current window.
    pub fn window_len(&self) -> usize {
        self.window_len
    }

    /// Current state.
    pub fn state(&self) -> CursorState {
        self.state
    }

    /// The highlighted index, if any.
    pub fn active_index(&self) -> Option<usize> {
        match self.state {
            CursorState::Idle => None,
            CursorState::Active(index) => Some(index),
        }
    }

    /// Returns whether a frame callback is outstanding.
    pub fn frame_pending(&self) -> bool {
        self.moves.is_requested()
    }

    /// Records a pointer move; it is resolved on the next [`frame`](Self::frame).
    ///
    /// At most one frame is outstanding no matter how many moves arrive before it.
    pub fn pointer_moved(&mut self, x: f64, scheduler: &mut dyn FrameScheduler) {
        self.moves.push(x, scheduler);
    }

    /// Frame callback: resolves the latest pointer position and broadcasts if it changed.
    pub fn frame(&mut self, registry: &mut PanelRegistry) -> Option<CursorEvent> {
        let x = self.moves.take()?;
        let index = self.resolve(x, registry)?;
        self.activate(index, registry)
    }

    /// Handles a touch start or move immediately, without frame coalescing.
    ///
    /// The host must always suppress native scrolling while a touch drags over the charts.
    pub fn touch_moved(&mut self, x: f64, registry: &mut PanelRegistry) -> TouchResponse {
        let event = self
            .resolve(x, registry)
            .and_then(|index| self.activate(index, registry));
        TouchResponse {
            event,
            prevent_default: true,
        }
    }

    /// Handles the end of a touch. The highlight stays where the finger left it.
    pub fn touch_ended(&mut self) {
        log::trace!("touch ended at {:?}", self.state);
    }

    /// Handles the pointer leaving the plotting surface.
    ///
    /// Cancels any outstanding frame and, if something is highlighted, clears every panel once.
    pub fn pointer_left(
        &mut self,
        registry: &mut PanelRegistry,
        scheduler: &mut dyn FrameScheduler,
    ) -> Option<CursorEvent> {
        self.moves.cancel(scheduler);
        self.clear(registry)
    }

    /// Starts over for a freshly rendered window of `window_len` indices.
    ///
    /// Clears any highlight and drops the pending pointer position. An outstanding frame stays
    /// outstanding and will find nothing to do.
    pub fn reset(&mut self, window_len: usize, registry: &mut PanelRegistry) -> Option<CursorEvent> {
        self.window_len = window_len;
        self.moves.discard();
        self.clear(registry)
    }

    /// Applies the current highlight to panels registered since the last broadcast, e.g. after
    /// a panel was rebuilt from new data. Panels that already show the highlight are left alone.
    ///
    /// While idle, new panels start unhighlighted and nothing is sent.
    pub fn resync(&mut self, registry: &mut PanelRegistry) {
        match self.state {
            CursorState::Active(index) => registry.broadcast_fresh(Some(index)),
            CursorState::Idle => registry.settle(),
        }
    }

    /// Crosshair position for the current state, if something is highlighted and the reference
    /// panel is live.
    pub fn crosshair_x(&self, registry: &PanelRegistry) -> Option<f64> {
        let index = self.active_index()?;
        self.crosshair_for(index, registry)
    }

    fn crosshair_for(&self, index: usize, registry: &PanelRegistry) -> Option<f64> {
        let binding = registry.get(self.reference)?;
        Some(binding.mapping().index_to_pixel(index) + self.panel_origin)
    }

    /// Maps `x` to a window index, or `None` if it falls outside the window.
    fn resolve(&self, x: f64, registry: &PanelRegistry) -> Option<usize> {
        let Some(binding) = registry.get(self.reference) else {
            log::trace!("reference panel {} not registered", self.reference);
            return None;
        };
        let value = binding.mapping().value_for_pixel(x - self.panel_origin);
        round_index(value).filter(|&index| index < self.window_len)
    }

    fn activate(&mut self, index: usize, registry: &mut PanelRegistry) -> Option<CursorEvent> {
        self.state = CursorState::Active(index);
        if self.last_broadcast == Some(index) {
            return None;
        }
        registry.broadcast(Some(index));
        self.last_broadcast = Some(index);
        let crosshair_x = self.crosshair_for(index, registry)?;
        Some(CursorEvent::Activated { index, crosshair_x })
    }

    fn clear(&mut self, registry: &mut PanelRegistry) -> Option<CursorEvent> {
        if self.state == CursorState::Idle {
            return None;
        }
        self.state = CursorState::Idle;
        self.last_broadcast = None;
        registry.broadcast(None);
        Some(CursorEvent::Cleared)
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec::Vec;

    use super::*;
    use crate::frame::FrameFlag;
    use crate::registry::tests::{Call, Log, recording};

    /// Four panels over a 241-point window, two pixels per index starting at x = 0.
    fn setup() -> (PanelRegistry, Vec<Log>) {
        let mut registry = PanelRegistry::new();
        let mut logs = Vec::new();
        for id in PanelId::ALL {
            let (panel, log) = recording(241, (0.0, 480.0));
            registry.register(id, panel);
            logs.push(log);
        }
        (registry, logs)
    }

    fn drain(logs: &[Log]) -> Vec<Vec<Call>> {
        logs.iter().map(|log| log.borrow_mut().drain(..).collect()).collect()
    }

    fn hover(
        sync: &mut CursorSynchronizer,
        registry: &mut PanelRegistry,
        frames: &mut FrameFlag,
        x: f64,
    ) -> Option<CursorEvent> {
        sync.pointer_moved(x, frames);
        assert!(frames.take());
        sync.frame(registry)
    }

    #[test]
    fn moves_within_one_frame_resolve_only_the_latest() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        sync.pointer_moved(10.0, &mut frames);
        sync.pointer_moved(20.0, &mut frames);
        sync.pointer_moved(40.0, &mut frames);
        assert!(sync.frame_pending());
        assert!(frames.take());

        let event = sync.frame(&mut registry);
        assert_eq!(
            event,
            Some(CursorEvent::Activated {
                index: 20,
                crosshair_x: 40.0
            })
        );
        assert!(!sync.frame_pending());
        for calls in drain(&logs) {
            assert_eq!(calls, [Call::Set(Some(20)), Call::Redraw]);
        }
    }

    #[test]
    fn same_index_is_not_rebroadcast() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        assert!(hover(&mut sync, &mut registry, &mut frames, 100.0).is_some());
        drain(&logs);
        // 100.6 still rounds to index 50.
        assert_eq!(hover(&mut sync, &mut registry, &mut frames, 100.6), None);
        assert!(drain(&logs).iter().all(Vec::is_empty));
        assert_eq!(sync.state(), CursorState::Active(50));

        assert!(hover(&mut sync, &mut registry, &mut frames, 103.0).is_some());
        assert_eq!(sync.active_index(), Some(52));
    }

    #[test]
    fn positions_outside_the_window_are_ignored() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        hover(&mut sync, &mut registry, &mut frames, 60.0);
        drain(&logs);
        assert_eq!(hover(&mut sync, &mut registry, &mut frames, -30.0), None);
        assert_eq!(hover(&mut sync, &mut registry, &mut frames, 483.0), None);
        assert_eq!(sync.state(), CursorState::Active(30));
        assert!(drain(&logs).iter().all(Vec::is_empty));

        // The last point is reachable; rounding just past it is not.
        assert!(hover(&mut sync, &mut registry, &mut frames, 480.9).is_some());
        assert_eq!(sync.active_index(), Some(240));
    }

    #[test]
    fn pointer_leave_clears_exactly_once() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        hover(&mut sync, &mut registry, &mut frames, 60.0);
        drain(&logs);

        sync.pointer_moved(80.0, &mut frames);
        assert_eq!(
            sync.pointer_left(&mut registry, &mut frames),
            Some(CursorEvent::Cleared)
        );
        assert!(!frames.is_requested());
        assert_eq!(sync.frame(&mut registry), None);
        for calls in drain(&logs) {
            assert_eq!(calls, [Call::Set(None), Call::Redraw]);
        }

        assert_eq!(sync.pointer_left(&mut registry, &mut frames), None);
        assert!(drain(&logs).iter().all(Vec::is_empty));
        assert_eq!(sync.state(), CursorState::Idle);
    }

    #[test]
    fn reentering_rebroadcasts_the_same_index() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        hover(&mut sync, &mut registry, &mut frames, 60.0);
        sync.pointer_left(&mut registry, &mut frames);
        drain(&logs);
        assert!(hover(&mut sync, &mut registry, &mut frames, 60.0).is_some());
        assert_eq!(drain(&logs)[0], [Call::Set(Some(30)), Call::Redraw]);
    }

    #[test]
    fn touch_resolves_immediately_and_always_prevents_scrolling() {
        let (mut registry, _logs) = setup();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        let response = sync.touch_moved(20.0, &mut registry);
        assert!(response.prevent_default);
        assert_eq!(
            response.event,
            Some(CursorEvent::Activated {
                index: 10,
                crosshair_x: 20.0
            })
        );

        let outside = sync.touch_moved(-50.0, &mut registry);
        assert!(outside.prevent_default);
        assert_eq!(outside.event, None);

        sync.touch_ended();
        assert_eq!(sync.state(), CursorState::Active(10));
    }

    #[test]
    fn missing_reference_panel_is_a_no_op() {
        let (mut registry, logs) = setup();
        registry.unregister(PanelId::Temperature);
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        assert_eq!(hover(&mut sync, &mut registry, &mut frames, 60.0), None);
        assert!(sync.touch_moved(60.0, &mut registry).prevent_default);
        assert_eq!(sync.state(), CursorState::Idle);
        assert!(drain(&logs).iter().all(Vec::is_empty));
        assert_eq!(sync.crosshair_x(&registry), None);
    }

    #[test]
    fn panel_origin_offsets_both_directions() {
        let (mut registry, _logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241).with_panel_origin(64.0);

        let event = hover(&mut sync, &mut registry, &mut frames, 64.0 + 30.0);
        assert_eq!(
            event,
            Some(CursorEvent::Activated {
                index: 15,
                crosshair_x: 94.0
            })
        );
        assert_eq!(sync.crosshair_x(&registry), Some(94.0));
    }

    #[test]
    fn reset_clears_and_shrinks_the_window() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        hover(&mut sync, &mut registry, &mut frames, 300.0);
        sync.pointer_moved(310.0, &mut frames);
        assert_eq!(sync.reset(100, &mut registry), Some(CursorEvent::Cleared));
        assert_eq!(sync.window_len(), 100);
        // The pending move was dropped along with the old window.
        assert_eq!(sync.frame(&mut registry), None);
        drain(&logs);

        // Index 150 is still on the panels' scales but no longer in the window.
        assert!(frames.take());
        assert_eq!(hover(&mut sync, &mut registry, &mut frames, 300.0), None);
        assert_eq!(sync.state(), CursorState::Idle);
    }

    #[test]
    fn resync_reapplies_the_highlight_to_new_panels_only() {
        let (mut registry, logs) = setup();
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);
        hover(&mut sync, &mut registry, &mut frames, 60.0);
        drain(&logs);

        let (panel, log) = recording(241, (0.0, 480.0));
        registry.register(PanelId::Wind, panel);
        sync.resync(&mut registry);
        assert_eq!(*log.borrow(), [Call::Set(Some(30)), Call::Redraw]);
        // Temperature, Atmosphere and Precipitation already show index 30.
        assert!(drain(&logs)[..3].iter().all(Vec::is_empty));
    }

    #[test]
    fn resync_without_new_panels_sends_nothing() {
        let mut registry = PanelRegistry::new();
        let (panel, log) = recording(241, (0.0, 480.0));
        registry.register(PanelId::Temperature, panel);
        let mut frames = FrameFlag::default();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);

        hover(&mut sync, &mut registry, &mut frames, 60.0);
        sync.resync(&mut registry);
        assert_eq!(*log.borrow(), [Call::Set(Some(30)), Call::Redraw]);
    }

    #[test]
    fn resync_while_idle_leaves_new_panels_unhighlighted() {
        let (mut registry, _logs) = setup();
        let mut sync = CursorSynchronizer::new(PanelId::Temperature, 241);
        let (panel, log) = recording(241, (0.0, 480.0));
        registry.register(PanelId::Wind, panel);
        sync.resync(&mut registry);
        assert!(log.borrow().is_empty());
        assert_eq!(sync.reference(), PanelId::Temperature);
    }
}

// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame coalescing of pointer moves.

/// Schedules a single callback on the host's next display frame.
///
/// The host calls back into [`CursorSynchronizer::frame`](crate::CursorSynchronizer::frame)
/// once per requested frame.
pub trait FrameScheduler {
    /// Requests one callback on the next frame.
    fn request_frame(&mut self);

    /// Cancels the outstanding request, if any.
    fn cancel_frame(&mut self);
}

/// A [`FrameScheduler`] for hosts that poll once per frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameFlag {
    requested: bool,
}

impl FrameFlag {
    /// Returns whether a frame is currently requested.
    pub fn is_requested(&self) -> bool {
        self.requested
    }

    /// Consumes the request; returns `true` if the frame callback should run.
    pub fn take(&mut self) -> bool {
        core::mem::take(&mut self.requested)
    }
}

impl FrameScheduler for FrameFlag {
    fn request_frame(&mut self) {
        self.requested = true;
    }

    fn cancel_frame(&mut self) {
        self.requested = false;
    }
}

/// Keeps the latest pointer position and at most one outstanding frame request.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub(crate) struct MoveCoalescer {
    latest: Option<f64>,
    requested: bool,
}

impl MoveCoalescer {
    /// Records `x` as the latest position, requesting a frame if none is outstanding.
    pub(crate) fn push(&mut self, x: f64, scheduler: &mut dyn FrameScheduler) {
        self.latest = Some(x);
        if !self.requested {
            self.requested = true;
            scheduler.request_frame();
        }
    }

    /// Called from the frame callback: the request is spent, the latest position is handed over.
    pub(crate) fn take(&mut self) -> Option<f64> {
        self.requested = false;
        self.latest.take()
    }

    /// Cancels the outstanding request and forgets the latest position.
    pub(crate) fn cancel(&mut self, scheduler: &mut dyn FrameScheduler) {
        if self.requested {
            scheduler.cancel_frame();
            self.requested = false;
        }
        self.latest = None;
    }

    /// Forgets the latest position; an outstanding request stays outstanding.
    pub(crate) fn discard(&mut self) {
        self.latest = None;
    }

    pub(crate) fn is_requested(&self) -> bool {
        self.requested
    }
}

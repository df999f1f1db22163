// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Index ↔ pixel mapping.

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

/// Maps data indices to horizontal pixel positions and back for one chart panel.
///
/// Pixel positions are relative to the panel's drawing surface. Every panel plots the same
/// window, so all mappings agree on [`len`](Self::len) but may differ in pixel extent.
pub trait CoordinateMapping {
    /// Number of data indices the mapping covers.
    fn len(&self) -> usize;

    /// Horizontal pixel position of data index `index`.
    fn index_to_pixel(&self, index: usize) -> f64;

    /// Fractional data index at pixel `x`, without clamping.
    ///
    /// Positions left of the first point give negative values, positions right of the last
    /// point give values past `len() - 1`.
    fn value_for_pixel(&self, x: f64) -> f64;

    /// Returns `true` if the mapping covers no indices.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Nearest data index at pixel `x`, clamped to `0..len()`.
    ///
    /// Halfway positions round up. Returns `0` for an empty mapping.
    fn pixel_to_index(&self, x: f64) -> usize {
        let last = self.len().saturating_sub(1);
        match round_index(self.value_for_pixel(x)) {
            Some(i) => i.min(last),
            None => 0,
        }
    }
}

/// Rounds a fractional index half-up, or `None` if it lies left of index 0.
pub(crate) fn round_index(value: f64) -> Option<usize> {
    let rounded = (value + 0.5).floor();
    if !rounded.is_finite() || rounded < 0.0 {
        return None;
    }
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "rounded is finite and non-negative; out-of-range values saturate"
    )]
    let index = rounded as usize;
    Some(index)
}

/// A linear [`CoordinateMapping`] spreading `len` points evenly across a pixel range.
///
/// Index `0` lands on `range.0` and index `len - 1` on `range.1`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexScale {
    len: usize,
    range: (f64, f64),
}

impl IndexScale {
    /// Creates a scale spreading `len` indices over `range`.
    pub fn new(len: usize, range: (f64, f64)) -> Self {
        Self { len, range }
    }

    /// Returns the pixel range.
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    #[allow(clippy::cast_precision_loss, reason = "window lengths are far below 2^52")]
    fn last_index(&self) -> f64 {
        self.len.saturating_sub(1) as f64
    }

    /// Maps a (possibly fractional) index into pixel space.
    pub fn map(&self, index: f64) -> f64 {
        let (r0, r1) = self.range;
        let denom = self.last_index();
        if denom == 0.0 {
            return r0;
        }
        r0 + index * (r1 - r0) / denom
    }

    /// Maps a pixel position back into (fractional) index space.
    pub fn invert(&self, x: f64) -> f64 {
        let (r0, r1) = self.range;
        let span = r1 - r0;
        if span == 0.0 {
            return 0.0;
        }
        (x - r0) * self.last_index() / span
    }
}

impl CoordinateMapping for IndexScale {
    fn len(&self) -> usize {
        self.len
    }

    #[allow(clippy::cast_precision_loss, reason = "window lengths are far below 2^52")]
    fn index_to_pixel(&self, index: usize) -> f64 {
        self.map(index as f64)
    }

    fn value_for_pixel(&self, x: f64) -> f64 {
        self.invert(x)
    }
}

// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Precipitation-derived series.

extern crate alloc;

use alloc::vec::Vec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;

use crate::field::Field;
use crate::window::TimeWindow;

/// Returns the running total of an hourly incremental series.
///
/// Element `i` is the sum of `hourly[0..=i]` rounded to two decimal places. Only the reported
/// value is rounded; the sum itself carries full precision. Non-finite samples (upstream gaps)
/// add nothing.
///
/// For non-negative input the output is non-decreasing.
pub fn accumulate(hourly: &[f64]) -> Vec<f64> {
    let mut total = 0.0;
    hourly
        .iter()
        .map(|&v| {
            if v.is_finite() {
                total += v;
            }
            round_hundredths(total)
        })
        .collect()
}

fn round_hundredths(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// What kind of precipitation an hour carries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PrecipKind {
    /// Dry hour.
    None,
    /// Liquid precipitation.
    Rain,
    /// Any snowfall.
    Snow,
}

impl PrecipKind {
    /// Classifies an hour from its precipitation amount and snowfall.
    ///
    /// Snowfall wins over liquid precipitation.
    pub fn classify(amount: f64, snowfall: f64) -> Self {
        if snowfall > 0.0 {
            Self::Snow
        } else if amount > 0.0 {
            Self::Rain
        } else {
            Self::None
        }
    }
}

/// Classifies every hour of `window`. Missing columns count as dry.
pub fn precip_kinds(window: &TimeWindow) -> Vec<PrecipKind> {
    let amount = window.column(Field::Precipitation);
    let snow = window.column(Field::Snowfall);
    (0..window.len())
        .map(|i| {
            let a = amount.and_then(|c| c.get(i)).copied().unwrap_or(0.0);
            let s = snow.and_then(|c| c.get(i)).copied().unwrap_or(0.0);
            PrecipKind::classify(a, s)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::vec;

    use super::*;

    fn reference_sum(input: &[f64], i: usize) -> f64 {
        let sum: f64 = input[..=i].iter().sum();
        round_hundredths(sum)
    }

    #[test]
    fn running_total_is_rounded_to_hundredths() {
        let out = accumulate(&[0.004, 0.004, 0.004, 0.1]);
        assert_eq!(out, vec![0.0, 0.01, 0.01, 0.11]);
    }

    #[test]
    fn running_total_matches_rounded_prefix_sums() {
        let input: Vec<f64> = (0..241)
            .map(|i| f64::from((i * 37) % 11) * 0.013)
            .collect();
        let out = accumulate(&input);
        assert_eq!(out.len(), input.len());
        for i in 0..input.len() {
            let expected = reference_sum(&input, i);
            assert!(
                (out[i] - expected).abs() < 1e-9,
                "out[{i}] = {} expected {expected}",
                out[i]
            );
        }
    }

    #[test]
    fn running_total_is_non_decreasing_for_non_negative_input() {
        for seed in 1_u32..50 {
            let input: Vec<f64> = (0..120_u32)
                .map(|i| f64::from((i * seed + 7) % 13) * 0.0037)
                .collect();
            let out = accumulate(&input);
            for pair in out.windows(2) {
                assert!(pair[0] <= pair[1], "seed {seed}: {pair:?} decreases");
            }
        }
    }

    #[test]
    fn gaps_do_not_poison_the_total() {
        let out = accumulate(&[0.1, f64::NAN, 0.2]);
        assert_eq!(out, vec![0.1, 0.1, 0.3]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        assert!(accumulate(&[]).is_empty());
    }

    #[test]
    fn snow_wins_over_rain() {
        assert_eq!(PrecipKind::classify(0.2, 0.1), PrecipKind::Snow);
        assert_eq!(PrecipKind::classify(0.2, 0.0), PrecipKind::Rain);
        assert_eq!(PrecipKind::classify(0.0, 0.0), PrecipKind::None);
        assert_eq!(PrecipKind::classify(f64::NAN, f64::NAN), PrecipKind::None);
    }
}

// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A synthetic forecast around the current date.

use std::f64::consts::TAU;

use almanac_series::{
    DailySeries, Field, Forecast, HOURS_PER_DAY, HourlySeries, LocalClock, SeriesError,
};
use chrono::{DateTime, NaiveTime, TimeDelta, Utc};

/// Days of hourly data, starting before local today like a forecast with past days.
const DAYS: usize = 16;
const PAST_DAYS: i64 = 3;

/// UTC offset of the synthetic location.
pub(crate) const UTC_OFFSET_SECONDS: i32 = -7 * 3600;

fn hourly_value(field: Field, hour: usize) -> f64 {
    let h = hour as f64;
    let diurnal = (TAU * (h - 9.0) / 24.0).sin();
    let weather = (TAU * h / 97.0).sin();
    match field {
        Field::Temperature => 12.0 + 7.0 * diurnal + 3.0 * weather,
        Field::ApparentTemperature => 10.5 + 8.0 * diurnal + 3.0 * weather,
        Field::DewPoint => 6.0 + 2.0 * weather,
        Field::PrecipitationProbability => (50.0 + 50.0 * weather).round(),
        Field::Precipitation | Field::Rain => (0.8 * weather - 0.3).max(0.0),
        Field::Showers => 0.0,
        Field::Snowfall => 0.0,
        Field::CloudCover => (55.0 + 45.0 * weather).round(),
        Field::RelativeHumidity => (70.0 - 20.0 * diurnal).round(),
        Field::SurfacePressure => 1013.0 - 8.0 * weather,
        Field::WindSpeed => 14.0 + 6.0 * diurnal.abs() + 4.0 * weather,
        Field::WindDirection => (200.0 + 90.0 * weather).rem_euclid(360.0),
    }
}

/// Builds a forecast that starts at local midnight [`PAST_DAYS`] days before local today.
pub(crate) fn forecast(now: DateTime<Utc>) -> Result<Forecast, SeriesError> {
    let clock = LocalClock::new(UTC_OFFSET_SECONDS);
    let first_day = clock.today(now) - TimeDelta::days(PAST_DAYS);
    let start = first_day.and_time(NaiveTime::MIN);
    let hours = DAYS * HOURS_PER_DAY;

    let time = (0..hours)
        .map(|h| start + TimeDelta::hours(h as i64))
        .collect();
    let columns = Field::ALL.map(|field| {
        let values: Vec<f64> = (0..hours).map(|h| hourly_value(field, h)).collect();
        (field, values)
    });
    let hourly = HourlySeries::new(time, columns)?;

    let temps = hourly.column(Field::Temperature).unwrap_or_default();
    let precip = hourly.column(Field::Precipitation).unwrap_or_default();
    let days: Vec<_> = (0..DAYS)
        .map(|d| first_day + TimeDelta::days(d as i64))
        .collect();
    let per_day = |values: &[f64], f: fn(f64, f64) -> f64, init: f64| -> Vec<f64> {
        values
            .chunks(HOURS_PER_DAY)
            .map(|day| day.iter().copied().fold(init, f))
            .collect()
    };
    let daily = DailySeries::new(days)
        .with_temperature_max(per_day(temps, f64::max, f64::NEG_INFINITY))?
        .with_temperature_min(per_day(temps, f64::min, f64::INFINITY))?
        .with_precipitation_sum(per_day(precip, |a, b| a + b, 0.0))?;

    Ok(Forecast {
        hourly,
        daily: Some(daily),
        utc_offset_seconds: UTC_OFFSET_SECONDS,
    })
}

// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Column-wise forecast series.
//!
//! The upstream forecast source delivers one array per field plus a `time` array of naive local
//! date-times (`YYYY-MM-DDTHH:MM`). Series validate that every present column has the same length
//! as `time`; absent columns are allowed and surface as `None` from the accessors.
//!
//! Upstream `null` samples decode as `NaN`.

extern crate alloc;

use alloc::string::{String, ToString};
use alloc::vec::Vec;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Deserialize;

use crate::field::Field;

/// Errors returned when building a series from upstream data.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SeriesError {
    /// A column does not have one sample per timestamp.
    #[error("column `{column}` has {found} samples, expected {expected}")]
    LengthMismatch {
        /// Upstream key of the offending column.
        column: &'static str,
        /// Number of timestamps.
        expected: usize,
        /// Number of samples in the column.
        found: usize,
    },
    /// A `time` entry is not a naive local date-time.
    #[error("time[{index}] = `{value}` is not a local date-time")]
    Timestamp {
        /// Row of the offending entry.
        index: usize,
        /// The entry as received.
        value: String,
    },
    /// A daily `time` entry is not a calendar date.
    #[error("time[{index}] = `{value}` is not a calendar date")]
    Date {
        /// Row of the offending entry.
        index: usize,
        /// The entry as received.
        value: String,
    },
}

/// Parses an upstream local timestamp (`YYYY-MM-DDTHH:MM`, seconds optional).
pub(crate) fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S"))
        .ok()
}

fn check_len(column: &'static str, expected: usize, found: usize) -> Result<(), SeriesError> {
    if expected == found {
        Ok(())
    } else {
        log::warn!("forecast column `{column}` has {found} samples for {expected} timestamps");
        Err(SeriesError::LengthMismatch {
            column,
            expected,
            found,
        })
    }
}

fn nulls_to_nan(values: Vec<Option<f64>>) -> Vec<f64> {
    values.into_iter().map(|v| v.unwrap_or(f64::NAN)).collect()
}

/// The full hourly forecast, stored column-wise.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawHourly")]
pub struct HourlySeries {
    time: Vec<NaiveDateTime>,
    columns: [Option<Vec<f64>>; Field::COUNT],
}

impl HourlySeries {
    /// Builds a series from parsed timestamps and a set of columns.
    ///
    /// A field given twice keeps the last column.
    pub fn new(
        time: Vec<NaiveDateTime>,
        columns: impl IntoIterator<Item = (Field, Vec<f64>)>,
    ) -> Result<Self, SeriesError> {
        let mut slots: [Option<Vec<f64>>; Field::COUNT] = Default::default();
        for (field, values) in columns {
            check_len(field.key(), time.len(), values.len())?;
            slots[field.slot()] = Some(values);
        }
        Ok(Self {
            time,
            columns: slots,
        })
    }

    /// Builds a series from upstream timestamp strings and a set of columns.
    pub fn parse<S: AsRef<str>>(
        time: &[S],
        columns: impl IntoIterator<Item = (Field, Vec<f64>)>,
    ) -> Result<Self, SeriesError> {
        let time = time
            .iter()
            .enumerate()
            .map(|(index, value)| {
                let value = value.as_ref();
                parse_timestamp(value).ok_or_else(|| SeriesError::Timestamp {
                    index,
                    value: value.to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(time, columns)
    }

    /// Returns the number of hourly records.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Returns `true` if the series has no records.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }

    /// Returns the local timestamps.
    pub fn time(&self) -> &[NaiveDateTime] {
        &self.time
    }

    /// Returns a column, if the upstream source supplied it.
    pub fn column(&self, field: Field) -> Option<&[f64]> {
        self.columns[field.slot()].as_deref()
    }

    /// Iterates over the fields present in this series.
    pub fn fields(&self) -> impl Iterator<Item = Field> + '_ {
        Field::ALL
            .into_iter()
            .filter(|f| self.columns[f.slot()].is_some())
    }

    /// Returns the records `[start, start + len)`, clamped to the available rows.
    ///
    /// Every column is sliced identically.
    pub fn slice(&self, start: usize, len: usize) -> Self {
        let start = start.min(self.time.len());
        let end = start.saturating_add(len).min(self.time.len());
        Self {
            time: self.time[start..end].to_vec(),
            columns: self
                .columns
                .clone()
                .map(|c| c.map(|values| values[start..end].to_vec())),
        }
    }
}

#[derive(Deserialize)]
struct RawHourly {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    apparent_temperature: Option<Vec<Option<f64>>>,
    #[serde(default)]
    dew_point_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation_probability: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation: Option<Vec<Option<f64>>>,
    #[serde(default)]
    rain: Option<Vec<Option<f64>>>,
    #[serde(default)]
    showers: Option<Vec<Option<f64>>>,
    #[serde(default)]
    snowfall: Option<Vec<Option<f64>>>,
    #[serde(default)]
    cloud_cover: Option<Vec<Option<f64>>>,
    #[serde(default)]
    relative_humidity_2m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    surface_pressure: Option<Vec<Option<f64>>>,
    #[serde(default)]
    wind_speed_10m: Option<Vec<Option<f64>>>,
    #[serde(default)]
    wind_direction_10m: Option<Vec<Option<f64>>>,
}

impl TryFrom<RawHourly> for HourlySeries {
    type Error = SeriesError;

    fn try_from(raw: RawHourly) -> Result<Self, Self::Error> {
        let columns = [
            (Field::Temperature, raw.temperature_2m),
            (Field::ApparentTemperature, raw.apparent_temperature),
            (Field::DewPoint, raw.dew_point_2m),
            (
                Field::PrecipitationProbability,
                raw.precipitation_probability,
            ),
            (Field::Precipitation, raw.precipitation),
            (Field::Rain, raw.rain),
            (Field::Showers, raw.showers),
            (Field::Snowfall, raw.snowfall),
            (Field::CloudCover, raw.cloud_cover),
            (Field::RelativeHumidity, raw.relative_humidity_2m),
            (Field::SurfacePressure, raw.surface_pressure),
            (Field::WindSpeed, raw.wind_speed_10m),
            (Field::WindDirection, raw.wind_direction_10m),
        ];
        Self::parse(
            raw.time.as_slice(),
            columns
                .into_iter()
                .filter_map(|(field, values)| Some((field, nulls_to_nan(values?)))),
        )
    }
}

/// Daily forecast rows (one per local calendar day).
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(try_from = "RawDaily")]
pub struct DailySeries {
    date: Vec<NaiveDate>,
    temperature_max: Option<Vec<f64>>,
    temperature_min: Option<Vec<f64>>,
    precipitation_sum: Option<Vec<f64>>,
    precipitation_probability_max: Option<Vec<f64>>,
}

impl DailySeries {
    /// Builds a daily series from dates alone; add columns with the `with_*` methods.
    pub fn new(date: Vec<NaiveDate>) -> Self {
        Self {
            date,
            ..Self::default()
        }
    }

    /// Sets the daily maximum temperature column.
    pub fn with_temperature_max(mut self, values: Vec<f64>) -> Result<Self, SeriesError> {
        check_len("temperature_2m_max", self.date.len(), values.len())?;
        self.temperature_max = Some(values);
        Ok(self)
    }

    /// Sets the daily minimum temperature column.
    pub fn with_temperature_min(mut self, values: Vec<f64>) -> Result<Self, SeriesError> {
        check_len("temperature_2m_min", self.date.len(), values.len())?;
        self.temperature_min = Some(values);
        Ok(self)
    }

    /// Sets the daily precipitation total column.
    pub fn with_precipitation_sum(mut self, values: Vec<f64>) -> Result<Self, SeriesError> {
        check_len("precipitation_sum", self.date.len(), values.len())?;
        self.precipitation_sum = Some(values);
        Ok(self)
    }

    /// Sets the daily maximum precipitation probability column.
    pub fn with_precipitation_probability_max(
        mut self,
        values: Vec<f64>,
    ) -> Result<Self, SeriesError> {
        check_len(
            "precipitation_probability_max",
            self.date.len(),
            values.len(),
        )?;
        self.precipitation_probability_max = Some(values);
        Ok(self)
    }

    /// Returns the number of days.
    pub fn len(&self) -> usize {
        self.date.len()
    }

    /// Returns `true` if there are no days.
    pub fn is_empty(&self) -> bool {
        self.date.is_empty()
    }

    /// Returns the local calendar dates.
    pub fn dates(&self) -> &[NaiveDate] {
        &self.date
    }

    /// Returns the daily maximum temperatures, if supplied.
    pub fn temperature_max(&self) -> Option<&[f64]> {
        self.temperature_max.as_deref()
    }

    /// Returns the daily minimum temperatures, if supplied.
    pub fn temperature_min(&self) -> Option<&[f64]> {
        self.temperature_min.as_deref()
    }

    /// Returns the daily precipitation totals, if supplied.
    pub fn precipitation_sum(&self) -> Option<&[f64]> {
        self.precipitation_sum.as_deref()
    }

    /// Returns the daily maximum precipitation probabilities, if supplied.
    pub fn precipitation_probability_max(&self) -> Option<&[f64]> {
        self.precipitation_probability_max.as_deref()
    }

    /// Returns the days from `start` onwards.
    pub fn skip(&self, start: usize) -> Self {
        let start = start.min(self.date.len());
        let tail = |c: &Option<Vec<f64>>| c.as_ref().map(|v| v[start..].to_vec());
        Self {
            date: self.date[start..].to_vec(),
            temperature_max: tail(&self.temperature_max),
            temperature_min: tail(&self.temperature_min),
            precipitation_sum: tail(&self.precipitation_sum),
            precipitation_probability_max: tail(&self.precipitation_probability_max),
        }
    }
}

#[derive(Deserialize)]
struct RawDaily {
    time: Vec<String>,
    #[serde(default)]
    temperature_2m_max: Option<Vec<Option<f64>>>,
    #[serde(default)]
    temperature_2m_min: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation_sum: Option<Vec<Option<f64>>>,
    #[serde(default)]
    precipitation_probability_max: Option<Vec<Option<f64>>>,
}

impl TryFrom<RawDaily> for DailySeries {
    type Error = SeriesError;

    fn try_from(raw: RawDaily) -> Result<Self, Self::Error> {
        let date = raw
            .time
            .iter()
            .enumerate()
            .map(|(index, value)| {
                NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SeriesError::Date {
                    index,
                    value: value.clone(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        let mut daily = Self::new(date);
        if let Some(v) = raw.temperature_2m_max {
            daily = daily.with_temperature_max(nulls_to_nan(v))?;
        }
        if let Some(v) = raw.temperature_2m_min {
            daily = daily.with_temperature_min(nulls_to_nan(v))?;
        }
        if let Some(v) = raw.precipitation_sum {
            daily = daily.with_precipitation_sum(nulls_to_nan(v))?;
        }
        if let Some(v) = raw.precipitation_probability_max {
            daily = daily.with_precipitation_probability_max(nulls_to_nan(v))?;
        }
        Ok(daily)
    }
}

/// A decoded forecast payload.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Forecast {
    /// Hourly records over the whole forecast horizon.
    pub hourly: HourlySeries,
    /// Daily rows, when requested upstream.
    #[serde(default)]
    pub daily: Option<DailySeries>,
    /// Offset of the forecast location's local time from UTC, in seconds.
    #[serde(default)]
    pub utc_offset_seconds: i32,
}

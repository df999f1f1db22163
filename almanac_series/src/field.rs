// Copyright 2025 the Almanac Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hourly forecast fields.

use core::fmt;

/// A numeric hourly forecast field.
///
/// Each field has a stable upstream key (see [`Field::key`]) used by the forecast payload.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    /// Air temperature at 2 m.
    Temperature,
    /// Apparent ("feels like") temperature.
    ApparentTemperature,
    /// Dew point at 2 m.
    DewPoint,
    /// Probability of precipitation, in percent.
    PrecipitationProbability,
    /// Total precipitation amount for the preceding hour.
    Precipitation,
    /// Rain amount for the preceding hour.
    Rain,
    /// Shower amount for the preceding hour.
    Showers,
    /// Snowfall amount for the preceding hour.
    Snowfall,
    /// Cloud cover, in percent.
    CloudCover,
    /// Relative humidity at 2 m, in percent.
    RelativeHumidity,
    /// Surface pressure.
    SurfacePressure,
    /// Wind speed at 10 m.
    WindSpeed,
    /// Wind direction at 10 m, in degrees.
    WindDirection,
}

impl Field {
    /// Number of known fields.
    pub const COUNT: usize = 13;

    /// Every field, in upstream request order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::Temperature,
        Self::ApparentTemperature,
        Self::DewPoint,
        Self::PrecipitationProbability,
        Self::Precipitation,
        Self::Rain,
        Self::Showers,
        Self::Snowfall,
        Self::CloudCover,
        Self::RelativeHumidity,
        Self::SurfacePressure,
        Self::WindSpeed,
        Self::WindDirection,
    ];

    /// Returns the upstream column key for this field.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Temperature => "temperature_2m",
            Self::ApparentTemperature => "apparent_temperature",
            Self::DewPoint => "dew_point_2m",
            Self::PrecipitationProbability => "precipitation_probability",
            Self::Precipitation => "precipitation",
            Self::Rain => "rain",
            Self::Showers => "showers",
            Self::Snowfall => "snowfall",
            Self::CloudCover => "cloud_cover",
            Self::RelativeHumidity => "relative_humidity_2m",
            Self::SurfacePressure => "surface_pressure",
            Self::WindSpeed => "wind_speed_10m",
            Self::WindDirection => "wind_direction_10m",
        }
    }

    /// Looks a field up by its upstream column key.
    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|f| f.key() == key)
    }

    pub(crate) const fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn slots_follow_declaration_order() {
        for (i, field) in Field::ALL.into_iter().enumerate() {
            assert_eq!(field.slot(), i, "{field} is out of order");
        }
    }

    #[test]
    fn keys_round_trip() {
        for field in Field::ALL {
            assert_eq!(Field::from_key(field.key()), Some(field));
        }
        assert_eq!(Field::from_key("weather_code"), None);
    }
}

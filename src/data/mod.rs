//! Core data model for normalized weather output
//!
//! This module contains the types shared across the fetch/align/extract
//! pipeline: the normalized `WeatherRecord`, the published `WeatherState`,
//! the closed `Condition` label set, and the hourly/daily granularity used
//! to align reference timestamps against the provider's time series.

pub mod client;
pub mod condition;
pub mod extract;
pub mod series;

pub use client::{FetchError, ForecastSource, OpenMeteoClient};
pub use condition::Condition;
pub use extract::{
    build_daily_forecast, build_hourly_forecast, extract_daily, extract_hourly,
    reference_timestamp,
};
pub use series::{find_index, DailySeries, HourlySeries, SeriesError};

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Number of entries in the hourly forecast
pub const HOURLY_FORECAST_LEN: usize = 24;

/// Number of entries in the daily forecast
pub const DAILY_FORECAST_LEN: usize = 6;

/// Sentinel low temperature for hourly records, which have no per-hour low.
/// Inherited from the integration this bridge replaces.
pub const HOURLY_TEMPLOW: f64 = 10.0;

/// Alignment precision when matching a reference timestamp against a series
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Granularity {
    /// Match on the `YYYY-MM-DDTHH` prefix
    Hourly,
    /// Match on the `YYYY-MM-DD` prefix
    Daily,
}

impl Granularity {
    /// Width of the timestamp prefix compared during alignment
    pub fn prefix_len(self) -> usize {
        match self {
            Granularity::Hourly => 13,
            Granularity::Daily => 10,
        }
    }

    /// Step between consecutive forecast entries
    pub fn step(self) -> TimeDelta {
        match self {
            Granularity::Hourly => TimeDelta::hours(1),
            Granularity::Daily => TimeDelta::days(1),
        }
    }

    /// Number of forecast entries built at this granularity
    pub fn forecast_len(self) -> usize {
        match self {
            Granularity::Hourly => HOURLY_FORECAST_LEN,
            Granularity::Daily => DAILY_FORECAST_LEN,
        }
    }
}

/// One normalized weather observation or forecast point
///
/// Temperatures are Celsius, precipitation depths millimeters, wind speeds
/// km/h, pressure hPa, matching the units requested from the API. Fields the
/// daily dataset does not provide (humidity, pressure, cloud cover) are
/// `None` on daily records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherRecord {
    /// Timestamp of the record, UTC attached to the provider's naive time
    pub datetime: DateTime<Utc>,
    /// Temperature (daily records use the day's maximum)
    pub temperature: f64,
    /// Low temperature (daily minimum; fixed sentinel for hourly records)
    pub templow: f64,
    /// Relative humidity percentage, hourly records only
    pub humidity: Option<f64>,
    /// Surface pressure, hourly records only
    pub pressure: Option<f64>,
    /// Wind speed
    pub wind_speed: f64,
    /// Wind direction in degrees
    pub wind_bearing: f64,
    /// Rain depth
    pub rain: f64,
    /// Snowfall depth
    pub snowfall: f64,
    /// Showers depth
    pub showers: f64,
    /// Total precipitation: rain + snowfall + showers for hourly records,
    /// the provider-supplied sum for daily records
    pub precipitation: f64,
    /// Low cloud cover percentage, hourly records only
    pub cloudcover: Option<f64>,
    /// Qualitative condition label
    pub condition: Option<Condition>,
}

/// Published output state, fully owned by the refresh coordinator
///
/// Created empty at startup. Each half (current + hourly, daily) is replaced
/// wholesale when its fetch succeeds and retained unchanged when it fails.
/// `None` entries in the forecasts mean "no aligned data for that slot" and
/// keep their position.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WeatherState {
    /// Current conditions, if an aligned record was found
    pub current_weather: Option<WeatherRecord>,
    /// Forecast for the next 24 hours
    pub hourly_forecast: Vec<Option<WeatherRecord>>,
    /// Forecast for the next 6 days
    pub daily_forecast: Vec<Option<WeatherRecord>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_granularity_prefix_widths() {
        assert_eq!(Granularity::Hourly.prefix_len(), 13);
        assert_eq!(Granularity::Daily.prefix_len(), 10);

        // Prefix widths line up with the ISO-8601 layout they truncate
        let reference = "2023-04-21T02:24:00";
        assert_eq!(&reference[..13], "2023-04-21T02");
        assert_eq!(&reference[..10], "2023-04-21");
    }

    #[test]
    fn test_granularity_steps_and_lengths() {
        assert_eq!(Granularity::Hourly.step(), TimeDelta::hours(1));
        assert_eq!(Granularity::Daily.step(), TimeDelta::days(1));
        assert_eq!(Granularity::Hourly.forecast_len(), 24);
        assert_eq!(Granularity::Daily.forecast_len(), 6);
    }

    #[test]
    fn test_weather_state_starts_empty() {
        let state = WeatherState::default();
        assert!(state.current_weather.is_none());
        assert!(state.hourly_forecast.is_empty());
        assert!(state.daily_forecast.is_empty());
    }

    #[test]
    fn test_weather_record_serialization_roundtrip() {
        let record = WeatherRecord {
            datetime: Utc.with_ymd_and_hms(2023, 4, 21, 2, 0, 0).unwrap(),
            temperature: 7.8,
            templow: HOURLY_TEMPLOW,
            humidity: Some(89.0),
            pressure: Some(1003.6),
            wind_speed: 10.1,
            wind_bearing: 345.0,
            rain: 0.0,
            snowfall: 0.0,
            showers: 0.0,
            precipitation: 0.0,
            cloudcover: Some(25.0),
            condition: Some(Condition::PartlyCloudy),
        };

        let json = serde_json::to_string(&record).expect("Failed to serialize WeatherRecord");
        assert!(json.contains("\"partlycloudy\""));
        assert!(json.contains("2023-04-21T02:00:00Z"));

        let deserialized: WeatherRecord =
            serde_json::from_str(&json).expect("Failed to deserialize WeatherRecord");
        assert_eq!(deserialized, record);
    }
}

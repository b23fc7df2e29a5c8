//! Record extraction and forecast building
//!
//! Pure computation over validated series payloads: align a reference
//! timestamp, read every field at the matched index, normalize the naive
//! provider timestamp to UTC, and resolve a condition label. The forecast
//! builders repeat that extraction at a fixed step, preserving gaps.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};
use log::warn;

use super::{
    find_index, Condition, DailySeries, Granularity, HourlySeries, SeriesError, WeatherRecord,
    HOURLY_TEMPLOW,
};

/// Formats a timestamp into the reference string the aligner truncates
///
/// One reference per refresh cycle is computed from this and shared by the
/// current, hourly and daily extractions.
pub fn reference_timestamp(datetime: DateTime<Utc>) -> String {
    datetime.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Attaches UTC to a zone-naive hourly timestamp ("2023-04-21T02:00")
fn parse_hourly_datetime(raw: &str) -> Result<DateTime<Utc>, SeriesError> {
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S"))
        .map(|naive| naive.and_utc())
        .map_err(|_| SeriesError::InvalidTimestamp(raw.to_string()))
}

/// Attaches UTC midnight to a daily date string ("2023-04-21")
fn parse_daily_datetime(raw: &str) -> Result<DateTime<Utc>, SeriesError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| SeriesError::InvalidTimestamp(raw.to_string()))
}

/// Resolves a code-table lookup, handling codes outside the table
///
/// The provider contract guarantees every emitted code is covered, so a miss
/// is a data-consistency bug: loud in debug builds, a logged cloudy fallback
/// in release. Never a label outside the closed set.
fn map_weather_code(code: u8) -> Condition {
    match Condition::from_wmo_code(code) {
        Some(condition) => condition,
        None => {
            debug_assert!(false, "unmapped WMO weather code {}", code);
            warn!("unmapped WMO weather code {}, reporting cloudy", code);
            Condition::Cloudy
        }
    }
}

/// Extracts one normalized record from the hourly series
///
/// # Arguments
/// * `series` - validated hourly payload
/// * `reference` - reference timestamp string, aligned at hourly granularity
///
/// # Returns
/// * `Ok(Some(record))` - aligned record at the matched index
/// * `Ok(None)` - no series entry matches the reference
/// * `Err(SeriesError)` - invalid reference or unparseable stored timestamp
pub fn extract_hourly(
    series: &HourlySeries,
    reference: &str,
) -> Result<Option<WeatherRecord>, SeriesError> {
    let Some(index) = find_index(&series.time, reference, Granularity::Hourly)? else {
        return Ok(None);
    };

    let rain = series.rain[index];
    let showers = series.showers[index];
    let snowfall = series.snowfall[index];
    let precipitation = rain + snowfall + showers;
    let cloudcover = series.cloudcover_low[index];

    let condition = match &series.weathercode {
        Some(codes) => map_weather_code(codes[index]),
        None => Condition::from_heuristics(precipitation, Some(cloudcover)),
    };

    Ok(Some(WeatherRecord {
        datetime: parse_hourly_datetime(&series.time[index])?,
        temperature: series.temperature_2m[index],
        templow: HOURLY_TEMPLOW,
        humidity: Some(series.relativehumidity_2m[index]),
        pressure: Some(series.surface_pressure[index]),
        wind_speed: series.windspeed_10m[index],
        wind_bearing: series.winddirection_10m[index],
        rain,
        snowfall,
        showers,
        precipitation,
        cloudcover: Some(cloudcover),
        condition: Some(condition),
    }))
}

/// Extracts one normalized record from the daily series
///
/// Temperature is the day's maximum, `templow` the minimum, and
/// `precipitation` the provider-supplied daily sum. Humidity, pressure and
/// cloud cover have no daily counterpart and stay `None`.
pub fn extract_daily(
    series: &DailySeries,
    reference: &str,
) -> Result<Option<WeatherRecord>, SeriesError> {
    let Some(index) = find_index(&series.time, reference, Granularity::Daily)? else {
        return Ok(None);
    };

    Ok(Some(WeatherRecord {
        datetime: parse_daily_datetime(&series.time[index])?,
        temperature: series.temperature_2m_max[index],
        templow: series.temperature_2m_min[index],
        humidity: None,
        pressure: None,
        wind_speed: series.windspeed_10m_max[index],
        wind_bearing: series.winddirection_10m_dominant[index],
        rain: series.rain_sum[index],
        snowfall: series.snowfall_sum[index],
        showers: series.showers_sum[index],
        precipitation: series.precipitation_sum[index],
        cloudcover: None,
        condition: Some(map_weather_code(series.weathercode[index])),
    }))
}

/// Builds the 24-entry hourly forecast starting after `start`
///
/// Advances the reference one hour per entry before extracting, so the first
/// entry is `start + 1h`. Entries that find no aligned data stay `None` at
/// their position; the result is always exactly 24 entries in chronological
/// order.
pub fn build_hourly_forecast(
    series: &HourlySeries,
    start: DateTime<Utc>,
) -> Result<Vec<Option<WeatherRecord>>, SeriesError> {
    build_forecast(start, Granularity::Hourly, |reference| {
        extract_hourly(series, reference)
    })
}

/// Builds the 6-entry daily forecast starting the day after `start`
pub fn build_daily_forecast(
    series: &DailySeries,
    start: DateTime<Utc>,
) -> Result<Vec<Option<WeatherRecord>>, SeriesError> {
    build_forecast(start, Granularity::Daily, |reference| {
        extract_daily(series, reference)
    })
}

/// Shared stepping loop behind both forecast builders
fn build_forecast<F>(
    start: DateTime<Utc>,
    granularity: Granularity,
    mut extract: F,
) -> Result<Vec<Option<WeatherRecord>>, SeriesError>
where
    F: FnMut(&str) -> Result<Option<WeatherRecord>, SeriesError>,
{
    let step: TimeDelta = granularity.step();
    let mut cursor = start;
    let mut forecast = Vec::with_capacity(granularity.forecast_len());

    for _ in 0..granularity.forecast_len() {
        cursor += step;
        forecast.push(extract(&reference_timestamp(cursor))?);
    }

    Ok(forecast)
}

//! Typed Open-Meteo time-series payloads and reference-timestamp alignment
//!
//! The API returns parallel arrays: one `time` array of zone-naive ISO-8601
//! strings and one value array per requested field, all sharing the same
//! implicit index space. The structs here give that contract a concrete
//! shape, `validate` enforces the equal-length invariant at the fetch
//! boundary, and `find_index` locates the array position matching a
//! reference timestamp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::Granularity;

/// Errors raised by alignment and shape validation
#[derive(Debug, Error)]
pub enum SeriesError {
    /// The reference timestamp is too short to carry the alignment prefix;
    /// a programming-contract violation, not a data condition
    #[error("reference timestamp '{reference}' is shorter than the {expected}-character alignment prefix")]
    InvalidReference { reference: String, expected: usize },

    /// A field array's length differs from the `time` array's
    #[error("series field '{field}' has {actual} entries, expected {expected}")]
    LengthMismatch {
        field: &'static str,
        expected: usize,
        actual: usize,
    },

    /// A stored timestamp could not be parsed
    #[error("invalid timestamp in series: '{0}'")]
    InvalidTimestamp(String),
}

/// Hourly dataset: parallel arrays indexed together with `time`
///
/// `weathercode` is optional; deployments predating the code field omit it,
/// in which case conditions fall back to the precipitation/cloud-cover
/// heuristic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HourlySeries {
    pub time: Vec<String>,
    pub temperature_2m: Vec<f64>,
    pub relativehumidity_2m: Vec<f64>,
    pub rain: Vec<f64>,
    pub showers: Vec<f64>,
    pub snowfall: Vec<f64>,
    pub cloudcover_low: Vec<f64>,
    pub windspeed_10m: Vec<f64>,
    pub winddirection_10m: Vec<f64>,
    pub surface_pressure: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weathercode: Option<Vec<u8>>,
}

/// Daily dataset: parallel arrays indexed together with `time`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailySeries {
    pub time: Vec<String>,
    pub weathercode: Vec<u8>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub rain_sum: Vec<f64>,
    pub showers_sum: Vec<f64>,
    pub snowfall_sum: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub windspeed_10m_max: Vec<f64>,
    pub winddirection_10m_dominant: Vec<f64>,
}

fn check_len(field: &'static str, actual: usize, expected: usize) -> Result<(), SeriesError> {
    if actual != expected {
        return Err(SeriesError::LengthMismatch {
            field,
            expected,
            actual,
        });
    }
    Ok(())
}

impl HourlySeries {
    /// Verifies every field array is as long as the `time` array
    ///
    /// Called once at the fetch boundary so that extraction can index
    /// without re-checking shape.
    pub fn validate(&self) -> Result<(), SeriesError> {
        let expected = self.time.len();
        check_len("temperature_2m", self.temperature_2m.len(), expected)?;
        check_len(
            "relativehumidity_2m",
            self.relativehumidity_2m.len(),
            expected,
        )?;
        check_len("rain", self.rain.len(), expected)?;
        check_len("showers", self.showers.len(), expected)?;
        check_len("snowfall", self.snowfall.len(), expected)?;
        check_len("cloudcover_low", self.cloudcover_low.len(), expected)?;
        check_len("windspeed_10m", self.windspeed_10m.len(), expected)?;
        check_len("winddirection_10m", self.winddirection_10m.len(), expected)?;
        check_len("surface_pressure", self.surface_pressure.len(), expected)?;
        if let Some(codes) = &self.weathercode {
            check_len("weathercode", codes.len(), expected)?;
        }
        Ok(())
    }
}

impl DailySeries {
    /// Verifies every field array is as long as the `time` array
    pub fn validate(&self) -> Result<(), SeriesError> {
        let expected = self.time.len();
        check_len("weathercode", self.weathercode.len(), expected)?;
        check_len("temperature_2m_max", self.temperature_2m_max.len(), expected)?;
        check_len("temperature_2m_min", self.temperature_2m_min.len(), expected)?;
        check_len("rain_sum", self.rain_sum.len(), expected)?;
        check_len("showers_sum", self.showers_sum.len(), expected)?;
        check_len("snowfall_sum", self.snowfall_sum.len(), expected)?;
        check_len("precipitation_sum", self.precipitation_sum.len(), expected)?;
        check_len("windspeed_10m_max", self.windspeed_10m_max.len(), expected)?;
        check_len(
            "winddirection_10m_dominant",
            self.winddirection_10m_dominant.len(),
            expected,
        )?;
        Ok(())
    }
}

/// Finds the array index matching a reference timestamp
///
/// Truncates `reference` to the granularity's prefix width and scans `times`
/// for the first entry containing that prefix as a substring. Substring
/// containment, rather than exact prefix equality, tolerates zone-offset
/// suffixes on the stored timestamps.
///
/// # Returns
/// * `Ok(Some(index))` - position of the first matching entry
/// * `Ok(None)` - no entry matches (including an empty `times`)
/// * `Err(SeriesError::InvalidReference)` - reference shorter than the prefix
pub fn find_index(
    times: &[String],
    reference: &str,
    granularity: Granularity,
) -> Result<Option<usize>, SeriesError> {
    let width = granularity.prefix_len();
    let prefix = reference
        .get(..width)
        .ok_or_else(|| SeriesError::InvalidReference {
            reference: reference.to_string(),
            expected: width,
        })?;

    Ok(times.iter().position(|time| time.contains(prefix)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hour_strings() -> Vec<String> {
        (0..24)
            .map(|h| format!("2023-04-21T{:02}:00", h))
            .collect()
    }

    #[test]
    fn test_find_index_hourly_match() {
        let times = hour_strings();
        let index = find_index(&times, "2023-04-21T02:24:00", Granularity::Hourly).unwrap();
        assert_eq!(index, Some(2));
    }

    #[test]
    fn test_find_index_returns_first_match() {
        let times = vec![
            "2023-04-21T02:00".to_string(),
            "2023-04-21T02:00".to_string(),
        ];
        let index = find_index(&times, "2023-04-21T02:24:00", Granularity::Hourly).unwrap();
        assert_eq!(index, Some(0));
    }

    #[test]
    fn test_find_index_daily_match() {
        let times = vec![
            "2023-04-21".to_string(),
            "2023-04-22".to_string(),
            "2023-04-23".to_string(),
        ];
        let index = find_index(&times, "2023-04-22T18:00:00", Granularity::Daily).unwrap();
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_find_index_tolerates_zone_suffix() {
        // Stored timestamps may carry an offset; substring containment still matches
        let times = vec![
            "2023-04-21T01:00:00+02:00".to_string(),
            "2023-04-21T02:00:00+02:00".to_string(),
        ];
        let index = find_index(&times, "2023-04-21T02:24:00", Granularity::Hourly).unwrap();
        assert_eq!(index, Some(1));
    }

    #[test]
    fn test_find_index_no_match() {
        let times = hour_strings();
        let index = find_index(&times, "2023-04-25T02:24:00", Granularity::Hourly).unwrap();
        assert_eq!(index, None);
    }

    #[test]
    fn test_find_index_empty_series() {
        let index = find_index(&[], "2023-04-21T02:24:00", Granularity::Hourly).unwrap();
        assert_eq!(index, None);
    }

    #[test]
    fn test_find_index_short_reference_is_invalid_input() {
        let times = hour_strings();
        let result = find_index(&times, "2023-04", Granularity::Hourly);
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReference { expected: 13, .. })
        ));

        // Empty reference is the null-reference case
        let result = find_index(&times, "", Granularity::Daily);
        assert!(matches!(
            result,
            Err(SeriesError::InvalidReference { expected: 10, .. })
        ));
    }

    fn minimal_hourly(len: usize) -> HourlySeries {
        HourlySeries {
            time: (0..len).map(|h| format!("2023-04-21T{:02}:00", h)).collect(),
            temperature_2m: vec![7.0; len],
            relativehumidity_2m: vec![80.0; len],
            rain: vec![0.0; len],
            showers: vec![0.0; len],
            snowfall: vec![0.0; len],
            cloudcover_low: vec![20.0; len],
            windspeed_10m: vec![10.0; len],
            winddirection_10m: vec![180.0; len],
            surface_pressure: vec![1010.0; len],
            weathercode: Some(vec![2; len]),
        }
    }

    #[test]
    fn test_hourly_validate_accepts_equal_lengths() {
        assert!(minimal_hourly(3).validate().is_ok());
    }

    #[test]
    fn test_hourly_validate_rejects_mismatched_lengths() {
        let mut series = minimal_hourly(3);
        series.rain.pop();
        let err = series.validate().unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch {
                field: "rain",
                expected: 3,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_hourly_validate_checks_optional_weathercode() {
        let mut series = minimal_hourly(3);
        series.weathercode = Some(vec![2, 3]);
        assert!(series.validate().is_err());

        series.weathercode = None;
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_hourly_series_deserializes_without_weathercode() {
        let json = r#"{
            "time": ["2023-04-21T00:00"],
            "temperature_2m": [7.0],
            "relativehumidity_2m": [80],
            "rain": [0.0],
            "showers": [0.0],
            "snowfall": [0.0],
            "cloudcover_low": [20],
            "windspeed_10m": [10.0],
            "winddirection_10m": [180],
            "surface_pressure": [1010.0]
        }"#;
        let series: HourlySeries = serde_json::from_str(json).expect("Failed to parse");
        assert!(series.weathercode.is_none());
        assert!(series.validate().is_ok());
    }

    #[test]
    fn test_daily_validate_rejects_mismatched_lengths() {
        let series = DailySeries {
            time: vec!["2023-04-21".to_string(), "2023-04-22".to_string()],
            weathercode: vec![61],
            temperature_2m_max: vec![12.0, 13.0],
            temperature_2m_min: vec![4.0, 5.0],
            rain_sum: vec![1.0, 0.0],
            showers_sum: vec![0.0, 0.0],
            snowfall_sum: vec![0.0, 0.0],
            precipitation_sum: vec![1.0, 0.0],
            windspeed_10m_max: vec![20.0, 18.0],
            winddirection_10m_dominant: vec![200.0, 210.0],
        };
        let err = series.validate().unwrap_err();
        assert!(matches!(
            err,
            SeriesError::LengthMismatch {
                field: "weathercode",
                ..
            }
        ));
    }
}

//! Runtime configuration for the forecast bridge
//!
//! The query parameters sent to the Open-Meteo API (coordinates, endpoint,
//! refresh cadence) are configuration, not core logic. The shape of the
//! returned JSON is a hard contract owned by the `data` module.

use std::time::Duration;

/// Base URL of the default Open-Meteo deployment (DWD ICON model)
pub const DEFAULT_BASE_URL: &str = "https://api.open-meteo.com/v1/dwd-icon";

/// Default latitude of the forecast point
pub const DEFAULT_LATITUDE: f64 = 45.69;

/// Default longitude of the forecast point
pub const DEFAULT_LONGITUDE: f64 = 21.24;

/// Default minutes between refresh cycles
pub const DEFAULT_INTERVAL_MINS: u64 = 30;

/// Configuration for the Open-Meteo client and the refresh loop
#[derive(Debug, Clone)]
pub struct WeatherConfig {
    /// Latitude of the forecast point
    pub latitude: f64,
    /// Longitude of the forecast point
    pub longitude: f64,
    /// Base URL of the Open-Meteo compatible API
    pub base_url: String,
    /// Interval between refresh cycles
    pub refresh_interval: Duration,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
            base_url: DEFAULT_BASE_URL.to_string(),
            refresh_interval: Duration::from_secs(DEFAULT_INTERVAL_MINS * 60),
        }
    }
}

impl WeatherConfig {
    /// Creates a config with custom coordinates, keeping the remaining defaults
    pub fn with_coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = latitude;
        self.longitude = longitude;
        self
    }

    /// Overrides the API base URL (used for self-hosted deployments and tests)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the refresh interval
    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = WeatherConfig::default();
        assert!((config.latitude - DEFAULT_LATITUDE).abs() < 0.0001);
        assert!((config.longitude - DEFAULT_LONGITUDE).abs() < 0.0001);
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.refresh_interval, Duration::from_secs(1800));
    }

    #[test]
    fn test_config_builders() {
        let config = WeatherConfig::default()
            .with_coordinates(49.28, -123.12)
            .with_base_url("http://localhost:8080/v1/forecast")
            .with_refresh_interval(Duration::from_secs(60));

        assert!((config.latitude - 49.28).abs() < 0.0001);
        assert!((config.longitude - (-123.12)).abs() < 0.0001);
        assert_eq!(config.base_url, "http://localhost:8080/v1/forecast");
        assert_eq!(config.refresh_interval, Duration::from_secs(60));
    }
}

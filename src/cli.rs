//! Command-line interface for the meteobridge binary
//!
//! All knobs are query/scheduling configuration; nothing here changes the
//! normalization logic. Parsed arguments map onto a `WeatherConfig`.

use std::time::Duration;

use clap::Parser;

use crate::config::{
    WeatherConfig, DEFAULT_BASE_URL, DEFAULT_INTERVAL_MINS, DEFAULT_LATITUDE, DEFAULT_LONGITUDE,
};

/// Open-Meteo forecast bridge for home-automation consumers
#[derive(Parser, Debug)]
#[command(name = "meteobridge")]
#[command(about = "Fetches Open-Meteo forecasts and publishes normalized current/hourly/daily weather")]
#[command(version)]
pub struct Cli {
    /// Latitude of the forecast point
    #[arg(long, default_value_t = DEFAULT_LATITUDE, allow_negative_numbers = true)]
    pub latitude: f64,

    /// Longitude of the forecast point
    #[arg(long, default_value_t = DEFAULT_LONGITUDE, allow_negative_numbers = true)]
    pub longitude: f64,

    /// Minutes between refresh cycles
    #[arg(long, value_name = "MINUTES", default_value_t = DEFAULT_INTERVAL_MINS)]
    pub interval_mins: u64,

    /// Base URL of the Open-Meteo compatible API
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Run a single refresh cycle, print the state as JSON, and exit
    #[arg(long)]
    pub once: bool,
}

impl Cli {
    /// Builds the runtime configuration from the parsed arguments
    pub fn to_config(&self) -> WeatherConfig {
        WeatherConfig::default()
            .with_coordinates(self.latitude, self.longitude)
            .with_base_url(self.base_url.clone())
            .with_refresh_interval(Duration::from_secs(self.interval_mins * 60))
    }
}

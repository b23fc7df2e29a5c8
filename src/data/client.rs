//! Open-Meteo API client
//!
//! Two independent endpoints back the published state: an hourly-parameterized
//! query and a daily-parameterized one. Each fetch is a single best-effort
//! call; failures are returned to the coordinator, never retried here, and a
//! failure on one endpoint does not touch the other. Payload shape is
//! validated at this boundary so extraction can assume well-formed input.

use std::future::Future;

use log::debug;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use thiserror::Error;

use super::series::{DailySeries, HourlySeries, SeriesError};
use crate::config::WeatherConfig;

/// Hourly field list requested from the API, in `HourlySeries` order
const HOURLY_FIELDS: &str = "temperature_2m,relativehumidity_2m,rain,showers,snowfall,\
cloudcover_low,windspeed_10m,winddirection_10m,surface_pressure,weathercode";

/// Daily field list requested from the API, in `DailySeries` order
const DAILY_FIELDS: &str = "weathercode,temperature_2m_max,temperature_2m_min,rain_sum,\
showers_sum,snowfall_sum,precipitation_sum,windspeed_10m_max,winddirection_10m_dominant";

/// Errors that can occur when fetching forecast data
#[derive(Debug, Error)]
pub enum FetchError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("unexpected HTTP status: {0}")]
    Status(StatusCode),

    /// Failed to parse the JSON response
    #[error("failed to parse JSON response: {0}")]
    Decode(#[from] serde_json::Error),

    /// Response parsed but violates the parallel-array shape contract
    #[error("malformed series payload: {0}")]
    Shape(#[from] SeriesError),
}

/// Source of forecast datasets, seam between the coordinator and the network
pub trait ForecastSource: Send + Sync {
    /// Fetches and validates the hourly dataset
    fn fetch_hourly(&self) -> impl Future<Output = Result<HourlySeries, FetchError>> + Send;

    /// Fetches and validates the daily dataset
    fn fetch_daily(&self) -> impl Future<Output = Result<DailySeries, FetchError>> + Send;
}

/// Client for the Open-Meteo forecast API
#[derive(Debug, Clone)]
pub struct OpenMeteoClient {
    client: Client,
    config: WeatherConfig,
}

/// Envelope around the `hourly` key of the hourly endpoint response
#[derive(Debug, Deserialize)]
struct HourlyResponse {
    hourly: HourlySeries,
}

/// Envelope around the `daily` key of the daily endpoint response
#[derive(Debug, Deserialize)]
struct DailyResponse {
    daily: DailySeries,
}

impl OpenMeteoClient {
    /// Creates a client for the configured endpoint and coordinates
    pub fn new(config: WeatherConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    /// Creates a client with a custom HTTP client
    pub fn with_client(client: Client, config: WeatherConfig) -> Self {
        Self { client, config }
    }

    fn hourly_url(&self) -> String {
        format!(
            "{}?latitude={}&longitude={}&hourly={}",
            self.config.base_url, self.config.latitude, self.config.longitude, HOURLY_FIELDS
        )
    }

    fn daily_url(&self) -> String {
        // The daily endpoint refuses requests without an explicit timezone
        format!(
            "{}?latitude={}&longitude={}&daily={}&timezone=UTC",
            self.config.base_url, self.config.latitude, self.config.longitude, DAILY_FIELDS
        )
    }

    async fn get_text(&self, url: &str) -> Result<String, FetchError> {
        debug!("GET {}", url);
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }
        Ok(response.text().await?)
    }
}

impl ForecastSource for OpenMeteoClient {
    async fn fetch_hourly(&self) -> Result<HourlySeries, FetchError> {
        let text = self.get_text(&self.hourly_url()).await?;
        let response: HourlyResponse = serde_json::from_str(&text)?;
        response.hourly.validate()?;
        Ok(response.hourly)
    }

    async fn fetch_daily(&self) -> Result<DailySeries, FetchError> {
        let text = self.get_text(&self.daily_url()).await?;
        let response: DailyResponse = serde_json::from_str(&text)?;
        response.daily.validate()?;
        Ok(response.daily)
    }
}

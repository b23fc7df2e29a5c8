//! Meteobridge library
//!
//! Fetches hourly and daily forecasts from the Open-Meteo API, normalizes the
//! parallel-array payloads into current/hourly/daily weather records, and
//! republishes them on a fixed cadence through a shared coordinator.

pub mod cli;
pub mod config;
pub mod coordinator;
pub mod data;

//! Qualitative weather condition labels and the mappings that produce them
//!
//! Two modes exist: the primary WMO weather-code table, and a legacy
//! precipitation/cloud-cover heuristic used only when a payload carries no
//! `weathercode` array. Both draw from the same closed label set understood
//! by the downstream home-automation consumer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed set of condition labels
///
/// Serializes to the exact label strings the consumer expects
/// (e.g. "partlycloudy", "snowy-rainy"). No label outside this set is ever
/// produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    #[serde(rename = "sunny")]
    Sunny,
    #[serde(rename = "partlycloudy")]
    PartlyCloudy,
    #[serde(rename = "cloudy")]
    Cloudy,
    #[serde(rename = "fog")]
    Fog,
    #[serde(rename = "rainy")]
    Rainy,
    #[serde(rename = "snowy-rainy")]
    SnowyRainy,
    #[serde(rename = "pouring")]
    Pouring,
    #[serde(rename = "snow")]
    Snow,
    #[serde(rename = "lightning-rainy")]
    LightningRainy,
}

impl Condition {
    /// Returns the consumer-facing label string
    pub fn label(self) -> &'static str {
        match self {
            Condition::Sunny => "sunny",
            Condition::PartlyCloudy => "partlycloudy",
            Condition::Cloudy => "cloudy",
            Condition::Fog => "fog",
            Condition::Rainy => "rainy",
            Condition::SnowyRainy => "snowy-rainy",
            Condition::Pouring => "pouring",
            Condition::Snow => "snow",
            Condition::LightningRainy => "lightning-rainy",
        }
    }

    /// Maps a WMO weather code to a condition label
    ///
    /// Weather codes from WMO (World Meteorological Organization):
    /// - 0: Clear sky, 1-3: increasing cloud cover
    /// - 45, 48: Fog
    /// - 51-55: Drizzle
    /// - 56-57: Freezing drizzle
    /// - 61-65: Rain (65 heavy)
    /// - 66-67: Freezing rain
    /// - 71-77: Snow
    /// - 80-82: Rain showers (82 violent)
    /// - 85-86: Snow showers
    /// - 95-99: Thunderstorm
    ///
    /// Codes 0 and 1 both map to sunny with no day/night distinction; that
    /// matches the consumer's table and stays as-is. Returns `None` for any
    /// code outside the table — the provider contract covers every code it
    /// emits, so a miss is a data-consistency error the caller must handle.
    pub fn from_wmo_code(code: u8) -> Option<Condition> {
        match code {
            0 | 1 => Some(Condition::Sunny),
            2 => Some(Condition::PartlyCloudy),
            3 => Some(Condition::Cloudy),
            45 | 48 => Some(Condition::Fog),
            51 | 53 | 55 | 61 | 63 | 80 | 81 => Some(Condition::Rainy),
            56 | 57 | 66 | 67 => Some(Condition::SnowyRainy),
            65 | 82 => Some(Condition::Pouring),
            71 | 73 | 75 | 77 | 85 | 86 => Some(Condition::Snow),
            95 | 96 | 99 => Some(Condition::LightningRainy),
            _ => None,
        }
    }

    /// Legacy fallback for payloads without weather codes
    ///
    /// Any precipitation means rainy; otherwise low cloud cover decides
    /// between sunny, partlycloudy and cloudy. Missing cloud cover reads as
    /// cloudy. The middle band is the intended `10 < cover < 50` range; the
    /// integration this replaces had an operator-precedence bug here that is
    /// deliberately not carried over.
    pub fn from_heuristics(precipitation: f64, cloudcover: Option<f64>) -> Condition {
        if precipitation > 0.0 {
            return Condition::Rainy;
        }
        match cloudcover {
            Some(cover) if cover < 10.0 => Condition::Sunny,
            Some(cover) if cover > 10.0 && cover < 50.0 => Condition::PartlyCloudy,
            _ => Condition::Cloudy,
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

//! Display-unit selection over the provider's dual-unit readings.
//!
//! Nothing here converts between units: the provider already supplies Celsius
//! and Fahrenheit, kph and mph. Selection picks one side and, for
//! temperatures, rounds it.

use serde::{Deserialize, Serialize};

use crate::models::CurrentReading;

// ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "C")]
    Celsius,
    #[serde(rename = "F")]
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WindUnit {
    #[default]
    Kph,
    Mph,
}

impl WindUnit {
    pub fn label(self) -> &'static str {
        match self {
            Self::Kph => "kph",
            Self::Mph => "mph",
        }
    }
}

/// Per-session unit preferences. The default (Celsius, kph) is what every
/// freshly fetched record is shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DisplayUnits {
    pub temperature: TemperatureUnit,
    pub wind: WindUnit,
}

impl DisplayUnits {
    /// Apply whichever toggles are given; absent toggles keep their value.
    pub fn select(self, temperature: Option<TemperatureUnit>, wind: Option<WindUnit>) -> Self {
        Self {
            temperature: temperature.unwrap_or(self.temperature),
            wind: wind.unwrap_or(self.wind),
        }
    }
}

/// Round half toward positive infinity, so `21.5 → 22` and `-2.5 → -2`.
pub fn round_degrees(value: f64) -> i64 {
    let floor = value.floor();
    if value - floor >= 0.5 {
        floor as i64 + 1
    } else {
        floor as i64
    }
}

/// Displayed temperature, rounded in the selected unit.
pub fn temperature(reading: &CurrentReading, unit: TemperatureUnit) -> i64 {
    match unit {
        TemperatureUnit::Celsius => round_degrees(reading.temp_c),
        TemperatureUnit::Fahrenheit => round_degrees(reading.temp_f),
    }
}

/// "Feels like" value, rounded in the selected unit independently of
/// [`temperature`].
pub fn feels_like(reading: &CurrentReading, unit: TemperatureUnit) -> i64 {
    match unit {
        TemperatureUnit::Celsius => round_degrees(reading.feelslike_c),
        TemperatureUnit::Fahrenheit => round_degrees(reading.feelslike_f),
    }
}

/// Wind speed exactly as supplied, unrounded.
pub fn wind_speed(reading: &CurrentReading, unit: WindUnit) -> f64 {
    match unit {
        WindUnit::Kph => reading.wind_kph,
        WindUnit::Mph => reading.wind_mph,
    }
}

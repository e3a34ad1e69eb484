//! Raw provider records as returned by the weatherapi.com endpoints.
//!
//! Only the fields the presentation layer consumes are modelled. Fields the
//! provider may omit are `Option` so a partial payload still decodes; the
//! view layer substitutes placeholders for whatever is missing.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ---

/// Location metadata shared by both endpoints.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LocationInfo {
    // ---
    pub name: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub country: String,
}

/// Free-text condition label plus icon reference.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Condition {
    // ---
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

/// Body of `GET /current.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrentConditions {
    // ---
    pub location: LocationInfo,
    pub current: CurrentReading,
}

/// A single point-in-time reading; the provider supplies both unit systems.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CurrentReading {
    // ---
    pub temp_c: f64,
    pub temp_f: f64,
    pub feelslike_c: f64,
    pub feelslike_f: f64,
    pub wind_kph: f64,
    pub wind_mph: f64,
    #[serde(default)]
    pub wind_degree: Option<u16>,
    #[serde(default)]
    pub wind_dir: String,
    pub humidity: f64,
    pub pressure_mb: f64,
    pub pressure_in: f64,
    pub uv: f64,
    pub vis_km: f64,
    #[serde(default)]
    pub condition: Condition,
    #[serde(default)]
    pub air_quality: Option<AirQualityReading>,
}

/// Pollutant concentrations and the provider's two precomputed indices.
///
/// Indices are decoded leniently: numbers and numeric strings are kept,
/// anything else becomes `None` and classifies as unknown.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AirQualityReading {
    // ---
    #[serde(default)]
    pub co: Option<f64>,
    #[serde(default)]
    pub no2: Option<f64>,
    #[serde(default)]
    pub o3: Option<f64>,
    #[serde(default)]
    pub so2: Option<f64>,
    #[serde(default)]
    pub pm2_5: Option<f64>,
    #[serde(default)]
    pub pm10: Option<f64>,
    #[serde(rename = "us-epa-index", default, deserialize_with = "lenient_index")]
    pub us_epa_index: Option<f64>,
    #[serde(rename = "gb-defra-index", default, deserialize_with = "lenient_index")]
    pub gb_defra_index: Option<f64>,
}

/// Body of `GET /forecast.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastResponse {
    // ---
    pub location: LocationInfo,
    pub forecast: Forecast,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Forecast {
    #[serde(default)]
    pub forecastday: Vec<ForecastDay>,
}

/// One forecast day: aggregates plus the hourly breakdown in provider order.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ForecastDay {
    // ---
    pub date: NaiveDate,
    pub day: DaySummary,
    #[serde(default)]
    pub hour: Vec<HourSample>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DaySummary {
    // ---
    pub maxtemp_c: f64,
    pub mintemp_c: f64,
    pub avgtemp_c: f64,
    #[serde(default)]
    pub uv: f64,
    #[serde(default)]
    pub condition: Condition,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct HourSample {
    // ---
    /// Local time as `YYYY-MM-DD HH:MM`.
    pub time: String,
    pub temp_c: f64,
    #[serde(default)]
    pub condition: Condition,
}

fn lenient_index<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    // ---
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}

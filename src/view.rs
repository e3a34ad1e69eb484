//! View documents: the JSON the presentation layer renders.
//!
//! Each builder is a pure function from provider records (plus the active
//! display units) to labels, tier classes and preformatted strings.

use serde::Serialize;

use crate::classify::{defra_label, epa_label, mood_for, AqiLabel, Mood};
use crate::models::{
    AirQualityReading, CurrentConditions, ForecastDay, ForecastResponse, HourSample, LocationInfo,
};
use crate::session::{ActiveView, CurrentSlot, Session};
use crate::units::{self, DisplayUnits, TemperatureUnit};

/// Shown for any pollutant the provider omitted.
pub const PLACEHOLDER: &str = "—";

pub const POLLUTANT_UNIT: &str = "µg/m³";

// ---

/// Top-level document returned by the view routes.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ViewDocument {
    /// Nothing searched yet.
    Idle { hint: &'static str },
    /// A search is in flight.
    Loading,
    /// Current-conditions panel.
    Current(CurrentPanel),
    /// Forecast panel.
    Forecast(ForecastPanel),
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum CurrentPanel {
    Loaded(Box<CurrentView>),
    Failed { error: String },
    Empty,
}

#[derive(Debug, Serialize)]
pub struct CurrentView {
    // ---
    pub location: String,
    pub mood: Mood,
    pub units: DisplayUnits,
    pub temperature: String,
    pub feels_like: String,
    pub condition: String,
    pub icon_url: String,
    pub uv: f64,
    pub visibility: String,
    pub wind: String,
    pub wind_direction: String,
    pub wind_degree: u16,
    pub pressure: String,
    pub humidity: String,
    pub air_quality: Option<AirQualityView>,
}

#[derive(Debug, Serialize)]
pub struct AirQualityView {
    pub epa: AqiLabel,
    pub defra: AqiLabel,
    pub pollutants: Vec<PollutantView>,
}

#[derive(Debug, Serialize)]
pub struct PollutantView {
    pub name: &'static str,
    pub value: String,
    pub unit: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ForecastPanel {
    Loaded(ForecastView),
    Empty {
        title: &'static str,
        hint: &'static str,
    },
}

#[derive(Debug, Serialize)]
pub struct ForecastView {
    pub location: Option<String>,
    pub days: Vec<DayView>,
}

#[derive(Debug, Serialize)]
pub struct DayView {
    pub date: String,
    pub condition: String,
    pub icon_url: String,
    pub max: String,
    pub min: String,
    pub avg: String,
    pub uv: f64,
    pub hours: Vec<HourView>,
}

#[derive(Debug, Serialize)]
pub struct HourView {
    pub time: String,
    pub icon_url: String,
    pub temperature: String,
    pub bar_height_px: i64,
}

/// Render whatever the session currently shows.
pub fn render(session: &Session) -> ViewDocument {
    // ---
    if session.is_pending() {
        return ViewDocument::Loading;
    }
    if !session.has_searched() {
        return ViewDocument::Idle {
            hint: "Enter a city or location and search to see the weather.",
        };
    }
    match session.view() {
        ActiveView::Current => ViewDocument::Current(current_panel(session)),
        ActiveView::Forecast => ViewDocument::Forecast(forecast_panel(session)),
    }
}

/// Render the current-conditions panel regardless of the active view.
pub fn current_panel(session: &Session) -> CurrentPanel {
    match session.current() {
        Some(CurrentSlot::Loaded(c)) => {
            CurrentPanel::Loaded(Box::new(current_view(c, session.units())))
        }
        Some(CurrentSlot::Failed(reason)) => CurrentPanel::Failed {
            error: reason.clone(),
        },
        None => CurrentPanel::Empty,
    }
}

fn forecast_panel(session: &Session) -> ForecastPanel {
    // ---
    let location = match session.current() {
        Some(CurrentSlot::Loaded(c)) => Some(&c.location),
        _ => None,
    };
    match session.forecast() {
        Some(forecast) => ForecastPanel::Loaded(forecast_view(forecast, location)),
        None => ForecastPanel::Empty {
            title: "No forecast data",
            hint: "Search a location to load the 3-day forecast.",
        },
    }
}

/// Build the current-conditions view in the given display units.
pub fn current_view(data: &CurrentConditions, display: DisplayUnits) -> CurrentView {
    // ---
    let reading = &data.current;
    let temp_symbol = match display.temperature {
        TemperatureUnit::Celsius => "°C",
        TemperatureUnit::Fahrenheit => "°F",
    };
    let wind_degree = reading.wind_degree.unwrap_or(0);

    CurrentView {
        location: location_line(&data.location),
        mood: mood_for(&reading.condition.text),
        units: display,
        temperature: format!(
            "{}{}",
            units::temperature(reading, display.temperature),
            temp_symbol
        ),
        feels_like: format!(
            "{}{}",
            units::feels_like(reading, display.temperature),
            temp_symbol
        ),
        condition: reading.condition.text.clone(),
        icon_url: icon_url(&reading.condition.icon),
        uv: reading.uv,
        visibility: format!("{} km", reading.vis_km),
        wind: format!(
            "{} {}",
            units::wind_speed(reading, display.wind),
            display.wind.label()
        ),
        wind_direction: format!("{} ({}°)", reading.wind_dir, wind_degree),
        wind_degree,
        pressure: format!("{} mb • {} in", reading.pressure_mb, reading.pressure_in),
        humidity: format!("{}%", reading.humidity),
        air_quality: reading.air_quality.as_ref().map(air_quality_view),
    }
}

/// Classify both indices and format the six pollutants in display order.
pub fn air_quality_view(aq: &AirQualityReading) -> AirQualityView {
    // ---
    let pollutants = [
        ("PM2.5", aq.pm2_5),
        ("PM10", aq.pm10),
        ("NO₂", aq.no2),
        ("O₃", aq.o3),
        ("SO₂", aq.so2),
        ("CO", aq.co),
    ]
    .into_iter()
    .map(|(name, value)| PollutantView {
        name,
        value: format_concentration(value),
        unit: POLLUTANT_UNIT,
    })
    .collect();

    AirQualityView {
        epa: epa_label(aq.us_epa_index),
        defra: defra_label(aq.gb_defra_index),
        pollutants,
    }
}

/// Build the forecast view; the header comes from the current record's
/// location when one is loaded.
pub fn forecast_view(data: &ForecastResponse, location: Option<&LocationInfo>) -> ForecastView {
    ForecastView {
        location: location
            .map(|l| format!("{}, {}, {}", l.name, l.region, l.country)),
        days: data.forecast.forecastday.iter().map(day_view).collect(),
    }
}

fn day_view(day: &ForecastDay) -> DayView {
    // ---
    let summary = &day.day;
    DayView {
        date: day.date.format("%d %B, %Y").to_string(),
        condition: summary.condition.text.clone(),
        icon_url: icon_url(&summary.condition.icon),
        max: format!("{}°C", units::round_degrees(summary.maxtemp_c)),
        min: format!("{}°C", units::round_degrees(summary.mintemp_c)),
        avg: format!("{}°C", units::round_degrees(summary.avgtemp_c)),
        uv: summary.uv,
        hours: day
            .hour
            .iter()
            .map(|h| hour_view(h, summary.mintemp_c, summary.maxtemp_c))
            .collect(),
    }
}

fn hour_view(hour: &HourSample, min: f64, max: f64) -> HourView {
    HourView {
        time: hour_label(&hour.time),
        icon_url: icon_url(&hour.condition.icon),
        temperature: format!("{}°C", units::round_degrees(hour.temp_c)),
        bar_height_px: bar_height(hour.temp_c, min, max),
    }
}

/// Relative bar height for an hourly temperature within the day's range.
pub fn bar_height(temp: f64, min: f64, max: f64) -> i64 {
    let range = (max - min).max(1.0);
    let height = units::round_degrees((temp - min) / range * 48.0) + 8;
    height.max(6)
}

/// `name`, then `, region` and `, country` when present.
pub fn location_line(location: &LocationInfo) -> String {
    // ---
    let mut line = location.name.clone();
    for part in [&location.region, &location.country] {
        if !part.is_empty() {
            line.push_str(", ");
            line.push_str(part);
        }
    }
    line
}

/// Protocol-relative icon references are pinned to https.
pub fn icon_url(icon: &str) -> String {
    if icon.starts_with("//") {
        format!("https:{icon}")
    } else {
        icon.to_string()
    }
}

/// Two decimals, or the placeholder when the provider omitted the value.
pub fn format_concentration(value: Option<f64>) -> String {
    value.map_or_else(|| PLACEHOLDER.to_string(), |v| format!("{v:.2}"))
}

fn hour_label(time: &str) -> String {
    let chars: Vec<char> = time.chars().collect();
    let start = chars.len().saturating_sub(5);
    chars[start..].iter().collect()
}

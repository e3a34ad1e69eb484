//! Presentation classifiers: air-quality labels and condition mood.
//!
//! Everything here is a pure, total function over provider data. Index values
//! are relabelled, never recomputed.

use serde::Serialize;

// ---

/// Severity tier used to colour an air-quality label.
///
/// Serialises as the CSS class the presentation layer applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SeverityTier {
    #[serde(rename = "aq-good")]
    Good,
    #[serde(rename = "aq-moderate")]
    Moderate,
    #[serde(rename = "aq-unhealthy-sg")]
    UnhealthySensitive,
    #[serde(rename = "aq-unhealthy")]
    Unhealthy,
    #[serde(rename = "aq-very-unhealthy")]
    VeryUnhealthy,
    #[serde(rename = "aq-hazardous")]
    Hazardous,
    #[serde(rename = "aq-unknown")]
    Unknown,
}

/// A display label paired with its severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AqiLabel {
    pub text: &'static str,
    pub tier: SeverityTier,
}

impl AqiLabel {
    const fn new(text: &'static str, tier: SeverityTier) -> Self {
        Self { text, tier }
    }
}

pub const UNKNOWN: AqiLabel = AqiLabel::new("Unknown", SeverityTier::Unknown);

/// Labels for the U.S. EPA index, positions 1 through 6.
const EPA_LABELS: [AqiLabel; 6] = [
    AqiLabel::new("Good", SeverityTier::Good),
    AqiLabel::new("Moderate", SeverityTier::Moderate),
    AqiLabel::new("Unhealthy (Sensitive Groups)", SeverityTier::UnhealthySensitive),
    AqiLabel::new("Unhealthy", SeverityTier::Unhealthy),
    AqiLabel::new("Very Unhealthy", SeverityTier::VeryUnhealthy),
    AqiLabel::new("Hazardous", SeverityTier::Hazardous),
];

/// Inclusive upper bounds for the U.K. DEFRA index bands.
const DEFRA_BANDS: [(f64, AqiLabel); 3] = [
    (3.0, AqiLabel::new("Low", SeverityTier::Good)),
    (6.0, AqiLabel::new("Moderate", SeverityTier::Moderate)),
    (8.0, AqiLabel::new("High", SeverityTier::Unhealthy)),
];

const DEFRA_VERY_HIGH: AqiLabel = AqiLabel::new("Very High", SeverityTier::Hazardous);

/// Classify a 1–6 EPA index. Anything that is not exactly one of the six
/// integers (fractional, out of range, missing) is `Unknown`.
pub fn epa_label(index: Option<f64>) -> AqiLabel {
    // ---
    match index {
        Some(i) if i.fract() == 0.0 && (1.0..=6.0).contains(&i) => EPA_LABELS[i as usize - 1],
        _ => UNKNOWN,
    }
}

/// Classify a 1–10 DEFRA index by inclusive thresholds.
///
/// Any finite value is banded (values below 1 fall into `Low`, above 8 into
/// `Very High`); a missing or non-finite value is `Unknown`.
pub fn defra_label(index: Option<f64>) -> AqiLabel {
    // ---
    let Some(i) = index.filter(|i| i.is_finite()) else {
        return UNKNOWN;
    };
    DEFRA_BANDS
        .iter()
        .find(|(upper, _)| i <= *upper)
        .map_or(DEFRA_VERY_HIGH, |(_, label)| *label)
}

/// Background mood derived from the free-text condition description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Mood {
    #[serde(rename = "bg-rain")]
    Rain,
    #[serde(rename = "bg-storm")]
    Storm,
    #[serde(rename = "bg-snow")]
    Snow,
    #[serde(rename = "bg-overcast")]
    Overcast,
    #[serde(rename = "bg-cloudy")]
    Cloudy,
    #[serde(rename = "bg-fog")]
    Fog,
    #[serde(rename = "bg-clear")]
    Clear,
    #[serde(rename = "bg-default")]
    Default,
}

/// Ordered first-match table. `Overcast` must precede `Cloudy`.
const MOOD_RULES: &[(&[&str], Mood)] = &[
    (&["rain", "drizzle", "shower"], Mood::Rain),
    (&["thunder", "storm"], Mood::Storm),
    (&["snow", "sleet", "blizzard"], Mood::Snow),
    (&["overcast"], Mood::Overcast),
    (&["cloud", "cloudy"], Mood::Cloudy),
    (&["fog", "mist", "haze"], Mood::Fog),
    (&["clear", "sun", "sunny"], Mood::Clear),
];

/// Classify a condition description into a background mood.
pub fn mood_for(condition_text: &str) -> Mood {
    // ---
    let text = condition_text.to_lowercase();
    MOOD_RULES
        .iter()
        .find(|(words, _)| words.iter().any(|w| text.contains(w)))
        .map_or(Mood::Default, |(_, mood)| *mood)
}

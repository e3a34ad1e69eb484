//! Query dispatcher: the upstream weather client and the combined search.
//!
//! A search issues the current-conditions and forecast reads concurrently and
//! waits for both. Either failure collapses the whole search into
//! [`SearchOutcome::Failed`]; there is no partial result.

use std::time::Instant;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, error, info, warn};

use crate::error::WeatherError;
use crate::models::{CurrentConditions, ForecastResponse};
use crate::Config;

/// Forecast horizon requested from the provider.
pub const FORECAST_DAYS: u8 = 3;

/// Placeholder shown in the current-conditions slot after a failed search.
pub const FAILURE_MESSAGE: &str = "Failed to fetch current weather";

// ---

/// A trimmed, non-empty location string plus the air-quality flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocationQuery {
    text: String,
    include_aqi: bool,
}

impl LocationQuery {
    /// Build a query, rejecting text that is blank after trimming.
    pub fn new(text: &str, include_aqi: bool) -> Result<Self, WeatherError> {
        // ---
        let text = text.trim();
        if text.is_empty() {
            return Err(WeatherError::EmptyQuery);
        }
        Ok(Self {
            text: text.to_string(),
            include_aqi,
        })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn include_aqi(&self) -> bool {
        self.include_aqi
    }
}

/// Settled result of one combined search.
#[derive(Debug, Clone)]
pub enum SearchOutcome {
    Loaded {
        current: Box<CurrentConditions>,
        forecast: Box<ForecastResponse>,
    },
    Failed {
        reason: String,
    },
}

impl SearchOutcome {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

/// Error envelope weatherapi.com returns on 4xx responses.
#[derive(Debug, Deserialize)]
struct ProviderErrorBody {
    error: ProviderErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ProviderErrorDetail {
    message: String,
}

/// HTTP client for the two read-only provider endpoints.
#[derive(Debug, Clone)]
pub struct WeatherClient {
    // ---
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    /// Build a client from the loaded configuration.
    pub fn new(config: &Config) -> Self {
        Self::with_base_url(&config.api_url, &config.api_key)
    }

    pub fn with_base_url(base_url: &str, api_key: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.trim().to_string(),
        }
    }

    /// `GET /current.json`, forwarding the air-quality flag.
    pub async fn fetch_current(
        &self,
        query: &LocationQuery,
    ) -> Result<CurrentConditions, WeatherError> {
        // ---
        let aqi = if query.include_aqi() { "yes" } else { "no" };
        self.get_json(
            "current.json",
            &[("q", query.text()), ("aqi", aqi)],
        )
        .await
    }

    /// `GET /forecast.json` for a fixed three days, never with air quality
    /// or alerts.
    pub async fn fetch_forecast(
        &self,
        query: &LocationQuery,
    ) -> Result<ForecastResponse, WeatherError> {
        // ---
        let days = FORECAST_DAYS.to_string();
        self.get_json(
            "forecast.json",
            &[
                ("q", query.text()),
                ("days", days.as_str()),
                ("aqi", "no"),
                ("alerts", "no"),
            ],
        )
        .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        // ---
        if self.api_key.is_empty() {
            return Err(WeatherError::MissingCredential);
        }

        let url = format!("{}/{}", self.base_url, endpoint);
        debug!("GET {} {:?}", url, params);
        let started = Instant::now();

        let response = self
            .http
            .get(&url)
            .query(&[("key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        let status = response.status();
        let body = response.bytes().await?;
        debug!(
            "{} answered {} ({} bytes) in {:.3}s",
            endpoint,
            status,
            body.len(),
            started.elapsed().as_secs_f64()
        );

        if !status.is_success() {
            let message = serde_json::from_slice::<ProviderErrorBody>(&body)
                .map(|b| b.error.message)
                .unwrap_or_else(|_| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(WeatherError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice::<T>(&body)
            .map_err(|e| WeatherError::Decode(format!("{endpoint}: {e}")))
    }
}

/// Run one combined search.
///
/// Returns `Err` only when the search is rejected before any request goes
/// out (no credential). Every upstream failure is folded into
/// [`SearchOutcome::Failed`].
pub async fn search(
    client: &WeatherClient,
    query: &LocationQuery,
) -> Result<SearchOutcome, WeatherError> {
    // ---
    if client.api_key.is_empty() {
        error!("Search for '{}' rejected: no API key", query.text());
        return Err(WeatherError::MissingCredential);
    }

    info!(
        "Searching '{}' (aqi: {})",
        query.text(),
        query.include_aqi()
    );

    // Join, not race: both requests settle before the outcome is decided.
    let (current, forecast) =
        tokio::join!(client.fetch_current(query), client.fetch_forecast(query));

    match (current, forecast) {
        (Ok(current), Ok(forecast)) => {
            info!(
                "Search for '{}' loaded {} forecast days",
                query.text(),
                forecast.forecast.forecastday.len()
            );
            Ok(SearchOutcome::Loaded {
                current: Box::new(current),
                forecast: Box::new(forecast),
            })
        }
        (current, forecast) => {
            if let Err(e) = &current {
                warn!("Current conditions for '{}' failed: {}", query.text(), e);
            }
            if let Err(e) = &forecast {
                warn!("Forecast for '{}' failed: {}", query.text(), e);
            }
            Ok(SearchOutcome::Failed {
                reason: FAILURE_MESSAGE.to_string(),
            })
        }
    }
}

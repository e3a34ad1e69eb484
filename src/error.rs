//! Error type for the upstream weather client.

use thiserror::Error;

/// Failure of a single upstream lookup or of a search as a whole.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// No access credential configured; no request is attempted.
    #[error("Missing API key (WEATHER_API_KEY)")]
    MissingCredential,

    /// Location query was blank after trimming.
    #[error("Location query must not be empty")]
    EmptyQuery,

    /// Transport-level failure (connect, TLS, body read).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Provider answered with a non-success status.
    #[error("Provider error ({status}): {message}")]
    Provider { status: u16, message: String },

    /// Provider answered 2xx but the body did not match the expected shape.
    #[error("Malformed provider response: {0}")]
    Decode(String),
}

impl WeatherError {
    /// True for errors caught before any request goes out.
    pub fn is_request_rejected(&self) -> bool {
        matches!(self, Self::MissingCredential | Self::EmptyQuery)
    }
}

#[cfg(test)]
mod tests {
    // ---
    use super::*;

    #[test]
    fn test_display() {
        // ---
        let err = WeatherError::Provider {
            status: 400,
            message: "No matching location found.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Provider error (400): No matching location found."
        );
        assert!(WeatherError::MissingCredential
            .to_string()
            .contains("WEATHER_API_KEY"));
    }

    #[test]
    fn test_request_rejected() {
        // ---
        assert!(WeatherError::MissingCredential.is_request_rejected());
        assert!(WeatherError::EmptyQuery.is_request_rejected());
        assert!(!WeatherError::Decode("x".into()).is_request_rejected());
    }
}

//! Application entry point for the `weather-finder` service.
//!
//! This binary orchestrates the startup sequence:
//! - Initializing structured logging/tracing
//! - Loading configuration from environment variables or `.env`
//! - Building the upstream weather client and the display session
//! - Mounting all API routes via the `routes` gateway (EMBP pattern)
//! - Binding the Axum HTTP server and serving requests
//!
//! # Environment Variables
//! - `WEATHER_API_KEY` (**required**) – weather provider access credential
//! - `WEATHER_API_URL` (optional) – provider base URL
//! - `PORT` (optional) – listen port (default: 8080)
//! - `WEATHER_LOG_LEVEL` (optional) – log verbosity for this crate (default: `info`)
//! - `WEATHER_SPAN_EVENTS` (optional) – `full` to log every `search` span event
//!
//! A missing credential aborts startup before the server binds, so no
//! upstream request can be issued without one.
use std::{env, net::SocketAddr};

use anyhow::Result;
use axum::Router;
use dotenvy::dotenv;
use is_terminal::IsTerminal;
use tracing_subscriber::filter::EnvFilter;
use tracing_subscriber::fmt::format::FmtSpan;

use weather_finder::{config, router, AppState, WeatherClient};

// ---

#[tokio::main]
async fn main() -> Result<()> {
    // ---
    dotenv().ok();
    init_tracing();

    let cfg = config::load_from_env().map_err(|e| {
        tracing::error!("{}", e);
        e
    })?;
    cfg.log_config();

    let client = WeatherClient::new(&cfg);
    let app: Router = router(AppState::new(client));

    let addr = SocketAddr::from(([0, 0, 0, 0], cfg.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ---

/// Install the process-wide subscriber.
///
/// Each `POST /search` runs inside a `search` span carrying the search id and
/// query text; `WEATHER_SPAN_EVENTS=full` logs its enter/exit as well as the
/// close timing, which is otherwise the only span event emitted. The two
/// upstream reads show up as `reqwest` debug lines only when
/// `WEATHER_LOG_LEVEL=trace`.
///
/// `FORCE_COLOR` (`1`/`0`) overrides terminal detection for ANSI output.
fn init_tracing() {
    // ---
    let span_events = match env::var("WEATHER_SPAN_EVENTS").as_deref() {
        Ok("full") => FmtSpan::NEW | FmtSpan::CLOSE | FmtSpan::ENTER | FmtSpan::EXIT,
        _ => FmtSpan::CLOSE,
    };

    let use_color = match env::var("FORCE_COLOR").as_deref() {
        Ok("1") => true,
        Ok("0") => false,
        _ => std::io::stdout().is_terminal(),
    };

    tracing_subscriber::fmt()
        .with_target(true)
        .with_span_events(span_events)
        .with_env_filter(log_filter())
        .with_ansi(use_color)
        .compact()
        .init();
}

/// `RUST_LOG` wins outright. Otherwise this crate logs at
/// `WEATHER_LOG_LEVEL` (default `info`) while axum, hyper and the HTTP
/// client stay at `warn` unless tracing everything.
fn log_filter() -> EnvFilter {
    // ---
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }

    let level = env::var("WEATHER_LOG_LEVEL")
        .ok()
        .filter(|l| ["trace", "debug", "info", "warn", "error"].contains(&l.as_str()))
        .unwrap_or_else(|| "info".to_string());

    let deps = if level == "trace" { "debug" } else { "warn" };
    EnvFilter::new(format!("{deps},weather_finder={level}"))
}

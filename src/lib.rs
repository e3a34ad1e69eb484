//! Weather lookup service: current conditions and a 3-day forecast from
//! weatherapi.com, with air-quality classification and unit selection.
//!
//! Module boundaries follow the Explicit Module Boundary Pattern (EMBP): each
//! module exposes a small surface, and siblings reach each other through the
//! re-exports below rather than through deep paths.

pub mod classify;
pub mod config;
pub mod dispatcher;
pub mod error;
pub mod models;
pub mod routes;
pub mod session;
pub mod units;
pub mod view;

pub use config::Config;
pub use dispatcher::{search, LocationQuery, SearchOutcome, WeatherClient};
pub use error::WeatherError;
pub use routes::{router, AppState};
pub use session::{ActiveView, Session};

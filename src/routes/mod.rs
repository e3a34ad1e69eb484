use std::sync::Arc;

use axum::Router;
use tokio::sync::Mutex;

use crate::{Session, WeatherClient};

mod display;
mod health;
mod search;

// ---

/// Shared state handed to every route: the upstream client and the single
/// display session.
#[derive(Clone)]
pub struct AppState {
    // ---
    pub client: Arc<WeatherClient>,
    pub session: Arc<Mutex<Session>>,
}

impl AppState {
    pub fn new(client: WeatherClient) -> Self {
        Self {
            client: Arc::new(client),
            session: Arc::new(Mutex::new(Session::new())),
        }
    }
}

pub fn router(state: AppState) -> Router {
    // ---
    Router::new()
        .merge(search::router())
        .merge(display::router())
        .merge(health::router())
        .with_state(state)
}

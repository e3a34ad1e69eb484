//! Routes that only read or reshape already-fetched data. Nothing here
//! talks to the provider.

use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use tracing::debug;

use super::AppState;
use crate::units::{TemperatureUnit, WindUnit};
use crate::view::{self, ViewDocument};
use crate::ActiveView;

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new()
        .route("/view", get(show_view).put(select_view))
        .route("/units", axum::routing::put(select_units))
}

#[derive(Debug, Deserialize)]
pub struct ViewRequest {
    view: ActiveView,
}

/// Body of `PUT /units`; omitted toggles keep their current value.
#[derive(Debug, Deserialize)]
pub struct UnitsRequest {
    temperature: Option<TemperatureUnit>,
    wind: Option<WindUnit>,
}

async fn show_view(State(state): State<AppState>) -> Json<ViewDocument> {
    // ---
    let session = state.session.lock().await;
    Json(view::render(&session))
}

async fn select_view(
    State(state): State<AppState>,
    Json(request): Json<ViewRequest>,
) -> Json<ViewDocument> {
    // ---
    debug!("PUT /view - {:?}", request.view);
    let mut session = state.session.lock().await;
    session.set_view(request.view);
    Json(view::render(&session))
}

async fn select_units(
    State(state): State<AppState>,
    Json(request): Json<UnitsRequest>,
) -> Json<ViewDocument> {
    // ---
    debug!(
        "PUT /units - temperature: {:?}, wind: {:?}",
        request.temperature, request.wind
    );
    let mut session = state.session.lock().await;
    let units = session.units().select(request.temperature, request.wind);
    session.set_units(units);
    Json(ViewDocument::Current(view::current_panel(&session)))
}

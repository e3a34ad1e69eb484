use axum::{
    extract::State, http::StatusCode, response::IntoResponse, routing::post, Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::AppState;
use crate::view::{self, ViewDocument};
use crate::{dispatcher, LocationQuery, WeatherError};

// ---

pub fn router() -> Router<AppState> {
    // ---
    Router::new().route("/search", post(handler))
}

/// Body of `POST /search`.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    query: String,
    #[serde(default)]
    aqi: bool,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, err: &WeatherError) -> axum::response::Response {
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}

async fn handler(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> impl IntoResponse {
    // ---
    info!("POST /search - '{}' (aqi: {})", request.query, request.aqi);

    let query = match LocationQuery::new(&request.query, request.aqi) {
        Ok(query) => query,
        Err(e) => {
            warn!("Rejected search: {}", e);
            return error_response(StatusCode::BAD_REQUEST, &e);
        }
    };

    // Step 1: mark the search as started (view resets to current conditions)
    let search_id = state.session.lock().await.begin_search(query.clone());

    // Step 2: dispatch and write-back run detached from this request, so a
    // caller that disconnects cannot leave the session pending.
    let task_state = state.clone();
    let task = tokio::spawn(
        settle_search(task_state, search_id, query.clone())
            .instrument(info_span!("search", %search_id, query = %query.text())),
    );

    match task.await {
        Ok(Ok(document)) => (StatusCode::OK, Json(document)).into_response(),
        Ok(Err(e)) => {
            let status = if e.is_request_rejected() {
                StatusCode::BAD_REQUEST
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            };
            error_response(status, &e)
        }
        Err(e) => {
            error!("Search {} task aborted: {}", search_id, e);
            state.session.lock().await.cancel_search(search_id);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: "Search aborted".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// Run both upstream reads, then apply the outcome if no newer search has
/// started. Returns the document to show afterwards.
async fn settle_search(
    state: AppState,
    search_id: Uuid,
    query: LocationQuery,
) -> Result<ViewDocument, WeatherError> {
    // ---
    let result = dispatcher::search(&state.client, &query).await;

    let mut session = state.session.lock().await;
    match result {
        Ok(outcome) => {
            let loaded = outcome.is_loaded();
            if session.complete_search(search_id, outcome) {
                info!("Search {} settled (loaded: {})", search_id, loaded);
            } else {
                info!("Search {} superseded by a newer one, outcome dropped", search_id);
            }
            Ok(view::render(&session))
        }
        Err(e) => {
            session.cancel_search(search_id);
            error!("Search {} rejected: {}", search_id, e);
            Err(e)
        }
    }
}

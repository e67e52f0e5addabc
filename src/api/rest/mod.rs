pub mod drivers;
pub mod rides;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Json;
use axum::Router;
use serde::Serialize;

use crate::error::AppError;
use crate::models::driver::Coordinate;
use crate::state::AppState;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(drivers::router())
        .merge(rides::router())
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .with_state(state)
}

/// Coordinates are checked here, before any computation; the engine assumes
/// valid input.
pub(crate) fn validate_coordinate(field: &str, coordinate: &Coordinate) -> Result<(), AppError> {
    if coordinate.is_valid() {
        Ok(())
    } else {
        Err(AppError::InvalidInput(format!(
            "{field} must be finite with lat in [-90, 90] and lng in [-180, 180]"
        )))
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    drivers: usize,
    available: usize,
}

async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let available = state
        .drivers
        .iter()
        .filter(|entry| entry.value().available)
        .count();

    Json(HealthResponse {
        status: "ok",
        drivers: state.drivers.len(),
        available,
    })
}

async fn metrics(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    match state.metrics.encode() {
        Ok(body) => (
            StatusCode::OK,
            [("content-type", "text/plain; version=0.0.4; charset=utf-8")],
            body,
        )
            .into_response(),
        Err(err) => (StatusCode::INTERNAL_SERVER_ERROR, err).into_response(),
    }
}

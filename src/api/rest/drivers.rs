use std::sync::Arc;

use axum::extract::{Path, State};
use axum::routing::{patch, post};
use axum::Json;
use axum::Router;
use chrono::Utc;
use dashmap::mapref::entry::Entry;
use serde::Deserialize;
use uuid::Uuid;

use crate::api::rest::validate_coordinate;
use crate::error::AppError;
use crate::models::driver::{Coordinate, Driver, VehicleClass};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/drivers", post(register_driver).get(list_drivers))
        .route("/drivers/:id/location", patch(update_driver_location))
        .route("/drivers/:id/availability", patch(update_driver_availability))
}

#[derive(Deserialize)]
pub struct RegisterDriverRequest {
    pub id: Option<String>,
    pub name: String,
    pub vehicle_number: String,
    pub vehicle_class: VehicleClass,
    pub location: Coordinate,
    pub rating: f64,
}

#[derive(Deserialize)]
pub struct UpdateLocationRequest {
    pub location: Coordinate,
}

#[derive(Deserialize)]
pub struct UpdateAvailabilityRequest {
    pub available: bool,
}

async fn register_driver(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<RegisterDriverRequest>,
) -> Result<Json<Driver>, AppError> {
    if payload.name.trim().is_empty() {
        return Err(AppError::InvalidInput("name cannot be empty".to_string()));
    }
    validate_coordinate("location", &payload.location)?;

    let id = payload
        .id
        .filter(|id| !id.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    let driver = Driver {
        id: id.clone(),
        name: payload.name,
        vehicle_number: payload.vehicle_number,
        vehicle_class: payload.vehicle_class,
        location: payload.location,
        rating: payload.rating.clamp(0.0, 5.0),
        available: true,
        updated_at: Utc::now(),
    };

    match state.drivers.entry(id) {
        Entry::Occupied(entry) => {
            return Err(AppError::Conflict(format!(
                "driver {} already registered",
                entry.key()
            )));
        }
        Entry::Vacant(entry) => {
            entry.insert(driver.clone());
        }
    }

    state.refresh_driver_gauges();
    tracing::info!(driver_id = %driver.id, class = %driver.vehicle_class, "driver registered");

    Ok(Json(driver))
}

async fn list_drivers(State(state): State<Arc<AppState>>) -> Json<Vec<Driver>> {
    Json(state.driver_snapshot())
}

async fn update_driver_location(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateLocationRequest>,
) -> Result<Json<Driver>, AppError> {
    validate_coordinate("location", &payload.location)?;

    let mut driver = state
        .drivers
        .get_mut(&id)
        .ok_or_else(|| AppError::NotFound(format!("driver {id} not found")))?;

    driver.location = payload.location;
    driver.updated_at = Utc::now();

    Ok(Json(driver.clone()))
}

async fn update_driver_availability(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(payload): Json<UpdateAvailabilityRequest>,
) -> Result<Json<Driver>, AppError> {
    let updated = {
        let mut driver = state
            .drivers
            .get_mut(&id)
            .ok_or_else(|| AppError::NotFound(format!("driver {id} not found")))?;

        driver.available = payload.available;
        driver.updated_at = Utc::now();
        driver.clone()
    };

    state.refresh_driver_gauges();
    Ok(Json(updated))
}

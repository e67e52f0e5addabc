use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::State;
use axum::routing::post;
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::rest::validate_coordinate;
use crate::engine::scoring::ScoreContext;
use crate::engine::{breakdown, matching, pricing};
use crate::error::AppError;
use crate::models::driver::{Coordinate, VehicleClass};
use crate::models::matching::MatchedDriver;
use crate::models::ride::{FareBreakdown, RideQuote};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/quotes", post(create_quotes))
        .route("/fares/breakdown", post(fare_breakdown))
        .route("/matches", post(create_match))
}

#[derive(Deserialize)]
pub struct QuoteRequest {
    pub pickup: Coordinate,
    pub dropoff: Coordinate,
    pub vehicle_class: Option<VehicleClass>,
}

#[derive(Serialize)]
pub struct QuoteItem {
    #[serde(flatten)]
    pub quote: RideQuote,
    pub estimated_time: String,
}

async fn create_quotes(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<QuoteRequest>,
) -> Result<Json<Vec<QuoteItem>>, AppError> {
    validate_coordinate("pickup", &payload.pickup)?;
    validate_coordinate("dropoff", &payload.dropoff)?;

    let classes: Vec<VehicleClass> = match payload.vehicle_class {
        Some(class) => vec![class],
        None => VehicleClass::ALL.to_vec(),
    };

    let quotes = classes
        .into_iter()
        .map(|class| {
            state
                .metrics
                .quotes_total
                .with_label_values(&[class.as_str()])
                .inc();
            let quote = pricing::quote(&payload.pickup, &payload.dropoff, class);
            QuoteItem {
                estimated_time: quote.formatted_eta(),
                quote,
            }
        })
        .collect();

    Ok(Json(quotes))
}

#[derive(Deserialize)]
pub struct BreakdownRequest {
    pub total_fare: f64,
    pub extra: Option<f64>,
}

async fn fare_breakdown(
    Json(payload): Json<BreakdownRequest>,
) -> Result<Json<FareBreakdown>, AppError> {
    if !payload.total_fare.is_finite() || payload.total_fare < 0.0 {
        return Err(AppError::InvalidInput(
            "total_fare must be a non-negative number".to_string(),
        ));
    }
    let extra = payload.extra.unwrap_or(0.0);
    if !extra.is_finite() || extra < 0.0 {
        return Err(AppError::InvalidInput(
            "extra must be a non-negative number".to_string(),
        ));
    }

    Ok(Json(breakdown::allocate(payload.total_fare, extra)))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchPolicy {
    Nearest,
    Batched,
    Scored,
}

impl MatchPolicy {
    fn as_str(self) -> &'static str {
        match self {
            MatchPolicy::Nearest => "nearest",
            MatchPolicy::Batched => "batched",
            MatchPolicy::Scored => "scored",
        }
    }
}

#[derive(Deserialize)]
pub struct MatchRequest {
    pub pickup: Coordinate,
    pub destination: Option<Coordinate>,
    pub vehicle_class: Option<VehicleClass>,
    pub policy: Option<MatchPolicy>,
    pub limit: Option<i64>,
    pub initial_radius_km: Option<f64>,
}

#[derive(Serialize)]
pub struct MatchResponse {
    pub policy: MatchPolicy,
    pub drivers: Vec<MatchedDriver>,
}

fn require_class(
    class: Option<VehicleClass>,
    policy: MatchPolicy,
) -> Result<VehicleClass, AppError> {
    class.ok_or_else(|| {
        AppError::InvalidInput(format!(
            "vehicle_class is required for {} matching",
            policy.as_str()
        ))
    })
}

async fn create_match(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<MatchRequest>,
) -> Result<Json<MatchResponse>, AppError> {
    validate_coordinate("pickup", &payload.pickup)?;
    if let Some(destination) = &payload.destination {
        validate_coordinate("destination", destination)?;
    }

    let policy = payload.policy.unwrap_or(MatchPolicy::Batched);
    let limit = payload
        .limit
        .unwrap_or(state.config.match_limit as i64)
        .max(0) as usize;
    let initial_radius_km = payload
        .initial_radius_km
        .unwrap_or(state.config.initial_radius_km);
    if !initial_radius_km.is_finite() || initial_radius_km < 0.0 {
        return Err(AppError::InvalidInput(
            "initial_radius_km must be a non-negative number".to_string(),
        ));
    }

    let start = Instant::now();
    let pool = state.driver_snapshot();

    let (drivers, outcome) = match policy {
        MatchPolicy::Nearest => (
            matching::find_nearest(&payload.pickup, &pool, payload.vehicle_class, limit),
            "ok",
        ),
        MatchPolicy::Batched => {
            let class = require_class(payload.vehicle_class, policy)?;
            (
                matching::batched_match(&payload.pickup, &pool, class, limit, initial_radius_km),
                "ok",
            )
        }
        MatchPolicy::Scored => {
            let class = require_class(payload.vehicle_class, policy)?;
            let candidates =
                matching::batched_match(&payload.pickup, &pool, class, limit, initial_radius_km);
            let ctx = ScoreContext {
                rider_location: payload.pickup,
                destination: payload.destination,
                vehicle_class: class,
            };

            // Scoring failure or timeout degrades to the batched order
            // rather than failing the match.
            let timeout = Duration::from_millis(state.config.scoring_timeout_ms);
            let reranked = tokio::time::timeout(
                timeout,
                matching::rerank_by_quality(state.scorer.as_ref(), &ctx, candidates.clone()),
            )
            .await;

            match reranked {
                Ok(Ok(scored)) => (scored, "ok"),
                Ok(Err(err)) => {
                    warn!(error = %err, "quality scoring failed; serving batched order");
                    (candidates, "fallback")
                }
                Err(_) => {
                    warn!(
                        timeout_ms = state.config.scoring_timeout_ms,
                        "quality scoring timed out; serving batched order"
                    );
                    (candidates, "fallback")
                }
            }
        }
    };

    let elapsed = start.elapsed().as_secs_f64();
    state
        .metrics
        .match_latency_seconds
        .with_label_values(&[policy.as_str()])
        .observe(elapsed);
    state
        .metrics
        .match_requests_total
        .with_label_values(&[policy.as_str(), outcome])
        .inc();

    info!(
        policy = policy.as_str(),
        matched = drivers.len(),
        "match request served"
    );

    Ok(Json(MatchResponse { policy, drivers }))
}

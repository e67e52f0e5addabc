//! Driver pool filtering and ranking.
//!
//! Matching is advisory: every policy ranks a read-only snapshot of the pool
//! and reserves nothing, so concurrent requests need no coordination and may
//! surface the same top driver.

use tracing::debug;

use crate::engine::pricing::estimate_eta;
use crate::engine::scoring::{QualityScorer, ScoreContext, ScoringError};
use crate::geo;
use crate::models::driver::{Coordinate, Driver, VehicleClass};
use crate::models::matching::MatchedDriver;

/// Ceiling for the expanding radius search.
const MAX_RADIUS_KM: f64 = 10.0;

/// How much the search radius grows per round.
const RADIUS_STEP_KM: f64 = 2.0;

fn annotate(rider: &Coordinate, driver: &Driver) -> MatchedDriver {
    let distance_km = geo::distance_km(rider, &driver.location);
    let eta_minutes = estimate_eta(distance_km, driver.vehicle_class);

    MatchedDriver {
        driver: driver.clone(),
        distance_km,
        eta_minutes,
        score: None,
    }
}

/// Nearest-first matching over the whole pool.
///
/// Keeps available drivers (of `class`, when given), annotates each with
/// distance and ETA, and returns the closest `limit` of them.
pub fn find_nearest(
    rider: &Coordinate,
    pool: &[Driver],
    class: Option<VehicleClass>,
    limit: usize,
) -> Vec<MatchedDriver> {
    if limit == 0 {
        return Vec::new();
    }

    let mut matched: Vec<MatchedDriver> = pool
        .iter()
        .filter(|driver| driver.available && class.map_or(true, |c| driver.vehicle_class == c))
        .map(|driver| annotate(rider, driver))
        .collect();

    matched.sort_by(|a, b| a.distance_km.total_cmp(&b.distance_km));
    matched.truncate(limit);
    matched
}

/// Radius-expansion matching.
///
/// Grows the acceptance radius from `initial_radius_km` in 2 km steps until
/// at least `limit` drivers of `class` are inside it or the 10 km ceiling is
/// hit, then ranks by ETA ascending with rating descending as the tie-break.
/// An empty result is a valid outcome, not an error.
pub fn batched_match(
    rider: &Coordinate,
    pool: &[Driver],
    class: VehicleClass,
    limit: usize,
    initial_radius_km: f64,
) -> Vec<MatchedDriver> {
    if limit == 0 {
        return Vec::new();
    }

    // Once found at radius r, a driver stays matched at every larger radius,
    // so the candidate set only grows and the loop is bounded by the ceiling.
    let mut radius_km = initial_radius_km;
    let mut in_radius: Vec<&Driver> = Vec::new();
    while radius_km <= MAX_RADIUS_KM {
        in_radius = pool
            .iter()
            .filter(|driver| {
                driver.vehicle_class == class
                    && geo::distance_km(rider, &driver.location) <= radius_km
            })
            .collect();

        if in_radius.len() >= limit {
            break;
        }
        radius_km += RADIUS_STEP_KM;
    }

    debug!(
        radius_km,
        candidates = in_radius.len(),
        class = %class,
        "radius search settled"
    );

    let mut matched: Vec<MatchedDriver> = in_radius
        .into_iter()
        .map(|driver| annotate(rider, driver))
        .collect();

    matched.sort_by(|a, b| {
        a.eta_minutes
            .cmp(&b.eta_minutes)
            .then_with(|| b.driver.rating.total_cmp(&a.driver.rating))
    });
    matched.truncate(limit);
    matched
}

/// Quality-score re-ranking, a decorator over [`batched_match`] output.
///
/// Invokes the hook once per candidate, waits for every score, then sorts
/// descending by score. One failed scoring call fails the whole step; the
/// caller decides whether to fall back to the incoming order.
pub async fn rerank_by_quality<S>(
    scorer: &S,
    ctx: &ScoreContext,
    candidates: Vec<MatchedDriver>,
) -> Result<Vec<MatchedDriver>, ScoringError>
where
    S: QualityScorer + ?Sized,
{
    let scores = futures::future::try_join_all(
        candidates
            .iter()
            .map(|candidate| scorer.score(ctx, candidate)),
    )
    .await?;

    let mut scored: Vec<MatchedDriver> = candidates
        .into_iter()
        .zip(scores)
        .map(|(mut candidate, score)| {
            candidate.score = Some(score);
            candidate
        })
        .collect();

    scored.sort_by(|a, b| {
        let a_score = a.score.unwrap_or(f64::NEG_INFINITY);
        let b_score = b.score.unwrap_or(f64::NEG_INFINITY);
        b_score.total_cmp(&a_score)
    });

    Ok(scored)
}

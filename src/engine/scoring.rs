//! Pluggable quality scoring over annotated match candidates.
//!
//! The hook stands in for an external scoring service: it may suspend, it is
//! called at most once per candidate per match request, and the only
//! assumption the engine makes about its output is that higher is better.

use futures::future::BoxFuture;
use thiserror::Error;

use crate::models::driver::{Coordinate, VehicleClass};
use crate::models::matching::MatchedDriver;

#[derive(Debug, Error)]
#[error("{0}")]
pub struct ScoringError(pub String);

/// What the scorer gets to see about the ride being matched.
#[derive(Debug, Clone, Copy)]
pub struct ScoreContext {
    pub rider_location: Coordinate,
    pub destination: Option<Coordinate>,
    pub vehicle_class: VehicleClass,
}

/// External ranking signal layered on top of distance/ETA ranking.
///
/// Candidates arrive already annotated with distance and ETA. Scores carry
/// no scale or sign convention; any finite ordering is tolerated.
pub trait QualityScorer: Send + Sync {
    fn score<'a>(
        &'a self,
        ctx: &'a ScoreContext,
        candidate: &'a MatchedDriver,
    ) -> BoxFuture<'a, Result<f64, ScoringError>>;
}

const RATING_WEIGHT: f64 = 100.0;
const DISTANCE_WEIGHT: f64 = 10.0;
const ETA_WEIGHT: f64 = 5.0;

/// Weighted composite of rating, pickup distance, and pickup ETA. The
/// default host scorer and the reference behavior for tests; a deployment
/// would swap in a client for its scoring service here.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompositeScorer;

impl QualityScorer for CompositeScorer {
    fn score<'a>(
        &'a self,
        _ctx: &'a ScoreContext,
        candidate: &'a MatchedDriver,
    ) -> BoxFuture<'a, Result<f64, ScoringError>> {
        let score = candidate.driver.rating * RATING_WEIGHT
            - candidate.distance_km * DISTANCE_WEIGHT
            - f64::from(candidate.eta_minutes) * ETA_WEIGHT;
        Box::pin(async move { Ok(score) })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::{CompositeScorer, QualityScorer, ScoreContext};
    use crate::models::driver::{Coordinate, Driver, VehicleClass};
    use crate::models::matching::MatchedDriver;

    fn candidate(rating: f64, distance_km: f64, eta_minutes: u32) -> MatchedDriver {
        MatchedDriver {
            driver: Driver {
                id: "d1".to_string(),
                name: "Rahul Kumar".to_string(),
                vehicle_number: "KA-01-AB-1234".to_string(),
                vehicle_class: VehicleClass::Cab,
                location: Coordinate {
                    lat: 12.97,
                    lng: 77.59,
                },
                rating,
                available: true,
                updated_at: Utc::now(),
            },
            distance_km,
            eta_minutes,
            score: None,
        }
    }

    fn ctx() -> ScoreContext {
        ScoreContext {
            rider_location: Coordinate {
                lat: 12.9716,
                lng: 77.5946,
            },
            destination: None,
            vehicle_class: VehicleClass::Cab,
        }
    }

    #[tokio::test]
    async fn composite_score_matches_reference_weights() {
        let score = CompositeScorer
            .score(&ctx(), &candidate(4.5, 2.0, 6))
            .await
            .unwrap();
        // 4.5 * 100 - 2.0 * 10 - 6 * 5
        assert_eq!(score, 400.0);
    }

    #[tokio::test]
    async fn closer_faster_better_rated_scores_higher() {
        let strong = CompositeScorer
            .score(&ctx(), &candidate(4.9, 0.5, 2))
            .await
            .unwrap();
        let weak = CompositeScorer
            .score(&ctx(), &candidate(4.1, 6.0, 18))
            .await
            .unwrap();
        assert!(strong > weak);
    }
}

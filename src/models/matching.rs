use serde::{Deserialize, Serialize};

use crate::models::driver::Driver;

/// A driver annotated for one match request. Distance and ETA are relative
/// to the rider's pickup at query time; `score` is present only when a
/// quality hook re-ranked the result. Constructed fresh per request and
/// never mutated after ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchedDriver {
    #[serde(flatten)]
    pub driver: Driver,
    pub distance_km: f64,
    pub eta_minutes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

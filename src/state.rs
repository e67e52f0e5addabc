use std::sync::Arc;

use dashmap::DashMap;

use crate::config::Config;
use crate::engine::scoring::QualityScorer;
use crate::models::driver::Driver;
use crate::observability::metrics::Metrics;

/// Host-owned shared state. The engine never sees this type: handlers take
/// a snapshot of the pool and pass it in as a slice, keeping matching a
/// read-only ranking over immutable input.
pub struct AppState {
    pub drivers: DashMap<String, Driver>,
    pub scorer: Arc<dyn QualityScorer>,
    pub metrics: Metrics,
    pub config: Config,
}

impl AppState {
    pub fn new(config: Config, scorer: Arc<dyn QualityScorer>) -> Self {
        Self {
            drivers: DashMap::new(),
            scorer,
            metrics: Metrics::new(),
            config,
        }
    }

    /// Point-in-time copy of the registry for one matching or quoting call.
    pub fn driver_snapshot(&self) -> Vec<Driver> {
        self.drivers
            .iter()
            .map(|entry| entry.value().clone())
            .collect()
    }

    pub fn refresh_driver_gauges(&self) {
        let available = self
            .drivers
            .iter()
            .filter(|entry| entry.value().available)
            .count();
        self.metrics.drivers_registered.set(self.drivers.len() as i64);
        self.metrics.drivers_available.set(available as i64);
    }
}

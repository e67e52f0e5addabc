//! Ride lifecycle as a pure function of elapsed time.
//!
//! The hosting UI owns its timers; this module only answers "which phase is
//! the ride in after t elapsed" and "where along the route is the vehicle",
//! so the sequencing stays deterministic and testable without a clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::models::driver::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RidePhase {
    Arriving,
    PickedUp,
    InProgress,
    Completed,
}

/// Per-phase durations for one accepted ride, anchored at acceptance.
#[derive(Debug, Clone, Copy)]
pub struct TripSchedule {
    pub arriving: Duration,
    pub picked_up: Duration,
    pub in_progress: Duration,
}

/// Demo pacing: each leg advances after five seconds.
const DEMO_LEG: Duration = Duration::from_secs(5);

impl TripSchedule {
    pub fn new(arriving: Duration, picked_up: Duration, in_progress: Duration) -> Self {
        Self {
            arriving,
            picked_up,
            in_progress,
        }
    }

    pub fn demo() -> Self {
        Self::new(DEMO_LEG, DEMO_LEG, DEMO_LEG)
    }

    /// Schedule for a real trip: `pickup_eta_minutes` to reach the rider, a
    /// fixed boarding window, then `ride_eta_minutes` to the destination.
    pub fn for_trip(pickup_eta_minutes: u32, ride_eta_minutes: u32) -> Self {
        Self::new(
            Duration::from_secs(u64::from(pickup_eta_minutes) * 60),
            Duration::from_secs(60),
            Duration::from_secs(u64::from(ride_eta_minutes) * 60),
        )
    }

    pub fn phase_at(&self, elapsed: Duration) -> RidePhase {
        if elapsed < self.arriving {
            RidePhase::Arriving
        } else if elapsed < self.arriving + self.picked_up {
            RidePhase::PickedUp
        } else if elapsed < self.arriving + self.picked_up + self.in_progress {
            RidePhase::InProgress
        } else {
            RidePhase::Completed
        }
    }

    pub fn progress_percent(&self, elapsed: Duration) -> u8 {
        match self.phase_at(elapsed) {
            RidePhase::Arriving => 0,
            RidePhase::PickedUp => 25,
            RidePhase::InProgress => 50,
            RidePhase::Completed => 100,
        }
    }
}

/// Evenly spaced points along the straight line from `start` to `end`,
/// endpoints included. Stands in for a routed polyline.
pub fn tracking_path(start: &Coordinate, end: &Coordinate, points: usize) -> Vec<Coordinate> {
    if points == 0 {
        return Vec::new();
    }
    if points == 1 {
        return vec![*start];
    }

    (0..points)
        .map(|i| {
            let ratio = i as f64 / (points - 1) as f64;
            Coordinate {
                lat: start.lat + (end.lat - start.lat) * ratio,
                lng: start.lng + (end.lng - start.lng) * ratio,
            }
        })
        .collect()
}

//! Fixed-percentage fare breakdown.
//!
//! Each line item is rounded to two decimals on its own, and the final fare
//! is the sum of the rounded items plus the extra. For awkward totals the
//! item sum can drift from the input by a cent or two; the reconstruction
//! invariant binds the displayed parts to the displayed total, not to the
//! input.

use crate::geo::round2;
use crate::models::ride::FareBreakdown;

const BASE_FARE_PCT: f64 = 0.30;
const DISTANCE_RATE_PCT: f64 = 0.25;
const TIME_RATE_PCT: f64 = 0.20;
const SURGE_PRICING_PCT: f64 = 0.15;
const BOOKING_FEE_PCT: f64 = 0.05;
const TOLLS_PCT: f64 = 0.03;
const SURCHARGES_PCT: f64 = 0.02;

/// Split `total_fare` into the seven line items plus a flat `extra`.
/// Negative inputs are clamped to zero; the HTTP boundary rejects them
/// before this runs.
pub fn allocate(total_fare: f64, extra: f64) -> FareBreakdown {
    let total_fare = total_fare.max(0.0);
    let extra = extra.max(0.0);

    let base_fare = round2(total_fare * BASE_FARE_PCT);
    let distance_rate = round2(total_fare * DISTANCE_RATE_PCT);
    let time_rate = round2(total_fare * TIME_RATE_PCT);
    let surge_pricing = round2(total_fare * SURGE_PRICING_PCT);
    let booking_fee = round2(total_fare * BOOKING_FEE_PCT);
    let tolls = round2(total_fare * TOLLS_PCT);
    let surcharges = round2(total_fare * SURCHARGES_PCT);

    let component_total = base_fare
        + distance_rate
        + time_rate
        + surge_pricing
        + booking_fee
        + tolls
        + surcharges;

    FareBreakdown {
        base_fare,
        distance_rate,
        time_rate,
        surge_pricing,
        booking_fee,
        tolls,
        surcharges,
        extra,
        final_fare: round2(component_total + extra),
    }
}

#[cfg(test)]
mod tests {
    use super::allocate;
    use crate::geo::round2;

    #[test]
    fn components_reconstruct_the_final_fare() {
        for total in [0.0, 45.0, 118.0, 119.0, 250.0, 1234.0] {
            for extra in [0.0, 10.0, 20.0, 30.0, 50.0] {
                let breakdown = allocate(total, extra);
                assert_eq!(
                    round2(breakdown.component_total() + breakdown.extra),
                    breakdown.final_fare,
                    "total {total} extra {extra}"
                );
            }
        }
    }

    #[test]
    fn reference_fare_splits_cleanly() {
        let breakdown = allocate(118.0, 0.0);
        assert_eq!(breakdown.base_fare, 35.4);
        assert_eq!(breakdown.distance_rate, 29.5);
        assert_eq!(breakdown.time_rate, 23.6);
        assert_eq!(breakdown.surge_pricing, 17.7);
        assert_eq!(breakdown.booking_fee, 5.9);
        assert_eq!(breakdown.tolls, 3.54);
        assert_eq!(breakdown.surcharges, 2.36);
        assert_eq!(breakdown.final_fare, 118.0);
    }

    #[test]
    fn extra_is_added_on_top() {
        let breakdown = allocate(118.0, 30.0);
        assert_eq!(breakdown.extra, 30.0);
        assert_eq!(breakdown.final_fare, 148.0);
    }

    #[test]
    fn awkward_totals_may_drift_by_cents() {
        // 0.07 splits as 0.02 + 0.02 + 0.01 + 0.01 + 0 + 0 + 0: the rounded
        // items sum to 0.06, and that sum is the final fare.
        let breakdown = allocate(0.07, 0.0);
        assert_eq!(breakdown.final_fare, 0.06);
    }

    #[test]
    fn negative_inputs_are_clamped() {
        let breakdown = allocate(-10.0, -5.0);
        assert_eq!(breakdown.final_fare, 0.0);
        assert_eq!(breakdown.extra, 0.0);
    }

    #[test]
    fn components_are_never_negative() {
        let breakdown = allocate(118.0, 10.0);
        for component in [
            breakdown.base_fare,
            breakdown.distance_rate,
            breakdown.time_rate,
            breakdown.surge_pricing,
            breakdown.booking_fee,
            breakdown.tolls,
            breakdown.surcharges,
        ] {
            assert!(component >= 0.0);
        }
    }
}

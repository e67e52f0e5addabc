//! Travel-time estimation and fare pricing over the vehicle-class table.

use crate::geo;
use crate::models::driver::{Coordinate, VehicleClass};
use crate::models::ride::RideQuote;

/// Congestion markup applied on top of free-flow travel time.
const TRAFFIC_BUFFER: f64 = 1.2;

/// A trip never costs less than this multiple of the class's flat base.
const MINIMUM_FARE_FACTOR: f64 = 1.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassParams {
    pub avg_speed_kmh: f64,
    pub base_fare: f64,
    pub per_km: f64,
    pub per_minute: f64,
}

const AUTO_PARAMS: ClassParams = ClassParams {
    avg_speed_kmh: 25.0,
    base_fare: 30.0,
    per_km: 13.0,
    per_minute: 1.5,
};

/// Classes that price on their own. Anything without a row here (carpool)
/// uses the auto row.
const RATE_TABLE: &[(VehicleClass, ClassParams)] = &[
    (
        VehicleClass::Bike,
        ClassParams {
            avg_speed_kmh: 30.0,
            base_fare: 20.0,
            per_km: 7.0,
            per_minute: 1.0,
        },
    ),
    (VehicleClass::Auto, AUTO_PARAMS),
    (
        VehicleClass::Cab,
        ClassParams {
            avg_speed_kmh: 35.0,
            base_fare: 50.0,
            per_km: 18.0,
            per_minute: 2.0,
        },
    ),
];

pub fn class_params(class: VehicleClass) -> ClassParams {
    RATE_TABLE
        .iter()
        .find(|(candidate, _)| *candidate == class)
        .map(|(_, params)| *params)
        .unwrap_or(AUTO_PARAMS)
}

/// Estimated travel time in whole minutes:
/// `round((distance / avg_speed) * 60 * 1.2)`.
///
/// Zero distance yields zero; no upper bound is imposed.
pub fn estimate_eta(distance_km: f64, class: VehicleClass) -> u32 {
    let distance_km = distance_km.max(0.0);
    let params = class_params(class);
    let minutes = (distance_km / params.avg_speed_kmh) * 60.0 * TRAFFIC_BUFFER;
    minutes.round() as u32
}

/// Fare in whole currency units:
/// `max(round(base + distance * per_km + eta * per_minute), round(base * 1.5))`.
pub fn calculate_fare(distance_km: f64, eta_minutes: u32, class: VehicleClass) -> f64 {
    let params = class_params(class);
    let total = params.base_fare
        + distance_km.max(0.0) * params.per_km
        + f64::from(eta_minutes) * params.per_minute;
    let minimum = (params.base_fare * MINIMUM_FARE_FACTOR).round();
    total.round().max(minimum)
}

/// Full pricing pipeline for one candidate class: distance, then ETA, then
/// fare, all from the same two-decimal distance figure.
pub fn quote(pickup: &Coordinate, dropoff: &Coordinate, class: VehicleClass) -> RideQuote {
    let distance_km = geo::distance_km(pickup, dropoff);
    let eta_minutes = estimate_eta(distance_km, class);

    RideQuote {
        vehicle_class: class,
        distance_km,
        eta_minutes,
        fare: calculate_fare(distance_km, eta_minutes, class),
    }
}

#[cfg(test)]
mod tests {
    use super::{calculate_fare, class_params, estimate_eta, quote, AUTO_PARAMS};
    use crate::models::driver::{Coordinate, VehicleClass};

    #[test]
    fn eta_applies_traffic_buffer() {
        // 5.06 km at 25 km/h is 12.144 min; +20% traffic is 14.57, rounds to 15.
        assert_eq!(estimate_eta(5.06, VehicleClass::Auto), 15);
        // 10 km at 30 km/h is 20 min; +20% is exactly 24.
        assert_eq!(estimate_eta(10.0, VehicleClass::Bike), 24);
    }

    #[test]
    fn eta_is_zero_for_zero_distance() {
        for class in VehicleClass::ALL {
            assert_eq!(estimate_eta(0.0, class), 0);
        }
    }

    #[test]
    fn eta_is_monotone_in_distance() {
        let mut previous = 0;
        for step in 0..200 {
            let eta = estimate_eta(f64::from(step) * 0.5, VehicleClass::Cab);
            assert!(eta >= previous);
            previous = eta;
        }
    }

    #[test]
    fn carpool_falls_back_to_auto_parameters() {
        assert_eq!(class_params(VehicleClass::Carpool), AUTO_PARAMS);
        assert_eq!(
            estimate_eta(12.5, VehicleClass::Carpool),
            estimate_eta(12.5, VehicleClass::Auto)
        );
        assert_eq!(
            calculate_fare(12.5, 36, VehicleClass::Carpool),
            calculate_fare(12.5, 36, VehicleClass::Auto)
        );
    }

    #[test]
    fn minimum_fare_floor_applies_to_short_trips() {
        // A 100 m cab hop: 50 + 1.8 + 2 = 53.8, but the floor is 75.
        assert_eq!(calculate_fare(0.1, 1, VehicleClass::Cab), 75.0);
        assert_eq!(calculate_fare(0.0, 0, VehicleClass::Bike), 30.0);
        assert_eq!(calculate_fare(0.0, 0, VehicleClass::Auto), 45.0);
    }

    #[test]
    fn fare_never_drops_below_the_floor() {
        for class in VehicleClass::ALL {
            let floor = (class_params(class).base_fare * 1.5).round();
            for distance in [0.0, 0.5, 2.0, 7.3, 42.0] {
                let eta = estimate_eta(distance, class);
                assert!(calculate_fare(distance, eta, class) >= floor);
            }
        }
    }

    #[test]
    fn mg_road_to_indiranagar_auto_quote() {
        let pickup = Coordinate {
            lat: 12.9716,
            lng: 77.5946,
        };
        let dropoff = Coordinate {
            lat: 12.9784,
            lng: 77.6408,
        };

        let quote = quote(&pickup, &dropoff, VehicleClass::Auto);
        assert_eq!(quote.distance_km, 5.06);
        assert_eq!(quote.eta_minutes, 15);
        // 30 + 5.06 * 13 + 15 * 1.5 = 118.28, rounds to 118.
        assert_eq!(quote.fare, 118.0);
    }
}

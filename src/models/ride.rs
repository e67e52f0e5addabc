use serde::{Deserialize, Serialize};

use crate::models::driver::VehicleClass;

/// Priced option for one vehicle class. Recomputed whenever pickup,
/// destination, or class changes; never cached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RideQuote {
    pub vehicle_class: VehicleClass,
    pub distance_km: f64,
    pub eta_minutes: u32,
    pub fare: f64,
}

impl RideQuote {
    /// Human-readable travel time, e.g. "15 min" or "1 hour 20 min".
    pub fn formatted_eta(&self) -> String {
        let hours = self.eta_minutes / 60;
        let minutes = self.eta_minutes % 60;

        match (hours, minutes) {
            (0, m) => format!("{m} min"),
            (1, 0) => "1 hour".to_string(),
            (h, 0) => format!("{h} hours"),
            (1, m) => format!("1 hour {m} min"),
            (h, m) => format!("{h} hours {m} min"),
        }
    }
}

/// Itemized split of a quoted fare. Each line item is independently rounded
/// to two decimals; `final_fare` is the sum of the rounded items plus the
/// extra, so the displayed parts always add up to the displayed total.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FareBreakdown {
    pub base_fare: f64,
    pub distance_rate: f64,
    pub time_rate: f64,
    pub surge_pricing: f64,
    pub booking_fee: f64,
    pub tolls: f64,
    pub surcharges: f64,
    pub extra: f64,
    pub final_fare: f64,
}

impl FareBreakdown {
    /// Sum of the seven line items, excluding the extra.
    pub fn component_total(&self) -> f64 {
        self.base_fare
            + self.distance_rate
            + self.time_rate
            + self.surge_pricing
            + self.booking_fee
            + self.tolls
            + self.surcharges
    }
}

#[cfg(test)]
mod tests {
    use super::RideQuote;
    use crate::models::driver::VehicleClass;

    fn quote(eta_minutes: u32) -> RideQuote {
        RideQuote {
            vehicle_class: VehicleClass::Auto,
            distance_km: 1.0,
            eta_minutes,
            fare: 45.0,
        }
    }

    #[test]
    fn formats_sub_hour_etas_in_minutes() {
        assert_eq!(quote(0).formatted_eta(), "0 min");
        assert_eq!(quote(15).formatted_eta(), "15 min");
        assert_eq!(quote(59).formatted_eta(), "59 min");
    }

    #[test]
    fn formats_whole_and_mixed_hours() {
        assert_eq!(quote(60).formatted_eta(), "1 hour");
        assert_eq!(quote(120).formatted_eta(), "2 hours");
        assert_eq!(quote(75).formatted_eta(), "1 hour 15 min");
        assert_eq!(quote(135).formatted_eta(), "2 hours 15 min");
    }
}

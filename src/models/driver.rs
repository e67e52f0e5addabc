use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// A coordinate is usable only if both components are finite and within
    /// the WGS84 degree ranges. Checked at the HTTP boundary; the engine
    /// assumes valid input.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && self.lat.abs() <= 90.0
            && self.lng.abs() <= 180.0
    }
}

/// Closed set of ride categories. Pricing and speed parameters live in the
/// rate table in `engine::pricing`; classes without a row there (carpool)
/// price at auto rates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", from = "String")]
pub enum VehicleClass {
    Bike,
    Auto,
    Cab,
    Carpool,
}

impl VehicleClass {
    pub const ALL: [VehicleClass; 4] = [
        VehicleClass::Bike,
        VehicleClass::Auto,
        VehicleClass::Cab,
        VehicleClass::Carpool,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            VehicleClass::Bike => "bike",
            VehicleClass::Auto => "auto",
            VehicleClass::Cab => "cab",
            VehicleClass::Carpool => "carpool",
        }
    }
}

impl FromStr for VehicleClass {
    type Err = std::convert::Infallible;

    // Unrecognized tags collapse to the default class instead of erroring.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "bike" => VehicleClass::Bike,
            "cab" => VehicleClass::Cab,
            "carpool" => VehicleClass::Carpool,
            _ => VehicleClass::Auto,
        })
    }
}

impl From<String> for VehicleClass {
    fn from(s: String) -> Self {
        s.parse().unwrap_or(VehicleClass::Auto)
    }
}

impl fmt::Display for VehicleClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A driver as the registry persists it. Distance and ETA relative to a
/// rider are per-query annotations and never live here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Driver {
    pub id: String,
    pub name: String,
    pub vehicle_number: String,
    pub vehicle_class: VehicleClass,
    pub location: Coordinate,
    pub rating: f64,
    pub available: bool,
    pub updated_at: DateTime<Utc>,
}

//! Core value types shared between the adapter, the scenery and the traffic manager

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

use crate::core::constants::{FEET_TO_METER, METER_TO_FEET};

/// Orientation triple in degrees: `x` = pitch, `y` = bank, `z` = heading
pub type Orientation = Vector3<f64>;

/// Build an orientation vector from pitch, bank and heading (degrees)
pub fn orientation(pitch_deg: f64, bank_deg: f64, heading_deg: f64) -> Orientation {
    Vector3::new(pitch_deg, bank_deg, heading_deg)
}

/// Geodetic point (WGS84) with elevation stored in feet
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Geod {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_ft: f64,
}

impl Geod {
    pub fn from_deg_ft(latitude_deg: f64, longitude_deg: f64, elevation_ft: f64) -> Self {
        Self { latitude_deg, longitude_deg, elevation_ft }
    }

    pub fn from_deg_m(latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        Self::from_deg_ft(latitude_deg, longitude_deg, elevation_m * METER_TO_FEET)
    }

    pub fn latitude_rad(&self) -> f64 {
        self.latitude_deg.to_radians()
    }

    pub fn longitude_rad(&self) -> f64 {
        self.longitude_deg.to_radians()
    }

    pub fn elevation_m(&self) -> f64 {
        self.elevation_ft * FEET_TO_METER
    }

    pub fn set_elevation_ft(&mut self, elevation_ft: f64) {
        self.elevation_ft = elevation_ft;
    }

    pub fn set_elevation_m(&mut self, elevation_m: f64) {
        self.elevation_ft = elevation_m * METER_TO_FEET;
    }

    /// Same horizontal position at a different elevation
    pub fn with_elevation_ft(&self, elevation_ft: f64) -> Self {
        Self { elevation_ft, ..*self }
    }
}

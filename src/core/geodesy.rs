//! WGS84 conversions used to place models in the cartesian scene frame

use std::f64::consts::FRAC_PI_2;

use nalgebra::{Point3, UnitQuaternion, Vector3};

use crate::core::constants::{WGS84_ECCENTRICITY_SQUARED, WGS84_SEMI_MAJOR_AXIS};
use crate::core::Geod;

/// Convert a geodetic point to earth-centered earth-fixed coordinates (meters)
pub fn geodetic_to_ecef(geod: &Geod) -> Point3<f64> {
    let lat = geod.latitude_rad();
    let lon = geod.longitude_rad();
    let h = geod.elevation_m();

    let sin_lat = lat.sin();
    let cos_lat = lat.cos();
    let n = WGS84_SEMI_MAJOR_AXIS / (1.0 - WGS84_ECCENTRICITY_SQUARED * sin_lat * sin_lat).sqrt();

    Point3::new(
        (n + h) * cos_lat * lon.cos(),
        (n + h) * cos_lat * lon.sin(),
        (n * (1.0 - WGS84_ECCENTRICITY_SQUARED) + h) * sin_lat,
    )
}

/// Rotation from the ECEF frame into the local horizontal (north-east-down) frame at `geod`
pub fn local_frame(geod: &Geod) -> UnitQuaternion<f64> {
    UnitQuaternion::from_axis_angle(&Vector3::z_axis(), geod.longitude_rad())
        * UnitQuaternion::from_axis_angle(&Vector3::y_axis(), -FRAC_PI_2 - geod.latitude_rad())
}

/// Body attitude relative to the local horizontal frame, angles in degrees
pub fn attitude_from_hpr(heading_deg: f64, pitch_deg: f64, roll_deg: f64) -> UnitQuaternion<f64> {
    UnitQuaternion::from_euler_angles(roll_deg.to_radians(), pitch_deg.to_radians(), heading_deg.to_radians())
}

/// Full model orientation in the ECEF frame
pub fn model_orientation(geod: &Geod, heading_deg: f64, pitch_deg: f64, roll_deg: f64) -> UnitQuaternion<f64> {
    local_frame(geod) * attitude_from_hpr(heading_deg, pitch_deg, roll_deg)
}

//! Unit conversions and fixed adapter parameters

/// Feet to meters
pub const FEET_TO_METER: f64 = 0.3048;

/// Meters to feet
pub const METER_TO_FEET: f64 = 1.0 / FEET_TO_METER;

/// Path segment every usable aircraft model path starts with
pub const AIRCRAFT_MODEL_MARKER: &str = "/Aircraft/";

/// Starting altitude (ft) for downward terrain probes, well above any terrain
pub const ELEVATION_PROBE_ALTITUDE_FT: f64 = 30000.0;

/// WGS84 semi-major axis (meters)
pub const WGS84_SEMI_MAJOR_AXIS: f64 = 6378137.0;

/// WGS84 flattening
pub const WGS84_FLATTENING: f64 = 1.0 / 298.257223563;

/// WGS84 first eccentricity squared
pub const WGS84_ECCENTRICITY_SQUARED: f64 = 2.0 * WGS84_FLATTENING - WGS84_FLATTENING * WGS84_FLATTENING;

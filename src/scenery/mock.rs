//! Table-driven scenery for testing and offline feeds

use std::sync::Mutex;

use serde::{Deserialize, Serialize};

use crate::core::Geod;
use crate::scenery::ElevationProbe;

/// Default horizontal matching tolerance (degrees, roughly 11 m)
pub const DEFAULT_TOLERANCE_DEG: f64 = 1e-4;

/// Known terrain elevation at a horizontal position
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ElevationPoint {
    pub latitude_deg: f64,
    pub longitude_deg: f64,
    pub elevation_m: f64,
}

/// Mock scenery answering probes from a point table
pub struct MockScenery {
    points: Vec<ElevationPoint>,
    default_elevation_m: Option<f64>,
    tolerance_deg: f64,
    requests: Mutex<Vec<Geod>>,
}

impl MockScenery {
    /// Create an empty mock scenery (every probe misses)
    pub fn new() -> Self {
        Self {
            points: Vec::new(),
            default_elevation_m: None,
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Add a known terrain elevation
    pub fn with_point(mut self, latitude_deg: f64, longitude_deg: f64, elevation_m: f64) -> Self {
        self.points.push(ElevationPoint { latitude_deg, longitude_deg, elevation_m });
        self
    }

    pub fn with_points(mut self, points: impl IntoIterator<Item = ElevationPoint>) -> Self {
        self.points.extend(points);
        self
    }

    /// Elevation reported for probes that match no table entry
    pub fn with_default_elevation(mut self, elevation_m: f64) -> Self {
        self.default_elevation_m = Some(elevation_m);
        self
    }

    pub fn with_tolerance(mut self, tolerance_deg: f64) -> Self {
        self.tolerance_deg = tolerance_deg.abs();
        self
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// All probe requests received so far
    pub fn requests(&self) -> Vec<Geod> {
        self.requests.lock().map(|r| r.clone()).unwrap_or_default()
    }

    pub fn clear_requests(&self) {
        if let Ok(mut requests) = self.requests.lock() {
            requests.clear();
        }
    }

    fn lookup(&self, request: &Geod) -> Option<f64> {
        self.points
            .iter()
            .filter(|p| {
                (p.latitude_deg - request.latitude_deg).abs() <= self.tolerance_deg
                    && (p.longitude_deg - request.longitude_deg).abs() <= self.tolerance_deg
            })
            .min_by(|a, b| {
                let da = (a.latitude_deg - request.latitude_deg).hypot(a.longitude_deg - request.longitude_deg);
                let db = (b.latitude_deg - request.latitude_deg).hypot(b.longitude_deg - request.longitude_deg);
                da.total_cmp(&db)
            })
            .map(|p| p.elevation_m)
            .or(self.default_elevation_m)
    }
}

impl Default for MockScenery {
    fn default() -> Self {
        Self::new()
    }
}

impl ElevationProbe for MockScenery {
    fn elevation_m(&self, request: &Geod) -> Option<f64> {
        if let Ok(mut requests) = self.requests.lock() {
            requests.push(*request);
        }
        self.lookup(request)
    }
}

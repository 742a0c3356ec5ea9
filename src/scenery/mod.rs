//! Scenery elevation service seam
//!
//! The host simulator owns terrain loading and intersection. Adapters only need
//! a downward probe from a given point, so that is all this module asks for.

pub mod mock;

pub use mock::{ElevationPoint, MockScenery};

use crate::core::Geod;

/// Terrain elevation service
pub trait ElevationProbe: Send + Sync {
    /// Elevation (meters) of the terrain intersected below `request`.
    /// Returns `None` if nothing was hit, e.g. scenery not loaded yet.
    fn elevation_m(&self, request: &Geod) -> Option<f64>;
}

/// Terrain at a constant elevation everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatScenery {
    pub elevation_m: f64,
}

impl FlatScenery {
    pub fn new(elevation_m: f64) -> Self {
        Self { elevation_m }
    }
}

impl ElevationProbe for FlatScenery {
    fn elevation_m(&self, request: &Geod) -> Option<f64> {
        // a probe starting below the ground never intersects it
        (request.elevation_m() >= self.elevation_m).then_some(self.elevation_m)
    }
}

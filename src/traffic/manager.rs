//! Registry of externally positioned aircraft keyed by callsign

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::ai::{AiEntity, SwiftAircraft};
use crate::core::{orientation, Geod, Orientation};
use crate::scenery::ElevationProbe;
use crate::traffic::{TrafficError, TrafficResult};
use crate::utils::config::AdapterConfig;

/// One pose sample received for a remote aircraft
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoseUpdate {
    pub callsign: String,
    pub latitude: f64,
    pub longitude: f64,
    pub elevation_ft: f64,
    #[serde(default)]
    pub pitch: f64,
    #[serde(default)]
    pub bank: f64,
    #[serde(default)]
    pub heading: f64,
    /// Groundspeed in knots
    #[serde(default)]
    pub groundspeed: f64,
    #[serde(default = "default_init_pos")]
    pub init_pos: bool,
}

fn default_init_pos() -> bool {
    true
}

impl PoseUpdate {
    pub fn new(callsign: &str, position: Geod, orientation: Orientation, groundspeed: f64) -> Self {
        Self {
            callsign: callsign.to_string(),
            latitude: position.latitude_deg,
            longitude: position.longitude_deg,
            elevation_ft: position.elevation_ft,
            pitch: orientation.x,
            bank: orientation.y,
            heading: orientation.z,
            groundspeed,
            init_pos: true,
        }
    }

    pub fn position(&self) -> Geod {
        Geod::from_deg_ft(self.latitude, self.longitude, self.elevation_ft)
    }

    pub fn orientation(&self) -> Orientation {
        orientation(self.pitch, self.bank, self.heading)
    }
}

/// Owns the adapters for all remote aircraft currently in relevance
pub struct TrafficManager {
    config: AdapterConfig,
    scenery: Arc<dyn ElevationProbe>,
    aircraft: BTreeMap<String, SwiftAircraft>,
}

impl TrafficManager {
    pub fn new(config: AdapterConfig, scenery: Arc<dyn ElevationProbe>) -> Self {
        Self {
            config,
            scenery,
            aircraft: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// Create the adapter for a remote aircraft entering relevance
    pub fn add_aircraft(&mut self, callsign: &str, model_string: &str) -> TrafficResult<()> {
        if callsign.trim().is_empty() {
            return Err(TrafficError::InvalidCallsign(callsign.to_string()));
        }
        if self.aircraft.contains_key(callsign) {
            return Err(TrafficError::AircraftAlreadyExists(callsign.to_string()));
        }

        let aircraft = SwiftAircraft::new(callsign, model_string, self.scenery.clone())
            .with_init_policy(self.config.init_policy)
            .with_probe_altitude_ft(self.config.probe_altitude_ft);

        info!(callsign, model_path = aircraft.model_path(), "aircraft entered relevance");
        self.aircraft.insert(callsign.to_string(), aircraft);
        Ok(())
    }

    /// Drop the adapter of a remote aircraft leaving relevance
    pub fn remove_aircraft(&mut self, callsign: &str) -> TrafficResult<()> {
        if self.aircraft.remove(callsign).is_none() {
            return Err(TrafficError::AircraftNotFound(callsign.to_string()));
        }
        info!(callsign, "aircraft left relevance");
        Ok(())
    }

    pub fn remove_all(&mut self) {
        debug!(count = self.aircraft.len(), "removing all aircraft");
        self.aircraft.clear();
    }

    pub fn contains(&self, callsign: &str) -> bool {
        self.aircraft.contains_key(callsign)
    }

    pub fn get(&self, callsign: &str) -> Option<&SwiftAircraft> {
        self.aircraft.get(callsign)
    }

    pub fn get_mut(&mut self, callsign: &str) -> Option<&mut SwiftAircraft> {
        self.aircraft.get_mut(callsign)
    }

    /// All managed aircraft in callsign order
    pub fn entities(&self) -> impl Iterator<Item = &dyn AiEntity> {
        self.aircraft.values().map(|a| a as &dyn AiEntity)
    }

    pub fn callsigns(&self) -> Vec<&str> {
        self.aircraft.keys().map(|s| s.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.aircraft.len()
    }

    pub fn is_empty(&self) -> bool {
        self.aircraft.is_empty()
    }

    pub fn update_position(&mut self, update: &PoseUpdate) -> TrafficResult<()> {
        let aircraft = self
            .aircraft
            .get_mut(&update.callsign)
            .ok_or_else(|| TrafficError::AircraftNotFound(update.callsign.clone()))?;

        aircraft.update_position(&update.position(), &update.orientation(), update.groundspeed, update.init_pos);
        Ok(())
    }

    /// Apply a batch of poses, stopping at the first unknown callsign
    pub fn update_positions(&mut self, updates: &[PoseUpdate]) -> TrafficResult<()> {
        for update in updates {
            self.update_position(update)?;
        }
        Ok(())
    }

    /// Per-frame tick for every managed aircraft
    pub fn update(&mut self, dt: f64) {
        for aircraft in self.aircraft.values_mut() {
            aircraft.update(dt);
        }
    }

    /// Terrain elevation (meters) below `pos` as seen by `callsign`, NaN if not yet known
    pub fn ground_elevation_m(&self, callsign: &str, pos: &Geod) -> TrafficResult<f64> {
        self.aircraft
            .get(callsign)
            .map(|aircraft| aircraft.ground_elevation_m(pos))
            .ok_or_else(|| TrafficError::AircraftNotFound(callsign.to_string()))
    }
}

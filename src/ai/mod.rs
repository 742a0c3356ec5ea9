//! AI traffic entities
//!
//! The host simulator holds every traffic object through [`AiEntity`], a small
//! capability interface. Concrete entities compose an [`AiObjectState`] for the
//! shared pose bookkeeping and render placement.

pub mod base;
pub mod swift_aircraft;

pub use base::{AiObjectState, ModelPlacement};
pub use swift_aircraft::{derive_model_path, InitPolicy, SwiftAircraft};

use serde::{Deserialize, Serialize};

use crate::core::Geod;

/// Kind of AI object, controls how much the base update does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ObjectType {
    /// Positioned entirely from outside, no base kinematics
    Static,
    /// Regular AI aircraft
    Aircraft,
    /// Ship or other surface traffic
    Ship,
}

/// Model lookup preference handed to the host's asset resolver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SearchOrder {
    /// Only use the aircraft data directories
    #[default]
    DataOnly,
    /// Try aircraft data directories first, then the entity's own path
    PreferData,
    /// Try the entity's own model path first
    PreferAi,
}

/// Updatable positioned entity as seen by the host
pub trait AiEntity {
    fn callsign(&self) -> &str;

    fn model_path(&self) -> &str;

    fn search_order(&self) -> SearchOrder;

    fn object_type(&self) -> ObjectType;

    /// Current geodetic position
    fn position(&self) -> Geod;

    /// Per-frame update, `dt` in seconds
    fn update(&mut self, dt: f64);

    /// Terrain elevation (meters) below `pos`, NaN before the entity has a pose
    fn ground_elevation_m(&self, pos: &Geod) -> f64;
}

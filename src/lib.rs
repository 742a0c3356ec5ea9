//! Swift Traffic
//!
//! Remote aircraft driven by a networked swift peer, presented to a host
//! flight simulator as AI traffic entities with terrain elevation lookup.

pub mod core;
pub mod ai;
pub mod scenery;
pub mod traffic;
pub mod utils;

// Re-export commonly used types
pub use crate::core::{orientation, Geod, Orientation, AIRCRAFT_MODEL_MARKER, ELEVATION_PROBE_ALTITUDE_FT};
pub use ai::{derive_model_path, AiEntity, AiObjectState, InitPolicy, ModelPlacement, ObjectType, SearchOrder, SwiftAircraft};
pub use scenery::{ElevationPoint, ElevationProbe, FlatScenery, MockScenery};
pub use traffic::{parse_feed, FeedEvent, PoseUpdate, TrafficError, TrafficManager, TrafficResult};
pub use utils::config::{AdapterConfig, ConfigError, ConfigurationManager, SceneryConfig, TrafficConfig};

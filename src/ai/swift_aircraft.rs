//! Aircraft whose pose is driven by a remote swift peer
//!
//! The remote client sends a fresh pose every frame; this entity only mirrors
//! it into the base state and asks the scenery for terrain height on demand.

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::ai::{AiEntity, AiObjectState, ObjectType, SearchOrder};
use crate::core::constants::{AIRCRAFT_MODEL_MARKER, ELEVATION_PROBE_ALTITUDE_FT};
use crate::core::{Geod, Orientation};
use crate::scenery::ElevationProbe;

/// How the pose update's `init_pos` argument affects the initialized flag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum InitPolicy {
    /// Flag always equals the value of the latest update
    #[default]
    Mirror,
    /// Flag stays set once any update passed `true`
    Latch,
}

/// Part of `model_string` starting at the `/Aircraft/` marker, if present
pub fn derive_model_path(model_string: &str) -> Option<&str> {
    model_string
        .find(AIRCRAFT_MODEL_MARKER)
        .map(|idx| &model_string[idx..])
}

/// Externally positioned aircraft
pub struct SwiftAircraft {
    base: AiObjectState,
    scenery: Arc<dyn ElevationProbe>,
    init_pos: bool,
    init_policy: InitPolicy,
    probe_altitude_ft: f64,
}

impl SwiftAircraft {
    pub fn new(callsign: &str, model_string: &str, scenery: Arc<dyn ElevationProbe>) -> Self {
        let mut base = AiObjectState::new(ObjectType::Static, false);

        match derive_model_path(model_string) {
            Some(path) => base.set_model_path(path),
            None => warn!(callsign, model_string, "model path has no {} segment", AIRCRAFT_MODEL_MARKER),
        }
        base.set_callsign(callsign);
        base.set_search_order(SearchOrder::PreferAi);

        debug!(callsign, model_path = base.model_path(), "created swift aircraft");

        Self {
            base,
            scenery,
            init_pos: false,
            init_policy: InitPolicy::default(),
            probe_altitude_ft: ELEVATION_PROBE_ALTITUDE_FT,
        }
    }

    pub fn with_init_policy(mut self, init_policy: InitPolicy) -> Self {
        self.init_policy = init_policy;
        self
    }

    /// Override the starting altitude of terrain probes
    pub fn with_probe_altitude_ft(mut self, probe_altitude_ft: f64) -> Self {
        self.probe_altitude_ft = probe_altitude_ft;
        self
    }

    /// Apply a pose received from the remote peer.
    /// `orientation` holds pitch, bank and heading in degrees.
    pub fn update_position(&mut self, position: &Geod, orientation: &Orientation, groundspeed: f64, init_pos: bool) {
        self.init_pos = match self.init_policy {
            InitPolicy::Mirror => init_pos,
            InitPolicy::Latch => self.init_pos || init_pos,
        };

        self.base.set_latitude(position.latitude_deg);
        self.base.set_longitude(position.longitude_deg);
        self.base.set_altitude_ft(position.elevation_ft);
        self.base.set_pitch(orientation.x);
        self.base.set_bank(orientation.y);
        self.base.set_heading(orientation.z);
        self.base.set_speed(groundspeed);
    }

    /// Whether elevation queries are answered
    pub fn is_initialized(&self) -> bool {
        self.init_pos
    }

    pub fn init_policy(&self) -> InitPolicy {
        self.init_policy
    }

    pub fn probe_altitude_ft(&self) -> f64 {
        self.probe_altitude_ft
    }

    pub fn base(&self) -> &AiObjectState {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut AiObjectState {
        &mut self.base
    }
}

impl AiEntity for SwiftAircraft {
    fn callsign(&self) -> &str {
        self.base.callsign()
    }

    fn model_path(&self) -> &str {
        self.base.model_path()
    }

    fn search_order(&self) -> SearchOrder {
        self.base.search_order()
    }

    fn object_type(&self) -> ObjectType {
        self.base.object_type()
    }

    fn position(&self) -> Geod {
        self.base.position()
    }

    fn update(&mut self, dt: f64) {
        self.base.update(dt);
        self.base.transform();
    }

    fn ground_elevation_m(&self, pos: &Geod) -> f64 {
        if !self.init_pos {
            return f64::NAN;
        }

        // a miss reports 0 m, scenery loading is the host's concern
        let request = pos.with_elevation_ft(self.probe_altitude_ft);
        self.scenery.elevation_m(&request).unwrap_or_else(|| {
            debug!(callsign = self.base.callsign(), lat = request.latitude_deg, lon = request.longitude_deg,
                   "no terrain below probe");
            0.0
        })
    }
}

impl fmt::Debug for SwiftAircraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwiftAircraft")
            .field("base", &self.base)
            .field("init_pos", &self.init_pos)
            .field("init_policy", &self.init_policy)
            .field("probe_altitude_ft", &self.probe_altitude_ft)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::orientation;
    use crate::scenery::{FlatScenery, MockScenery};

    fn stub_scenery() -> Arc<MockScenery> {
        Arc::new(MockScenery::new().with_point(47.0, 8.0, 500.0))
    }

    #[test]
    fn test_derive_model_path() {
        assert_eq!(
            derive_model_path("/home/pilot/fgdata/Aircraft/c172p/Models/c172p.xml"),
            Some("/Aircraft/c172p/Models/c172p.xml")
        );
        assert_eq!(derive_model_path("/Aircraft/"), Some("/Aircraft/"));
        assert_eq!(derive_model_path("Models/c172p.xml"), None);
        assert_eq!(derive_model_path(""), None);
    }

    #[test]
    fn test_first_marker_occurrence_is_used() {
        assert_eq!(
            derive_model_path("/data/Aircraft/pack/Aircraft/b737/model.xml"),
            Some("/Aircraft/pack/Aircraft/b737/model.xml")
        );
    }

    #[test]
    fn test_construction() {
        let aircraft = SwiftAircraft::new("SWIFT01", "C:/fg/Models/Aircraft/x/model.xml", stub_scenery());

        assert_eq!(aircraft.callsign(), "SWIFT01");
        assert_eq!(aircraft.model_path(), "/Aircraft/x/model.xml");
        assert_eq!(aircraft.search_order(), SearchOrder::PreferAi);
        assert_eq!(aircraft.object_type(), ObjectType::Static);
        assert!(!aircraft.base().enable_hot());
        assert!(!aircraft.is_initialized());
        assert_eq!(aircraft.init_policy(), InitPolicy::Mirror);
        assert_eq!(aircraft.probe_altitude_ft(), ELEVATION_PROBE_ALTITUDE_FT);
    }

    #[test]
    fn test_missing_marker_leaves_path_empty() {
        let aircraft = SwiftAircraft::new("SWIFT02", "/models/b737.xml", stub_scenery());
        assert_eq!(aircraft.model_path(), "");
        assert_eq!(aircraft.callsign(), "SWIFT02");
    }

    #[test]
    fn test_elevation_unknown_before_first_pose() {
        let scenery = stub_scenery();
        let aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", scenery.clone());

        assert!(aircraft.ground_elevation_m(&Geod::from_deg_ft(47.0, 8.0, 0.0)).is_nan());
        assert!(aircraft.ground_elevation_m(&Geod::from_deg_ft(-10.0, 100.0, 5000.0)).is_nan());
        assert!(scenery.requests().is_empty());
    }

    #[test]
    fn test_update_position_copies_pose() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery());
        aircraft.update_position(&Geod::from_deg_ft(47.5, 8.25, 3500.0), &orientation(-3.0, 15.0, 271.0), 145.5, true);

        let base = aircraft.base();
        assert_eq!(base.latitude(), 47.5);
        assert_eq!(base.longitude(), 8.25);
        assert_eq!(base.altitude(), 3500.0);
        assert_eq!(base.pitch(), -3.0);
        assert_eq!(base.bank(), 15.0);
        assert_eq!(base.heading(), 271.0);
        assert_eq!(base.speed(), 145.5);
        assert!(aircraft.is_initialized());
    }

    #[test]
    fn test_probe_ignores_query_elevation() {
        let scenery = stub_scenery();
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", scenery.clone());
        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(0.0, 0.0, 0.0), 0.0, true);

        assert_eq!(aircraft.ground_elevation_m(&Geod::from_deg_ft(47.0, 8.0, -400.0)), 500.0);
        assert_eq!(aircraft.ground_elevation_m(&Geod::from_deg_ft(47.0, 8.0, 90000.0)), 500.0);

        let requests = scenery.requests();
        assert_eq!(requests.len(), 2);
        assert!(requests.iter().all(|r| r.elevation_ft == 30000.0));
        assert!(requests.iter().all(|r| r.latitude_deg == 47.0 && r.longitude_deg == 8.0));
    }

    #[test]
    fn test_scenery_miss_reports_zero() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery());
        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(0.0, 0.0, 0.0), 0.0, true);
        assert_eq!(aircraft.ground_elevation_m(&Geod::from_deg_ft(10.0, 10.0, 0.0)), 0.0);
    }

    #[test]
    fn test_unloaded_scenery_after_first_pose() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", Arc::new(MockScenery::new()));
        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(0.0, 0.0, 0.0), 0.0, true);

        assert!(aircraft.is_initialized());
        assert_eq!(aircraft.ground_elevation_m(&Geod::from_deg_ft(47.0, 8.0, 0.0)), 0.0);
    }

    #[test]
    fn test_default_init_policy() {
        assert_eq!(InitPolicy::default(), InitPolicy::Mirror);
    }

    #[test]
    fn test_mirror_policy_can_uninitialize() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery());
        let pos = Geod::from_deg_ft(47.0, 8.0, 2000.0);

        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, true);
        assert_eq!(aircraft.ground_elevation_m(&pos), 500.0);

        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, false);
        assert!(!aircraft.is_initialized());
        assert!(aircraft.ground_elevation_m(&pos).is_nan());
    }

    #[test]
    fn test_latch_policy_stays_initialized() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery())
            .with_init_policy(InitPolicy::Latch);
        let pos = Geod::from_deg_ft(47.0, 8.0, 2000.0);

        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, false);
        assert!(!aircraft.is_initialized());

        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, true);
        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, false);
        assert!(aircraft.is_initialized());
        assert_eq!(aircraft.ground_elevation_m(&pos), 500.0);
    }

    #[test]
    fn test_custom_probe_altitude() {
        let scenery = Arc::new(FlatScenery::new(3000.0));
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", scenery)
            .with_probe_altitude_ft(5000.0);
        let pos = Geod::from_deg_ft(0.0, 0.0, 0.0);
        aircraft.update_position(&pos, &orientation(0.0, 0.0, 0.0), 0.0, true);

        // probe starts at ~1524 m, below the 3000 m plateau
        assert_eq!(aircraft.ground_elevation_m(&pos), 0.0);
    }

    #[test]
    fn test_update_places_model() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery());
        assert!(aircraft.base().placement().is_none());

        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(1.0, 2.0, 180.0), 120.0, true);
        aircraft.update(0.02);

        let placement = aircraft.base().placement().unwrap();
        assert!(placement.visible);
        assert_eq!(placement.position, Geod::from_deg_ft(47.0, 8.0, 2000.0));
        assert!((aircraft.base().age() - 0.02).abs() < 1e-12);
    }

    #[test]
    fn test_swift01_scenario() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", ".../Models/Aircraft/x/model.xml", stub_scenery());
        assert_eq!(aircraft.model_path(), "/Aircraft/x/model.xml");
        assert_eq!(aircraft.callsign(), "SWIFT01");

        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(1.0, 2.0, 180.0), 120.0, true);
        assert_eq!(aircraft.ground_elevation_m(&Geod::from_deg_ft(47.0, 8.0, 2000.0)), 500.0);
    }

    #[test]
    fn test_entity_trait_object() {
        let mut aircraft = SwiftAircraft::new("SWIFT01", "/Aircraft/x/model.xml", stub_scenery());
        aircraft.update_position(&Geod::from_deg_ft(47.0, 8.0, 2000.0), &orientation(0.0, 0.0, 90.0), 80.0, true);

        let entity: &mut dyn AiEntity = &mut aircraft;
        entity.update(0.1);
        assert_eq!(entity.position(), Geod::from_deg_ft(47.0, 8.0, 2000.0));
        assert_eq!(entity.ground_elevation_m(&entity.position()), 500.0);
    }
}

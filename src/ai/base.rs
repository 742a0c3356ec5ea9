//! Shared pose state and render placement for AI objects

use nalgebra::{Point3, UnitQuaternion};

use crate::ai::{ObjectType, SearchOrder};
use crate::core::geodesy::{geodetic_to_ecef, model_orientation};
use crate::core::Geod;

/// Where and how the host should draw the model this frame
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPlacement {
    pub visible: bool,
    pub position: Geod,
    /// ECEF position (meters)
    pub cartesian: Point3<f64>,
    /// Model orientation in the ECEF frame
    pub orientation: UnitQuaternion<f64>,
}

/// Mutable state every AI object carries
#[derive(Debug, Clone)]
pub struct AiObjectState {
    object_type: ObjectType,
    enable_hot: bool,
    callsign: String,
    model_path: String,
    search_order: SearchOrder,
    invisible: bool,

    pos: Geod,
    pitch: f64,
    roll: f64,
    hdg: f64,
    speed: f64,

    ft_per_deg_lat: f64,
    ft_per_deg_lon: f64,
    age: f64,

    placement: Option<ModelPlacement>,
}

impl AiObjectState {
    pub fn new(object_type: ObjectType, enable_hot: bool) -> Self {
        Self {
            object_type,
            enable_hot,
            callsign: String::new(),
            model_path: String::new(),
            search_order: SearchOrder::default(),
            invisible: false,
            pos: Geod::default(),
            pitch: 0.0,
            roll: 0.0,
            hdg: 0.0,
            speed: 0.0,
            ft_per_deg_lat: 0.0,
            ft_per_deg_lon: 0.0,
            age: 0.0,
            placement: None,
        }
    }

    pub fn object_type(&self) -> ObjectType {
        self.object_type
    }

    /// Whether the host may use this object's geometry for height-over-terrain queries
    pub fn enable_hot(&self) -> bool {
        self.enable_hot
    }

    pub fn callsign(&self) -> &str {
        &self.callsign
    }

    pub fn set_callsign(&mut self, callsign: &str) {
        self.callsign = callsign.to_string();
    }

    pub fn model_path(&self) -> &str {
        &self.model_path
    }

    pub fn set_model_path(&mut self, model_path: &str) {
        self.model_path = model_path.to_string();
    }

    pub fn search_order(&self) -> SearchOrder {
        self.search_order
    }

    pub fn set_search_order(&mut self, search_order: SearchOrder) {
        self.search_order = search_order;
    }

    pub fn is_invisible(&self) -> bool {
        self.invisible
    }

    pub fn set_invisible(&mut self, invisible: bool) {
        self.invisible = invisible;
    }

    pub fn position(&self) -> Geod {
        self.pos
    }

    pub fn latitude(&self) -> f64 {
        self.pos.latitude_deg
    }

    pub fn set_latitude(&mut self, latitude_deg: f64) {
        self.pos.latitude_deg = latitude_deg;
    }

    pub fn longitude(&self) -> f64 {
        self.pos.longitude_deg
    }

    pub fn set_longitude(&mut self, longitude_deg: f64) {
        self.pos.longitude_deg = longitude_deg;
    }

    /// Altitude in feet
    pub fn altitude(&self) -> f64 {
        self.pos.elevation_ft
    }

    pub fn set_altitude_ft(&mut self, altitude_ft: f64) {
        self.pos.elevation_ft = altitude_ft;
    }

    pub fn pitch(&self) -> f64 {
        self.pitch
    }

    pub fn set_pitch(&mut self, pitch_deg: f64) {
        self.pitch = pitch_deg;
    }

    pub fn bank(&self) -> f64 {
        self.roll
    }

    pub fn set_bank(&mut self, bank_deg: f64) {
        self.roll = bank_deg;
    }

    pub fn heading(&self) -> f64 {
        self.hdg
    }

    pub fn set_heading(&mut self, heading_deg: f64) {
        self.hdg = heading_deg;
    }

    /// Speed in knots
    pub fn speed(&self) -> f64 {
        self.speed
    }

    pub fn set_speed(&mut self, speed_kt: f64) {
        self.speed = speed_kt;
    }

    pub fn ft_per_deg_lat(&self) -> f64 {
        self.ft_per_deg_lat
    }

    pub fn ft_per_deg_lon(&self) -> f64 {
        self.ft_per_deg_lon
    }

    /// Seconds of simulation time this object has been updated for
    pub fn age(&self) -> f64 {
        self.age
    }

    /// Placement computed by the last [`transform`](Self::transform) call
    pub fn placement(&self) -> Option<&ModelPlacement> {
        self.placement.as_ref()
    }

    /// Generic per-frame bookkeeping
    pub fn update(&mut self, dt: f64) {
        self.age += dt;

        if self.object_type == ObjectType::Static {
            return;
        }

        // approximate local scale factors, refreshed as the object moves
        let lat = self.pos.latitude_rad();
        self.ft_per_deg_lat = 366468.96 - 3717.12 * lat.cos();
        self.ft_per_deg_lon = 365228.16 * lat.cos();
    }

    /// Recompute the render placement from the current pose
    pub fn transform(&mut self) {
        if self.invisible {
            if let Some(placement) = self.placement.as_mut() {
                placement.visible = false;
            }
            return;
        }

        self.placement = Some(ModelPlacement {
            visible: true,
            position: self.pos,
            cartesian: geodetic_to_ecef(&self.pos),
            orientation: model_orientation(&self.pos, self.hdg, self.pitch, self.roll),
        });
    }
}

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::ai::InitPolicy;
use crate::core::constants::ELEVATION_PROBE_ALTITUDE_FT;
use crate::scenery::mock::DEFAULT_TOLERANCE_DEG;
use crate::scenery::{ElevationPoint, MockScenery};

/// Highest accepted probe start altitude (ft)
pub const MAX_PROBE_ALTITUDE_FT: f64 = 100_000.0;

/// Top-level configuration file content
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrafficConfig {
    /// Settings applied to every new remote aircraft
    #[serde(default)]
    pub adapter: AdapterConfig,
    /// Offline terrain used when no live scenery is attached
    #[serde(default)]
    pub scenery: SceneryConfig,
    /// Enable debug logging
    #[serde(default)]
    pub debug_logging: bool,
}

/// Per-aircraft adapter settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// Starting altitude for terrain probes (ft). Values below the 30000 ft
    /// default are accepted with a warning, but a probe starting below high
    /// terrain misses it and reports 0 m.
    pub probe_altitude_ft: f64,
    /// Handling of the `init_pos` flag of pose updates
    pub init_policy: InitPolicy,
}

/// Table-driven terrain settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneryConfig {
    /// Elevation reported where no point matches (meters)
    pub default_elevation_m: Option<f64>,
    /// Horizontal matching tolerance (degrees)
    pub tolerance_deg: f64,
    /// Known terrain elevations
    pub points: Vec<ElevationPoint>,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            probe_altitude_ft: ELEVATION_PROBE_ALTITUDE_FT,
            init_policy: InitPolicy::Mirror,
        }
    }
}

impl Default for SceneryConfig {
    fn default() -> Self {
        Self {
            default_elevation_m: None,
            tolerance_deg: DEFAULT_TOLERANCE_DEG,
            points: Vec::new(),
        }
    }
}

impl SceneryConfig {
    /// Build the mock scenery described by this configuration
    pub fn build_scenery(&self) -> MockScenery {
        let scenery = MockScenery::new()
            .with_tolerance(self.tolerance_deg)
            .with_points(self.points.iter().copied());

        match self.default_elevation_m {
            Some(elevation_m) => scenery.with_default_elevation(elevation_m),
            None => scenery,
        }
    }
}

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {parameter} = {value}: {reason}")]
    InvalidParameter { parameter: String, value: String, reason: String },

    #[error("config file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("config serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("no file path set for saving configuration")]
    NoFilePath,
}

fn invalid<V: ToString>(parameter: &str, value: V, reason: &str) -> ConfigError {
    ConfigError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Configuration validation result
#[derive(Debug)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub errors: Vec<ConfigError>,
    pub warnings: Vec<String>,
}

/// Holds the active configuration and its backing file
pub struct ConfigurationManager {
    config: TrafficConfig,
    config_file_path: Option<String>,
    is_modified: bool,
}

impl ConfigurationManager {
    /// Create a configuration manager with default settings
    pub fn new() -> Self {
        Self {
            config: TrafficConfig::default(),
            config_file_path: None,
            is_modified: false,
        }
    }

    /// Create configuration manager and load from file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut manager = Self::new();
        manager.load_from_file(path)?;
        Ok(manager)
    }

    pub fn get_config(&self) -> &TrafficConfig {
        &self.config
    }

    pub fn get_adapter_config(&self) -> &AdapterConfig {
        &self.config.adapter
    }

    /// Replace the adapter settings after validation
    pub fn update_adapter_config(&mut self, adapter: AdapterConfig) -> Result<(), ConfigError> {
        let candidate = TrafficConfig { adapter, ..self.config.clone() };
        self.apply(candidate)?;
        self.is_modified = true;
        Ok(())
    }

    pub fn set_init_policy(&mut self, init_policy: InitPolicy) {
        self.config.adapter.init_policy = init_policy;
        self.is_modified = true;
    }

    /// Load configuration from JSON file
    pub fn load_from_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let content = fs::read_to_string(&path)?;
        let config: TrafficConfig = serde_json::from_str(&content)?;

        self.apply(config)?;
        self.config_file_path = Some(path.as_ref().to_string_lossy().to_string());
        self.is_modified = false;
        Ok(())
    }

    /// Save configuration to JSON file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(&self.config)?;
        fs::write(&path, content)?;

        self.config_file_path = Some(path.as_ref().to_string_lossy().to_string());
        self.is_modified = false;
        Ok(())
    }

    /// Save to the currently loaded file path
    pub fn save(&mut self) -> Result<(), ConfigError> {
        match self.config_file_path.clone() {
            Some(path) => self.save_to_file(path),
            None => Err(ConfigError::NoFilePath),
        }
    }

    /// Check if configuration has been modified since last load/save
    pub fn is_modified(&self) -> bool {
        self.is_modified
    }

    pub fn validate(&self, config: &TrafficConfig) -> ValidationResult {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        let probe_alt = config.adapter.probe_altitude_ft;
        if !probe_alt.is_finite() || probe_alt <= 0.0 {
            errors.push(invalid("probe_altitude_ft", probe_alt, "must be a positive number"));
        } else if probe_alt > MAX_PROBE_ALTITUDE_FT {
            errors.push(invalid("probe_altitude_ft", probe_alt, "exceeds maximum probe altitude"));
        } else if probe_alt < ELEVATION_PROBE_ALTITUDE_FT {
            warnings.push(format!("probe altitude {} ft may start below high terrain", probe_alt));
        }

        let scenery = &config.scenery;
        if !scenery.tolerance_deg.is_finite() || scenery.tolerance_deg < 0.0 {
            errors.push(invalid("scenery.tolerance_deg", scenery.tolerance_deg, "must be a non-negative number"));
        }
        if let Some(elevation_m) = scenery.default_elevation_m {
            if !elevation_m.is_finite() {
                errors.push(invalid("scenery.default_elevation_m", elevation_m, "must be finite"));
            }
        }
        for (idx, point) in scenery.points.iter().enumerate() {
            if !(-90.0..=90.0).contains(&point.latitude_deg) {
                errors.push(invalid(&format!("scenery.points[{}].latitude_deg", idx), point.latitude_deg, "out of range"));
            }
            if !(-180.0..=180.0).contains(&point.longitude_deg) {
                errors.push(invalid(&format!("scenery.points[{}].longitude_deg", idx), point.longitude_deg, "out of range"));
            }
            if !point.elevation_m.is_finite() {
                errors.push(invalid(&format!("scenery.points[{}].elevation_m", idx), point.elevation_m, "must be finite"));
            }
        }

        ValidationResult {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }

    fn apply(&mut self, config: TrafficConfig) -> Result<(), ConfigError> {
        let validation = self.validate(&config);
        if let Some(error) = validation.errors.into_iter().next() {
            return Err(error);
        }
        for warning in &validation.warnings {
            tracing::warn!("{}", warning);
        }
        self.config = config;
        Ok(())
    }
}

impl Default for ConfigurationManager {
    fn default() -> Self {
        Self::new()
    }
}

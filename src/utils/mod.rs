//! Configuration utilities

pub mod config;

pub use config::{AdapterConfig, ConfigError, ConfigurationManager, SceneryConfig, TrafficConfig};

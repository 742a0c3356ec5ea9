//! Errors raised while managing remote traffic

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrafficError {
    #[error("aircraft not found: {0}")]
    AircraftNotFound(String),

    #[error("aircraft already exists: {0}")]
    AircraftAlreadyExists(String),

    #[error("invalid callsign: {0:?}")]
    InvalidCallsign(String),

    #[error("feed line {line}: {message}")]
    FeedParse { line: usize, message: String },
}

/// Result type for traffic operations
pub type TrafficResult<T> = Result<T, TrafficError>;

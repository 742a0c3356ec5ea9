//! Core geodetic types, constants and conversions

pub mod types;
pub mod constants;
pub mod geodesy;

pub use types::*;
pub use constants::*;

//! Remote traffic bookkeeping
//!
//! Owns one [`SwiftAircraft`](crate::ai::SwiftAircraft) per remote peer
//! aircraft and routes received poses and per-frame ticks to them.

pub mod error;
pub mod feed;
pub mod manager;

pub use error::{TrafficError, TrafficResult};
pub use feed::{parse_feed, FeedEvent};
pub use manager::{PoseUpdate, TrafficManager};

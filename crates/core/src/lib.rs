//! # WildTrack Core
//!
//! Core types for the WildTrack wildlife-sighting analysis engine.
//!
//! This crate provides:
//! - `Sighting` / `RawSighting` / `SightingCollection`: the record model
//! - `Season` / `TimeKey` / `PeriodKey`: calendar bucketing keys
//! - `Error` / `Result`: the shared error type

pub mod error;
pub mod record;
pub mod time;

pub use error::{Error, Result};
pub use record::{RawSighting, Sighting, SightingCollection};
pub use time::{Centroid, Hemisphere, PeriodKey, Season, TimeKey};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::record::{RawSighting, Sighting, SightingCollection};
    pub use crate::time::{Centroid, Hemisphere, PeriodKey, Season, TimeKey};
}

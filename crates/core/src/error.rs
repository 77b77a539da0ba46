//! Error types for WildTrack

use thiserror::Error;

/// Main error type for WildTrack operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("missing required fields: {}", missing.join(", "))]
    Schema { missing: Vec<String> },

    #[error("invalid argument: {name} = {value} (expected {expected})")]
    InvalidArgument {
        name: &'static str,
        value: String,
        expected: &'static str,
    },

    #[error("insufficient data: {0}")]
    InsufficientData(String),

    #[error("coordinate out of range: ({latitude}, {longitude})")]
    InvalidCoordinate { latitude: f64, longitude: f64 },
}

/// Result type alias for WildTrack operations
pub type Result<T> = std::result::Result<T, Error>;

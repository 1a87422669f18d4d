//! Error types for the simulator

use thiserror::Error;

/// Simulator error type
///
/// Only construction and configuration can fail. Degenerate numeric cases
/// (parallel lines, concentric circles, a point sitting on the pivot) are
/// reported through empty or zero results instead.
#[derive(Error, Debug)]
pub enum SimError {
    #[error("Transform expects 0, 4, 6, or 9 parameters; got {count}")]
    InvalidTransform { count: usize },

    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for SimError {
    fn from(e: toml::de::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

impl From<toml::ser::Error> for SimError {
    fn from(e: toml::ser::Error) -> Self {
        SimError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SimError>;

//! Error types for grid construction, insertion and queries.

use thiserror::Error;

/// Errors reported by the grid. All of them are recoverable and describe a
/// problem with the caller's input.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GridError {
    /// A coordinate fell outside the grid's base region, or was not finite.
    #[error("coordinate ({latitude}, {longitude}) is outside the grid region")]
    OutOfRange { latitude: f64, longitude: f64 },

    /// A query polygon cannot describe an area.
    #[error("invalid polygon: {0}")]
    InvalidPolygon(String),

    /// Resolution, region bounds or storage settings are unusable.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// A configuration document failed to parse.
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, GridError>;

impl From<serde_json::Error> for GridError {
    fn from(err: serde_json::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::de::Error> for GridError {
    fn from(err: toml::de::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

#[cfg(feature = "toml")]
impl From<toml::ser::Error> for GridError {
    fn from(err: toml::ser::Error) -> Self {
        GridError::Config(err.to_string())
    }
}

//! Grid configuration.
//!
//! Everything that is fixed for the lifetime of a grid apart from its region:
//! resolution, boundary policy and the occupancy storage layout. The type is
//! serializable so it can be loaded from JSON or, with the `toml` feature,
//! from TOML.
use crate::error::Result;
use crate::occupancy::{DENSE_LIMIT, StorageKind, StorageMode};
use crate::validation::validate_resolution;
use serde::{Deserialize, Serialize};

/// Whether a cell that only touches a query polygon's boundary counts as a
/// match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryPolicy {
    /// Cells whose closed rectangle meets the closed polygon match, including
    /// cells that share only an edge or a vertex with it.
    #[default]
    Inclusive,
    /// Cells match only when their interior overlaps the polygon's interior.
    Exclusive,
}

/// Grid configuration
///
/// # Example
///
/// ```rust
/// use geogrid::{BoundaryPolicy, GridConfig, StorageMode};
///
/// let json = r#"{
///     "resolution": 30,
///     "boundary": "exclusive",
///     "storage": "sparse"
/// }"#;
/// let config = GridConfig::from_json(json)?;
/// assert_eq!(config.resolution, 30);
/// assert_eq!(config.boundary, BoundaryPolicy::Exclusive);
/// assert_eq!(config.storage, StorageMode::Sparse);
/// # Ok::<(), geogrid::GridError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GridConfig {
    /// Number of bisection steps (bits per cell code), 1..=62.
    #[serde(default = "GridConfig::default_resolution")]
    pub resolution: u32,

    #[serde(default)]
    pub boundary: BoundaryPolicy,

    #[serde(default)]
    pub storage: StorageMode,

    /// Highest resolution for which `StorageMode::Auto` picks a dense store.
    #[serde(default = "GridConfig::default_dense_max_resolution")]
    pub dense_max_resolution: u32,
}

impl GridConfig {
    const fn default_resolution() -> u32 {
        16
    }

    const fn default_dense_max_resolution() -> u32 {
        24
    }

    pub fn with_resolution(resolution: u32) -> Self {
        Self {
            resolution,
            ..Self::default()
        }
    }

    pub fn with_boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.boundary = boundary;
        self
    }

    pub fn with_storage(mut self, storage: StorageMode) -> Self {
        self.storage = storage;
        self
    }

    pub fn with_dense_max_resolution(mut self, bits: u32) -> Self {
        if bits > DENSE_LIMIT {
            log::warn!(
                "dense_max_resolution {} exceeds the dense limit; storage above {} bits stays sparse",
                bits,
                DENSE_LIMIT
            );
        }
        self.dense_max_resolution = bits;
        self
    }

    /// Storage layout this configuration resolves to.
    pub fn storage_kind(&self) -> Result<StorageKind> {
        self.storage
            .resolve(self.resolution, self.dense_max_resolution)
    }

    pub fn validate(&self) -> Result<()> {
        validate_resolution(self.resolution)?;
        self.storage_kind()?;
        Ok(())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let config: GridConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load configuration from TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: GridConfig = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration as TOML string (requires toml feature)
    #[cfg(feature = "toml")]
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            resolution: Self::default_resolution(),
            boundary: BoundaryPolicy::default(),
            storage: StorageMode::default(),
            dense_max_resolution: Self::default_dense_max_resolution(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::GridError;

    #[test]
    fn test_defaults() {
        let config = GridConfig::default();
        assert_eq!(config.resolution, 16);
        assert_eq!(config.boundary, BoundaryPolicy::Inclusive);
        assert_eq!(config.storage, StorageMode::Auto);
        assert_eq!(config.storage_kind().unwrap(), StorageKind::Dense);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_json_defaults_fill_missing_fields() {
        let config = GridConfig::from_json("{}").unwrap();
        assert_eq!(config, GridConfig::default());
    }

    #[test]
    fn test_json_round_trip() {
        let config = GridConfig::with_resolution(30)
            .with_boundary(BoundaryPolicy::Exclusive)
            .with_storage(StorageMode::Sparse);
        let json = config.to_json().unwrap();
        assert_eq!(GridConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_json_rejects_unknown_fields() {
        let err = GridConfig::from_json(r#"{"resolution": 8, "precision": 3}"#).unwrap_err();
        assert!(matches!(err, GridError::Config(_)));
    }

    #[test]
    fn test_json_rejects_invalid_values() {
        assert!(matches!(
            GridConfig::from_json(r#"{"resolution": 0}"#),
            Err(GridError::InvalidConfiguration(_))
        ));
        assert!(GridConfig::from_json(r#"{"resolution": 63}"#).is_err());
        assert!(GridConfig::from_json(r#"{"resolution": 40, "storage": "dense"}"#).is_err());
    }

    #[test]
    fn test_auto_storage_threshold() {
        let dense = GridConfig::with_resolution(24);
        let sparse = GridConfig::with_resolution(25);
        assert_eq!(dense.storage_kind().unwrap(), StorageKind::Dense);
        assert_eq!(sparse.storage_kind().unwrap(), StorageKind::Sparse);

        let raised = GridConfig::with_resolution(25).with_dense_max_resolution(26);
        assert_eq!(raised.storage_kind().unwrap(), StorageKind::Dense);
    }

    #[cfg(feature = "toml")]
    #[test]
    fn test_toml_round_trip() {
        let config = GridConfig::with_resolution(20).with_boundary(BoundaryPolicy::Exclusive);
        let toml_str = config.to_toml().unwrap();
        assert!(toml_str.contains("boundary = \"exclusive\""));
        assert_eq!(GridConfig::from_toml(&toml_str).unwrap(), config);
    }
}

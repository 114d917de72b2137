//! Grid builder for flexible configuration
//!
//! Collects a base region (explicit bounds or a base geohash) and the
//! [`GridConfig`] settings, then validates everything once in
//! [`GridBuilder::build`].

use crate::config::{BoundaryPolicy, GridConfig};
use crate::error::{GridError, Result};
use crate::grid::GeoGrid;
use crate::occupancy::StorageMode;
use geogrid_types::region::BoundingRegion;

#[derive(Debug, Clone)]
enum BaseRegion {
    Bounds(BoundingRegion),
    Geohash(String),
}

/// Builder for a [`GeoGrid`].
///
/// ```rust
/// use geogrid::{BoundaryPolicy, GridBuilder};
///
/// let grid = GridBuilder::new()
///     .geohash("9x")
///     .resolution(20)
///     .boundary(BoundaryPolicy::Exclusive)
///     .build()?;
/// assert_eq!(grid.resolution(), 20);
/// # Ok::<(), geogrid::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GridBuilder {
    base: Option<BaseRegion>,
    config: GridConfig,
}

impl GridBuilder {
    /// Create a builder with the default configuration and no region.
    pub fn new() -> Self {
        Self {
            base: None,
            config: GridConfig::default(),
        }
    }

    /// Cover an explicit region. Replaces any geohash set earlier.
    pub fn region(mut self, region: BoundingRegion) -> Self {
        self.base = Some(BaseRegion::Bounds(region));
        self
    }

    /// Cover the cell of a base geohash. Replaces any region set earlier.
    pub fn geohash(mut self, prefix: impl Into<String>) -> Self {
        self.base = Some(BaseRegion::Geohash(prefix.into()));
        self
    }

    /// Replace the whole configuration.
    pub fn config(mut self, config: GridConfig) -> Self {
        self.config = config;
        self
    }

    pub fn resolution(mut self, resolution: u32) -> Self {
        self.config.resolution = resolution;
        self
    }

    pub fn boundary(mut self, boundary: BoundaryPolicy) -> Self {
        self.config = self.config.with_boundary(boundary);
        self
    }

    pub fn storage(mut self, storage: StorageMode) -> Self {
        self.config = self.config.with_storage(storage);
        self
    }

    pub fn dense_max_resolution(mut self, bits: u32) -> Self {
        self.config = self.config.with_dense_max_resolution(bits);
        self
    }

    /// Build the grid.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] when no region was given or any
    /// setting fails validation.
    pub fn build(self) -> Result<GeoGrid> {
        match self.base {
            Some(BaseRegion::Bounds(region)) => GeoGrid::with_config(region, &self.config),
            Some(BaseRegion::Geohash(prefix)) => {
                GeoGrid::from_geohash_with_config(&prefix, &self.config)
            }
            None => Err(GridError::InvalidConfiguration(
                "grid needs a region or a base geohash".to_string(),
            )),
        }
    }

    /// Build a grid that can be shared between threads.
    #[cfg(feature = "sync")]
    pub fn build_sync(self) -> Result<crate::sync::SyncGeoGrid> {
        self.build().map(crate::sync::SyncGeoGrid::from)
    }
}

impl Default for GridBuilder {
    fn default() -> Self {
        Self::new()
    }
}

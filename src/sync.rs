//! Thread-safe wrapper for concurrent grid access.
//!
//! [`SyncGeoGrid`] wraps a [`GeoGrid`] in `Arc<RwLock<GeoGrid>>`. Inserts
//! take the write lock, queries share the read lock, and clones point at the
//! same grid.
//!
//! Enabled by the `sync` feature (on by default).
//!
//! # Examples
//!
//! ```rust
//! use geogrid::{Coordinate, QueryPolygon, SyncGeoGrid};
//! use std::thread;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let grid = SyncGeoGrid::from_geohash("9x", 20)?;
//!
//! let writer = grid.clone();
//! let handle = thread::spawn(move || {
//!     writer.insert(Coordinate::new(42.0, -110.0)).unwrap();
//! });
//! handle.join().unwrap();
//!
//! let square = QueryPolygon::new(vec![
//!     Coordinate::new(41.5, -110.5),
//!     Coordinate::new(42.5, -110.5),
//!     Coordinate::new(42.5, -109.5),
//!     Coordinate::new(41.5, -109.5),
//! ]);
//! assert_eq!(grid.intersect(&square).len(), 1);
//! # Ok(())
//! # }
//! ```

use crate::cell::CellCode;
use crate::config::GridConfig;
use crate::error::Result;
use crate::grid::{GeoGrid, GridStats};
use crate::query::QueryStats;
use geogrid_types::coordinate::Coordinate;
use geogrid_types::polygon::QueryPolygon;
use geogrid_types::region::BoundingRegion;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to a [`GeoGrid`] guarded by a read-write lock.
///
/// Many threads may query at once; an insert waits for readers to drain.
/// Region and resolution never change after construction and are readable
/// without locking.
#[derive(Clone)]
pub struct SyncGeoGrid {
    inner: Arc<RwLock<GeoGrid>>,
    region: BoundingRegion,
    resolution: u32,
}

impl SyncGeoGrid {
    pub fn new(region: BoundingRegion, resolution: u32) -> Result<Self> {
        GeoGrid::new(region, resolution).map(Self::from)
    }

    pub fn with_config(region: BoundingRegion, config: &GridConfig) -> Result<Self> {
        GeoGrid::with_config(region, config).map(Self::from)
    }

    pub fn from_geohash(prefix: &str, resolution: u32) -> Result<Self> {
        GeoGrid::from_geohash(prefix, resolution).map(Self::from)
    }

    pub fn region(&self) -> &BoundingRegion {
        &self.region
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    // ===== Writes =====

    /// Mark the cell holding `c`. See [`GeoGrid::insert`].
    pub fn insert(&self, c: Coordinate) -> Result<CellCode> {
        self.inner.write().insert(c)
    }

    /// Mark the cell holding a geohash's centre. See [`GeoGrid::insert_geohash`].
    pub fn insert_geohash(&self, hash: &str) -> Result<CellCode> {
        self.inner.write().insert_geohash(hash)
    }

    /// Insert a batch under a single write lock. Stops at the first
    /// out-of-range coordinate; earlier inserts are kept.
    pub fn insert_all<I>(&self, coordinates: I) -> Result<usize>
    where
        I: IntoIterator<Item = Coordinate>,
    {
        let mut grid = self.inner.write();
        let mut count = 0;
        for c in coordinates {
            grid.insert(c)?;
            count += 1;
        }
        Ok(count)
    }

    // ===== Queries =====

    pub fn intersect(&self, polygon: &QueryPolygon) -> Vec<CellCode> {
        self.inner.read().intersect(polygon)
    }

    pub fn try_intersect(&self, polygon: &QueryPolygon) -> Result<Vec<CellCode>> {
        self.inner.read().try_intersect(polygon)
    }

    pub fn intersect_with_stats(&self, polygon: &QueryPolygon) -> (Vec<CellCode>, QueryStats) {
        self.inner.read().intersect_with_stats(polygon)
    }

    pub fn intersects(&self, polygon: &QueryPolygon) -> bool {
        self.inner.read().intersects(polygon)
    }

    pub fn is_occupied(&self, code: CellCode) -> bool {
        self.inner.read().is_occupied(code)
    }

    /// Occupied codes at the time of the call, ascending.
    pub fn occupied_codes(&self) -> Vec<CellCode> {
        self.inner.read().occupied_codes().collect()
    }

    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    pub fn stats(&self) -> GridStats {
        self.inner.read().stats()
    }

    /// Cell extent; no locking needed.
    pub fn decode(&self, code: CellCode) -> BoundingRegion {
        crate::cell::decode(&self.region, self.resolution, code)
    }

    /// Clone of the current grid state.
    pub fn snapshot(&self) -> GeoGrid {
        self.inner.read().clone()
    }
}

impl From<GeoGrid> for SyncGeoGrid {
    fn from(grid: GeoGrid) -> Self {
        Self {
            region: *grid.region(),
            resolution: grid.resolution(),
            inner: Arc::new(RwLock::new(grid)),
        }
    }
}

impl std::fmt::Debug for SyncGeoGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SyncGeoGrid")
            .field("region", &self.region)
            .field("resolution", &self.resolution)
            .field("occupied", &self.len())
            .finish()
    }
}

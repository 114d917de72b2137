//! The geoavailability grid.
//!
//! A [`GeoGrid`] owns a base region, a fixed resolution and an occupancy
//! store. Inserting a coordinate marks the cell that holds it; queries (see
//! the `query` module) report which occupied cells overlap a polygon.

use crate::cell::{self, CellCode};
use crate::config::{BoundaryPolicy, GridConfig};
use crate::error::{GridError, Result};
use crate::occupancy::{OccupancyStore, OccupiedCodes, StorageKind};
use crate::validation::validate_region;
use geogrid_types::coordinate::Coordinate;
use geogrid_types::region::BoundingRegion;
use serde::Serialize;

/// Snapshot of a grid's occupancy.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GridStats {
    pub resolution: u32,
    pub storage: StorageKind,
    /// Addressable cells, `2^resolution`
    pub capacity: u64,
    /// Cells holding at least one coordinate
    pub occupied_cells: usize,
    /// Successful inserts, duplicates included
    pub insertions: u64,
    /// Fraction of inserts that landed in an already occupied cell.
    /// 0.0 for an empty grid.
    pub load_factor: f64,
    /// Cell extent in degrees of longitude
    pub cell_width: f64,
    /// Cell extent in degrees of latitude
    pub cell_height: f64,
}

/// Spatial availability index over a fixed region.
///
/// # Thread Safety
///
/// Inserts take `&mut self` and queries take `&self`, so the borrow checker
/// already enforces one writer or many readers. Use
/// [`SyncGeoGrid`](crate::SyncGeoGrid) to share a grid between threads.
///
/// # Examples
///
/// ```rust
/// use geogrid::{BoundingRegion, Coordinate, GeoGrid, QueryPolygon};
///
/// let region = BoundingRegion::new(40.0, 45.0, -115.0, -105.0);
/// let mut grid = GeoGrid::new(region, 10)?;
///
/// let code = grid.insert(Coordinate::new(44.919, -112.242))?;
///
/// let triangle = QueryPolygon::new(vec![
///     Coordinate::new(44.919, -112.242),
///     Coordinate::new(43.111, -105.414),
///     Coordinate::new(41.271, -111.421),
/// ]);
/// assert_eq!(grid.intersect(&triangle), vec![code]);
/// # Ok::<(), geogrid::GridError>(())
/// ```
#[derive(Debug, Clone)]
pub struct GeoGrid {
    region: BoundingRegion,
    resolution: u32,
    boundary: BoundaryPolicy,
    pub(crate) occupied: OccupancyStore,
    insertions: u64,
}

impl GeoGrid {
    /// Create a grid over `region` with `resolution` bisection steps and the
    /// default configuration otherwise.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] for a degenerate or out-of-range
    /// region, or a resolution outside `1..=MAX_RESOLUTION`.
    pub fn new(region: BoundingRegion, resolution: u32) -> Result<Self> {
        Self::with_config(region, &GridConfig::with_resolution(resolution))
    }

    /// Create a grid over `region` using a full configuration.
    pub fn with_config(region: BoundingRegion, config: &GridConfig) -> Result<Self> {
        validate_region(&region)?;
        config.validate()?;
        let kind = config.storage_kind()?;

        let grid = Self {
            region,
            resolution: config.resolution,
            boundary: config.boundary,
            occupied: OccupancyStore::new(kind, config.resolution),
            insertions: 0,
        };

        let (cell_width, cell_height) = grid.cell_size();
        log::debug!(
            "New grid over {:?}: resolution {}, {:?} storage, cells {} x {} degrees",
            region,
            config.resolution,
            kind,
            cell_width,
            cell_height
        );

        Ok(grid)
    }

    /// Create a grid covering the cell of a base geohash such as `"9x"`.
    ///
    /// ```rust
    /// use geogrid::GeoGrid;
    ///
    /// let grid = GeoGrid::from_geohash("9x", 30)?;
    /// assert!((grid.region().min_lon() + 112.5).abs() < 1e-9);
    /// assert!((grid.region().max_lat() - 45.0).abs() < 1e-9);
    /// # Ok::<(), geogrid::GridError>(())
    /// ```
    pub fn from_geohash(prefix: &str, resolution: u32) -> Result<Self> {
        Self::from_geohash_with_config(prefix, &GridConfig::with_resolution(resolution))
    }

    pub fn from_geohash_with_config(prefix: &str, config: &GridConfig) -> Result<Self> {
        Self::with_config(geohash_region(prefix)?, config)
    }

    pub fn region(&self) -> &BoundingRegion {
        &self.region
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    pub fn boundary_policy(&self) -> BoundaryPolicy {
        self.boundary
    }

    pub fn storage_kind(&self) -> StorageKind {
        self.occupied.kind()
    }

    /// Whether `c` lies inside the base region (edges included).
    pub fn contains(&self, c: &Coordinate) -> bool {
        c.is_finite() && self.region.contains(c)
    }

    /// Cell code holding `c`, without marking it.
    pub fn encode(&self, c: &Coordinate) -> Result<CellCode> {
        cell::encode(&self.region, self.resolution, c)
    }

    /// Geographic extent of a cell.
    pub fn decode(&self, code: CellCode) -> BoundingRegion {
        cell::decode(&self.region, self.resolution, code)
    }

    /// Extent of the ancestor of `code` formed by its first `bits` bits.
    pub fn prefix_region(&self, code: CellCode, bits: u32) -> BoundingRegion {
        cell::prefix_region(&self.region, self.resolution, code, bits)
    }

    /// Mark the cell holding `c` as occupied and return its code.
    ///
    /// # Errors
    ///
    /// [`GridError::OutOfRange`] if `c` is outside the base region. The grid
    /// is left unchanged.
    pub fn insert(&mut self, c: Coordinate) -> Result<CellCode> {
        let code = self.encode(&c)?;
        self.occupied.mark(code);
        self.insertions += 1;
        Ok(code)
    }

    /// Mark the cell holding the centre of a geohash.
    ///
    /// ```rust
    /// use geogrid::GeoGrid;
    ///
    /// let mut grid = GeoGrid::from_geohash("9x", 20)?;
    /// let code = grid.insert_geohash("9xj5smj4")?;
    /// assert!(grid.is_occupied(code));
    /// # Ok::<(), geogrid::GridError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidConfiguration`] for a malformed geohash and
    /// [`GridError::OutOfRange`] for one whose centre lies outside the base
    /// region. The grid is left unchanged in both cases.
    pub fn insert_geohash(&mut self, hash: &str) -> Result<CellCode> {
        self.insert(geohash_center(hash)?)
    }

    pub fn is_occupied(&self, code: CellCode) -> bool {
        self.occupied.is_occupied(code)
    }

    /// All occupied cells in ascending code order.
    pub fn occupied_codes(&self) -> OccupiedCodes<'_> {
        self.occupied.occupied_codes()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.occupied.len()
    }

    pub fn is_empty(&self) -> bool {
        self.occupied.is_empty()
    }

    /// Successful inserts, counting repeats into the same cell.
    pub fn insertions(&self) -> u64 {
        self.insertions
    }

    /// Columns and rows of the equivalent uniform grid.
    pub fn dimensions(&self) -> (u64, u64) {
        let cols = 1u64 << self.resolution.div_ceil(2);
        let rows = 1u64 << (self.resolution / 2);
        (cols, rows)
    }

    /// Cell extent as (degrees of longitude, degrees of latitude).
    pub fn cell_size(&self) -> (f64, f64) {
        let (cols, rows) = self.dimensions();
        (
            self.region.width() / cols as f64,
            self.region.height() / rows as f64,
        )
    }

    pub fn stats(&self) -> GridStats {
        let occupied_cells = self.occupied.len();
        let load_factor = if self.insertions > 0 {
            1.0 - occupied_cells as f64 / self.insertions as f64
        } else {
            0.0
        };
        let (cell_width, cell_height) = self.cell_size();

        GridStats {
            resolution: self.resolution,
            storage: self.occupied.kind(),
            capacity: self.occupied.capacity(),
            occupied_cells,
            insertions: self.insertions,
            load_factor,
            cell_width,
            cell_height,
        }
    }
}

fn geohash_region(prefix: &str) -> Result<BoundingRegion> {
    if prefix.is_empty() {
        return Err(GridError::InvalidConfiguration(
            "base geohash cannot be empty".to_string(),
        ));
    }
    let rect = geohash::decode_bbox(prefix).map_err(|e| {
        GridError::InvalidConfiguration(format!("invalid base geohash {:?}: {}", prefix, e))
    })?;
    Ok(BoundingRegion::from_rect(&rect))
}

fn geohash_center(hash: &str) -> Result<Coordinate> {
    if hash.is_empty() {
        return Err(GridError::InvalidConfiguration(
            "geohash cannot be empty".to_string(),
        ));
    }
    let (center, _, _) = geohash::decode(hash).map_err(|e| {
        GridError::InvalidConfiguration(format!("invalid geohash {:?}: {}", hash, e))
    })?;
    Ok(Coordinate::from(center))
}

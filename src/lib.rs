//! Spatial availability index: which cells of a fixed region hold data, and
//! which of those overlap a query polygon.
//!
//! ```rust
//! use geogrid::{BoundingRegion, Coordinate, GeoGrid, QueryPolygon};
//!
//! let mut grid = GeoGrid::new(BoundingRegion::new(40.0, 45.0, -115.0, -105.0), 10)?;
//! let code = grid.insert(Coordinate::new(44.919, -112.242))?;
//!
//! let triangle = QueryPolygon::new(vec![
//!     Coordinate::new(44.919, -112.242),
//!     Coordinate::new(43.111, -105.414),
//!     Coordinate::new(41.271, -111.421),
//! ]);
//! assert!(grid.intersect(&triangle).contains(&code));
//! # Ok::<(), geogrid::GridError>(())
//! ```

pub mod builder;
pub mod cell;
pub mod config;
pub mod error;
pub mod grid;
pub mod occupancy;
pub mod query;
pub mod validation;

#[cfg(feature = "sync")]
pub mod sync;

pub use builder::GridBuilder;
pub use cell::{CellCode, MAX_RESOLUTION};
pub use config::{BoundaryPolicy, GridConfig};
pub use error::{GridError, Result};
pub use grid::{GeoGrid, GridStats};
pub use occupancy::{OccupiedCodes, StorageKind, StorageMode};
pub use query::QueryStats;

#[cfg(feature = "sync")]
pub use sync::SyncGeoGrid;

pub use geogrid_types::coordinate::Coordinate;
pub use geogrid_types::polygon::QueryPolygon;
pub use geogrid_types::region::{Axis, BoundingRegion};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common imports
pub mod prelude {

    pub use crate::{GeoGrid, GridBuilder, GridError, Result};

    pub use crate::{BoundingRegion, CellCode, Coordinate, QueryPolygon};

    pub use crate::{BoundaryPolicy, GridConfig, StorageMode};

    #[cfg(feature = "sync")]
    pub use crate::SyncGeoGrid;
}

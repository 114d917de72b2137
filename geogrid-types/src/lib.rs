//! # geogrid-types
//!
//! Plain spatial value types shared by the geogrid availability index.
//!
//! - **Coordinates**: [`Coordinate`](coordinate::Coordinate)
//! - **Regions**: [`BoundingRegion`](region::BoundingRegion) and the bisection [`Axis`](region::Axis)
//! - **Query shapes**: [`QueryPolygon`](polygon::QueryPolygon)
//!
//! All types are serializable with Serde and convert to and from the `geo`
//! crate's primitives, with longitude on the x axis and latitude on the y axis.
//!
//! ## Examples
//!
//! ```rust
//! use geogrid_types::coordinate::Coordinate;
//! use geogrid_types::region::BoundingRegion;
//!
//! let region = BoundingRegion::new(40.0, 45.0, -115.0, -105.0);
//! let point = Coordinate::new(44.919, -112.242);
//! assert!(region.contains(&point));
//! ```

pub mod coordinate;
pub mod polygon;
pub mod region;

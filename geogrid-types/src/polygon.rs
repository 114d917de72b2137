use crate::coordinate::Coordinate;
use crate::region::BoundingRegion;
use geo::{LineString, Polygon};
use serde::{Deserialize, Serialize};

/// A simple polygon used as a query shape.
///
/// Vertices are kept in the caller's order and the ring is implicitly closed:
/// the last vertex connects back to the first, so callers should not repeat it.
///
/// # Examples
///
/// ```
/// use geogrid_types::coordinate::Coordinate;
/// use geogrid_types::polygon::QueryPolygon;
///
/// let triangle = QueryPolygon::new(vec![
///     Coordinate::new(44.919, -112.242),
///     Coordinate::new(43.111, -105.414),
///     Coordinate::new(41.271, -111.421),
/// ]);
/// assert_eq!(triangle.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryPolygon {
    vertices: Vec<Coordinate>,
}

impl QueryPolygon {
    pub fn new(vertices: Vec<Coordinate>) -> Self {
        Self { vertices }
    }

    /// The rectangle covered by `region`, as a four-vertex polygon.
    pub fn from_region(region: &BoundingRegion) -> Self {
        Self::new(region.corners().to_vec())
    }

    pub fn vertices(&self) -> &[Coordinate] {
        &self.vertices
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Axis-aligned bounding box of the vertices.
    pub fn bounding_region(&self) -> Option<BoundingRegion> {
        BoundingRegion::from_coordinates(&self.vertices)
    }

    /// Convert to a closed `geo` polygon without holes.
    pub fn to_geo(&self) -> Polygon<f64> {
        let ring: LineString<f64> = self.vertices.iter().map(Coordinate::to_coord).collect();
        Polygon::new(ring, Vec::new())
    }
}

impl FromIterator<Coordinate> for QueryPolygon {
    fn from_iter<I: IntoIterator<Item = Coordinate>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

use geo::{Coord, Point};
use serde::{Deserialize, Serialize};

/// An immutable geographic coordinate in decimal degrees.
///
/// Range checks live with the index that consumes the coordinate, so
/// constructing one never fails.
///
/// # Examples
///
/// ```
/// use geogrid_types::coordinate::Coordinate;
///
/// let bozeman = Coordinate::new(45.677, -111.043);
/// assert_eq!(bozeman.latitude(), 45.677);
/// assert_eq!(bozeman.longitude(), -111.043);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    latitude: f64,
    longitude: f64,
}

impl Coordinate {
    /// Create a coordinate from latitude and longitude.
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    pub const fn latitude(&self) -> f64 {
        self.latitude
    }

    pub const fn longitude(&self) -> f64 {
        self.longitude
    }

    /// Whether both components are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.latitude.is_finite() && self.longitude.is_finite()
    }

    /// Convert to a `geo` coordinate (x = longitude, y = latitude).
    pub fn to_coord(&self) -> Coord<f64> {
        Coord {
            x: self.longitude,
            y: self.latitude,
        }
    }
}

impl From<Coordinate> for Coord<f64> {
    fn from(c: Coordinate) -> Self {
        c.to_coord()
    }
}

impl From<Coordinate> for Point<f64> {
    fn from(c: Coordinate) -> Self {
        Point::new(c.longitude, c.latitude)
    }
}

impl From<Coord<f64>> for Coordinate {
    fn from(c: Coord<f64>) -> Self {
        Self::new(c.y, c.x)
    }
}

impl From<Point<f64>> for Coordinate {
    fn from(p: Point<f64>) -> Self {
        Self::new(p.y(), p.x())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_geo_axis_order() {
        let c = Coordinate::new(44.919, -112.242);
        let point: Point<f64> = c.into();
        assert_eq!(point.x(), -112.242);
        assert_eq!(point.y(), 44.919);

        let back = Coordinate::from(point);
        assert_eq!(back, c);
    }

    #[test]
    fn test_is_finite() {
        assert!(Coordinate::new(0.0, 0.0).is_finite());
        assert!(!Coordinate::new(f64::NAN, 0.0).is_finite());
        assert!(!Coordinate::new(0.0, f64::INFINITY).is_finite());
    }
}

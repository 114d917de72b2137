use crate::coordinate::Coordinate;
use geo::{Rect, coord};
use serde::{Deserialize, Serialize};

/// The axis split by a single bisection step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    Longitude,
    Latitude,
}

impl Axis {
    /// Axis split at bisection step `depth` (0-based). Longitude comes first
    /// and the two axes strictly alternate.
    #[inline]
    pub const fn at_depth(depth: u32) -> Self {
        if depth % 2 == 0 {
            Axis::Longitude
        } else {
            Axis::Latitude
        }
    }
}

/// A rectangular latitude/longitude extent.
///
/// Serves as a grid's overall domain and, transiently, as a query polygon's
/// axis-aligned bounding box. All containment and intersection tests treat
/// the rectangle as closed.
///
/// # Examples
///
/// ```
/// use geogrid_types::region::{Axis, BoundingRegion};
///
/// let region = BoundingRegion::new(40.0, 45.0, -115.0, -105.0);
/// let (west, east) = region.bisect(Axis::Longitude);
/// assert_eq!(west.max_lon(), -110.0);
/// assert_eq!(east.min_lon(), -110.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRegion {
    min_lat: f64,
    max_lat: f64,
    min_lon: f64,
    max_lon: f64,
}

impl BoundingRegion {
    /// Create a region from its latitude and longitude bounds.
    pub const fn new(min_lat: f64, max_lat: f64, min_lon: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            max_lat,
            min_lon,
            max_lon,
        }
    }

    /// The smallest region covering every coordinate, or `None` for an empty
    /// input.
    pub fn from_coordinates<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coordinate>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut region = Self::new(
            first.latitude(),
            first.latitude(),
            first.longitude(),
            first.longitude(),
        );
        for c in iter {
            region.min_lat = region.min_lat.min(c.latitude());
            region.max_lat = region.max_lat.max(c.latitude());
            region.min_lon = region.min_lon.min(c.longitude());
            region.max_lon = region.max_lon.max(c.longitude());
        }
        Some(region)
    }

    /// Build a region from a `geo::Rect` (x = longitude, y = latitude).
    pub fn from_rect(rect: &Rect<f64>) -> Self {
        Self::new(rect.min().y, rect.max().y, rect.min().x, rect.max().x)
    }

    pub const fn min_lat(&self) -> f64 {
        self.min_lat
    }

    pub const fn max_lat(&self) -> f64 {
        self.max_lat
    }

    pub const fn min_lon(&self) -> f64 {
        self.min_lon
    }

    pub const fn max_lon(&self) -> f64 {
        self.max_lon
    }

    /// Longitude span in degrees.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Latitude span in degrees.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    /// Corners in ring order: south-west, south-east, north-east, north-west.
    pub fn corners(&self) -> [Coordinate; 4] {
        [
            Coordinate::new(self.min_lat, self.min_lon),
            Coordinate::new(self.min_lat, self.max_lon),
            Coordinate::new(self.max_lat, self.max_lon),
            Coordinate::new(self.max_lat, self.min_lon),
        ]
    }

    /// Check if a coordinate lies inside or on the edge of this region.
    pub fn contains(&self, c: &Coordinate) -> bool {
        c.latitude() >= self.min_lat
            && c.latitude() <= self.max_lat
            && c.longitude() >= self.min_lon
            && c.longitude() <= self.max_lon
    }

    /// Check if `other` lies entirely inside this region.
    pub fn contains_region(&self, other: &BoundingRegion) -> bool {
        other.min_lat >= self.min_lat
            && other.max_lat <= self.max_lat
            && other.min_lon >= self.min_lon
            && other.max_lon <= self.max_lon
    }

    /// Check if two regions share at least one point. Touching edges count.
    pub fn intersects(&self, other: &BoundingRegion) -> bool {
        !(self.max_lon < other.min_lon
            || self.min_lon > other.max_lon
            || self.max_lat < other.min_lat
            || self.min_lat > other.max_lat)
    }

    /// One half of this region along `axis`.
    ///
    /// Every bisection in the index goes through this method so that encoding,
    /// decoding and the query descent produce bit-identical bounds.
    #[inline]
    pub fn half(&self, axis: Axis, upper: bool) -> Self {
        let mid = self.midpoint(axis);
        let mut out = *self;
        match axis {
            Axis::Longitude => {
                if upper {
                    out.min_lon = mid;
                } else {
                    out.max_lon = mid;
                }
            }
            Axis::Latitude => {
                if upper {
                    out.min_lat = mid;
                } else {
                    out.max_lat = mid;
                }
            }
        }
        out
    }

    /// Both halves along `axis`, lower first.
    pub fn bisect(&self, axis: Axis) -> (Self, Self) {
        (self.half(axis, false), self.half(axis, true))
    }

    /// Midpoint of the span along `axis`.
    #[inline]
    pub fn midpoint(&self, axis: Axis) -> f64 {
        match axis {
            Axis::Longitude => (self.min_lon + self.max_lon) / 2.0,
            Axis::Latitude => (self.min_lat + self.max_lat) / 2.0,
        }
    }

    pub fn to_rect(&self) -> Rect<f64> {
        Rect::new(
            coord! { x: self.min_lon, y: self.min_lat },
            coord! { x: self.max_lon, y: self.max_lat },
        )
    }
}

impl From<BoundingRegion> for Rect<f64> {
    fn from(r: BoundingRegion) -> Self {
        r.to_rect()
    }
}

//! Validation for coordinates, regions, resolutions and query polygons.

use crate::cell::MAX_RESOLUTION;
use crate::error::{GridError, Result};
use geogrid_types::coordinate::Coordinate;
use geogrid_types::polygon::QueryPolygon;
use geogrid_types::region::BoundingRegion;

/// Validates a coordinate has finite, in-range latitude and longitude.
///
/// Latitude: [-90.0, 90.0], Longitude: [-180.0, 180.0]
///
/// # Examples
///
/// ```
/// use geogrid::validation::validate_coordinate;
/// use geogrid::Coordinate;
///
/// assert!(validate_coordinate(&Coordinate::new(44.919, -112.242)).is_ok());
/// assert!(validate_coordinate(&Coordinate::new(95.0, 0.0)).is_err());
/// assert!(validate_coordinate(&Coordinate::new(0.0, f64::NAN)).is_err());
/// ```
pub fn validate_coordinate(c: &Coordinate) -> Result<()> {
    let (lat, lon) = (c.latitude(), c.longitude());
    let in_range = lat.is_finite()
        && lon.is_finite()
        && (-90.0..=90.0).contains(&lat)
        && (-180.0..=180.0).contains(&lon);

    if !in_range {
        return Err(GridError::OutOfRange {
            latitude: lat,
            longitude: lon,
        });
    }

    Ok(())
}

/// Validates a region can serve as a grid domain: finite, inside the
/// geographic range, and with min < max on both axes.
pub fn validate_region(region: &BoundingRegion) -> Result<()> {
    let bounds = [
        region.min_lat(),
        region.max_lat(),
        region.min_lon(),
        region.max_lon(),
    ];
    if bounds.iter().any(|v| !v.is_finite()) {
        return Err(GridError::InvalidConfiguration(format!(
            "region bounds must be finite, got {:?}",
            region
        )));
    }

    if region.min_lat() >= region.max_lat() {
        return Err(GridError::InvalidConfiguration(format!(
            "region latitude min {} must be below max {}",
            region.min_lat(),
            region.max_lat()
        )));
    }

    if region.min_lon() >= region.max_lon() {
        return Err(GridError::InvalidConfiguration(format!(
            "region longitude min {} must be below max {}",
            region.min_lon(),
            region.max_lon()
        )));
    }

    for corner in [
        Coordinate::new(region.min_lat(), region.min_lon()),
        Coordinate::new(region.max_lat(), region.max_lon()),
    ] {
        validate_coordinate(&corner).map_err(|_| {
            GridError::InvalidConfiguration(format!(
                "region {:?} exceeds the geographic range",
                region
            ))
        })?;
    }

    Ok(())
}

/// Validates a resolution lies in `1..=MAX_RESOLUTION`.
pub fn validate_resolution(resolution: u32) -> Result<()> {
    if resolution == 0 || resolution > MAX_RESOLUTION {
        return Err(GridError::InvalidConfiguration(format!(
            "resolution must be between 1 and {}, got {}",
            MAX_RESOLUTION, resolution
        )));
    }
    Ok(())
}

/// Validates a query polygon has at least three finite vertices.
///
/// # Examples
///
/// ```
/// use geogrid::validation::validate_polygon;
/// use geogrid::{Coordinate, QueryPolygon};
///
/// let segment = QueryPolygon::new(vec![
///     Coordinate::new(40.0, -110.0),
///     Coordinate::new(41.0, -111.0),
/// ]);
/// assert!(validate_polygon(&segment).is_err());
/// ```
pub fn validate_polygon(polygon: &QueryPolygon) -> Result<()> {
    if polygon.len() < 3 {
        return Err(GridError::InvalidPolygon(format!(
            "need at least 3 vertices, got {}",
            polygon.len()
        )));
    }

    if let Some((idx, _)) = polygon
        .vertices()
        .iter()
        .enumerate()
        .find(|(_, v)| !v.is_finite())
    {
        return Err(GridError::InvalidPolygon(format!(
            "vertex at index {} is not finite",
            idx
        )));
    }

    Ok(())
}

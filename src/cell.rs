//! Bit-packed cell codes over a bisected region.
//!
//! A cell code is the record of `resolution` bisection steps applied to a
//! base region. Step `i` splits longitude when `i` is even and latitude when
//! `i` is odd; a 1 bit keeps the upper half (east or north). The first step is
//! the most significant of the `resolution` bits, so an ancestor cell is a
//! numeric prefix of all its descendants and every subtree occupies one
//! contiguous range of codes.
//!
//! ```text
//! resolution = 4          bits: lon lat lon lat
//!
//!   lat ^  0101 0111 1101 1111
//!       |  0100 0110 1100 1110
//!       |  0001 0011 1001 1011
//!       |  0000 0010 1000 1010
//!       +----------------------> lon
//! ```
//!
//! The hierarchy is never materialised. Navigation is integer prefix
//! arithmetic, and [`encode`], [`decode`] and [`prefix_region`] are pure
//! functions of their arguments.

use crate::error::{GridError, Result};
use crate::validation::validate_resolution;
use geogrid_types::coordinate::Coordinate;
use geogrid_types::region::{Axis, BoundingRegion};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

/// Largest supported number of bisection steps.
///
/// Keeps `(prefix + 1) << shift` inside `u64` for every subtree range.
pub const MAX_RESOLUTION: u32 = 62;

/// Identifier of a cell at a grid's full resolution.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct CellCode(u64);

impl CellCode {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw code value.
    pub const fn value(self) -> u64 {
        self.0
    }

    /// Bit chosen at bisection step `depth` of a `resolution`-bit code.
    #[inline]
    pub fn bit(self, resolution: u32, depth: u32) -> bool {
        debug_assert!(depth < resolution, "depth {depth} beyond resolution {resolution}");
        (self.0 >> (resolution - 1 - depth)) & 1 == 1
    }

    /// The first `bits` bisection steps of a `resolution`-bit code.
    #[inline]
    pub fn prefix(self, resolution: u32, bits: u32) -> u64 {
        debug_assert!(bits <= resolution);
        self.0 >> (resolution - bits)
    }

    /// Interpreting `self` as a prefix, the lower or upper child one level down.
    pub fn child(self, upper: bool) -> Self {
        Self((self.0 << 1) | u64::from(upper))
    }

    /// Render the code as its `resolution` bits, first bisection step first.
    ///
    /// ```
    /// use geogrid::CellCode;
    ///
    /// assert_eq!(CellCode::new(0b0110).to_bit_string(4), "0110");
    /// assert_eq!(CellCode::new(1).to_bit_string(3), "001");
    /// ```
    pub fn to_bit_string(self, resolution: u32) -> String {
        (0..resolution)
            .map(|depth| if self.bit(resolution, depth) { '1' } else { '0' })
            .collect()
    }

    /// De-interleave into `(column, row)` indices of the equivalent uniform
    /// grid. Columns count eastward over `ceil(resolution / 2)` bits and rows
    /// count northward over `floor(resolution / 2)` bits.
    pub fn to_xy(self, resolution: u32) -> (u64, u64) {
        let (mut col, mut row) = (0u64, 0u64);
        for depth in 0..resolution {
            let bit = u64::from(self.bit(resolution, depth));
            match Axis::at_depth(depth) {
                Axis::Longitude => col = (col << 1) | bit,
                Axis::Latitude => row = (row << 1) | bit,
            }
        }
        (col, row)
    }

    /// Inverse of [`CellCode::to_xy`].
    pub fn from_xy(col: u64, row: u64, resolution: u32) -> Self {
        let col_bits = resolution.div_ceil(2);
        let row_bits = resolution / 2;
        let (mut ci, mut ri) = (col_bits, row_bits);
        let mut code = 0u64;
        for depth in 0..resolution {
            let bit = match Axis::at_depth(depth) {
                Axis::Longitude => {
                    ci -= 1;
                    (col >> ci) & 1
                }
                Axis::Latitude => {
                    ri -= 1;
                    (row >> ri) & 1
                }
            };
            code = (code << 1) | bit;
        }
        Self(code)
    }
}

impl fmt::Display for CellCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<CellCode> for u64 {
    fn from(code: CellCode) -> Self {
        code.0
    }
}

/// Encode a coordinate into the cell that holds it.
///
/// At each step the coordinate goes to the upper half when it lies on or
/// above the midpoint of the axis being split.
///
/// # Errors
///
/// [`GridError::OutOfRange`] when the coordinate is not finite or lies
/// outside `region`, and [`GridError::InvalidConfiguration`] for a
/// resolution outside `1..=MAX_RESOLUTION`.
///
/// # Examples
///
/// ```
/// use geogrid::cell::{decode, encode};
/// use geogrid::{BoundingRegion, Coordinate};
///
/// let region = BoundingRegion::new(40.0, 45.0, -115.0, -105.0);
/// let point = Coordinate::new(44.919, -112.242);
///
/// let code = encode(&region, 10, &point)?;
/// assert!(decode(&region, 10, code).contains(&point));
/// # Ok::<(), geogrid::GridError>(())
/// ```
pub fn encode(region: &BoundingRegion, resolution: u32, c: &Coordinate) -> Result<CellCode> {
    validate_resolution(resolution)?;

    if !c.is_finite() || !region.contains(c) {
        return Err(GridError::OutOfRange {
            latitude: c.latitude(),
            longitude: c.longitude(),
        });
    }

    let mut cell = *region;
    let mut code = 0u64;
    for depth in 0..resolution {
        let axis = Axis::at_depth(depth);
        let value = match axis {
            Axis::Longitude => c.longitude(),
            Axis::Latitude => c.latitude(),
        };
        let upper = value >= cell.midpoint(axis);
        code = (code << 1) | u64::from(upper);
        cell = cell.half(axis, upper);
    }

    Ok(CellCode(code))
}

/// Rectangle of the cell identified by a full `resolution`-bit code.
pub fn decode(region: &BoundingRegion, resolution: u32, code: CellCode) -> BoundingRegion {
    prefix_region(region, resolution, code, resolution)
}

/// Rectangle of the ancestor cell formed by the first `partial_bits`
/// bisection steps of a `resolution`-bit code.
///
/// `partial_bits == 0` yields `region` itself and `partial_bits == resolution`
/// is [`decode`].
pub fn prefix_region(
    region: &BoundingRegion,
    resolution: u32,
    code: CellCode,
    partial_bits: u32,
) -> BoundingRegion {
    debug_assert!(
        partial_bits <= resolution,
        "partial_bits {partial_bits} beyond resolution {resolution}"
    );

    let mut cell = *region;
    for depth in 0..partial_bits.min(resolution) {
        cell = cell.half(Axis::at_depth(depth), code.bit(resolution, depth));
    }
    cell
}

/// Full-resolution codes beneath the ancestor `prefix` at `depth`.
#[inline]
pub fn code_range(prefix: u64, depth: u32, resolution: u32) -> Range<u64> {
    debug_assert!(depth <= resolution && resolution <= MAX_RESOLUTION);
    let shift = resolution - depth;
    (prefix << shift)..((prefix + 1) << shift)
}

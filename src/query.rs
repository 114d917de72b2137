//! Polygon intersection queries.
//!
//! The query walks the implicit cell hierarchy top-down with an explicit
//! stack, carrying each node's rectangle as it goes:
//!
//! ```text
//! node rectangle R, code range [lo, hi)
//!   R disjoint from polygon bbox     -> prune
//!   no occupied code in [lo, hi)     -> prune
//!   depth == resolution              -> exact cell/polygon test
//!   R misses the polygon itself      -> prune
//!   R inside polygon                 -> every occupied code in [lo, hi) matches
//!   otherwise                        -> push both halves
//! ```
//!
//! Children are pushed upper-first so the lower half is explored first and
//! results come out in ascending code order. [`GeoGrid::intersect_exhaustive`]
//! applies the same cell test to every occupied cell and serves as the
//! reference the pruned walk must agree with.

use crate::cell::{CellCode, code_range};
use crate::config::BoundaryPolicy;
use crate::error::Result;
use crate::grid::GeoGrid;
use crate::validation::validate_polygon;
use geo::{Intersects, Polygon, Relate};
use geogrid_types::polygon::QueryPolygon;
use geogrid_types::region::{Axis, BoundingRegion};
use smallvec::{SmallVec, smallvec};
use std::ops::ControlFlow;

/// Above this many occupied cells a polygon whose bbox spans the whole grid
/// still goes through the pruned walk instead of a full scan.
const EXHAUSTIVE_SCAN_LIMIT: usize = 4096;

/// Inline capacity of the descent stack. The stack never holds more than
/// `resolution + 1` nodes.
const STACK_INLINE: usize = 64;

/// Counters describing how a query was answered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryStats {
    /// Hierarchy nodes popped from the descent stack
    pub nodes_visited: usize,
    /// Nodes skipped because they miss the polygon's bounding box
    pub pruned_disjoint: usize,
    /// Nodes skipped because no occupied cell lies beneath them
    pub pruned_empty: usize,
    /// Nodes inside the bounding box whose rectangle misses the polygon itself
    pub pruned_outside: usize,
    /// Nodes found fully inside the polygon and emitted without further tests
    pub contained_subtrees: usize,
    /// Exact cell/polygon tests performed
    pub leaf_tests: usize,
    /// Occupied cells reported
    pub matches: usize,
    /// Whether the query scanned every occupied cell instead of descending
    pub exhaustive: bool,
}

/// A query polygon prepared for repeated cell tests.
struct PreparedPolygon {
    shape: Polygon<f64>,
    bbox: BoundingRegion,
    policy: BoundaryPolicy,
}

impl PreparedPolygon {
    fn new(polygon: &QueryPolygon, bbox: BoundingRegion, policy: BoundaryPolicy) -> Self {
        Self {
            shape: polygon.to_geo(),
            bbox,
            policy,
        }
    }

    /// Whether a cell overlaps the polygon under the boundary policy.
    fn overlaps_cell(&self, cell: &BoundingRegion) -> bool {
        if !cell.intersects(&self.bbox) {
            return false;
        }
        let rect = cell.to_rect();
        match self.policy {
            BoundaryPolicy::Inclusive => self.shape.intersects(&rect),
            BoundaryPolicy::Exclusive => {
                let matrix = self.shape.relate(&rect);
                matrix.is_intersects() && !matrix.is_touches()
            }
        }
    }

    /// Whether a rectangle shares any point with the polygon. A node that
    /// fails this holds no matching cell under either policy.
    fn meets_cell(&self, cell: &BoundingRegion) -> bool {
        cell.intersects(&self.bbox) && self.shape.intersects(&cell.to_rect())
    }

    /// Whether a rectangle lies entirely inside the polygon (boundary
    /// contact allowed). Corners are checked first as a cheap reject.
    fn contains_cell(&self, cell: &BoundingRegion) -> bool {
        if !self.bbox.contains_region(cell) {
            return false;
        }
        let corners_inside = cell
            .corners()
            .iter()
            .all(|c| self.shape.intersects(&c.to_coord()));
        corners_inside && self.shape.relate(&cell.to_rect()).is_contains()
    }
}

#[derive(Debug, Clone, Copy)]
struct Node {
    region: BoundingRegion,
    prefix: CellCode,
    depth: u32,
}

impl GeoGrid {
    /// Occupied cells overlapping `polygon`, in ascending code order.
    ///
    /// A polygon with fewer than three vertices, a non-finite vertex, or a
    /// bounding box outside the grid yields an empty result. Use
    /// [`GeoGrid::try_intersect`] to tell a malformed polygon apart from one
    /// that matches nothing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use geogrid::{BoundingRegion, Coordinate, GeoGrid, QueryPolygon};
    ///
    /// let mut grid = GeoGrid::new(BoundingRegion::new(0.0, 8.0, 0.0, 8.0), 6)?;
    /// let inside = grid.insert(Coordinate::new(1.5, 1.5))?;
    /// grid.insert(Coordinate::new(6.5, 6.5))?;
    ///
    /// let square = QueryPolygon::new(vec![
    ///     Coordinate::new(1.2, 1.2),
    ///     Coordinate::new(1.2, 2.8),
    ///     Coordinate::new(2.8, 2.8),
    ///     Coordinate::new(2.8, 1.2),
    /// ]);
    /// assert_eq!(grid.intersect(&square), vec![inside]);
    /// # Ok::<(), geogrid::GridError>(())
    /// ```
    pub fn intersect(&self, polygon: &QueryPolygon) -> Vec<CellCode> {
        self.intersect_with_stats(polygon).0
    }

    /// Like [`GeoGrid::intersect`] but reports a malformed polygon as
    /// [`GridError::InvalidPolygon`](crate::GridError::InvalidPolygon).
    pub fn try_intersect(&self, polygon: &QueryPolygon) -> Result<Vec<CellCode>> {
        validate_polygon(polygon)?;
        Ok(self.intersect(polygon))
    }

    /// Query with execution counters.
    pub fn intersect_with_stats(&self, polygon: &QueryPolygon) -> (Vec<CellCode>, QueryStats) {
        let mut stats = QueryStats::default();
        let mut matches = Vec::new();

        if let Some(prepared) = self.prepare(polygon) {
            let _ = self.visit_matches(&prepared, &mut stats, |code| {
                matches.push(code);
                ControlFlow::Continue(())
            });
        }

        log::trace!("Polygon query with {} vertices: {:?}", polygon.len(), stats);
        (matches, stats)
    }

    /// Whether at least one occupied cell overlaps `polygon`. Stops at the
    /// first match.
    pub fn intersects(&self, polygon: &QueryPolygon) -> bool {
        let Some(prepared) = self.prepare(polygon) else {
            return false;
        };
        let mut stats = QueryStats::default();
        self.visit_matches(&prepared, &mut stats, |_| ControlFlow::Break(()))
            .is_break()
    }

    /// Reference query: tests every occupied cell against the polygon with
    /// no hierarchical pruning. Same result as [`GeoGrid::intersect`].
    pub fn intersect_exhaustive(&self, polygon: &QueryPolygon) -> Vec<CellCode> {
        let Some(prepared) = self.prepare(polygon) else {
            return Vec::new();
        };
        self.occupied_codes()
            .filter(|code| prepared.overlaps_cell(&self.decode(*code)))
            .collect()
    }

    fn prepare(&self, polygon: &QueryPolygon) -> Option<PreparedPolygon> {
        if let Err(err) = validate_polygon(polygon) {
            if polygon.vertices().iter().any(|v| !v.is_finite()) {
                log::warn!("Rejecting polygon query with non-finite coordinates");
            } else {
                log::debug!("Rejecting polygon query: {}", err);
            }
            return None;
        }
        let bbox = polygon.bounding_region()?;
        if !bbox.intersects(self.region()) {
            return None;
        }
        Some(PreparedPolygon::new(polygon, bbox, self.boundary_policy()))
    }

    /// Feed every matching occupied cell to `visit` in ascending order until
    /// it breaks.
    fn visit_matches<F>(
        &self,
        prepared: &PreparedPolygon,
        stats: &mut QueryStats,
        mut visit: F,
    ) -> ControlFlow<()>
    where
        F: FnMut(CellCode) -> ControlFlow<()>,
    {
        let store = &self.occupied;
        if store.is_empty() {
            return ControlFlow::Continue(());
        }

        let root = *self.region();
        if prepared.bbox.contains_region(&root) {
            if prepared.contains_cell(&root) {
                stats.contained_subtrees += 1;
                for code in store.occupied_codes() {
                    stats.matches += 1;
                    visit(code)?;
                }
                return ControlFlow::Continue(());
            }

            if store.len() <= EXHAUSTIVE_SCAN_LIMIT {
                stats.exhaustive = true;
                for code in store.occupied_codes() {
                    stats.leaf_tests += 1;
                    if prepared.overlaps_cell(&self.decode(code)) {
                        stats.matches += 1;
                        visit(code)?;
                    }
                }
                return ControlFlow::Continue(());
            }
        }

        let resolution = self.resolution();
        let mut stack: SmallVec<[Node; STACK_INLINE]> = smallvec![Node {
            region: root,
            prefix: CellCode::new(0),
            depth: 0,
        }];

        while let Some(node) = stack.pop() {
            stats.nodes_visited += 1;

            if !node.region.intersects(&prepared.bbox) {
                stats.pruned_disjoint += 1;
                continue;
            }

            let range = code_range(node.prefix.value(), node.depth, resolution);
            if !store.any_in(range.clone()) {
                stats.pruned_empty += 1;
                continue;
            }

            if node.depth == resolution {
                stats.leaf_tests += 1;
                if prepared.overlaps_cell(&node.region) {
                    stats.matches += 1;
                    visit(node.prefix)?;
                }
                continue;
            }

            if !prepared.meets_cell(&node.region) {
                stats.pruned_outside += 1;
                continue;
            }

            if prepared.contains_cell(&node.region) {
                stats.contained_subtrees += 1;
                for code in store.occupied_in(range) {
                    stats.matches += 1;
                    visit(code)?;
                }
                continue;
            }

            let (lower, upper) = node.region.bisect(Axis::at_depth(node.depth));
            let depth = node.depth + 1;
            stack.push(Node {
                region: upper,
                prefix: node.prefix.child(true),
                depth,
            });
            stack.push(Node {
                region: lower,
                prefix: node.prefix.child(false),
                depth,
            });
        }

        ControlFlow::Continue(())
    }
}

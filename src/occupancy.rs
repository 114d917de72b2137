//! Occupancy store: which cell codes have received at least one coordinate.
//!
//! Two layouts sit behind one type. Small resolutions use a dense bit array
//! with one bit per possible cell; larger ones fall back to a sparse ordered
//! set holding only the occupied codes. Both iterate in ascending code order
//! and answer range queries, which the polygon descent uses to skip empty
//! subtrees.

use crate::cell::CellCode;
use crate::error::{GridError, Result};
use bitvec::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::collections::btree_set;
use std::ops::Range;

/// Largest resolution a dense store may be built for (512 MiB of bits).
pub const DENSE_LIMIT: u32 = 32;

/// How the occupancy store should be laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum StorageMode {
    /// Dense up to the configured resolution threshold, sparse above it.
    #[default]
    Auto,
    /// Always a bit array of `2^resolution` bits.
    Dense,
    /// Always an ordered set of occupied codes.
    Sparse,
}

/// The layout a store actually uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StorageKind {
    Dense,
    Sparse,
}

impl StorageMode {
    /// Resolve the mode for a resolution.
    pub fn resolve(self, resolution: u32, dense_max_resolution: u32) -> Result<StorageKind> {
        match self {
            StorageMode::Auto if resolution <= dense_max_resolution.min(DENSE_LIMIT) => {
                Ok(StorageKind::Dense)
            }
            StorageMode::Auto | StorageMode::Sparse => Ok(StorageKind::Sparse),
            StorageMode::Dense if resolution <= DENSE_LIMIT => Ok(StorageKind::Dense),
            StorageMode::Dense => Err(GridError::InvalidConfiguration(format!(
                "dense storage supports at most {} bits of resolution, got {}",
                DENSE_LIMIT, resolution
            ))),
        }
    }
}

#[derive(Debug, Clone)]
enum Repr {
    Dense(BitVec),
    Sparse(BTreeSet<u64>),
}

/// Set of occupied cell codes for a single grid.
#[derive(Debug, Clone)]
pub struct OccupancyStore {
    repr: Repr,
    len: usize,
    capacity: u64,
}

impl OccupancyStore {
    /// Create an empty store for codes of `resolution` bits.
    pub fn new(kind: StorageKind, resolution: u32) -> Self {
        let capacity = 1u64 << resolution;
        let repr = match kind {
            StorageKind::Dense => Repr::Dense(BitVec::repeat(false, capacity as usize)),
            StorageKind::Sparse => Repr::Sparse(BTreeSet::new()),
        };
        Self {
            repr,
            len: 0,
            capacity,
        }
    }

    pub fn kind(&self) -> StorageKind {
        match self.repr {
            Repr::Dense(_) => StorageKind::Dense,
            Repr::Sparse(_) => StorageKind::Sparse,
        }
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of addressable cells (`2^resolution`).
    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    /// Mark a cell occupied. Returns `true` if it was not occupied before.
    pub fn mark(&mut self, code: CellCode) -> bool {
        let raw = code.value();
        debug_assert!(raw < self.capacity, "code {raw} beyond capacity");

        let inserted = match &mut self.repr {
            Repr::Dense(bits) => !bits.replace(raw as usize, true),
            Repr::Sparse(set) => set.insert(raw),
        };
        if inserted {
            self.len += 1;
        }
        inserted
    }

    pub fn is_occupied(&self, code: CellCode) -> bool {
        let raw = code.value();
        if raw >= self.capacity {
            return false;
        }
        match &self.repr {
            Repr::Dense(bits) => bits[raw as usize],
            Repr::Sparse(set) => set.contains(&raw),
        }
    }

    /// All occupied codes in ascending order.
    ///
    /// The iterator borrows the store, so a fresh call always restarts from
    /// the smallest code. It can also be cloned mid-way.
    pub fn occupied_codes(&self) -> OccupiedCodes<'_> {
        self.occupied_in(0..self.capacity)
    }

    /// Occupied codes within `range`, ascending.
    pub fn occupied_in(&self, range: Range<u64>) -> OccupiedCodes<'_> {
        let start = range.start.min(self.capacity);
        let end = range.end.min(self.capacity).max(start);
        let inner = match &self.repr {
            Repr::Dense(bits) => Inner::Dense {
                bits: &bits[start as usize..end as usize],
                offset: start,
                pos: 0,
            },
            Repr::Sparse(set) => Inner::Sparse(set.range(start..end)),
        };
        OccupiedCodes { inner }
    }

    /// Whether any code within `range` is occupied.
    pub fn any_in(&self, range: Range<u64>) -> bool {
        let start = range.start.min(self.capacity);
        let end = range.end.min(self.capacity);
        if start >= end {
            return false;
        }
        match &self.repr {
            Repr::Dense(bits) => bits[start as usize..end as usize].any(),
            Repr::Sparse(set) => set.range(start..end).next().is_some(),
        }
    }
}

/// Lazy ascending iterator over occupied codes.
#[derive(Debug, Clone)]
pub struct OccupiedCodes<'a> {
    inner: Inner<'a>,
}

#[derive(Debug, Clone)]
enum Inner<'a> {
    Dense {
        bits: &'a BitSlice,
        offset: u64,
        pos: usize,
    },
    Sparse(btree_set::Range<'a, u64>),
}

impl Iterator for OccupiedCodes<'_> {
    type Item = CellCode;

    fn next(&mut self) -> Option<CellCode> {
        match &mut self.inner {
            Inner::Dense { bits, offset, pos } => {
                let rel = bits.get(*pos..)?.first_one()?;
                let idx = *pos + rel;
                *pos = idx + 1;
                Some(CellCode::new(*offset + idx as u64))
            }
            Inner::Sparse(range) => range.next().map(|raw| CellCode::new(*raw)),
        }
    }
}

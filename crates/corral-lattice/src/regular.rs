//! Dense regular grid with the axis-aligned nearest-neighbor stencil.

use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::stencil;
use corral_core::{
    checked_volume, coord_to_lin, lin_to_coord, CellIndex, NeighborSet, Periodicity,
};
use std::ops::{Index, IndexMut};

/// A dense `D`-dimensional grid storing one `T` per cell.
///
/// Cells are addressed by a linear [`CellIndex`] bijective with
/// per-axis coordinates: row-major, innermost (last) axis varying
/// fastest. The axis-aligned nearest-neighbor stencil is built in,
/// with `2 * D` slots ordered `(+axis0, -axis0, +axis1, -axis1, ...)`;
/// see [`PlanarNextNearest`](crate::PlanarNextNearest) for the
/// 8-connected planar variant over the same storage.
///
/// Boundary handling is per-axis: a periodic axis wraps its neighbors
/// modulo the axis length, a bounded axis yields `None` slots at its
/// two ends.
#[derive(Clone, Debug)]
pub struct RegularGrid<T, const D: usize> {
    data: Vec<T>,
    size: [CellIndex; D],
    spacing: f64,
    periodic: Periodicity,
}

impl<T, const D: usize> RegularGrid<T, D> {
    /// Largest per-axis cell count: neighbor offsets use signed
    /// arithmetic, so each axis must fit in `i64`.
    pub const MAX_AXIS: u64 = i64::MAX as u64;

    /// Create a grid of `size[0] * size[1] * ...` default-initialized
    /// cells with the given physical spacing per cell.
    ///
    /// Fails with [`LatticeError::UnsupportedDimensionality`] unless
    /// `D` is 2 or 3, with [`LatticeError::InvalidConfiguration`] for
    /// a non-positive or non-finite spacing or a zero cell count on
    /// any axis, and with [`LatticeError::GridTooLarge`] when the
    /// total cell count overflows the index width.
    pub fn new(
        spacing: f64,
        size: [CellIndex; D],
        periodic: Periodicity,
    ) -> Result<Self, LatticeError>
    where
        T: Clone + Default,
    {
        if !(2..=3).contains(&D) {
            return Err(LatticeError::UnsupportedDimensionality {
                requested: D,
                supported: "2 or 3",
            });
        }
        if !spacing.is_finite() || spacing <= 0.0 {
            return Err(LatticeError::InvalidConfiguration {
                param: "spacing",
                reason: format!("must be positive and finite, got {spacing}"),
            });
        }
        for (j, &s) in size.iter().enumerate() {
            if s == 0 {
                return Err(LatticeError::InvalidConfiguration {
                    param: "size",
                    reason: format!("axis {j} has zero cells"),
                });
            }
            if s > Self::MAX_AXIS {
                return Err(LatticeError::GridTooLarge {
                    cells: s as u128,
                    max: Self::MAX_AXIS,
                });
            }
        }
        let total = checked_volume(&size).ok_or_else(|| LatticeError::GridTooLarge {
            cells: size.iter().map(|&s| s as u128).product(),
            max: u64::MAX,
        })?;
        let len = usize::try_from(total).map_err(|_| LatticeError::GridTooLarge {
            cells: total as u128,
            max: usize::MAX as u64,
        })?;
        Ok(Self {
            data: vec![T::default(); len],
            size,
            spacing,
            periodic,
        })
    }

    /// Physical length per cell.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Cell counts per axis.
    pub fn axis_sizes(&self) -> [CellIndex; D] {
        self.size
    }

    /// Per-axis periodicity mask.
    pub fn periodicity(&self) -> Periodicity {
        self.periodic
    }

    /// Linearize a per-axis coordinate (innermost axis fastest).
    pub fn coord_to_lin(&self, coord: [CellIndex; D]) -> CellIndex {
        coord_to_lin(coord, self.size)
    }

    /// Recover the per-axis coordinate of a linear index.
    pub fn lin_to_coord(&self, i: CellIndex) -> [CellIndex; D] {
        lin_to_coord(i, self.size)
    }

    /// Borrow cell `i`, or `None` out of range.
    pub fn get(&self, i: CellIndex) -> Option<&T> {
        self.data.get(usize::try_from(i).ok()?)
    }

    /// Mutably borrow cell `i`, or `None` out of range.
    pub fn get_mut(&mut self, i: CellIndex) -> Option<&mut T> {
        self.data.get_mut(usize::try_from(i).ok()?)
    }

    /// Borrow all cell contents in linear index order.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    /// Mutably borrow all cell contents in linear index order.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }
}

impl<T, const D: usize> Lattice for RegularGrid<T, D> {
    type Value = T;

    fn size(&self) -> CellIndex {
        self.data.len() as CellIndex
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.data.iter())
    }

    fn element_size(&self, _i: CellIndex) -> f64 {
        self.spacing
    }

    fn element_neighbors(&self, i: CellIndex) -> NeighborSet {
        debug_assert!((i as usize) < self.data.len(), "cell {i} out of range");
        stencil::axis_neighbors(i, self.size, self.periodic)
    }

    fn n_neighbors(&self) -> usize {
        2 * D
    }
}

impl<T, const D: usize> Index<CellIndex> for RegularGrid<T, D> {
    type Output = T;

    fn index(&self, i: CellIndex) -> &T {
        &self.data[i as usize]
    }
}

impl<T, const D: usize> IndexMut<CellIndex> for RegularGrid<T, D> {
    fn index_mut(&mut self, i: CellIndex) -> &mut T {
        &mut self.data[i as usize]
    }
}

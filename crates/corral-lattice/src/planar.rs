//! 8-connected planar next-nearest stencil over regular grid storage.

use crate::error::LatticeError;
use crate::lattice::Lattice;
use crate::regular::RegularGrid;
use crate::stencil;
use corral_core::{CellIndex, NeighborSet, Periodicity};
use std::ops::{Index, IndexMut};

/// A two-dimensional grid whose stencil covers all 8 surrounding cells
/// (cardinal plus diagonal), layered over [`RegularGrid`] storage.
///
/// Slots follow the fixed offset order
/// `(-1,-1), (-1,0), (-1,1), (0,-1), (0,1), (1,-1), (1,0), (1,1)`,
/// with each axis wrapping or nulling independently: axis 0 is gated
/// by periodicity bit 0 and axis 1 by bit 1.
///
/// This topology is dimension-specialized: construction with any
/// `D != 2` fails with [`LatticeError::UnsupportedDimensionality`]
/// rather than guessing a 3D extension.
#[derive(Clone, Debug)]
pub struct PlanarNextNearest<T, const D: usize = 2> {
    grid: RegularGrid<T, D>,
}

impl<T, const D: usize> PlanarNextNearest<T, D> {
    /// Create a planar grid with the same validation rules as
    /// [`RegularGrid::new`], plus the `D == 2` restriction checked
    /// before any storage is built.
    pub fn new(
        spacing: f64,
        size: [CellIndex; D],
        periodic: Periodicity,
    ) -> Result<Self, LatticeError>
    where
        T: Clone + Default,
    {
        if D != 2 {
            return Err(LatticeError::UnsupportedDimensionality {
                requested: D,
                supported: "2",
            });
        }
        Ok(Self {
            grid: RegularGrid::new(spacing, size, periodic)?,
        })
    }

    /// Borrow the underlying regular grid (storage, bijection,
    /// element access).
    pub fn grid(&self) -> &RegularGrid<T, D> {
        &self.grid
    }

    /// Mutably borrow the underlying regular grid.
    pub fn grid_mut(&mut self) -> &mut RegularGrid<T, D> {
        &mut self.grid
    }
}

impl<T, const D: usize> Lattice for PlanarNextNearest<T, D> {
    type Value = T;

    fn size(&self) -> CellIndex {
        Lattice::size(&self.grid)
    }

    fn iter(&self) -> Box<dyn Iterator<Item = &T> + '_> {
        Box::new(self.grid.as_slice().iter())
    }

    fn element_size(&self, _i: CellIndex) -> f64 {
        self.grid.spacing()
    }

    fn element_neighbors(&self, i: CellIndex) -> NeighborSet {
        debug_assert!(i < Lattice::size(&self.grid), "cell {i} out of range");
        stencil::planar_neighbors(i, self.grid.axis_sizes(), self.grid.periodicity())
    }

    fn n_neighbors(&self) -> usize {
        8
    }
}

impl<T, const D: usize> Index<CellIndex> for PlanarNextNearest<T, D> {
    type Output = T;

    fn index(&self, i: CellIndex) -> &T {
        &self.grid[i]
    }
}

impl<T, const D: usize> IndexMut<CellIndex> for PlanarNextNearest<T, D> {
    fn index_mut(&mut self, i: CellIndex) -> &mut T {
        &mut self.grid[i]
    }
}

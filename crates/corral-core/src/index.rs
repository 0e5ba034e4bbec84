//! Mixed-radix conversion between per-axis coordinates and linear cell indices.

use smallvec::SmallVec;

/// Linear address of a cell in a dense row-major array.
pub type CellIndex = u64;

/// Transient neighbor list: one slot per stencil direction, `None`
/// where a bounded axis has no neighbor.
///
/// The inline capacity of 8 covers every topology in the workspace
/// (axis-aligned up to 3D needs 6 slots, the planar stencil needs 8)
/// without heap allocation.
pub type NeighborSet = SmallVec<[Option<CellIndex>; 8]>;

/// Linearize a per-axis coordinate against per-axis cell counts.
///
/// Row-major with the innermost (last) axis varying fastest:
/// `lin = (((c[0]) * size[1] + c[1]) * size[2] + c[2]) ...`.
/// Exact inverse of [`lin_to_coord`].
pub fn coord_to_lin<const D: usize>(coord: [CellIndex; D], size: [CellIndex; D]) -> CellIndex {
    let mut lin = 0;
    for j in 0..D {
        debug_assert!(coord[j] < size[j], "coordinate {coord:?} outside {size:?}");
        lin = coord[j] + lin * size[j];
    }
    lin
}

/// Recover the per-axis coordinate of a linear index, extracting axes
/// from fastest (last) to slowest (first).
pub fn lin_to_coord<const D: usize>(mut lin: CellIndex, size: [CellIndex; D]) -> [CellIndex; D] {
    let mut coord = [0; D];
    for j in (0..D).rev() {
        coord[j] = lin % size[j];
        lin /= size[j];
    }
    coord
}

/// Overflow-checked product of per-axis cell counts.
///
/// Returns `None` when the total cell count does not fit the index
/// width, so callers can reject oversized grids before allocating.
pub fn checked_volume(size: &[CellIndex]) -> Option<CellIndex> {
    size.iter().try_fold(1u64, |acc, &s| acc.checked_mul(s))
}

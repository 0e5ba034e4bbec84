//! Lattice contract assertion helpers.
//!
//! Shared by the backend test modules (RegularGrid, PlanarNextNearest)
//! to verify the invariants the [`Lattice`] trait promises: fixed
//! neighbor counts, in-range entries, symmetric stencils, and the
//! coordinate bijection.

use crate::lattice::Lattice;
use corral_core::CellIndex;
use indexmap::IndexSet;

/// Mirror slot for the axis-aligned stencil: `+axis j` (slot `2j`)
/// pairs with `-axis j` (slot `2j + 1`).
pub fn axis_mirror(slot: usize) -> usize {
    slot ^ 1
}

/// Mirror slot for the planar 8-connected stencil: the offset list is
/// ordered so slot `k` and slot `7 - k` are opposite offsets.
pub fn planar_mirror(slot: usize) -> usize {
    7 - slot
}

/// Assert that every cell reports exactly `n_neighbors()` slots.
pub fn assert_neighbor_counts<L: Lattice>(lat: &L) {
    for i in 0..lat.size() {
        assert_eq!(
            lat.element_neighbors(i).len(),
            lat.n_neighbors(),
            "cell {i} has the wrong slot count"
        );
    }
}

/// Assert that every non-null entry indexes a valid cell.
pub fn assert_neighbors_in_range<L: Lattice>(lat: &L) {
    for i in 0..lat.size() {
        for (slot, nb) in lat.element_neighbors(i).iter().enumerate() {
            if let Some(nb) = nb {
                assert!(*nb < lat.size(), "cell {i} slot {slot} points past the end");
            }
        }
    }
}

/// Assert stencil symmetry: if slot `s` of cell `a` is `b`, then the
/// mirror slot of cell `b` is `a`.
pub fn assert_neighbor_symmetry<L: Lattice>(lat: &L, mirror: impl Fn(usize) -> usize) {
    for i in 0..lat.size() {
        for (slot, nb) in lat.element_neighbors(i).iter().enumerate() {
            if let Some(nb) = nb {
                let back = lat.element_neighbors(*nb);
                assert_eq!(
                    back[mirror(slot)],
                    Some(i),
                    "no return edge: cell {i} slot {slot} -> cell {nb}"
                );
            }
        }
    }
}

/// Assert that iteration visits exactly `size()` cells.
pub fn assert_iteration_covers_all_cells<L: Lattice>(lat: &L) {
    assert_eq!(lat.iter().count() as CellIndex, lat.size());
}

/// Assert the coordinate bijection: converting every linear index to
/// a coordinate and back is the identity, and no two indices share a
/// coordinate.
pub fn assert_coordinate_bijection<const D: usize>(
    total: CellIndex,
    to_coord: impl Fn(CellIndex) -> [CellIndex; D],
    to_lin: impl Fn([CellIndex; D]) -> CellIndex,
) {
    let mut seen = IndexSet::new();
    for i in 0..total {
        let coord = to_coord(i);
        assert_eq!(to_lin(coord), i, "round trip broke at index {i}");
        assert!(seen.insert(coord), "coordinate {coord:?} appears twice");
    }
    assert_eq!(seen.len() as CellIndex, total);
}

/// Run the full stencil compliance suite with the given mirror map.
pub fn run_lattice_compliance<L: Lattice>(lat: &L, mirror: impl Fn(usize) -> usize) {
    assert_neighbor_counts(lat);
    assert_neighbors_in_range(lat);
    assert_neighbor_symmetry(lat, mirror);
    assert_iteration_covers_all_cells(lat);
}

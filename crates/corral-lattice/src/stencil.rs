//! Shared stencil helpers: per-axis offsets with wrap-or-null boundaries.

use corral_core::{coord_to_lin, lin_to_coord, resolve_axis, CellIndex, NeighborSet, Periodicity};

/// All 8 planar offsets in their fixed enumeration order.
pub const OFFSETS_8: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// Axis-aligned nearest neighbors of cell `i` on a dense `D`-dimensional
/// grid.
///
/// Slot order is `(+axis0, -axis0, +axis1, -axis1, ...)`. Each axis
/// wraps or nulls independently according to `periodic`.
pub fn axis_neighbors<const D: usize>(
    i: CellIndex,
    size: [CellIndex; D],
    periodic: Periodicity,
) -> NeighborSet {
    let coord = lin_to_coord(i, size);
    let mut out = NeighborSet::new();
    for j in 0..D {
        let wrap = periodic.is_periodic(j);
        for step in [1i64, -1i64] {
            let entry = resolve_axis(coord[j] as i64 + step, size[j], wrap).map(|resolved| {
                let mut target = coord;
                target[j] = resolved;
                coord_to_lin(target, size)
            });
            out.push(entry);
        }
    }
    out
}

/// Planar next-nearest (8-connected) neighbors of cell `i`.
///
/// Offsets are enumerated in [`OFFSETS_8`] order over the first two
/// axes; axis 0 is gated by periodicity bit 0 and axis 1 by bit 1,
/// each resolved independently. A slot is `None` as soon as either
/// axis falls outside a bounded range.
///
/// Only meaningful for `D == 2`; constructors of the planar backend
/// enforce that before storage exists.
pub fn planar_neighbors<const D: usize>(
    i: CellIndex,
    size: [CellIndex; D],
    periodic: Periodicity,
) -> NeighborSet {
    let coord = lin_to_coord(i, size);
    let mut out = NeighborSet::new();
    for (dx, dy) in OFFSETS_8 {
        let x = resolve_axis(coord[0] as i64 + dx, size[0], periodic.is_periodic(0));
        let y = resolve_axis(coord[1] as i64 + dy, size[1], periodic.is_periodic(1));
        let entry = match (x, y) {
            (Some(x), Some(y)) => {
                let mut target = coord;
                target[0] = x;
                target[1] = y;
                Some(coord_to_lin(target, size))
            }
            _ => None,
        };
        out.push(entry);
    }
    out
}

//! The core `Lattice` trait.

use corral_core::{CellIndex, NeighborSet};

/// Capability contract for a discretized field domain.
///
/// Field-based physics kernels program against this trait: they walk
/// the cells with [`iter`](Self::iter), and exchange fluxes with the
/// cells reported by [`element_neighbors`](Self::element_neighbors).
/// Concrete backends ([`RegularGrid`](crate::RegularGrid),
/// [`PlanarNextNearest`](crate::PlanarNextNearest)) define the storage
/// layout and the stencil.
///
/// # Object safety
///
/// The trait is designed for use as `dyn Lattice<Value = T>`, so a
/// kernel can be written once against any backend.
///
/// # Concurrency
///
/// Implementations are single-threaded, synchronous data structures
/// with no internal locking. The consuming kernel owns exclusive
/// mutation rights for the duration of one simulation step; callers
/// must not overlap iteration with structural mutation.
pub trait Lattice {
    /// Per-cell element type.
    type Value;

    /// Total number of cells.
    fn size(&self) -> CellIndex;

    /// Forward, single-pass iteration over cell contents in linear
    /// index order. Restartable: each call yields a fresh iterator.
    fn iter(&self) -> Box<dyn Iterator<Item = &Self::Value> + '_>;

    /// Physical length attributable to cell `i` (uniform for a
    /// regular grid).
    fn element_size(&self, i: CellIndex) -> f64;

    /// Neighbor set of cell `i`, in the topology's fixed slot order.
    ///
    /// A slot is `None` where a bounded (non-periodic) axis has no
    /// neighbor in that direction. The list is transient: it is
    /// recomputed on every call and only valid until the next query,
    /// and its entries index into the lattice's own storage.
    fn element_neighbors(&self, i: CellIndex) -> NeighborSet;

    /// Fixed neighbor-slot count for this topology.
    fn n_neighbors(&self) -> usize;

    /// Exchange boundary-adjacent cell contents with topological
    /// neighbors.
    ///
    /// A no-op in the single-process configuration. Reserved as the
    /// extension point for a parallel communication layer; the core
    /// never performs inter-process communication itself.
    fn halo_communication(&mut self) {}
}

//! Corral: spatial organization for particle simulations.
//!
//! This is the top-level facade crate that re-exports the public API
//! from the corral sub-crates. It covers the two halves of the same
//! problem, mapping continuous coordinates onto a discrete cell
//! topology with per-axis periodic boundaries:
//!
//! - a **field lattice** ([`lattice`]) for grid-based methods: dense
//!   storage with compile-time dimensionality, constant-time neighbor
//!   stencils, and a capability trait kernels program against;
//! - a **domain decomposition** ([`decomp`]) for particle methods: a
//!   bulk-parallel engine that bins particles into cells and exposes
//!   per-cell contiguous ranges for short-range force evaluation.
//!
//! # Quick start
//!
//! ```rust
//! use corral::prelude::*;
//!
//! // A 3x3x3 fully periodic field lattice, one f64 per cell.
//! let mut grid: RegularGrid<f64, 3> =
//!     RegularGrid::new(1.0, [3, 3, 3], Periodicity::ALL).unwrap();
//! grid[0] = 1.0;
//! assert_eq!(grid.size(), 27);
//! assert_eq!(grid.n_neighbors(), 6);
//!
//! // Bin four particles into cells of edge >= 1.0.
//! let mut dd = DomainDecomposition::new(Periodicity::ALL);
//! dd.set_box(Vector3f::new([4.0, 4.0, 4.0])).unwrap();
//! dd.set_cutoff(1.0).unwrap();
//! dd.set_n_part(4).unwrap();
//! let xyz = vec![
//!     Vector3f::new([0.5, 0.5, 0.5]),
//!     Vector3f::new([3.5, 3.5, 3.5]),
//!     Vector3f::new([0.6, 0.5, 0.5]),
//!     Vector3f::new([2.0, 1.0, 0.0]),
//! ];
//! dd.build(&xyz).unwrap();
//! let binned: u32 = dd.cells().iter().map(|r| r.len()).sum();
//! assert_eq!(binned, 4);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `corral-core` | `Vector`, `Periodicity`, cell indexing |
//! | [`lattice`] | `corral-lattice` | `Lattice` trait, `RegularGrid`, stencils |
//! | [`decomp`] | `corral-decomp` | `DomainDecomposition`, cell ranges |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core vector, periodicity, and cell-index types (`corral-core`).
pub use corral_core as types;

/// Field lattice abstraction and grid backends (`corral-lattice`).
///
/// Provides the [`lattice::Lattice`] trait and the concrete backends
/// [`lattice::RegularGrid`] (axis-aligned stencil) and
/// [`lattice::PlanarNextNearest`] (8-connected, 2D only).
pub use corral_lattice as lattice;

/// Particle-to-cell domain decomposition (`corral-decomp`).
///
/// [`decomp::DomainDecomposition`] rebuilds a spatial ordering of
/// particles once per step and serves per-cell range queries.
pub use corral_decomp as decomp;

/// Common imports for typical corral usage.
///
/// ```rust
/// use corral::prelude::*;
/// ```
pub mod prelude {
    pub use corral_core::{
        CellIndex, NeighborSet, Periodicity, Vector, Vector3d, Vector3f, Vector3i,
    };
    pub use corral_decomp::{
        CellHash, CellRange, DecompError, DomainDecomposition, Position, CELL_EMPTY,
    };
    pub use corral_lattice::{Lattice, LatticeError, PlanarNextNearest, RegularGrid};
}

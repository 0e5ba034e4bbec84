//! Particle-to-cell domain decomposition for corral simulations.
//!
//! [`DomainDecomposition`] bins an externally-owned particle position
//! array into spatial cells: it hashes each particle to its owning
//! cell, sorts the particle order by hash, and exposes per-cell
//! contiguous ranges plus a permutation for reordering arbitrary
//! per-particle attribute arrays. Short-range force kernels call
//! [`DomainDecomposition::build`] once per step (or when the box or
//! cutoff changes) and then query cell ranges in O(1).
//!
//! The build is a bulk-parallel, blocking operation: per-particle
//! hashes are computed independently and the sort is a whole-array
//! parallel sort. There is no cancellation mid-build.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod decomposition;
pub mod error;

pub use decomposition::{CellHash, CellRange, DomainDecomposition, Position, CELL_EMPTY};
pub use error::DecompError;

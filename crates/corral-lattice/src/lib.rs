//! Field lattice abstraction for corral simulations.
//!
//! This crate defines the [`Lattice`] trait — the capability contract
//! through which grid-based field kernels see a discretized domain —
//! along with the dense [`RegularGrid`] backend and its stencil
//! variants.
//!
//! # Backends
//!
//! - [`RegularGrid`]: dense `D`-dimensional storage with the
//!   axis-aligned nearest-neighbor stencil (`2 * D` slots)
//! - [`PlanarNextNearest`]: 8-connected planar stencil over the same
//!   storage, 2D only
//!
//! Boundary handling is per-axis via [`corral_core::Periodicity`]:
//! periodic axes wrap, bounded axes produce null neighbor slots.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod lattice;
pub mod planar;
pub mod regular;
pub mod stencil;

#[cfg(test)]
pub(crate) mod compliance;

pub use error::LatticeError;
pub use lattice::Lattice;
pub use planar::PlanarNextNearest;
pub use regular::RegularGrid;

//! Core types for the corral spatial-organization toolkit.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fixed-size [`Vector`] type used for sizes, coordinates, and
//! positions, the per-axis [`Periodicity`] selection, and the
//! mixed-radix conversion between per-axis cell coordinates and linear
//! [`CellIndex`] values shared by the lattice and decomposition crates.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod index;
pub mod periodic;
pub mod vector;

pub use index::{checked_volume, coord_to_lin, lin_to_coord, CellIndex, NeighborSet};
pub use periodic::{resolve_axis, Periodicity};
pub use vector::{Vector, Vector3d, Vector3f, Vector3i};

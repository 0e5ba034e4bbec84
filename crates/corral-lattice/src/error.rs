//! Error types for lattice construction.

use std::error::Error;
use std::fmt;

/// Errors arising from lattice construction.
///
/// None of these are retried internally: a caller that needs a
/// differently-shaped lattice constructs a new one. All errors are
/// raised synchronously at the offending call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LatticeError {
    /// A construction parameter is invalid (non-positive spacing,
    /// zero cell count on an axis).
    InvalidConfiguration {
        /// Name of the offending parameter.
        param: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// The requested dimensionality is not supported by this topology.
    UnsupportedDimensionality {
        /// The dimensionality the caller asked for.
        requested: usize,
        /// Human-readable description of the supported set.
        supported: &'static str,
    },
    /// The per-axis cell counts multiply out beyond the index width.
    GridTooLarge {
        /// Requested total cell count.
        cells: u128,
        /// Largest representable cell count.
        max: u64,
    },
}

impl fmt::Display for LatticeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfiguration { param, reason } => {
                write!(f, "invalid lattice configuration: {param}: {reason}")
            }
            Self::UnsupportedDimensionality {
                requested,
                supported,
            } => {
                write!(
                    f,
                    "lattice dimensionality {requested} not supported (supported: {supported})"
                )
            }
            Self::GridTooLarge { cells, max } => {
                write!(f, "lattice of {cells} cells exceeds the index width (max {max})")
            }
        }
    }
}

impl Error for LatticeError {}

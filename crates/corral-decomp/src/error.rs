//! Error types for the domain decomposition engine.

use std::error::Error;
use std::fmt;

/// Errors from decomposition configuration and rebuild.
///
/// All errors are raised synchronously at the offending call; nothing
/// is deferred or retried internally. Allocation failure is not
/// represented here: buffer growth uses infallible allocation, which
/// terminates the process, since a simulation cannot sensibly
/// continue with partial state.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DecompError {
    /// A build or query was attempted before the required
    /// configuration was staged.
    NotConfigured {
        /// Which prerequisite is missing, as a full phrase.
        missing: &'static str,
    },
    /// A configuration parameter or input array is invalid.
    InvalidParameter {
        /// Name of the offending parameter.
        param: &'static str,
        /// What was wrong with it.
        reason: String,
    },
    /// The derived cell count does not fit the hash width.
    GridTooLarge {
        /// Requested total cell count.
        cells: u128,
        /// Largest usable cell count (one hash value is reserved as
        /// the empty sentinel).
        max: u64,
    },
}

impl fmt::Display for DecompError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotConfigured { missing } => {
                write!(f, "domain decomposition not ready: {missing}")
            }
            Self::InvalidParameter { param, reason } => {
                write!(f, "invalid decomposition parameter: {param}: {reason}")
            }
            Self::GridTooLarge { cells, max } => {
                write!(f, "cell grid of {cells} cells exceeds the hash width (max {max})")
            }
        }
    }
}

impl Error for DecompError {}

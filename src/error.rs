//! Error types.
//!
//! Only malformed grids and mismatched buffers are errors. Observation points
//! outside the grid are never an error; they resolve to the configured fill value.

use core::fmt;
use thiserror::Error;

/// Grid axis, used to point at the offending coordinate array in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Axis::X => "x",
            Axis::Y => "y",
            Axis::Z => "z",
        };
        f.write_str(name)
    }
}

/// The grid, or the values laid over it, cannot be interpolated.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InvalidGridError {
    /// An axis has fewer entries than the method requires.
    #[error("{axis} grid must have at least {min} entries, found {len}")]
    TooFewPoints {
        /// The offending axis.
        axis: Axis,
        /// Number of entries supplied.
        len: usize,
        /// Minimum number of entries.
        min: usize,
    },

    /// An axis is not strictly increasing (or holds a NaN).
    #[error("{axis} grid must be strictly increasing and free of NaN, failed at entry {index}")]
    NotIncreasing {
        /// The offending axis.
        axis: Axis,
        /// Index of the first entry that fails to exceed its predecessor.
        index: usize,
    },

    /// The number of values does not match the product of the axis lengths.
    #[error("expected {expected} values for the grid shape, found {found}")]
    LengthMismatch {
        /// Product of the axis lengths.
        expected: usize,
        /// Number of values supplied.
        found: usize,
    },

    /// The requested representative layer for the thin-z path does not exist.
    #[error("representative layer {layer} is outside a z grid with {nz} entries")]
    LayerOutOfRange {
        /// Requested layer index.
        layer: usize,
        /// Number of z layers.
        nz: usize,
    },
}

/// Any failure reported by the interpolators.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    #[error(transparent)]
    InvalidGrid(#[from] InvalidGridError),

    /// Observation or output buffers do not line up.
    #[error("dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch {
        /// Expected length (number of dimensions or number of points).
        expected: usize,
        /// Supplied length.
        found: usize,
    },
}

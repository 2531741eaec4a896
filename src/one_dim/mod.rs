//! One-dimensional interpolation along a single rectilinear axis.
//!
//! This is used on its own for the final pass along z, and as the building
//! block for the per-axis fits that make up the bicubic surface.

pub mod cubic;

pub use cubic::CubicSpline1D;

use num_traits::Float;

use crate::error::Error;

/// Location of an observation point relative to a grid axis
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Extrap {
    Inside,
    OutsideLow,
    OutsideHigh,
}

/// A rectilinear 1D grid, which may have uneven spacing.
///
/// Assumes the grid has already been checked to be strictly increasing
/// with at least 2 entries.
#[derive(Clone, Copy)]
pub(crate) struct RectilinearGrid1D<'a, T: Float> {
    grid: &'a [T],
}

impl<'a, T: Float> RectilinearGrid1D<'a, T> {
    #[inline]
    pub(crate) fn new(grid: &'a [T]) -> Self {
        Self { grid }
    }

    #[inline]
    pub(crate) fn grid(&self) -> &'a [T] {
        self.grid
    }

    /// Get the index of the lower corner of the containing grid cell,
    /// along with the normalized location `t` inside that cell.
    ///
    /// A point exactly on an interior node lands at `t = 0` of the cell above it,
    /// so that evaluation there returns the node value without rounding.
    #[inline]
    pub(crate) fn cell(&self, loc: T) -> (usize, T) {
        let n = self.grid.len();
        let i = self
            .grid
            .partition_point(|v| *v <= loc)
            .saturating_sub(1)
            .min(n - 2);
        let (x0, x1) = (self.grid[i], self.grid[i + 1]);

        (i, (loc - x0) / (x1 - x0))
    }

    /// Classify an observation point against the closed extent of the grid.
    /// NaN is reported as outside.
    #[inline]
    pub(crate) fn extrap(&self, loc: T) -> Extrap {
        let lo = self.grid[0];
        let hi = self.grid[self.grid.len() - 1];
        if loc >= lo && loc <= hi {
            Extrap::Inside
        } else if loc > hi {
            Extrap::OutsideHigh
        } else {
            Extrap::OutsideLow
        }
    }

    #[inline]
    pub(crate) fn contains(&self, loc: T) -> bool {
        self.extrap(loc) == Extrap::Inside
    }
}

/// A one-dimensional interpolator.
pub trait Interp1D<T: Float> {
    /// Evaluate the interpolant at an observation point.
    ///
    /// It is highly recommended to inline implementations of this function.
    fn eval_one(&self, loc: T) -> T;

    /// Evaluate the interpolant at a set of observation points.
    ///
    /// # Errors
    /// * If `locs` and `out` differ in length
    #[inline]
    fn eval(&self, locs: &[T], out: &mut [T]) -> Result<(), Error> {
        if locs.len() != out.len() {
            return Err(Error::DimensionMismatch {
                expected: locs.len(),
                found: out.len(),
            });
        }

        for i in 0..locs.len() {
            out[i] = self.eval_one(locs[i]);
        }

        Ok(())
    }

    /// Evaluate the interpolant at a set of observation points, allocating
    /// for the output values for convenience.
    #[inline]
    fn eval_alloc(&self, locs: &[T]) -> Vec<T> {
        locs.iter().map(|&loc| self.eval_one(loc)).collect()
    }
}

//! Interpolating cubic spline with not-a-knot boundary conditions.
//!
//! The spline is stored in Hermite form: the data values plus the first derivative
//! at every knot, solved once from a tridiagonal system at construction. On each cell
//! the interpolant is the cubic Hermite polynomial through the two end values
//! with those slopes, which makes the whole curve C2.
//!
//! Fewer than 4 knots can't pin down a not-a-knot cubic, so the fit degrades
//! to the interpolating parabola for 3 knots and to a straight line for 2.
//!
//! Observation points outside the closed extent of the grid return the fill value;
//! the spline is never extrapolated.
//!
//! ```rust
//! use spline3d::one_dim::{CubicSpline1D, Interp1D};
//!
//! let z = [0.0_f64, 1.0, 2.0, 4.0, 5.0];
//! let v: Vec<f64> = z.iter().map(|&z| z * z * z).collect();
//!
//! let spline = CubicSpline1D::new(&z, &v, 0.0).unwrap();
//!
//! // A cubic is reproduced exactly
//! assert!((spline.eval_one(3.0) - 27.0).abs() < 1e-10);
//! // Outside the grid, the fill value is returned
//! assert_eq!(spline.eval_one(6.0), 0.0);
//! ```
use num_traits::Float;

use super::{Interp1D, RectilinearGrid1D};
use crate::error::{Axis, Error, InvalidGridError};
use crate::grid::validate_axis;
use crate::normalized_hermite_spline;

/// A 1D not-a-knot cubic spline interpolant on a rectilinear grid.
pub struct CubicSpline1D<'a, T: Float> {
    grid: RectilinearGrid1D<'a, T>,

    /// Values at each knot
    vals: &'a [T],

    /// First derivative at each knot
    slopes: Vec<T>,

    /// Returned for observation points outside the grid
    fill_value: T,
}

impl<'a, T: Float> CubicSpline1D<'a, T> {
    /// Fit the spline, using O(n) calculations and storage.
    ///
    /// # Errors
    /// * If the grid has fewer than 2 entries
    /// * If the grid is not strictly increasing
    /// * If the grid and values differ in length
    pub fn new(grid: &'a [T], vals: &'a [T], fill_value: T) -> Result<Self, InvalidGridError> {
        validate_axis(Axis::Z, grid, 2)?;
        if vals.len() != grid.len() {
            return Err(InvalidGridError::LengthMismatch {
                expected: grid.len(),
                found: vals.len(),
            });
        }

        Ok(Self::fit(grid, vals, fill_value))
    }

    /// Fit without checking the inputs.
    /// The grid must be strictly increasing with at least 2 entries, and match `vals` in length.
    pub(crate) fn fit(grid: &'a [T], vals: &'a [T], fill_value: T) -> Self {
        let mut slopes = vec![T::zero(); grid.len()];
        not_a_knot_slopes(grid, vals, &mut slopes);

        Self {
            grid: RectilinearGrid1D::new(grid),
            vals,
            slopes,
            fill_value,
        }
    }

    /// First derivative of the interpolant at each knot.
    pub fn slopes(&self) -> &[T] {
        &self.slopes
    }
}

impl<'a, T: Float> Interp1D<T> for CubicSpline1D<'a, T> {
    #[inline]
    fn eval_one(&self, loc: T) -> T {
        if !self.grid.contains(loc) {
            return self.fill_value;
        }

        let (i, t) = self.grid.cell(loc);
        let x = self.grid.grid();
        let h = x[i + 1] - x[i];

        normalized_hermite_spline(
            t,
            self.vals[i],
            self.vals[i + 1] - self.vals[i],
            self.slopes[i] * h,
            self.slopes[i + 1] * h,
        )
    }
}

/// Evaluate a 1D cubic spline at a set of observation points.
///
/// # Errors
/// * If the grid is invalid (see [`CubicSpline1D::new`])
/// * If `locs` and `out` differ in length
pub fn interp1d<T: Float>(
    grid: &[T],
    vals: &[T],
    fill_value: T,
    locs: &[T],
    out: &mut [T],
) -> Result<(), Error> {
    CubicSpline1D::new(grid, vals, fill_value)?.eval(locs, out)
}

/// Evaluate a 1D cubic spline, allocating a new Vec for the output.
pub fn interp1d_alloc<T: Float>(
    grid: &[T],
    vals: &[T],
    fill_value: T,
    locs: &[T],
) -> Result<Vec<T>, Error> {
    Ok(CubicSpline1D::new(grid, vals, fill_value)?.eval_alloc(locs))
}

/// Solve for the first derivative at each knot of the interpolating cubic spline
/// through `(x, y)`, with not-a-knot end conditions.
///
/// `x` must be strictly increasing with at least 2 entries, and all three slices
/// must have the same length.
///
/// The system is tridiagonal in every case, including the not-a-knot rows, and is
/// solved with the Thomas algorithm. Strictly increasing knots keep every pivot
/// positive, so no pivoting is needed.
pub(crate) fn not_a_knot_slopes<T: Float>(x: &[T], y: &[T], slopes: &mut [T]) {
    let n = x.len();
    let one = T::one();
    let two = one + one;
    let three = two + one;

    let dx = |i: usize| x[i + 1] - x[i];
    let m = |i: usize| (y[i + 1] - y[i]) / dx(i);

    if n == 2 {
        // Straight line
        slopes[0] = m(0);
        slopes[1] = m(0);
        return;
    }

    // Coefficients of row `i` like (lower, diag, upper, rhs), where `lower`
    // multiplies slope i-1 and `upper` multiplies slope i+1.
    let row = |i: usize| -> (T, T, T, T) {
        let zero = T::zero();
        if i == 0 {
            if n == 3 {
                // Parabola: the secant slope is the mean of the end slopes
                (zero, one, one, two * m(0))
            } else {
                let d = x[2] - x[0];
                let rhs = ((dx(0) + two * d) * dx(1) * m(0) + dx(0) * dx(0) * m(1)) / d;
                (zero, dx(1), d, rhs)
            }
        } else if i == n - 1 {
            if n == 3 {
                (one, one, zero, two * m(1))
            } else {
                let d = x[n - 1] - x[n - 3];
                let rhs = (dx(n - 2) * dx(n - 2) * m(n - 3)
                    + (two * d + dx(n - 2)) * dx(n - 3) * m(n - 2))
                    / d;
                (d, dx(n - 3), zero, rhs)
            }
        } else {
            // Continuity of the second derivative at interior knots
            let rhs = three * (dx(i) * m(i - 1) + dx(i - 1) * m(i));
            (dx(i), two * (dx(i - 1) + dx(i)), dx(i - 1), rhs)
        }
    };

    // Forward sweep, storing the modified rhs in `slopes`
    let mut upper_mod = vec![T::zero(); n];
    let (_, diag, upper, rhs) = row(0);
    upper_mod[0] = upper / diag;
    slopes[0] = rhs / diag;
    for i in 1..n {
        let (lower, diag, upper, rhs) = row(i);
        let denom = diag - lower * upper_mod[i - 1];
        upper_mod[i] = upper / denom;
        slopes[i] = (rhs - lower * slopes[i - 1]) / denom;
    }

    // Back substitution
    for i in (0..n - 1).rev() {
        slopes[i] = slopes[i] - upper_mod[i] * slopes[i + 1];
    }
}

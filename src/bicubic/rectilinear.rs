//! Bicubic spline interpolation on a 2D rectilinear grid.
//!
//! ```rust
//! use spline3d::bicubic::rectilinear;
//!
//! // Define a grid
//! let x = [1.0_f64, 1.2, 2.0, 2.5];
//! let y = [1.0_f64, 1.3, 1.5, 3.0];
//!
//! // Grid input for rectilinear method
//! let grids = &[&x[..], &y[..]];
//!
//! // Values at grid points
//! let z = [2.0; 16];
//!
//! // Points to interpolate, the second of which is outside the grid
//! let xobs = [1.5_f64, 5.0];
//! let yobs = [2.0, 3.0];
//! let obs = [&xobs[..], &yobs[..]];
//!
//! // Do interpolation, allocating for the output for convenience
//! let fill_value = -1.0;
//! let out = rectilinear::interpn_alloc(grids, &z, fill_value, &obs).unwrap();
//! assert!((out[0] - 2.0).abs() < 1e-12);
//! assert_eq!(out[1], fill_value);
//! ```
use num_traits::Float;

use crate::error::{Axis, Error, InvalidGridError};
use crate::grid::validate_axis;
use crate::normalized_hermite_spline;
use crate::one_dim::cubic::not_a_knot_slopes;
use crate::one_dim::RectilinearGrid1D;

/// Evaluate bicubic spline interpolation on a 2D rectilinear grid.
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// This fits the spline on every call; to evaluate several batches against the same
/// data, build a [`BicubicRectilinear`] once and call [`BicubicRectilinear::interp`].
///
/// # Errors
/// * If the grid is invalid (see [`BicubicRectilinear::new`])
/// * If there are not exactly 2 grids or 2 observation coordinate slices
/// * If the observation slices and `out` differ in length
pub fn interpn<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    fill_value: T,
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), Error> {
    if grids.len() != 2 {
        return Err(Error::DimensionMismatch {
            expected: 2,
            found: grids.len(),
        });
    }
    BicubicRectilinear::new(grids[0], grids[1], vals, fill_value)?.interp(obs, out)
}

/// Evaluate interpolant, allocating a new Vec for the output.
///
/// For best results, use the `interpn` function with preallocated output;
/// allocation has a significant performance cost, and should be used sparingly.
pub fn interpn_alloc<T: Float>(
    grids: &[&[T]],
    vals: &[T],
    fill_value: T,
    obs: &[&[T]],
) -> Result<Vec<T>, Error> {
    let n = obs.first().map_or(0, |x| x.len());
    let mut out = vec![T::zero(); n];
    interpn(grids, vals, fill_value, obs, &mut out)?;
    Ok(out)
}

/// A bicubic spline surface fitted to one layer of values on a rectilinear grid.
///
/// Assumes C-style ordering of vals (z(x0, y0), z(x0, y1), ..., z(x0, yn), z(x1, y0), ...).
///
/// Operation Complexity
/// * O(nx * ny) to fit
/// * O(log2(nx) + log2(ny)) per observation point, for the bisection search
///
/// Memory Complexity
/// * Three derivative arrays, each the same size as the values
pub struct BicubicRectilinear<'a, T: Float> {
    xs: RectilinearGrid1D<'a, T>,
    ys: RectilinearGrid1D<'a, T>,

    /// Values at each point, size nx * ny
    vals: &'a [T],

    /// Partial derivatives at each point, each size nx * ny
    dfdx: Vec<T>,
    dfdy: Vec<T>,
    d2fdxdy: Vec<T>,

    /// Returned for observation points outside the grid
    fill_value: T,
}

impl<'a, T: Float> BicubicRectilinear<'a, T> {
    /// Fit a new surface, using O(nx * ny) calculations and storage.
    ///
    /// # Errors
    /// * If either grid has fewer than 2 entries
    /// * If either grid is not strictly increasing
    /// * If the number of values does not match the grid size
    pub fn new(
        xs: &'a [T],
        ys: &'a [T],
        vals: &'a [T],
        fill_value: T,
    ) -> Result<Self, InvalidGridError> {
        validate_axis(Axis::X, xs, 2)?;
        validate_axis(Axis::Y, ys, 2)?;
        let nvals = xs.len() * ys.len();
        if vals.len() != nvals {
            return Err(InvalidGridError::LengthMismatch {
                expected: nvals,
                found: vals.len(),
            });
        }

        Ok(Self::fit(xs, ys, vals, fill_value))
    }

    /// Fit without checking the inputs.
    pub(crate) fn fit(xs: &'a [T], ys: &'a [T], vals: &'a [T], fill_value: T) -> Self {
        let (nx, ny) = (xs.len(), ys.len());
        let zero = T::zero();

        // Rows along y are contiguous
        let mut dfdy = vec![zero; nx * ny];
        for i in 0..nx {
            let row = i * ny..(i + 1) * ny;
            not_a_knot_slopes(ys, &vals[row.clone()], &mut dfdy[row]);
        }

        // Columns along x are strided, so gather them first
        let mut dfdx = vec![zero; nx * ny];
        let mut d2fdxdy = vec![zero; nx * ny];
        let mut column = vec![zero; nx];
        let mut slopes = vec![zero; nx];
        for j in 0..ny {
            (0..nx).for_each(|i| column[i] = vals[i * ny + j]);
            not_a_knot_slopes(xs, &column, &mut slopes);
            (0..nx).for_each(|i| dfdx[i * ny + j] = slopes[i]);

            (0..nx).for_each(|i| column[i] = dfdy[i * ny + j]);
            not_a_knot_slopes(xs, &column, &mut slopes);
            (0..nx).for_each(|i| d2fdxdy[i * ny + j] = slopes[i]);
        }

        Self {
            xs: RectilinearGrid1D::new(xs),
            ys: RectilinearGrid1D::new(ys),
            vals,
            dfdx,
            dfdy,
            d2fdxdy,
            fill_value,
        }
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If there are not exactly 2 observation coordinate slices
    ///   * If the observation slices and `out` differ in length
    pub fn interp(&self, obs: &[&[T]], out: &mut [T]) -> Result<(), Error> {
        if obs.len() != 2 {
            return Err(Error::DimensionMismatch {
                expected: 2,
                found: obs.len(),
            });
        }
        if let Some(bad) = obs.iter().find(|x| x.len() != out.len()) {
            return Err(Error::DimensionMismatch {
                expected: out.len(),
                found: bad.len(),
            });
        }

        let (x, y) = (obs[0], obs[1]);
        for i in 0..out.len() {
            out[i] = self.interp_one(x[i], y[i]);
        }

        Ok(())
    }

    /// Interpolate the value at a point.
    #[inline]
    pub fn interp_one(&self, x: T, y: T) -> T {
        if !(self.xs.contains(x) && self.ys.contains(y)) {
            return self.fill_value;
        }

        let (i, t) = self.xs.cell(x);
        let (j, u) = self.ys.cell(y);
        let (xg, yg) = (self.xs.grid(), self.ys.grid());
        let hx = xg[i + 1] - xg[i];
        let hy = yg[j + 1] - yg[j];
        let ny = yg.len();

        // Hermite along y, at x-row `row`, for a quantity and its y-derivative
        let along_y = |f: &[T], dfdy: &[T], row: usize| {
            let a = row * ny + j;
            normalized_hermite_spline(u, f[a], f[a + 1] - f[a], dfdy[a] * hy, dfdy[a + 1] * hy)
        };

        let f0 = along_y(self.vals, &self.dfdy, i);
        let f1 = along_y(self.vals, &self.dfdy, i + 1);
        let k0 = along_y(&self.dfdx, &self.d2fdxdy, i);
        let k1 = along_y(&self.dfdx, &self.d2fdxdy, i + 1);

        normalized_hermite_spline(t, f0, f1 - f0, k0 * hx, k1 * hx)
    }
}

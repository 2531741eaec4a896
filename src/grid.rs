//! Validation and indexing of 3D rectilinear grids.
//!
//! All checks happen here, up front, so the interpolators themselves never
//! see a grid that could make their spline systems singular.
use num_traits::Float;

use crate::error::{Axis, Error, InvalidGridError};

/// Check that an axis has at least `min` entries and is strictly increasing.
/// A NaN anywhere in the axis fails the ordering check.
pub(crate) fn validate_axis<T: Float>(
    axis: Axis,
    grid: &[T],
    min: usize,
) -> Result<(), InvalidGridError> {
    if grid.len() < min {
        return Err(InvalidGridError::TooFewPoints {
            axis,
            len: grid.len(),
            min,
        });
    }
    if let Some(i) = (1..grid.len()).find(|&i| !(grid[i] > grid[i - 1])) {
        return Err(InvalidGridError::NotIncreasing { axis, index: i });
    }
    // A lone entry can't be out of order, but it can still be NaN
    if grid.len() == 1 && grid[0].is_nan() {
        return Err(InvalidGridError::NotIncreasing { axis, index: 0 });
    }

    Ok(())
}

/// A validated 3D rectilinear grid, with one value per grid point.
///
/// Assumes C-style ordering of vals (v(x0, y0, z0), v(x0, y0, z1), ..., v(x0, y1, z0), ...),
/// so that `vals[(i * ny + j) * nz + k]` is the value at `(xs[i], ys[j], zs[k])`.
/// This matches the standard layout of an `ndarray::Array3` with shape `(nx, ny, nz)`.
///
/// The grid only borrows its inputs and never modifies them.
#[derive(Clone, Copy, Debug)]
pub struct RectilinearGrid3D<'a, T: Float> {
    xs: &'a [T],
    ys: &'a [T],
    zs: &'a [T],
    vals: &'a [T],
}

impl<'a, T: Float> RectilinearGrid3D<'a, T> {
    /// Validate a grid and its values.
    ///
    /// # Errors
    /// * If `xs` or `ys` has fewer than 2 entries, or `zs` is empty
    /// * If any axis is not strictly increasing
    /// * If the number of values is not `nx * ny * nz`
    pub fn new(
        xs: &'a [T],
        ys: &'a [T],
        zs: &'a [T],
        vals: &'a [T],
    ) -> Result<Self, InvalidGridError> {
        validate_axis(Axis::X, xs, 2)?;
        validate_axis(Axis::Y, ys, 2)?;
        validate_axis(Axis::Z, zs, 1)?;
        let nvals = xs.len() * ys.len() * zs.len();
        if vals.len() != nvals {
            return Err(InvalidGridError::LengthMismatch {
                expected: nvals,
                found: vals.len(),
            });
        }

        Ok(Self { xs, ys, zs, vals })
    }

    /// Size of each dimension like `[nx, ny, nz]`
    pub fn dims(&self) -> [usize; 3] {
        [self.xs.len(), self.ys.len(), self.zs.len()]
    }

    pub fn xs(&self) -> &'a [T] {
        self.xs
    }

    pub fn ys(&self) -> &'a [T] {
        self.ys
    }

    pub fn zs(&self) -> &'a [T] {
        self.zs
    }

    pub fn vals(&self) -> &'a [T] {
        self.vals
    }

    /// Copy out the constant-z layer `k` in 2D C-style ordering,
    /// `layer[i * ny + j] = v(xs[i], ys[j], zs[k])`.
    ///
    /// Panics if `k` is not a valid z index.
    pub fn layer(&self, k: usize) -> Vec<T> {
        let nz = self.zs.len();
        assert!(k < nz, "layer {k} is outside a z grid with {nz} entries");
        self.vals.iter().skip(k).step_by(nz).copied().collect()
    }

    /// Whether a point lies in the closed box spanned by the grid.
    pub fn contains(&self, x: T, y: T, z: T) -> bool {
        let inside = |g: &[T], v: T| v >= g[0] && v <= g[g.len() - 1];
        inside(self.xs, x) && inside(self.ys, y) && inside(self.zs, z)
    }
}

/// Check whether a list of observation points are inside the grid within some absolute tolerance.
/// Assumes the grid is valid (monotonically increasing).
///
/// Output slice entry `i` is set to `false` if no points on that dimension are out of bounds,
/// and set to `true` if there is a bounds violation on that axis.
///
/// Since out-of-bounds points resolve to the fill value rather than an error,
/// this is the way to tell a filled result apart from a genuine one.
///
/// # Errors
/// * If the dimensionality of the grid does not match the dimensionality of the observation points
/// * If the output slice length does not match the dimensionality of the grid
pub fn check_bounds<T: Float>(
    grids: &[&[T]],
    obs: &[&[T]],
    atol: T,
    out: &mut [bool],
) -> Result<(), Error> {
    let ndims = grids.len();
    if obs.len() != ndims {
        return Err(Error::DimensionMismatch {
            expected: ndims,
            found: obs.len(),
        });
    }
    if out.len() != ndims {
        return Err(Error::DimensionMismatch {
            expected: ndims,
            found: out.len(),
        });
    }
    for i in 0..ndims {
        match (grids[i].first(), grids[i].last()) {
            (Some(&lo), Some(&hi)) => {
                let bad = obs[i]
                    .iter()
                    .any(|&x| !((x - lo) >= -atol && (x - hi) <= atol));

                out[i] = bad;
            }
            _ => {
                return Err(Error::DimensionMismatch {
                    expected: 1,
                    found: 0,
                })
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_validation() {
        let x = [0.0_f64, 1.0, 2.0];
        let y = [0.0_f64, 0.5];
        let z = [3.0_f64];
        let v = [0.0_f64; 6];

        let grid = RectilinearGrid3D::new(&x, &y, &z, &v).unwrap();
        assert_eq!(grid.dims(), [3, 2, 1]);

        assert_eq!(
            RectilinearGrid3D::new(&x, &y, &z, &v[..5]).err(),
            Some(InvalidGridError::LengthMismatch {
                expected: 6,
                found: 5
            })
        );
        assert_eq!(
            RectilinearGrid3D::new(&x, &y[..1], &z, &v[..3]).err(),
            Some(InvalidGridError::TooFewPoints {
                axis: Axis::Y,
                len: 1,
                min: 2
            })
        );
        assert_eq!(
            RectilinearGrid3D::new(&x, &y, &z[..0], &v[..0]).err(),
            Some(InvalidGridError::TooFewPoints {
                axis: Axis::Z,
                len: 0,
                min: 1
            })
        );
    }

    #[test]
    fn test_non_increasing() {
        let y = [0.0_f64, 1.0];
        let z = [0.0_f64, 1.0];
        let v = [0.0_f64; 12];

        for (x, index) in [
            ([0.0, 0.0, 1.0], 1),
            ([0.0, 2.0, 1.0], 2),
            ([0.0, f64::NAN, 1.0], 1),
        ] {
            assert_eq!(
                RectilinearGrid3D::new(&x, &y, &z, &v).err(),
                Some(InvalidGridError::NotIncreasing {
                    axis: Axis::X,
                    index
                })
            );
        }

        let x = [0.0, 1.0, 2.0];
        assert_eq!(
            RectilinearGrid3D::new(&x, &y, &[f64::NAN], &v[..6]).err(),
            Some(InvalidGridError::NotIncreasing {
                axis: Axis::Z,
                index: 0
            })
        );
    }

    #[test]
    fn test_layer() {
        let x = [0.0_f64, 1.0];
        let y = [0.0_f64, 1.0, 2.0];
        let z = [0.0_f64, 1.0];
        // v = i + 10 j + 100 k
        let v: Vec<f64> = (0..2)
            .flat_map(|i| (0..3).flat_map(move |j| (0..2).map(move |k| (i + 10 * j + 100 * k) as f64)))
            .collect();
        let grid = RectilinearGrid3D::new(&x, &y, &z, &v).unwrap();

        assert_eq!(grid.layer(0), vec![0.0, 10.0, 20.0, 1.0, 11.0, 21.0]);
        assert_eq!(grid.layer(1), vec![100.0, 110.0, 120.0, 101.0, 111.0, 121.0]);
    }

    #[test]
    fn test_check_bounds() {
        let x = [0.0_f64, 1.0, 2.0];
        let y = [-1.0_f64, 1.0];
        let xobs = [0.0, 2.0, 1.0];
        let yobs = [-1.0, 0.0, 1.0 + 1e-3];
        let mut out = [true; 2];

        check_bounds(&[&x[..], &y[..]], &[&xobs[..], &yobs[..]], 1e-6, &mut out).unwrap();
        assert_eq!(out, [false, true]);

        // Widening the tolerance brings the y point back in
        check_bounds(&[&x[..], &y[..]], &[&xobs[..], &yobs[..]], 1e-2, &mut out).unwrap();
        assert_eq!(out, [false, false]);

        assert!(check_bounds(&[&x[..]], &[&xobs[..], &yobs[..]], 0.0, &mut out).is_err());
    }
}

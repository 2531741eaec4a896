//! Smooth interpolation of scalar fields on 3D rectilinear grids,
//! built from a bicubic spline on each constant-z layer and a cubic spline along z.
//!
//! For each batch of observation points, every z layer is fitted with a bicubic
//! spline and evaluated at the points' (x, y) coordinates. Each point then has one
//! value per layer, and a 1D cubic spline through those values is evaluated at the
//! point's z coordinate. When the z axis has too few entries for a cubic fit,
//! z is ignored and one representative layer is interpolated in 2D instead.
//!
//! All splines interpolate: grid values are reproduced exactly at the grid nodes.
//! Observation points outside the grid are never extrapolated; they get a fill value.
//!
//! # Performance Scalings
//! The splines here are global: fitting solves a tridiagonal system along every grid line,
//! so the value at any observation point depends on every value in the grid.
//! The fit is O(size of data), after which evaluation only touches one grid cell.
//!
//! Rectilinear methods perform a bisection search to find the relevant grid cell, which takes
//! a worst-case number of iterations of log2(number of grid elements).
//!
//! | Method                        | Fit          | Cost per observation point          |
//! |-------------------------------|--------------|-------------------------------------|
//! | one_dim::cubic                | O(n)         | O(log2(n))                          |
//! | bicubic::rectilinear          | O(nx * ny)   | O(log2(nx) + log2(ny))              |
//! | spline3d (full z)             | O(nx*ny*nz)  | O(nz * (log2(nx) + log2(ny)))       |
//! | spline3d (thin z)             | O(nx * ny)   | O(log2(nx) + log2(ny))              |
//!
//! With the default `parallel` feature, the layer fits and the per-point fits along z
//! are spread over the rayon thread pool.
//!
//! # Example: Hybrid Spline w/ Rectilinear Grid
//! ```rust
//! use spline3d::{Spline3D, Spline3DConfig, ZMode};
//!
//! // Define a grid
//! let x = [0.0_f64, 1.0, 2.5, 3.0];
//! let y = [0.0_f64, 0.5, 1.0, 2.0];
//! let z = [-1.0_f64, 0.0, 1.0, 2.0, 3.0];
//!
//! // Values at grid points, in C-style ordering
//! let mut v = Vec::new();
//! for xi in x {
//!     for yj in y {
//!         for zk in z {
//!             v.push(xi * yj + zk * zk);
//!         }
//!     }
//! }
//!
//! // Points to interpolate, the second of which is outside the grid
//! let xobs = [1.0_f64, 5.0];
//! let yobs = [0.25, 0.25];
//! let zobs = [0.5, 0.5];
//! let obs = [&xobs[..], &yobs[..], &zobs[..]];
//!
//! // Storage for output
//! let mut out = [0.0; 2];
//!
//! // Do interpolation
//! let config = Spline3DConfig::default().with_fill_value(f64::NAN);
//! let interpolator = Spline3D::new(&x, &y, &z, &v, config).unwrap();
//! assert_eq!(interpolator.mode(), ZMode::Full);
//! interpolator.interp(&obs, &mut out).unwrap();
//!
//! assert!((out[0] - 0.5).abs() < 1e-10);
//! assert!(out[1].is_nan());
//! ```
// These "needless" range loops are a significant speedup
#![allow(clippy::needless_range_loop)]

pub mod error;
pub use error::{Axis, Error, InvalidGridError};

pub mod grid;
pub use grid::{check_bounds, RectilinearGrid3D};

pub mod one_dim;
pub use one_dim::{CubicSpline1D, Interp1D};

pub mod bicubic;
pub use bicubic::BicubicRectilinear;

pub mod spline3d;
pub use spline3d::{interpolate, Spline3D, Spline3DConfig, ZMode};

pub mod utils;

#[cfg(test)]
pub(crate) mod testing;

/// Evaluate a hermite spline function on an interval from x0 to x1,
/// with imposed slopes k0 and k1 at the endpoints, and normalized
/// coordinate t = (x - x0) / (x1 - x0).
///
/// The slopes are also normalized, i.e. already multiplied by (x1 - x0).
#[inline]
pub(crate) fn normalized_hermite_spline<T: num_traits::Float>(
    t: T,
    y0: T,
    dy: T,
    k0: T,
    k1: T,
) -> T {
    // `a` and `b` are the difference between this function and a linear one going
    // forward or backward with the imposed slopes.
    let a = k0 - dy;
    let b = -k1 + dy;

    let t2 = t * t;
    let t3 = t.powi(3);

    let c1 = dy + a;
    let c2 = b - (a + a);
    let c3 = a - b;

    y0 + (c1 * t) + (c2 * t2) + (c3 * t3)
}

//! Hybrid spline interpolation on a 3D rectilinear grid.
//!
//! Each constant-z layer is fitted with a bicubic spline and evaluated at the
//! (x, y) part of every observation point. For each point, the values it picked
//! up from every layer form a profile along z, which is fitted with a 1D cubic
//! spline and evaluated at the point's z coordinate.
//!
//! When the z axis is too short for a cubic fit (fewer than 4 entries by default),
//! z is ignored entirely and a single representative layer is interpolated in 2D.
//!
//! Nothing is cached between calls; each batch refits whatever splines it needs.
//!
//! ```rust
//! use spline3d::spline3d;
//!
//! // Define a grid
//! let x = [0.0_f64, 1.0, 2.0, 3.0];
//! let y = [0.0_f64, 1.0, 2.0, 3.0];
//! let z = [0.0_f64, 1.0, 2.0, 3.0, 4.0];
//! let grids = &[&x[..], &y[..], &z[..]];
//!
//! // Values at grid points, v = x + 10 y + 100 z in C-style ordering
//! let mut v = Vec::new();
//! for i in 0..4 {
//!     for j in 0..4 {
//!         for k in 0..5 {
//!             v.push((i + 10 * j + 100 * k) as f64);
//!         }
//!     }
//! }
//!
//! // Points to interpolate, the last of which is outside the grid
//! let xobs = [0.0_f64, 3.0, 1.5, -1.0];
//! let yobs = [0.0, 3.0, 1.5, 0.0];
//! let zobs = [0.0, 4.0, 2.5, 0.0];
//! let obs = [&xobs[..], &yobs[..], &zobs[..]];
//!
//! // Do interpolation, allocating for the output for convenience
//! let out = spline3d::interpn_alloc(grids, &v, &obs).unwrap();
//!
//! let expected = [0.0, 433.0, 266.5, 0.0];
//! (0..4).for_each(|i| assert!((out[i] - expected[i]).abs() < 1e-9));
//! ```
use num_traits::Float;
use tracing::{debug, trace};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::bicubic::BicubicRectilinear;
use crate::error::{Error, InvalidGridError};
use crate::grid::RectilinearGrid3D;
use crate::one_dim::{CubicSpline1D, Interp1D};

/// Options for [`Spline3D`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Spline3DConfig<T> {
    /// Returned for observation points outside the grid on any axis
    pub fill_value: T,

    /// Minimum number of z entries needed to interpolate along z.
    /// Shorter z axes use a single representative layer instead.
    /// Values below 2 are treated as 2.
    pub z_thin_threshold: usize,

    /// Representative layer for short z axes.
    /// If unset, the middle layer `nz / 2` is used, which is the data layer of
    /// a single layer padded by one copy on either side.
    pub thin_layer: Option<usize>,
}

impl<T: Float> Default for Spline3DConfig<T> {
    fn default() -> Self {
        Self {
            fill_value: T::zero(),
            z_thin_threshold: 4,
            thin_layer: None,
        }
    }
}

impl<T: Float> Spline3DConfig<T> {
    pub fn with_fill_value(mut self, fill_value: T) -> Self {
        self.fill_value = fill_value;
        self
    }

    pub fn with_z_thin_threshold(mut self, z_thin_threshold: usize) -> Self {
        self.z_thin_threshold = z_thin_threshold;
        self
    }

    pub fn with_thin_layer(mut self, layer: usize) -> Self {
        self.thin_layer = Some(layer);
        self
    }
}

/// How the z axis is handled for a given grid
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZMode {
    /// z is too short for a spline; interpolate one layer in (x, y) and ignore z
    Thin { layer: usize },
    /// Bicubic on every layer, then a cubic spline along z
    Full,
}

/// Hybrid bicubic / cubic spline interpolator on a 3D rectilinear grid.
///
/// Assumes C-style ordering of vals (v(x0, y0, z0), v(x0, y0, z1), ..., v(x0, y1, z0), ...).
///
/// Operation Complexity, for a batch of Q observation points
/// * Full mode: O(nz * nx * ny) to fit all layers, plus O(nz) per point for the
///   layer evaluations and the fit along z
/// * Thin mode: O(nx * ny) to fit one layer, plus O(1) per point
///
/// Memory Complexity
/// * Full mode: an nz by Q intermediate array of per-layer values
///
/// With the `parallel` feature, layers are fitted concurrently, and the
/// per-point fits along z run concurrently as well.
#[derive(Clone, Copy, Debug)]
pub struct Spline3D<'a, T: Float> {
    grid: RectilinearGrid3D<'a, T>,
    config: Spline3DConfig<T>,
    mode: ZMode,
}

impl<'a, T: Float + Send + Sync> Spline3D<'a, T> {
    /// Validate the grid and pick how to handle the z axis.
    ///
    /// # Errors
    /// * If the grid is invalid (see [`RectilinearGrid3D::new`])
    /// * If `config.thin_layer` is not a valid z index
    pub fn new(
        xs: &'a [T],
        ys: &'a [T],
        zs: &'a [T],
        vals: &'a [T],
        config: Spline3DConfig<T>,
    ) -> Result<Self, InvalidGridError> {
        Self::from_grid(RectilinearGrid3D::new(xs, ys, zs, vals)?, config)
    }

    /// Build on an already-validated grid.
    ///
    /// # Errors
    /// * If `config.thin_layer` is not a valid z index
    pub fn from_grid(
        grid: RectilinearGrid3D<'a, T>,
        config: Spline3DConfig<T>,
    ) -> Result<Self, InvalidGridError> {
        let nz = grid.zs().len();
        if let Some(layer) = config.thin_layer {
            if layer >= nz {
                return Err(InvalidGridError::LayerOutOfRange { layer, nz });
            }
        }

        let mode = if nz >= config.z_thin_threshold.max(2) {
            ZMode::Full
        } else {
            let layer = config.thin_layer.unwrap_or_else(|| {
                debug!(nz, layer = nz / 2, "no thin layer given, using middle layer");
                nz / 2
            });
            ZMode::Thin { layer }
        };

        Ok(Self { grid, config, mode })
    }

    pub fn mode(&self) -> ZMode {
        self.mode
    }

    pub fn grid(&self) -> &RectilinearGrid3D<'a, T> {
        &self.grid
    }

    pub fn config(&self) -> &Spline3DConfig<T> {
        &self.config
    }

    /// Interpolate on a contiguous list of observation points.
    ///
    /// # Errors
    ///   * If there are not exactly 3 observation coordinate slices
    ///   * If the observation slices and `out` differ in length
    pub fn interp(&self, obs: &[&[T]], out: &mut [T]) -> Result<(), Error> {
        if obs.len() != 3 {
            return Err(Error::DimensionMismatch {
                expected: 3,
                found: obs.len(),
            });
        }
        if let Some(bad) = obs.iter().find(|x| x.len() != out.len()) {
            return Err(Error::DimensionMismatch {
                expected: out.len(),
                found: bad.len(),
            });
        }

        debug!(dims = ?self.grid.dims(), nobs = out.len(), mode = ?self.mode, "interpolating");

        match self.mode {
            ZMode::Thin { layer } => {
                let vals = self.grid.layer(layer);
                let surface = BicubicRectilinear::fit(
                    self.grid.xs(),
                    self.grid.ys(),
                    &vals,
                    self.config.fill_value,
                );
                surface.interp(&obs[..2], out)
            }
            ZMode::Full => {
                self.interp_full(obs[0], obs[1], obs[2], out);
                Ok(())
            }
        }
    }

    /// Interpolate the value at a single point.
    ///
    /// This refits the splines on every call, so prefer [`Spline3D::interp`] for batches.
    pub fn interp_one(&self, x: T, y: T, z: T) -> T {
        match self.mode {
            ZMode::Thin { layer } => {
                let vals = self.grid.layer(layer);
                let surface = BicubicRectilinear::fit(
                    self.grid.xs(),
                    self.grid.ys(),
                    &vals,
                    self.config.fill_value,
                );
                surface.interp_one(x, y)
            }
            ZMode::Full => {
                let mut out = [T::zero()];
                self.interp_full(&[x], &[y], &[z], &mut out);
                out[0]
            }
        }
    }

    /// Bicubic on every layer, then a cubic along z for every point.
    /// Inputs must already be checked to have the same length.
    fn interp_full(&self, x: &[T], y: &[T], z: &[T], out: &mut [T]) {
        let (xs, ys, zs) = (self.grid.xs(), self.grid.ys(), self.grid.zs());
        let fill_value = self.config.fill_value;
        let n = out.len();

        // One row per layer, one column per observation point
        let fit_layer = |k: usize| -> Vec<T> {
            trace!(layer = k, "fitting layer");
            let vals = self.grid.layer(k);
            let surface = BicubicRectilinear::fit(xs, ys, &vals, fill_value);
            (0..n).map(|i| surface.interp_one(x[i], y[i])).collect()
        };

        #[cfg(feature = "parallel")]
        let layers: Vec<Vec<T>> = (0..zs.len()).into_par_iter().map(fit_layer).collect();
        #[cfg(not(feature = "parallel"))]
        let layers: Vec<Vec<T>> = (0..zs.len()).map(fit_layer).collect();

        // Each point's column of layer values is its profile along z
        let along_z = |(i, v): (usize, &mut T)| {
            if !self.grid.contains(x[i], y[i], z[i]) {
                *v = fill_value;
                return;
            }
            let profile: Vec<T> = layers.iter().map(|row| row[i]).collect();
            *v = CubicSpline1D::fit(zs, &profile, fill_value).eval_one(z[i]);
        };

        #[cfg(feature = "parallel")]
        out.par_iter_mut().enumerate().for_each(along_z);
        #[cfg(not(feature = "parallel"))]
        out.iter_mut().enumerate().for_each(along_z);
    }
}

/// Evaluate hybrid spline interpolation on a 3D rectilinear grid, with default options.
/// Assumes C-style ordering of vals (v(x0, y0, z0), v(x0, y0, z1), ..., v(x0, y1, z0), ...).
///
/// # Errors
/// * If the grid is invalid (see [`RectilinearGrid3D::new`])
/// * If there are not exactly 3 grids or 3 observation coordinate slices
/// * If the observation slices and `out` differ in length
pub fn interpn<T: Float + Send + Sync>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
    out: &mut [T],
) -> Result<(), Error> {
    if grids.len() != 3 {
        return Err(Error::DimensionMismatch {
            expected: 3,
            found: grids.len(),
        });
    }
    Spline3D::new(grids[0], grids[1], grids[2], vals, Spline3DConfig::default())?
        .interp(obs, out)
}

/// Evaluate interpolant, allocating a new Vec for the output.
///
/// For best results, use the `interpn` function with preallocated output;
/// allocation has a significant performance cost, and should be used sparingly.
pub fn interpn_alloc<T: Float + Send + Sync>(
    grids: &[&[T]],
    vals: &[T],
    obs: &[&[T]],
) -> Result<Vec<T>, Error> {
    let n = obs.first().map_or(0, |x| x.len());
    let mut out = vec![T::zero(); n];
    interpn(grids, vals, obs, &mut out)?;
    Ok(out)
}

/// Evaluate hybrid spline interpolation at a list of `[x, y, z]` points.
/// The output is in the same order as the points.
///
/// # Errors
/// * If the grid is invalid (see [`RectilinearGrid3D::new`])
/// * If there are not exactly 3 grids
/// * If `config.thin_layer` is not a valid z index
pub fn interpolate<T: Float + Send + Sync>(
    grids: &[&[T]],
    vals: &[T],
    points: &[[T; 3]],
    config: Spline3DConfig<T>,
) -> Result<Vec<T>, Error> {
    if grids.len() != 3 {
        return Err(Error::DimensionMismatch {
            expected: 3,
            found: grids.len(),
        });
    }
    let interpolator = Spline3D::new(grids[0], grids[1], grids[2], vals, config)?;

    let obs_t: Vec<Vec<T>> = (0..3)
        .map(|d| points.iter().map(|p| p[d]).collect())
        .collect(); // transpose
    let obs: Vec<&[T]> = obs_t.iter().map(|x| &x[..]).collect();
    let mut out = vec![T::zero(); points.len()];
    interpolator.interp(&obs, &mut out)?;

    Ok(out)
}

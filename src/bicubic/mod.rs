//! Bicubic spline interpolation on a 2D rectilinear grid.
//!
//! The interpolant is the tensor product of two not-a-knot cubic splines,
//! one along each axis. It passes exactly through every grid value and has
//! continuous first and second derivatives across cell boundaries.
//!
//! Unlike the local Hermite methods, the slopes here come out of a global
//! solve along every grid line, so each observation point depends on every
//! value in the layer. In exchange, the fit is done once per grid in O(nx * ny)
//! and each evaluation only touches the 4 corners of one cell:
//! * A 1D spline along y through each x-row gives `df/dy` at every node
//! * A 1D spline along x through each y-column gives `df/dx` at every node
//! * A 1D spline along x through each y-column of `df/dy` gives `d2f/dxdy`
//!
//! Value, both first derivatives and the cross derivative at the 4 corners fix
//! the bicubic patch, which is then evaluated as nested Hermite polynomials.
//!
//! Axes with fewer than 4 entries degrade along that axis only, to a parabola
//! for 3 entries and to linear for 2.
//!
//! Observation points outside the closed rectangle of the grid return the fill value.
pub mod rectilinear;

pub use rectilinear::BicubicRectilinear;

//! Cubic interpolation of scattered 2D samples.
//!
//! The samples are triangulated with a Delaunay triangulation, gradients are estimated at every
//! vertex by minimizing the curvature along all edges and each triangle is turned into a
//! Clough-Tocher macro patch. The resulting surface is C1 continuous, passes through every sample
//! and is undefined outside the convex hull of the samples.

mod clough_tocher;
mod delaunay;
mod gradient;

pub use clough_tocher::CloughTocher;
pub use delaunay::Delaunay;

/// Minimum number of distinct sample locations for a cubic interpolant.
pub const MIN_POINTS: usize = 4;

#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum Error {
	#[error("{points} points but {values} values")]
	LengthMismatch { points: usize, values: usize },

	#[error("Sample {index} is not finite")]
	NonFinite { index: usize },

	#[error("At least {required} distinct points are required, found {found}")]
	NotEnoughPoints { found: usize, required: usize },

	#[error("Points are collinear, no triangulation exists")]
	Collinear,

	#[error("Point coordinates span a range that cannot be represented")]
	Extent,

	#[error("Gradient estimation is singular")]
	Singular,
}

use interpolation::CloughTocher;
use nalgebra as na;

use crate::{Error, GridSpec, HeightGrid, SamplePoint, TankGeometry};

/// Interpolate the samples onto a regular grid over the tank and undefine every cell outside the
/// tank footprint.
///
/// All samples feed the interpolant, also those outside of the tank, the footprint is only applied
/// to the result. Cells outside the convex hull of the samples stay undefined.
pub fn interpolate(samples: &[SamplePoint], geometry: &TankGeometry, grid: &GridSpec) -> Result<HeightGrid, Error> {
	let points = samples.iter().map(SamplePoint::position).collect::<Vec<_>>();
	let values = samples.iter().map(|sample| sample.z).collect::<Vec<_>>();
	let interpolant = CloughTocher::new(&points, &values)?;
	log::debug!(
		"Triangulated {} samples into {} triangles",
		interpolant.len(),
		interpolant.delaunay().triangles().len()
	);

	let axis = grid.axis(geometry.radius());
	let mut heights = HeightGrid::from_fn(axis.clone(), axis, |x, y| interpolant.evaluate(na::point![x, y]));
	heights.mask(geometry.radius());

	let (rows, columns) = heights.shape();
	if heights.is_blank() {
		log::warn!("No grid cell has a height, the samples do not cover the tank");
	} else {
		log::info!(
			"Interpolated {} of {} cells",
			heights.defined(),
			rows * columns
		);
	}
	Ok(heights)
}

use nalgebra as na;

use crate::{Delaunay, Error};

const MAX_ITERATIONS: usize = 400;
const TOLERANCE: f64 = 1e-6;

/// Gradients at every vertex in triangulation coordinates, chosen to minimize the second derivative along all edges
/// (Nielson's global minimum norm network, 1983).
///
/// Solved with Gauss-Seidel sweeps, one 2x2 system per vertex.
/// Not converging is only a warning, the last estimate is still usable.
pub fn estimate(delaunay: &Delaunay, values: &[f64]) -> Result<Vec<na::Vector2<f64>>, Error> {
	let points = delaunay.points();
	let mut gradients = vec![na::Vector2::zeros(); points.len()];

	for iteration in 0..MAX_ITERATIONS {
		let mut error = 0.0f64;
		for (index, neighbors) in delaunay.vertex_neighbors().iter().enumerate() {
			if neighbors.is_empty() {
				continue;
			}
			let mut q = na::Matrix2::zeros();
			let mut s = na::Vector2::zeros();
			for &other in neighbors {
				let edge = points[other] - points[index];
				let length_cubed = edge.norm().powi(3);
				let derivative = -edge.dot(&gradients[other]);

				q += edge * edge.transpose() * (4.0 / length_cubed);
				s += edge * ((6.0 * (values[index] - values[other]) - 2.0 * derivative) / length_cubed);
			}

			let r = q.try_inverse().ok_or(Error::Singular)? * s;
			if r.iter().any(|v| !v.is_finite()) {
				return Err(Error::Singular);
			}
			let change = (gradients[index] + r).amax() / r.amax().max(1.0);
			gradients[index] = -r;
			error = error.max(change);
		}

		if error < TOLERANCE {
			log::debug!("Gradients converged after {} iterations", iteration + 1);
			return Ok(gradients);
		}
	}

	log::warn!(
		"Gradient estimation did not converge after {} iterations, results may be inaccurate",
		MAX_ITERATIONS
	);
	Ok(gradients)
}

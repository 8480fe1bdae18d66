use std::collections::{hash_map::Entry, HashMap};

use nalgebra as na;

use crate::{delaunay::Transform, gradient, Delaunay, Error, MIN_POINTS};

/// Piecewise cubic C1 interpolant over scattered 2D points.
///
/// Every Delaunay triangle is split at its centroid into three cubic Bézier patches. The
/// inner control points are chosen so the derivative across every edge varies linearly, which
/// makes neighboring triangles join smoothly.
#[derive(Debug, Clone)]
pub struct CloughTocher {
	delaunay: Delaunay,
	values: Vec<f64>,
	patches: Vec<Option<Patch>>,
}

impl CloughTocher {
	/// Fit the interpolant. Repeated locations keep the first value.
	pub fn new(points: &[na::Point2<f64>], values: &[f64]) -> Result<Self, Error> {
		if points.len() != values.len() {
			return Err(Error::LengthMismatch { points: points.len(), values: values.len() });
		}
		if let Some(index) = points
			.iter()
			.zip(values)
			.position(|(p, v)| !(p.x.is_finite() && p.y.is_finite() && v.is_finite()))
		{
			return Err(Error::NonFinite { index });
		}

		let (points, values) = distinct(points, values);
		if points.len() < MIN_POINTS {
			return Err(Error::NotEnoughPoints { found: points.len(), required: MIN_POINTS });
		}

		let delaunay = Delaunay::new(&points)?;
		let gradients = gradient::estimate(&delaunay, &values)?;
		let patches = (0..delaunay.triangles().len())
			.map(|triangle| Patch::new(&delaunay, triangle, &values, &gradients))
			.collect();

		Ok(Self { delaunay, values, patches })
	}

	/// Interpolated value, `None` outside the convex hull of the points.
	pub fn evaluate(&self, point: na::Point2<f64>) -> Option<f64> {
		let (triangle, barycentric) = self.delaunay.locate(point)?;
		let patch = self.patches[triangle].as_ref()?;
		Some(patch.evaluate(barycentric))
	}

	/// Number of distinct points used by the interpolant.
	pub fn len(&self) -> usize {
		self.values.len()
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty()
	}

	pub fn delaunay(&self) -> &Delaunay {
		&self.delaunay
	}
}

fn distinct(points: &[na::Point2<f64>], values: &[f64]) -> (Vec<na::Point2<f64>>, Vec<f64>) {
	let mut seen = HashMap::new();
	let mut unique_points = Vec::with_capacity(points.len());
	let mut unique_values = Vec::with_capacity(values.len());
	for (index, (&point, &value)) in points.iter().zip(values).enumerate() {
		// +0.0 so that -0.0 and 0.0 share a key
		let key = ((point.x + 0.0).to_bits(), (point.y + 0.0).to_bits());
		match seen.entry(key) {
			Entry::Vacant(entry) => {
				entry.insert(index);
				unique_points.push(point);
				unique_values.push(value);
			},
			Entry::Occupied(entry) => {
				log::warn!(
					"Point {} at ({}, {}) repeats point {}, value {} is ignored",
					index,
					point.x,
					point.y,
					entry.get(),
					value
				);
			},
		}
	}
	(unique_points, unique_values)
}

/// Bézier control net of one split triangle, `cIJKL` is the coefficient of `b1^I b2^J b3^K b4^L`
/// where `b4` belongs to the centroid.
#[derive(Debug, Clone, Copy)]
struct Patch {
	c3000: f64,
	c0300: f64,
	c0030: f64,
	c2100: f64,
	c2010: f64,
	c1200: f64,
	c0210: f64,
	c1020: f64,
	c0120: f64,
	c2001: f64,
	c0201: f64,
	c0021: f64,
	c1101: f64,
	c1011: f64,
	c0111: f64,
	c1002: f64,
	c0102: f64,
	c0012: f64,
	c0003: f64,
}

impl Patch {
	fn new(delaunay: &Delaunay, triangle: usize, values: &[f64], gradients: &[na::Vector2<f64>]) -> Option<Self> {
		let transform = delaunay.transform(triangle)?;
		let [v1, v2, v3] = delaunay.triangles()[triangle];
		let points = delaunay.points();

		let e12 = points[v2] - points[v1];
		let e23 = points[v3] - points[v2];
		let e31 = points[v1] - points[v3];

		let (f1, f2, f3) = (values[v1], values[v2], values[v3]);
		let (d1, d2, d3) = (gradients[v1], gradients[v2], gradients[v3]);

		let df12 = d1.dot(&e12);
		let df21 = -d2.dot(&e12);
		let df23 = d2.dot(&e23);
		let df32 = -d3.dot(&e23);
		let df31 = d3.dot(&e31);
		let df13 = -d1.dot(&e31);

		let c3000 = f1;
		let c2100 = (df12 + 3.0 * c3000) / 3.0;
		let c2010 = (df13 + 3.0 * c3000) / 3.0;
		let c0300 = f2;
		let c1200 = (df21 + 3.0 * c0300) / 3.0;
		let c0210 = (df23 + 3.0 * c0300) / 3.0;
		let c0030 = f3;
		let c1020 = (df31 + 3.0 * c0030) / 3.0;
		let c0120 = (df32 + 3.0 * c0030) / 3.0;

		let c2001 = (c2100 + c2010 + c3000) / 3.0;
		let c0201 = (c1200 + c0300 + c0210) / 3.0;
		let c0021 = (c1020 + c0120 + c0030) / 3.0;

		let g = edge_factors(delaunay, triangle, transform);

		let c0111 = (g[0] * (-c0300 + 3.0 * c0210 - 3.0 * c0120 + c0030)
			+ (-c0300 + 2.0 * c0210 - c0120 + c0021 + c0201))
			/ 2.0;
		let c1011 = (g[1] * (-c0030 + 3.0 * c1020 - 3.0 * c2010 + c3000)
			+ (-c0030 + 2.0 * c1020 - c2010 + c2001 + c0021))
			/ 2.0;
		let c1101 = (g[2] * (-c3000 + 3.0 * c2100 - 3.0 * c1200 + c0300)
			+ (-c3000 + 2.0 * c2100 - c1200 + c2001 + c0201))
			/ 2.0;

		let c1002 = (c1101 + c1011 + c2001) / 3.0;
		let c0102 = (c1101 + c0111 + c0201) / 3.0;
		let c0012 = (c1011 + c0111 + c0021) / 3.0;

		let c0003 = (c1002 + c0102 + c0012) / 3.0;

		Some(Self {
			c3000,
			c0300,
			c0030,
			c2100,
			c2010,
			c1200,
			c0210,
			c1020,
			c0120,
			c2001,
			c0201,
			c0021,
			c1101,
			c1011,
			c0111,
			c1002,
			c0102,
			c0012,
			c0003,
		})
	}

	fn evaluate(&self, barycentric: [f64; 3]) -> f64 {
		// sub triangle coordinates, the smallest coordinate moves to the centroid
		let min = barycentric[0].min(barycentric[1]).min(barycentric[2]);
		let b1 = barycentric[0] - min;
		let b2 = barycentric[1] - min;
		let b3 = barycentric[2] - min;
		let b4 = 3.0 * min;

		// one of b1, b2, b3 is zero, so the b1 b2 b3 terms are left out
		b1.powi(3) * self.c3000
			+ 3.0 * b1.powi(2) * b2 * self.c2100
			+ 3.0 * b1.powi(2) * b3 * self.c2010
			+ 3.0 * b1.powi(2) * b4 * self.c2001
			+ 3.0 * b1 * b2.powi(2) * self.c1200
			+ 6.0 * b1 * b2 * b4 * self.c1101
			+ 3.0 * b1 * b3.powi(2) * self.c1020
			+ 6.0 * b1 * b3 * b4 * self.c1011
			+ 3.0 * b1 * b4.powi(2) * self.c1002
			+ b2.powi(3) * self.c0300
			+ 3.0 * b2.powi(2) * b3 * self.c0210
			+ 3.0 * b2.powi(2) * b4 * self.c0201
			+ 3.0 * b2 * b3.powi(2) * self.c0120
			+ 6.0 * b2 * b3 * b4 * self.c0111
			+ 3.0 * b2 * b4.powi(2) * self.c0102
			+ b3.powi(3) * self.c0030
			+ 3.0 * b3.powi(2) * b4 * self.c0021
			+ 3.0 * b3 * b4.powi(2) * self.c0012
			+ b4.powi(3) * self.c0003
	}
}

/// Direction factors for the cross boundary derivative of each edge. Interior edges use the
/// centroid of the neighbor, so both sides agree on the derivative. Hull edges use the edge normal.
fn edge_factors(delaunay: &Delaunay, triangle: usize, transform: &Transform) -> [f64; 3] {
	let neighbors = delaunay.neighbors(triangle);
	std::array::from_fn(|k| {
		let Some(neighbor) = neighbors[k] else {
			return -0.5;
		};
		let c = transform.barycentric(delaunay.centroid(neighbor));
		let (a, b) = match k {
			0 => (c[2], c[1]),
			1 => (c[0], c[2]),
			_ => (c[1], c[0]),
		};
		(2.0 * a + b - 1.0) / (2.0 - 3.0 * a - 3.0 * b)
	})
}

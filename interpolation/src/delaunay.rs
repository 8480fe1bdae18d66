use nalgebra as na;
use voronator::delaunator;

use crate::Error;

/// Tolerance for barycentric coordinates, points this far outside a triangle still count as inside.
const EPSILON: f64 = 100.0 * f64::EPSILON;

#[derive(Debug, Clone, Copy)]
pub struct Transform {
	inverse: na::Matrix2<f64>,
	offset: na::Point2<f64>,
}

impl Transform {
	fn new(a: na::Point2<f64>, b: na::Point2<f64>, c: na::Point2<f64>) -> Option<Self> {
		let inverse = na::Matrix2::from_columns(&[a - c, b - c]).try_inverse()?;
		inverse
			.iter()
			.all(|v| v.is_finite())
			.then_some(Self { inverse, offset: c })
	}

	/// Barycentric coordinates, the last vertex is the offset.
	pub fn barycentric(&self, point: na::Point2<f64>) -> [f64; 3] {
		let c = self.inverse * (point - self.offset);
		[c.x, c.y, 1.0 - c.x - c.y]
	}
}

/// Triangulation of points moved to the center of their bounding box and scaled to unit extent.
#[derive(Debug, Clone)]
pub struct Delaunay {
	center: na::Point2<f64>,
	scale: f64,
	points: Vec<na::Point2<f64>>,
	triangles: Vec<[usize; 3]>,
	// neighbor `k` is opposite of vertex `k`
	neighbors: Vec<[Option<usize>; 3]>,
	transforms: Vec<Option<Transform>>,
	vertex_neighbors: Vec<Vec<usize>>,
}

impl Delaunay {
	pub fn new(points: &[na::Point2<f64>]) -> Result<Self, Error> {
		if points.len() < 3 {
			return Err(Error::NotEnoughPoints { found: points.len(), required: 3 });
		}

		let (min, max) = points.iter().skip(1).fold((points[0], points[0]), |(min, max), p| {
			(min.inf(p), max.sup(p))
		});
		let scale = (max - min).amax();
		if !(scale.is_finite() && scale > 0.0) {
			return Err(Error::Extent);
		}
		let center = min + (max - min) * 0.5;
		let points = points
			.iter()
			.map(|&p| na::Point2::from((p - center) / scale))
			.collect::<Vec<_>>();

		let input = points
			.iter()
			.map(|p| delaunator::Point { x: p.x, y: p.y })
			.collect::<Vec<_>>();
		let triangulation = delaunator::triangulate(&input).ok_or(Error::Collinear)?;

		let triangles = triangulation
			.triangles
			.chunks_exact(3)
			.map(|t| [t[0], t[1], t[2]])
			.collect::<Vec<_>>();

		// hull edges have no opposite half edge and are marked with an out of range index
		let halfedges = &triangulation.halfedges;
		let neighbors = (0..triangles.len())
			.map(|triangle| {
				std::array::from_fn(|k| {
					let opposite = halfedges[3 * triangle + (k + 1) % 3];
					(opposite < halfedges.len()).then_some(opposite / 3)
				})
			})
			.collect::<Vec<_>>();

		let transforms = triangles
			.iter()
			.map(|&[a, b, c]| Transform::new(points[a], points[b], points[c]))
			.collect::<Vec<_>>();
		if transforms.iter().all(Option::is_none) {
			return Err(Error::Collinear);
		}

		let mut vertex_neighbors = vec![Vec::new(); points.len()];
		for &[a, b, c] in &triangles {
			for (from, to) in [(a, b), (b, c), (c, a)] {
				vertex_neighbors[from].push(to);
				vertex_neighbors[to].push(from);
			}
		}
		for neighbors in vertex_neighbors.iter_mut() {
			neighbors.sort_unstable();
			neighbors.dedup();
		}

		Ok(Self {
			center,
			scale,
			points,
			triangles,
			neighbors,
			transforms,
			vertex_neighbors,
		})
	}

	/// Points in triangulation coordinates.
	pub fn points(&self) -> &[na::Point2<f64>] {
		&self.points
	}

	/// Length of one unit in triangulation coordinates.
	pub fn scale(&self) -> f64 {
		self.scale
	}

	pub fn to_local(&self, point: na::Point2<f64>) -> na::Point2<f64> {
		na::Point2::from((point - self.center) / self.scale)
	}

	pub fn triangles(&self) -> &[[usize; 3]] {
		&self.triangles
	}

	pub fn neighbors(&self, triangle: usize) -> [Option<usize>; 3] {
		self.neighbors[triangle]
	}

	pub fn transform(&self, triangle: usize) -> Option<&Transform> {
		self.transforms[triangle].as_ref()
	}

	/// Vertices sharing an edge with each vertex. Empty for points dropped by the triangulation.
	pub fn vertex_neighbors(&self) -> &[Vec<usize>] {
		&self.vertex_neighbors
	}

	pub fn centroid(&self, triangle: usize) -> na::Point2<f64> {
		let [a, b, c] = self.triangles[triangle];
		na::Point2::from((self.points[a].coords + self.points[b].coords + self.points[c].coords) / 3.0)
	}

	/// Triangle containing `point` and the barycentric coordinates inside it.
	pub fn locate(&self, point: na::Point2<f64>) -> Option<(usize, [f64; 3])> {
		let point = self.to_local(point);
		self.transforms
			.iter()
			.enumerate()
			.filter_map(|(index, transform)| Some((index, transform.as_ref()?.barycentric(point))))
			.find(|(_, c)| c.iter().all(|&v| v >= -EPSILON))
	}
}

use crate::Error;

/// Circular tank footprint centered at the origin and the vertical range shown in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TankGeometry {
	radius: f64,
	pub z_bottom: f64,
	pub z_top: f64,
}

impl TankGeometry {
	pub fn new(radius: f64, z_bottom: f64, z_top: f64) -> Result<Self, Error> {
		if !(radius.is_finite() && radius > 0.0) {
			return Err(Error::InvalidRadius(radius));
		}
		if z_top <= z_bottom {
			log::warn!("Tank top {} is not above the bottom {}", z_top, z_bottom);
		}
		Ok(Self { radius, z_bottom, z_top })
	}

	pub fn radius(&self) -> f64 {
		self.radius
	}

	pub fn contains(&self, x: f64, y: f64) -> bool {
		x * x + y * y <= self.radius * self.radius
	}
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
	resolution: usize,
}

impl GridSpec {
	/// Smallest resolution offered to users.
	pub const MIN: usize = 10;
	/// Largest resolution offered to users.
	pub const MAX: usize = 100;

	pub fn new(resolution: usize) -> Result<Self, Error> {
		if resolution == 0 {
			return Err(Error::InvalidResolution(resolution));
		}
		Ok(Self { resolution })
	}

	pub fn resolution(&self) -> usize {
		self.resolution
	}

	/// `resolution` evenly spaced values from `-radius` to `radius`, both included.
	/// A single value sits at `-radius`.
	pub fn axis(&self, radius: f64) -> Vec<f64> {
		if self.resolution == 1 {
			return vec![-radius];
		}
		let step = 2.0 * radius / (self.resolution - 1) as f64;
		(0..self.resolution)
			.map(|index| match index {
				i if i + 1 == self.resolution => radius,
				i => -radius + i as f64 * step,
			})
			.collect()
	}
}

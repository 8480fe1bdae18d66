use nalgebra as na;
use serde::Serialize;

use crate::{HeightGrid, SamplePoint, TankGeometry};

/// Height of a label above its sample.
pub const LABEL_OFFSET: f64 = 0.2;
/// Distance of the camera eye from the scene center, in scene units.
pub const EYE_DISTANCE: f64 = 2.0;

pub const WIDTH: u32 = 950;
pub const HEIGHT: u32 = 700;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl std::fmt::Display for Rgb {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "#{:02x}{:02x}{:02x}", self.0, self.1, self.2)
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
	pub position: f64,
	pub color: Rgb,
}

/// Colors for relative heights between 0 and 1.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorScale {
	stops: Vec<ColorStop>,
}

impl ColorScale {
	/// Low to high accumulation: dark blue, sky blue, yellow, red.
	pub fn sludge() -> Self {
		Self {
			stops: vec![
				ColorStop { position: 0.0, color: Rgb(0x00, 0x00, 0x8b) },
				ColorStop { position: 0.2, color: Rgb(0x00, 0xbf, 0xff) },
				ColorStop { position: 0.8, color: Rgb(0xff, 0xff, 0x00) },
				ColorStop { position: 1.0, color: Rgb(0xff, 0x00, 0x00) },
			],
		}
	}

	pub fn stops(&self) -> &[ColorStop] {
		&self.stops
	}
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
	pub eye: na::Point3<f64>,
}

impl Camera {
	/// Eye on a sphere around the scene, `elevation` above the floor and `azimuth` around the
	/// vertical axis, both in degrees.
	pub fn from_angles(elevation: f64, azimuth: f64) -> Self {
		let (elevation, azimuth) = (elevation.to_radians(), azimuth.to_radians());
		let eye = na::point![
			elevation.cos() * azimuth.cos(),
			elevation.cos() * azimuth.sin(),
			elevation.sin()
		] * EYE_DISTANCE;
		Self { eye }
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Axis {
	pub title: String,
	pub range: [f64; 2],
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
	pub size: u32,
	pub color: String,
	pub family: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Label {
	/// Index of the sample in input order.
	pub sample: usize,
	pub position: na::Point3<f64>,
	pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
	pub grid: HeightGrid,
	pub color_scale: ColorScale,
	pub color_bar_title: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SceneOptions {
	pub title: String,
	pub labels: bool,
	pub camera: Camera,
}

/// Everything an external renderer needs for the tank surface.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneDescription {
	pub title: String,
	pub surface: Surface,
	pub labels: Vec<Label>,
	pub label_font: Font,
	pub x_axis: Axis,
	pub y_axis: Axis,
	pub z_axis: Axis,
	pub camera: Camera,
	pub width: u32,
	pub height: u32,
}

/// Build the scene for an interpolated grid.
///
/// The horizontal axes run from `radius` to `-radius`. Labels are only created for samples inside
/// the tank, named by their position in the input.
pub fn compose_scene(
	grid: HeightGrid,
	samples: &[SamplePoint],
	geometry: &TankGeometry,
	options: &SceneOptions,
) -> SceneDescription {
	let radius = geometry.radius();

	let labels = if options.labels {
		samples
			.iter()
			.enumerate()
			.filter(|(_, sample)| geometry.contains(sample.x, sample.y))
			.map(|(index, sample)| Label {
				sample: index,
				position: na::point![sample.x, sample.y, sample.z + LABEL_OFFSET],
				text: format!("A{}", index + 1),
			})
			.collect()
	} else {
		Vec::new()
	};
	let skipped = samples.iter().filter(|s| !geometry.contains(s.x, s.y)).count();
	if skipped > 0 {
		log::info!("{} samples outside of the tank are not labeled", skipped);
	}

	SceneDescription {
		title: options.title.clone(),
		surface: Surface {
			grid,
			color_scale: ColorScale::sludge(),
			color_bar_title: String::from("Sludge height (m)"),
		},
		labels,
		label_font: Font {
			size: 12,
			color: String::from("black"),
			family: String::from("Arial"),
		},
		x_axis: Axis { title: String::from("X (m)"), range: [radius, -radius] },
		y_axis: Axis { title: String::from("Y (m)"), range: [radius, -radius] },
		z_axis: Axis {
			title: String::from("Height Z (m)"),
			range: [geometry.z_bottom, geometry.z_top],
		},
		camera: options.camera,
		width: WIDTH,
		height: HEIGHT,
	}
}

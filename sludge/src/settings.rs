use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{Camera, Error, GridSpec, SceneOptions, TankGeometry};

/// Parameters of one run, read once and passed down unchanged.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
	/// Tank name, used as scene title
	pub name: String,
	/// Tank radius in meters
	pub radius: f64,
	/// Grid points per axis
	pub resolution: usize,
	/// Camera elevation in degrees
	pub elevation: f64,
	/// Camera azimuth in degrees
	pub azimuth: f64,
	/// Tank bottom height in meters
	pub z_bottom: f64,
	/// Tank top height in meters
	pub z_top: f64,
	/// Show sample labels
	pub labels: bool,
}

impl Default for Settings {
	fn default() -> Self {
		Self {
			name: String::from("S602 sludge distribution"),
			radius: 45.73,
			resolution: 50,
			elevation: 45.0,
			azimuth: 270.0,
			z_bottom: 0.0,
			z_top: 3.5,
			labels: true,
		}
	}
}

impl Settings {
	pub fn from_file(path: impl AsRef<Path>) -> Result<Self, Error> {
		let file = File::open(path)?;
		Ok(serde_json::from_reader(BufReader::new(file))?)
	}

	/// Defaults, replaced by the config file if given, replaced by the command line overrides.
	pub fn load(config: Option<&Path>, overrides: &Overrides) -> Result<Self, Error> {
		let settings = match config {
			Some(path) => Self::from_file(path)?,
			None => Self::default(),
		};
		let settings = overrides.apply(settings);
		settings.validate()?;
		Ok(settings)
	}

	pub fn validate(&self) -> Result<(), Error> {
		self.geometry()?;
		if !(GridSpec::MIN..=GridSpec::MAX).contains(&self.resolution) {
			return Err(Error::InvalidSetting(format!(
				"resolution {} is outside of {}..={}",
				self.resolution,
				GridSpec::MIN,
				GridSpec::MAX
			)));
		}
		if !(0.0..=90.0).contains(&self.elevation) {
			return Err(Error::InvalidSetting(format!(
				"elevation {} is outside of 0..=90 degrees",
				self.elevation
			)));
		}
		if !(0.0..=360.0).contains(&self.azimuth) {
			return Err(Error::InvalidSetting(format!(
				"azimuth {} is outside of 0..=360 degrees",
				self.azimuth
			)));
		}
		Ok(())
	}

	pub fn geometry(&self) -> Result<TankGeometry, Error> {
		TankGeometry::new(self.radius, self.z_bottom, self.z_top)
	}

	pub fn grid(&self) -> Result<GridSpec, Error> {
		GridSpec::new(self.resolution)
	}

	pub fn scene_options(&self) -> SceneOptions {
		SceneOptions {
			title: self.name.clone(),
			labels: self.labels,
			camera: Camera::from_angles(self.elevation, self.azimuth),
		}
	}
}

/// Command line values that replace the configured settings.
#[derive(clap::Args, Debug, Clone, Default)]
pub struct Overrides {
	/// Tank name, used as scene title [default: S602 sludge distribution]
	#[arg(long)]
	name: Option<String>,

	/// Tank radius in meters [default: 45.73]
	#[arg(long)]
	radius: Option<f64>,

	/// Grid points per axis [default: 50]
	#[arg(long, value_parser = clap::value_parser!(u32).range(10..=100))]
	resolution: Option<u32>,

	/// Camera elevation in degrees [default: 45]
	#[arg(long)]
	elevation: Option<f64>,

	/// Camera azimuth in degrees [default: 270]
	#[arg(long)]
	azimuth: Option<f64>,

	/// Tank bottom height in meters [default: 0]
	#[arg(long, allow_negative_numbers = true)]
	z_bottom: Option<f64>,

	/// Tank top height in meters [default: 3.5]
	#[arg(long, allow_negative_numbers = true)]
	z_top: Option<f64>,

	/// Show sample labels [default: true]
	#[arg(long)]
	labels: Option<bool>,
}

impl Overrides {
	pub fn apply(&self, settings: Settings) -> Settings {
		Settings {
			name: self.name.clone().unwrap_or(settings.name),
			radius: self.radius.unwrap_or(settings.radius),
			resolution: self.resolution.map_or(settings.resolution, |r| r as usize),
			elevation: self.elevation.unwrap_or(settings.elevation),
			azimuth: self.azimuth.unwrap_or(settings.azimuth),
			z_bottom: self.z_bottom.unwrap_or(settings.z_bottom),
			z_top: self.z_top.unwrap_or(settings.z_top),
			labels: self.labels.unwrap_or(settings.labels),
		}
	}
}

#[cfg(test)]
mod tests {
	use std::io::Write;

	use clap::Parser;

	use super::*;

	#[derive(clap::Parser)]
	struct Test {
		#[command(flatten)]
		overrides: Overrides,
	}

	fn overrides(args: &[&str]) -> Overrides {
		Test::try_parse_from(std::iter::once("test").chain(args.iter().copied()))
			.unwrap()
			.overrides
	}

	#[test]
	fn defaults_are_valid() {
		let settings = Settings::load(None, &Overrides::default()).unwrap();
		assert_eq!(settings, Settings::default());
		assert_eq!(settings.geometry().unwrap().radius(), 45.73);
		assert_eq!(settings.grid().unwrap().resolution(), 50);
	}

	#[test]
	fn command_line_replaces_config() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "name": "T-1", "radius": 12.0, "resolution": 20 }}"#).unwrap();

		let overrides = overrides(&["--radius", "15", "--z-bottom", "-1.5", "--labels", "false"]);
		let settings = Settings::load(Some(file.path()), &overrides).unwrap();
		assert_eq!(settings.name, "T-1");
		assert_eq!(settings.radius, 15.0);
		assert_eq!(settings.resolution, 20);
		assert_eq!(settings.z_bottom, -1.5);
		assert_eq!(settings.z_top, 3.5);
		assert!(!settings.labels);
	}

	#[test]
	fn resolution_is_bounded() {
		assert!(Test::try_parse_from(["test", "--resolution", "9"]).is_err());
		assert!(Test::try_parse_from(["test", "--resolution", "101"]).is_err());
		assert_eq!(overrides(&["--resolution", "100"]).resolution, Some(100));

		let settings = Settings { resolution: 5, ..Settings::default() };
		assert!(matches!(settings.validate(), Err(Error::InvalidSetting(_))));
	}

	#[test]
	fn invalid_values() {
		let settings = Settings { radius: 0.0, ..Settings::default() };
		assert!(matches!(settings.validate(), Err(Error::InvalidRadius(_))));
		let settings = Settings { elevation: 91.0, ..Settings::default() };
		assert!(matches!(settings.validate(), Err(Error::InvalidSetting(_))));
		let settings = Settings { azimuth: -1.0, ..Settings::default() };
		assert!(matches!(settings.validate(), Err(Error::InvalidSetting(_))));
	}

	#[test]
	fn unknown_config_fields_are_rejected() {
		let mut file = tempfile::NamedTempFile::new().unwrap();
		write!(file, r#"{{ "radius": 12.0, "colour": "red" }}"#).unwrap();
		assert!(matches!(Settings::from_file(file.path()), Err(Error::Json(_))));
	}
}

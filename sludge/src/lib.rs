mod engine;
mod geometry;
mod grid;
mod plotly;
mod sample;
mod scene;
mod session;
mod settings;
mod workbook;

use std::path::{Path, PathBuf};

pub use engine::interpolate;
pub use geometry::{GridSpec, TankGeometry};
pub use grid::HeightGrid;
pub use sample::{Ranges, SamplePoint, SampleTable, MANUAL_ROWS};
pub use scene::{
	compose_scene, Axis, Camera, ColorScale, ColorStop, Font, Label, Rgb, SceneDescription, SceneOptions, Surface,
	LABEL_OFFSET,
};
pub use session::Session;
pub use settings::{Overrides, Settings};

#[derive(thiserror::Error, Debug)]
pub enum Error {
	#[error(transparent)]
	Io(#[from] std::io::Error),

	#[error("No header row with the columns X, Y and Z")]
	NoHeader,

	#[error("Missing column {0}")]
	MissingColumn(&'static str),

	#[error("Line {line}, column {column}: {message}")]
	Parse {
		line: usize,
		column: &'static str,
		message: String,
	},

	#[error("Row {row} does not exist, the table has rows 1 to {rows}")]
	RowOutOfRange { row: usize, rows: usize },

	#[error("Interpolation failed: {0}")]
	Interpolation(#[from] interpolation::Error),

	#[error("Tank radius must be positive, got {0}")]
	InvalidRadius(f64),

	#[error("Grid resolution must be at least 1, got {0}")]
	InvalidResolution(usize),

	#[error("Invalid setting: {0}")]
	InvalidSetting(String),

	#[error(transparent)]
	Json(#[from] serde_json::Error),

	#[error("Spreadsheet: {0}")]
	Workbook(#[from] calamine::Error),
}

impl Error {
	/// The input data could not be read, nothing was computed.
	pub fn is_input(&self) -> bool {
		matches!(
			self,
			Self::Io(_) | Self::NoHeader | Self::MissingColumn(_) | Self::Parse { .. } | Self::Workbook(_)
		)
	}
}

/// Where the scene is written and how it is configured.
#[derive(clap::Args, Debug, Clone)]
pub struct SceneArgs {
	/// Output file for the Plotly figure
	#[arg(long, short, default_value = "scene.json")]
	pub output: PathBuf,

	/// Additionally write a standalone HTML page
	#[arg(long)]
	pub html: Option<PathBuf>,

	/// JSON file with settings, command line values take precedence
	#[arg(long)]
	pub config: Option<PathBuf>,

	#[command(flatten)]
	pub overrides: Overrides,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
	/// Spreadsheet or delimited text file with the columns X, Y and Z
	pub input: PathBuf,

	#[command(flatten)]
	pub scene: SceneArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct SummaryArgs {
	/// Spreadsheet or delimited text file with the columns X, Y and Z
	pub input: PathBuf,
}

#[derive(clap::Args, Debug, Clone)]
pub struct TemplateArgs {
	/// Output file for the blank table
	#[arg(long, short, default_value = "samples.csv")]
	pub output: PathBuf,
}

/// Interpolate and compose the scene for one table.
pub fn pipeline(table: &SampleTable, settings: &Settings) -> Result<SceneDescription, Error> {
	let geometry = settings.geometry()?;
	let grid = settings.grid()?;
	log::info!(
		"Interpolating {} samples on a {}x{} grid, tank radius {}",
		table.len(),
		grid.resolution(),
		grid.resolution(),
		geometry.radius()
	);
	let heights = interpolate(table.samples(), &geometry, &grid)?;
	Ok(compose_scene(
		heights,
		table.samples(),
		&geometry,
		&settings.scene_options(),
	))
}

/// Run the pipeline and write the requested outputs.
pub fn render_table(table: &SampleTable, args: &SceneArgs) -> Result<SceneDescription, Error> {
	let settings = Settings::load(args.config.as_deref(), &args.overrides)?;
	if let Some(ranges) = table.ranges() {
		println!("Data range: {}", ranges);
	}
	let scene = pipeline(table, &settings)?;

	scene.save_json(&args.output)?;
	log::info!("Saved scene to {}", args.output.display());
	if let Some(html) = &args.html {
		scene.save_html(html)?;
		log::info!("Saved page to {}", html.display());
	}
	Ok(scene)
}

pub fn render(args: RenderArgs) -> Result<(), Error> {
	let table = SampleTable::from_path(&args.input)?;
	render_table(&table, &args.scene)?;
	Ok(())
}

pub fn summary(args: SummaryArgs) -> Result<(), Error> {
	let table = SampleTable::from_path(&args.input)?;
	print_summary(&table);
	Ok(())
}

pub fn template(args: TemplateArgs) -> Result<(), Error> {
	write_table(&SampleTable::manual(), &args.output)
}

pub fn print_summary(table: &SampleTable) {
	match table.ranges() {
		Some(ranges) => println!("{} samples, {}", table.len(), ranges),
		None => println!("No samples"),
	}
}

pub fn write_table(table: &SampleTable, path: &Path) -> Result<(), Error> {
	table.save(path)?;
	log::info!("Saved {} rows to {}", table.len(), path.display());
	Ok(())
}

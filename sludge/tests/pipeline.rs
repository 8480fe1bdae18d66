//! Sample table to scene, through files like the command line does.

use std::io::Write;

use rand::{rngs::StdRng, Rng, SeedableRng};
use sludge::{
	interpolate, pipeline, render_table, Error, GridSpec, HeightGrid, Overrides, SamplePoint, SampleTable, SceneArgs,
	Settings, TankGeometry,
};

fn samples() -> Vec<SamplePoint> {
	vec![
		SamplePoint::new(0.0, 0.0, 1.0),
		SamplePoint::new(10.0, 0.0, 1.5),
		SamplePoint::new(0.0, 10.0, 2.0),
		SamplePoint::new(-10.0, -10.0, 0.5),
	]
}

fn run(samples: &[SamplePoint], radius: f64, resolution: usize) -> HeightGrid {
	interpolate(
		samples,
		&TankGeometry::new(radius, 0.0, 3.5).unwrap(),
		&GridSpec::new(resolution).unwrap(),
	)
	.unwrap()
}

fn assert_masked(grid: &HeightGrid, radius: f64) {
	for (x, y, height) in grid.cells() {
		if x * x + y * y > radius * radius {
			assert_eq!(height, None, "cell ({}, {}) is outside of the tank", x, y);
		}
	}
}

#[test]
fn four_samples_in_tank() {
	let grid = run(&samples(), 20.0, 10);
	assert_eq!(grid.shape(), (10, 10));
	assert_masked(&grid, 20.0);

	// the four cells around the origin lie inside the convex hull
	for (x, y, height) in grid.cells() {
		if x.abs() < 3.0 && y.abs() < 3.0 {
			let height = height.unwrap();
			assert!((height - 1.0).abs() < 0.35, "height {} at ({}, {})", height, x, y);
		}
	}
	// corners are outside of the tank
	assert_eq!(grid.get(0, 0), None);
	assert_eq!(grid.get(9, 9), None);
}

#[test]
fn samples_on_grid_nodes() {
	// with 9 nodes the axis steps by 5 and every sample sits on a node
	let grid = run(&samples(), 20.0, 9);
	for sample in samples() {
		let column = grid.xs().iter().position(|&x| x == sample.x).unwrap();
		let row = grid.ys().iter().position(|&y| y == sample.y).unwrap();
		let height = grid.get(row, column).unwrap();
		assert!((height - sample.z).abs() < 1e-9, "{} != {}", height, sample.z);
	}
}

#[test]
fn identical_inputs_give_identical_grids() {
	assert_eq!(run(&samples(), 20.0, 25), run(&samples(), 20.0, 25));
}

#[test]
fn resolution_extremes() {
	let grid = run(&samples(), 20.0, 1);
	assert_eq!(grid.shape(), (1, 1));
	assert_eq!(grid.xs(), &[-20.0]);
	// (-20, -20) is outside of the tank
	assert!(grid.is_blank());

	let grid = run(&samples(), 20.0, 100);
	assert_eq!(grid.shape(), (100, 100));
	assert_masked(&grid, 20.0);
	assert!(grid.defined() > 0);
}

#[test]
fn too_few_samples() {
	let result = interpolate(
		&samples()[..3],
		&TankGeometry::new(20.0, 0.0, 3.5).unwrap(),
		&GridSpec::new(10).unwrap(),
	);
	assert!(matches!(result, Err(Error::Interpolation(_))));
}

#[test]
fn only_samples_inside_are_labeled() {
	let table = SampleTable::new(vec![
		SamplePoint::new(0.0, 0.0, 1.0),
		SamplePoint::new(100.0, 100.0, 1.0),
		SamplePoint::new(5.0, -5.0, 1.0),
		SamplePoint::new(-5.0, 3.0, 1.0),
	]);
	let settings = Settings { radius: 10.0, resolution: 10, ..Settings::default() };
	let scene = pipeline(&table, &settings).unwrap();
	let texts = scene.labels.iter().map(|label| label.text.as_str()).collect::<Vec<_>>();
	assert_eq!(texts, vec!["A1", "A3", "A4"]);

	let settings = Settings { labels: false, ..settings };
	assert!(pipeline(&table, &settings).unwrap().labels.is_empty());
}

#[test]
fn random_samples_stay_masked() {
	let mut rng = StdRng::seed_from_u64(602);
	for _ in 0..10 {
		let radius = rng.gen_range(5.0..50.0);
		let samples = (0..rng.gen_range(6..30))
			.map(|_| {
				SamplePoint::new(
					rng.gen_range(-1.2 * radius..1.2 * radius),
					rng.gen_range(-1.2 * radius..1.2 * radius),
					rng.gen_range(0.0..3.5),
				)
			})
			.collect::<Vec<_>>();
		let resolution = rng.gen_range(10..40);
		let grid = run(&samples, radius, resolution);
		assert_eq!(grid.shape(), (resolution, resolution));
		assert_masked(&grid, radius);
	}
}

#[test]
fn csv_file_to_scene_files() {
	let directory = tempfile::tempdir().unwrap();
	let input = directory.path().join("samples.csv");
	let mut file = std::fs::File::create(&input).unwrap();
	write!(
		file,
		"\u{feff}Point;X;Y;Z\nA1;0;0;1.0\nA2;10;0;1.5\n\nA3;0;10;2.0\nA4;-10;-10;0.5\n"
	)
	.unwrap();
	drop(file);

	let table = SampleTable::from_path(&input).unwrap();
	assert_eq!(table.samples(), samples().as_slice());

	let args = SceneArgs {
		output: directory.path().join("scene.json"),
		html: Some(directory.path().join("scene.html")),
		config: None,
		overrides: Overrides::default(),
	};
	let scene = render_table(&table, &args).unwrap();
	assert_eq!(scene.labels.len(), 4);

	let figure: serde_json::Value =
		serde_json::from_reader(std::fs::File::open(&args.output).unwrap()).unwrap();
	assert_eq!(figure["layout"]["title"]["text"], scene.title.as_str());
	assert_eq!(figure["data"].as_array().unwrap().len(), 5);
	assert_eq!(figure["data"][0]["z"].as_array().unwrap().len(), 50);

	let html = std::fs::read_to_string(directory.path().join("scene.html")).unwrap();
	assert!(html.contains("Plotly.newPlot"));
}

#[test]
fn unreadable_input_is_an_input_error() {
	let directory = tempfile::tempdir().unwrap();
	let error = SampleTable::from_path(directory.path().join("missing.csv")).unwrap_err();
	assert!(error.is_input());

	let path = directory.path().join("broken.csv");
	std::fs::write(&path, "X,Y,Z\n1,2,three\n").unwrap();
	let error = SampleTable::from_path(&path).unwrap_err();
	assert!(error.is_input());
	assert!(error.to_string().contains("Line 2"));
}

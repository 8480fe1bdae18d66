//! Spreadsheet input, written with rust_xlsxwriter and read back through `SampleTable::from_path`.

use std::path::Path;

use rust_xlsxwriter::Workbook;
use sludge::{pipeline, Error, SamplePoint, SampleTable, Settings};

fn samples() -> Vec<SamplePoint> {
	vec![
		SamplePoint::new(0.0, 0.0, 1.0),
		SamplePoint::new(10.0, 0.0, 1.5),
		SamplePoint::new(0.0, 10.0, 2.0),
		SamplePoint::new(-10.0, -10.0, 0.5),
	]
}

/// Header `Point, Z, X, Y` on the second row, one blank row between the samples.
fn write_workbook(path: &Path, samples: &[SamplePoint]) {
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	for (column, name) in ["Point", "Z", "X", "Y"].into_iter().enumerate() {
		sheet.write_string(1, column as u16, name).unwrap();
	}
	for (index, sample) in samples.iter().enumerate() {
		let row = (if index < 2 { index + 2 } else { index + 3 }) as u32;
		sheet.write_string(row, 0, format!("A{}", index + 1)).unwrap();
		sheet.write_number(row, 1, sample.z).unwrap();
		sheet.write_number(row, 2, sample.x).unwrap();
		sheet.write_number(row, 3, sample.y).unwrap();
	}
	workbook.save(path).unwrap();
}

#[test]
fn spreadsheet_round_trip() {
	let directory = tempfile::tempdir().unwrap();
	let path = directory.path().join("samples.xlsx");
	write_workbook(&path, &samples());

	let table = SampleTable::from_path(&path).unwrap();
	assert_eq!(table.samples(), samples().as_slice());

	let settings = Settings { radius: 20.0, resolution: 10, ..Settings::default() };
	let scene = pipeline(&table, &settings).unwrap();
	assert_eq!(scene.labels.len(), 4);
}

#[test]
fn spreadsheet_errors_name_row_and_column() {
	let directory = tempfile::tempdir().unwrap();
	let path = directory.path().join("broken.xlsx");
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	for (column, name) in ["X", "Y", "Z"].into_iter().enumerate() {
		sheet.write_string(0, column as u16, name).unwrap();
	}
	sheet.write_number(1, 0, 1.0).unwrap();
	sheet.write_number(1, 1, 2.0).unwrap();
	sheet.write_number(1, 2, 3.0).unwrap();
	sheet.write_number(2, 0, 1.0).unwrap();
	sheet.write_string(2, 1, "deep").unwrap();
	sheet.write_number(2, 2, 3.0).unwrap();
	workbook.save(&path).unwrap();

	let error = SampleTable::from_path(&path).unwrap_err();
	assert!(error.is_input());
	assert!(matches!(error, Error::Parse { line: 3, column: "Y", .. }), "{}", error);
}

#[test]
fn spreadsheet_without_z_column() {
	let directory = tempfile::tempdir().unwrap();
	let path = directory.path().join("partial.xlsx");
	let mut workbook = Workbook::new();
	let sheet = workbook.add_worksheet();
	sheet.write_string(0, 0, "X").unwrap();
	sheet.write_string(0, 1, "Y").unwrap();
	sheet.write_number(1, 0, 1.0).unwrap();
	sheet.write_number(1, 1, 2.0).unwrap();
	workbook.save(&path).unwrap();

	assert!(matches!(SampleTable::from_path(&path), Err(Error::MissingColumn("Z"))));
}

#[test]
fn unreadable_spreadsheet_is_an_input_error() {
	let directory = tempfile::tempdir().unwrap();
	let path = directory.path().join("text.xlsx");
	std::fs::write(&path, "X,Y,Z\n1,2,3\n").unwrap();
	let error = SampleTable::from_path(&path).unwrap_err();
	assert!(error.is_input());
}

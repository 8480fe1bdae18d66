use std::{
	fs::File,
	io::{BufRead, BufReader, BufWriter, Write},
	path::Path,
};

use nalgebra as na;

use crate::{workbook, Error};

/// Rows of the blank table for manual entry.
pub const MANUAL_ROWS: usize = 24;

pub(crate) const COLUMNS: [&str; 3] = ["X", "Y", "Z"];
const DELIMITERS: [char; 3] = [',', ';', '\t'];
const BYTE_ORDER_MARK: char = '\u{feff}';

/// Measured sludge height `z` at the tank floor position `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SamplePoint {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

impl SamplePoint {
	pub fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}

	pub fn position(&self) -> na::Point2<f64> {
		na::point![self.x, self.y]
	}
}

/// Samples in input order. Input order decides the label index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
	samples: Vec<SamplePoint>,
}

impl SampleTable {
	pub fn new(samples: Vec<SamplePoint>) -> Self {
		Self { samples }
	}

	/// Blank table for manual entry, every row at the origin with zero height.
	pub fn manual() -> Self {
		Self::new(vec![SamplePoint::default(); MANUAL_ROWS])
	}

	pub fn samples(&self) -> &[SamplePoint] {
		&self.samples
	}

	pub fn len(&self) -> usize {
		self.samples.len()
	}

	pub fn is_empty(&self) -> bool {
		self.samples.is_empty()
	}

	/// Replace row `row`, counting from 1 like the labels.
	pub fn set(&mut self, row: usize, sample: SamplePoint) -> Result<(), Error> {
		let rows = self.samples.len();
		match row.checked_sub(1).and_then(|index| self.samples.get_mut(index)) {
			Some(entry) => {
				*entry = sample;
				Ok(())
			},
			None => Err(Error::RowOutOfRange { row, rows }),
		}
	}

	/// Read a spreadsheet (`.xlsx`, `.xlsm`, `.xls`, `.ods`) or delimited text, chosen by extension.
	pub fn from_path(path: impl AsRef<Path>) -> Result<Self, Error> {
		let path = path.as_ref();
		if workbook::is_workbook(path) {
			return workbook::read(path);
		}
		let file = File::open(path)?;
		Self::from_reader(BufReader::new(file))
	}

	/// Parse delimited text with a header row naming the `X`, `Y` and `Z` columns.
	///
	/// The delimiter is taken from the header (`,`, `;` or tab). Additional columns are ignored,
	/// blank lines are skipped and every value must be a finite number.
	pub fn from_reader(reader: impl BufRead) -> Result<Self, Error> {
		let mut lines = reader
			.lines()
			.enumerate()
			.map(|(index, line)| line.map(|line| (index + 1, line)));

		let (delimiter, columns) = loop {
			let Some(line) = lines.next() else {
				return Err(Error::NoHeader);
			};
			let (_, line) = line?;
			let line = line.trim_start_matches(BYTE_ORDER_MARK);
			if line.trim().is_empty() {
				continue;
			}
			let delimiter = detect_delimiter(line);
			let header = split(line, delimiter);
			break (delimiter, header_columns(&header)?);
		};

		let mut samples = Vec::new();
		for line in lines {
			let (number, line) = line?;
			if line.trim().is_empty() {
				continue;
			}
			let fields = split(&line, delimiter);
			let mut values = [0.0; 3];
			for ((value, &column), name) in values.iter_mut().zip(&columns).zip(COLUMNS) {
				*value = parse_number(fields.get(column).copied(), number, name)?;
			}
			samples.push(SamplePoint::new(values[0], values[1], values[2]));
		}

		log::debug!("Read {} samples", samples.len());
		Ok(Self::new(samples))
	}

	pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		let file = File::create(path)?;
		let mut writer = BufWriter::new(file);
		self.write_csv(&mut writer)?;
		writer.flush()?;
		Ok(())
	}

	/// Comma separated with a byte order mark, so spreadsheet programs detect UTF-8.
	pub fn write_csv(&self, mut writer: impl Write) -> Result<(), Error> {
		write!(writer, "{}", BYTE_ORDER_MARK)?;
		writeln!(writer, "{}", COLUMNS.join(","))?;
		for sample in &self.samples {
			writeln!(writer, "{},{},{}", sample.x, sample.y, sample.z)?;
		}
		Ok(())
	}

	pub fn ranges(&self) -> Option<Ranges> {
		let first = self.samples.first()?;
		let start = Ranges {
			x: [first.x; 2],
			y: [first.y; 2],
			z: [first.z; 2],
		};
		Some(self.samples.iter().fold(start, |ranges, sample| Ranges {
			x: [ranges.x[0].min(sample.x), ranges.x[1].max(sample.x)],
			y: [ranges.y[0].min(sample.y), ranges.y[1].max(sample.y)],
			z: [ranges.z[0].min(sample.z), ranges.z[1].max(sample.z)],
		}))
	}
}

/// Position of the `X`, `Y` and `Z` columns in a header row.
pub(crate) fn header_columns(header: &[&str]) -> Result<[usize; 3], Error> {
	let mut columns = [0; 3];
	for (column, name) in columns.iter_mut().zip(COLUMNS) {
		*column = header
			.iter()
			.position(|&field| field == name)
			.ok_or(Error::MissingColumn(name))?;
	}
	Ok(columns)
}

/// Finite number from a trimmed cell, `None` and empty cells are missing values.
pub(crate) fn parse_number(field: Option<&str>, line: usize, column: &'static str) -> Result<f64, Error> {
	let parse_error = |message: String| Error::Parse { line, column, message };
	let field = field
		.filter(|field| !field.is_empty())
		.ok_or_else(|| parse_error(String::from("missing value")))?;
	field
		.parse::<f64>()
		.ok()
		.filter(|v| v.is_finite())
		.ok_or_else(|| parse_error(format!("'{}' is not a finite number", field)))
}

fn detect_delimiter(header: &str) -> char {
	DELIMITERS
		.into_iter()
		.max_by_key(|&delimiter| header.matches(delimiter).count())
		.filter(|&delimiter| header.contains(delimiter))
		.unwrap_or(',')
}

fn split(line: &str, delimiter: char) -> Vec<&str> {
	line.split(delimiter)
		.map(|field| field.trim().trim_matches('"').trim())
		.collect()
}

/// Minimum and maximum of every column.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ranges {
	pub x: [f64; 2],
	pub y: [f64; 2],
	pub z: [f64; 2],
}

impl std::fmt::Display for Ranges {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"x=[{:.2}, {:.2}], y=[{:.2}, {:.2}], z=[{:.2}, {:.2}]",
			self.x[0], self.x[1], self.y[0], self.y[1], self.z[0], self.z[1]
		)
	}
}

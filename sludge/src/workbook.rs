use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::{
	sample::{header_columns, parse_number, COLUMNS},
	Error, SamplePoint, SampleTable,
};

const EXTENSIONS: [&str; 5] = ["xlsx", "xlsm", "xlsb", "xls", "ods"];

pub fn is_workbook(path: &Path) -> bool {
	path.extension()
		.and_then(|extension| extension.to_str())
		.is_some_and(|extension| EXTENSIONS.iter().any(|e| extension.eq_ignore_ascii_case(e)))
}

/// Samples from the first sheet. The first non empty row is the header, errors name the sheet row.
pub fn read(path: &Path) -> Result<SampleTable, Error> {
	let mut workbook = open_workbook_auto(path)?;
	let range = workbook.worksheet_range_at(0).ok_or(Error::NoHeader)??;
	let first_row = range.start().map_or(0, |(row, _)| row as usize);

	let mut rows = range
		.rows()
		.enumerate()
		.map(|(index, cells)| (first_row + index + 1, cells))
		.filter(|(_, cells)| !cells.iter().all(is_blank));

	let (_, header) = rows.next().ok_or(Error::NoHeader)?;
	let header = header.iter().map(|cell| cell.to_string()).collect::<Vec<_>>();
	let columns = header_columns(&header.iter().map(|name| name.trim()).collect::<Vec<_>>())?;

	let mut samples = Vec::new();
	for (line, cells) in rows {
		let mut values = [0.0; 3];
		for ((value, &column), name) in values.iter_mut().zip(&columns).zip(COLUMNS) {
			*value = number(cells.get(column), line, name)?;
		}
		samples.push(SamplePoint::new(values[0], values[1], values[2]));
	}

	log::debug!("Read {} samples from {}", samples.len(), path.display());
	Ok(SampleTable::new(samples))
}

fn is_blank(cell: &Data) -> bool {
	match cell {
		Data::Empty => true,
		Data::String(text) => text.trim().is_empty(),
		_ => false,
	}
}

fn number(cell: Option<&Data>, line: usize, column: &'static str) -> Result<f64, Error> {
	match cell {
		Some(&Data::Float(value)) if value.is_finite() => Ok(value),
		Some(&Data::Int(value)) => Ok(value as f64),
		Some(Data::String(text)) => parse_number(Some(text.trim()), line, column),
		None | Some(Data::Empty) => parse_number(None, line, column),
		Some(other) => Err(Error::Parse {
			line,
			column,
			message: format!("'{}' is not a finite number", other),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn workbook_extensions() {
		assert!(is_workbook(Path::new("samples.xlsx")));
		assert!(is_workbook(Path::new("dir/Samples.XLSX")));
		assert!(is_workbook(Path::new("samples.ods")));
		assert!(!is_workbook(Path::new("samples.csv")));
		assert!(!is_workbook(Path::new("xlsx")));
	}

	#[test]
	fn cell_values() {
		assert_eq!(number(Some(&Data::Float(1.5)), 2, "X").unwrap(), 1.5);
		assert_eq!(number(Some(&Data::Int(-3)), 2, "X").unwrap(), -3.0);
		assert_eq!(number(Some(&Data::String(String::from(" 0.25 "))), 2, "X").unwrap(), 0.25);
		assert!(matches!(
			number(Some(&Data::Empty), 4, "Y"),
			Err(Error::Parse { line: 4, column: "Y", .. })
		));
		assert!(matches!(number(None, 4, "Z"), Err(Error::Parse { line: 4, column: "Z", .. })));
		assert!(matches!(
			number(Some(&Data::Bool(true)), 5, "Z"),
			Err(Error::Parse { line: 5, column: "Z", .. })
		));
		assert!(number(Some(&Data::Float(f64::NAN)), 6, "X").is_err());
	}
}

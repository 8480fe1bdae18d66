use std::{fmt::Write, path::Path};

use crate::{render_table, write_table, Error, SamplePoint, SampleTable, SceneArgs, SceneDescription};

/// Table edited in the interactive prompt. Starts as the blank manual table.
#[derive(Debug, Clone)]
pub struct Session {
	table: SampleTable,
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}

impl Session {
	pub fn new() -> Self {
		Self { table: SampleTable::manual() }
	}

	pub fn table(&self) -> &SampleTable {
		&self.table
	}

	/// Replace the table, the current one is kept if reading fails.
	pub fn load(&mut self, path: &Path) -> Result<(), Error> {
		self.table = SampleTable::from_path(path)?;
		log::info!("Loaded {} rows from {}", self.table.len(), path.display());
		Ok(())
	}

	pub fn set(&mut self, row: usize, x: f64, y: f64, z: f64) -> Result<(), Error> {
		if ![x, y, z].iter().all(|v| v.is_finite()) {
			return Err(Error::InvalidSetting(String::from("values must be finite numbers")));
		}
		self.table.set(row, SamplePoint::new(x, y, z))
	}

	pub fn clear(&mut self) {
		self.table = SampleTable::manual();
	}

	pub fn export(&self, path: &Path) -> Result<(), Error> {
		write_table(&self.table, path)
	}

	pub fn render(&self, args: &SceneArgs) -> Result<SceneDescription, Error> {
		render_table(&self.table, args)
	}

	/// Table with one line per row, labeled like the scene labels.
	pub fn show(&self) -> String {
		let mut text = format!("{:>5} {:>10} {:>10} {:>10}\n", "", "X", "Y", "Z");
		for (index, sample) in self.table.samples().iter().enumerate() {
			// writing into a String does not fail
			_ = writeln!(
				text,
				"{:>5} {:>10.3} {:>10.3} {:>10.3}",
				format!("A{}", index + 1),
				sample.x,
				sample.y,
				sample.z
			);
		}
		text
	}
}

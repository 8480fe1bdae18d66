/// Square grid of heights, `None` where no height is defined.
///
/// Row `i` holds the cells at `y = ys[i]`, column `j` the cells at `x = xs[j]`.
#[derive(Debug, Clone, PartialEq)]
pub struct HeightGrid {
	xs: Vec<f64>,
	ys: Vec<f64>,
	values: Vec<Option<f64>>,
}

impl HeightGrid {
	pub fn from_fn(xs: Vec<f64>, ys: Vec<f64>, mut height: impl FnMut(f64, f64) -> Option<f64>) -> Self {
		let mut values = Vec::with_capacity(xs.len() * ys.len());
		for &y in &ys {
			for &x in &xs {
				values.push(height(x, y));
			}
		}
		Self { xs, ys, values }
	}

	pub fn xs(&self) -> &[f64] {
		&self.xs
	}

	pub fn ys(&self) -> &[f64] {
		&self.ys
	}

	/// Rows and columns.
	pub fn shape(&self) -> (usize, usize) {
		(self.ys.len(), self.xs.len())
	}

	pub fn get(&self, row: usize, column: usize) -> Option<f64> {
		if column >= self.xs.len() {
			return None;
		}
		self.values.get(row * self.xs.len() + column).copied().flatten()
	}

	pub fn rows(&self) -> impl Iterator<Item = &[Option<f64>]> + '_ {
		self.values.chunks(self.xs.len().max(1))
	}

	/// Every cell as `(x, y, height)`.
	pub fn cells(&self) -> impl Iterator<Item = (f64, f64, Option<f64>)> + '_ {
		self.ys
			.iter()
			.flat_map(move |&y| self.xs.iter().map(move |&x| (x, y)))
			.zip(&self.values)
			.map(|((x, y), &value)| (x, y, value))
	}

	/// Undefine every cell outside the circle of `radius` around the origin.
	pub fn mask(&mut self, radius: f64) {
		let limit = radius * radius;
		let columns = self.xs.len();
		for (index, value) in self.values.iter_mut().enumerate() {
			let x = self.xs[index % columns];
			let y = self.ys[index / columns];
			if x * x + y * y > limit {
				*value = None;
			}
		}
	}

	pub fn defined(&self) -> usize {
		self.values.iter().flatten().count()
	}

	/// No cell has a height. Not an error, the surface is just empty.
	pub fn is_blank(&self) -> bool {
		self.defined() == 0
	}

	/// Smallest and largest defined height.
	pub fn height_range(&self) -> Option<[f64; 2]> {
		self.values.iter().flatten().fold(None, |range, &value| match range {
			None => Some([value, value]),
			Some([min, max]) => Some([value.min(min), value.max(max)]),
		})
	}
}

use std::{
	fs::File,
	io::{BufWriter, Write},
	path::Path,
};

use serde_json::{json, Value};

use crate::{Error, SceneDescription};

const PLOTLY_SCRIPT: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

impl SceneDescription {
	/// Plotly figure with a surface trace and one text trace per label.
	/// Undefined cells become `null`, which Plotly draws as gaps.
	pub fn to_plotly(&self) -> Value {
		let grid = &self.surface.grid;
		let color_scale = self
			.surface
			.color_scale
			.stops()
			.iter()
			.map(|stop| json!([stop.position, stop.color.to_string()]))
			.collect::<Vec<_>>();

		let mut data = vec![json!({
			"type": "surface",
			"x": grid.xs(),
			"y": grid.ys(),
			"z": grid.rows().collect::<Vec<_>>(),
			"colorscale": color_scale,
			"colorbar": { "title": { "text": self.surface.color_bar_title } },
		})];
		data.extend(self.labels.iter().map(|label| {
			json!({
				"type": "scatter3d",
				"mode": "text",
				"x": [label.position.x],
				"y": [label.position.y],
				"z": [label.position.z],
				"text": [label.text],
				"textposition": "top center",
				"textfont": self.label_font,
				"showlegend": false,
			})
		}));

		let axis = |axis: &crate::Axis| json!({ "title": { "text": axis.title }, "range": axis.range });
		json!({
			"data": data,
			"layout": {
				"title": {
					"text": self.title,
					"x": 0.5,
					"xanchor": "center",
					"font": { "size": 20 },
				},
				"scene": {
					"xaxis": axis(&self.x_axis),
					"yaxis": axis(&self.y_axis),
					"zaxis": axis(&self.z_axis),
					"camera": {
						"eye": { "x": self.camera.eye.x, "y": self.camera.eye.y, "z": self.camera.eye.z },
					},
				},
				"width": self.width,
				"height": self.height,
			},
		})
	}

	pub fn save_json(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		let mut writer = BufWriter::new(File::create(path)?);
		serde_json::to_writer_pretty(&mut writer, &self.to_plotly())?;
		writer.flush()?;
		Ok(())
	}

	/// Standalone page that draws the figure with plotly.js.
	pub fn to_html(&self) -> Result<String, Error> {
		// a `</script>` inside a string would end the script block early
		let figure = serde_json::to_string(&self.to_plotly())?.replace("</", "<\\/");
		Ok(format!(
			concat!(
				"<!DOCTYPE html>\n",
				"<html>\n",
				"<head>\n",
				"<meta charset=\"utf-8\">\n",
				"<title>{}</title>\n",
				"<script src=\"{}\"></script>\n",
				"</head>\n",
				"<body>\n",
				"<div id=\"scene\"></div>\n",
				"<script>\n",
				"const figure = {};\n",
				"Plotly.newPlot(\"scene\", figure.data, figure.layout);\n",
				"</script>\n",
				"</body>\n",
				"</html>\n",
			),
			escape_html(&self.title),
			PLOTLY_SCRIPT,
			figure
		))
	}

	pub fn save_html(&self, path: impl AsRef<Path>) -> Result<(), Error> {
		std::fs::write(path, self.to_html()?)?;
		Ok(())
	}
}

fn escape_html(text: &str) -> String {
	let mut escaped = String::with_capacity(text.len());
	for c in text.chars() {
		match c {
			'&' => escaped.push_str("&amp;"),
			'<' => escaped.push_str("&lt;"),
			'>' => escaped.push_str("&gt;"),
			'"' => escaped.push_str("&quot;"),
			c => escaped.push(c),
		}
	}
	escaped
}

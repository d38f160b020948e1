//! Graph layouts. Only the force-directed placement is implemented.

mod force_directed;

use std::fmt;
use std::str::FromStr;

pub use force_directed::ForceDirected;

use crate::error::OptionsError;

/// Number of spatial dimensions the layout and drawing work in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LayoutMode {
	#[default]
	TwoD,
	ThreeD,
}

impl LayoutMode {
	pub fn is_3d(self) -> bool {
		self == LayoutMode::ThreeD
	}
}

impl FromStr for LayoutMode {
	type Err = OptionsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"2d" => Ok(LayoutMode::TwoD),
			"3d" => Ok(LayoutMode::ThreeD),
			other => Err(OptionsError::InvalidLayout(other.to_string())),
		}
	}
}

impl fmt::Display for LayoutMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			LayoutMode::TwoD => f.write_str("2d"),
			LayoutMode::ThreeD => f.write_str("3d"),
		}
	}
}

/// Tuning for [`ForceDirected`]. Unset fields take the layout's own
/// defaults; drawings fill in larger ones before building the layout.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LayoutOptions {
	pub layout: Option<LayoutMode>,
	pub attraction: Option<f64>,
	pub repulsion: Option<f64>,
	pub iterations: Option<u32>,
	pub width: Option<f64>,
	pub height: Option<f64>,
}

impl LayoutOptions {
	/// Defaults applied by a drawing: a 2000x2000 area, 100000 iterations
	/// and the drawing's own mode.
	pub fn with_drawing_defaults(mut self, mode: LayoutMode) -> Self {
		self.width = self.width.or(Some(2000.0));
		self.height = self.height.or(Some(2000.0));
		self.iterations = self.iterations.or(Some(100_000));
		self.layout = self.layout.or(Some(mode));
		self
	}
}

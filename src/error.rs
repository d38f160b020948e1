//! Error types for option parsing and browser setup.

use thiserror::Error;
use wasm_bindgen::JsValue;

/// A query-string option that could not be understood.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptionsError {
	#[error("unknown layout '{0}', expected '2d' or '3d'")]
	InvalidLayout(String),

	#[error("unknown topology '{0}', expected 'ring', 'tree' or 'edges'")]
	InvalidTopology(String),

	#[error("option '{key}' expects a number, got '{value}'")]
	InvalidNumber { key: String, value: String },

	#[error("option '{key}' expects true or false, got '{value}'")]
	InvalidBool { key: String, value: String },

	#[error("malformed edge '{0}', expected 'source-target'")]
	InvalidEdge(String),

	#[error("option '{0}' must be greater than zero")]
	Zero(String),

	#[error("option '{key}' must be a finite number above zero, got '{value}'")]
	NotPositive { key: String, value: String },

	#[error("option '{key}' allows at most {max}, got '{value}'")]
	TooLarge { key: String, value: String, max: u32 },
}

/// Failures while wiring the drawing into the page.
#[derive(Debug, Error)]
pub enum DrawingError {
	#[error("no browser window available")]
	NoWindow,

	#[error("canvas has no 2d rendering context")]
	NoContext,

	#[error("javascript error: {0}")]
	Js(String),
}

impl From<JsValue> for DrawingError {
	fn from(value: JsValue) -> Self {
		DrawingError::Js(value.as_string().unwrap_or_else(|| format!("{value:?}")))
	}
}

pub type Result<T, E = DrawingError> = std::result::Result<T, E>;

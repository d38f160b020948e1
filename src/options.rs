//! Drawing configuration, read from the page's query string.
//!
//! Keys use the same camelCase names the drawings have always accepted,
//! e.g. `?layout=3d&showStats=true&numNodes=40&topology=tree`.

use std::str::FromStr;

use crate::error::OptionsError;
use crate::generate::Topology;
use crate::layout::{LayoutMode, LayoutOptions};

/// Largest node count, and one past the largest node id, a drawing accepts.
pub const MAX_NODES: u32 = 5_000;
/// Largest number of children per node in a random tree.
pub const MAX_CHILDREN: u32 = 64;

/// Every query key the drawing understands.
pub const KEYS: &[&str] = &[
	"layout",
	"showStats",
	"showInfo",
	"showLabels",
	"selection",
	"limit",
	"numNodes",
	"numEdges",
	"topology",
	"edges",
	"texture",
	"seed",
	"width",
	"height",
	"iterations",
	"attraction",
	"repulsion",
];

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TopologyKind {
	#[default]
	Ring,
	Tree,
	Edges,
}

impl FromStr for TopologyKind {
	type Err = OptionsError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"ring" => Ok(TopologyKind::Ring),
			"tree" => Ok(TopologyKind::Tree),
			"edges" => Ok(TopologyKind::Edges),
			other => Err(OptionsError::InvalidTopology(other.to_string())),
		}
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct GraphOptions {
	pub layout: LayoutMode,
	pub graph_layout: LayoutOptions,
	pub show_stats: bool,
	pub show_info: bool,
	pub show_labels: bool,
	pub selection: bool,
	/// Maximum number of nodes the graph accepts.
	pub limit: Option<usize>,
	pub topology: TopologyKind,
	pub num_nodes: Option<u32>,
	/// Upper bound of children per node in a random tree.
	pub num_edges: u32,
	pub edges: Vec<(u32, u32)>,
	/// Image drawn in place of the node geometry.
	pub texture: Option<String>,
	pub seed: Option<u64>,
}

impl Default for GraphOptions {
	fn default() -> Self {
		Self {
			layout: LayoutMode::TwoD,
			graph_layout: LayoutOptions::default(),
			show_stats: false,
			show_info: false,
			show_labels: false,
			selection: false,
			limit: None,
			topology: TopologyKind::Ring,
			num_nodes: None,
			num_edges: 1,
			edges: Vec::new(),
			texture: None,
			seed: None,
		}
	}
}

impl GraphOptions {
	/// Build options from key/value pairs, starting from the defaults.
	/// Unknown keys are ignored.
	pub fn from_pairs<'a>(
		pairs: impl IntoIterator<Item = (&'a str, &'a str)>,
	) -> Result<Self, OptionsError> {
		let mut opts = Self::default();
		for (key, value) in pairs {
			match key {
				"layout" => opts.layout = value.parse()?,
				"showStats" => opts.show_stats = parse_bool(key, value)?,
				"showInfo" => opts.show_info = parse_bool(key, value)?,
				"showLabels" => opts.show_labels = parse_bool(key, value)?,
				"selection" => opts.selection = parse_bool(key, value)?,
				"limit" => opts.limit = Some(parse_positive::<usize>(key, value)?),
				"numNodes" => opts.num_nodes = Some(parse_count(key, value, MAX_NODES)?),
				"numEdges" => opts.num_edges = parse_count(key, value, MAX_CHILDREN)?,
				"topology" => opts.topology = value.parse()?,
				"edges" => opts.edges = parse_edges(value)?,
				"texture" if !value.is_empty() => opts.texture = Some(value.to_string()),
				"seed" => opts.seed = Some(parse_number(key, value)?),
				"width" => opts.graph_layout.width = Some(parse_dimension(key, value)?),
				"height" => opts.graph_layout.height = Some(parse_dimension(key, value)?),
				"iterations" => {
					opts.graph_layout.iterations = Some(parse_positive::<u32>(key, value)?)
				}
				"attraction" => opts.graph_layout.attraction = Some(parse_dimension(key, value)?),
				"repulsion" => opts.graph_layout.repulsion = Some(parse_dimension(key, value)?),
				_ => {}
			}
		}
		Ok(opts)
	}

	/// The topology to generate, with per-kind node count defaults.
	pub fn topology(&self) -> Topology {
		match self.topology {
			TopologyKind::Ring => Topology::Ring {
				nodes: self.num_nodes.unwrap_or(16),
			},
			TopologyKind::Tree => Topology::RandomTree {
				num_nodes: self.num_nodes.unwrap_or(2),
				num_edges: self.num_edges,
			},
			TopologyKind::Edges => {
				let highest = self
					.edges
					.iter()
					.map(|&(s, t)| s.max(t).saturating_add(1))
					.max()
					.unwrap_or(0);
				Topology::Edges {
					nodes: self.num_nodes.unwrap_or(highest),
					edges: self.edges.clone(),
				}
			}
		}
	}

	/// Layout options with the drawing's defaults filled in.
	pub fn layout_options(&self) -> LayoutOptions {
		self.graph_layout.clone().with_drawing_defaults(self.layout)
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
	match value {
		"true" | "1" | "" => Ok(true),
		"false" | "0" => Ok(false),
		_ => Err(OptionsError::InvalidBool {
			key: key.to_string(),
			value: value.to_string(),
		}),
	}
}

fn parse_number<T: FromStr>(key: &str, value: &str) -> Result<T, OptionsError> {
	value.parse().map_err(|_| OptionsError::InvalidNumber {
		key: key.to_string(),
		value: value.to_string(),
	})
}

fn parse_positive<T: FromStr + Default + PartialEq>(
	key: &str,
	value: &str,
) -> Result<T, OptionsError> {
	let n: T = parse_number(key, value)?;
	if n == T::default() {
		return Err(OptionsError::Zero(key.to_string()));
	}
	Ok(n)
}

fn parse_count(key: &str, value: &str, max: u32) -> Result<u32, OptionsError> {
	let n = parse_positive::<u32>(key, value)?;
	if n > max {
		return Err(OptionsError::TooLarge {
			key: key.to_string(),
			value: value.to_string(),
			max,
		});
	}
	Ok(n)
}

/// Layout sizes and force multipliers: finite and strictly positive.
fn parse_dimension(key: &str, value: &str) -> Result<f64, OptionsError> {
	let n: f64 = parse_number(key, value)?;
	if !n.is_finite() || n <= 0.0 {
		return Err(OptionsError::NotPositive {
			key: key.to_string(),
			value: value.to_string(),
		});
	}
	Ok(n)
}

/// `0-1,1-2,2-0` into pairs. Ids must stay below [`MAX_NODES`].
fn parse_edges(value: &str) -> Result<Vec<(u32, u32)>, OptionsError> {
	value
		.split(',')
		.filter(|part| !part.trim().is_empty())
		.map(|part| -> Result<(u32, u32), OptionsError> {
			let (source, target) = part
				.split_once('-')
				.ok_or_else(|| OptionsError::InvalidEdge(part.to_string()))?;
			let parse = |s: &str| -> Result<u32, OptionsError> {
				let id = s
					.trim()
					.parse::<u32>()
					.map_err(|_| OptionsError::InvalidEdge(part.to_string()))?;
				if id >= MAX_NODES {
					return Err(OptionsError::TooLarge {
						key: "edges".to_string(),
						value: id.to_string(),
						max: MAX_NODES - 1,
					});
				}
				Ok(id)
			};
			Ok((parse(source)?, parse(target)?))
		})
		.collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn empty_query_gives_defaults() {
		let opts = GraphOptions::from_pairs(std::iter::empty()).unwrap();
		assert_eq!(opts, GraphOptions::default());
		assert_eq!(opts.topology(), Topology::Ring { nodes: 16 });
		assert_eq!(opts.limit, None);
	}

	#[test]
	fn reads_flags_and_numbers() {
		let opts = GraphOptions::from_pairs([
			("layout", "3d"),
			("showStats", "true"),
			("showInfo", "1"),
			("selection", ""),
			("limit", "40"),
			("iterations", "500"),
			("ignored", "whatever"),
		])
		.unwrap();

		assert_eq!(opts.layout, LayoutMode::ThreeD);
		assert!(opts.show_stats && opts.show_info && opts.selection);
		assert!(!opts.show_labels);
		assert_eq!(opts.limit, Some(40));
		assert_eq!(opts.layout_options().iterations, Some(500));
		assert_eq!(opts.layout_options().layout, Some(LayoutMode::ThreeD));
	}

	#[test]
	fn tree_topology_uses_node_and_edge_counts() {
		let opts = GraphOptions::from_pairs([("topology", "tree"), ("numEdges", "3")]).unwrap();
		assert_eq!(
			opts.topology(),
			Topology::RandomTree {
				num_nodes: 2,
				num_edges: 3
			}
		);
	}

	#[test]
	fn edge_list_sizes_the_node_set() {
		let opts =
			GraphOptions::from_pairs([("topology", "edges"), ("edges", "0-1, 1-4,")]).unwrap();
		assert_eq!(
			opts.topology(),
			Topology::Edges {
				nodes: 5,
				edges: vec![(0, 1), (1, 4)]
			}
		);
	}

	#[test]
	fn rejects_bad_values() {
		assert_eq!(
			GraphOptions::from_pairs([("layout", "4d")]),
			Err(OptionsError::InvalidLayout("4d".into()))
		);
		assert!(matches!(
			GraphOptions::from_pairs([("numNodes", "lots")]),
			Err(OptionsError::InvalidNumber { .. })
		));
		assert!(matches!(
			GraphOptions::from_pairs([("showInfo", "maybe")]),
			Err(OptionsError::InvalidBool { .. })
		));
		assert_eq!(
			GraphOptions::from_pairs([("numNodes", "0")]),
			Err(OptionsError::Zero("numNodes".into()))
		);
		assert_eq!(
			GraphOptions::from_pairs([("edges", "0:1")]),
			Err(OptionsError::InvalidEdge("0:1".into()))
		);
	}

	#[test]
	fn edge_ids_are_bounded() {
		assert_eq!(
			GraphOptions::from_pairs([("topology", "edges"), ("edges", "0-4294967295")]),
			Err(OptionsError::TooLarge {
				key: "edges".into(),
				value: "4294967295".into(),
				max: MAX_NODES - 1,
			})
		);

		let opts = GraphOptions {
			topology: TopologyKind::Edges,
			edges: vec![(0, u32::MAX)],
			..GraphOptions::default()
		};
		assert_eq!(
			opts.topology(),
			Topology::Edges {
				nodes: u32::MAX,
				edges: vec![(0, u32::MAX)]
			}
		);
	}

	#[test]
	fn node_and_child_counts_are_capped() {
		assert!(matches!(
			GraphOptions::from_pairs([("topology", "tree"), ("numNodes", "70000")]),
			Err(OptionsError::TooLarge { max: MAX_NODES, .. })
		));
		assert!(matches!(
			GraphOptions::from_pairs([("numEdges", "70000")]),
			Err(OptionsError::TooLarge { max: MAX_CHILDREN, .. })
		));
		let opts = GraphOptions::from_pairs([("numNodes", "5000"), ("numEdges", "64")]).unwrap();
		assert_eq!(opts.num_nodes, Some(MAX_NODES));
		assert_eq!(opts.num_edges, MAX_CHILDREN);
	}

	#[test]
	fn layout_numbers_must_be_finite_and_positive() {
		for (key, value) in [
			("attraction", "0"),
			("repulsion", "-1"),
			("width", "NaN"),
			("height", "inf"),
		] {
			assert_eq!(
				GraphOptions::from_pairs([(key, value)]),
				Err(OptionsError::NotPositive {
					key: key.into(),
					value: value.into()
				}),
				"{key}={value}"
			);
		}
		let opts = GraphOptions::from_pairs([("attraction", "2.5"), ("width", "800")]).unwrap();
		assert_eq!(opts.graph_layout.attraction, Some(2.5));
		assert_eq!(opts.graph_layout.width, Some(800.0));
	}
}

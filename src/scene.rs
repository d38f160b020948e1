//! How graph nodes look on screen: shape, color and starting position.

use glam::Vec3;

use crate::camera::Projected;
use crate::graph::Graph;
use crate::layout::LayoutMode;
use crate::random::RandomSource;

/// Half-width of the cube nodes are scattered in before the layout runs.
pub const SCATTER_AREA: f64 = 5000.0;
/// Labels sit this far below their node, in world units.
pub const LABEL_OFFSET: f32 = 100.0;
pub const EDGE_COLOR: &str = "#606060";
pub const SELECTED_COLOR: u32 = 0xff0000;

/// Geometry every node of a drawing shares.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NodeShape {
	Sphere { radius: f32 },
	Square { size: f32 },
}

impl NodeShape {
	pub fn for_mode(mode: LayoutMode) -> Self {
		match mode {
			LayoutMode::ThreeD => NodeShape::Sphere { radius: 300.0 },
			LayoutMode::TwoD => NodeShape::Square { size: 50.0 },
		}
	}

	/// Half the on-screen extent at the given projection.
	pub fn half_extent(&self, projected: &Projected) -> f64 {
		let world = match self {
			NodeShape::Sphere { radius } => *radius,
			NodeShape::Square { size } => size * 0.5,
		};
		(world * projected.scale) as f64
	}

	pub fn contains(&self, projected: &Projected, x: f64, y: f64) -> bool {
		let half = self.half_extent(projected);
		let (dx, dy) = (x - projected.x, y - projected.y);
		match self {
			NodeShape::Sphere { .. } => dx * dx + dy * dy <= half * half,
			NodeShape::Square { .. } => dx.abs() <= half && dy.abs() <= half,
		}
	}
}

/// Where a node's label is drawn, in world space.
pub fn label_anchor(position: Vec3) -> Vec3 {
	position - Vec3::new(0.0, LABEL_OFFSET, 0.0)
}

/// An image can stand in for node geometry once it has loaded with a size.
pub fn texture_ready(complete: bool, natural_width: u32) -> bool {
	complete && natural_width > 0
}

/// Per-node drawing attributes, index-aligned with the graph's nodes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NodeVisual {
	pub color: u32,
}

pub fn random_color(rng: &mut dyn RandomSource) -> u32 {
	(rng.next_f64() * f64::from(0xe0e0e0u32)).floor() as u32
}

pub fn css_color(color: u32) -> String {
	format!("#{:06x}", color & 0xff_ffff)
}

fn scatter(rng: &mut dyn RandomSource) -> f32 {
	(rng.next_f64() * (SCATTER_AREA * 2.0 + 1.0) - SCATTER_AREA).floor() as f32
}

/// Give every node a random color and a random starting position. In 2d
/// nodes stay on the z = 0 plane.
pub fn place_nodes(
	graph: &mut Graph,
	mode: LayoutMode,
	rng: &mut dyn RandomSource,
) -> Vec<NodeVisual> {
	graph
		.nodes_mut()
		.iter_mut()
		.map(|node| {
			let color = random_color(rng);
			let x = scatter(rng);
			let y = scatter(rng);
			let z = if mode.is_3d() { scatter(rng) } else { 0.0 };
			node.position = Vec3::new(x, y, z);
			NodeVisual { color }
		})
		.collect()
}

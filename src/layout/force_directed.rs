//! Fruchterman-Reingold placement with a cooling temperature.
//!
//! Every iteration pushes all node pairs apart, pulls edge endpoints
//! together and moves each node by at most the current temperature. The
//! computed ("working") positions are kept apart from the drawn positions,
//! which ease a tenth of the way toward them per iteration so the animation
//! stays smooth.

use glam::DVec3;
use log::info;

use super::{LayoutMode, LayoutOptions};
use crate::clock::now_ms;
use crate::graph::Graph;

const EPSILON: f64 = 0.000001;

#[derive(Clone, Copy, Debug, Default)]
struct Scratch {
	position: DVec3,
	offset: DVec3,
}

#[derive(Clone, Debug)]
pub struct ForceDirected {
	mode: LayoutMode,
	attraction_multiplier: f64,
	repulsion_multiplier: f64,
	max_iterations: u32,
	width: f64,
	height: f64,
	finished: bool,
	iterations: u32,
	temperature: f64,
	attraction_constant: f64,
	repulsion_constant: f64,
	scratch: Vec<Scratch>,
	total_ms: f64,
}

impl ForceDirected {
	pub fn new(options: &LayoutOptions) -> Self {
		Self {
			mode: options.layout.unwrap_or_default(),
			attraction_multiplier: options.attraction.unwrap_or(5.0),
			repulsion_multiplier: options.repulsion.unwrap_or(0.75),
			max_iterations: options.iterations.unwrap_or(1000),
			width: options.width.unwrap_or(200.0),
			height: options.height.unwrap_or(200.0),
			finished: false,
			iterations: 0,
			temperature: 0.0,
			attraction_constant: 0.0,
			repulsion_constant: 0.0,
			scratch: Vec::new(),
			total_ms: 0.0,
		}
	}

	/// Reset the cooling schedule and seed working positions from the
	/// graph's current node positions.
	pub fn init(&mut self, graph: &Graph) {
		self.finished = false;
		self.iterations = 0;
		self.total_ms = 0.0;
		self.temperature = self.width / 10.0;

		let node_count = graph.node_count().max(1) as f64;
		let force_constant = (self.height * self.width / node_count).sqrt();
		self.attraction_constant = self.attraction_multiplier * force_constant;
		self.repulsion_constant = self.repulsion_multiplier * force_constant;

		self.scratch = graph
			.nodes()
			.iter()
			.map(|node| Scratch {
				position: self.flatten(node.position.as_dvec3()),
				offset: DVec3::ZERO,
			})
			.collect();
	}

	/// Run one iteration. Returns `false` once the layout is done.
	pub fn generate(&mut self, graph: &mut Graph) -> bool {
		if self.iterations >= self.max_iterations || self.temperature <= EPSILON {
			if !self.finished {
				let average = if self.iterations > 0 {
					self.total_ms / self.iterations as f64
				} else {
					0.0
				};
				info!(
					"Layout finished after {} iterations, average time: {:.3} ms",
					self.iterations, average
				);
			}
			self.finished = true;
			return false;
		}

		let start = now_ms();
		if self.scratch.len() != graph.node_count() {
			self.init(graph);
		}

		for s in &mut self.scratch {
			s.offset = DVec3::ZERO;
		}

		// Repulsion between every pair.
		let repulsion = self.repulsion_constant * self.repulsion_constant;
		for i in 0..self.scratch.len() {
			for j in (i + 1)..self.scratch.len() {
				let delta = self.scratch[i].position - self.scratch[j].position;
				let length = delta.length().max(EPSILON);
				let push = delta / length * (repulsion / length);
				self.scratch[i].offset += push;
				self.scratch[j].offset -= push;
			}
		}

		// Attraction along edges.
		let edges: Vec<(usize, usize)> = graph.edge_indices().collect();
		for (source, target) in edges {
			let delta = self.scratch[source].position - self.scratch[target].position;
			let length = delta.length().max(EPSILON);
			let pull = delta / length * (length * length / self.attraction_constant);
			self.scratch[source].offset -= pull;
			self.scratch[target].offset += pull;
		}

		let temperature = self.temperature;
		let mode = self.mode;
		for (s, node) in self.scratch.iter_mut().zip(graph.nodes_mut()) {
			let length = s.offset.length().max(EPSILON);
			s.position += s.offset / length * length.min(temperature);

			let position = node.position.as_dvec3();
			let mut eased = position - (position - s.position) / 10.0;
			if !mode.is_3d() {
				eased.z = position.z;
			}
			node.position = eased.as_vec3();
		}

		self.temperature *= 1.0 - (self.iterations as f64 / self.max_iterations as f64);
		self.iterations += 1;
		self.total_ms += now_ms() - start;
		true
	}

	/// Force the next `generate` call to finish the layout.
	pub fn stop_calculating(&mut self) {
		self.iterations = self.max_iterations;
	}

	pub fn finished(&self) -> bool {
		self.finished
	}

	pub fn iterations(&self) -> u32 {
		self.iterations
	}

	pub fn max_iterations(&self) -> u32 {
		self.max_iterations
	}

	pub fn temperature(&self) -> f64 {
		self.temperature
	}

	pub fn mode(&self) -> LayoutMode {
		self.mode
	}

	fn flatten(&self, mut v: DVec3) -> DVec3 {
		if !self.mode.is_3d() {
			v.z = 0.0;
		}
		v
	}
}

#[cfg(test)]
mod tests {
	use glam::Vec3;

	use super::*;
	use crate::graph::{Node, NodeId};

	fn pair(distance: f32, mode: LayoutMode) -> (Graph, ForceDirected) {
		let mut graph = Graph::new(None);
		let mut a = Node::new(0);
		a.position = Vec3::new(-distance / 2.0, 0.0, 5.0);
		let mut b = Node::new(1);
		b.position = Vec3::new(distance / 2.0, 0.0, 5.0);
		graph.add_node(a);
		graph.add_node(b);
		graph.add_edge(NodeId(0), NodeId(1));

		let mut layout = ForceDirected::new(&LayoutOptions {
			layout: Some(mode),
			..Default::default()
		});
		layout.init(&graph);
		(graph, layout)
	}

	fn spread(graph: &Graph) -> f32 {
		graph.nodes()[0].position.distance(graph.nodes()[1].position)
	}

	#[test]
	fn defaults_match_layout_constants() {
		let layout = ForceDirected::new(&LayoutOptions::default());
		assert_eq!(layout.max_iterations(), 1000);
		assert_eq!(layout.mode(), LayoutMode::TwoD);
	}

	#[test]
	fn init_sets_temperature_from_width() {
		let (_, layout) = pair(10.0, LayoutMode::TwoD);
		assert_eq!(layout.temperature(), 20.0);
		assert!(!layout.finished());
	}

	#[test]
	fn close_nodes_are_pushed_apart() {
		let (mut graph, mut layout) = pair(1.0, LayoutMode::TwoD);
		let before = spread(&graph);
		for _ in 0..20 {
			layout.generate(&mut graph);
		}
		assert!(spread(&graph) > before);
	}

	#[test]
	fn distant_connected_nodes_are_pulled_together() {
		let (mut graph, mut layout) = pair(5000.0, LayoutMode::TwoD);
		let before = spread(&graph);
		for _ in 0..20 {
			layout.generate(&mut graph);
		}
		assert!(spread(&graph) < before);
	}

	#[test]
	fn two_d_layout_leaves_z_alone() {
		let (mut graph, mut layout) = pair(1.0, LayoutMode::TwoD);
		for _ in 0..10 {
			layout.generate(&mut graph);
		}
		assert!(graph.nodes().iter().all(|n| n.position.z == 5.0));
	}

	#[test]
	fn three_d_layout_moves_along_z() {
		let mut graph = Graph::new(None);
		let mut a = Node::new(0);
		a.position = Vec3::new(0.0, 0.0, -1.0);
		let mut b = Node::new(1);
		b.position = Vec3::new(0.0, 0.0, 1.0);
		graph.add_node(a);
		graph.add_node(b);

		let mut layout = ForceDirected::new(&LayoutOptions {
			layout: Some(LayoutMode::ThreeD),
			..Default::default()
		});
		layout.init(&graph);
		for _ in 0..10 {
			layout.generate(&mut graph);
		}
		assert!(graph.nodes()[0].position.z < -1.0);
		assert!(graph.nodes()[1].position.z > 1.0);
	}

	#[test]
	fn finishes_after_max_iterations() {
		let mut graph = Graph::new(None);
		graph.add_node(Node::new(0));
		let mut layout = ForceDirected::new(&LayoutOptions {
			iterations: Some(3),
			..Default::default()
		});
		layout.init(&graph);

		assert!(layout.generate(&mut graph));
		assert!(layout.generate(&mut graph));
		assert!(layout.generate(&mut graph));
		assert!(!layout.generate(&mut graph));
		assert!(layout.finished());
		assert_eq!(layout.iterations(), 3);
	}

	#[test]
	fn stop_calculating_finishes_on_next_step() {
		let (mut graph, mut layout) = pair(10.0, LayoutMode::TwoD);
		assert!(layout.generate(&mut graph));
		layout.stop_calculating();
		assert!(!layout.generate(&mut graph));
		assert!(layout.finished());
	}

	#[test]
	fn temperature_cools_every_iteration() {
		let (mut graph, mut layout) = pair(10.0, LayoutMode::TwoD);
		layout.generate(&mut graph);
		let first = layout.temperature();
		layout.generate(&mut graph);
		assert!(layout.temperature() < first);
	}

	fn assert_close(actual: f64, expected: f64) {
		assert!(
			(actual - expected).abs() < 1e-3,
			"expected {expected}, got {actual}"
		);
	}

	#[test]
	fn one_step_applies_both_forces() {
		// 200x200 area, two nodes: k = sqrt(200 * 200 / 2), repulsion
		// constant 0.75k (squared: 11250), attraction constant 5k.
		let (mut graph, mut layout) = pair(200.0, LayoutMode::TwoD);
		let attraction_constant = 5.0 * 20_000f64.sqrt();
		let push = 11_250.0 / 200.0;
		let pull = 200.0 * 200.0 / attraction_constant;
		let working = -100.0 - push + pull;
		assert!((working + 100.0).abs() < 20.0);

		assert!(layout.generate(&mut graph));
		let drawn = -100.0 - (-100.0 - working) / 10.0;
		assert_close(graph.nodes()[0].position.x as f64, drawn);
		assert_close(graph.nodes()[1].position.x as f64, -drawn);
		assert_close(graph.nodes()[0].position.y as f64, 0.0);
		assert_close(layout.temperature(), 20.0);
	}

	#[test]
	fn steps_are_capped_by_temperature() {
		// At distance 100 the net push is far above the starting
		// temperature of 20, so each working position moves exactly 20.
		let (mut graph, mut layout) = pair(100.0, LayoutMode::TwoD);

		layout.generate(&mut graph);
		// Working x: -70 / 70; drawn eases a tenth of the way from -50.
		assert_close(graph.nodes()[0].position.x as f64, -52.0);
		assert_close(graph.nodes()[1].position.x as f64, 52.0);
		assert_close(layout.temperature(), 20.0);

		layout.generate(&mut graph);
		// Working x: -90 / 90.
		assert_close(graph.nodes()[0].position.x as f64, -55.8);
		assert_close(graph.nodes()[1].position.x as f64, 55.8);
		assert_close(layout.temperature(), 20.0 * (1.0 - 1.0 / 1000.0));

		layout.generate(&mut graph);
		assert_close(layout.temperature(), 20.0 * 0.999 * 0.998);
	}
}

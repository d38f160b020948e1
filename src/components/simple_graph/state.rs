use log::{debug, info};

use crate::camera::{PerspectiveCamera, Projected, TrackballControls};
use crate::generate;
use crate::graph::{Graph, NodeId};
use crate::layout::ForceDirected;
use crate::options::GraphOptions;
use crate::overlay::{CALCULATING, FrameStats, InfoKey, InfoText};
use crate::random::RandomSource;
use crate::scene::{self, NodeShape, NodeVisual};

pub const CAMERA_FOV: f32 = 40.0;
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1_000_000.0;
pub const CAMERA_DISTANCE: f32 = 10_000.0;

/// How one node is painted.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeFill {
	Color(u32),
	/// The texture image, outlined in the given color when selected.
	Texture { outline: Option<u32> },
}

/// Everything one drawing needs between frames.
pub struct DrawingState {
	pub options: GraphOptions,
	pub graph: Graph,
	pub layout: ForceDirected,
	pub visuals: Vec<NodeVisual>,
	pub shape: NodeShape,
	pub camera: PerspectiveCamera,
	pub controls: TrackballControls,
	pub info: InfoText,
	pub stats: FrameStats,
	pub selected: Option<NodeId>,
	pub width: f64,
	pub height: f64,
	pointer: Option<(f64, f64)>,
}

impl DrawingState {
	pub fn new(
		options: GraphOptions,
		width: f64,
		height: f64,
		rng: &mut dyn RandomSource,
		now_ms: f64,
	) -> Self {
		let mut graph = Graph::new(options.limit);
		generate::populate(&mut graph, &options.topology(), rng);
		let visuals = scene::place_nodes(&mut graph, options.layout, rng);

		let mut layout = ForceDirected::new(&options.layout_options());
		layout.init(&graph);

		let (w, h) = (width as f32, height as f32);
		let mut camera = PerspectiveCamera::new(CAMERA_FOV, w, h, CAMERA_NEAR, CAMERA_FAR);
		camera.position.z = CAMERA_DISTANCE;

		let mut controls = TrackballControls::new(w, h);
		controls.rotate_speed = 0.5;
		controls.zoom_speed = 5.2;
		controls.pan_speed = 1.0;
		controls.no_zoom = false;
		controls.no_pan = false;
		controls.static_moving = false;
		controls.dynamic_damping_factor = 0.3;
		controls.keys = [65, 83, 68];
		controls.min_distance = 1000.0;
		controls.max_distance = 100_000.0;

		let mut info_text = InfoText::default();
		info_text.set(InfoKey::Nodes, format!("Nodes {}", graph.node_count()));
		info_text.set(InfoKey::Edges, format!("Edges {}", graph.edge_count()));

		info!(
			"Created {} drawing: {} nodes, {} edges, up to {} layout iterations",
			layout.mode(),
			graph.node_count(),
			graph.edge_count(),
			layout.max_iterations()
		);

		Self {
			shape: NodeShape::for_mode(options.layout),
			options,
			graph,
			layout,
			visuals,
			camera,
			controls,
			info: info_text,
			stats: FrameStats::new(now_ms),
			selected: None,
			width,
			height,
			pointer: None,
		}
	}

	/// Advance one animation frame: camera controls, one layout step,
	/// selection and stats. Drawing happens separately.
	pub fn frame(&mut self, now_ms: f64) {
		self.controls.update(&mut self.camera);

		if !self.layout.finished() {
			self.info.set(InfoKey::Calc, CALCULATING);
			self.layout.generate(&mut self.graph);
		} else {
			self.info.set(InfoKey::Calc, "");
		}

		if self.options.selection {
			self.update_selection();
		}
		if self.options.show_stats {
			self.stats.update(now_ms);
		}
	}

	pub fn stop_calculating(&mut self) {
		if !self.layout.finished() {
			info!(
				"Stopping layout at iteration {}, temperature {:.2}",
				self.layout.iterations(),
				self.layout.temperature()
			);
		}
		self.layout.stop_calculating();
	}

	pub fn resize(&mut self, width: f64, height: f64) {
		self.width = width;
		self.height = height;
		self.camera.set_viewport(width as f32, height as f32);
		self.controls.handle_resize(width as f32, height as f32);
	}

	pub fn set_pointer(&mut self, pointer: Option<(f64, f64)>) {
		self.pointer = pointer;
	}

	/// Nodes in front of the camera, farthest first.
	pub fn projected_nodes(&self) -> Vec<(usize, Projected)> {
		let vp = self.camera.view_projection();
		let mut out: Vec<(usize, Projected)> = self
			.graph
			.nodes()
			.iter()
			.enumerate()
			.filter_map(|(idx, node)| Some((idx, self.camera.project_with(&vp, node.position)?)))
			.collect();
		out.sort_by(|a, b| b.1.depth.total_cmp(&a.1.depth));
		out
	}

	/// Front-most node under the canvas point `(x, y)`.
	pub fn node_at_position(&self, x: f64, y: f64) -> Option<NodeId> {
		self.projected_nodes()
			.into_iter()
			.rev()
			.find(|(_, p)| self.shape.contains(p, x, y))
			.map(|(idx, _)| self.graph.nodes()[idx].id)
	}

	/// A click on the canvas. Returns the clicked node when selection is on.
	pub fn click(&self, x: f64, y: f64) -> Option<NodeId> {
		if !self.options.selection {
			return None;
		}
		let hit = self.node_at_position(x, y);
		if let Some(id) = hit {
			info!(
				"Clicked node {id}, connected to {:?}",
				self.graph.neighbors(id)
			);
		}
		hit
	}

	fn update_selection(&mut self) {
		let hit = self
			.pointer
			.and_then(|(x, y)| self.node_at_position(x, y));
		if hit == self.selected {
			return;
		}
		self.selected = hit;
		match hit {
			Some(id) => {
				debug!("Selected node {id}");
				self.info.set(InfoKey::Select, format!("Object {id}"));
			}
			None => self.info.remove(InfoKey::Select),
		}
	}

	/// Geometry colors until the texture is ready, the image afterwards.
	pub fn node_fill(&self, idx: usize, texture_ready: bool) -> NodeFill {
		if !texture_ready {
			return NodeFill::Color(self.color_of(idx));
		}
		let selected = self.selected == Some(self.graph.nodes()[idx].id);
		NodeFill::Texture {
			outline: selected.then_some(scene::SELECTED_COLOR),
		}
	}

	/// Label text and screen anchor of every node in front of the camera.
	pub fn labels(&self) -> Vec<(String, Projected)> {
		let vp = self.camera.view_projection();
		self.graph
			.nodes()
			.iter()
			.filter_map(|node| {
				let anchor = self
					.camera
					.project_with(&vp, scene::label_anchor(node.position))?;
				Some((node.label(), anchor))
			})
			.collect()
	}

	pub fn color_of(&self, idx: usize) -> u32 {
		let node = &self.graph.nodes()[idx];
		if self.selected == Some(node.id) {
			return scene::SELECTED_COLOR;
		}
		self.visuals.get(idx).map(|v| v.color).unwrap_or(0)
	}
}

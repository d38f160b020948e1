use glam::Vec3;

/// Caller-chosen node identifier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl std::fmt::Display for NodeId {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f, "{}", self.0)
	}
}

/// Payload attached to a node by the drawing.
#[derive(Clone, Debug, Default)]
pub struct NodeData {
	pub title: Option<String>,
}

/// A graph vertex. `position` is what gets drawn; the layout moves it.
#[derive(Clone, Debug)]
pub struct Node {
	pub id: NodeId,
	pub position: Vec3,
	pub data: NodeData,
	pub(super) nodes_to: Vec<NodeId>,
	pub(super) nodes_from: Vec<NodeId>,
}

impl Node {
	pub fn new(id: u32) -> Self {
		Self {
			id: NodeId(id),
			position: Vec3::ZERO,
			data: NodeData::default(),
			nodes_to: Vec::new(),
			nodes_from: Vec::new(),
		}
	}

	pub fn with_title(mut self, title: impl Into<String>) -> Self {
		self.data.title = Some(title.into());
		self
	}

	/// Label text: the title, or the id when there is none.
	pub fn label(&self) -> String {
		self.data
			.title
			.clone()
			.unwrap_or_else(|| self.id.to_string())
	}

	pub fn nodes_to(&self) -> &[NodeId] {
		&self.nodes_to
	}

	pub fn nodes_from(&self) -> &[NodeId] {
		&self.nodes_from
	}

	/// Directed check: does this node already have an edge to `other`.
	pub fn connected_to(&self, other: NodeId) -> bool {
		self.nodes_to.contains(&other)
	}
}

use super::NodeId;

/// Directed edge between two nodes of the same graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Edge {
	pub source: NodeId,
	pub target: NodeId,
}

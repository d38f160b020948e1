//! Graph container used by the drawings and the layout.
//!
//! Nodes keep insertion order; the layout and the renderer both iterate in
//! that order. Node ids are chosen by the caller, so adding a node whose id
//! is already present is rejected rather than overwritten.

mod edge;
mod node;

use std::collections::HashMap;

use log::warn;

pub use edge::Edge;
pub use node::{Node, NodeId};

#[derive(Clone, Debug, Default)]
pub struct Graph {
	nodes: Vec<Node>,
	edges: Vec<Edge>,
	index: HashMap<NodeId, usize>,
	limit: Option<usize>,
}

impl Graph {
	/// Create an empty graph. `limit` caps the number of nodes.
	pub fn new(limit: Option<usize>) -> Self {
		Self {
			limit,
			..Self::default()
		}
	}

	pub fn nodes(&self) -> &[Node] {
		&self.nodes
	}

	pub fn nodes_mut(&mut self) -> &mut [Node] {
		&mut self.nodes
	}

	pub fn node_count(&self) -> usize {
		self.nodes.len()
	}

	pub fn edge_count(&self) -> usize {
		self.edges.len()
	}

	pub fn reached_limit(&self) -> bool {
		self.limit.is_some_and(|limit| limit <= self.nodes.len())
	}

	/// Add `node` unless its id is taken or the limit is reached.
	pub fn add_node(&mut self, node: Node) -> bool {
		if self.index.contains_key(&node.id) {
			return false;
		}
		if self.reached_limit() {
			warn!("Node limit reached, dropping node {}", node.id);
			return false;
		}
		self.index.insert(node.id, self.nodes.len());
		self.nodes.push(node);
		true
	}

	/// Connect `source` to `target`. Fails when either node is unknown or the
	/// same directed edge already exists.
	pub fn add_edge(&mut self, source: NodeId, target: NodeId) -> bool {
		let (Some(&src), Some(&tgt)) = (self.index.get(&source), self.index.get(&target)) else {
			return false;
		};
		if self.nodes[src].connected_to(target) {
			return false;
		}
		self.nodes[src].nodes_to.push(target);
		self.nodes[tgt].nodes_from.push(source);
		self.edges.push(Edge { source, target });
		true
	}

	pub fn index_of(&self, id: NodeId) -> Option<usize> {
		self.index.get(&id).copied()
	}

	pub fn node(&self, id: NodeId) -> Option<&Node> {
		self.index_of(id).map(|idx| &self.nodes[idx])
	}

	#[cfg(test)]
	pub fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
		self.index_of(id).map(move |idx| &mut self.nodes[idx])
	}

	#[cfg(test)]
	pub fn edge(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
		self.edges
			.iter()
			.find(|e| e.source == source && e.target == target)
	}

	/// Ids connected to `id` in either direction.
	pub fn neighbors(&self, id: NodeId) -> Vec<NodeId> {
		let Some(node) = self.node(id) else {
			return Vec::new();
		};
		let mut out: Vec<NodeId> = node.nodes_to().to_vec();
		for from in node.nodes_from() {
			if !out.contains(from) {
				out.push(*from);
			}
		}
		out
	}

	/// Edges as pairs of node indices, in edge order.
	pub fn edge_indices(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
		self.edges
			.iter()
			.filter_map(|e| Some((self.index_of(e.source)?, self.index_of(e.target)?)))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn add_node_rejects_duplicate_ids() {
		let mut graph = Graph::new(None);
		assert!(graph.add_node(Node::new(1)));
		assert!(!graph.add_node(Node::new(1)));
		assert_eq!(graph.node_count(), 1);
	}

	#[test]
	fn add_node_respects_limit() {
		let mut graph = Graph::new(Some(2));
		assert!(graph.add_node(Node::new(0)));
		assert!(!graph.reached_limit());
		assert!(graph.add_node(Node::new(1)));
		assert!(graph.reached_limit());
		assert!(!graph.add_node(Node::new(2)));
		assert_eq!(graph.node_count(), 2);
	}

	#[test]
	fn add_edge_requires_known_nodes() {
		let mut graph = Graph::new(None);
		graph.add_node(Node::new(0));
		assert!(!graph.add_edge(NodeId(0), NodeId(7)));
		assert_eq!(graph.edge_count(), 0);
	}

	#[test]
	fn add_edge_is_directed_and_unique() {
		let mut graph = Graph::new(None);
		graph.add_node(Node::new(0));
		graph.add_node(Node::new(1));

		assert!(graph.add_edge(NodeId(0), NodeId(1)));
		assert!(!graph.add_edge(NodeId(0), NodeId(1)));
		// The reverse direction is a different edge.
		assert!(graph.add_edge(NodeId(1), NodeId(0)));
		assert_eq!(graph.edge_count(), 2);

		let a = graph.node(NodeId(0)).unwrap();
		assert_eq!(a.nodes_to(), &[NodeId(1)]);
		assert_eq!(a.nodes_from(), &[NodeId(1)]);
		assert!(graph.edge(NodeId(1), NodeId(0)).is_some());
	}

	#[test]
	fn neighbors_cover_both_directions_once() {
		let mut graph = Graph::new(None);
		for id in 0..3 {
			graph.add_node(Node::new(id));
		}
		graph.add_edge(NodeId(0), NodeId(1));
		graph.add_edge(NodeId(2), NodeId(0));
		graph.add_edge(NodeId(1), NodeId(0));

		let mut n = graph.neighbors(NodeId(0));
		n.sort();
		assert_eq!(n, vec![NodeId(1), NodeId(2)]);
		assert!(graph.neighbors(NodeId(9)).is_empty());
	}

	#[test]
	fn label_falls_back_to_id() {
		assert_eq!(Node::new(4).label(), "4");
		assert_eq!(Node::new(4).with_title("four").label(), "four");
	}

	#[test]
	fn edge_indices_follow_insertion_order() {
		let mut graph = Graph::new(None);
		graph.add_node(Node::new(10));
		graph.add_node(Node::new(20));
		graph.add_edge(NodeId(20), NodeId(10));
		assert_eq!(graph.edge_indices().collect::<Vec<_>>(), vec![(1, 0)]);
	}
}

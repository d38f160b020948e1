//! Procedural graph topologies for the drawings.

use std::collections::VecDeque;

use log::debug;

use crate::graph::{Graph, Node, NodeId};
use crate::random::{RandomSource, random_from_to};

/// Shape of the generated graph.
#[derive(Clone, Debug, PartialEq)]
pub enum Topology {
	/// `nodes` nodes connected in a cycle.
	Ring { nodes: u32 },
	/// Breadth-first random tree: every expanded node gets between one and
	/// `num_edges` children until `num_nodes` expansion steps have run.
	RandomTree { num_nodes: u32, num_edges: u32 },
	/// Nodes `0..nodes` joined by an explicit edge list.
	Edges { nodes: u32, edges: Vec<(u32, u32)> },
}

impl Default for Topology {
	fn default() -> Self {
		Topology::Ring { nodes: 16 }
	}
}

pub fn node_title(id: NodeId) -> String {
	format!("This is node {id}")
}

fn titled(id: u32) -> Node {
	let node = Node::new(id);
	let title = node_title(node.id);
	node.with_title(title)
}

/// Fill `graph` according to `topology`. Nodes or edges the graph rejects
/// (limit reached, duplicate id) are skipped.
pub fn populate(graph: &mut Graph, topology: &Topology, rng: &mut dyn RandomSource) {
	match topology {
		Topology::Ring { nodes } => {
			let edges = (0..*nodes).map(|i| (i, (i + 1) % nodes)).collect::<Vec<_>>();
			add_with_edges(graph, *nodes, &edges);
		}
		Topology::Edges { nodes, edges } => add_with_edges(graph, *nodes, edges),
		Topology::RandomTree {
			num_nodes,
			num_edges,
		} => random_tree(graph, *num_nodes, *num_edges, rng),
	}
}

fn add_with_edges(graph: &mut Graph, nodes: u32, edges: &[(u32, u32)]) {
	for id in 0..nodes {
		if !graph.add_node(titled(id)) && graph.reached_limit() {
			break;
		}
	}
	for &(source, target) in edges {
		if !graph.add_edge(NodeId(source), NodeId(target)) {
			debug!("Skipped edge {source} -> {target}");
		}
	}
}

fn random_tree(graph: &mut Graph, num_nodes: u32, num_edges: u32, rng: &mut dyn RandomSource) {
	if !graph.add_node(titled(0)) {
		return;
	}
	let mut queue = VecDeque::from([NodeId(0)]);
	let mut steps: u32 = 1;

	while steps < num_nodes && !graph.reached_limit() {
		let Some(parent) = queue.pop_front() else {
			break;
		};
		let children = random_from_to(rng, 1, num_edges.max(1) as i64);
		for i in 1..=children as u32 {
			// Child ids collide across steps; the graph drops repeats.
			let Some(id) = i.checked_mul(steps) else {
				break;
			};
			let child = NodeId(id);
			if graph.index_of(child).is_some() {
				continue;
			}
			if !graph.add_node(titled(id)) {
				break;
			}
			queue.push_back(child);
			graph.add_edge(parent, child);
		}
		steps += 1;
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::random::SeededRandom;

	#[test]
	fn ring_closes_the_cycle() {
		let mut graph = Graph::new(None);
		populate(&mut graph, &Topology::default(), &mut SeededRandom::new(1));

		assert_eq!(graph.node_count(), 16);
		assert_eq!(graph.edge_count(), 16);
		assert!(graph.edge(NodeId(15), NodeId(0)).is_some());
		assert_eq!(
			graph.node(NodeId(3)).unwrap().data.title.as_deref(),
			Some("This is node 3")
		);
	}

	#[test]
	fn ring_respects_limit() {
		let mut graph = Graph::new(Some(10));
		populate(&mut graph, &Topology::default(), &mut SeededRandom::new(1));

		assert_eq!(graph.node_count(), 10);
		// Edges touching dropped nodes are skipped: 0-1 .. 8-9.
		assert_eq!(graph.edge_count(), 9);
	}

	#[test]
	fn random_tree_with_one_edge_is_a_chain() {
		let mut graph = Graph::new(None);
		let topology = Topology::RandomTree {
			num_nodes: 5,
			num_edges: 1,
		};
		populate(&mut graph, &topology, &mut SeededRandom::new(9));

		// Each step adds child id 1 * step.
		let ids: Vec<u32> = graph.nodes().iter().map(|n| n.id.0).collect();
		assert_eq!(ids, vec![0, 1, 2, 3, 4]);
		assert_eq!(graph.edge_count(), 4);
		assert!(graph.edge(NodeId(2), NodeId(3)).is_some());
	}

	#[test]
	fn random_tree_is_connected_and_acyclic() {
		let mut graph = Graph::new(None);
		let topology = Topology::RandomTree {
			num_nodes: 30,
			num_edges: 4,
		};
		populate(&mut graph, &topology, &mut SeededRandom::new(1234));

		assert!(graph.node_count() > 1);
		assert_eq!(graph.edge_count(), graph.node_count() - 1);
		for node in graph.nodes().iter().skip(1) {
			assert_eq!(node.nodes_from().len(), 1);
		}
	}

	#[test]
	fn default_counts_give_two_nodes() {
		let mut graph = Graph::new(None);
		let topology = Topology::RandomTree {
			num_nodes: 2,
			num_edges: 1,
		};
		populate(&mut graph, &topology, &mut SeededRandom::new(5));
		assert_eq!(graph.node_count(), 2);
		assert_eq!(graph.edge_count(), 1);
	}

	#[test]
	fn explicit_edges_skip_unknown_nodes() {
		let mut graph = Graph::new(None);
		let topology = Topology::Edges {
			nodes: 3,
			edges: vec![(0, 1), (1, 2), (2, 9)],
		};
		populate(&mut graph, &topology, &mut SeededRandom::new(5));
		assert_eq!(graph.edge_count(), 2);
	}

	#[test]
	fn limit_cuts_generation_short() {
		let mut graph = Graph::new(Some(50));
		let topology = Topology::RandomTree {
			num_nodes: u32::MAX,
			num_edges: u32::MAX,
		};
		populate(&mut graph, &topology, &mut SeededRandom::new(3));
		assert_eq!(graph.node_count(), 50);
		assert_eq!(graph.edge_count(), 49);
	}
}

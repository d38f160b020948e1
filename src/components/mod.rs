pub mod simple_graph;

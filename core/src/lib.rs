//! sixdeg-core: shortest-path trees over a generic labeled graph.
//!
//! A pure Rust library with a generic adjacency-map graph and the queries
//! built on it: BFS shortest-path trees, the path from any vertex back to
//! the tree root, the vertices a tree never reached, and the average
//! separation of a tree.
//!
//! Every query works through the [`Graph`] trait, so any implementation
//! honoring its contracts can be traversed.

mod error;
mod graph;
mod traversal;

pub use error::{GraphError, GraphResult};
pub use graph::{AdjacencyMapGraph, Graph};
pub use traversal::{
    average_separation, bfs, degree_ranking, missing_vertices, path_to_root, separations,
    similar_centers, vertices_at_separation, CenterResult, DegreeResult,
};

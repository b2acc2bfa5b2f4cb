//! Error types for graph construction and traversal.

use thiserror::Error;

/// All errors raised by graph operations and tree queries.
///
/// Generic over the vertex type so callers get the offending vertex back.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GraphError<V> {
    /// An edge endpoint or traversal source is not in the vertex set.
    #[error("unknown vertex {0:?}")]
    UnknownVertex(V),

    /// No edge exists for the ordered pair.
    #[error("no edge from {from:?} to {to:?}")]
    UnknownEdge { from: V, to: V },

    /// The vertex is not part of the shortest-path tree (no finite path to the root).
    #[error("vertex {0:?} not found in tree")]
    NotInTree(V),

    /// A tree vertex has more than one outgoing edge, so its parent is ambiguous.
    #[error("vertex {vertex:?} has {out_degree} outgoing tree edges, expected at most one")]
    Branching { vertex: V, out_degree: usize },

    /// Walking toward the root revisited a vertex.
    #[error("walk from {0:?} never reached a root")]
    Cycle(V),
}

/// Convenience result type for graph operations.
pub type GraphResult<T, V> = Result<T, GraphError<V>>;

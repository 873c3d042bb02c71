//! Error types for graph operations.

use thiserror::Error;

use crate::graph::{NodeId, NodeIndex};

/// Result type alias for graph operations.
pub type GraphResult<T> = Result<T, GraphError>;

/// A structural rule of the graph that an operation tried to break.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Invariant {
    /// The root must never gain a parent.
    ParentOfRoot,
    /// The first node inserted becomes the root, so it cannot declare parents.
    RootWithParents,
}

impl std::fmt::Display for Invariant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Invariant::ParentOfRoot => f.write_str("cannot assign a parent to the root"),
            Invariant::RootWithParents => f.write_str("root node specified non-existent parent"),
        }
    }
}

/// Errors that can occur while building or analysing a graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// A node referenced by identifier is not in the graph.
    #[error("node not found: {id}")]
    NotFound { id: NodeId },

    /// A node handle points outside the arena.
    #[error("node index out of bounds: {index} (graph has {len} nodes)")]
    UnknownIndex { index: NodeIndex, len: usize },

    /// The operation would break a graph invariant.
    #[error("invariant violation: {0}")]
    InvariantViolation(Invariant),

    /// Kahn's algorithm could not account for every node.
    #[error("cycle detected: ordered {sorted} of {total} nodes")]
    CycleDetected { sorted: usize, total: usize },

    /// A matrix was not square.
    #[error("matrix is not square: row {row} has length {len}, expected {expected}")]
    Shape {
        row: usize,
        len: usize,
        expected: usize,
    },

    /// A generated or supplied identifier is already taken.
    #[error("duplicate node identifier: {id}")]
    DuplicateIdentifier { id: NodeId },

    /// A node pair holds edges in both directions and the incidence policy rejects it.
    #[error("edges in both directions between {a} and {b}")]
    BidirectionalEdge { a: NodeIndex, b: NodeIndex },

    /// Configuration could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),
}

impl GraphError {
    /// Whether this error reports a missing node (by identifier or by index).
    pub fn is_not_found(&self) -> bool {
        matches!(self, GraphError::NotFound { .. } | GraphError::UnknownIndex { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_messages() {
        let err = GraphError::InvariantViolation(Invariant::ParentOfRoot);
        assert_eq!(
            err.to_string(),
            "invariant violation: cannot assign a parent to the root"
        );

        let err = GraphError::InvariantViolation(Invariant::RootWithParents);
        assert!(err.to_string().contains("non-existent parent"));
    }

    #[test]
    fn not_found_covers_ids_and_indices() {
        let by_id = GraphError::NotFound {
            id: NodeId::from("missing"),
        };
        let by_index = GraphError::UnknownIndex {
            index: NodeIndex::new(7),
            len: 3,
        };
        assert!(by_id.is_not_found());
        assert!(by_index.is_not_found());
        assert!(!GraphError::CycleDetected { sorted: 1, total: 2 }.is_not_found());
    }
}

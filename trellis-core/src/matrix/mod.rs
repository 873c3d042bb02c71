//! Matrix Views
//!
//! Square integer matrices derived from a graph. Row and column `i` both
//! belong to the node at [`NodeIndex`] `i`, so the matrices follow insertion
//! order.
//!
//! - Adjacency: `m[i][j] == 1` when node `i` is a parent of node `j`.
//! - Incidence: adjacency plus `m[i][j] == -1` when node `i` is a child of
//!   node `j`.
//!
//! A pair with edges in both directions claims the same incidence cell twice.
//! [`IncidencePolicy`] decides whether the child value wins or the build
//! fails; [`IncidencePlanes`] keeps both relations apart.

mod symmetry;

pub use symmetry::is_antisymmetric;

use serde::Serialize;
use tracing::debug;

use crate::config::IncidencePolicy;
use crate::error::{GraphError, GraphResult};
use crate::graph::{Graph, NodeIndex};

/// A dense row-major integer matrix.
pub type Matrix = Vec<Vec<i32>>;

fn zeros(n: usize) -> Matrix {
    vec![vec![0; n]; n]
}

/// Parent and child relations kept in separate 0/1 planes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IncidencePlanes {
    /// `parent[i][j] == 1` when node `i` is a parent of node `j`.
    pub parent: Matrix,
    /// `child[i][j] == 1` when node `i` is a child of node `j`.
    pub child: Matrix,
}

impl IncidencePlanes {
    /// Fold the planes into a single signed matrix.
    pub fn collapse(&self, policy: IncidencePolicy) -> GraphResult<Matrix> {
        let n = self.parent.len();
        let mut matrix = zeros(n);

        for i in 0..n {
            for j in 0..n {
                let is_parent = self.parent[i][j] != 0;
                let is_child = self.child[i][j] != 0;

                if is_parent && is_child && policy == IncidencePolicy::Reject {
                    return Err(GraphError::BidirectionalEdge {
                        a: NodeIndex::new(i),
                        b: NodeIndex::new(j),
                    });
                }
                if is_parent {
                    matrix[i][j] = 1;
                }
                // Applied second, so it overwrites.
                if is_child {
                    matrix[i][j] = -1;
                }
            }
        }

        Ok(matrix)
    }
}

impl Graph {
    /// Build the adjacency matrix.
    pub fn adjacency_matrix(&self) -> Matrix {
        let mut matrix = zeros(self.len());
        for (index, node) in self.nodes() {
            for child in node.children() {
                matrix[index.index()][child.index()] = 1;
            }
        }
        matrix
    }

    /// Build the parent and child planes of the incidence matrix.
    pub fn incidence_planes(&self) -> IncidencePlanes {
        let mut child = zeros(self.len());
        for (index, node) in self.nodes() {
            for parent in node.parents() {
                child[index.index()][parent.index()] = 1;
            }
        }

        IncidencePlanes {
            parent: self.adjacency_matrix(),
            child,
        }
    }

    /// Build the incidence matrix under the configured [`IncidencePolicy`].
    ///
    /// # Errors
    ///
    /// [`GraphError::BidirectionalEdge`] if the policy is `Reject` and some
    /// pair of nodes (or a node with a self-loop) has edges both ways.
    pub fn incidence_matrix(&self) -> GraphResult<Matrix> {
        let policy = self.config().incidence;
        let matrix = self.incidence_planes().collapse(policy)?;
        debug!(nodes = self.len(), ?policy, "built incidence matrix");
        Ok(matrix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GraphConfig;
    use crate::graph::NewNode;

    fn diamond(config: GraphConfig) -> (Graph, [NodeIndex; 4]) {
        let mut graph = Graph::with_config(config);
        let a = graph.create_node(NewNode::new()).unwrap();
        let b = graph.create_node(NewNode::new().parent(a)).unwrap();
        let c = graph.create_node(NewNode::new().parent(a)).unwrap();
        let d = graph
            .create_node(NewNode::new().parent(b).parent(c))
            .unwrap();
        (graph, [a, b, c, d])
    }

    #[test]
    fn diamond_adjacency() {
        let (graph, _) = diamond(GraphConfig::default());
        assert_eq!(
            graph.adjacency_matrix(),
            vec![
                vec![0, 1, 1, 0],
                vec![0, 0, 0, 1],
                vec![0, 0, 0, 1],
                vec![0, 0, 0, 0],
            ]
        );
    }

    #[test]
    fn diamond_incidence() {
        let (graph, _) = diamond(GraphConfig::default());
        let matrix = graph.incidence_matrix().unwrap();
        assert_eq!(
            matrix,
            vec![
                vec![0, 1, 1, 0],
                vec![-1, 0, 0, 1],
                vec![-1, 0, 0, 1],
                vec![0, -1, -1, 0],
            ]
        );
        assert!(is_antisymmetric(&matrix).unwrap());
    }

    #[test]
    fn bidirectional_pair_overwrites_by_default() {
        let (mut graph, [_, b, c, d]) = diamond(GraphConfig::default());
        graph.create_edge(d, b).unwrap();

        let matrix = graph.incidence_matrix().unwrap();
        assert_eq!(matrix[b.index()][d.index()], -1);
        assert_eq!(matrix[d.index()][b.index()], -1);
        assert_eq!(matrix[c.index()][d.index()], 1);
        assert!(!is_antisymmetric(&matrix).unwrap());

        let planes = graph.incidence_planes();
        assert_eq!(planes.parent[b.index()][d.index()], 1);
        assert_eq!(planes.child[b.index()][d.index()], 1);
    }

    #[test]
    fn bidirectional_pair_rejected_when_configured() {
        let config = GraphConfig::default().with_incidence(IncidencePolicy::Reject);
        let (mut graph, [_, b, _, d]) = diamond(config);
        assert!(graph.incidence_matrix().is_ok());

        graph.create_edge(d, b).unwrap();
        let err = graph.incidence_matrix().unwrap_err();
        assert!(matches!(err, GraphError::BidirectionalEdge { a, b: other } if a == b && other == d));
    }

    #[test]
    fn self_loop_is_a_bidirectional_pair() {
        let config = GraphConfig::default().with_incidence(IncidencePolicy::Reject);
        let (mut graph, [_, b, _, _]) = diamond(config);
        graph.create_edge(b, b).unwrap();
        assert!(matches!(
            graph.incidence_matrix(),
            Err(GraphError::BidirectionalEdge { .. })
        ));
    }

    #[test]
    fn empty_graph_has_empty_matrices() {
        let graph = Graph::new();
        assert!(graph.adjacency_matrix().is_empty());
        assert!(graph.incidence_matrix().unwrap().is_empty());
    }
}

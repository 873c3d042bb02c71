//! Topological Ordering
//!
//! Kahn's algorithm, run from the sinks upward: a node becomes ready once
//! all of its children have been emitted, so descendants always come before
//! their ancestors.
//!
//! # Algorithm
//!
//! 1. Seed a FIFO queue with every node that has no children, in graph order.
//! 2. Pop the front node and emit it.
//! 3. For each parent entry of that node, retire one edge. A parent whose last
//!    child edge is retired joins the back of the queue.
//! 4. If fewer nodes were emitted than the graph holds, some nodes sit on or
//!    above a cycle.
//!
//! Ties are broken purely by queue order. When several orders are valid,
//! callers should not rely on any particular one beyond that.
//!
//! [`Graph::topological_sort`] retires edges in a counter table and leaves the
//! graph alone. [`Graph::drain_topological_order`] retires them from the real
//! edge lists and leaves the graph with no edges.

use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use super::node::{EdgeList, NodeIndex};
use super::store::Graph;
use crate::error::{GraphError, GraphResult};

impl Graph {
    /// Compute a children-before-parents order without modifying the graph.
    ///
    /// # Errors
    ///
    /// [`GraphError::CycleDetected`] if not every node could be ordered.
    pub fn topological_sort(&self) -> GraphResult<Vec<NodeIndex>> {
        // Remaining child edges per node.
        let mut remaining: Vec<usize> = self
            .nodes()
            .map(|(_, node)| node.children().len())
            .collect();
        let mut queue: VecDeque<NodeIndex> = self.sinks().into();
        let mut order = Vec::with_capacity(self.len());

        while let Some(index) = queue.pop_front() {
            order.push(index);

            for &parent in self[index].parents() {
                let count = &mut remaining[parent.index()];
                if *count == 0 {
                    continue;
                }
                *count -= 1;
                if *count == 0 {
                    trace!(%parent, "ready");
                    queue.push_back(parent);
                }
            }
        }

        self.finish_sort(order)
    }

    /// Compute the same order as [`topological_sort`](Self::topological_sort)
    /// while deleting every edge it walks.
    ///
    /// After a successful run no node has parents or children. If a cycle is
    /// found the edges already retired stay deleted.
    pub fn drain_topological_order(&mut self) -> GraphResult<Vec<NodeIndex>> {
        let mut queue: VecDeque<NodeIndex> = self.sinks().into();
        let mut order = Vec::with_capacity(self.len());

        while let Some(index) = queue.pop_front() {
            order.push(index);

            let parents: EdgeList = self[index].parents().into();
            for parent in parents {
                let emptied = {
                    let parent_node = self.node_mut(parent)?;
                    parent_node.remove_child(index) && parent_node.is_sink()
                };
                self.node_mut(index)?.remove_parent(parent);
                if emptied {
                    trace!(%parent, "ready");
                    queue.push_back(parent);
                }
            }
        }

        self.finish_sort(order)
    }

    /// True if every node can be topologically ordered.
    pub fn is_acyclic(&self) -> bool {
        self.topological_sort().is_ok()
    }

    fn finish_sort(&self, order: Vec<NodeIndex>) -> GraphResult<Vec<NodeIndex>> {
        if order.len() != self.len() {
            warn!(sorted = order.len(), total = self.len(), "cycle detected");
            return Err(GraphError::CycleDetected {
                sorted: order.len(),
                total: self.len(),
            });
        }

        debug!(nodes = order.len(), "topological sort complete");
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::NewNode;

    /// A -> B, A -> C, B -> D, C -> D
    fn diamond() -> (Graph, [NodeIndex; 4]) {
        let mut graph = Graph::new();
        let a = graph.create_node(NewNode::new()).unwrap();
        let b = graph.create_node(NewNode::new().parent(a)).unwrap();
        let c = graph.create_node(NewNode::new().parent(a)).unwrap();
        let d = graph
            .create_node(NewNode::new().parent(b).parent(c))
            .unwrap();
        (graph, [a, b, c, d])
    }

    fn position(order: &[NodeIndex], index: NodeIndex) -> usize {
        order.iter().position(|&i| i == index).unwrap()
    }

    #[test]
    fn diamond_sorts_bottom_up() {
        let (graph, [a, b, c, d]) = diamond();
        let order = graph.topological_sort().unwrap();

        assert_eq!(order.len(), 4);
        assert_eq!(order[0], d);
        assert_eq!(order[3], a);
        assert!(position(&order, b) < position(&order, a));
        assert!(position(&order, c) < position(&order, a));
        // FIFO discovery: D lists B before C.
        assert_eq!(order, vec![d, b, c, a]);
    }

    #[test]
    fn read_only_sort_keeps_edges() {
        let (graph, _) = diamond();
        let before = graph.edge_count();
        graph.topological_sort().unwrap();
        assert_eq!(graph.edge_count(), before);
    }

    #[test]
    fn drain_matches_read_only_and_consumes_edges() {
        let (mut graph, _) = diamond();
        let expected = graph.topological_sort().unwrap();

        let drained = graph.drain_topological_order().unwrap();
        assert_eq!(drained, expected);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.len(), 4);
        assert!(graph.nodes().all(|(_, node)| node.is_source() && node.is_sink()));
    }

    #[test]
    fn repeated_edges_are_counted() {
        let (mut graph, [a, b, _, d]) = diamond();
        graph.create_edge(b, d).unwrap();

        let order = graph.topological_sort().unwrap();
        assert_eq!(order.first(), Some(&d));
        assert_eq!(order.last(), Some(&a));

        assert_eq!(graph.drain_topological_order().unwrap(), order);
        assert_eq!(graph.edge_count(), 0);
    }

    #[test]
    fn detects_cycle() {
        let (mut graph, [a, b, c, d]) = diamond();
        graph.create_edge(d, b).unwrap();

        let err = graph.topological_sort().unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { total: 4, .. }));
        assert!(!graph.is_acyclic());

        let err = graph.drain_topological_order().unwrap_err();
        assert!(matches!(err, GraphError::CycleDetected { sorted: 0, total: 4 }));
        // Nothing was a sink, so nothing was retired.
        assert_eq!(graph[a].children(), &[b, c]);
    }

    #[test]
    fn empty_graph_sorts_to_nothing() {
        let graph = Graph::new();
        assert!(graph.topological_sort().unwrap().is_empty());
    }

    #[test]
    fn disconnected_nodes_keep_graph_order() {
        let mut graph = Graph::new();
        let x = graph.create_node(NewNode::new()).unwrap();
        let y = graph.create_node(NewNode::new()).unwrap();
        let z = graph.create_node(NewNode::new()).unwrap();
        assert_eq!(graph.topological_sort().unwrap(), vec![x, y, z]);
    }
}

//! Node Store
//!
//! The [`Graph`] owns every node in an insertion-ordered arena. Nodes refer to
//! each other by [`NodeIndex`], and every edge is stored twice: once in the
//! parent's child list and once in the child's parent list. All mutation goes
//! through the methods here, which keep the two sides paired.
//!
//! The first node inserted is the root. It never has parents.

use std::ops::Index;

use indexmap::IndexMap;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use tracing::{debug, trace};

use super::id::IdGenerator;
use super::node::{Node, NodeId, NodeIndex, Values};
use crate::config::GraphConfig;
use crate::error::{GraphError, GraphResult, Invariant};

/// A reference to an existing node, either by handle or by identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeRef {
    Index(NodeIndex),
    Id(NodeId),
}

impl From<NodeIndex> for NodeRef {
    fn from(index: NodeIndex) -> Self {
        NodeRef::Index(index)
    }
}

impl From<NodeId> for NodeRef {
    fn from(id: NodeId) -> Self {
        NodeRef::Id(id)
    }
}

impl From<&NodeId> for NodeRef {
    fn from(id: &NodeId) -> Self {
        NodeRef::Id(id.clone())
    }
}

impl From<&str> for NodeRef {
    fn from(id: &str) -> Self {
        NodeRef::Id(NodeId::from(id))
    }
}

impl From<String> for NodeRef {
    fn from(id: String) -> Self {
        NodeRef::Id(NodeId::from(id))
    }
}

/// Description of a node to be created by [`Graph::create_node`].
///
/// ```rust
/// use trellis_core::{Graph, NewNode};
///
/// let mut graph = Graph::new();
/// let root = graph.create_node(NewNode::new().value("kind", "root")).unwrap();
/// let leaf = graph.create_node(NewNode::new().parent(root)).unwrap();
/// assert_eq!(graph[root].children(), &[leaf]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct NewNode {
    id: Option<NodeId>,
    values: Values,
    parents: Vec<NodeRef>,
    children: Vec<NodeRef>,
}

impl NewNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a caller-chosen identifier instead of a generated one.
    pub fn with_id(id: impl Into<NodeId>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    /// Attach one metadata entry.
    pub fn value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    /// Replace all metadata.
    pub fn values(mut self, values: Values) -> Self {
        self.values = values;
        self
    }

    /// Request an edge from an existing node to the new one.
    pub fn parent(mut self, parent: impl Into<NodeRef>) -> Self {
        self.parents.push(parent.into());
        self
    }

    pub fn parents<I, R>(mut self, parents: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<NodeRef>,
    {
        self.parents.extend(parents.into_iter().map(Into::into));
        self
    }

    /// Request an edge from the new node to an existing one.
    pub fn child(mut self, child: impl Into<NodeRef>) -> Self {
        self.children.push(child.into());
        self
    }

    pub fn children<I, R>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<NodeRef>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }
}

/// An in-memory directed graph.
#[derive(Debug)]
pub struct Graph {
    /// All nodes, in insertion order. A node's position is its [`NodeIndex`].
    nodes: IndexMap<NodeId, Node>,

    ids: IdGenerator,

    config: GraphConfig,
}

impl Graph {
    /// Create an empty graph with the default configuration.
    pub fn new() -> Self {
        Self::with_config(GraphConfig::default())
    }

    /// Create an empty graph with the given configuration.
    pub fn with_config(config: GraphConfig) -> Self {
        Self {
            nodes: IndexMap::new(),
            ids: IdGenerator::from_strategy(&config.ids),
            config,
        }
    }

    pub fn config(&self) -> &GraphConfig {
        &self.config
    }

    /// Get the total number of nodes in the graph.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of parent-to-child edges, counting repeated edges.
    pub fn edge_count(&self) -> usize {
        self.nodes.values().map(|node| node.children().len()).sum()
    }

    /// The first node ever inserted, if any.
    pub fn root(&self) -> Option<NodeIndex> {
        if self.nodes.is_empty() {
            None
        } else {
            Some(NodeIndex::new(0))
        }
    }

    pub fn is_root(&self, index: NodeIndex) -> bool {
        self.root() == Some(index)
    }

    /// Get a node by handle.
    pub fn node(&self, index: NodeIndex) -> Option<&Node> {
        self.nodes.get_index(index.index()).map(|(_, node)| node)
    }

    /// Get a node by identifier.
    pub fn node_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Iterate over all nodes in insertion order.
    pub fn nodes(&self) -> impl ExactSizeIterator<Item = (NodeIndex, &Node)> + '_ {
        self.nodes
            .values()
            .enumerate()
            .map(|(i, node)| (NodeIndex::new(i), node))
    }

    /// Nodes with no children, in insertion order.
    pub fn sinks(&self) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, node)| node.is_sink())
            .map(|(index, _)| index)
            .collect()
    }

    /// Nodes with no parents, in insertion order. The root is always first.
    pub fn sources(&self) -> Vec<NodeIndex> {
        self.nodes()
            .filter(|(_, node)| node.is_source())
            .map(|(index, _)| index)
            .collect()
    }

    /// Find the position of the node with the given identifier.
    ///
    /// Returns `None` if no such node exists.
    pub fn find_node(&self, id: &str) -> Option<NodeIndex> {
        self.nodes.get_index_of(id).map(NodeIndex::new)
    }

    /// All nodes whose metadata contains every pair in `predicate`.
    pub fn find_nodes_by_values<K, V>(&self, predicate: &IndexMap<K, V>) -> Vec<&Node>
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        self.nodes
            .values()
            .filter(|node| node.matches(predicate))
            .collect()
    }

    /// Create a node and wire it to the requested parents and children.
    ///
    /// Everything is validated before the graph is touched, so a failed call
    /// leaves it unchanged.
    ///
    /// # Errors
    ///
    /// - [`GraphError::InvariantViolation`] if the graph is empty and parents
    ///   were requested, or if a requested child is the root.
    /// - [`GraphError::NotFound`] / [`GraphError::UnknownIndex`] if a requested
    ///   parent or child does not exist.
    /// - [`GraphError::DuplicateIdentifier`] if the identifier is taken.
    pub fn create_node(&mut self, request: NewNode) -> GraphResult<NodeIndex> {
        let NewNode {
            id,
            values,
            parents,
            children,
        } = request;

        if self.is_empty() && !parents.is_empty() {
            return Err(GraphError::InvariantViolation(Invariant::RootWithParents));
        }

        let children = children
            .iter()
            .map(|child| {
                let index = self.resolve(child)?;
                if self.is_root(index) {
                    return Err(GraphError::InvariantViolation(Invariant::ParentOfRoot));
                }
                Ok(index)
            })
            .collect::<GraphResult<Vec<_>>>()?;

        let parents = parents
            .iter()
            .map(|parent| self.resolve(parent))
            .collect::<GraphResult<Vec<_>>>()?;

        let id = match id {
            Some(id) => id,
            None => self.ids.next_id(),
        };
        if self.nodes.contains_key(&id) {
            return Err(GraphError::DuplicateIdentifier { id });
        }

        let index = NodeIndex::new(self.nodes.len());
        let mut node = Node::new(id.clone(), values);
        for &parent in &parents {
            node.add_parent(parent);
        }
        for &child in &children {
            node.add_child(child);
        }
        self.nodes.insert(id, node);

        for &child in &children {
            if let Some((_, child)) = self.nodes.get_index_mut(child.index()) {
                child.add_parent(index);
            }
        }
        for &parent in &parents {
            if let Some((_, parent)) = self.nodes.get_index_mut(parent.index()) {
                parent.add_child(index);
            }
        }

        debug!(
            node = %self.nodes[index.index()].id(),
            %index,
            parents = parents.len(),
            children = children.len(),
            root = self.is_root(index),
            "created node"
        );

        Ok(index)
    }

    /// Add a `parent -> child` edge.
    ///
    /// Not idempotent: calling this twice with the same pair records the edge
    /// twice on both sides.
    pub fn create_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> GraphResult<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.is_root(child) {
            return Err(GraphError::InvariantViolation(Invariant::ParentOfRoot));
        }

        self.node_mut(parent)?.add_child(child);
        self.node_mut(child)?.add_parent(parent);

        debug!(%parent, %child, "created edge");
        Ok(())
    }

    /// Remove one `parent -> child` edge.
    ///
    /// Each side drops its first matching entry. A side with no matching entry
    /// is left alone. Returns whether anything was removed.
    pub fn delete_edge(&mut self, parent: NodeIndex, child: NodeIndex) -> GraphResult<bool> {
        self.check(parent)?;
        self.check(child)?;

        let from_parent = self.node_mut(parent)?.remove_child(child);
        let from_child = self.node_mut(child)?.remove_parent(parent);

        if from_parent || from_child {
            debug!(%parent, %child, "deleted edge");
        } else {
            trace!(%parent, %child, "no edge to delete");
        }
        Ok(from_parent || from_child)
    }

    /// Export the graph as JSON.
    pub fn to_json(&self) -> GraphResult<String> {
        Ok(serde_json::to_string(self)?)
    }

    fn resolve(&self, node: &NodeRef) -> GraphResult<NodeIndex> {
        match node {
            NodeRef::Index(index) => {
                self.check(*index)?;
                Ok(*index)
            }
            NodeRef::Id(id) => self
                .find_node(id.as_str())
                .ok_or_else(|| GraphError::NotFound { id: id.clone() }),
        }
    }

    fn check(&self, index: NodeIndex) -> GraphResult<()> {
        if index.index() < self.nodes.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownIndex {
                index,
                len: self.nodes.len(),
            })
        }
    }

    pub(crate) fn node_mut(&mut self, index: NodeIndex) -> GraphResult<&mut Node> {
        let len = self.nodes.len();
        self.nodes
            .get_index_mut(index.index())
            .map(|(_, node)| node)
            .ok_or(GraphError::UnknownIndex { index, len })
    }
}

impl Default for Graph {
    fn default() -> Self {
        Self::new()
    }
}

impl Index<NodeIndex> for Graph {
    type Output = Node;

    /// Panics if `index` did not come from this graph.
    fn index(&self, index: NodeIndex) -> &Node {
        &self.nodes[index.index()]
    }
}

impl Serialize for Graph {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nodes: Vec<&Node> = self.nodes.values().collect();
        let mut state = serializer.serialize_struct("Graph", 2)?;
        state.serialize_field("root", &self.root())?;
        state.serialize_field("nodes", &nodes)?;
        state.end()
    }
}

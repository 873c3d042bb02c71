//! Graph Nodes
//!
//! This module defines the node type stored in the graph arena and the two
//! handles used to refer to it: the user-facing [`NodeId`] and the positional
//! [`NodeIndex`].

use std::borrow::Borrow;
use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;
use smallvec::SmallVec;

/// Edge list storage. Most nodes have only a handful of neighbours.
pub type EdgeList = SmallVec<[NodeIndex; 4]>;

/// Arbitrary string metadata attached to a node.
pub type Values = IndexMap<String, String>;

/// Unique identifier for a node in the graph.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    /// Wrap a raw identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Get the raw identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// Lets the arena be queried with a plain `&str`.
impl Borrow<str> for NodeId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Position of a node in the graph's insertion order.
///
/// The arena is append-only, so an index stays valid for the lifetime of the
/// graph that produced it. It is also the row/column used by the matrix views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeIndex(usize);

impl NodeIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    /// Get the raw position.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for NodeIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// A node in the directed graph.
#[derive(Debug, Clone, Serialize)]
pub struct Node {
    /// Unique identifier for this node.
    id: NodeId,

    /// Nodes that list this node as a child, in edge creation order.
    parents: EdgeList,

    /// Nodes this node points to, in edge creation order.
    children: EdgeList,

    /// User metadata.
    values: Values,
}

impl Node {
    pub(crate) fn new(id: NodeId, values: Values) -> Self {
        Self {
            id,
            parents: EdgeList::new(),
            children: EdgeList::new(),
            values,
        }
    }

    /// Get the node's ID.
    pub fn id(&self) -> &NodeId {
        &self.id
    }

    /// Parent handles. May contain repeats if an edge was created twice.
    pub fn parents(&self) -> &[NodeIndex] {
        &self.parents
    }

    /// Child handles. May contain repeats if an edge was created twice.
    pub fn children(&self) -> &[NodeIndex] {
        &self.children
    }

    /// Get all metadata.
    pub fn values(&self) -> &Values {
        &self.values
    }

    /// Look up a single metadata entry.
    pub fn value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// True when the node has no outgoing edges.
    pub fn is_sink(&self) -> bool {
        self.children.is_empty()
    }

    /// True when the node has no incoming edges.
    pub fn is_source(&self) -> bool {
        self.parents.is_empty()
    }

    /// Conjunctive match: every pair in `predicate` must be present with an
    /// equal value. An empty predicate matches every node.
    pub fn matches<K, V>(&self, predicate: &IndexMap<K, V>) -> bool
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        predicate
            .iter()
            .all(|(key, value)| self.value(key.as_ref()) == Some(value.as_ref()))
    }

    pub(crate) fn add_parent(&mut self, parent: NodeIndex) {
        self.parents.push(parent);
    }

    pub(crate) fn add_child(&mut self, child: NodeIndex) {
        self.children.push(child);
    }

    /// Remove the first occurrence of `parent`. Returns whether one was found.
    pub(crate) fn remove_parent(&mut self, parent: NodeIndex) -> bool {
        remove_first(&mut self.parents, parent)
    }

    /// Remove the first occurrence of `child`. Returns whether one was found.
    pub(crate) fn remove_child(&mut self, child: NodeIndex) -> bool {
        remove_first(&mut self.children, child)
    }
}

fn remove_first(list: &mut EdgeList, target: NodeIndex) -> bool {
    match list.iter().position(|&entry| entry == target) {
        Some(pos) => {
            list.remove(pos);
            true
        }
        None => false,
    }
}

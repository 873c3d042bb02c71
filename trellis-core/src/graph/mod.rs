//! Directed Graph
//!
//! This module implements the node arena and everything that mutates or
//! walks it.
//!
//! # Overview
//!
//! - Nodes live in an append-only arena owned by [`Graph`] and are addressed
//!   by [`NodeIndex`] (their insertion position) or [`NodeId`] (their name).
//! - An edge `P -> C` is recorded in P's child list and in C's parent list.
//!   Every mutation updates both lists together.
//! - The first node inserted is the root and may never gain a parent.
//!
//! # Design Decisions
//!
//! 1. Nodes refer to each other by index, never by reference, so the graph
//!    can hand out `&mut` access to one node at a time without aliasing.
//!
//! 2. Lookup by identifier goes through the arena's hash index, while the
//!    insertion order is preserved for matrix rows and sort tie-breaks.
//!
//! 3. Edge lists keep duplicates. Creating the same edge twice records it
//!    twice, and deleting it once removes one copy.

mod id;
mod node;
mod sort;
mod store;

pub use id::IdGenerator;
pub use node::{EdgeList, Node, NodeId, NodeIndex, Values};
pub use store::{Graph, NewNode, NodeRef};

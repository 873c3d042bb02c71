//! Trellis Core
//!
//! This crate provides an in-memory directed graph whose nodes carry explicit
//! parent and child lists. It implements:
//!
//! - Node creation with requested parents and children, wired on both ends
//! - Edge creation and removal that keep both endpoints consistent
//! - Lookup by identifier and by metadata
//! - Kahn's topological sort, in read-only and consuming forms
//! - Adjacency and incidence matrices, and an antisymmetry check
//!
//! The crate is designed to be used both as a native Rust library and, with
//! the `python` feature, as a Python extension module via PyO3.
//!
//! # Architecture
//!
//! - `graph`: node arena, edge management, lookup and ordering
//! - `matrix`: matrix views over a graph
//! - `config`: identifier and incidence settings
//! - `error`: the shared error type
//!
//! # Example
//!
//! ```rust
//! use trellis_core::{Graph, NewNode};
//!
//! let mut graph = Graph::new();
//! let a = graph.create_node(NewNode::new()).unwrap();
//! let b = graph.create_node(NewNode::new().parent(a)).unwrap();
//! let c = graph.create_node(NewNode::new().parent(a)).unwrap();
//! let d = graph.create_node(NewNode::new().parent(b).parent(c)).unwrap();
//!
//! // Descendants come before ancestors.
//! assert_eq!(graph.topological_sort().unwrap(), vec![d, b, c, a]);
//!
//! let incidence = graph.incidence_matrix().unwrap();
//! assert!(trellis_core::matrix::is_antisymmetric(&incidence).unwrap());
//! ```

pub mod config;
pub mod error;
pub mod graph;
pub mod matrix;

#[cfg(feature = "python")]
mod python;

pub use config::{GraphConfig, IdStrategy, IncidencePolicy};
pub use error::{GraphError, GraphResult, Invariant};
pub use graph::{Graph, NewNode, Node, NodeId, NodeIndex, NodeRef};
pub use matrix::{IncidencePlanes, Matrix};

#[cfg(feature = "python")]
use pyo3::prelude::*;

/// Python module definition.
///
/// This function is called by Python when importing the module.
/// It registers all Python-exposed types and functions.
#[cfg(feature = "python")]
#[pymodule]
fn _core(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<python::PyGraph>()?;
    m.add_function(wrap_pyfunction!(python::is_antisymmetric, m)?)?;

    // Add version info
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;

    Ok(())
}

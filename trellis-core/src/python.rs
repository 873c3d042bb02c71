//! Python bindings.
//!
//! Nodes cross the boundary as their string identifiers. Graph errors become
//! `ValueError` when the input was wrong and `RuntimeError` when the graph
//! shape prevents the computation.

use std::collections::HashMap;

use indexmap::IndexMap;
use pyo3::exceptions::{PyRuntimeError, PyValueError};
use pyo3::prelude::*;

use crate::config::GraphConfig;
use crate::error::GraphError;
use crate::graph::{Graph, NewNode, NodeIndex};
use crate::matrix::{self, Matrix};

impl From<GraphError> for PyErr {
    fn from(err: GraphError) -> Self {
        match err {
            GraphError::NotFound { .. }
            | GraphError::UnknownIndex { .. }
            | GraphError::InvariantViolation(_)
            | GraphError::DuplicateIdentifier { .. }
            | GraphError::Shape { .. } => PyValueError::new_err(err.to_string()),
            GraphError::CycleDetected { .. }
            | GraphError::BidirectionalEdge { .. }
            | GraphError::Config(_) => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Python-exposed graph.
#[pyclass(name = "Graph", unsendable)]
pub struct PyGraph {
    graph: Graph,
}

impl PyGraph {
    fn lookup(&self, id: &str) -> PyResult<NodeIndex> {
        self.graph.find_node(id).ok_or_else(|| {
            GraphError::NotFound {
                id: id.into(),
            }
            .into()
        })
    }

    fn ids(&self, order: Vec<NodeIndex>) -> Vec<String> {
        order
            .into_iter()
            .map(|index| self.graph[index].id().to_string())
            .collect()
    }
}

#[pymethods]
impl PyGraph {
    /// Create a graph, optionally from a JSON config string.
    #[new]
    #[pyo3(signature = (config = None))]
    fn new(config: Option<&str>) -> PyResult<Self> {
        let config = match config {
            Some(json) => GraphConfig::from_json(json)?,
            None => GraphConfig::default(),
        };
        Ok(Self {
            graph: Graph::with_config(config),
        })
    }

    /// Create a node and return its identifier.
    #[pyo3(signature = (values = None, parents = Vec::new(), children = Vec::new(), id = None))]
    fn create_node(
        &mut self,
        values: Option<HashMap<String, String>>,
        parents: Vec<String>,
        children: Vec<String>,
        id: Option<String>,
    ) -> PyResult<String> {
        let spec = match id {
            Some(id) => NewNode::with_id(id),
            None => NewNode::new(),
        };
        let values: IndexMap<String, String> = values.unwrap_or_default().into_iter().collect();
        let spec = spec.values(values).parents(parents).children(children);

        let index = self.graph.create_node(spec)?;
        Ok(self.graph[index].id().to_string())
    }

    fn create_edge(&mut self, parent: &str, child: &str) -> PyResult<()> {
        let parent = self.lookup(parent)?;
        let child = self.lookup(child)?;
        Ok(self.graph.create_edge(parent, child)?)
    }

    fn delete_edge(&mut self, parent: &str, child: &str) -> PyResult<bool> {
        let parent = self.lookup(parent)?;
        let child = self.lookup(child)?;
        Ok(self.graph.delete_edge(parent, child)?)
    }

    /// Position of the node, or -1 if absent.
    fn find_node(&self, id: &str) -> i64 {
        self.graph
            .find_node(id)
            .map_or(-1, |index| index.index() as i64)
    }

    fn find_nodes_by_values(&self, values: HashMap<String, String>) -> Vec<String> {
        let predicate: IndexMap<String, String> = values.into_iter().collect();
        self.graph
            .find_nodes_by_values(&predicate)
            .into_iter()
            .map(|node| node.id().to_string())
            .collect()
    }

    /// Identifiers in children-before-parents order.
    #[pyo3(signature = (consume = false))]
    fn topological_sort(&mut self, consume: bool) -> PyResult<Vec<String>> {
        let order = if consume {
            self.graph.drain_topological_order()?
        } else {
            self.graph.topological_sort()?
        };
        Ok(self.ids(order))
    }

    fn adjacency_matrix(&self) -> Matrix {
        self.graph.adjacency_matrix()
    }

    fn incidence_matrix(&self) -> PyResult<Matrix> {
        Ok(self.graph.incidence_matrix()?)
    }

    fn to_json(&self) -> PyResult<String> {
        Ok(self.graph.to_json()?)
    }

    fn __len__(&self) -> usize {
        self.graph.len()
    }
}

/// Check a square integer matrix for antisymmetry.
#[pyfunction]
pub fn is_antisymmetric(matrix: Vec<Vec<i64>>) -> PyResult<bool> {
    Ok(matrix::is_antisymmetric(&matrix)?)
}

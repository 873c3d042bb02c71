//! Graph configuration.
//!
//! Every field has a default, so an empty JSON object is a valid config.

use serde::{Deserialize, Serialize};

use crate::error::GraphResult;

/// Settings applied to a [`Graph`](crate::graph::Graph) at construction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    /// How node identifiers are generated.
    #[serde(default)]
    pub ids: IdStrategy,

    /// How the incidence matrix treats node pairs with edges in both directions.
    #[serde(default)]
    pub incidence: IncidencePolicy,
}

impl GraphConfig {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> GraphResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Builder-style override of the identifier strategy.
    pub fn with_ids(mut self, ids: IdStrategy) -> Self {
        self.ids = ids;
        self
    }

    /// Builder-style override of the incidence policy.
    pub fn with_incidence(mut self, incidence: IncidencePolicy) -> Self {
        self.incidence = incidence;
        self
    }
}

/// Identifier generation strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "lowercase")]
pub enum IdStrategy {
    /// `<prefix><n>` with a per-graph counter starting at 0.
    Sequential {
        #[serde(default = "default_prefix")]
        prefix: String,
    },

    /// 40 lowercase hex characters from a random generator.
    /// A fixed seed makes the sequence reproducible.
    Random {
        #[serde(default)]
        seed: Option<u64>,
    },
}

fn default_prefix() -> String {
    "n".to_string()
}

impl Default for IdStrategy {
    fn default() -> Self {
        IdStrategy::Sequential {
            prefix: default_prefix(),
        }
    }
}

/// What to do when a cell of the incidence matrix is claimed by both a
/// parent and a child relationship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncidencePolicy {
    /// The child relationship (-1) overwrites the parent one (1).
    #[default]
    Overwrite,

    /// Fail with [`GraphError::BidirectionalEdge`](crate::GraphError::BidirectionalEdge).
    Reject,
}

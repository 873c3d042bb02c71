//! Node identifier generation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::node::NodeId;
use crate::config::IdStrategy;

/// Produces identifiers for new nodes.
///
/// Generators do not know what is already in the graph; the graph checks
/// every candidate for collisions before inserting it.
#[derive(Debug)]
pub enum IdGenerator {
    Sequential { prefix: String, next: u64 },
    Random(StdRng),
}

impl IdGenerator {
    pub fn from_strategy(strategy: &IdStrategy) -> Self {
        match strategy {
            IdStrategy::Sequential { prefix } => IdGenerator::Sequential {
                prefix: prefix.clone(),
                next: 0,
            },
            IdStrategy::Random { seed } => {
                let rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(*seed),
                    None => StdRng::from_entropy(),
                };
                IdGenerator::Random(rng)
            }
        }
    }

    /// Produce the next identifier.
    pub fn next_id(&mut self) -> NodeId {
        match self {
            IdGenerator::Sequential { prefix, next } => {
                let id = format!("{prefix}{next}");
                *next += 1;
                NodeId::from(id)
            }
            IdGenerator::Random(rng) => {
                let bytes: [u8; 20] = rng.gen();
                NodeId::from(hex::encode(bytes))
            }
        }
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::from_strategy(&IdStrategy::default())
    }
}

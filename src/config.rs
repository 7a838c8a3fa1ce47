use crate::error::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const DEFAULT_MAX_EVALUATE: usize = 2500;
pub const DEFAULT_MAX_NODES: usize = 2500;
pub const DEFAULT_MAX_PLY: usize = 20;

/// Runtime tunables. Missing JSON fields fall back to the defaults.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Positions evaluated per turn before deepening stops.
    pub max_evaluate: usize,
    /// Live tree nodes, including the retained game line.
    pub max_nodes: usize,
    /// Hard ceiling for best-line descent.
    pub max_ply: usize,
    pub forced_jumps: bool,
    /// Tie-break seed; `None` seeds from the wall clock.
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_evaluate: DEFAULT_MAX_EVALUATE,
            max_nodes: DEFAULT_MAX_NODES,
            max_ply: DEFAULT_MAX_PLY,
            forced_jumps: true,
            seed: None,
        }
    }
}

impl EngineConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Double the per-turn effort; node budget follows the evaluation budget.
    pub fn smarter(&mut self) {
        self.max_evaluate = self.max_evaluate.saturating_mul(2);
        self.max_nodes = self.max_evaluate;
    }

    pub fn dumber(&mut self) {
        if self.max_evaluate > 1 {
            self.max_evaluate /= 2;
            self.max_nodes = self.max_evaluate;
        }
    }
}

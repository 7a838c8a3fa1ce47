//! Move tree, generator, evaluator and the search that drives them.

pub mod controller;
pub mod eval;
pub mod movegen;
pub mod noise;
pub mod tree;

pub use controller::{back_up, SearchStats, Searcher, DECIDED, DEPTH_PENALTY};
pub use eval::{breakdown, evaluate, Breakdown, Evaluation, Features, WIN};
pub use noise::{TieBreak, NOISE};
pub use tree::{Node, NodeId, Tree};

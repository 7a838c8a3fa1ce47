// Checkers engine: pooled move tree, incremental evaluator, anytime negamax search
pub mod board;
pub mod config;
pub mod error;
pub mod game;
pub mod perft;
pub mod search;
pub mod selfplay;

pub use board::{Board, Move, Piece, Side, Square};
pub use config::EngineConfig;
pub use error::{Error, Result};
pub use game::{Game, GameStatus};
pub use search::{NodeId, SearchStats};

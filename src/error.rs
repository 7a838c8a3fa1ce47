//! Error types for the checkers engine.
//!
//! Search never fails: budget exhaustion and "no legal move" are ordinary
//! outcomes. Errors only come from parsing input and misusing handles.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// Square name is not one of the 32 playable squares
    #[error("invalid square: {0:?}")]
    InvalidSquare(String),

    #[error("invalid board diagram: {0}")]
    InvalidDiagram(String),

    /// Node handle is not a child of the current position
    #[error("move is not available in the current position")]
    UnknownMove,

    #[error("config error: {0}")]
    Config(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

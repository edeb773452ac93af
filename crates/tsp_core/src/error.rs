use std::path::PathBuf;

use thiserror::Error as ThisError;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("failed to open {}: {source}", .path.display())]
    FileOpen {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("insufficient input: need at least 2 coordinates, found {found}")]
    InsufficientInput { found: usize },
    #[error("invalid distance matrix: {0}")]
    InvalidMatrix(String),
    #[error("exact solver supports at most {max} nodes, got {nodes}")]
    TooManyNodes { nodes: usize, max: usize },
    #[error("exact solver could not allocate its table for {nodes} nodes")]
    DpTableAllocation { nodes: usize },
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub fn invalid_matrix(message: impl Into<String>) -> Self {
        Self::InvalidMatrix(message.into())
    }

    pub fn other(message: impl Into<String>) -> Self {
        Self::Other(message.into())
    }
}

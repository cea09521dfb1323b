//! Error types for the socli-import crate.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImportError {
    #[error("{}:{line}: {message}", .file.display())]
    Parse {
        file: PathBuf,
        line: usize,
        message: String,
    },

    #[error("Cannot derive an ego id from file name: {}", .file.display())]
    EgoId { file: PathBuf },

    #[error("No .edges files found in {}", .dir.display())]
    NoEdgeFiles { dir: PathBuf },

    #[error("Graph error: {0}")]
    Graph(#[from] socli_graph::GraphError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ImportError>;

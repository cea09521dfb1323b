//! Error types for command handlers.

use socli_graph::GraphError;
use thiserror::Error;

/// Why a command stopped before completing.
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("Database connection is not available.")]
    NoConnection,

    #[error("Please login first.")]
    NotLoggedIn,

    /// A local validation or precondition failure. No query was issued
    /// for the failing step.
    #[error("{0}")]
    Invalid(String),

    #[error("{0}")]
    Store(#[from] GraphError),

    #[error("Input error: {0}")]
    Io(#[from] std::io::Error),
}

impl CommandError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

pub type Result<T> = std::result::Result<T, CommandError>;

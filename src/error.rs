//! Error types for table loading and command handling.

use thiserror::Error;

use crate::domain::Domain;

/// Errors surfaced by the baseline checker.
#[derive(Debug, Error)]
pub enum BaselineError {
    /// A command needed a document but none was given or open.
    #[error("No active editor")]
    NoActiveDocument,

    /// `workspace/executeCommand` named a command we don't register.
    #[error("Unsupported command: {0}")]
    UnsupportedCommand(String),

    /// The compatibility table resource was not valid JSON for the schema.
    #[error("Invalid compatibility table: {0}")]
    TableParse(#[from] serde_json::Error),

    /// A feature id appeared twice within one domain.
    #[error("Duplicate feature {id:?} in {domain} table")]
    DuplicateFeature { domain: Domain, id: String },

    /// File system I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BaselineError>;

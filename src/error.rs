// Error types for the dining ledger.

use thiserror::Error;

/// Errors raised by registries, relationship queries and the shell.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DiningError {
    /// An id did not resolve to a registered entity.
    #[error("{kind} not found: {id}")]
    NotFound { kind: &'static str, id: String },

    /// A name did not resolve to a registered entity.
    #[error("Unknown {kind}: {name}")]
    UnknownName { kind: &'static str, name: String },

    /// The shell could not parse a command line.
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// A numeric argument could not be parsed.
    #[error("Invalid number for {field}: {value}")]
    InvalidNumber { field: &'static str, value: String },

    /// A snapshot could not be serialized.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for DiningError {
    fn from(err: serde_json::Error) -> Self {
        DiningError::Serialization(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DiningError>;

//! Error types for ragchat
//!
//! This module defines the error types used by the session store, the
//! configuration loader and the CLI, using `thiserror` for ergonomic error
//! handling.

use thiserror::Error;

/// Main error type for ragchat operations
///
/// The session store normalizes read-path problems (missing or malformed
/// records) to absence; only write-path and configuration failures surface
/// from it. Record reads use `Io` and `Serialization` internally.
/// `SessionNotFound` is raised by the CLI when a requested session is absent.
#[derive(Error, Debug)]
pub enum RagchatError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// Session storage errors (directory creation, record writes)
    #[error("Storage error: {0}")]
    Storage(String),

    /// No stored session matches the requested id
    #[error("Session not found: {0}")]
    SessionNotFound(String),

    /// Session id cannot be used as a record file name
    #[error("Invalid session id: {0:?}")]
    InvalidSessionId(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for ragchat operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

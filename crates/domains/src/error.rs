//! # ApiError
//!
//! Centralized error type for every collaborator the client talks to.
//! Adapters map transport-specific failures into these variants; the
//! orchestrator never looks deeper than the variant.

use thiserror::Error;

/// The primary error type for all port operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Resource not found (e.g., a card that was already deleted)
    #[error("{0} not found with ID {1}")]
    NotFound(String, String),

    /// The server rejected the input (e.g., empty caption, bad URL)
    #[error("validation error: {0}")]
    Validation(String),

    /// Missing or rejected credentials
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Network failure or unexpected status code
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be understood
    #[error("malformed response: {0}")]
    Malformed(String),

    /// The persistent credential slot could not be read or written
    #[error("storage error: {0}")]
    Storage(String),

    /// Anything else the server reports as its own fault
    #[error("internal service error: {0}")]
    Internal(String),
}

/// A specialized Result type for port operations.
pub type Result<T> = std::result::Result<T, ApiError>;

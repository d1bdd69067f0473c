//! Error type shared by the service layer.

use thiserror::Error;

/// Errors surfaced by collaborator-backed operations.
///
/// Unlike working-copy edits, which silently ignore unknown step ids,
/// operations at this boundary report failure explicitly.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Referenced tour does not exist (or is not owned by the caller).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Request payload failed validation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Storage or other infrastructure failure.
    #[error("Internal error: {0}")]
    Internal(String),
}

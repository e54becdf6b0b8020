//! Domain-level error type shared across crates.

use crate::types::DbId;

/// Errors produced by domain logic, independent of any transport.
///
/// HTTP mapping lives in the api crate's `AppError`.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A referenced entity does not exist.
    #[error("{entity} with id {id} not found")]
    NotFound { entity: &'static str, id: DbId },

    /// Input failed validation.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The caller did not present a valid credential.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An invariant was violated or a dependency misbehaved.
    #[error("Internal error: {0}")]
    Internal(String),
}

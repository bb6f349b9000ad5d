//! Error types for the mutation workflows.

use thiserror::Error;

use crate::db::RepositoryError;

/// A business-rule or storage failure inside a mutation workflow.
///
/// Mutation handlers never surface these as GraphQL errors; the GraphQL
/// layer folds them into `{success: false, errors: [...]}` payloads. The
/// variant carries the user-facing message, the discriminant carries the
/// failure class.
#[derive(Debug, Error)]
pub enum MutationError {
    /// Malformed email, phone, or price input.
    #[error("{0}")]
    InvalidFormat(String),

    /// Numeric input outside its allowed range (non-positive price,
    /// negative stock).
    #[error("{0}")]
    OutOfRange(String),

    /// Unique-key collision (customer email).
    #[error("{0}")]
    DuplicateKey(String),

    /// Unknown customer or product reference.
    #[error("{0}")]
    NotFound(String),

    /// Order creation with no products selected.
    #[error("{0}")]
    EmptySelection(String),

    /// Storage failure during an atomic multi-write; the transaction was
    /// rolled back.
    #[error("{0}")]
    TransactionFailure(String),
}

impl From<RepositoryError> for MutationError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => Self::DuplicateKey(msg),
            other => Self::TransactionFailure(other.to_string()),
        }
    }
}

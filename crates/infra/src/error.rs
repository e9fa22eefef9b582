//! Error types for store operations and the inventory service.

use thiserror::Error;

use stockboard_core::DomainError;

/// Storage backend failure.
///
/// These are **infrastructure errors** as opposed to domain errors (validation,
/// state checks). None of them are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backend could not complete the operation (connection, query, lock).
    #[error("store backend failure: {0}")]
    Backend(String),

    /// A persisted row could not be turned back into a valid record.
    #[error("corrupt product record: {0}")]
    Corrupt(String),
}

/// Result type used by stores and the inventory service.
pub type InventoryResult<T> = Result<T, InventoryError>;

/// Error returned by store operations and service calls.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InventoryError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl InventoryError {
    /// Stable machine-readable code, surfaced to API clients.
    pub fn code(&self) -> &'static str {
        match self {
            InventoryError::Domain(e) => e.code(),
            InventoryError::Store(_) => "STORE_FAILURE",
        }
    }
}

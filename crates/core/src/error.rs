//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// state checks, stock availability). Storage failures belong to the infra layer.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (e.g. malformed input, negative quantity).
    #[error("validation failed: {0}")]
    Validation(String),

    /// No product record matches the given identifier.
    #[error("product not found: {0}")]
    NotFound(String),

    /// The record is not in the state the operation expects
    /// (e.g. the source warehouse of a transfer does not match).
    #[error("invalid state: {0}")]
    InvalidState(String),

    /// A transfer asked for more units than the source record holds.
    #[error("insufficient stock: requested {requested}, available {available}")]
    InsufficientStock { available: u32, requested: u32 },
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn not_found(id: impl Into<String>) -> Self {
        Self::NotFound(id.into())
    }

    pub fn invalid_state(msg: impl Into<String>) -> Self {
        Self::InvalidState(msg.into())
    }

    pub fn insufficient_stock(available: u32, requested: u32) -> Self {
        Self::InsufficientStock {
            available,
            requested,
        }
    }

    /// Stable machine-readable code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            DomainError::Validation(_) => "VALIDATION",
            DomainError::NotFound(_) => "NOT_FOUND",
            DomainError::InvalidState(_) => "INVALID_STATE",
            DomainError::InsufficientStock { .. } => "INSUFFICIENT_STOCK",
        }
    }
}

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Every variant is a synchronous, locally raised failure. Callers decide how
/// to react (re-prompt, abort, log); nothing in the domain retries or corrects.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// A stock amount was negative, non-finite, or non-positive at intake.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(String),

    /// A removal asked for more than is on hand.
    #[error("insufficient stock (requested: {requested}, available: {available})")]
    InsufficientStock { requested: f64, available: f64 },

    /// An identifier collided with an existing entity.
    #[error("duplicate id: {0}")]
    DuplicateId(String),

    /// No recipient is registered under the given id.
    #[error("recipient not found: {0}")]
    RecipientNotFound(String),

    /// A distribution asked for more portions than the bottleneck allows.
    #[error("insufficient portions (requested: {requested}, available: {available})")]
    InsufficientPortions { requested: u64, available: u64 },

    /// A required name or identifier was blank.
    #[error("empty identifier: {0}")]
    EmptyIdentifier(String),

    /// Dependents must be at least one.
    #[error("invalid dependents count: {0} (minimum is 1)")]
    InvalidDependents(u32),

    /// A distribution must hand out at least one portion.
    #[error("invalid portion count: {0} (minimum is 1)")]
    InvalidPortionCount(u32),

    /// A value failed validation (e.g. an unknown category name).
    #[error("validation failed: {0}")]
    Validation(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_quantity(msg: impl Into<String>) -> Self {
        Self::InvalidQuantity(msg.into())
    }

    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId(id.into())
    }

    pub fn recipient_not_found(id: impl Into<String>) -> Self {
        Self::RecipientNotFound(id.into())
    }

    pub fn empty_identifier(field: impl Into<String>) -> Self {
        Self::EmptyIdentifier(field.into())
    }

    pub fn insufficient_stock(requested: f64, available: f64) -> Self {
        Self::InsufficientStock { requested, available }
    }

    pub fn insufficient_portions(requested: u64, available: u64) -> Self {
        Self::InsufficientPortions { requested, available }
    }
}

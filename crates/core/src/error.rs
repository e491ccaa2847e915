//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Raised by schema declarations and the data-patch runner. Presentation code
/// (labels, structured data) never produces one of these: missing or unknown
/// values degrade to empty output instead.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A declaration failed validation (e.g. empty label, bad widget/source pairing).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A schema invariant was violated (e.g. cyclic patch dependencies).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),

    /// An attribute code was malformed.
    #[error("invalid attribute code: {0}")]
    InvalidCode(String),

    /// A referenced attribute or patch does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The target already holds a conflicting entry (e.g. duplicate attribute).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }

    pub fn invalid_code(msg: impl Into<String>) -> Self {
        Self::InvalidCode(msg.into())
    }

    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}

//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Validation failure detail.
///
/// Carries the zero-based index of every offending item so callers can render
/// all violations in one pass instead of surfacing them one at a time.
/// `item_indices` is empty when the failure is not tied to specific items
/// (e.g. an empty item list or a missing rejection reason).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub message: String,
    pub item_indices: Vec<usize>,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            item_indices: Vec::new(),
        }
    }

    pub fn with_items(message: impl Into<String>, item_indices: Vec<usize>) -> Self {
        Self {
            message: message.into(),
            item_indices,
        }
    }
}

impl core::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        if self.item_indices.is_empty() {
            write!(f, "{}", self.message)
        } else {
            write!(f, "{} (items {:?})", self.message, self.item_indices)
        }
    }
}

/// Domain-level error.
///
/// Keep this focused on deterministic, business/domain failures (validation,
/// illegal transitions, conflicts). Infrastructure concerns belong elsewhere.
/// Every failure here reflects a logical precondition, not a transient fault;
/// nothing is retried internally.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A value failed validation (sign violation, empty item list, missing
    /// rejection reason, malformed input).
    #[error("validation failed: {0}")]
    Validation(ValidationError),

    /// An action was attempted from a status that forbids it.
    #[error("illegal state: cannot {action} while {status}")]
    IllegalState { action: String, status: String },

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A requested resource was not found (domain-level).
    #[error("not found")]
    NotFound,

    /// A conflict occurred (e.g. stale version / optimistic concurrency).
    #[error("conflict: {0}")]
    Conflict(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(ValidationError::new(msg))
    }

    pub fn validation_items(msg: impl Into<String>, item_indices: Vec<usize>) -> Self {
        Self::Validation(ValidationError::with_items(msg, item_indices))
    }

    pub fn illegal_state(action: impl Into<String>, status: impl Into<String>) -> Self {
        Self::IllegalState {
            action: action.into(),
            status: status.into(),
        }
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn not_found() -> Self {
        Self::NotFound
    }
}

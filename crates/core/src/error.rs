//! Domain error model.

use thiserror::Error;

/// Result type used across the domain layer.
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level error.
///
/// Keep this focused on deterministic business failures (field constraints,
/// key conflicts, missing targets). File access belongs to the infra crate.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// One or more fields failed their declared constraint.
    ///
    /// Each entry names a single violated rule.
    #[error("validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    /// An entity with the same key already exists.
    #[error("duplicate key: {0}")]
    DuplicateKey(String),

    /// The requested entity does not exist.
    #[error("not found: {0}")]
    NotFound(String),
}

impl DomainError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(vec![msg.into()])
    }

    /// Build a validation error from an accumulated list of violations.
    pub fn violations(violations: Vec<String>) -> Self {
        Self::Validation(violations)
    }

    pub fn duplicate_key(key: impl Into<String>) -> Self {
        Self::DuplicateKey(key.into())
    }

    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound(key.into())
    }

    /// The violated rules, if this is a validation error.
    pub fn violated_rules(&self) -> &[String] {
        match self {
            Self::Validation(rules) => rules,
            _ => &[],
        }
    }
}

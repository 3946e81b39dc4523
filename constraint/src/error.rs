//! Constraint error types.

use dataobj_core::ObjectError;
use thiserror::Error;

/// Result type for constraint operations.
pub type ConstraintResult<T> = Result<T, ConstraintError>;

/// Errors that can occur while registering kinds or validating objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConstraintError {
    #[error("Unknown constraint: {name}")]
    UnknownConstraint { name: String },

    #[error("Invalid constraint registration: {name}: {reason}")]
    Registration { name: String, reason: String },

    #[error(transparent)]
    Object(#[from] ObjectError),
}

impl ConstraintError {
    pub fn unknown_constraint(name: impl Into<String>) -> Self {
        Self::UnknownConstraint { name: name.into() }
    }

    pub fn registration(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Registration {
            name: name.into(),
            reason: reason.into(),
        }
    }
}

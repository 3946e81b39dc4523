//! Common error types for DataObj objects.

use thiserror::Error;

/// Errors raised by the object model.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ObjectError {
    /// A declared attribute does not exist on the instance.
    #[error("Invalid attribute: {attr} on type {type_name}")]
    InvalidAttribute { type_name: String, attr: String },

    /// An equality or priority field does not exist on one of the compared objects.
    #[error("Unknown field: {field} on type {type_name}")]
    UnknownField { type_name: String, field: String },
}

impl ObjectError {
    pub fn invalid_attribute(type_name: impl Into<String>, attr: impl Into<String>) -> Self {
        Self::InvalidAttribute {
            type_name: type_name.into(),
            attr: attr.into(),
        }
    }

    pub fn unknown_field(type_name: impl Into<String>, field: impl Into<String>) -> Self {
        Self::UnknownField {
            type_name: type_name.into(),
            field: field.into(),
        }
    }
}

/// Result type for object operations.
pub type ObjectResult<T> = Result<T, ObjectError>;

//! Validation vocabulary shared by domain value objects and request handlers.

use thiserror::Error;

/// Rejection raised when a value object or incoming request fails a
/// structural check. Carried up to the HTTP layer as a 422.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} must not be empty")]
    EmptyField { field: String },

    #[error("{field} is not valid: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_field_names_the_offender() {
        let err = ValidationError::empty_field("content");
        assert_eq!(err.to_string(), "content must not be empty");
    }

    #[test]
    fn invalid_format_carries_the_reason() {
        let err = ValidationError::invalid_format("messages", "at least one user message required");
        assert_eq!(
            err.to_string(),
            "messages is not valid: at least one user message required"
        );
    }
}

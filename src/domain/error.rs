use thiserror::Error;

use super::identifier::IdParseError;
use super::user::UserId;
use super::validation::ValidationError;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("User '{id}' not found")]
    UserNotFound { id: UserId },

    #[error("User '{id}' is not enabled")]
    UserNotEnabled { id: UserId },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid ID format: {0}")]
    InvalidId(#[from] IdParseError),

    #[error("Conflict: {message}")]
    Conflict { message: String },

    #[error("Unauthorized: {message}")]
    Unauthorized { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
            message: message.into(),
        }
    }

    pub fn user_not_found(id: UserId) -> Self {
        Self::UserNotFound { id }
    }

    pub fn user_not_enabled(id: UserId) -> Self {
        Self::UserNotEnabled { id }
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::Conflict {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validation::Constraint;

    #[test]
    fn test_not_found_error() {
        let error = DomainError::not_found("Offer 'x' not found");
        assert_eq!(error.to_string(), "Not found: Offer 'x' not found");
    }

    #[test]
    fn test_user_errors_carry_id() {
        let id = UserId::parse("3f2504e0-4f89-11d3-9a0c-0305e82c3301").unwrap();

        assert_eq!(
            DomainError::user_not_found(id).to_string(),
            "User '3f2504e0-4f89-11d3-9a0c-0305e82c3301' not found"
        );
        assert_eq!(
            DomainError::user_not_enabled(id).to_string(),
            "User '3f2504e0-4f89-11d3-9a0c-0305e82c3301' is not enabled"
        );
    }

    #[test]
    fn test_validation_error_conversion() {
        let error: DomainError = ValidationError::single("title", Constraint::Required).into();
        assert_eq!(error.to_string(), "Validation error: title must not be empty");
    }

    #[test]
    fn test_invalid_id_conversion() {
        let parse_error = UserId::parse("nope").unwrap_err();
        let error: DomainError = parse_error.into();
        assert!(matches!(error, DomainError::InvalidId(_)));
    }
}

use thiserror::Error;

/// Core domain errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Email already exists")]
    DuplicateEmail,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid updates: {message}")]
    InvalidUpdate { message: String },

    #[error("Please authenticate")]
    Unauthenticated,

    #[error("Validation error: {message}")]
    Validation { message: String },

    #[error("Not found: {message}")]
    NotFound { message: String },

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_update(message: impl Into<String>) -> Self {
        Self::InvalidUpdate {
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound {
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

    #[test]
    fn test_duplicate_email_message() {
        assert_eq!(DomainError::DuplicateEmail.to_string(), "Email already exists");
    }

    #[test]
    fn test_invalid_credentials_message() {
        assert_eq!(
            DomainError::InvalidCredentials.to_string(),
            "Invalid credentials"
        );
    }

    #[test]
    fn test_invalid_update_message() {
        let error = DomainError::invalid_update("unknown field 'age'");
        assert_eq!(error.to_string(), "Invalid updates: unknown field 'age'");
    }

    #[test]
    fn test_unauthenticated_message() {
        assert_eq!(
            DomainError::Unauthenticated.to_string(),
            "Please authenticate"
        );
    }
}

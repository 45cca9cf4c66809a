//! User field validation

use thiserror::Error;
use validator::ValidateEmail;

/// Errors that can occur during user validation
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UserValidationError {
    #[error("Email is invalid")]
    InvalidEmail,

    #[error("Password is too short. Minimum length is {0} characters")]
    PasswordTooShort(usize),

    #[error("Password exceeds maximum length of {0} characters")]
    PasswordTooLong(usize),

    #[error("Password must not contain the word 'password'")]
    PasswordNotSecure,
}

const MIN_PASSWORD_LENGTH: usize = 7;
const MAX_PASSWORD_LENGTH: usize = 128;

/// Normalize an email address for storage and lookup: trim and lower-case.
///
/// All comparisons against stored emails go through this, so
/// `" Foo@X.COM "` and `"foo@x.com"` refer to the same account.
pub fn normalize_email(raw: &str) -> String {
    raw.trim().to_lowercase()
}

/// Validate an (already normalized) email address format
pub fn validate_email(email: &str) -> Result<(), UserValidationError> {
    if email.validate_email() {
        Ok(())
    } else {
        Err(UserValidationError::InvalidEmail)
    }
}

/// Validate a raw password against the account password policy
///
/// Rules:
/// - Minimum 7 characters
/// - Maximum 128 characters
/// - Must not contain the substring "password" in any casing
pub fn validate_password(password: &str) -> Result<(), UserValidationError> {
    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(UserValidationError::PasswordTooLong(MAX_PASSWORD_LENGTH));
    }

    if password.to_lowercase().contains("password") {
        return Err(UserValidationError::PasswordNotSecure);
    }

    Ok(())
}

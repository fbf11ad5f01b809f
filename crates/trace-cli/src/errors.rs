//! CLI error types for structured error handling.
//!
//! These errors map to specific exit codes so scripts can tell a missing
//! entry from a rejected login.

use std::fmt;

use trace_core::auth::AuthFailure;

use crate::constants::exit_codes;

/// CLI-specific errors with associated exit codes.
#[derive(Debug)]
pub enum CliError {
    /// Resource not found (account, entry)
    NotFound { message: String, hint: String },

    /// Authentication failed (wrong credentials, too many attempts)
    AuthFailed {
        message: String,
        hint: Option<String>,
    },

    /// Invalid user input
    InvalidInput(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::NotFound { message, .. } => write!(f, "{}", message),
            CliError::AuthFailed { message, .. } => write!(f, "{}", message),
            CliError::InvalidInput(message) => write!(f, "{}", message),
        }
    }
}

impl std::error::Error for CliError {}

impl CliError {
    pub fn not_found(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::NotFound {
            message: message.into(),
            hint: hint.into(),
        }
    }

    pub fn auth_failed(message: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: None,
        }
    }

    pub fn auth_failed_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        CliError::AuthFailed {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    pub fn invalid_input(message: impl Into<String>) -> Self {
        CliError::InvalidInput(message.into())
    }

    /// Hint shown under the error, if any.
    pub fn hint(&self) -> Option<&str> {
        match self {
            CliError::NotFound { hint, .. } => Some(hint),
            CliError::AuthFailed { hint, .. } => hint.as_deref(),
            CliError::InvalidInput(_) => None,
        }
    }

    /// Get the exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotFound { .. } => exit_codes::NOT_FOUND,
            CliError::AuthFailed { .. } => exit_codes::AUTH_FAILED,
            CliError::InvalidInput(_) => exit_codes::INVALID_INPUT,
        }
    }
}

impl From<AuthFailure> for CliError {
    fn from(failure: AuthFailure) -> Self {
        match failure {
            AuthFailure::NoAccount => {
                CliError::not_found(failure.to_string(), "Run `trace register` first.")
            }
            AuthFailure::MissingFields => CliError::invalid_input(failure.to_string()),
            other => CliError::auth_failed(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(CliError::not_found("x", "y").exit_code(), 3);
        assert_eq!(CliError::invalid_input("x").exit_code(), 4);
        assert_eq!(CliError::auth_failed("x").exit_code(), 5);
    }

    #[test]
    fn test_from_auth_failure() {
        let err = CliError::from(AuthFailure::IncorrectCredentials);
        assert_eq!(err.to_string(), "Incorrect username or password.");
        assert_eq!(err.exit_code(), exit_codes::AUTH_FAILED);

        let err = CliError::from(AuthFailure::NoAccount);
        assert_eq!(err.exit_code(), exit_codes::NOT_FOUND);
        assert_eq!(err.hint(), Some("Run `trace register` first."));
    }
}

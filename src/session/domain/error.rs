//! Error types for session domain validation.

use thiserror::Error;

/// Errors returned while validating credentials and session values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SessionDomainError {
    /// The email address is blank or has no `@`.
    #[error("invalid email address '{0}'")]
    InvalidEmail(String),

    /// The password is empty.
    #[error("password must not be empty")]
    EmptyPassword,

    /// The display name is blank.
    #[error("name must not be empty")]
    EmptyName,

    /// The bearer token is blank.
    #[error("authentication token must not be empty")]
    EmptyToken,
}

/// Error returned while parsing a role.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown role: {0}")]
pub struct ParseRoleError(pub String);

//! Bearer token value.

use super::SessionDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Bearer token issued by the backend at login.
///
/// `Debug` output is redacted so tokens do not end up in logs.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a validated token.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyToken`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, SessionDomainError> {
        let raw = value.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(SessionDomainError::EmptyToken);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the raw token for use in an `Authorization` header.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(***)")
    }
}

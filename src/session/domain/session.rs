//! Session, credentials, and registration values.

use super::{AuthToken, Role, SessionDomainError, UserProfile};
use serde::{Deserialize, Serialize};

/// An authenticated session: who is signed in and the token to prove it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    user: UserProfile,
    token: AuthToken,
    refresh_token: Option<AuthToken>,
}

impl Session {
    /// Creates a session.
    #[must_use]
    pub const fn new(user: UserProfile, token: AuthToken, refresh_token: Option<AuthToken>) -> Self {
        Self {
            user,
            token,
            refresh_token,
        }
    }

    /// Returns the signed-in user.
    #[must_use]
    pub const fn user(&self) -> &UserProfile {
        &self.user
    }

    /// Returns the bearer token.
    #[must_use]
    pub const fn token(&self) -> &AuthToken {
        &self.token
    }

    /// Returns the refresh token, if the backend issued one.
    #[must_use]
    pub const fn refresh_token(&self) -> Option<&AuthToken> {
        self.refresh_token.as_ref()
    }

    /// Replaces the stored profile, keeping the tokens.
    #[must_use]
    pub fn with_user(mut self, user: UserProfile) -> Self {
        self.user = user;
        self
    }
}

/// Login payload returned by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthGrant {
    /// Signed-in user.
    pub user: UserProfile,
    /// Bearer token.
    pub token: AuthToken,
    /// Refresh token, when issued.
    #[serde(default)]
    pub refresh_token: Option<AuthToken>,
}

impl From<AuthGrant> for Session {
    fn from(grant: AuthGrant) -> Self {
        Self::new(grant.user, grant.token, grant.refresh_token)
    }
}

/// Email and password login.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    email: String,
    password: String,
}

impl Credentials {
    /// Creates validated credentials.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::InvalidEmail`] or
    /// [`SessionDomainError::EmptyPassword`].
    pub fn new(
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let email = validate_email(email.into())?;
        let password = password.into();
        if password.is_empty() {
            return Err(SessionDomainError::EmptyPassword);
        }
        Ok(Self { email, password })
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

/// Account registration payload.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    name: String,
    email: String,
    password: String,
    role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
}

impl Registration {
    /// Creates a validated registration for an employee account.
    ///
    /// # Errors
    ///
    /// Returns [`SessionDomainError::EmptyName`],
    /// [`SessionDomainError::InvalidEmail`] or
    /// [`SessionDomainError::EmptyPassword`].
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, SessionDomainError> {
        let raw_name = name.into();
        let trimmed_name = raw_name.trim();
        if trimmed_name.is_empty() {
            return Err(SessionDomainError::EmptyName);
        }
        let credentials = Credentials::new(email, password)?;
        Ok(Self {
            name: trimmed_name.to_owned(),
            email: credentials.email,
            password: credentials.password,
            role: Role::Employee,
            department: None,
        })
    }

    /// Sets the requested role.
    #[must_use]
    pub const fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }

    /// Sets the department identifier.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the email address.
    #[must_use]
    pub fn email(&self) -> &str {
        &self.email
    }

    /// Returns the requested role.
    #[must_use]
    pub const fn role(&self) -> Role {
        self.role
    }

    pub(crate) fn password(&self) -> &str {
        &self.password
    }
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

fn validate_email(raw: String) -> Result<String, SessionDomainError> {
    let trimmed = raw.trim();
    let valid = trimmed
        .split_once('@')
        .is_some_and(|(local, domain)| !local.is_empty() && !domain.is_empty());
    if !valid {
        return Err(SessionDomainError::InvalidEmail(raw));
    }
    Ok(trimmed.to_ascii_lowercase())
}

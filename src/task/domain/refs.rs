//! References to users and departments embedded in task payloads.
//!
//! The backend may send a populated object, a bare identifier, or `null` for
//! any reference. All three decode without error; missing details render as
//! placeholder values instead.

use super::UserId;
use serde::{Deserialize, Serialize};

/// Placeholder shown when a referenced user has no name.
pub const UNKNOWN_USER_NAME: &str = "Unknown User";

/// Placeholder shown when a referenced user has no email address.
pub const UNKNOWN_USER_EMAIL: &str = "unknown@example.com";

/// Placeholder shown when a referenced department has no name.
pub const UNKNOWN_DEPARTMENT: &str = "N/A";

/// Lightweight reference to a user account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReferenceRepr")]
pub struct UserRef {
    /// Account identifier.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<UserId>,
    /// Display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Contact email.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl UserRef {
    /// Creates a reference carrying only an identifier.
    #[must_use]
    pub const fn from_id(id: UserId) -> Self {
        Self {
            id: Some(id),
            name: None,
            email: None,
        }
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Returns the display name or [`UNKNOWN_USER_NAME`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        present(self.name.as_deref()).unwrap_or(UNKNOWN_USER_NAME)
    }

    /// Returns the email address or [`UNKNOWN_USER_EMAIL`].
    #[must_use]
    pub fn display_email(&self) -> &str {
        present(self.email.as_deref()).unwrap_or(UNKNOWN_USER_EMAIL)
    }
}

/// Returns the display name of an optional user reference.
#[must_use]
pub fn display_name(user: Option<&UserRef>) -> &str {
    user.map_or(UNKNOWN_USER_NAME, UserRef::display_name)
}

/// Returns the email of an optional user reference.
#[must_use]
pub fn display_email(user: Option<&UserRef>) -> &str {
    user.map_or(UNKNOWN_USER_EMAIL, UserRef::display_email)
}

/// Lightweight reference to a department.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "ReferenceRepr")]
pub struct DepartmentRef {
    /// Department identifier.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Department name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl DepartmentRef {
    /// Returns the department name or [`UNKNOWN_DEPARTMENT`].
    #[must_use]
    pub fn display_name(&self) -> &str {
        present(self.name.as_deref()).unwrap_or(UNKNOWN_DEPARTMENT)
    }
}

fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|text| !text.trim().is_empty())
}

/// Accepted wire shapes of a reference.
#[derive(Deserialize)]
#[serde(untagged)]
enum ReferenceRepr {
    Id(String),
    Populated(PopulatedRef),
}

#[derive(Deserialize)]
struct PopulatedRef {
    #[serde(rename = "_id", default)]
    underscore_id: Option<String>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

impl ReferenceRepr {
    fn into_parts(self) -> (Option<String>, Option<String>, Option<String>) {
        match self {
            Self::Id(id) => (Some(id), None, None),
            Self::Populated(populated) => (
                populated.underscore_id.or(populated.id),
                populated.name,
                populated.email,
            ),
        }
    }
}

impl From<ReferenceRepr> for UserRef {
    fn from(repr: ReferenceRepr) -> Self {
        let (id, name, email) = repr.into_parts();
        Self {
            id: id.and_then(|raw| UserId::new(raw).ok()),
            name,
            email,
        }
    }
}

impl From<ReferenceRepr> for DepartmentRef {
    fn from(repr: ReferenceRepr) -> Self {
        let (id, name, _) = repr.into_parts();
        Self {
            id: id.filter(|raw| !raw.trim().is_empty()),
            name,
        }
    }
}

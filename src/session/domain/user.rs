//! Signed-in user profile.

use super::ParseRoleError;
use crate::task::domain::{DepartmentRef, UserId, UserRef};
use serde::{Deserialize, Serialize};

/// Organisational role of a user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular staff member.
    #[default]
    Employee,
    /// Head of department.
    Hod,
    /// Organisation administrator.
    Admin,
}

impl Role {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Employee => "employee",
            Self::Hod => "hod",
            Self::Admin => "admin",
        }
    }
}

impl TryFrom<&str> for Role {
    type Error = ParseRoleError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "employee" => Ok(Self::Employee),
            "hod" => Ok(Self::Hod),
            "admin" => Ok(Self::Admin),
            _ => Err(ParseRoleError(value.to_owned())),
        }
    }
}

/// Profile of the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// Account identifier.
    #[serde(rename = "_id", alias = "id")]
    pub id: UserId,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Login email.
    #[serde(default)]
    pub email: String,
    /// Organisational role.
    #[serde(default)]
    pub role: Role,
    /// Department, when the user belongs to one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub department: Option<DepartmentRef>,
}

impl UserProfile {
    /// Creates a profile.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id,
            name: name.into(),
            email: email.into(),
            role,
            department: None,
        }
    }

    /// Returns the profile as an embedded user reference.
    #[must_use]
    pub fn as_user_ref(&self) -> UserRef {
        UserRef::from_id(self.id.clone())
            .with_name(self.name.clone())
            .with_email(self.email.clone())
    }
}

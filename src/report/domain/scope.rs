//! Which pre-computed statistics to fetch.

use crate::session::domain::Role;
use std::{fmt, str::FromStr};
use thiserror::Error;

/// Statistics view offered by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportScope {
    /// Organisation-wide dashboard counters.
    AdminDashboard,
    /// Organisation-wide report figures.
    AdminReports,
    /// Department dashboard counters.
    HodDashboard,
    /// Department report figures.
    HodReports,
}

impl ReportScope {
    /// All scopes, admin first.
    pub const ALL: [Self; 4] = [
        Self::AdminDashboard,
        Self::AdminReports,
        Self::HodDashboard,
        Self::HodReports,
    ];

    /// Returns the endpoint path relative to the API base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::AdminDashboard => "admin/dashboard",
            Self::AdminReports => "admin/reports",
            Self::HodDashboard => "hod/dashboard",
            Self::HodReports => "hod/reports",
        }
    }

    /// Returns `true` when `role` may read this scope.
    ///
    /// Admins read everything; heads of department read the HOD views.
    #[must_use]
    pub const fn permits(self, role: Role) -> bool {
        match self {
            Self::AdminDashboard | Self::AdminReports => matches!(role, Role::Admin),
            Self::HodDashboard | Self::HodReports => matches!(role, Role::Admin | Role::Hod),
        }
    }

    /// Returns the dashboard scope a role lands on, if any.
    #[must_use]
    pub const fn dashboard_for(role: Role) -> Option<Self> {
        match role {
            Role::Admin => Some(Self::AdminDashboard),
            Role::Hod => Some(Self::HodDashboard),
            Role::Employee => None,
        }
    }
}

impl fmt::Display for ReportScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// A scope name that matches no known view.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown report scope '{0}', expected one of admin/dashboard, admin/reports, hod/dashboard, hod/reports")]
pub struct ParseReportScopeError(pub String);

impl FromStr for ReportScope {
    type Err = ParseReportScopeError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let wanted = value.trim().replace(['-', '_'], "/").to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|scope| scope.path() == wanted)
            .ok_or_else(|| ParseReportScopeError(value.to_owned()))
    }
}

//! Pre-computed counters served by the statistics endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Dashboard and report figures.
///
/// The counters every view carries are typed. Anything else the backend
/// sends (breakdowns by department, priority, month) is kept verbatim in
/// [`Self::extra`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// All tasks in scope.
    #[serde(default)]
    pub total_tasks: u64,
    /// Tasks completed or approved.
    #[serde(default)]
    pub completed_tasks: u64,
    /// Tasks not yet started.
    #[serde(default)]
    pub pending_tasks: u64,
    /// Tasks being worked on.
    #[serde(default)]
    pub in_progress_tasks: u64,
    /// Tasks past their deadline.
    #[serde(default)]
    pub overdue_tasks: u64,
    /// Users in scope, when reported.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_users: Option<u64>,
    /// Remaining fields, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardStats {
    /// Returns an additional field by name.
    #[must_use]
    pub fn extra_field(&self, name: &str) -> Option<&Value> {
        self.extra.get(name)
    }
}

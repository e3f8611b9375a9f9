//! Per-assignee progress record.

use super::{Approval, AssignmentStatus, TaskStage, UserId, UserRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One assignee's share of a task.
///
/// Nullable wire fields are kept optional and read through accessors that
/// fall back to the default value, so sparse payloads still decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    /// Assigned user, if the backend populated or kept the reference.
    #[serde(default)]
    pub user: Option<UserRef>,
    /// Private progress marker of this assignee.
    #[serde(default)]
    pub individual_stage: Option<TaskStage>,
    /// Status of this assignee's work.
    #[serde(default)]
    pub status: Option<AssignmentStatus>,
    /// Verdict on this assignee's work.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub approval: Option<Approval>,
    /// Free-text notes from the assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Time the assignee reached the done stage.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<DateTime<Utc>>,
}

impl Assignment {
    /// Creates a fresh assignment for a user.
    #[must_use]
    pub const fn new(user: UserRef) -> Self {
        Self {
            user: Some(user),
            individual_stage: Some(TaskStage::Planning),
            status: Some(AssignmentStatus::Assigned),
            approval: Some(Approval::Pending),
            notes: None,
            completed_at: None,
        }
    }

    /// Sets the individual stage.
    #[must_use]
    pub const fn with_stage(mut self, stage: TaskStage) -> Self {
        self.individual_stage = Some(stage);
        self
    }

    /// Sets the assignment status.
    #[must_use]
    pub const fn with_status(mut self, status: AssignmentStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Sets the approval verdict.
    #[must_use]
    pub const fn with_approval(mut self, approval: Approval) -> Self {
        self.approval = Some(approval);
        self
    }

    /// Returns the individual stage, defaulting to planning.
    #[must_use]
    pub fn individual_stage(&self) -> TaskStage {
        self.individual_stage.unwrap_or_default()
    }

    /// Returns the assignment status, defaulting to assigned.
    #[must_use]
    pub fn status(&self) -> AssignmentStatus {
        self.status.unwrap_or_default()
    }

    /// Returns the identifier of the assigned user, if known.
    #[must_use]
    pub fn user_id(&self) -> Option<&UserId> {
        self.user.as_ref().and_then(|user| user.id.as_ref())
    }

    /// Returns `true` when this assignee counts as finished for progress.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.individual_stage() == TaskStage::Done || self.status() == AssignmentStatus::Completed
    }
}

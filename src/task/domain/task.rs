//! Task record mirrored from the backend, plus the transitions the in-memory
//! backend applies to it.

use super::{
    Approval, Assignment, AssignmentStatus, Attachment, CreateTaskRequest, DepartmentRef,
    Priority, Remark, RemarkKind, Remarks, TaskDomainError, TaskId, TaskStage, TaskStatus,
    UpdateTaskRequest, UserId, UserRef,
};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Deserializer, Serialize};

/// Task record as served by the backend.
///
/// Task-level `status` and `stage` are never derived from the assignments on
/// the client; display aggregates live in [`super::TaskProgress`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    #[serde(rename = "_id", alias = "id")]
    id: TaskId,
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    priority: Priority,
    #[serde(default, deserialize_with = "null_as_default")]
    status: TaskStatus,
    #[serde(default, deserialize_with = "null_as_default")]
    stage: TaskStage,
    #[serde(default)]
    is_group_task: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    assigned_to: Vec<Assignment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_by: Option<UserRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    department: Option<DepartmentRef>,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    deadline: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    updated_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    completed_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    approved_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    remarks: Remarks,
    #[serde(default, deserialize_with = "null_as_default")]
    attachments: Vec<Attachment>,
    #[serde(default)]
    is_deleted: bool,
}

impl Task {
    /// Creates a task record from a validated creation request.
    ///
    /// Used by backends that materialise tasks locally; remote backends return
    /// their own record.
    #[must_use]
    pub fn new(
        id: TaskId,
        request: &CreateTaskRequest,
        created_by: Option<UserRef>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        let assigned_to: Vec<Assignment> = request
            .assignees()
            .iter()
            .cloned()
            .map(|user_id| Assignment::new(UserRef::from_id(user_id)))
            .collect();
        let status = if assigned_to.is_empty() {
            TaskStatus::Created
        } else {
            TaskStatus::Assigned
        };

        Self {
            id,
            title: request.title().trim().to_owned(),
            description: request.description().trim().to_owned(),
            priority: request.priority(),
            status,
            stage: request.stage(),
            is_group_task: assigned_to.len() > 1,
            assigned_to,
            created_by,
            department: request.department().map(|id| DepartmentRef {
                id: Some(id.to_owned()),
                name: None,
            }),
            tags: request.tags().to_vec(),
            deadline: request.deadline(),
            created_at: Some(timestamp),
            updated_at: Some(timestamp),
            completed_at: None,
            approved_at: None,
            remarks: Remarks::default(),
            attachments: Vec::new(),
            is_deleted: false,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> &TaskId {
        &self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the priority.
    #[must_use]
    pub const fn priority(&self) -> Priority {
        self.priority
    }

    /// Returns the server-assigned status.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        self.status
    }

    /// Returns the task-level stage.
    #[must_use]
    pub const fn stage(&self) -> TaskStage {
        self.stage
    }

    /// Returns the group flag as reported by the backend.
    #[must_use]
    pub const fn is_group_task(&self) -> bool {
        self.is_group_task
    }

    /// Returns the assignments in order.
    #[must_use]
    pub fn assigned_to(&self) -> &[Assignment] {
        &self.assigned_to
    }

    /// Returns the creator reference, if known.
    #[must_use]
    pub const fn created_by(&self) -> Option<&UserRef> {
        self.created_by.as_ref()
    }

    /// Returns the department reference, if known.
    #[must_use]
    pub const fn department(&self) -> Option<&DepartmentRef> {
        self.department.as_ref()
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    /// Returns the latest modification timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> Option<DateTime<Utc>> {
        self.updated_at
    }

    /// Returns the completion timestamp.
    #[must_use]
    pub const fn completed_at(&self) -> Option<DateTime<Utc>> {
        self.completed_at
    }

    /// Returns the approval timestamp.
    #[must_use]
    pub const fn approved_at(&self) -> Option<DateTime<Utc>> {
        self.approved_at
    }

    /// Returns the remark logs.
    #[must_use]
    pub const fn remarks(&self) -> &Remarks {
        &self.remarks
    }

    /// Returns the attachment metadata.
    #[must_use]
    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    /// Returns `true` when the task has been soft-deleted.
    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    /// Finds the assignment of a user.
    #[must_use]
    pub fn assignment_for(&self, user_id: &UserId) -> Option<&Assignment> {
        self.assigned_to
            .iter()
            .find(|assignment| assignment.user_id() == Some(user_id))
    }

    /// Returns `true` when the user is one of the assignees.
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.assignment_for(user_id).is_some()
    }

    /// Checks whether an approval verdict may be recorded for an assignee.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeNotFound`] when the user is not
    /// assigned, or [`TaskDomainError::ApprovalBeforeCompletion`] when approving
    /// an assignee whose individual stage is not done.
    pub fn check_individual_approval(
        &self,
        user_id: &UserId,
        approval: Approval,
    ) -> Result<(), TaskDomainError> {
        let assignment = self
            .assignment_for(user_id)
            .ok_or_else(|| self.assignee_not_found(user_id))?;
        let stage = assignment.individual_stage();
        if approval == Approval::Approved && stage != TaskStage::Done {
            return Err(TaskDomainError::ApprovalBeforeCompletion {
                task_id: self.id.clone(),
                user_id: user_id.clone(),
                stage,
            });
        }
        Ok(())
    }

    /// Applies a partial update.
    pub fn apply_update(&mut self, changes: &UpdateTaskRequest, clock: &impl Clock) {
        if let Some(title) = changes.title() {
            title.trim().clone_into(&mut self.title);
        }
        if let Some(description) = changes.description() {
            description.trim().clone_into(&mut self.description);
        }
        if let Some(priority) = changes.priority() {
            self.priority = priority;
        }
        if let Some(deadline) = changes.deadline() {
            self.deadline = Some(deadline);
        }
        if let Some(tags) = changes.tags() {
            self.tags = tags.to_vec();
        }
        self.touch(clock);
    }

    /// Replaces the assignee list, keeping progress of users who stay on.
    ///
    /// Kept assignments take the user details of the new reference.
    pub fn assign(&mut self, users: Vec<UserRef>, clock: &impl Clock) {
        let previous = std::mem::take(&mut self.assigned_to);
        self.assigned_to = users
            .into_iter()
            .map(|user| {
                let kept = previous.iter().find(|existing| {
                    existing.user_id().is_some() && existing.user_id() == user.id.as_ref()
                });
                kept.map_or_else(
                    || Assignment::new(user.clone()),
                    |existing| Assignment {
                        user: Some(user.clone()),
                        ..existing.clone()
                    },
                )
            })
            .collect();
        self.is_group_task = self.assigned_to.len() > 1;
        if self.status == TaskStatus::Created && !self.assigned_to.is_empty() {
            self.status = TaskStatus::Assigned;
        }
        self.touch(clock);
    }

    /// Sets the task status, stamping completion and approval times.
    pub fn set_status(&mut self, status: TaskStatus, clock: &impl Clock) {
        let timestamp = clock.utc();
        self.status = status;
        match status {
            TaskStatus::Completed => self.completed_at = Some(timestamp),
            TaskStatus::Approved => self.approved_at = Some(timestamp),
            _ => {}
        }
        self.updated_at = Some(timestamp);
    }

    /// Sets the task-level stage.
    pub fn set_stage(&mut self, stage: TaskStage, clock: &impl Clock) {
        self.stage = stage;
        self.touch(clock);
    }

    /// Moves one assignee to a new individual stage.
    ///
    /// Leaving the done stage resets an earlier approval to pending so an
    /// approved assignment always has a done stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeNotFound`] when the user is not
    /// assigned.
    pub fn set_individual_stage(
        &mut self,
        user_id: &UserId,
        stage: TaskStage,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let timestamp = clock.utc();
        let not_found = self.assignee_not_found(user_id);
        let assignment = self.assignment_mut(user_id).ok_or(not_found)?;

        assignment.individual_stage = Some(stage);
        assignment.status = Some(match stage {
            TaskStage::Done => AssignmentStatus::Completed,
            TaskStage::Pending => AssignmentStatus::InProgress,
            TaskStage::Planning => AssignmentStatus::Assigned,
        });
        if stage == TaskStage::Done {
            assignment.completed_at = Some(timestamp);
        } else {
            assignment.completed_at = None;
            if assignment.approval == Some(Approval::Approved) {
                assignment.approval = Some(Approval::Pending);
            }
        }
        self.updated_at = Some(timestamp);
        Ok(())
    }

    /// Records an approval verdict for one assignee.
    ///
    /// # Errors
    ///
    /// See [`Self::check_individual_approval`].
    pub fn set_individual_approval(
        &mut self,
        user_id: &UserId,
        approval: Approval,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        self.check_individual_approval(user_id, approval)?;
        if let Some(assignment) = self.assignment_mut(user_id) {
            assignment.approval = Some(approval);
        }
        self.touch(clock);
        Ok(())
    }

    /// Appends a remark to one of the logs.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRemark`] when the text is blank.
    pub fn add_remark(
        &mut self,
        kind: RemarkKind,
        text: &str,
        author: Option<UserRef>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyRemark);
        }
        let timestamp = clock.utc();
        self.remarks.append(
            kind,
            Remark {
                text: trimmed.to_owned(),
                added_by: author,
                created_at: Some(timestamp),
            },
        );
        self.updated_at = Some(timestamp);
        Ok(())
    }

    /// Appends attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoAttachments`] when the list is empty.
    pub fn add_attachments(
        &mut self,
        attachments: Vec<Attachment>,
        clock: &impl Clock,
    ) -> Result<(), TaskDomainError> {
        if attachments.is_empty() {
            return Err(TaskDomainError::NoAttachments);
        }
        self.attachments.extend(attachments);
        self.touch(clock);
        Ok(())
    }

    /// Sets the soft-delete flag.
    pub fn mark_deleted(&mut self, clock: &impl Clock) {
        self.is_deleted = true;
        self.touch(clock);
    }

    fn assignment_mut(&mut self, user_id: &UserId) -> Option<&mut Assignment> {
        self.assigned_to
            .iter_mut()
            .find(|assignment| assignment.user_id() == Some(user_id))
    }

    fn assignee_not_found(&self, user_id: &UserId) -> TaskDomainError {
        TaskDomainError::AssigneeNotFound {
            task_id: self.id.clone(),
            user_id: user_id.clone(),
        }
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = Some(clock.utc());
    }
}

/// Decodes `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

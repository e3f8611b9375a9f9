//! Request payloads sent to the task backend.

use super::{Priority, TaskDomainError, TaskStage, TaskStatus, UserId};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashSet;

/// A file to upload alongside a task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    /// File name sent to the backend.
    pub name: String,
    /// MIME type of the content.
    pub mimetype: String,
    /// Raw file content.
    pub bytes: Vec<u8>,
}

impl UploadFile {
    /// Creates an upload from in-memory content.
    #[must_use]
    pub fn new(name: impl Into<String>, mimetype: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mimetype: mimetype.into(),
            bytes,
        }
    }

    /// Returns the content length in bytes.
    #[must_use]
    pub fn size(&self) -> u64 {
        u64::try_from(self.bytes.len()).unwrap_or(u64::MAX)
    }
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    title: String,
    description: String,
    priority: Priority,
    stage: TaskStage,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<DateTime<Utc>>,
    assigned_to: Vec<UserId>,
    is_group_task: bool,
    tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    department: Option<String>,
    #[serde(skip)]
    attachments: Vec<UploadFile>,
}

impl CreateTaskRequest {
    /// Creates a request with the required text fields.
    ///
    /// Validation happens in [`Self::validate`] so a form can be filled in
    /// before it is checked.
    #[must_use]
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            priority: Priority::default(),
            stage: TaskStage::default(),
            deadline: None,
            assigned_to: Vec::new(),
            is_group_task: false,
            tags: Vec::new(),
            department: None,
            attachments: Vec::new(),
        }
    }

    /// Sets the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    /// Sets the initial task stage.
    #[must_use]
    pub const fn with_stage(mut self, stage: TaskStage) -> Self {
        self.stage = stage;
        self
    }

    /// Sets the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Sets the assignees. More than one assignee makes this a group task.
    #[must_use]
    pub fn with_assignees(mut self, assignees: impl IntoIterator<Item = UserId>) -> Self {
        self.assigned_to = assignees.into_iter().collect();
        self.is_group_task = self.assigned_to.len() > 1;
        self
    }

    /// Sets the tags.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = tags.into_iter().collect();
        self
    }

    /// Sets the owning department.
    #[must_use]
    pub fn with_department(mut self, department: impl Into<String>) -> Self {
        self.department = Some(department.into());
        self
    }

    /// Adds a file to upload with the task.
    #[must_use]
    pub fn with_attachment(mut self, file: UploadFile) -> Self {
        self.attachments.push(file);
        self
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

    /// Returns the initial stage.
    #[must_use]
    pub const fn stage(&self) -> TaskStage {
        self.stage
    }

    /// Returns the deadline.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the assignees in order.
    #[must_use]
    pub fn assignees(&self) -> &[UserId] {
        &self.assigned_to
    }

    /// Returns `true` when more than one user is assigned.
    #[must_use]
    pub const fn is_group_task(&self) -> bool {
        self.is_group_task
    }

    /// Returns the tags.
    #[must_use]
    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// Returns the department identifier.
    #[must_use]
    pub fn department(&self) -> Option<&str> {
        self.department.as_deref()
    }

    /// Returns the files to upload.
    #[must_use]
    pub fn attachments(&self) -> &[UploadFile] {
        &self.attachments
    }

    /// Checks the request before it is submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyTitle`], [`TaskDomainError::EmptyDescription`],
    /// [`TaskDomainError::NoAssignees`] or [`TaskDomainError::DuplicateAssignee`].
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if self.title.trim().is_empty() {
            return Err(TaskDomainError::EmptyTitle);
        }
        if self.description.trim().is_empty() {
            return Err(TaskDomainError::EmptyDescription);
        }
        ensure_unique_assignees(&self.assigned_to)
    }
}

/// Checks that an assignee list is non-empty and free of duplicates.
///
/// # Errors
///
/// Returns [`TaskDomainError::NoAssignees`] or
/// [`TaskDomainError::DuplicateAssignee`].
pub fn ensure_unique_assignees(assignees: &[UserId]) -> Result<(), TaskDomainError> {
    if assignees.is_empty() {
        return Err(TaskDomainError::NoAssignees);
    }
    let mut seen = HashSet::with_capacity(assignees.len());
    for assignee in assignees {
        if !seen.insert(assignee) {
            return Err(TaskDomainError::DuplicateAssignee(assignee.clone()));
        }
    }
    Ok(())
}

/// Partial update of a task's editable fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    deadline: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tags: Option<Vec<String>>,
}

impl UpdateTaskRequest {
    /// Creates an empty update.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replaces the priority.
    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Replaces the deadline.
    #[must_use]
    pub const fn with_deadline(mut self, deadline: DateTime<Utc>) -> Self {
        self.deadline = Some(deadline);
        self
    }

    /// Replaces the tag list.
    #[must_use]
    pub fn with_tags(mut self, tags: impl IntoIterator<Item = String>) -> Self {
        self.tags = Some(tags.into_iter().collect());
        self
    }

    /// Returns the new title, if changed.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// Returns the new description, if changed.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the new priority, if changed.
    #[must_use]
    pub const fn priority(&self) -> Option<Priority> {
        self.priority
    }

    /// Returns the new deadline, if changed.
    #[must_use]
    pub const fn deadline(&self) -> Option<DateTime<Utc>> {
        self.deadline
    }

    /// Returns the new tags, if changed.
    #[must_use]
    pub fn tags(&self) -> Option<&[String]> {
        self.tags.as_deref()
    }

    /// Checks the update before it is submitted.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyUpdate`] when nothing changes, or the
    /// title/description errors when a replacement is blank.
    pub fn validate(&self) -> Result<(), TaskDomainError> {
        if *self == Self::default() {
            return Err(TaskDomainError::EmptyUpdate);
        }
        if self.title.as_deref().is_some_and(|title| title.trim().is_empty()) {
            return Err(TaskDomainError::EmptyTitle);
        }
        if self
            .description
            .as_deref()
            .is_some_and(|description| description.trim().is_empty())
        {
            return Err(TaskDomainError::EmptyDescription);
        }
        Ok(())
    }
}

/// Sort direction for task listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    /// Oldest or smallest first.
    Asc,
    /// Newest or largest first.
    #[default]
    Desc,
}

impl SortOrder {
    /// Returns the query-string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

/// Filters and pagination for task listings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskQuery {
    /// Page number, starting at 1.
    pub page: Option<u32>,
    /// Page size.
    pub limit: Option<u32>,
    /// Status filter.
    pub status: Option<TaskStatus>,
    /// Priority filter.
    pub priority: Option<Priority>,
    /// Task-level stage filter.
    pub stage: Option<TaskStage>,
    /// Only tasks assigned to this user.
    pub assigned_to: Option<UserId>,
    /// Only tasks created by this user.
    pub created_by: Option<UserId>,
    /// Free-text search over title and description.
    pub search: Option<String>,
    /// Lower bound on creation time.
    pub start_date: Option<DateTime<Utc>>,
    /// Upper bound on creation time.
    pub end_date: Option<DateTime<Utc>>,
    /// Field to sort by.
    pub sort_by: Option<String>,
    /// Sort direction.
    pub sort_order: Option<SortOrder>,
}

impl TaskQuery {
    /// Creates an unfiltered query.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a page.
    #[must_use]
    pub const fn page(mut self, page: u32, limit: u32) -> Self {
        self.page = Some(page);
        self.limit = Some(limit);
        self
    }

    /// Filters by status.
    #[must_use]
    pub const fn status(mut self, status: TaskStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Filters by priority.
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Filters by task-level stage.
    #[must_use]
    pub const fn stage(mut self, stage: TaskStage) -> Self {
        self.stage = Some(stage);
        self
    }

    /// Filters by assignee.
    #[must_use]
    pub fn assigned_to(mut self, user: UserId) -> Self {
        self.assigned_to = Some(user);
        self
    }

    /// Filters by creator.
    #[must_use]
    pub fn created_by(mut self, user: UserId) -> Self {
        self.created_by = Some(user);
        self
    }

    /// Filters by free text.
    #[must_use]
    pub fn search(mut self, text: impl Into<String>) -> Self {
        self.search = Some(text.into());
        self
    }

    /// Filters by creation date range.
    #[must_use]
    pub const fn between(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Sorts by a field.
    #[must_use]
    pub fn sort(mut self, field: impl Into<String>, order: SortOrder) -> Self {
        self.sort_by = Some(field.into());
        self.sort_order = Some(order);
        self
    }

    /// Returns the query-string pairs in a stable order, omitting unset
    /// filters and blank search text.
    #[must_use]
    pub fn to_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push(&mut pairs, "page", self.page.map(|page| page.to_string()));
        push(&mut pairs, "limit", self.limit.map(|limit| limit.to_string()));
        push(&mut pairs, "status", self.status.map(|s| s.as_str().to_owned()));
        push(&mut pairs, "priority", self.priority.map(|p| p.as_str().to_owned()));
        push(&mut pairs, "stage", self.stage.map(|s| s.as_str().to_owned()));
        push(&mut pairs, "assignedTo", self.assigned_to.as_ref().map(ToString::to_string));
        push(&mut pairs, "createdBy", self.created_by.as_ref().map(ToString::to_string));
        push(
            &mut pairs,
            "search",
            self.search
                .as_deref()
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .map(str::to_owned),
        );
        push(&mut pairs, "startDate", self.start_date.map(|d| d.to_rfc3339()));
        push(&mut pairs, "endDate", self.end_date.map(|d| d.to_rfc3339()));
        push(&mut pairs, "sortBy", self.sort_by.clone());
        push(&mut pairs, "sortOrder", self.sort_order.map(|o| o.as_str().to_owned()));
        pairs
    }
}

fn push(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(found) = value {
        pairs.push((key, found));
    }
}

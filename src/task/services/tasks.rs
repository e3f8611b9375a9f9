//! Service layer for task CRUD and lifecycle transitions.

use crate::{
    api::ApiError,
    task::{
        domain::{
            Approval, CreateTaskRequest, RemarkKind, Task, TaskDomainError, TaskId, TaskProgress,
            TaskQuery, TaskStage, TaskStatus, UpdateTaskRequest, UploadFile, UserId,
            ensure_unique_assignees,
        },
        ports::{TaskApi, TaskPage},
    },
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::debug;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// Domain validation failed; nothing was sent.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// The backend call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;

/// Task orchestration service.
///
/// Validates requests locally, then passes them to the backend. Derived
/// display values are computed here and never written back.
#[derive(Clone)]
pub struct TaskService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    api: Arc<A>,
    clock: Arc<C>,
}

impl<A, C> TaskService<A, C>
where
    A: TaskApi,
    C: Clock + Send + Sync,
{
    /// Creates a new task service.
    #[must_use]
    pub const fn new(api: Arc<A>, clock: Arc<C>) -> Self {
        Self { api, clock }
    }

    /// Lists tasks matching a query.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn list(&self, query: &TaskQuery) -> TaskServiceResult<TaskPage> {
        Ok(self.api.list(query).await?)
    }

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn get(&self, id: &TaskId) -> TaskServiceResult<Task> {
        Ok(self.api.get(id).await?)
    }

    /// Creates a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an empty title or
    /// description, or a missing or duplicated assignee, and
    /// [`TaskServiceError::Api`] when the backend call fails.
    pub async fn create(&self, request: &CreateTaskRequest) -> TaskServiceResult<Task> {
        request.validate()?;
        let task = self.api.create(request).await?;
        debug!(task_id = %task.id(), group = task.is_group_task(), "task created");
        Ok(task)
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Domain`] for an empty update or a blank
    /// replacement text, and [`TaskServiceError::Api`] when the backend call
    /// fails.
    pub async fn update(
        &self,
        id: &TaskId,
        changes: &UpdateTaskRequest,
    ) -> TaskServiceResult<Task> {
        changes.validate()?;
        Ok(self.api.update(id, changes).await?)
    }

    /// Soft-deletes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn delete(&self, id: &TaskId) -> TaskServiceResult<()> {
        self.api.delete(id).await?;
        debug!(task_id = %id, "task deleted");
        Ok(())
    }

    /// Replaces the assignee list.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoAssignees`] or
    /// [`TaskDomainError::DuplicateAssignee`] before any call, and
    /// [`TaskServiceError::Api`] when the backend call fails.
    pub async fn assign(&self, id: &TaskId, assignees: &[UserId]) -> TaskServiceResult<Task> {
        ensure_unique_assignees(assignees)?;
        Ok(self.api.assign(id, assignees).await?)
    }

    /// Sets the task status.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn update_status(&self, id: &TaskId, status: TaskStatus) -> TaskServiceResult<Task> {
        let task = self.api.update_status(id, status).await?;
        debug!(task_id = %id, status = status.as_str(), "task status updated");
        Ok(task)
    }

    /// Sets the task-level stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn update_stage(&self, id: &TaskId, stage: TaskStage) -> TaskServiceResult<Task> {
        Ok(self.api.update_stage(id, stage).await?)
    }

    /// Sets one assignee's individual stage.
    ///
    /// # Errors
    ///
    /// Returns [`TaskServiceError::Api`] when the backend call fails.
    pub async fn update_individual_stage(
        &self,
        id: &TaskId,
        user_id: &UserId,
        stage: TaskStage,
    ) -> TaskServiceResult<Task> {
        let task = self.api.update_individual_stage(id, user_id, stage).await?;
        debug!(task_id = %id, user_id = %user_id, stage = stage.as_str(), "individual stage updated");
        Ok(task)
    }

    /// Records an approval verdict for one assignee of `task`.
    ///
    /// The check runs against the task as the caller last saw it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::AssigneeNotFound`] or
    /// [`TaskDomainError::ApprovalBeforeCompletion`] before any call, and
    /// [`TaskServiceError::Api`] when the backend call fails.
    pub async fn update_individual_approval(
        &self,
        task: &Task,
        user_id: &UserId,
        approval: Approval,
    ) -> TaskServiceResult<Task> {
        task.check_individual_approval(user_id, approval)?;
        let updated = self
            .api
            .update_individual_approval(task.id(), user_id, approval)
            .await?;
        debug!(task_id = %task.id(), user_id = %user_id, approval = approval.as_str(), "approval recorded");
        Ok(updated)
    }

    /// Appends a remark.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::EmptyRemark`] for blank text, and
    /// [`TaskServiceError::Api`] when the backend call fails.
    pub async fn add_remark(
        &self,
        id: &TaskId,
        kind: RemarkKind,
        text: &str,
    ) -> TaskServiceResult<Task> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TaskDomainError::EmptyRemark.into());
        }
        Ok(self.api.add_remark(id, kind, trimmed).await?)
    }

    /// Uploads attachments.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::NoAttachments`] for an empty list, and
    /// [`TaskServiceError::Api`] when the backend call fails.
    pub async fn add_attachments(
        &self,
        id: &TaskId,
        files: &[UploadFile],
    ) -> TaskServiceResult<Task> {
        if files.is_empty() {
            return Err(TaskDomainError::NoAttachments.into());
        }
        Ok(self.api.add_attachments(id, files).await?)
    }

    /// Computes the display aggregates of a task.
    #[must_use]
    pub fn progress(&self, task: &Task) -> TaskProgress {
        TaskProgress::of(task, &*self.clock)
    }
}

//! Port for the backend task resource and its transitions.

use crate::{
    api::ApiResult,
    task::domain::{
        Approval, CreateTaskRequest, RemarkKind, Task, TaskId, TaskQuery, TaskStage, TaskStatus,
        UpdateTaskRequest, UploadFile, UserId,
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Paging metadata returned with task lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    /// One-based page number.
    #[serde(default)]
    pub page: u32,
    /// Page size.
    #[serde(default)]
    pub limit: u32,
    /// Number of matching tasks across all pages.
    #[serde(default)]
    pub total: u64,
    /// Number of pages.
    #[serde(default)]
    pub pages: u32,
}

/// One page of tasks.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskPage {
    /// Tasks on this page, in server order.
    #[serde(default)]
    pub tasks: Vec<Task>,
    /// Paging metadata; absent for unpaginated responses.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Task backend contract.
///
/// Every mutation returns the task as the backend stored it. Calls are
/// last-write-wins: no version is sent.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Lists tasks visible to the caller.
    async fn list(&self, query: &TaskQuery) -> ApiResult<TaskPage>;

    /// Fetches one task.
    ///
    /// # Errors
    ///
    /// Returns a 404 [`crate::api::ApiError::Status`] when the task does not
    /// exist or was deleted.
    async fn get(&self, id: &TaskId) -> ApiResult<Task>;

    /// Creates a task. Attachments on the request are uploaded with it.
    async fn create(&self, request: &CreateTaskRequest) -> ApiResult<Task>;

    /// Applies a partial update.
    async fn update(&self, id: &TaskId, changes: &UpdateTaskRequest) -> ApiResult<Task>;

    /// Soft-deletes a task.
    async fn delete(&self, id: &TaskId) -> ApiResult<()>;

    /// Replaces the assignee list.
    async fn assign(&self, id: &TaskId, assignees: &[UserId]) -> ApiResult<Task>;

    /// Sets the task status.
    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task>;

    /// Sets the task-level stage.
    async fn update_stage(&self, id: &TaskId, stage: TaskStage) -> ApiResult<Task>;

    /// Sets one assignee's individual stage.
    async fn update_individual_stage(
        &self,
        id: &TaskId,
        user_id: &UserId,
        stage: TaskStage,
    ) -> ApiResult<Task>;

    /// Records an approval verdict for one assignee.
    async fn update_individual_approval(
        &self,
        id: &TaskId,
        user_id: &UserId,
        approval: Approval,
    ) -> ApiResult<Task>;

    /// Appends a remark to one of the task's remark logs.
    async fn add_remark(&self, id: &TaskId, kind: RemarkKind, text: &str) -> ApiResult<Task>;

    /// Uploads files and attaches them to the task.
    async fn add_attachments(&self, id: &TaskId, files: &[UploadFile]) -> ApiResult<Task>;
}

//! HTTP adapter for the `/tasks` resource.

mod form;

use crate::{
    api::{ApiClient, ApiResult, Method},
    task::{
        domain::{
            Approval, CreateTaskRequest, RemarkKind, Task, TaskId, TaskQuery, TaskStage,
            TaskStatus, UpdateTaskRequest, UploadFile, UserId,
        },
        ports::{TaskApi, TaskPage},
    },
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Task backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct HttpTaskApi {
    client: ApiClient,
}

impl HttpTaskApi {
    /// Creates the adapter on top of a shared client.
    #[must_use]
    pub const fn new(client: ApiClient) -> Self {
        Self { client }
    }

    async fn send_for_task<B>(&self, method: Method, path: &str, payload: &B) -> ApiResult<Task>
    where
        B: Serialize + ?Sized + Sync,
    {
        let body: TaskBody = self.client.send_json(method, path, payload).await?;
        Ok(body.into_task())
    }
}

fn task_path(id: &TaskId) -> String {
    format!("tasks/{id}")
}

fn transition_path(id: &TaskId, transition: &str) -> String {
    format!("tasks/{id}/{transition}")
}

/// Mutations answer either `{task}` or the bare task.
#[derive(Deserialize)]
#[serde(untagged)]
enum TaskBody {
    Wrapped { task: Task },
    Bare(Task),
}

impl TaskBody {
    fn into_task(self) -> Task {
        match self {
            Self::Wrapped { task } | Self::Bare(task) => task,
        }
    }
}

/// Listings answer a paginated object, or a bare array from older servers.
#[derive(Deserialize)]
#[serde(untagged)]
enum ListBody {
    Bare(Vec<Task>),
    Page(TaskPage),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssignBody<'a> {
    assigned_to: &'a [UserId],
}

#[derive(Serialize)]
struct StatusBody {
    status: TaskStatus,
}

#[derive(Serialize)]
struct StageBody {
    stage: TaskStage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndividualStageBody<'a> {
    user_id: &'a UserId,
    individual_stage: TaskStage,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct IndividualApprovalBody<'a> {
    user_id: &'a UserId,
    approval: Approval,
}

#[derive(Serialize)]
struct RemarkBody<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    text: &'a str,
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn list(&self, query: &TaskQuery) -> ApiResult<TaskPage> {
        let body: ListBody = self.client.get("tasks", &query.to_pairs()).await?;
        Ok(match body {
            ListBody::Bare(tasks) => TaskPage {
                tasks,
                pagination: None,
            },
            ListBody::Page(page) => page,
        })
    }

    async fn get(&self, id: &TaskId) -> ApiResult<Task> {
        let body: TaskBody = self.client.get(&task_path(id), &[]).await?;
        Ok(body.into_task())
    }

    async fn create(&self, request: &CreateTaskRequest) -> ApiResult<Task> {
        if request.attachments().is_empty() {
            return self.send_for_task(Method::POST, "tasks", request).await;
        }
        let form = form::with_files(form::text_fields(request)?, request.attachments())?;
        let body: TaskBody = self
            .client
            .send_multipart(Method::POST, "tasks", form)
            .await?;
        Ok(body.into_task())
    }

    async fn update(&self, id: &TaskId, changes: &UpdateTaskRequest) -> ApiResult<Task> {
        self.send_for_task(Method::PUT, &task_path(id), changes).await
    }

    async fn delete(&self, id: &TaskId) -> ApiResult<()> {
        self.client.send_empty(Method::DELETE, &task_path(id)).await
    }

    async fn assign(&self, id: &TaskId, assignees: &[UserId]) -> ApiResult<Task> {
        let body = AssignBody {
            assigned_to: assignees,
        };
        self.send_for_task(Method::PUT, &transition_path(id, "assign"), &body)
            .await
    }

    async fn update_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task> {
        self.send_for_task(
            Method::PATCH,
            &transition_path(id, "status"),
            &StatusBody { status },
        )
        .await
    }

    async fn update_stage(&self, id: &TaskId, stage: TaskStage) -> ApiResult<Task> {
        self.send_for_task(
            Method::PATCH,
            &transition_path(id, "stage"),
            &StageBody { stage },
        )
        .await
    }

    async fn update_individual_stage(
        &self,
        id: &TaskId,
        user_id: &UserId,
        stage: TaskStage,
    ) -> ApiResult<Task> {
        let body = IndividualStageBody {
            user_id,
            individual_stage: stage,
        };
        self.send_for_task(Method::PATCH, &transition_path(id, "individual-stage"), &body)
            .await
    }

    async fn update_individual_approval(
        &self,
        id: &TaskId,
        user_id: &UserId,
        approval: Approval,
    ) -> ApiResult<Task> {
        let body = IndividualApprovalBody { user_id, approval };
        self.send_for_task(
            Method::PATCH,
            &transition_path(id, "individual-approval"),
            &body,
        )
        .await
    }

    async fn add_remark(&self, id: &TaskId, kind: RemarkKind, text: &str) -> ApiResult<Task> {
        let body = RemarkBody {
            kind: kind.as_str(),
            text,
        };
        self.send_for_task(Method::POST, &transition_path(id, "remarks"), &body)
            .await
    }

    async fn add_attachments(&self, id: &TaskId, files: &[UploadFile]) -> ApiResult<Task> {
        let form = form::with_files(reqwest::multipart::Form::new(), files)?;
        let body: TaskBody = self
            .client
            .send_multipart(Method::POST, &transition_path(id, "attachments"), form)
            .await?;
        Ok(body.into_task())
    }
}

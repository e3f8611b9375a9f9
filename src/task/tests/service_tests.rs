//! Unit tests for task service orchestration.

use std::sync::Arc;

use crate::{
    api::{ApiError, ApiResult},
    task::{
        domain::{
            Approval, CreateTaskRequest, RemarkKind, Task, TaskDomainError, TaskId, TaskQuery,
            TaskStage, TaskStatus, UpdateTaskRequest, UploadFile, UserId,
        },
        ports::{TaskApi, TaskPage},
        services::{TaskService, TaskServiceError},
    },
    test_support::{FixedClock, task_from_json},
};
use async_trait::async_trait;
use mockall::{mock, predicate::eq};
use rstest::{fixture, rstest};
use serde_json::json;

mock! {
    pub Backend {}

    #[async_trait]
    impl TaskApi for Backend {
        async fn list(&self, query: &TaskQuery) -> ApiResult<TaskPage>;
        async fn get(&self, id: &TaskId) -> ApiResult<Task>;
        async fn create(&self, request: &CreateTaskRequest) -> ApiResult<Task>;
        async fn update(&self, id: &TaskId, changes: &UpdateTaskRequest) -> ApiResult<Task>;
        async fn delete(&self, id: &TaskId) -> ApiResult<()>;
        async fn assign(&self, id: &TaskId, assignees: &[UserId]) -> ApiResult<Task>;
        async fn update_status(&self, id: &TaskId, status: TaskStatus) -> ApiResult<Task>;
        async fn update_stage(&self, id: &TaskId, stage: TaskStage) -> ApiResult<Task>;
        async fn update_individual_stage(
            &self,
            id: &TaskId,
            user_id: &UserId,
            stage: TaskStage,
        ) -> ApiResult<Task>;
        async fn update_individual_approval(
            &self,
            id: &TaskId,
            user_id: &UserId,
            approval: Approval,
        ) -> ApiResult<Task>;
        async fn add_remark(&self, id: &TaskId, kind: RemarkKind, text: &str) -> ApiResult<Task>;
        async fn add_attachments(&self, id: &TaskId, files: &[UploadFile]) -> ApiResult<Task>;
    }
}

type TestService = TaskService<MockBackend, FixedClock>;

#[fixture]
fn clock() -> FixedClock {
    FixedClock::at(2025, 3, 10, 12)
}

fn service_with(backend: MockBackend, clock: FixedClock) -> TestService {
    TaskService::new(Arc::new(backend), Arc::new(clock))
}

fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn task_id() -> TaskId {
    TaskId::new("t-1").expect("valid task id")
}

fn group_task(second_stage: &str) -> Task {
    task_from_json(json!({
        "_id": "t-1",
        "title": "Audit",
        "isGroupTask": true,
        "status": "in_progress",
        "assignedTo": [
            {"user": "u-1", "individualStage": "done", "approval": "pending"},
            {"user": "u-2", "individualStage": second_stage, "approval": "pending"}
        ]
    }))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn invalid_create_request_never_reaches_backend(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);
    let request = CreateTaskRequest::new("", "description").with_assignees([user("u-1")]);

    let result = service.create(&request).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(TaskDomainError::EmptyTitle))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn valid_create_request_is_sent(clock: FixedClock) {
    let mut backend = MockBackend::new();
    backend
        .expect_create()
        .withf(|request| request.is_group_task() && request.title() == "Audit")
        .times(1)
        .returning(|_| Ok(group_task("pending")));
    let service = service_with(backend, clock);
    let request =
        CreateTaskRequest::new("Audit", "Check books").with_assignees([user("u-1"), user("u-2")]);

    let task = service.create(&request).await.expect("create succeeds");

    assert_eq!(task.id(), &task_id());
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approving_unfinished_assignee_fails_before_any_call(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);
    let task = group_task("pending");

    let result = service
        .update_individual_approval(&task, &user("u-2"), Approval::Approved)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::ApprovalBeforeCompletion {
                stage: TaskStage::Pending,
                ..
            }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approving_unknown_assignee_fails_before_any_call(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);

    let result = service
        .update_individual_approval(&group_task("done"), &user("u-9"), Approval::Rejected)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::AssigneeNotFound { .. }
        ))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn approving_finished_assignee_calls_backend(clock: FixedClock) {
    let mut backend = MockBackend::new();
    backend
        .expect_update_individual_approval()
        .with(eq(task_id()), eq(user("u-1")), eq(Approval::Approved))
        .times(1)
        .returning(|_, _, _| Ok(group_task("pending")));
    let service = service_with(backend, clock);

    service
        .update_individual_approval(&group_task("pending"), &user("u-1"), Approval::Approved)
        .await
        .expect("approval succeeds");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn duplicate_assignees_are_rejected_locally(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);

    let result = service
        .assign(&task_id(), &[user("u-1"), user("u-1")])
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(TaskDomainError::DuplicateAssignee(_)))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn blank_remark_and_empty_upload_are_rejected_locally(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);

    let remark = service
        .add_remark(&task_id(), RemarkKind::General, "   ")
        .await;
    let upload = service.add_attachments(&task_id(), &[]).await;

    assert!(matches!(
        remark,
        Err(TaskServiceError::Domain(TaskDomainError::EmptyRemark))
    ));
    assert!(matches!(
        upload,
        Err(TaskServiceError::Domain(TaskDomainError::NoAttachments))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remark_text_is_trimmed_before_sending(clock: FixedClock) {
    let mut backend = MockBackend::new();
    backend
        .expect_add_remark()
        .withf(|_, kind, text| *kind == RemarkKind::Creator && text == "ship it")
        .times(1)
        .returning(|_, _, _| Ok(group_task("done")));
    let service = service_with(backend, clock);

    service
        .add_remark(&task_id(), RemarkKind::Creator, "  ship it  ")
        .await
        .expect("remark succeeds");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn empty_update_is_rejected_locally(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);

    let result = service.update(&task_id(), &UpdateTaskRequest::new()).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(TaskDomainError::EmptyUpdate))
    ));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn backend_errors_propagate_verbatim(clock: FixedClock) {
    let mut backend = MockBackend::new();
    backend
        .expect_get()
        .returning(|_| Err(ApiError::not_found("Task not found")));
    let service = service_with(backend, clock);

    let result = service.get(&task_id()).await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Api(ApiError::Status { status: 404, ref message }))
            if message == "Task not found"
    ));
}

#[rstest]
fn progress_uses_injected_clock(clock: FixedClock) {
    let service = service_with(MockBackend::new(), clock);
    let task = task_from_json(json!({
        "_id": "t-1",
        "status": "in_progress",
        "deadline": "2025-03-09T12:00:00Z",
        "assignedTo": [{"user": "u-1", "individualStage": "done"}]
    }));

    let progress = service.progress(&task);

    assert_eq!(progress.percent, 100);
    assert!(progress.overdue);
}

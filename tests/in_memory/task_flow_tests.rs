//! Group task lifecycle from creation to full approval.

use super::helpers::{Backend, backend};
use rstest::rstest;
use taskboard::task::{
    domain::{
        Approval, CreateTaskRequest, RemarkKind, TaskDomainError, TaskQuery, TaskStage,
        TaskStatus, UploadFile, UserId,
    },
    services::TaskServiceError,
};

fn user(id: &str) -> UserId {
    UserId::new(id).expect("valid user id")
}

fn audit_request() -> CreateTaskRequest {
    CreateTaskRequest::new("Quarterly audit", "Reconcile Q1 ledgers")
        .with_assignees([user("ada"), user("alan")])
        .with_tags(["finance".to_owned()])
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn group_task_progresses_to_all_approved(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");
    let created = backend
        .tasks
        .create(&audit_request())
        .await
        .expect("task is created");
    assert!(created.is_group_task());
    assert_eq!(created.status(), TaskStatus::Assigned);

    let half_done = backend
        .tasks
        .update_individual_stage(created.id(), &user("ada"), TaskStage::Done)
        .await
        .expect("ada finishes");
    let progress = backend.tasks.progress(&half_done);
    assert_eq!(progress.percent, 50);
    assert_eq!(progress.approval.to_string(), "Pending");

    let partly_approved = backend
        .tasks
        .update_individual_approval(&half_done, &user("ada"), Approval::Approved)
        .await
        .expect("ada is approved");
    assert_eq!(
        backend.tasks.progress(&partly_approved).approval.to_string(),
        "1/2 Approved"
    );

    let all_done = backend
        .tasks
        .update_individual_stage(created.id(), &user("alan"), TaskStage::Done)
        .await
        .expect("alan finishes");
    let approved = backend
        .tasks
        .update_individual_approval(&all_done, &user("alan"), Approval::Approved)
        .await
        .expect("alan is approved");

    let final_progress = backend.tasks.progress(&approved);
    assert_eq!(final_progress.percent, 100);
    assert_eq!(final_progress.approval.to_string(), "All Approved");
    assert_eq!(approved.status(), TaskStatus::Assigned);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn early_approval_is_refused_before_any_call(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");
    let created = backend
        .tasks
        .create(&audit_request())
        .await
        .expect("task is created");

    let result = backend
        .tasks
        .update_individual_approval(&created, &user("alan"), Approval::Approved)
        .await;

    assert!(matches!(
        result,
        Err(TaskServiceError::Domain(
            TaskDomainError::ApprovalBeforeCompletion { .. }
        ))
    ));
    let stored = backend.tasks.get(created.id()).await.expect("task loads");
    assert!(stored
        .assigned_to()
        .iter()
        .all(|assignment| assignment.approval != Some(Approval::Approved)));
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn assignee_sees_only_their_tasks(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");
    backend
        .tasks
        .create(&audit_request())
        .await
        .expect("group task is created");
    backend
        .tasks
        .create(
            &CreateTaskRequest::new("Update wiki", "Document the close process")
                .with_assignees([user("alan")]),
        )
        .await
        .expect("individual task is created");

    let page = backend
        .tasks
        .list(&TaskQuery::new().assigned_to(user("ada")))
        .await
        .expect("tasks list");

    assert_eq!(page.tasks.len(), 1);
    assert_eq!(
        page.pagination.map(|pagination| pagination.total),
        Some(1)
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn remarks_and_attachments_accumulate(backend: Backend) {
    backend
        .sign_in("ada@example.com")
        .await
        .expect("employee signs in");
    let created = backend
        .tasks
        .create(
            &CreateTaskRequest::new("Expense report", "March travel")
                .with_assignees([user("ada")])
                .with_attachment(UploadFile::new(
                    "receipt.pdf",
                    "application/pdf",
                    b"%PDF-1.7".to_vec(),
                )),
        )
        .await
        .expect("task is created");

    backend
        .tasks
        .add_remark(created.id(), RemarkKind::Assignee, "  Submitted for review ")
        .await
        .expect("remark is added");
    let updated = backend
        .tasks
        .add_attachments(
            created.id(),
            &[UploadFile::new("notes.txt", "text/plain", b"ok".to_vec())],
        )
        .await
        .expect("attachment is added");

    assert_eq!(updated.attachments().len(), 2);
    let remarks = updated.remarks().log(RemarkKind::Assignee);
    assert_eq!(
        remarks.first().map(|remark| remark.text.as_str()),
        Some("Submitted for review")
    );
    assert_eq!(
        remarks
            .first()
            .and_then(|remark| remark.added_by.as_ref())
            .map(|author| author.display_name()),
        Some("Ada Lovelace")
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_task_disappears(backend: Backend) {
    backend
        .sign_in("grace@example.com")
        .await
        .expect("hod signs in");
    let created = backend
        .tasks
        .create(&audit_request())
        .await
        .expect("task is created");

    backend.tasks.delete(created.id()).await.expect("task is deleted");

    let result = backend.tasks.get(created.id()).await;
    assert!(matches!(
        result,
        Err(TaskServiceError::Api(ref err)) if err.status() == Some(404)
    ));
}

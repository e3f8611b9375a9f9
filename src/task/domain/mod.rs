//! Domain model for task tracking.
//!
//! Tasks are owned by the backend; this module mirrors their wire shape,
//! validates outgoing requests, and derives the display aggregates (progress,
//! approval label, overdue flag) without any infrastructure concerns.

mod assignment;
mod error;
mod ids;
mod progress;
mod refs;
mod remark;
mod request;
mod status;
mod task;

pub use assignment::Assignment;
pub use error::{ParseTaskValueError, TaskDomainError};
pub use ids::{TaskId, UserId};
pub use progress::{
    ApprovalSummary, TaskProgress, compute_approval_status, compute_progress, is_overdue,
};
pub use refs::{
    DepartmentRef, UNKNOWN_DEPARTMENT, UNKNOWN_USER_EMAIL, UNKNOWN_USER_NAME, UserRef,
    display_email, display_name,
};
pub use remark::{Attachment, Remark, RemarkKind, Remarks};
pub use request::{
    CreateTaskRequest, SortOrder, TaskQuery, UpdateTaskRequest, UploadFile,
    ensure_unique_assignees,
};
pub use status::{Approval, AssignmentStatus, Priority, TaskStage, TaskStatus};
pub use task::Task;

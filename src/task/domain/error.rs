//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStage, UserId};
use thiserror::Error;

/// Errors returned while validating task requests and transitions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// An identifier was blank after trimming.
    #[error("{0} identifier must not be empty")]
    EmptyIdentifier(&'static str),

    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The task description is empty after trimming.
    #[error("task description must not be empty")]
    EmptyDescription,

    /// A task must have at least one worker assigned.
    #[error("a task needs at least one assignee")]
    NoAssignees,

    /// The same user was listed twice as an assignee.
    #[error("user {0} is assigned more than once")]
    DuplicateAssignee(UserId),

    /// The user is not one of the task's assignees.
    #[error("user {user_id} is not assigned to task {task_id}")]
    AssigneeNotFound {
        /// Task identifier.
        task_id: TaskId,
        /// User that was looked up.
        user_id: UserId,
    },

    /// Approval was requested before the assignee finished their work.
    #[error(
        "cannot approve user {user_id} on task {task_id}: individual stage is {stage}, expected done"
    )]
    ApprovalBeforeCompletion {
        /// Task identifier.
        task_id: TaskId,
        /// Assignee whose work was being approved.
        user_id: UserId,
        /// Current individual stage of the assignee.
        stage: TaskStage,
    },

    /// A remark with no text was submitted.
    #[error("remark text must not be empty")]
    EmptyRemark,

    /// An attachment upload carried no files.
    #[error("at least one attachment is required")]
    NoAttachments,

    /// An update request changed nothing.
    #[error("update request contains no changes")]
    EmptyUpdate,
}

/// Error returned while parsing a task enumeration from its wire form.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown {kind}: {value}")]
pub struct ParseTaskValueError {
    /// Name of the enumeration being parsed.
    pub kind: &'static str,
    /// Rejected input.
    pub value: String,
}

impl ParseTaskValueError {
    pub(crate) fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

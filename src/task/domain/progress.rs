//! Display aggregates derived from a task and its assignments.
//!
//! Everything here is a pure, total function: no I/O, no failure. The client
//! shows these values but never writes them back to the backend.

use super::{Approval, Assignment, Task, TaskStatus};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::fmt;

/// Returns the share of assignees that finished, as a rounded percentage.
///
/// An assignee counts as finished when their individual stage is done or
/// their assignment status is completed. Halves round up. An empty list
/// yields `0`.
#[must_use]
pub fn compute_progress(assignments: &[Assignment]) -> u8 {
    let total = assignments.len();
    if total == 0 {
        return 0;
    }
    let completed = assignments
        .iter()
        .filter(|assignment| assignment.is_complete())
        .count();
    #[expect(
        clippy::integer_division,
        reason = "integer rounding of 100 * completed / total, halves up"
    )]
    let percent = (200 * completed + total) / (2 * total);
    u8::try_from(percent).unwrap_or(100)
}

/// Approval label of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalSummary {
    /// Individual task with status approved.
    Approved,
    /// Individual task with status rejected.
    Rejected,
    /// No verdict recorded yet.
    Pending,
    /// Every assignee of a group task is approved.
    AllApproved,
    /// Some assignees of a group task are approved, none rejected.
    PartiallyApproved {
        /// Approved assignees.
        approved: usize,
        /// All assignees.
        total: usize,
    },
    /// At least one assignee of a group task is rejected.
    WithRejections {
        /// Approved assignees.
        approved: usize,
        /// All assignees.
        total: usize,
        /// Rejected assignees.
        rejected: usize,
    },
}

impl fmt::Display for ApprovalSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Approved => f.write_str("Approved"),
            Self::Rejected => f.write_str("Rejected"),
            Self::Pending => f.write_str("Pending"),
            Self::AllApproved => f.write_str("All Approved"),
            Self::PartiallyApproved { approved, total } => {
                write!(f, "{approved}/{total} Approved")
            }
            Self::WithRejections {
                approved,
                total,
                rejected,
            } => write!(f, "{approved}/{total} Approved, {rejected} Rejected"),
        }
    }
}

/// Returns the approval label of a task.
///
/// Individual tasks read the task status. Group tasks tally the current
/// verdict of each assignee; "all approved" is checked before "any
/// rejected", so only current verdicts matter.
#[must_use]
pub fn compute_approval_status(task: &Task) -> ApprovalSummary {
    if !task.is_group_task() {
        return match task.status() {
            TaskStatus::Approved => ApprovalSummary::Approved,
            TaskStatus::Rejected => ApprovalSummary::Rejected,
            _ => ApprovalSummary::Pending,
        };
    }

    let assignments = task.assigned_to();
    let total = assignments.len();
    let approved = count_verdicts(assignments, Approval::Approved);
    let rejected = count_verdicts(assignments, Approval::Rejected);

    if total > 0 && approved == total {
        ApprovalSummary::AllApproved
    } else if rejected > 0 {
        ApprovalSummary::WithRejections {
            approved,
            total,
            rejected,
        }
    } else if approved > 0 {
        ApprovalSummary::PartiallyApproved { approved, total }
    } else {
        ApprovalSummary::Pending
    }
}

fn count_verdicts(assignments: &[Assignment], verdict: Approval) -> usize {
    assignments
        .iter()
        .filter(|assignment| assignment.approval == Some(verdict))
        .count()
}

/// Returns `true` when the deadline has passed and the task has not reached
/// completed or approved.
///
/// The comparison is made in UTC against the injected clock. A task without a
/// deadline is never overdue.
#[must_use]
pub fn is_overdue(deadline: Option<DateTime<Utc>>, status: TaskStatus, clock: &impl Clock) -> bool {
    if status.is_terminal_success() {
        return false;
    }
    deadline.is_some_and(|due| due < clock.utc())
}

/// Display aggregates of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaskProgress {
    /// Rounded completion percentage.
    pub percent: u8,
    /// Approval label.
    pub approval: ApprovalSummary,
    /// Overdue flag.
    pub overdue: bool,
}

impl TaskProgress {
    /// Computes the aggregates of a task.
    #[must_use]
    pub fn of(task: &Task, clock: &impl Clock) -> Self {
        Self {
            percent: compute_progress(task.assigned_to()),
            approval: compute_approval_status(task),
            overdue: is_overdue(task.deadline(), task.status(), clock),
        }
    }
}

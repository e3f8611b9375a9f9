//! Spreadsheet export of a task list.
//!
//! One CSV row per task with the display aggregates already derived, so the
//! file opens in any spreadsheet application without formulas.

use super::services::ReportResult;
use crate::task::domain::{
    DepartmentRef, Task, TaskProgress, UNKNOWN_DEPARTMENT, display_email, display_name,
};
use camino::Utf8Path;
use cap_std::{ambient_authority, fs_utf8::Dir};
use chrono::{DateTime, Utc};
use mockable::Clock;
use std::io;
use tracing::info;

/// Header row of the export.
pub const EXPORT_COLUMNS: [&str; 18] = [
    "Title",
    "Type",
    "Priority",
    "Status",
    "Stage",
    "Created By",
    "Creator Email",
    "Department",
    "Assignees",
    "Progress (%)",
    "Approval",
    "Created At",
    "Deadline",
    "Completed At",
    "Overdue",
    "Tags",
    "Attachments",
    "Remarks",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Task list ready to be written as CSV.
///
/// Progress, approval label, and the overdue flag are derived against the
/// injected clock at write time.
pub struct TaskExport<'a, C>
where
    C: Clock,
{
    tasks: &'a [Task],
    clock: &'a C,
}

impl<'a, C> TaskExport<'a, C>
where
    C: Clock,
{
    /// Prepares an export of `tasks`, in the given order.
    #[must_use]
    pub const fn new(tasks: &'a [Task], clock: &'a C) -> Self {
        Self { tasks, clock }
    }

    /// Returns the suggested file name, dated with the clock's UTC day.
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("tasks-report-{}.csv", self.clock.utc().format("%Y-%m-%d"))
    }

    /// Returns the data rows, one per task.
    #[must_use]
    pub fn rows(&self) -> Vec<Vec<String>> {
        self.tasks.iter().map(|task| self.row(task)).collect()
    }

    fn row(&self, task: &Task) -> Vec<String> {
        let progress = TaskProgress::of(task, self.clock);
        let assignees: Vec<&str> = task
            .assigned_to()
            .iter()
            .map(|assignment| display_name(assignment.user.as_ref()))
            .collect();
        let kind = if task.is_group_task() { "Group" } else { "Individual" };
        let overdue = if progress.overdue { "Yes" } else { "No" };

        vec![
            task.title().to_owned(),
            kind.to_owned(),
            task.priority().label().to_owned(),
            task.status().label().to_owned(),
            task.stage().label().to_owned(),
            display_name(task.created_by()).to_owned(),
            display_email(task.created_by()).to_owned(),
            task.department()
                .map_or(UNKNOWN_DEPARTMENT, DepartmentRef::display_name)
                .to_owned(),
            assignees.join(", "),
            progress.percent.to_string(),
            progress.approval.to_string(),
            timestamp(task.created_at()),
            timestamp(task.deadline()),
            timestamp(task.completed_at()),
            overdue.to_owned(),
            task.tags().join(", "),
            task.attachments().len().to_string(),
            task.remarks().total().to_string(),
        ]
    }

    /// Writes the header and every row to `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`super::services::ReportError::Csv`] or
    /// [`super::services::ReportError::Io`] when writing fails.
    pub fn write_to<W: io::Write>(&self, writer: W) -> ReportResult<()> {
        let mut csv = csv::Writer::from_writer(writer);
        csv.write_record(EXPORT_COLUMNS)?;
        for row in self.rows() {
            csv.write_record(&row)?;
        }
        csv.flush()?;
        Ok(())
    }

    /// Creates or truncates `name` inside `dir` and writes the export to it.
    ///
    /// # Errors
    ///
    /// Returns [`super::services::ReportError::Io`] when the file cannot be
    /// created, or any error of [`Self::write_to`].
    pub fn write_file(&self, dir: &Dir, name: &str) -> ReportResult<()> {
        let file = dir.create(name)?;
        self.write_to(file)?;
        info!(file = name, tasks = self.tasks.len(), "wrote task export");
        Ok(())
    }

    /// Writes the export to `path`, whose parent directory must exist.
    ///
    /// # Errors
    ///
    /// Returns [`super::services::ReportError::Io`] when the parent directory
    /// cannot be opened or `path` has no file name, or any error of
    /// [`Self::write_file`].
    pub fn write_path(&self, path: &Utf8Path) -> ReportResult<()> {
        let name = path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("'{path}' names no file"))
        })?;
        let parent = path
            .parent()
            .filter(|dir| !dir.as_str().is_empty())
            .unwrap_or_else(|| Utf8Path::new("."));
        let dir = Dir::open_ambient_dir(parent, ambient_authority())?;
        self.write_file(&dir, name)
    }
}

fn timestamp(value: Option<DateTime<Utc>>) -> String {
    value.map_or_else(String::new, |at| at.format(TIMESTAMP_FORMAT).to_string())
}

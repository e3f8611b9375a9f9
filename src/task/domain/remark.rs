//! Remark logs and attachment metadata carried by a task.

use super::{ParseTaskValueError, UserRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The log a remark is appended to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemarkKind {
    /// Written by the task creator.
    Creator,
    /// Written by an assignee.
    Assignee,
    /// Anyone else.
    General,
}

impl RemarkKind {
    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Creator => "creator",
            Self::Assignee => "assignee",
            Self::General => "general",
        }
    }
}

impl TryFrom<&str> for RemarkKind {
    type Error = ParseTaskValueError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_ascii_lowercase().as_str() {
            "creator" => Ok(Self::Creator),
            "assignee" => Ok(Self::Assignee),
            "general" => Ok(Self::General),
            _ => Err(ParseTaskValueError::new("remark kind", value)),
        }
    }
}

/// One comment in a remark log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Remark {
    /// Comment body.
    #[serde(default)]
    pub text: String,
    /// Author, when known.
    #[serde(default, alias = "author", skip_serializing_if = "Option::is_none")]
    pub added_by: Option<UserRef>,
    /// Time the comment was recorded.
    #[serde(default, alias = "addedAt", skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// The three independent remark logs of a task, each in chronological order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Remarks {
    /// Creator comments.
    #[serde(default)]
    pub creator: Vec<Remark>,
    /// Assignee comments.
    #[serde(default)]
    pub assignee: Vec<Remark>,
    /// General comments.
    #[serde(default)]
    pub general: Vec<Remark>,
}

impl Remarks {
    /// Returns the log for the given kind.
    #[must_use]
    pub fn log(&self, kind: RemarkKind) -> &[Remark] {
        match kind {
            RemarkKind::Creator => &self.creator,
            RemarkKind::Assignee => &self.assignee,
            RemarkKind::General => &self.general,
        }
    }

    /// Appends a remark to the end of the given log.
    pub fn append(&mut self, kind: RemarkKind, remark: Remark) {
        let log = match kind {
            RemarkKind::Creator => &mut self.creator,
            RemarkKind::Assignee => &mut self.assignee,
            RemarkKind::General => &mut self.general,
        };
        log.push(remark);
    }

    /// Returns the number of remarks across all logs.
    #[must_use]
    pub fn total(&self) -> usize {
        self.creator.len() + self.assignee.len() + self.general.len()
    }
}

/// Metadata of an uploaded file. The content lives in backend storage.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Stored file name.
    #[serde(default)]
    pub filename: String,
    /// Name of the file as uploaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_name: Option<String>,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
    /// MIME type reported at upload.
    #[serde(default)]
    pub mimetype: String,
    /// Storage path on the backend.
    #[serde(default)]
    pub path: String,
}

impl Attachment {
    /// Returns the name to show to users.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.original_name.as_deref().unwrap_or(&self.filename)
    }
}

//! Application services for reporting.

mod reports;

pub use reports::{ReportError, ReportResult, ReportService};

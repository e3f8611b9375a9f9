//! Domain model for reporting.

mod scope;
mod stats;

pub use scope::{ParseReportScopeError, ReportScope};
pub use stats::DashboardStats;

//! Port contracts for reporting.

mod report_api;

pub use report_api::ReportApi;

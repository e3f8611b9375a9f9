//! In-memory adapter for the reporting ports.

mod report;

pub use report::InMemoryReportApi;

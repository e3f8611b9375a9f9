//! Reporting and export.
//!
//! Admin and HOD statistics are pre-computed by the backend and fetched per
//! [`domain::ReportScope`]. Task lists can be exported to CSV with
//! [`export::TaskExport`].

pub mod adapters;
pub mod domain;
pub mod export;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

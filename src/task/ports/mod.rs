//! Port contracts for task management.
//!
//! Ports define transport-agnostic interfaces used by task services.

pub mod task_api;

pub use task_api::{Pagination, TaskApi, TaskPage};

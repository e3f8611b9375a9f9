//! Application services for task management.

mod tasks;

pub use tasks::{TaskService, TaskServiceError, TaskServiceResult};

//! In-memory task backend for tests and offline use.

mod task;

pub use task::InMemoryTaskApi;

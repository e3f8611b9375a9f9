//! Port contracts for authentication and session persistence.

pub mod auth_api;
pub mod store;

pub use auth_api::AuthApi;
pub use store::{SessionStore, SessionStoreError, SessionStoreResult};

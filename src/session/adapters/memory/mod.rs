//! In-memory session adapters for tests and offline use.

mod auth;
mod store;

pub use auth::InMemoryAuthApi;
pub use store::InMemorySessionStore;

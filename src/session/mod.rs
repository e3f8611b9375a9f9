//! Authentication and session management.
//!
//! Login, registration, logout, and profile refresh against the backend, with
//! the session persisted between runs. The session is carried by an explicit
//! [`SessionHandle`] passed to whoever needs it. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
mod handle;
pub mod ports;
pub mod services;

pub use handle::SessionHandle;

#[cfg(test)]
mod tests;

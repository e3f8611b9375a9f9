//! In-app notifications.
//!
//! Unread count, the notification list, and read marking, plus a background
//! poller that keeps the unread count fresh. Reads degrade to "nothing to
//! show" when the session is missing or expired. The module follows
//! hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services and the poller in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

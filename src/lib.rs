//! Taskboard: client library for an organisation task-management backend.
//!
//! Employees, heads of department, and admins create, assign, track, and
//! report on tasks held by a remote backend. This crate provides the typed
//! client for that backend together with the logic the client derives on its
//! own: group task progress, approval labels, and overdue flags.
//!
//! # Architecture
//!
//! Each bounded context follows hexagonal architecture principles:
//!
//! - **Domain**: Pure types and logic with no infrastructure dependencies
//! - **Ports**: Async trait interfaces for the backend
//! - **Adapters**: HTTP implementations over [`api::ApiClient`] and in-memory
//!   implementations for tests and offline use
//! - **Services**: Validation and orchestration on top of the ports
//!
//! # Modules
//!
//! - [`config`]: Layered client configuration
//! - [`api`]: Bearer-authenticated HTTP client and response envelope
//! - [`session`]: Login, logout, and the persisted session
//! - [`task`]: Task lifecycle and progress aggregation
//! - [`notification`]: Unread count, feed, and polling
//! - [`report`]: Statistics views and CSV export

pub mod api;
pub mod config;
pub mod notification;
pub mod report;
pub mod session;
pub mod task;

#[cfg(test)]
mod test_support;

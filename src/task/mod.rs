//! Task management.
//!
//! Tasks live on the backend. This module mirrors their shape, validates
//! creation and update requests before they are sent, drives the lifecycle
//! transitions (assignment, status, stage, per-assignee stage and approval,
//! remarks, attachments), and derives the display aggregates: percent
//! complete, approval label, and overdue flag. The module follows hexagonal
//! architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;

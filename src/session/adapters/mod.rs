//! Adapter implementations for session ports.

pub mod file;
pub mod http;
pub mod memory;

//! Adapter implementations for the task port.

pub mod http;
pub mod memory;

//! Adapter implementations of the reporting ports.

pub mod http;
pub mod memory;

//! Adapter implementations for the notification port.

pub mod http;
pub mod memory;

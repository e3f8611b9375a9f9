//! Unit tests for the session context.

mod domain_tests;
mod file_store_tests;

//! Unit tests for the reporting context.

//! Step definitions for group task progress scenarios.

pub mod given;
pub mod then;
pub mod when;
pub mod world;

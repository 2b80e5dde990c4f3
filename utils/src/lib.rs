//! Shared utilities for the vouch workspace.

pub mod gpa;
pub mod logging;

pub use gpa::extract_gpa;
pub use logging::{init_logging, LogFormat};

//! Utility modules for common functionality.
//!
//! - logging: Logging setup
//! - tests: Builders for test instances of models

pub mod logging;

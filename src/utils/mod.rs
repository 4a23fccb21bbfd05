//! Utility modules for configuration, error handling, and result paths.

pub mod config;
pub mod error;
pub mod paths;

// Re-export commonly used error types for convenience
pub use error::{ConfigError, MetricsError, OutputError, TraceError};
pub use paths::{ResultPaths, TestType, Tunnel};

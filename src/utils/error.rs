//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use thiserror::Error;

/// Errors that can occur while loading a trace
#[derive(Error, Debug)]
pub enum TraceError {
    #[error("Failed to read trace: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed trace row at line {line} ({raw:?}): {reason}")]
    Format {
        /// 1-based line in the source, the header being line 1
        line: u64,
        /// Row content as read, fields joined with commas
        raw: String,
        reason: String,
    },
}

impl TraceError {
    pub fn format(line: u64, raw: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            raw: raw.into(),
            reason: reason.into(),
        }
    }

    /// Convert a csv reader error, keeping I/O failures distinct from framing errors
    pub fn from_csv(err: csv::Error) -> Self {
        let line = err.position().map(|p| p.line()).unwrap_or(0);
        match err.into_kind() {
            csv::ErrorKind::Io(io) => Self::Io(io),
            csv::ErrorKind::Utf8 { err, .. } => {
                Self::format(line, String::new(), format!("invalid UTF-8: {}", err))
            }
            other => Self::format(line, String::new(), format!("{:?}", other)),
        }
    }
}

/// Errors in caller-supplied configuration
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Expected packet count {expected} is smaller than the {rows} rows in the trace")]
    ExpectedCountTooSmall { expected: usize, rows: usize },
}

/// Errors that can occur while building a metrics bundle
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error(transparent)]
    Trace(#[from] TraceError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_error_message_carries_context() {
        let err = TraceError::format(3, "1,abc,,,", "invalid send_ts");
        let msg = err.to_string();
        assert!(msg.contains("line 3"));
        assert!(msg.contains("1,abc,,,"));
        assert!(msg.contains("invalid send_ts"));
    }

    #[test]
    fn test_config_error_converts_into_metrics_error() {
        let err: MetricsError = ConfigError::ExpectedCountTooSmall { expected: 1, rows: 2 }.into();
        assert!(matches!(err, MetricsError::Config(_)));
    }
}

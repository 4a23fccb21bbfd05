//! CSV trace loader.
//!
//! Reads the trace written by the capture tool into an ordered sequence of
//! [`PacketRecord`]s. The first line is a header and is skipped without
//! looking at it. Every other line must hold exactly five comma separated
//! fields: `receive_index, send_ts, pre_tunnel_ts, post_tunnel_ts, recv_ts`.
//! An empty field means the probe never saw the packet. Fields are trimmed,
//! and blank lines between rows are skipped rather than rejected.
//!
//! Loading is all-or-nothing: the first malformed row aborts the load.

use super::record::PacketRecord;
use crate::utils::config::TRACE_FIELD_COUNT;
use crate::utils::error::TraceError;
use csv::ByteRecord;
use log::debug;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::str::FromStr;

/// Ordered packet records, one per data row, in file order
pub type Trace = Vec<PacketRecord>;

/// Streaming reader over a trace source
pub struct TraceReader<R> {
    inner: csv::Reader<R>,
}

impl TraceReader<File> {
    /// Open a trace file
    ///
    /// # Errors
    /// * `TraceError::Io` - file cannot be opened
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TraceError> {
        let path = path.as_ref();
        debug!("Opening trace: {}", path.display());
        let file = File::open(path)?;
        Ok(Self::from_reader(file))
    }
}

impl<R: Read> TraceReader<R> {
    pub fn from_reader(source: R) -> Self {
        let inner = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(source);
        Self { inner }
    }

    /// Read every remaining row
    ///
    /// # Errors
    /// * `TraceError::Io` - source cannot be read
    /// * `TraceError::Format` - first malformed row encountered
    pub fn read_trace(mut self) -> Result<Trace, TraceError> {
        let mut trace = Vec::new();
        let mut row = ByteRecord::new();

        loop {
            let more = self.inner.read_byte_record(&mut row).map_err(TraceError::from_csv)?;
            if !more {
                break;
            }
            // Header is line 1, so the first data row is line 2 at the earliest
            let line = row
                .position()
                .map(|p| p.line())
                .unwrap_or(trace.len() as u64 + 2);
            trace.push(parse_record(&row, line)?);
        }

        debug!("Loaded {} trace rows", trace.len());
        Ok(trace)
    }
}

/// Load a whole trace file
///
/// **Public** - main entry point for trace ingestion
pub fn load_trace(path: impl AsRef<Path>) -> Result<Trace, TraceError> {
    TraceReader::from_path(path)?.read_trace()
}

/// Parse one data row
///
/// `line` is only used for error reporting.
pub fn parse_record(row: &ByteRecord, line: u64) -> Result<PacketRecord, TraceError> {
    let raw = || {
        row.iter()
            .map(String::from_utf8_lossy)
            .collect::<Vec<_>>()
            .join(",")
    };

    if row.len() != TRACE_FIELD_COUNT {
        return Err(TraceError::format(
            line,
            raw(),
            format!("expected {} fields, found {}", TRACE_FIELD_COUNT, row.len()),
        ));
    }

    let fields = row
        .iter()
        .enumerate()
        .map(|(index, bytes)| {
            std::str::from_utf8(bytes).map_err(|e| {
                TraceError::format(line, raw(), format!("invalid UTF-8 in field {}: {}", index, e))
            })
        })
        .collect::<Result<Vec<&str>, TraceError>>()?;

    let field = |index: usize, name: &str| -> Result<Option<i64>, TraceError> {
        parse_optional(fields.get(index).copied()).map_err(|reason| {
            TraceError::format(line, raw(), format!("invalid {}: {}", name, reason))
        })
    };

    let receive_index = parse_optional::<u64>(fields.first().copied()).map_err(|reason| {
        TraceError::format(line, raw(), format!("invalid receive_index: {}", reason))
    })?;
    let send_timestamp = field(1, "send_ts")?
        .ok_or_else(|| TraceError::format(line, raw(), "send_ts is required"))?;

    Ok(PacketRecord {
        receive_index,
        send_timestamp,
        pre_tunnel_timestamp: field(2, "pre_tunnel_ts")?,
        post_tunnel_timestamp: field(3, "post_tunnel_ts")?,
        receive_timestamp: field(4, "recv_ts")?,
    })
}

/// Parse a base-10 field, mapping empty or missing to `None`
fn parse_optional<T>(value: Option<&str>) -> Result<Option<T>, String>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match value {
        None | Some("") => Ok(None),
        Some(s) => s
            .parse::<T>()
            .map(Some)
            .map_err(|e| format!("'{}' ({})", s, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read(input: &str) -> Result<Trace, TraceError> {
        TraceReader::from_reader(input.as_bytes()).read_trace()
    }

    #[test]
    fn test_header_is_skipped_unconditionally() {
        let trace = read("anything at all\n1,100,110,120,130\n").unwrap();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].receive_index, Some(1));
    }

    #[test]
    fn test_empty_fields_are_absent() {
        let trace = read("h,h,h,h,h\n,100,,,\n").unwrap();
        assert_eq!(trace[0], PacketRecord::new(100));
    }

    #[test]
    fn test_header_only_yields_empty_trace() {
        assert!(read("recv_index,send_ts,pre_wg_ts,post_wg_ts,recv_ts\n")
            .unwrap()
            .is_empty());
        assert!(read("").unwrap().is_empty());
    }

    #[test]
    fn test_missing_send_ts_is_format_error() {
        let err = read("h\n1,,110,120,130\n").unwrap_err();
        match err {
            TraceError::Format { line, reason, .. } => {
                assert_eq!(line, 2);
                assert!(reason.contains("send_ts"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_wrong_field_count_is_format_error() {
        let err = read("h\n1,100,110,120,130\n2,200,210\n").unwrap_err();
        match err {
            TraceError::Format { line, raw, .. } => {
                assert_eq!(line, 3);
                assert_eq!(raw, "2,200,210");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_invalid_utf8_reports_row() {
        let result = TraceReader::from_reader(&b"h\n1,1\xff0,,,\n"[..]).read_trace();
        match result {
            Err(TraceError::Format { line, raw, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(raw, "1,1\u{FFFD}0,,,");
                assert!(reason.contains("UTF-8"));
            }
            other => panic!("unexpected result: {other:?}"),
        }

        let result =
            TraceReader::from_reader(&b"h\n1,100,,,\n2,200,,,\n3,3\xff0,,,\n"[..]).read_trace();
        match result {
            Err(TraceError::Format { line, raw, .. }) => {
                assert_eq!(line, 4);
                assert!(raw.starts_with("3,3"));
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn test_blank_lines_are_skipped() {
        let trace = read("h\n1,100,,,\n\n2,200,,,\n").unwrap();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[1].receive_index, Some(2));
    }

    #[test]
    fn test_negative_receive_index_is_format_error() {
        assert!(matches!(
            read("h\n-1,100,,,\n"),
            Err(TraceError::Format { .. })
        ));
    }

    #[test]
    fn test_non_numeric_timestamp_is_format_error() {
        assert!(matches!(
            read("h\n1,100,abc,,\n"),
            Err(TraceError::Format { .. })
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let result = load_trace("/definitely/not/a/trace.csv");
        assert!(matches!(result, Err(TraceError::Io(_))));
    }
}

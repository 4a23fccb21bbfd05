//! Configuration and constants for the CLI.

/// Current output schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

/// Header written by the capture tool. Informational only, never validated on load.
pub const TRACE_HEADER: &str = "recv_index,send_ts,pre_wg_ts,post_wg_ts,recv_ts";

/// Fields per data row: receive_index, send_ts, pre_tunnel_ts, post_tunnel_ts, recv_ts
pub const TRACE_FIELD_COUNT: usize = 5;

/// Bins used for every latency histogram
pub const LATENCY_HISTOGRAM_BINS: usize = 15;

// Drop histograms use 100 buckets from 100 packets up, 10 from 10 up,
// and one bucket per packet below that
pub const DROP_BUCKETS_LARGE: usize = 100;
pub const DROP_BUCKETS_SMALL: usize = 10;

/// Default directory benchmark results are written to
pub const DEFAULT_RESULTS_DIR: &str = "results";

//! Aggregation of trace records into benchmark metrics.
//!
//! This module transforms a loaded trace into:
//! - In-order / reordered / dropped classification
//! - Drop positions and survival funnel per stage
//! - Latency series, histograms and statistics

pub mod histogram;
pub mod metrics;
pub mod order;

// Re-export main types and functions
pub use histogram::{drop_bucket_count, shared_range, Histogram, LatencyStats};
pub use metrics::{FunnelCounts, LatencyBuckets, TraceMetrics};
pub use order::{classify, count_in_order, Classification, OrderCounter};

//! Output JSON schema for the metrics report.
//!
//! This is the bundle handed to the presentation layer. It carries numbers
//! only, rendering happens outside this crate.
//! Schema is versioned to allow future evolution.

use crate::aggregator::histogram::{drop_bucket_count, shared_range, Histogram, LatencyStats};
use crate::aggregator::metrics::{FunnelCounts, TraceMetrics};
use crate::aggregator::order::Classification;
use crate::parser::record::Stage;
use crate::utils::config::{LATENCY_HISTOGRAM_BINS, SCHEMA_VERSION};
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level report structure written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Trace file the report was computed from
    pub source: String,

    /// Packets the benchmark was configured to send
    pub expected_count: usize,

    pub classification: ClassificationSummary,

    /// Receive index of each row in send order, `null` when dropped
    pub receive_order: Vec<Option<u64>>,

    pub funnel: FunnelCounts,

    /// Drop positions, one entry per stage in path order
    pub drops: Vec<StageDrops>,

    pub latency: LatencyReport,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

/// Classification counts with their share of the expected packets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationSummary {
    pub in_order: u64,
    pub reordered: u64,
    pub dropped: u64,
    pub in_order_percentage: f64,
    pub reordered_percentage: f64,
    pub dropped_percentage: f64,
}

impl ClassificationSummary {
    pub fn new(counts: Classification, expected_count: usize) -> Self {
        Self {
            in_order: counts.in_order,
            reordered: counts.reordered,
            dropped: counts.dropped,
            in_order_percentage: percentage(counts.in_order, expected_count),
            reordered_percentage: percentage(counts.reordered, expected_count),
            dropped_percentage: percentage(counts.dropped, expected_count),
        }
    }

    pub fn counts(&self) -> Classification {
        Classification {
            in_order: self.in_order,
            reordered: self.reordered,
            dropped: self.dropped,
        }
    }
}

/// Where along the trace one stage lost packets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StageDrops {
    pub stage: Stage,
    pub indices: Vec<usize>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub histogram: Option<Histogram>,
}

/// One latency series with its summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencySeries {
    pub values: Vec<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub stats: Option<LatencyStats>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub histogram: Option<Histogram>,
}

/// Per-stage latencies. Histograms share their bin edges so they stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatencyReport {
    pub pre_tunnel: LatencySeries,
    pub in_tunnel: LatencySeries,
    pub post_tunnel: LatencySeries,
    /// Send to receive, summarised only
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub total: Option<LatencyStats>,
}

/// Build the report for a metrics bundle
///
/// **Public** - used by commands to create final output
pub fn to_report(metrics: &TraceMetrics, source: &str) -> MetricsReport {
    let expected_count = metrics.expected_count();

    MetricsReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.to_string(),
        expected_count,
        classification: ClassificationSummary::new(
            metrics.classification_counts(),
            expected_count,
        ),
        receive_order: metrics.receive_order(),
        funnel: metrics.funnel_counts(),
        drops: build_stage_drops(metrics),
        latency: build_latency_report(metrics),
        generated_at: Utc::now().to_rfc3339(),
    }
}

fn build_stage_drops(metrics: &TraceMetrics) -> Vec<StageDrops> {
    let rows = metrics.records().len();
    let bins = drop_bucket_count(metrics.expected_count());

    Stage::ALL
        .iter()
        .map(|&stage| {
            let indices = metrics.stage_drop_indices(stage);
            let histogram = (rows > 0 && bins > 0).then(|| {
                Histogram::with_range(indices.iter().map(|&i| i as i64), bins, 0.0, rows as f64)
            });
            StageDrops {
                stage,
                indices,
                histogram,
            }
        })
        .collect()
}

fn build_latency_report(metrics: &TraceMetrics) -> LatencyReport {
    let buckets = metrics.latency_buckets();
    let range = shared_range(&[
        buckets.pre_tunnel.as_slice(),
        buckets.in_tunnel.as_slice(),
        buckets.post_tunnel.as_slice(),
    ]);

    let series = |values: Vec<i64>| {
        let histogram = range.map(|(lower, upper)| {
            Histogram::with_range(values.iter().copied(), LATENCY_HISTOGRAM_BINS, lower, upper)
        });
        LatencySeries {
            stats: LatencyStats::from_values(&values),
            histogram,
            values,
        }
    };

    LatencyReport {
        pre_tunnel: series(buckets.pre_tunnel),
        in_tunnel: series(buckets.in_tunnel),
        post_tunnel: series(buckets.post_tunnel),
        total: LatencyStats::from_values(&metrics.total_latencies()),
    }
}

/// Share of `part` in `whole`, in percent rounded to two decimals
fn percentage(part: u64, whole: usize) -> f64 {
    if whole == 0 {
        return 0.0;
    }
    let pct = part as f64 / whole as f64 * 100.0;
    (pct * 100.0).round() / 100.0
}

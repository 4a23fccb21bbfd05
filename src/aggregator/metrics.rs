//! Metrics bundle computed from a loaded trace.
//!
//! [`TraceMetrics`] owns the trace for one analysis run and answers every
//! derived view from it without mutating it: ordering classification, where
//! drops happen per stage, the stage survival funnel and per-stage latencies.

use super::order::{check_expected_count, Classification};
use crate::parser::record::{Latencies, PacketRecord, Stage};
use crate::parser::trace_reader::{load_trace, Trace};
use crate::utils::error::{ConfigError, MetricsError};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Survival counts as packets pass successive stages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FunnelCounts {
    /// Rows in the trace
    pub total: usize,
    pub pre_tunnel: usize,
    pub post_tunnel: usize,
    pub received: usize,
}

impl FunnelCounts {
    /// True when no stage reports more packets than the stage before it
    pub fn is_monotonic(&self) -> bool {
        self.total >= self.pre_tunnel
            && self.pre_tunnel >= self.post_tunnel
            && self.post_tunnel >= self.received
    }
}

/// Per-stage latency series, each holding only records with both endpoints
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LatencyBuckets {
    pub pre_tunnel: Vec<i64>,
    pub in_tunnel: Vec<i64>,
    pub post_tunnel: Vec<i64>,
}

/// Read-only metrics over one trace
#[derive(Debug, Clone)]
pub struct TraceMetrics {
    trace: Trace,
    expected_count: usize,
}

impl TraceMetrics {
    /// Build a bundle over an already loaded trace
    ///
    /// # Errors
    /// * `ConfigError::ExpectedCountTooSmall` - `expected_count` below the row count
    pub fn new(trace: Trace, expected_count: usize) -> Result<Self, ConfigError> {
        check_expected_count(expected_count, trace.len())?;
        Ok(Self {
            trace,
            expected_count,
        })
    }

    /// Load a trace file and build a bundle over it
    ///
    /// **Public** - main entry point for the aggregator
    ///
    /// No bundle is returned unless the whole file loads.
    pub fn load(path: impl AsRef<Path>, expected_count: usize) -> Result<Self, MetricsError> {
        let path = path.as_ref();
        let trace = load_trace(path)?;
        info!("Loaded {} packet records from {}", trace.len(), path.display());
        Ok(Self::new(trace, expected_count)?)
    }

    pub fn records(&self) -> &[PacketRecord] {
        &self.trace
    }

    pub fn expected_count(&self) -> usize {
        self.expected_count
    }

    /// Receive index of every row, in row order
    pub fn receive_order(&self) -> Vec<Option<u64>> {
        self.trace.iter().map(|r| r.receive_index).collect()
    }

    /// In-order / reordered / dropped split of the expected packets
    pub fn classification_counts(&self) -> Classification {
        // expected_count was checked against the row count in `new`
        let counts = Classification::from_indices(&self.receive_order(), self.expected_count);
        debug!(
            "Classification: {} in order, {} reordered, {} dropped",
            counts.in_order, counts.reordered, counts.dropped
        );
        counts
    }

    /// Zero-based row positions whose `stage` timestamp is absent
    pub fn stage_drop_indices(&self, stage: Stage) -> Vec<usize> {
        self.trace
            .iter()
            .enumerate()
            .filter(|(_, r)| r.timestamp(stage).is_none())
            .map(|(i, _)| i)
            .collect()
    }

    pub fn funnel_counts(&self) -> FunnelCounts {
        let present = |stage: Stage| {
            self.trace
                .iter()
                .filter(|r| r.timestamp(stage).is_some())
                .count()
        };

        let funnel = FunnelCounts {
            total: self.trace.len(),
            pre_tunnel: present(Stage::PreTunnel),
            post_tunnel: present(Stage::PostTunnel),
            received: present(Stage::Receive),
        };

        if !funnel.is_monotonic() {
            warn!("Stage funnel is not monotonic: {:?}", funnel);
        }
        funnel
    }

    pub fn latency_buckets(&self) -> LatencyBuckets {
        let mut buckets = LatencyBuckets::default();
        for latencies in self.latencies() {
            buckets.pre_tunnel.extend(latencies.pre_tunnel);
            buckets.in_tunnel.extend(latencies.in_tunnel);
            buckets.post_tunnel.extend(latencies.post_tunnel);
        }
        buckets
    }

    /// Derived latencies of every record, in trace order
    pub fn latencies(&self) -> impl Iterator<Item = Latencies> + '_ {
        self.trace.iter().map(PacketRecord::latencies)
    }

    /// Total send-to-receive latency of every record that has one
    pub fn total_latencies(&self) -> Vec<i64> {
        self.latencies().filter_map(|l| l.total).collect()
    }
}

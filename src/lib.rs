//! XRay Metrics
//!
//! Reduces per-packet timing traces captured during tunnel benchmarks
//! into ordering, drop, funnel and latency metrics.
//!
//! This crate provides the core implementation for the
//! `xray-metrics` CLI tool.
//!
//! ## Getting Started
//!
//! ```ignore
//! use xray_metrics::aggregator::TraceMetrics;
//! use xray_metrics::parser::Stage;
//!
//! let metrics = TraceMetrics::load("results/xray_neptun_crypto_1000.csv", 1000)?;
//! let counts = metrics.classification_counts();
//! let lost_in_tunnel = metrics.stage_drop_indices(Stage::PostTunnel);
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;

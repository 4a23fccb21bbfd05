//! Trace parsing and the per-packet record model.
//!
//! This module handles:
//! - The packet record and its derived stage latencies
//! - Loading CSV traces written by the capture tool

pub mod record;
pub mod trace_reader;

// Re-export main types
pub use record::{Latencies, PacketRecord, Stage};
pub use trace_reader::{load_trace, parse_record, Trace, TraceReader};

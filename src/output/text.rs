//! Plain-text summary of a metrics report.
//!
//! Used for `--summary` on the terminal and for the `.txt` artifact next
//! to the trace.

use super::schema::{LatencySeries, MetricsReport};
use super::{ensure_parent_dir, validate_path};
use crate::utils::error::OutputError;
use log::info;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

const BAR_WIDTH: usize = 40;

/// Render a report as a human readable summary
pub fn generate_text_summary(report: &MetricsReport) -> String {
    let mut lines = Vec::new();
    let c = &report.classification;

    lines.push("  PACKET ORDERING".to_string());
    lines.push("  ┏━━━━━━━━━━━━━━┳━━━━━━━━━━━━┳━━━━━━━━━━┓".to_string());
    lines.push(format!("  ┃ {:<12} ┃ {:>10} ┃ {:>8} ┃", "Class", "Packets", "%"));
    lines.push("  ┣━━━━━━━━━━━━━━╋━━━━━━━━━━━━╋━━━━━━━━━━┫".to_string());
    for (label, count, pct) in [
        ("In order", c.in_order, c.in_order_percentage),
        ("Reordered", c.reordered, c.reordered_percentage),
        ("Dropped", c.dropped, c.dropped_percentage),
    ] {
        lines.push(format!("  ┃ {:<12} ┃ {:>10} ┃ {:>7.2}% ┃", label, count, pct));
    }
    lines.push("  ┗━━━━━━━━━━━━━━┻━━━━━━━━━━━━┻━━━━━━━━━━┛".to_string());

    lines.push(String::new());
    lines.push("  STAGE FUNNEL".to_string());
    let f = &report.funnel;
    let widest = report.expected_count.max(f.total).max(1);
    for (label, count) in [
        ("Expected", report.expected_count),
        ("Rows", f.total),
        ("Pre tunnel", f.pre_tunnel),
        ("Post tunnel", f.post_tunnel),
        ("Received", f.received),
    ] {
        let bar = "█".repeat(count * BAR_WIDTH / widest);
        lines.push(format!("  {:<12} {:<width$} {:>8}", label, bar, count, width = BAR_WIDTH));
    }

    lines.push(String::new());
    lines.push("  LATENCY".to_string());
    for (label, series) in [
        ("Pre tunnel", &report.latency.pre_tunnel),
        ("In tunnel", &report.latency.in_tunnel),
        ("Post tunnel", &report.latency.post_tunnel),
    ] {
        lines.push(format!("  {:<12} {}", label, series_summary(series)));
    }
    match &report.latency.total {
        Some(stats) => lines.push(format!("  {:<12} {}", "Total", stats.summary())),
        None => lines.push(format!("  {:<12} no samples", "Total")),
    }

    lines.join("\n")
}

fn series_summary(series: &LatencySeries) -> String {
    series
        .stats
        .as_ref()
        .map(|s| s.summary())
        .unwrap_or_else(|| "no samples".to_string())
}

/// Write a text summary to a file
pub fn write_summary(summary: &str, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing summary to: {}", output_path.display());

    validate_path(output_path)?;
    ensure_parent_dir(output_path)?;

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(summary.as_bytes())
        .map_err(OutputError::WriteFailed)?;
    writer.write_all(b"\n").map_err(OutputError::WriteFailed)?;
    writer.flush().map_err(OutputError::WriteFailed)?;

    Ok(())
}

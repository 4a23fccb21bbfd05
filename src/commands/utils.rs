use crate::output::read_report;
use crate::utils::config::{SCHEMA_VERSION, TRACE_HEADER};
use anyhow::{Context, Result};
use std::path::Path;

/// Validate a report JSON file
pub fn validate_report_file(file_path: &Path) -> Result<()> {
    println!("Validating report: {}", file_path.display());

    let report = read_report(file_path)
        .with_context(|| format!("Failed to read report {}", file_path.display()))?;

    let total = report.classification.counts().total();
    if total != report.expected_count as u64 {
        anyhow::bail!(
            "Classification covers {} packets but {} were expected",
            total,
            report.expected_count
        );
    }

    println!("✓ Valid report JSON");
    println!("  Version: {}", report.version);
    println!("  Source: {}", report.source);
    println!("  Expected packets: {}", report.expected_count);
    println!("  Trace rows: {}", report.funnel.total);
    println!(
        "  In order / reordered / dropped: {} / {} / {}",
        report.classification.in_order,
        report.classification.reordered,
        report.classification.dropped
    );

    Ok(())
}

/// Display schema information
pub fn display_schema(show_details: bool) {
    println!("XRay Metrics Report Schema");
    println!("Current Version: {}", SCHEMA_VERSION);
    println!("Trace header:    {}", TRACE_HEADER);
    println!();

    if show_details {
        println!("Schema Structure:");
        println!("  version: string             - Schema version (e.g., '1.0.0')");
        println!("  source: string              - Trace file the report was built from");
        println!("  expected_count: number      - Packets the benchmark sent");
        println!("  classification: object      - In order / reordered / dropped");
        println!("    in_order, reordered, dropped: number");
        println!("    *_percentage: number      - Share of expected_count");
        println!("  receive_order: array        - Receive index per row, null if dropped");
        println!("  funnel: object              - total, pre_tunnel, post_tunnel, received");
        println!("  drops: array                - Per stage drop positions");
        println!("    stage: string             - pre_tunnel | post_tunnel | receive");
        println!("    indices: array            - Zero-based rows missing this stage");
        println!("    histogram: object?        - lower, upper, counts");
        println!("  latency: object             - pre_tunnel, in_tunnel, post_tunnel series");
        println!("    values: array             - Latencies with both endpoints present");
        println!("    stats: object?            - count, min, max, mean, median");
        println!("    histogram: object?        - Shared-range bins");
        println!("    total: object?            - Send to receive stats");
        println!("  generated_at: string        - ISO 8601 timestamp");
    } else {
        println!("Use --show for detailed schema information");
    }
}

/// Display version information
pub fn display_version() {
    println!("XRay Metrics v{}", env!("CARGO_PKG_VERSION"));
    println!("Report Schema: v{}", SCHEMA_VERSION);
    println!();
    println!("Metrics reduction for tunnel benchmark packet traces.");
}

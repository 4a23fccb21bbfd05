//! Analyze command implementation.
//!
//! The analyze command:
//! 1. Loads the trace
//! 2. Classifies packet ordering
//! 3. Computes drops, funnel and latencies
//! 4. Writes output files

use crate::aggregator::TraceMetrics;
use crate::commands::models::AnalyzeArgs;
use crate::output::{generate_text_summary, to_report, write_report, write_summary, MetricsReport};
use anyhow::{Context, Result};
use log::{debug, info};
use std::time::Instant;

/// Execute the analyze command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The report that was written
///
/// # Errors
/// * Trace read or format errors
/// * Expected count below the trace row count
/// * File write errors
///
/// Nothing is written unless the whole trace loads.
pub fn execute_analyze(args: &AnalyzeArgs) -> Result<MetricsReport> {
    let start_time = Instant::now();
    let trace_path = args.trace_path();

    info!("Analyzing trace: {}", trace_path.display());
    info!("Expected packet count: {}", args.expected_count);

    // Step 1: Load trace
    info!("Step 1/3: Loading trace...");
    let metrics = TraceMetrics::load(&trace_path, args.expected_count)
        .with_context(|| format!("Failed to load trace {}", trace_path.display()))?;

    // Step 2: Compute metrics
    info!("Step 2/3: Computing metrics...");
    let report = to_report(&metrics, &trace_path.display().to_string());

    let c = &report.classification;
    info!(
        "Ordering: {} in order ({:.2}%), {} reordered ({:.2}%), {} dropped ({:.2}%)",
        c.in_order,
        c.in_order_percentage,
        c.reordered,
        c.reordered_percentage,
        c.dropped,
        c.dropped_percentage
    );
    debug!("Funnel: {:?}", report.funnel);

    // Step 3: Write outputs
    info!("Step 3/3: Writing output files...");
    let report_path = args.report_path();
    write_report(&report, &report_path).context("Failed to write metrics report")?;
    info!("✓ Report written to: {}", report_path.display());

    if args.print_summary || args.output_txt.is_some() {
        let summary = generate_text_summary(&report);

        if let Some(txt_path) = &args.output_txt {
            write_summary(&summary, txt_path).context("Failed to write text summary")?;
            info!("✓ Summary written to: {}", txt_path.display());
        }

        if args.print_summary {
            println!("\n{}", "=".repeat(60));
            println!("TRACE SUMMARY");
            println!("{}", "=".repeat(60));
            println!("Trace:    {}", report.source);
            println!("Expected: {}", report.expected_count);
            println!("\n{}", summary);
            println!("{}", "=".repeat(60));
        }
    }

    let elapsed = start_time.elapsed();
    info!("Analysis completed in {:.2}s", elapsed.as_secs_f64());

    Ok(report)
}

/// Validate analyze arguments
///
/// **Public** - can be called before execute_analyze for early validation
pub fn validate_args(args: &AnalyzeArgs) -> Result<()> {
    let trace_path = args.trace_path();

    if trace_path.as_os_str().is_empty() {
        anyhow::bail!("Trace path cannot be empty");
    }

    if trace_path.is_dir() {
        anyhow::bail!("Trace path is a directory: {}", trace_path.display());
    }

    if args.report_path() == trace_path {
        anyhow::bail!("Report path would overwrite the trace");
    }

    if let Some(txt) = &args.output_txt {
        if *txt == trace_path {
            anyhow::bail!("Summary path would overwrite the trace");
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::models::TraceSource;
    use std::path::PathBuf;

    #[test]
    fn test_validate_args_default() {
        assert!(validate_args(&AnalyzeArgs::default()).is_ok());
    }

    #[test]
    fn test_validate_args_empty_trace_path() {
        let args = AnalyzeArgs {
            source: TraceSource::File(PathBuf::new()),
            output_json: Some(PathBuf::from("out.json")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_report_overwrites_trace() {
        let args = AnalyzeArgs {
            source: TraceSource::File(PathBuf::from("trace.csv")),
            output_json: Some(PathBuf::from("trace.csv")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_validate_args_directory_trace() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            source: TraceSource::File(dir.path().to_path_buf()),
            output_json: Some(dir.path().join("report.json")),
            ..Default::default()
        };
        assert!(validate_args(&args).is_err());
    }

    #[test]
    fn test_execute_analyze_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("trace.csv");
        std::fs::write(
            &trace,
            "recv_index,send_ts,pre_wg_ts,post_wg_ts,recv_ts\n\
             1,100,110,120,130\n\
             ,200,210,,\n\
             2,300,310,320,330\n",
        )
        .unwrap();

        let args = AnalyzeArgs {
            source: TraceSource::File(trace.clone()),
            expected_count: 3,
            ..Default::default()
        };
        let report = execute_analyze(&args).unwrap();

        assert_eq!(report.classification.in_order, 2);
        assert_eq!(report.classification.dropped, 1);
        assert!(dir.path().join("trace.json").exists());
    }

    #[test]
    fn test_execute_analyze_malformed_trace_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let trace = dir.path().join("trace.csv");
        std::fs::write(&trace, "header\n1,abc,,,\n").unwrap();

        let args = AnalyzeArgs {
            source: TraceSource::File(trace),
            expected_count: 1,
            ..Default::default()
        };

        assert!(execute_analyze(&args).is_err());
        assert!(!dir.path().join("trace.json").exists());
    }
}

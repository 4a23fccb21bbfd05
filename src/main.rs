//! XRay Metrics CLI
//!
//! Reduces a packet timing trace from a tunnel benchmark into ordering,
//! drop, funnel and latency metrics.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use xray_metrics::commands::{
    display_schema, display_version, execute_analyze, validate_args, validate_report_file,
    AnalyzeArgs, TraceSource,
};
use xray_metrics::utils::config::DEFAULT_RESULTS_DIR;
use xray_metrics::utils::paths::{TestType, Tunnel};

/// XRay Metrics - packet trace analysis for tunnel benchmarks
#[derive(Parser, Debug)]
#[command(name = "xray-metrics")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze a packet trace
    Analyze {
        /// Number of packets the benchmark sent
        #[arg(short, long, env = "XRAY_PACKET_COUNT")]
        count: usize,

        /// Trace CSV file (overrides the run-derived path)
        #[arg(short, long)]
        trace: Option<PathBuf>,

        /// Tunnel implementation the run used
        #[arg(long, default_value = "neptun")]
        tunnel: Tunnel,

        /// Test type the run used
        #[arg(long, default_value = "crypto")]
        test_type: TestType,

        /// Directory holding benchmark results
        #[arg(long, default_value = DEFAULT_RESULTS_DIR, env = "XRAY_RESULTS_DIR")]
        results_dir: PathBuf,

        /// Output path for the JSON report
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output path for a text summary
        #[arg(long)]
        txt: Option<PathBuf>,

        /// Print text summary to stdout
        #[arg(long)]
        summary: bool,
    },

    /// Validate a report JSON file
    Validate {
        /// Path to report JSON file
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Display schema information
    Schema {
        /// Show full schema details
        #[arg(long)]
        show: bool,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    // Execute command
    match cli.command {
        Commands::Analyze {
            count,
            trace,
            tunnel,
            test_type,
            results_dir,
            output,
            txt,
            summary,
        } => {
            let source = match trace {
                Some(path) => TraceSource::File(path),
                None => TraceSource::Run {
                    results_dir,
                    tunnel,
                    test_type,
                },
            };

            let args = AnalyzeArgs {
                source,
                expected_count: count,
                output_json: output,
                output_txt: txt,
                print_summary: summary,
            };

            // Validate args first
            validate_args(&args)?;

            execute_analyze(&args)?;
        }

        Commands::Validate { file } => {
            validate_report_file(&file)?;
        }

        Commands::Schema { show } => {
            display_schema(show);
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}

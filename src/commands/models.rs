use crate::utils::config::DEFAULT_RESULTS_DIR;
use crate::utils::paths::{ResultPaths, TestType, Tunnel};
use std::path::PathBuf;

/// Where the trace to analyze comes from
#[derive(Debug, Clone)]
pub enum TraceSource {
    /// Explicit trace file
    File(PathBuf),
    /// Trace named after the benchmark run that produced it
    Run {
        results_dir: PathBuf,
        tunnel: Tunnel,
        test_type: TestType,
    },
}

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    pub source: TraceSource,

    /// Packets the benchmark was configured to send
    pub expected_count: usize,

    /// Output path for the JSON report (defaults next to the trace)
    pub output_json: Option<PathBuf>,

    /// Output path for a text summary file (optional)
    pub output_txt: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            source: TraceSource::Run {
                results_dir: PathBuf::from(DEFAULT_RESULTS_DIR),
                tunnel: Tunnel::NepTun,
                test_type: TestType::Crypto,
            },
            expected_count: 10,
            output_json: None,
            output_txt: None,
            print_summary: false,
        }
    }
}

impl AnalyzeArgs {
    /// Result paths of the benchmark run, when the trace is named after one
    pub fn result_paths(&self) -> Option<ResultPaths> {
        match &self.source {
            TraceSource::File(_) => None,
            TraceSource::Run {
                results_dir,
                tunnel,
                test_type,
            } => Some(ResultPaths::new(
                results_dir,
                *tunnel,
                *test_type,
                self.expected_count,
            )),
        }
    }

    pub fn trace_path(&self) -> PathBuf {
        match &self.source {
            TraceSource::File(path) => path.clone(),
            TraceSource::Run {
                results_dir,
                tunnel,
                test_type,
            } => ResultPaths::new(results_dir, *tunnel, *test_type, self.expected_count).csv(),
        }
    }

    /// JSON report path: explicit, else next to the trace
    pub fn report_path(&self) -> PathBuf {
        if let Some(path) = &self.output_json {
            return path.clone();
        }
        match self.result_paths() {
            Some(paths) => paths.json(),
            None => self.trace_path().with_extension("json"),
        }
    }
}

use std::path::PathBuf;
use tempfile::tempdir;
use xray_metrics::commands::{
    execute_analyze, validate_args, validate_report_file, AnalyzeArgs, TraceSource,
};
use xray_metrics::utils::paths::{TestType, Tunnel};

const TRACE: &str = "recv_index,send_ts,pre_wg_ts,post_wg_ts,recv_ts
1,100,110,130,135
3,200,210,230,236
2,300,310,330,334
,400,410,,
5,500,510,530,534
";

#[test]
fn test_validate_args_valid() {
    let args = AnalyzeArgs {
        source: TraceSource::File(PathBuf::from("results/trace.csv")),
        expected_count: 100,
        ..Default::default()
    };

    assert!(validate_args(&args).is_ok());
}

#[test]
fn test_validate_args_empty_trace() {
    let args = AnalyzeArgs {
        source: TraceSource::File(PathBuf::new()),
        output_json: Some(PathBuf::from("report.json")),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_validate_args_summary_overwrites_trace() {
    let args = AnalyzeArgs {
        source: TraceSource::File(PathBuf::from("trace.csv")),
        output_txt: Some(PathBuf::from("trace.csv")),
        ..Default::default()
    };

    assert!(validate_args(&args).is_err());
}

#[test]
fn test_run_source_resolves_result_paths() {
    let args = AnalyzeArgs {
        source: TraceSource::Run {
            results_dir: PathBuf::from("results"),
            tunnel: Tunnel::BoringTun,
            test_type: TestType::Plaintext,
        },
        expected_count: 500,
        ..Default::default()
    };

    assert_eq!(
        args.trace_path(),
        PathBuf::from("results/xray_boringtun_plaintext_500.csv")
    );
    assert_eq!(
        args.report_path(),
        PathBuf::from("results/xray_boringtun_plaintext_500.json")
    );
}

#[test]
fn test_analyze_run_and_validate_report() {
    let dir = tempdir().unwrap();
    let results_dir = dir.path().to_path_buf();
    std::fs::write(results_dir.join("xray_neptun_crypto_5.csv"), TRACE).unwrap();

    let args = AnalyzeArgs {
        source: TraceSource::Run {
            results_dir: results_dir.clone(),
            tunnel: Tunnel::NepTun,
            test_type: TestType::Crypto,
        },
        expected_count: 5,
        output_txt: Some(results_dir.join("xray_neptun_crypto_5.txt")),
        ..Default::default()
    };

    validate_args(&args).unwrap();
    let report = execute_analyze(&args).unwrap();

    // Runs: [1] well started, [3] misplaced, [2] at row 2, [5] at row 4 misplaced
    assert_eq!(report.classification.in_order, 2);
    assert_eq!(report.classification.dropped, 1);
    assert_eq!(report.classification.reordered, 2);
    assert_eq!(report.funnel.total, 5);
    assert_eq!(report.funnel.post_tunnel, 4);

    let report_path = results_dir.join("xray_neptun_crypto_5.json");
    assert!(report_path.exists());
    assert!(results_dir.join("xray_neptun_crypto_5.txt").exists());
    assert!(validate_report_file(&report_path).is_ok());
}

#[test]
fn test_analyze_rejects_small_expected_count() {
    let dir = tempdir().unwrap();
    let trace = dir.path().join("trace.csv");
    std::fs::write(&trace, TRACE).unwrap();

    let args = AnalyzeArgs {
        source: TraceSource::File(trace),
        expected_count: 3,
        ..Default::default()
    };

    assert!(execute_analyze(&args).is_err());
    assert!(!dir.path().join("trace.json").exists());
}

#[test]
fn test_validate_report_file_missing() {
    assert!(validate_report_file(&PathBuf::from("/no/such/report.json")).is_err());
}

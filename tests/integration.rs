//! Integration tests exercising the full load → aggregate → render flow
//! and the `benchplot` binary surface.

use std::path::PathBuf;
use std::process::Command;

use benchplot::error::ReportError;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn benchplot() -> Command {
    Command::new(env!("CARGO_BIN_EXE_benchplot"))
}

// ---------------------------------------------------------------------------
// Library pipeline
// ---------------------------------------------------------------------------

#[test]
fn flattened_count_matches_all_configurations() {
    let dashboard = benchplot::compute(&fixture("results.json")).unwrap();
    assert_eq!(dashboard.records.len(), 12);

    let repos: Vec<&str> = dashboard
        .records
        .iter()
        .map(|r| r.repository.as_str())
        .collect();
    assert_eq!(&repos[..4], ["schedule"; 4]);
    assert_eq!(&repos[4..8], ["mistune"; 4]);
    assert_eq!(&repos[8..], ["click"; 4]);
    assert!(dashboard.destination.is_none());
}

#[test]
fn two_configuration_summary() {
    let dashboard = benchplot::compute(&fixture("pair.json")).unwrap();
    let s = &dashboard.data.summary;
    assert_eq!(s.total_tokens_millions, 3.0);
    assert_eq!(s.total_tests, 60);
    assert_eq!(s.avg_coverage, 80.0);
    assert_eq!(s.avg_pass_rate, 87.5);
    assert_eq!(s.highest_coverage.repository, "schedule");
    assert_eq!(s.highest_coverage.value, 90.0);
    assert_eq!(s.coverage_delta, 20.0);
}

#[test]
fn grouped_panels_read_single_records() {
    let data = benchplot::compute(&fixture("results.json")).unwrap().data;
    // schedule row, series order: sonnet refine, sonnet base, opus refine, opus base
    assert_eq!(data.coverage[0], [94.2, 88.1, 92.7, 85.3]);
    assert_eq!(data.pass_rate[2], [96.8, 89.2, 95.1, 88.4]);
    assert_eq!(data.tests_added[1], [96.0, 58.0, 88.0, 51.0]);
    assert_eq!(data.efficiency.len(), 12);
    assert_eq!(data.scatter.len(), 12);
    assert_eq!(data.profiles.len(), 2);
    assert_eq!(data.models.len(), 2);
}

#[test]
fn full_fixture_summary_standouts() {
    let s = benchplot::compute(&fixture("results.json")).unwrap().data.summary;
    assert_eq!(s.total_tests, 871);
    assert!((s.total_tokens_millions - 44.42).abs() < 1e-9);
    assert_eq!(s.highest_coverage.repository, "schedule");
    assert_eq!(s.highest_coverage.series, "sonnet-4-5-refine");
    assert_eq!(s.most_efficient.series, "sonnet-4-5-base");
    assert!(s.coverage_delta > 0.0);
}

#[test]
fn same_input_same_numbers() {
    let a = benchplot::compute(&fixture("results.json")).unwrap().data;
    let b = benchplot::compute(&fixture("results.json")).unwrap().data;
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_vec(&a).unwrap(),
        serde_json::to_vec(&b).unwrap()
    );
}

#[test]
fn missing_tokens_aborts_generation() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.png");
    let err = benchplot::generate(&fixture("missing_tokens.json"), Some(&out)).unwrap_err();
    assert!(matches!(err, ReportError::Schema { .. }), "{err}");
    assert!(!out.exists(), "no image should be written on failure");
}

#[test]
fn zero_tests_added_is_rejected() {
    let err = benchplot::compute(&fixture("zero_tests.json")).unwrap_err();
    assert!(matches!(err, ReportError::ZeroTestsAdded { .. }), "{err}");
    assert_eq!(err.exit_code(), 4);
}

#[test]
fn zero_tokens_is_rejected_before_drawing() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("never.svg");
    let err = benchplot::generate(&fixture("zero_tokens.json"), Some(&out)).unwrap_err();
    assert!(matches!(err, ReportError::ZeroTokens { .. }), "{err}");
    assert_eq!(err.exit_code(), 4);
    assert!(!out.exists());
}

#[test]
fn missing_input_file_is_io_error() {
    let err = benchplot::compute(&fixture("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, ReportError::Io { .. }), "{err}");
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn renders_svg_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("nested/dashboard.svg");
    let dashboard = benchplot::generate(&fixture("results.json"), Some(&out)).unwrap();

    assert_eq!(
        dashboard.destination,
        Some(benchplot::Destination::Saved(out.clone()))
    );
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Test Suite Refinement Benchmark Results"));
    assert!(svg.contains("Token Efficiency"));
    assert!(svg.contains("SUMMARY STATISTICS"));
}

#[test]
fn renders_png_dashboard() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("dashboard.png");
    benchplot::generate(&fixture("results.json"), Some(&out)).unwrap();
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

#[test]
fn renders_when_most_repositories_are_empty() {
    // Only schedule has records; mistune and click rows are all zero.
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("pair.svg");
    benchplot::generate(&fixture("pair.json"), Some(&out)).unwrap();
    let svg = std::fs::read_to_string(&out).unwrap();
    assert!(svg.contains("Model Performance Comparison"));
    assert!(svg.contains("Strategy Performance Profile"));
}

#[cfg(unix)]
#[test]
fn no_output_path_keeps_image_for_viewer() {
    let tmp = tempfile::tempdir().unwrap();
    let out = benchplot()
        .arg(fixture("pair.json"))
        .env("TMPDIR", tmp.path())
        .env("BENCHPLOT_VIEWER", "true")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let images: Vec<_> = std::fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with("benchplot-") && name.ends_with(".png"))
        .collect();
    assert_eq!(images.len(), 1, "{images:?}");
    let bytes = std::fs::read(tmp.path().join(&images[0])).unwrap();
    assert_eq!(&bytes[1..4], b"PNG");
}

// ---------------------------------------------------------------------------
// Binary surface
// ---------------------------------------------------------------------------

#[test]
fn no_arguments_prints_usage_and_exits_1() {
    let out = benchplot().output().unwrap();
    assert_eq!(out.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("usage: benchplot <json_path>"), "{stdout}");
}

#[test]
fn json_flag_prints_panel_data() {
    let out = benchplot()
        .arg(fixture("pair.json"))
        .arg("--json")
        .output()
        .unwrap();
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));

    let data: serde_json::Value = serde_json::from_slice(&out.stdout).unwrap();
    assert_eq!(data["summary"]["total_tests"], 60);
    assert_eq!(data["summary"]["avg_pass_rate"], 87.5);
    assert_eq!(data["coverage"][0][0], 90.0);
    assert_eq!(data["scatter"][1]["marker"], "square");
}

#[test]
fn schema_error_exits_with_code_3() {
    let out = benchplot()
        .arg(fixture("missing_tokens.json"))
        .arg("--json")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(3));
    let stderr = String::from_utf8_lossy(&out.stderr);
    assert!(stderr.contains("benchmarks[0].configurations[1]"), "{stderr}");
}

#[test]
fn zero_tokens_exits_with_code_4() {
    let out = benchplot()
        .arg(fixture("zero_tokens.json"))
        .arg("--json")
        .output()
        .unwrap();
    assert_eq!(out.status.code(), Some(4));
    assert!(out.stdout.is_empty(), "no panel data on failure");
}

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::Value;

use crate::error::ReportError;
use crate::types::ConfigRecord;

/// Read a results file and flatten every benchmark's configurations into
/// one list, outer benchmark order first.
pub fn load(path: &Path) -> Result<Vec<ConfigRecord>, ReportError> {
    let content = fs::read_to_string(path).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let records = parse(&content, path)?;
    tracing::debug!(path = %path.display(), records = records.len(), "loaded results");
    Ok(records)
}

/// Same as [`load`] for an in-memory document.
pub fn load_str(content: &str) -> Result<Vec<ConfigRecord>, ReportError> {
    parse(content, Path::new("<memory>"))
}

fn parse(content: &str, path: &Path) -> Result<Vec<ConfigRecord>, ReportError> {
    let doc: Value = serde_json::from_str(content).map_err(|e| ReportError::Parse {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    let shape = |reason: String| ReportError::Shape {
        path: path.to_path_buf(),
        reason,
    };

    let benchmarks = doc
        .get("benchmarks")
        .and_then(Value::as_array)
        .ok_or_else(|| shape("missing \"benchmarks\" array".into()))?;

    let mut records = Vec::new();
    for (i, bench) in benchmarks.iter().enumerate() {
        let configs = bench
            .get("configurations")
            .and_then(Value::as_array)
            .ok_or_else(|| shape(format!("benchmarks[{i}] has no \"configurations\" array")))?;

        for (j, config) in configs.iter().enumerate() {
            let record = ConfigRecord::deserialize(config).map_err(|e| ReportError::Schema {
                path: path.to_path_buf(),
                location: format!("benchmarks[{i}].configurations[{j}]"),
                reason: e.to_string(),
            })?;
            records.push(record);
        }
    }

    tracing::debug!(benchmarks = benchmarks.len(), "flattened configurations");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TWO_BENCHES: &str = r#"{
        "benchmarks": [
            {"repository": "schedule", "configurations": [
                {"repository":"schedule","model":"sonnet-4-5","strategy":"refine",
                 "coverage":90,"pass_rate":95,"tests_added":40,"tokens":1000000},
                {"repository":"schedule","model":"opus-4-1","strategy":"base",
                 "coverage":70,"pass_rate":80,"tests_added":20,"tokens":2000000}
            ]},
            {"repository": "click", "configurations": [
                {"repository":"click","model":"opus-4-1","strategy":"refine",
                 "coverage":82.5,"pass_rate":97.1,"tests_added":120,"tokens":4200000}
            ]}
        ]
    }"#;

    #[test]
    fn flattens_in_outer_then_inner_order() {
        let records = load_str(TWO_BENCHES).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].model, "sonnet-4-5");
        assert_eq!(records[1].model, "opus-4-1");
        assert_eq!(records[2].repository, "click");
        assert_eq!(records[2].coverage, 82.5);
    }

    #[test]
    fn empty_benchmarks_yields_no_records() {
        let records = load_str(r#"{"benchmarks": []}"#).unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn invalid_json_is_a_parse_error() {
        let err = load_str("{ not json").unwrap_err();
        assert!(matches!(err, ReportError::Parse { .. }), "{err}");
    }

    #[test]
    fn missing_benchmarks_is_a_shape_error() {
        let err = load_str(r#"{"results": []}"#).unwrap_err();
        assert!(matches!(err, ReportError::Shape { .. }), "{err}");
    }

    #[test]
    fn missing_configurations_is_a_shape_error() {
        let err = load_str(r#"{"benchmarks": [{"repository": "click"}]}"#).unwrap_err();
        match err {
            ReportError::Shape { reason, .. } => assert!(reason.contains("benchmarks[0]")),
            other => panic!("expected shape error, got {other}"),
        }
    }

    #[test]
    fn record_without_tokens_aborts_with_location() {
        let doc = r#"{"benchmarks": [{"configurations": [
            {"repository":"click","model":"opus-4-1","strategy":"base",
             "coverage":70,"pass_rate":80,"tests_added":20}
        ]}]}"#;
        match load_str(doc).unwrap_err() {
            ReportError::Schema {
                location, reason, ..
            } => {
                assert_eq!(location, "benchmarks[0].configurations[0]");
                assert!(reason.contains("tokens"), "{reason}");
            }
            other => panic!("expected schema error, got {other}"),
        }
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(matches!(err, ReportError::Io { .. }));
        assert_eq!(err.exit_code(), 2);
    }
}

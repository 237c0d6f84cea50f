use std::path::PathBuf;

use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Every error benchplot can produce. Any of them aborts the whole report;
/// there is no partial dashboard.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("parse error in {}: {reason}", path.display())]
    Parse { path: PathBuf, reason: String },

    /// Top-level document is not `{ "benchmarks": [ { "configurations": [..] } ] }`.
    #[error("unexpected layout in {}: {reason}", path.display())]
    Shape { path: PathBuf, reason: String },

    /// A single configuration record is missing a key or has a mistyped field.
    #[error("bad record at {location} in {}: {reason}", path.display())]
    Schema {
        path: PathBuf,
        location: String,
        reason: String,
    },

    #[error("no records with {key} = \"{value}\"")]
    EmptyPartition { key: &'static str, value: String },

    #[error("tests_added is 0 for {repository} {model}-{strategy}; tokens per test is undefined")]
    ZeroTestsAdded {
        repository: String,
        model: String,
        strategy: String,
    },

    #[error("tokens is 0 for {repository} {model}-{strategy}; tests per token is undefined")]
    ZeroTokens {
        repository: String,
        model: String,
        strategy: String,
    },

    #[error("render failed: {reason}")]
    Render { reason: String },

    #[error("could not launch viewer \"{viewer}\": {source}")]
    Viewer {
        viewer: String,
        source: std::io::Error,
    },
}

impl ReportError {
    /// Process exit code for the CLI.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io { .. } => 2,
            Self::Parse { .. } | Self::Shape { .. } | Self::Schema { .. } => 3,
            Self::EmptyPartition { .. }
            | Self::ZeroTestsAdded { .. }
            | Self::ZeroTokens { .. } => 4,
            Self::Render { .. } | Self::Viewer { .. } => 5,
        }
    }
}

impl<E> From<DrawingAreaErrorKind<E>> for ReportError
where
    E: std::error::Error + Send + Sync,
{
    fn from(e: DrawingAreaErrorKind<E>) -> Self {
        Self::Render {
            reason: e.to_string(),
        }
    }
}

//! Per-panel aggregates. Each panel derives its numbers straight from the
//! flat record list; nothing is cached between panels.

use serde::Serialize;

use crate::error::ReportError;
use crate::palette::{self, MODELS, REPOS, STRATEGIES};
use crate::summary::{self, Summary};
use crate::types::{ConfigRecord, Metric};

const RADAR_MAX: f64 = 100.0;

/// Categorical field records are partitioned on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Partition {
    Strategy,
    Model,
}

impl Partition {
    fn name(self) -> &'static str {
        match self {
            Self::Strategy => "strategy",
            Self::Model => "model",
        }
    }

    fn of(self, record: &ConfigRecord) -> &str {
        match self {
            Self::Strategy => &record.strategy,
            Self::Model => &record.model,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Marker {
    Circle,
    Square,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyBar {
    pub label: String,
    pub series: &'static str,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScatterPoint {
    pub repository: String,
    pub series: &'static str,
    /// Tokens, in millions.
    pub x: f64,
    /// Coverage percent.
    pub y: f64,
    pub marker_area: f64,
    pub marker: Marker,
}

/// Radar axes, in display order.
pub const PROFILE_AXES: [&str; 4] = ["Coverage", "Pass Rate", "Tests/Token", "Total Tests"];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrategyProfile {
    pub strategy: &'static str,
    /// Each axis already scaled and clamped to 0..=100.
    pub axes: [f64; 4],
}

pub const MODEL_METRICS: [&str; 4] = [
    "Avg Coverage",
    "Avg Pass Rate",
    "Avg Tests Added",
    "Avg Tokens (M)",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelBars {
    pub model: &'static str,
    pub values: [f64; 4],
}

/// Everything the eight panels plot, in panel order. Two runs over the
/// same input compare equal.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardData {
    pub coverage: Vec<[f64; 4]>,
    pub pass_rate: Vec<[f64; 4]>,
    pub tests_added: Vec<[f64; 4]>,
    pub efficiency: Vec<EfficiencyBar>,
    pub scatter: Vec<ScatterPoint>,
    pub profiles: Vec<StrategyProfile>,
    pub models: Vec<ModelBars>,
    pub summary: Summary,
}

impl DashboardData {
    pub fn compute(records: &[ConfigRecord]) -> Result<Self, ReportError> {
        for r in records {
            if palette::repo_index(&r.repository).is_none() || palette::series(&r.series_key()).is_none()
            {
                tracing::warn!(
                    repository = %r.repository,
                    series = %r.series_key(),
                    "record outside the chart table; skipped in per-repository panels"
                );
            }
        }

        Ok(Self {
            coverage: grouped_values(records, Metric::Coverage),
            pass_rate: grouped_values(records, Metric::PassRate),
            tests_added: grouped_values(records, Metric::TestsAdded),
            efficiency: efficiency_bars(records)?,
            scatter: scatter_points(records),
            profiles: strategy_profiles(records)?,
            models: model_comparison(records)?,
            summary: summary::summarize(records)?,
        })
    }
}

/// `rows[repo][series]` for the fixed repository and series order. Cells
/// without a record are 0; when a triple repeats, the last record wins.
#[must_use]
pub fn grouped_values(records: &[ConfigRecord], metric: Metric) -> Vec<[f64; 4]> {
    let mut rows = vec![[0.0; 4]; REPOS.len()];
    for r in records {
        let (Some(repo), Some(series)) = (
            palette::repo_index(&r.repository),
            palette::series_index(&r.series_key()),
        ) else {
            continue;
        };
        rows[repo][series] = metric.of(r);
    }
    rows
}

/// Last record matching the triple.
#[must_use]
pub fn lookup<'a>(
    records: &'a [ConfigRecord],
    repository: &str,
    model: &str,
    strategy: &str,
) -> Option<&'a ConfigRecord> {
    records
        .iter()
        .rev()
        .find(|r| r.repository == repository && r.model == model && r.strategy == strategy)
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

fn partition<'a>(
    records: &'a [ConfigRecord],
    key: Partition,
    value: &str,
) -> Result<Vec<&'a ConfigRecord>, ReportError> {
    let group: Vec<&ConfigRecord> = records.iter().filter(|r| key.of(r) == value).collect();
    if group.is_empty() {
        return Err(ReportError::EmptyPartition {
            key: key.name(),
            value: value.to_string(),
        });
    }
    Ok(group)
}

/// Arithmetic mean of `metric` over records whose `key` equals `value`.
pub fn mean_by(
    records: &[ConfigRecord],
    key: Partition,
    value: &str,
    metric: Metric,
) -> Result<f64, ReportError> {
    let group = partition(records, key, value)?;
    Ok(mean(group.iter().map(|r| metric.of(r))).unwrap_or_default())
}

/// One bar per known triple that has a record. Repeated triples show the
/// last record, the same as the grouped panels.
pub fn efficiency_bars(records: &[ConfigRecord]) -> Result<Vec<EfficiencyBar>, ReportError> {
    let mut bars = Vec::new();
    for repo in &REPOS {
        for model in MODELS {
            for strategy in STRATEGIES {
                let Some(r) = lookup(records, repo.name, model, strategy) else {
                    continue;
                };
                let Some(series) = palette::series(&r.series_key()) else {
                    continue;
                };
                bars.push(EfficiencyBar {
                    label: palette::short_label(repo.name, model, strategy),
                    series: series.key,
                    value: r.efficiency()?,
                });
            }
        }
    }
    Ok(bars)
}

#[must_use]
pub fn scatter_points(records: &[ConfigRecord]) -> Vec<ScatterPoint> {
    records
        .iter()
        .filter_map(|r| {
            let series = palette::series(&r.series_key())?;
            Some(ScatterPoint {
                repository: r.repository.clone(),
                series: series.key,
                x: r.tokens_millions(),
                y: r.coverage,
                marker_area: 100.0 + r.tests_added as f64 * 0.3,
                marker: if series.strategy == palette::REFINE {
                    Marker::Circle
                } else {
                    Marker::Square
                },
            })
        })
        .collect()
}

pub fn strategy_profiles(records: &[ConfigRecord]) -> Result<Vec<StrategyProfile>, ReportError> {
    STRATEGIES
        .iter()
        .map(|&strategy| {
            let group = partition(records, Partition::Strategy, strategy)?;
            let efficiencies = group
                .iter()
                .map(|r| r.efficiency())
                .collect::<Result<Vec<_>, _>>()?;

            let coverage = mean(group.iter().map(|r| r.coverage)).unwrap_or_default();
            let pass_rate = mean(group.iter().map(|r| r.pass_rate)).unwrap_or_default();
            let efficiency = mean(efficiencies.into_iter()).unwrap_or_default();
            let tests = mean(group.iter().map(|r| r.tests_added as f64)).unwrap_or_default();

            let axes = [coverage, pass_rate, efficiency, tests / 4.0].map(|v| v.clamp(0.0, RADAR_MAX));
            Ok(StrategyProfile { strategy, axes })
        })
        .collect()
}

pub fn model_comparison(records: &[ConfigRecord]) -> Result<Vec<ModelBars>, ReportError> {
    MODELS
        .iter()
        .map(|&model| {
            let m = |metric| mean_by(records, Partition::Model, model, metric);
            Ok(ModelBars {
                model,
                values: [
                    m(Metric::Coverage)?,
                    m(Metric::PassRate)?,
                    m(Metric::TestsAdded)? / 3.0,
                    m(Metric::Tokens)? / 1_000_000.0 * 10.0,
                ],
            })
        })
        .collect()
}

use std::ops::Range;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontTransform;

use super::{bold, dashed_hline, font, px, stroke};
use crate::aggregate::{EfficiencyBar, MODEL_METRICS, ModelBars};
use crate::error::ReportError;
use crate::palette::{self, REPOS, SERIES, TARGET_GREEN};

const GROUP_WIDTH: f64 = 0.18;
const PAIR_WIDTH: f64 = 0.35;
const TARGET_COVERAGE: f64 = 80.0;

/// Fixed settings of one grouped-bar panel.
pub struct GroupedPanel {
    pub title: &'static str,
    pub y_desc: &'static str,
    /// `None` auto-scales from zero.
    pub y_range: Option<(f64, f64)>,
    pub target_line: bool,
    pub legend: bool,
}

pub const COVERAGE: GroupedPanel = GroupedPanel {
    title: "Test Coverage Achievement",
    y_desc: "Coverage (%)",
    y_range: Some((50.0, 100.0)),
    target_line: true,
    legend: true,
};

pub const PASS_RATE: GroupedPanel = GroupedPanel {
    title: "Test Suite Quality (Pass Rate)",
    y_desc: "Pass Rate (%)",
    y_range: Some((60.0, 105.0)),
    target_line: false,
    legend: false,
};

pub const TESTS_ADDED: GroupedPanel = GroupedPanel {
    title: "Test Generation Volume",
    y_desc: "Tests Added",
    y_range: None,
    target_line: false,
    legend: false,
};

/// `0..max × 1.1`, never empty. Non-finite values are ignored.
fn auto_range(values: impl Iterator<Item = f64>) -> Range<f64> {
    let max = values.filter(|v| v.is_finite()).fold(0.0_f64, f64::max);
    0.0..if max > 0.0 { max * 1.1 } else { 1.0 }
}

/// Category axis for `n` slots centred on `0..n`. Paired with
/// `x_labels(n)`, the mesh puts one tick on every integer.
fn slots(n: usize) -> (Range<f64>, usize) {
    let n = n.max(1);
    (-0.5..n as f64 - 0.5, n)
}

/// Label for the tick at `x`; blank between slots and outside the table.
fn slot_label<T>(labels: &[T], x: f64, name: impl Fn(&T) -> String) -> String {
    if x < -0.25 || (x - x.round()).abs() > 0.25 {
        return String::new();
    }
    labels.get(x.round() as usize).map(name).unwrap_or_default()
}

/// Bar rectangle clipped to the visible y-range.
fn bar(center: f64, width: f64, value: f64, y: &Range<f64>) -> [(f64, f64); 2] {
    let top = value.clamp(y.start, y.end);
    [(center - width / 2.0, y.start), (center + width / 2.0, top)]
}

/// Panels 1–3: one group per repository, one bar per model-strategy.
pub fn grouped<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rows: &[[f64; 4]],
    panel: &GroupedPanel,
) -> Result<(), ReportError> {
    let y = match panel.y_range {
        Some((lo, hi)) => lo..hi,
        None => auto_range(rows.iter().flatten().copied()),
    };
    let (x, ticks) = slots(REPOS.len());
    let x_ends = (x.start, x.end);

    let mut chart = ChartBuilder::on(area)
        .caption(panel.title, bold(11.0))
        .margin(px(8.0))
        .x_label_area_size(px(24.0))
        .y_label_area_size(px(36.0))
        .build_cartesian_2d(x, y.clone())?;

    let repo_label = |x: &f64| slot_label(&REPOS, *x, |r| format!("{} ({})", r.label, r.loc));
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks)
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(BLACK.mix(0.1))
        .x_label_formatter(&repo_label)
        .x_label_style(font(9.0))
        .y_label_style(font(9.0))
        .y_desc(panel.y_desc)
        .axis_desc_style(bold(10.0))
        .draw()?;

    for (i, series) in SERIES.iter().enumerate() {
        let offset = (i as f64 - 1.5) * GROUP_WIDTH;
        let color = series.color;
        let fill = chart.draw_series(rows.iter().enumerate().map(|(repo, row)| {
            Rectangle::new(
                bar(repo as f64 + offset, GROUP_WIDTH, row[i], &y),
                color.mix(0.9).filled(),
            )
        }))?;
        if panel.legend {
            fill.label(palette::title_case(series.key)).legend(move |(lx, ly)| {
                Rectangle::new([(lx, ly - px(3.0)), (lx + px(8.0), ly + px(3.0))], color.filled())
            });
        }
        chart.draw_series(rows.iter().enumerate().map(|(repo, row)| {
            Rectangle::new(
                bar(repo as f64 + offset, GROUP_WIDTH, row[i], &y),
                BLACK.stroke_width(stroke(0.5)),
            )
        }))?;
    }

    if panel.target_line {
        chart.draw_series(
            dashed_hline(x_ends, TARGET_COVERAGE, 24)
                .into_iter()
                .map(|seg| PathElement::new(seg.to_vec(), TARGET_GREEN.mix(0.5).stroke_width(stroke(1.5)))),
        )?;
    }

    if panel.legend {
        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::LowerRight)
            .background_style(WHITE.mix(0.9))
            .border_style(BLACK)
            .label_font(font(8.0))
            .draw()?;
    }
    Ok(())
}

/// Panel 4: tests per million tokens, one bar per configuration found.
pub fn efficiency<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    bars: &[EfficiencyBar],
) -> Result<(), ReportError> {
    let y = auto_range(bars.iter().map(|b| b.value));
    let (x, ticks) = slots(bars.len());

    let mut chart = ChartBuilder::on(area)
        .caption("Token Efficiency", bold(11.0))
        .margin(px(8.0))
        .x_label_area_size(px(48.0))
        .y_label_area_size(px(36.0))
        .build_cartesian_2d(x, y.clone())?;

    let label = |x: &f64| slot_label(bars, *x, |b| b.label.clone());
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks)
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(BLACK.mix(0.1))
        .x_label_formatter(&label)
        .x_label_style(font(7.0).transform(FontTransform::Rotate90))
        .y_label_style(font(9.0))
        .y_desc("Tests per Million Tokens")
        .axis_desc_style(bold(10.0))
        .draw()?;

    chart.draw_series(bars.iter().enumerate().map(|(i, b)| {
        let color = palette::series(b.series).map_or(BLACK, |s| s.color);
        Rectangle::new(bar(i as f64, 0.8, b.value, &y), color.mix(0.9).filled())
    }))?;
    chart.draw_series(bars.iter().enumerate().map(|(i, b)| {
        Rectangle::new(bar(i as f64, 0.8, b.value, &y), BLACK.stroke_width(stroke(0.5)))
    }))?;
    Ok(())
}

/// Panel 7: per-model averages of four metrics, spanning two cells.
pub fn model_comparison<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    models: &[ModelBars],
) -> Result<(), ReportError> {
    let y = auto_range(models.iter().flat_map(|m| m.values));
    let (x, ticks) = slots(MODEL_METRICS.len());

    let mut chart = ChartBuilder::on(area)
        .caption("Model Performance Comparison", bold(11.0))
        .margin(px(8.0))
        .x_label_area_size(px(32.0))
        .y_label_area_size(px(36.0))
        .build_cartesian_2d(x, y.clone())?;

    let label = |x: &f64| slot_label(&MODEL_METRICS, *x, |m| (*m).to_string());
    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(ticks)
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(BLACK.mix(0.1))
        .x_label_formatter(&label)
        .x_label_style(font(9.0))
        .y_label_style(font(9.0))
        .x_desc("Metrics")
        .y_desc("Normalized Value")
        .axis_desc_style(bold(10.0))
        .draw()?;

    for (i, m) in models.iter().enumerate() {
        let offset = if i == 0 { -PAIR_WIDTH / 2.0 } else { PAIR_WIDTH / 2.0 };
        let color = palette::accent(m.model);
        chart
            .draw_series(m.values.iter().enumerate().map(|(k, &v)| {
                Rectangle::new(bar(k as f64 + offset, PAIR_WIDTH, v, &y), color.mix(0.9).filled())
            }))?
            .label(palette::title_case(m.model))
            .legend(move |(lx, ly)| {
                Rectangle::new([(lx, ly - px(3.0)), (lx + px(8.0), ly + px(3.0))], color.filled())
            });
        chart.draw_series(m.values.iter().enumerate().map(|(k, &v)| {
            Rectangle::new(
                bar(k as f64 + offset, PAIR_WIDTH, v, &y),
                BLACK.stroke_width(stroke(0.5)),
            )
        }))?;
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.9))
        .border_style(BLACK)
        .label_font(font(9.0))
        .draw()?;
    Ok(())
}

use plotters::coord::Shift;
use plotters::prelude::*;

use super::{bold, dashed_hline, font, px, stroke};
use crate::aggregate::{Marker, ScatterPoint};
use crate::error::ReportError;
use crate::palette::{self, TARGET_GREEN};

const TARGET_COVERAGE: f64 = 80.0;

/// Marker area is in square points, like a matplotlib `s=`; this is the
/// matching half-width in pixels.
fn marker_radius(area: f64) -> i32 {
    px(area.sqrt() / 2.0).max(1)
}

fn bounds(points: &[ScatterPoint]) -> ((f64, f64), (f64, f64)) {
    let max_x = points.iter().map(|p| p.x).fold(0.0_f64, f64::max);
    let (lo, hi) = points
        .iter()
        .map(|p| p.y)
        .fold((TARGET_COVERAGE, TARGET_COVERAGE), |(lo, hi), y| (lo.min(y), hi.max(y)));
    let x = (0.0, if max_x > 0.0 { max_x * 1.15 } else { 1.0 });
    ((x.0, x.1), (lo - 5.0, hi + 5.0))
}

/// Panel 5: tokens (millions) against coverage, marker size by tests added.
pub fn coverage_vs_tokens<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    points: &[ScatterPoint],
) -> Result<(), ReportError> {
    let ((x0, x1), (y0, y1)) = bounds(points);

    let mut chart = ChartBuilder::on(area)
        .caption("Coverage vs Token Cost (bubble size = tests added)", bold(11.0))
        .margin(px(8.0))
        .x_label_area_size(px(28.0))
        .y_label_area_size(px(36.0))
        .build_cartesian_2d(x0..x1, y0..y1)?;

    chart
        .configure_mesh()
        .light_line_style(WHITE.mix(0.0))
        .bold_line_style(BLACK.mix(0.1))
        .x_label_style(font(9.0))
        .y_label_style(font(9.0))
        .x_desc("Tokens Used (Millions)")
        .y_desc("Coverage Achieved (%)")
        .axis_desc_style(bold(10.0))
        .draw()?;

    let color_of = |p: &ScatterPoint| palette::series(p.series).map_or(BLACK, |s| s.color);
    let edge = || BLACK.stroke_width(stroke(1.0));

    chart.draw_series(
        points
            .iter()
            .filter(|p| p.marker == Marker::Circle)
            .map(|p| {
                let r = marker_radius(p.marker_area);
                EmptyElement::at((p.x, p.y))
                    + Circle::new((0, 0), r, color_of(p).mix(0.7).filled())
                    + Circle::new((0, 0), r, edge())
            }),
    )?;

    chart.draw_series(
        points
            .iter()
            .filter(|p| p.marker == Marker::Square)
            .map(|p| {
                let r = marker_radius(p.marker_area);
                EmptyElement::at((p.x, p.y))
                    + Rectangle::new([(-r, -r), (r, r)], color_of(p).mix(0.7).filled())
                    + Rectangle::new([(-r, -r), (r, r)], edge())
            }),
    )?;

    chart.draw_series(
        dashed_hline((x0, x1), TARGET_COVERAGE, 24)
            .into_iter()
            .map(|seg| PathElement::new(seg.to_vec(), TARGET_GREEN.mix(0.3).stroke_width(stroke(1.5)))),
    )?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point(x: f64, y: f64) -> ScatterPoint {
        ScatterPoint {
            repository: "click".into(),
            series: "opus-4-1-refine",
            x,
            y,
            marker_area: 112.0,
            marker: Marker::Circle,
        }
    }

    #[test]
    fn bounds_always_include_target_line() {
        let ((_, x1), (y0, y1)) = bounds(&[point(2.0, 90.0), point(4.0, 95.0)]);
        assert!((x1 - 4.6).abs() < 1e-9);
        assert_eq!(y0, 75.0);
        assert_eq!(y1, 100.0);
    }

    #[test]
    fn bounds_of_no_points_are_usable() {
        let ((x0, x1), (y0, y1)) = bounds(&[]);
        assert!(x1 > x0);
        assert!(y1 > y0);
    }

    #[test]
    fn larger_area_means_larger_marker() {
        assert!(marker_radius(130.0) > marker_radius(100.0));
        assert!(marker_radius(0.0) >= 1);
    }
}

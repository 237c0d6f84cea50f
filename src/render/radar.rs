use std::f64::consts::TAU;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::{bold, font, px, stroke};
use crate::aggregate::{PROFILE_AXES, StrategyProfile};
use crate::error::ReportError;
use crate::palette;

const RINGS: [f64; 5] = [20.0, 40.0, 60.0, 80.0, 100.0];
const FULL_SCALE: f64 = 100.0;

/// Unit-circle position of axis `k` of `n`. Axis 0 points up and the rest
/// follow clockwise.
fn direction(k: usize, n: usize) -> (f64, f64) {
    let theta = k as f64 / n as f64 * TAU;
    (theta.sin(), theta.cos())
}

/// Closed polygon for one profile: the first vertex is repeated at the end.
fn outline(axes: &[f64]) -> Vec<(f64, f64)> {
    let n = axes.len();
    let mut pts: Vec<(f64, f64)> = axes
        .iter()
        .enumerate()
        .map(|(k, v)| {
            let (dx, dy) = direction(k, n);
            let r = v / FULL_SCALE;
            (dx * r, dy * r)
        })
        .collect();
    if let Some(&first) = pts.first() {
        pts.push(first);
    }
    pts
}

fn ring(radius: f64) -> Vec<(f64, f64)> {
    (0..=72)
        .map(|i| {
            let (dx, dy) = direction(i, 72);
            (dx * radius, dy * radius)
        })
        .collect()
}

/// Panel 6: spider chart of the per-strategy means.
pub fn strategy_profile<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    profiles: &[StrategyProfile],
) -> Result<(), ReportError> {
    let mut chart = ChartBuilder::on(area)
        .caption("Strategy Performance Profile", bold(11.0))
        .margin(px(8.0))
        .build_cartesian_2d(-1.45..1.45, -1.25..1.3)?;

    let grid = BLACK.mix(0.15).stroke_width(stroke(0.5));
    chart.draw_series(RINGS.iter().map(|&r| PathElement::new(ring(r / FULL_SCALE), grid)))?;
    chart.draw_series((0..PROFILE_AXES.len()).map(|k| {
        let (dx, dy) = direction(k, PROFILE_AXES.len());
        PathElement::new(vec![(0.0, 0.0), (dx, dy)], grid)
    }))?;

    let centered = Pos::new(HPos::Center, VPos::Center);
    chart.draw_series(PROFILE_AXES.iter().enumerate().map(|(k, &name)| {
        let (dx, dy) = direction(k, PROFILE_AXES.len());
        Text::new(name, (dx * 1.18, dy * 1.12), TextStyle::from(font(9.0)).pos(centered))
    }))?;
    chart.draw_series(RINGS.iter().map(|&r| {
        Text::new(
            format!("{r:.0}"),
            (0.03, r / FULL_SCALE),
            font(7.0).color(&BLACK.mix(0.5)).pos(Pos::new(HPos::Left, VPos::Bottom)),
        )
    }))?;

    for profile in profiles {
        let color = palette::accent(profile.strategy);
        let pts = outline(&profile.axes);
        chart
            .draw_series(std::iter::once(Polygon::new(pts.clone(), color.mix(0.25))))?
            .label(palette::title_case(profile.strategy))
            .legend(move |(lx, ly)| {
                Rectangle::new([(lx, ly - px(3.0)), (lx + px(8.0), ly + px(3.0))], color.filled())
            });
        chart.draw_series(std::iter::once(PathElement::new(
            pts.clone(),
            color.mix(0.7).stroke_width(stroke(2.0)),
        )))?;
        chart.draw_series(
            pts.iter()
                .take(pts.len().saturating_sub(1))
                .map(|&p| Circle::new(p, px(2.5), color.mix(0.7).filled())),
        )?;
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_axis_points_up_then_clockwise() {
        let (x, y) = direction(0, 4);
        assert!(x.abs() < 1e-12 && (y - 1.0).abs() < 1e-12);
        let (x, y) = direction(1, 4);
        assert!((x - 1.0).abs() < 1e-12 && y.abs() < 1e-12);
    }

    #[test]
    fn outline_is_closed() {
        let pts = outline(&[90.0, 95.0, 40.0, 12.5]);
        assert_eq!(pts.len(), 5);
        assert_eq!(pts[0], pts[4]);
        assert!((pts[0].1 - 0.9).abs() < 1e-12);
        assert!((pts[1].0 - 0.95).abs() < 1e-12);
    }

    #[test]
    fn outline_of_nothing_is_empty() {
        assert!(outline(&[]).is_empty());
    }
}

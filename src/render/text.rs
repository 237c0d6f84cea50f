use plotters::coord::Shift;
use plotters::prelude::*;

use super::{font, px, stroke};
use crate::error::ReportError;
use crate::palette::WHEAT;
use crate::summary::Summary;

/// Panel 8: no axes, just the summary block in a wheat box.
pub fn summary<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    summary: &Summary,
) -> Result<(), ReportError> {
    let lines = summary.lines();
    let (w, h) = area.dim_in_pixel();
    let (w, h) = (w as i32, h as i32);

    let line_height = px(15.0);
    let pad = px(8.0);
    let block = line_height * lines.len() as i32;
    let left = w / 10;
    let top = ((h - block) / 2 - pad).max(0);
    let bottom = (top + block + 2 * pad).min(h - 1);
    let right = (w - w / 20).max(left + 1);

    area.draw(&Rectangle::new([(left, top), (right, bottom)], WHEAT.mix(0.5).filled()))?;
    area.draw(&Rectangle::new(
        [(left, top), (right, bottom)],
        BLACK.mix(0.6).stroke_width(stroke(1.0)),
    ))?;

    for (i, line) in lines.iter().enumerate() {
        let y = top + pad + line_height * i as i32;
        area.draw(&Text::new(line.as_str(), (left + pad, y), font(11.0)))?;
    }
    Ok(())
}

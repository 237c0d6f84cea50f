//! Draws the 3×3 dashboard with plotters. Sizes are given in points and
//! converted for a 300 DPI canvas.

mod bars;
mod radar;
mod scatter;
mod text;

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::{FontDesc, FontStyle};

use crate::aggregate::DashboardData;
use crate::error::ReportError;

pub const TITLE: &str = "Test Suite Refinement Benchmark Results";
pub const DPI: f64 = 300.0;
/// 18 × 12 inches.
pub const CANVAS: (u32, u32) = ((18.0 * DPI) as u32, (12.0 * DPI) as u32);

const FAMILY: &str = "sans-serif";

/// Points to pixels.
pub(crate) fn px(pt: f64) -> i32 {
    (pt * DPI / 72.0).round() as i32
}

pub(crate) fn font(pt: f64) -> FontDesc<'static> {
    (FAMILY, pt * DPI / 72.0).into_font()
}

pub(crate) fn bold(pt: f64) -> FontDesc<'static> {
    font(pt).style(FontStyle::Bold)
}

pub(crate) fn stroke(pt: f64) -> u32 {
    px(pt).max(1) as u32
}

/// Horizontal dashed reference line across `x_range`, in chart coordinates.
pub(crate) fn dashed_hline(x_range: (f64, f64), y: f64, dashes: usize) -> Vec<[(f64, f64); 2]> {
    let (x0, x1) = x_range;
    let step = (x1 - x0) / dashes as f64;
    (0..dashes)
        .map(|i| {
            let start = x0 + step * i as f64;
            [(start, y), (start + step * 0.6, y)]
        })
        .collect()
}

/// Fill `root` with every panel.
pub fn draw<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    data: &DashboardData,
) -> Result<(), ReportError> {
    root.fill(&WHITE)?;
    let body = root.titled(TITLE, bold(20.0))?;

    let rows = body.split_evenly((3, 1));
    let top = rows[0].split_evenly((1, 3));
    let middle = rows[1].split_evenly((1, 3));
    let bottom_width = rows[2].dim_in_pixel().0;
    let (wide, narrow) = rows[2].split_horizontally((bottom_width * 2 / 3) as i32);

    bars::grouped(&top[0], &data.coverage, &bars::COVERAGE)?;
    bars::grouped(&top[1], &data.pass_rate, &bars::PASS_RATE)?;
    bars::grouped(&top[2], &data.tests_added, &bars::TESTS_ADDED)?;
    bars::efficiency(&middle[0], &data.efficiency)?;
    scatter::coverage_vs_tokens(&middle[1], &data.scatter)?;
    radar::strategy_profile(&middle[2], &data.profiles)?;
    bars::model_comparison(&wide, &data.models)?;
    text::summary(&narrow, &data.summary)?;
    Ok(())
}

/// Rasterize to `path`. The extension picks the format: `.svg` is vector,
/// anything else goes through the bitmap encoder.
pub fn save(data: &DashboardData, path: &Path) -> Result<(), ReportError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| ReportError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }

    let svg = path
        .extension()
        .and_then(OsStr::to_str)
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));

    if svg {
        let root = SVGBackend::new(path, CANVAS).into_drawing_area();
        draw(&root, data)?;
        root.present()?;
    } else {
        let root = BitMapBackend::new(path, CANVAS).into_drawing_area();
        draw(&root, data)?;
        root.present()?;
    }

    tracing::info!(path = %path.display(), svg, "dashboard written");
    Ok(())
}

/// No output path: render to a temporary PNG and hand it to the platform
/// image viewer. `$BENCHPLOT_VIEWER` overrides the default opener.
///
/// The viewer outlives this process, so the image is kept and its path
/// returned for the caller to report or remove.
pub fn show(data: &DashboardData) -> Result<PathBuf, ReportError> {
    let path = tempfile::Builder::new()
        .prefix("benchplot-")
        .suffix(".png")
        .tempfile()
        .and_then(|file| file.into_temp_path().keep().map_err(|e| e.error))
        .map_err(|source| ReportError::Io {
            path: std::env::temp_dir(),
            source,
        })?;
    save(data, &path)?;
    tracing::info!(path = %path.display(), "temporary image kept for the viewer");

    let viewer = std::env::var("BENCHPLOT_VIEWER").unwrap_or_else(|_| default_viewer().into());
    tracing::debug!(%viewer, path = %path.display(), "opening viewer");
    process::Command::new(&viewer)
        .arg(&path)
        .spawn()
        .map_err(|source| ReportError::Viewer { viewer, source })?;
    Ok(path)
}

fn default_viewer() -> &'static str {
    if cfg!(target_os = "macos") {
        "open"
    } else if cfg!(target_os = "windows") {
        "explorer"
    } else {
        "xdg-open"
    }
}

#![warn(clippy::pedantic)]
#![allow(
    clippy::cast_possible_truncation,  // pixel math: f64 -> i32 on a fixed-size canvas
    clippy::cast_precision_loss,       // token counts as f64 stay far below 2^52
    clippy::cast_sign_loss,            // same
    clippy::cast_possible_wrap,        // canvas dimensions u32 -> i32
    clippy::module_name_repetitions,
    clippy::float_cmp,                 // tests compare exact aggregates
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
)]

pub mod aggregate;
pub mod error;
pub mod load;
pub mod palette;
pub mod render;
pub mod summary;
pub mod types;

use std::path::{Path, PathBuf};

use aggregate::DashboardData;
use error::ReportError;
use types::ConfigRecord;

/// Where the rendered dashboard went.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    Saved(PathBuf),
    /// Temporary image handed to the platform viewer.
    Shown(PathBuf),
}

/// The figure handed back to callers: the flat records, every panel's
/// numbers, and where the image ended up.
#[derive(Debug, Clone)]
pub struct Dashboard {
    pub records: Vec<ConfigRecord>,
    pub data: DashboardData,
    pub destination: Option<Destination>,
}

/// Load and aggregate without drawing.
pub fn compute(input: &Path) -> Result<Dashboard, ReportError> {
    let records = load::load(input)?;
    let data = DashboardData::compute(&records)?;
    Ok(Dashboard {
        records,
        data,
        destination: None,
    })
}

/// The whole pipeline: load → aggregate → draw. With an output path the
/// image is written there; without one it is opened in a viewer.
pub fn generate(input: &Path, output: Option<&Path>) -> Result<Dashboard, ReportError> {
    let mut dashboard = compute(input)?;
    let destination = match output {
        Some(path) => {
            render::save(&dashboard.data, path)?;
            Destination::Saved(path.to_path_buf())
        }
        None => Destination::Shown(render::show(&dashboard.data)?),
    };
    dashboard.destination = Some(destination);
    Ok(dashboard)
}

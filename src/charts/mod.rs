//! Chart building and rendering.
//!
//! The split mirrors the rest of the crate: `catalog` computes chart
//! *descriptions* from summary tables (no drawing), `render` turns a
//! description into SVG with Plotters. This keeps the data prep testable
//! without a drawing backend.

pub mod catalog;
pub mod render;
pub mod spec;

use std::path::Path;

use rayon::prelude::*;

use crate::domain::{ChartConfig, SalesDataset};
use crate::error::AppError;

/// Render the full static chart set into `config.out_dir`.
///
/// Charts are pure functions of the immutable dataset, so the renders run
/// in parallel; output files are overwritten on each run. Returns the
/// artifact file names in catalog order.
pub fn render_static_set(dataset: &SalesDataset, config: &ChartConfig) -> Result<Vec<String>, AppError> {
    std::fs::create_dir_all(&config.out_dir).map_err(|e| {
        AppError::input(format!(
            "Failed to create output directory '{}': {e}",
            config.out_dir.display()
        ))
    })?;

    let charts = catalog::static_set(dataset, config);

    charts
        .par_iter()
        .map(|(name, chart)| {
            let path = config.out_dir.join(*name);
            render_to_file(chart, &path, config.width, config.height)?;
            Ok(name.to_string())
        })
        .collect()
}

fn render_to_file(chart: &spec::ChartSpec, path: &Path, width: u32, height: u32) -> Result<(), AppError> {
    let svg = render::render_svg(chart, width, height)?;
    std::fs::write(path, svg)
        .map_err(|e| AppError::render(format!("Failed to write chart '{}': {e}", path.display())))
}

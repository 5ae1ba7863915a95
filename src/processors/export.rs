//! Gslib to CSV point export.

use std::path::Path;

use anyhow::{Context, Result};
use log::debug;

use crate::core::loaders::load_gslib;
use crate::core::writers::write_points_csv;

/// Export a seven-column gslib file as an x,y,z,velocity CSV.
///
/// Useful for inspecting a velocity model in external tools before or
/// after conversion.
///
/// # Returns
///
/// The number of points exported.
pub fn export_points(input: &Path, output: &Path) -> Result<usize> {
    let model = load_gslib(input)
        .with_context(|| format!("failed to load gslib file: {}", input.display()))?;

    debug!("{}: exporting {} point(s)", input.display(), model.len());

    write_points_csv(output, &model)
        .with_context(|| format!("failed to write CSV file: {}", output.display()))?;

    Ok(model.len())
}

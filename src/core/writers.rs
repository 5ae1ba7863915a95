//! Writers for gslib and CSV output.
//!
//! This module provides functions for writing converted point data:
//! - Ten-column gslib joint files with fixed-width fields
//! - CSV point exports (x, y, z, velocity) for external tooling

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use thiserror::Error;

use super::loaders::{JointModel, VelocityModel};

/// The ten output variable names, in column order.
pub const OUTPUT_VARIABLES: [&str; 10] = [
    "i_index",
    "j_index",
    "k_index",
    "x_coord",
    "y_coord",
    "z_coord",
    "dip_angle",
    "strike_angle",
    "KN",
    "KS",
];

/// Errors that can occur during write operations.
#[derive(Error, Debug)]
pub enum WriteError {
    /// Failed to create parent directories.
    #[error("failed to create parent directories for '{path}': {source}")]
    CreateDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to create or open file for writing.
    #[error("failed to create file '{path}': {source}")]
    CreateFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write data to file.
    #[error("failed to write to file '{path}': {source}")]
    WriteFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// CSV writing error.
    #[error("CSV write error for '{path}': {source}")]
    CsvError {
        path: String,
        #[source]
        source: csv::Error,
    },
}

/// Result type for write operations.
pub type Result<T> = std::result::Result<T, WriteError>;

/// Creates parent directories for a file path if they don't exist.
fn ensure_parent_dirs(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| WriteError::CreateDirectory {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
    }
    Ok(())
}

/// Creates a buffered writer for the given path.
fn create_buffered_writer(path: &Path) -> Result<BufWriter<File>> {
    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    Ok(BufWriter::new(file))
}

/// Write a joint model as a ten-column gslib file.
///
/// The header is the title line, the literal variable count `10`, then the
/// ten names from [`OUTPUT_VARIABLES`], one per line. Each data row is
/// fixed-width, space-separated:
/// - indices right-aligned in width 6,
/// - coordinates right-aligned in width 18 with 7 decimal digits,
/// - angles right-aligned in width 13 with 7 decimal digits,
/// - stiffness values right-aligned in width 14 with 0 decimal digits.
///
/// Zero-precision stiffness formatting rounds to the nearest integer with
/// ties to even, the rounding applied by Rust's float formatter.
///
/// # Arguments
///
/// * `path` - Output file path (parent directories will be created if needed)
/// * `joints` - Converted joint model
///
/// # Errors
///
/// Returns an error if parent directories cannot be created or the file
/// cannot be created or written to.
pub fn write_gslib(path: &Path, joints: &JointModel) -> Result<()> {
    ensure_parent_dirs(path)?;
    let mut writer = create_buffered_writer(path)?;
    let path_str = path.display().to_string();

    let wrap = |e: std::io::Error| WriteError::WriteFile {
        path: path_str.clone(),
        source: e,
    };

    writeln!(writer, "{}", joints.title).map_err(wrap)?;
    writeln!(writer, "{}", OUTPUT_VARIABLES.len()).map_err(wrap)?;
    for name in OUTPUT_VARIABLES {
        writeln!(writer, "{}", name).map_err(wrap)?;
    }

    for idx in 0..joints.len() {
        writeln!(
            writer,
            "{:6} {:6} {:6} {:18.7} {:18.7} {:18.7} {:13.7} {:13.7} {:14.0} {:14.0}",
            joints.i[idx],
            joints.j[idx],
            joints.k[idx],
            joints.x[idx],
            joints.y[idx],
            joints.z[idx],
            joints.dip[idx],
            joints.strike[idx],
            joints.kn[idx],
            joints.ks[idx],
        )
        .map_err(wrap)?;
    }

    writer.flush().map_err(wrap)?;

    Ok(())
}

/// Write a velocity model to CSV with x, y, z, velocity columns.
///
/// Creates a CSV file with headers `x,y,z,velocity` and one row per point,
/// for inspection in external tools.
///
/// # Errors
///
/// Returns an error if parent directories cannot be created or the file
/// cannot be created or written to.
pub fn write_points_csv(path: &Path, model: &VelocityModel) -> Result<()> {
    ensure_parent_dirs(path)?;

    let file = File::create(path).map_err(|e| WriteError::CreateFile {
        path: path.display().to_string(),
        source: e,
    })?;
    let buf_writer = BufWriter::new(file);
    let mut csv_writer = csv::Writer::from_writer(buf_writer);

    let path_str = path.display().to_string();

    csv_writer
        .write_record(["x", "y", "z", "velocity"])
        .map_err(|e| WriteError::CsvError {
            path: path_str.clone(),
            source: e,
        })?;

    for idx in 0..model.len() {
        csv_writer
            .write_record(&[
                format!("{:.7}", model.x[idx]),
                format!("{:.7}", model.y[idx]),
                format!("{:.7}", model.z[idx]),
                format!("{:.7}", model.velocity[idx]),
            ])
            .map_err(|e| WriteError::CsvError {
                path: path_str.clone(),
                source: e,
            })?;
    }

    csv_writer.flush().map_err(|e| WriteError::WriteFile {
        path: path_str,
        source: e,
    })?;

    Ok(())
}

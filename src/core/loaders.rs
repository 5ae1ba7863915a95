//! Loaders for gslib point-attribute files.
//!
//! This module provides parsers for:
//! - Seven-column gslib velocity models (grid indices, coordinates, velocity)
//! - Plain value-series files (one number per line) used to feed per-row
//!   joint parameters
//!
//! The gslib layout is: a free-form title line, a line with the declared
//! variable count `V`, then `V` variable-name lines, then one
//! whitespace-delimited data row per point.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use thiserror::Error;

/// Number of fields each input data row must carry.
pub const GSLIB_INPUT_FIELDS: usize = 7;

/// Errors that can occur during file loading.
#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed gslib header: {0}")]
    MalformedHeader(String),

    #[error("malformed data row at line {line}: {reason}")]
    MalformedRow { line: usize, reason: String },
}

/// Result type for loader operations.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// In-memory form of a seven-column gslib velocity model.
///
/// Columns are stored as parallel vectors, one entry per data row, in file
/// order. The declared variable names are kept for inspection only; they do
/// not affect parsing, which assumes the fixed seven-column layout.
#[derive(Debug, Clone)]
pub struct VelocityModel {
    /// Title line of the source file.
    pub title: String,
    /// Variable names declared in the source header.
    pub variable_names: Vec<String>,
    /// I grid indices.
    pub i: Vec<i32>,
    /// J grid indices.
    pub j: Vec<i32>,
    /// K grid indices.
    pub k: Vec<i32>,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Z coordinates.
    pub z: Vec<f64>,
    /// P-velocity values.
    pub velocity: Vec<f64>,
}

impl VelocityModel {
    /// Creates an empty model with pre-allocated row capacity.
    pub fn with_capacity(title: String, variable_names: Vec<String>, capacity: usize) -> Self {
        Self {
            title,
            variable_names,
            i: Vec::with_capacity(capacity),
            j: Vec::with_capacity(capacity),
            k: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            velocity: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.i.len()
    }

    /// Returns true if the model has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }

    /// Appends one data row.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn push(&mut self, i: i32, j: i32, k: i32, x: f64, y: f64, z: f64, velocity: f64) {
        self.i.push(i);
        self.j.push(j);
        self.k.push(k);
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        self.velocity.push(velocity);
    }
}

/// In-memory form of a ten-column gslib joint model.
///
/// Produced by [`crate::core::transforms::apply_joint_attributes`] and
/// consumed by [`crate::core::writers::write_gslib`]. Row order matches the
/// source velocity model.
#[derive(Debug, Clone)]
pub struct JointModel {
    /// Title line carried over from the source file.
    pub title: String,
    /// I grid indices (offset applied).
    pub i: Vec<i32>,
    /// J grid indices (offset applied).
    pub j: Vec<i32>,
    /// K grid indices (offset applied).
    pub k: Vec<i32>,
    /// X coordinates.
    pub x: Vec<f64>,
    /// Y coordinates.
    pub y: Vec<f64>,
    /// Z coordinates.
    pub z: Vec<f64>,
    /// Dip angles in degrees.
    pub dip: Vec<f64>,
    /// Strike angles in degrees.
    pub strike: Vec<f64>,
    /// Normal stiffness values.
    pub kn: Vec<f64>,
    /// Shear stiffness values.
    pub ks: Vec<f64>,
}

impl JointModel {
    /// Creates an empty model with pre-allocated row capacity.
    pub fn with_capacity(title: String, capacity: usize) -> Self {
        Self {
            title,
            i: Vec::with_capacity(capacity),
            j: Vec::with_capacity(capacity),
            k: Vec::with_capacity(capacity),
            x: Vec::with_capacity(capacity),
            y: Vec::with_capacity(capacity),
            z: Vec::with_capacity(capacity),
            dip: Vec::with_capacity(capacity),
            strike: Vec::with_capacity(capacity),
            kn: Vec::with_capacity(capacity),
            ks: Vec::with_capacity(capacity),
        }
    }

    /// Returns the number of data rows.
    #[inline]
    pub fn len(&self) -> usize {
        self.i.len()
    }

    /// Returns true if the model has no data rows.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.i.is_empty()
    }

    /// Appends one data row.
    #[allow(clippy::too_many_arguments)]
    #[inline]
    pub fn push(
        &mut self,
        i: i32,
        j: i32,
        k: i32,
        x: f64,
        y: f64,
        z: f64,
        dip: f64,
        strike: f64,
        kn: f64,
        ks: f64,
    ) {
        self.i.push(i);
        self.j.push(j);
        self.k.push(k);
        self.x.push(x);
        self.y.push(y);
        self.z.push(z);
        self.dip.push(dip);
        self.strike.push(strike);
        self.kn.push(kn);
        self.ks.push(ks);
    }
}

fn parse_index(field: &str, line: usize, name: &str) -> Result<i32> {
    field.parse().map_err(|_| LoaderError::MalformedRow {
        line,
        reason: format!("{} value '{}' is not an integer", name, field),
    })
}

fn parse_value(field: &str, line: usize, name: &str) -> Result<f64> {
    field.parse().map_err(|_| LoaderError::MalformedRow {
        line,
        reason: format!("{} value '{}' is not a number", name, field),
    })
}

/// Load a seven-column gslib velocity model from a text file.
///
/// The declared variable count on line 2 determines how many header lines
/// to skip; it does not change the expected row layout, which is fixed at
/// `i j k x y z p_velocity`. Blank lines between data rows are skipped and
/// do not consume a row slot. Fields beyond the seventh are ignored.
///
/// # Arguments
///
/// * `path` - Path to the gslib file
///
/// # Returns
///
/// A `VelocityModel` with one entry per data row, in file order.
///
/// # Errors
///
/// Returns `LoaderError::Io` if the file cannot be read,
/// `LoaderError::MalformedHeader` if line 2 is not an integer or the file
/// ends inside the variable-name block, and `LoaderError::MalformedRow` if
/// a data row has fewer than seven fields or a field fails to parse.
pub fn load_gslib<P: AsRef<Path>>(path: P) -> Result<VelocityModel> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::with_capacity(64 * 1024, file);
    let lines: Vec<String> = reader.lines().collect::<std::io::Result<_>>()?;

    if lines.len() < 2 {
        return Err(LoaderError::MalformedHeader(format!(
            "expected a title line and a variable count, found {} line(s)",
            lines.len()
        )));
    }

    let title = lines[0].trim().to_string();
    let count_field = lines[1].trim();
    let num_variables: usize = count_field.parse().map_err(|_| {
        LoaderError::MalformedHeader(format!(
            "variable count '{}' is not an integer",
            count_field
        ))
    })?;

    // Data begins after the title, the count line, and one name per variable.
    let data_start = 2 + num_variables;
    if lines.len() < data_start {
        return Err(LoaderError::MalformedHeader(format!(
            "header declares {} variables but the file ends after {} lines",
            num_variables,
            lines.len()
        )));
    }

    let variable_names: Vec<String> = lines[2..data_start]
        .iter()
        .map(|name| name.trim().to_string())
        .collect();

    let mut model = VelocityModel::with_capacity(title, variable_names, lines.len() - data_start);

    for (offset, raw) in lines[data_start..].iter().enumerate() {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }

        let line = data_start + offset + 1;
        let fields: Vec<&str> = trimmed.split_whitespace().collect();

        if fields.len() < GSLIB_INPUT_FIELDS {
            return Err(LoaderError::MalformedRow {
                line,
                reason: format!(
                    "expected at least {} fields, found {}",
                    GSLIB_INPUT_FIELDS,
                    fields.len()
                ),
            });
        }

        model.push(
            parse_index(fields[0], line, "i_index")?,
            parse_index(fields[1], line, "j_index")?,
            parse_index(fields[2], line, "k_index")?,
            parse_value(fields[3], line, "x_coord")?,
            parse_value(fields[4], line, "y_coord")?,
            parse_value(fields[5], line, "z_coord")?,
            parse_value(fields[6], line, "p_velocity")?,
        );
    }

    Ok(model)
}

/// Load a value series from a text file with one number per line.
///
/// Blank lines are skipped. Used to supply per-row joint parameter
/// sequences from the command line.
///
/// # Errors
///
/// Returns `LoaderError::Io` if the file cannot be read and
/// `LoaderError::MalformedRow` if a non-blank line fails to parse.
pub fn load_value_series<P: AsRef<Path>>(path: P) -> Result<Vec<f64>> {
    let file = File::open(path.as_ref())?;
    let reader = BufReader::new(file);

    let mut values = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        values.push(parse_value(trimmed, idx + 1, "series")?);
    }

    Ok(values)
}

//! Gslib joint conversion pipeline.
//!
//! Ties the core stages together: load a seven-column velocity model,
//! validate and apply the joint parameters, write the ten-column result.
//! Single-file and batch-directory modes are provided; batch conversions
//! run in parallel, one file per task.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use log::debug;
use rayon::prelude::*;

use crate::core::loaders::load_gslib;
use crate::core::transforms::{apply_joint_attributes, JointParams};
use crate::core::writers::write_gslib;

/// Convert a single gslib velocity file to a joint file.
///
/// Parameter validation runs before the output file is created, so a
/// per-row sequence of the wrong length fails without leaving any output
/// behind. On a write failure a partial output file may remain; callers
/// should discard it.
///
/// # Arguments
///
/// * `input` - Path to the seven-column input gslib file
/// * `output` - Path to the ten-column output gslib file (overwritten)
/// * `params` - Offsets and joint attribute columns
///
/// # Returns
///
/// The number of data rows written.
pub fn convert_gslib(input: &Path, output: &Path, params: &JointParams) -> Result<usize> {
    let model = load_gslib(input)
        .with_context(|| format!("failed to load gslib file: {}", input.display()))?;

    debug!(
        "{}: '{}', {} declared variable(s), {} data row(s)",
        input.display(),
        model.title,
        model.variable_names.len(),
        model.len()
    );

    let joints = apply_joint_attributes(&model, params)?;

    write_gslib(output, &joints)
        .with_context(|| format!("failed to write gslib file: {}", output.display()))?;

    Ok(joints.len())
}

/// Convert every `.gslib` file in a directory, in parallel.
///
/// Output files keep their input file names under `output_dir`. Files are
/// processed in sorted order for deterministic reporting; per-file
/// failures are reported and skipped so one bad file does not abort the
/// batch.
///
/// # Arguments
///
/// * `input_dir` - Directory containing `.gslib` files
/// * `output_dir` - Output directory (created if needed)
/// * `params` - Joint parameters; all four attribute columns must be
///   scalars, since per-row sequences cannot be aligned across files
/// * `limit` - Maximum number of files to process (None for all)
///
/// # Returns
///
/// The number of files converted successfully.
pub fn convert_batch(
    input_dir: &Path,
    output_dir: &Path,
    params: &JointParams,
    limit: Option<usize>,
) -> Result<usize> {
    if !params.is_scalar() {
        bail!("batch conversion requires scalar joint parameters");
    }

    let mut files: Vec<PathBuf> = fs::read_dir(input_dir)
        .with_context(|| format!("failed to read input directory: {}", input_dir.display()))?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("gslib"))
                .unwrap_or(false)
        })
        .collect();

    if files.is_empty() {
        bail!("no .gslib files found in {}", input_dir.display());
    }

    files.sort();
    if let Some(lim) = limit {
        files.truncate(lim);
    }

    let converted: usize = files
        .par_iter()
        .map(|src| {
            let dest = output_dir.join(src.file_name().unwrap_or_default());
            match convert_gslib(src, &dest, params) {
                Ok(rows) => {
                    println!(
                        "{} -> {} ({} rows)",
                        src.file_name().unwrap_or_default().to_string_lossy(),
                        dest.display(),
                        rows
                    );
                    1
                }
                Err(e) => {
                    eprintln!("failed to convert {}: {:#}", src.display(), e);
                    0
                }
            }
        })
        .sum();

    Ok(converted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transforms::ColumnValue;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn create_gslib(dir: &Path, name: &str, rows: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut file = File::create(&path).unwrap();

        writeln!(file, "Velocity Model").unwrap();
        writeln!(file, "7").unwrap();
        for var in [
            "i_index", "j_index", "k_index", "x_coord", "y_coord", "z_coord", "P-Velocity",
        ] {
            writeln!(file, "{}", var).unwrap();
        }
        for row in rows {
            writeln!(file, "{}", row).unwrap();
        }
        path
    }

    #[test]
    fn test_convert_gslib_worked_example() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_gslib(temp_dir.path(), "input.gslib", &["1 2 3 0.0 0.0 0.0 1500.0"]);
        let output = temp_dir.path().join("output.gslib");

        let params = JointParams {
            i_offset: 10,
            j_offset: 20,
            k_offset: 30,
            dip_angle: ColumnValue::Scalar(65.0),
            strike_angle: ColumnValue::Scalar(45.0),
            kn: ColumnValue::Scalar(8_000_000.0),
            ks: ColumnValue::Scalar(4_000_000.0),
        };

        let rows = convert_gslib(&input, &output, &params).unwrap();
        assert_eq!(rows, 1);

        let content = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = content.lines().collect();

        assert_eq!(lines[0], "Velocity Model");
        assert_eq!(lines[1], "10");

        let fields: Vec<&str> = lines[12].split_whitespace().collect();
        assert_eq!(fields[..3], ["11", "22", "33"]);
        assert_eq!(fields[3].parse::<f64>().unwrap(), 0.0);
        assert_eq!(fields[4].parse::<f64>().unwrap(), 0.0);
        assert_eq!(fields[5].parse::<f64>().unwrap(), 0.0);
        assert_eq!(fields[6].parse::<f64>().unwrap(), 65.0);
        assert_eq!(fields[7].parse::<f64>().unwrap(), 45.0);
        assert_eq!(fields[8].parse::<f64>().unwrap(), 8_000_000.0);
        assert_eq!(fields[9].parse::<f64>().unwrap(), 4_000_000.0);
    }

    #[test]
    fn test_convert_gslib_preserves_row_order_and_coords() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_gslib(
            temp_dir.path(),
            "input.gslib",
            &[
                "1 1 1 10.1234567 20.7654321 -5.5 1500.0",
                "2 2 2 11.0000001 21.9999999 -6.5 1600.0",
                "3 3 3 12.5 22.5 -7.5 1700.0",
            ],
        );
        let output = temp_dir.path().join("output.gslib");

        let rows = convert_gslib(&input, &output, &JointParams::default()).unwrap();
        assert_eq!(rows, 3);

        let content = std::fs::read_to_string(&output).unwrap();
        let data: Vec<Vec<f64>> = content
            .lines()
            .skip(12)
            .map(|l| l.split_whitespace().map(|f| f.parse().unwrap()).collect())
            .collect();

        assert_eq!(data.len(), 3);
        // Coordinates survive the 7-digit formatting round trip exactly.
        assert_eq!(data[0][3], 10.1234567);
        assert_eq!(data[0][4], 20.7654321);
        assert_eq!(data[1][3], 11.0000001);
        assert_eq!(data[1][4], 21.9999999);
        assert_eq!(data[2][5], -7.5);
        // Row order follows the input.
        assert_eq!(data[0][0], 1.0);
        assert_eq!(data[1][0], 2.0);
        assert_eq!(data[2][0], 3.0);
    }

    #[test]
    fn test_convert_gslib_per_row_sequences() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_gslib(
            temp_dir.path(),
            "input.gslib",
            &[
                "1 1 1 0.0 0.0 0.0 1500.0",
                "2 2 2 1.0 1.0 1.0 1600.0",
            ],
        );
        let output = temp_dir.path().join("output.gslib");

        let params = JointParams {
            dip_angle: ColumnValue::PerRow(vec![63.3361974, 62.2877453]),
            strike_angle: ColumnValue::PerRow(vec![33.4128399, 72.777585]),
            ..JointParams::default()
        };

        convert_gslib(&input, &output, &params).unwrap();

        let content = std::fs::read_to_string(&output).unwrap();
        let rows: Vec<Vec<&str>> = content
            .lines()
            .skip(12)
            .map(|l| l.split_whitespace().collect())
            .collect();

        assert_eq!(rows[0][6], "63.3361974");
        assert_eq!(rows[1][6], "62.2877453");
        assert_eq!(rows[0][7], "33.4128399");
        assert_eq!(rows[1][7], "72.7775850");
    }

    #[test]
    fn test_convert_gslib_length_mismatch_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = create_gslib(temp_dir.path(), "input.gslib", &["1 2 3 0.0 0.0 0.0 1500.0"]);
        let output = temp_dir.path().join("output.gslib");

        let params = JointParams {
            dip_angle: ColumnValue::PerRow(vec![1.0, 2.0, 3.0]),
            ..JointParams::default()
        };

        let result = convert_gslib(&input, &output, &params);

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_gslib_malformed_header_writes_nothing() {
        let temp_dir = TempDir::new().unwrap();
        let input = temp_dir.path().join("bad.gslib");
        std::fs::write(&input, "title\nnot-a-number\n").unwrap();
        let output = temp_dir.path().join("output.gslib");

        let result = convert_gslib(&input, &output, &JointParams::default());

        assert!(result.is_err());
        assert!(!output.exists());
    }

    #[test]
    fn test_convert_gslib_missing_input() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("output.gslib");

        let result = convert_gslib(
            &temp_dir.path().join("missing.gslib"),
            &output,
            &JointParams::default(),
        );

        assert!(result.is_err());
    }

    #[test]
    fn test_convert_batch() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("in");
        let output_dir = temp_dir.path().join("out");
        std::fs::create_dir_all(&input_dir).unwrap();

        create_gslib(&input_dir, "a.gslib", &["1 1 1 0.0 0.0 0.0 1500.0"]);
        create_gslib(&input_dir, "b.gslib", &["2 2 2 1.0 1.0 1.0 1600.0"]);
        // Non-gslib files are ignored.
        std::fs::write(input_dir.join("notes.txt"), "skip me").unwrap();

        let converted =
            convert_batch(&input_dir, &output_dir, &JointParams::default(), None).unwrap();

        assert_eq!(converted, 2);
        assert!(output_dir.join("a.gslib").exists());
        assert!(output_dir.join("b.gslib").exists());
    }

    #[test]
    fn test_convert_batch_limit() {
        let temp_dir = TempDir::new().unwrap();
        let input_dir = temp_dir.path().join("in");
        let output_dir = temp_dir.path().join("out");
        std::fs::create_dir_all(&input_dir).unwrap();

        create_gslib(&input_dir, "a.gslib", &["1 1 1 0.0 0.0 0.0 1500.0"]);
        create_gslib(&input_dir, "b.gslib", &["2 2 2 1.0 1.0 1.0 1600.0"]);

        let converted =
            convert_batch(&input_dir, &output_dir, &JointParams::default(), Some(1)).unwrap();

        // Sorted order, so only a.gslib is processed.
        assert_eq!(converted, 1);
        assert!(output_dir.join("a.gslib").exists());
        assert!(!output_dir.join("b.gslib").exists());
    }

    #[test]
    fn test_convert_batch_rejects_per_row_params() {
        let temp_dir = TempDir::new().unwrap();

        let params = JointParams {
            kn: ColumnValue::PerRow(vec![1.0]),
            ..JointParams::default()
        };

        let result = convert_batch(temp_dir.path(), temp_dir.path(), &params, None);

        assert!(result.is_err());
    }

    #[test]
    fn test_convert_batch_empty_dir() {
        let temp_dir = TempDir::new().unwrap();

        let result = convert_batch(
            temp_dir.path(),
            temp_dir.path(),
            &JointParams::default(),
            None,
        );

        assert!(result.is_err());
    }
}

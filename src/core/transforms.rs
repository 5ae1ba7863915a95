//! Joint attribute assignment for gslib velocity models.
//!
//! The transform takes a seven-column velocity model, shifts its grid
//! indices by constant offsets, drops the velocity column, and attaches
//! four joint-mechanical attributes (dip angle, strike angle, normal and
//! shear stiffness). Each attribute is either a single scalar applied to
//! every row or a per-row sequence aligned with row position.

use thiserror::Error;

use super::loaders::{JointModel, VelocityModel};

/// Errors that can occur while applying joint attributes.
#[derive(Error, Debug)]
pub enum TransformError {
    #[error(
        "column '{column}' has {actual} per-row value(s) but the input has {expected} data row(s)"
    )]
    ParameterLengthMismatch {
        column: &'static str,
        expected: usize,
        actual: usize,
    },
}

/// Result type for transform operations.
pub type Result<T> = std::result::Result<T, TransformError>;

/// A joint attribute column: one value for all rows, or one value per row.
///
/// Per-row sequences are indexed by row position and must match the data
/// row count exactly; [`JointParams::validate`] checks this once per
/// conversion, before any output is written.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValue {
    /// Single value applied to every row.
    Scalar(f64),
    /// One value per input data row, in row order.
    PerRow(Vec<f64>),
}

impl ColumnValue {
    /// Returns the value for the row at `idx`.
    ///
    /// For `PerRow` columns the sequence must already have been validated
    /// against the row count; out-of-range access is a caller bug.
    #[inline]
    pub fn resolve(&self, idx: usize) -> f64 {
        match self {
            ColumnValue::Scalar(value) => *value,
            ColumnValue::PerRow(values) => values[idx],
        }
    }

    /// Returns true for the scalar variant.
    #[inline]
    pub fn is_scalar(&self) -> bool {
        matches!(self, ColumnValue::Scalar(_))
    }

    fn check_len(&self, column: &'static str, expected: usize) -> Result<()> {
        if let ColumnValue::PerRow(values) = self {
            if values.len() != expected {
                return Err(TransformError::ParameterLengthMismatch {
                    column,
                    expected,
                    actual: values.len(),
                });
            }
        }
        Ok(())
    }
}

impl From<f64> for ColumnValue {
    fn from(value: f64) -> Self {
        ColumnValue::Scalar(value)
    }
}

impl From<Vec<f64>> for ColumnValue {
    fn from(values: Vec<f64>) -> Self {
        ColumnValue::PerRow(values)
    }
}

/// Parameter set for one conversion.
#[derive(Debug, Clone)]
pub struct JointParams {
    /// Offset added to every i index.
    pub i_offset: i32,
    /// Offset added to every j index.
    pub j_offset: i32,
    /// Offset added to every k index.
    pub k_offset: i32,
    /// Dip angle column, degrees.
    pub dip_angle: ColumnValue,
    /// Strike angle column, degrees.
    pub strike_angle: ColumnValue,
    /// Normal stiffness column.
    pub kn: ColumnValue,
    /// Shear stiffness column.
    pub ks: ColumnValue,
}

impl Default for JointParams {
    fn default() -> Self {
        Self {
            i_offset: 0,
            j_offset: 0,
            k_offset: 0,
            dip_angle: ColumnValue::Scalar(0.0),
            strike_angle: ColumnValue::Scalar(0.0),
            kn: ColumnValue::Scalar(8_000_000.0),
            ks: ColumnValue::Scalar(4_000_000.0),
        }
    }
}

impl JointParams {
    /// Checks every per-row sequence against the data row count.
    ///
    /// # Errors
    ///
    /// Returns `ParameterLengthMismatch` naming the first offending column.
    pub fn validate(&self, rows: usize) -> Result<()> {
        self.dip_angle.check_len("dip_angle", rows)?;
        self.strike_angle.check_len("strike_angle", rows)?;
        self.kn.check_len("KN", rows)?;
        self.ks.check_len("KS", rows)
    }

    /// Returns true if all four attribute columns are scalars.
    ///
    /// Batch conversion requires scalar parameters: a per-row sequence
    /// cannot be index-aligned across files of differing lengths.
    pub fn is_scalar(&self) -> bool {
        self.dip_angle.is_scalar()
            && self.strike_angle.is_scalar()
            && self.kn.is_scalar()
            && self.ks.is_scalar()
    }
}

/// Apply offsets and joint attributes to a velocity model.
///
/// Produces a ten-column joint model with the same row count and row order
/// as the input. Coordinates are carried through unchanged; the velocity
/// column is dropped. The input is not mutated.
///
/// # Errors
///
/// Returns `ParameterLengthMismatch` if a per-row sequence does not match
/// the data row count. No other failure mode exists; the mapping itself is
/// total.
pub fn apply_joint_attributes(model: &VelocityModel, params: &JointParams) -> Result<JointModel> {
    params.validate(model.len())?;

    let mut joints = JointModel::with_capacity(model.title.clone(), model.len());

    for idx in 0..model.len() {
        joints.push(
            model.i[idx] + params.i_offset,
            model.j[idx] + params.j_offset,
            model.k[idx] + params.k_offset,
            model.x[idx],
            model.y[idx],
            model.z[idx],
            params.dip_angle.resolve(idx),
            params.strike_angle.resolve(idx),
            params.kn.resolve(idx),
            params.ks.resolve(idx),
        );
    }

    Ok(joints)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model(rows: usize) -> VelocityModel {
        let mut model = VelocityModel::with_capacity("test".to_string(), Vec::new(), rows);
        for r in 0..rows {
            let f = r as f64;
            model.push(r as i32, r as i32 + 1, r as i32 + 2, f * 10.0, f * 20.0, -f, 1500.0 + f);
        }
        model
    }

    #[test]
    fn test_scalar_resolve() {
        let col = ColumnValue::Scalar(65.0);

        assert_eq!(col.resolve(0), 65.0);
        assert_eq!(col.resolve(999), 65.0);
    }

    #[test]
    fn test_per_row_resolve() {
        let col = ColumnValue::PerRow(vec![1.0, 2.0, 3.0]);

        assert_eq!(col.resolve(0), 1.0);
        assert_eq!(col.resolve(2), 3.0);
    }

    #[test]
    fn test_apply_scalar_params() {
        let model = sample_model(3);
        let params = JointParams {
            i_offset: 10,
            j_offset: 20,
            k_offset: 30,
            dip_angle: ColumnValue::Scalar(65.0),
            strike_angle: ColumnValue::Scalar(45.0),
            kn: ColumnValue::Scalar(8_000_000.0),
            ks: ColumnValue::Scalar(4_000_000.0),
        };

        let joints = apply_joint_attributes(&model, &params).unwrap();

        assert_eq!(joints.len(), 3);
        assert_eq!(joints.i, vec![10, 11, 12]);
        assert_eq!(joints.j, vec![21, 22, 23]);
        assert_eq!(joints.k, vec![32, 33, 34]);
        // Coordinates carried through unchanged.
        assert_eq!(joints.x, model.x);
        assert_eq!(joints.y, model.y);
        assert_eq!(joints.z, model.z);
        assert!(joints.dip.iter().all(|&d| d == 65.0));
        assert!(joints.strike.iter().all(|&s| s == 45.0));
        assert!(joints.kn.iter().all(|&v| v == 8_000_000.0));
        assert!(joints.ks.iter().all(|&v| v == 4_000_000.0));
    }

    #[test]
    fn test_apply_negative_and_zero_offsets() {
        let model = sample_model(2);
        let params = JointParams {
            i_offset: -5,
            j_offset: 0,
            k_offset: -100,
            ..JointParams::default()
        };

        let joints = apply_joint_attributes(&model, &params).unwrap();

        assert_eq!(joints.i, vec![-5, -4]);
        assert_eq!(joints.j, vec![1, 2]);
        assert_eq!(joints.k, vec![-98, -97]);
    }

    #[test]
    fn test_apply_per_row_params() {
        let model = sample_model(3);
        let params = JointParams {
            dip_angle: ColumnValue::PerRow(vec![63.3, 62.2, 61.1]),
            strike_angle: ColumnValue::PerRow(vec![33.4, 72.7, 12.9]),
            ..JointParams::default()
        };

        let joints = apply_joint_attributes(&model, &params).unwrap();

        assert_eq!(joints.dip, vec![63.3, 62.2, 61.1]);
        assert_eq!(joints.strike, vec![33.4, 72.7, 12.9]);
        // Scalar columns still uniform.
        assert!(joints.kn.iter().all(|&v| v == 8_000_000.0));
    }

    #[test]
    fn test_per_row_length_mismatch() {
        let model = sample_model(3);
        let params = JointParams {
            kn: ColumnValue::PerRow(vec![1.0, 2.0]),
            ..JointParams::default()
        };

        let err = apply_joint_attributes(&model, &params).unwrap_err();

        match err {
            TransformError::ParameterLengthMismatch {
                column,
                expected,
                actual,
            } => {
                assert_eq!(column, "KN");
                assert_eq!(expected, 3);
                assert_eq!(actual, 2);
            }
        }
    }

    #[test]
    fn test_empty_model() {
        let model = sample_model(0);

        let joints = apply_joint_attributes(&model, &JointParams::default()).unwrap();

        assert!(joints.is_empty());
    }

    #[test]
    fn test_is_scalar() {
        let mut params = JointParams::default();
        assert!(params.is_scalar());

        params.dip_angle = ColumnValue::PerRow(vec![1.0]);
        assert!(!params.is_scalar());
    }

    #[test]
    fn test_column_value_from_impls() {
        assert_eq!(ColumnValue::from(2.5), ColumnValue::Scalar(2.5));
        assert_eq!(
            ColumnValue::from(vec![1.0, 2.0]),
            ColumnValue::PerRow(vec![1.0, 2.0])
        );
    }
}

//! Core data types and I/O operations.

pub mod loaders;
pub mod transforms;
pub mod writers;

pub use loaders::{JointModel, VelocityModel};
pub use transforms::{apply_joint_attributes, ColumnValue, JointParams};
pub use writers::{write_gslib, write_points_csv, WriteError, OUTPUT_VARIABLES};

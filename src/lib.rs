//! Gslib point-attribute conversion pipeline.
//!
//! This crate provides tools for:
//! - Parsing seven-column gslib velocity models (grid indices,
//!   coordinates, P-velocity)
//! - Rewriting them as ten-column joint models with index offsets and
//!   scalar-or-per-row joint attributes (dip, strike, KN, KS)
//! - Exporting point data to CSV
//! - Rendering color-mapped 3D scatter plots
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use gslib_pipeline::core::transforms::{ColumnValue, JointParams};
//! use gslib_pipeline::processors::convert_gslib;
//!
//! let params = JointParams {
//!     i_offset: 55,
//!     j_offset: 94,
//!     k_offset: 137,
//!     dip_angle: ColumnValue::Scalar(65.0),
//!     strike_angle: ColumnValue::Scalar(45.0),
//!     kn: ColumnValue::Scalar(8_000_000.0),
//!     ks: ColumnValue::Scalar(4_000_000.0),
//! };
//! let rows = convert_gslib(
//!     Path::new("input.gslib"),
//!     Path::new("output.gslib"),
//!     &params,
//! ).unwrap();
//! println!("{} rows converted", rows);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod processors;
pub mod visualization;

pub use crate::config::{JointConfig, OffsetConfig, PipelineConfig, PlotConfig};
pub use crate::core::loaders::{JointModel, VelocityModel};
pub use crate::core::transforms::{ColumnValue, JointParams};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

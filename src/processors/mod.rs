//! Conversion and export pipelines.

pub mod convert;
pub mod export;

// Re-export key entry points for convenience
pub use convert::{convert_batch, convert_gslib};
pub use export::export_points;

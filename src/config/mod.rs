//! Configuration types for the gslib pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::visualization::Colormap;

/// Grid index offsets applied to every row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OffsetConfig {
    /// Offset added to i_index
    #[serde(default)]
    pub i: i32,

    /// Offset added to j_index
    #[serde(default)]
    pub j: i32,

    /// Offset added to k_index
    #[serde(default)]
    pub k: i32,
}

/// Default joint attribute values.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JointConfig {
    /// Dip angle in degrees
    #[serde(default)]
    pub dip_angle: f64,

    /// Strike angle in degrees
    #[serde(default)]
    pub strike_angle: f64,

    /// Normal stiffness
    #[serde(default = "default_kn")]
    pub kn: f64,

    /// Shear stiffness
    #[serde(default = "default_ks")]
    pub ks: f64,
}

fn default_kn() -> f64 {
    8_000_000.0
}

fn default_ks() -> f64 {
    4_000_000.0
}

impl Default for JointConfig {
    fn default() -> Self {
        Self {
            dip_angle: 0.0,
            strike_angle: 0.0,
            kn: default_kn(),
            ks: default_ks(),
        }
    }
}

/// Scatter plot settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlotConfig {
    /// Maximum points to plot before subsampling
    #[serde(default = "default_plot_max_points")]
    pub max_points: usize,

    /// Point radius in pixels
    #[serde(default = "default_point_size")]
    pub point_size: u32,

    /// Point transparency, 0.0 to 1.0
    #[serde(default = "default_alpha")]
    pub alpha: f64,

    /// Value-to-color mapping
    #[serde(default = "default_colormap")]
    pub colormap: Colormap,

    /// Image width in pixels
    #[serde(default = "default_width")]
    pub width: u32,

    /// Image height in pixels
    #[serde(default = "default_height")]
    pub height: u32,
}

fn default_plot_max_points() -> usize {
    1_000_000
}

fn default_point_size() -> u32 {
    3
}

fn default_alpha() -> f64 {
    0.6
}

fn default_colormap() -> Colormap {
    Colormap::Viridis
}

fn default_width() -> u32 {
    1600
}

fn default_height() -> u32 {
    1200
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            max_points: default_plot_max_points(),
            point_size: default_point_size(),
            alpha: default_alpha(),
            colormap: default_colormap(),
            width: default_width(),
            height: default_height(),
        }
    }
}

/// Main pipeline configuration combining all sub-configs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub offsets: OffsetConfig,

    #[serde(default)]
    pub joints: JointConfig,

    #[serde(default)]
    pub plot: PlotConfig,
}

impl PipelineConfig {
    /// Load configuration from a YAML file.
    pub fn from_yaml<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: PipelineConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a YAML file.
    pub fn to_yaml<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let content = serde_yaml::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

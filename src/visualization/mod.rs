//! Visualization tools for gslib point data.
//!
//! This module renders color-mapped 3D scatter plots of point data using
//! the plotters library. Values are mapped onto a colormap and a vertical
//! gradient strip is drawn alongside the cloud as a color scale. Captions
//! and axis labels are not rendered; headless targets lack the fonts they
//! would need, so the corresponding options are carried for API
//! compatibility only.

use std::path::Path;
use std::str::FromStr;

use plotters::prelude::*;
use plotters::style::colors::colormaps::{Bone, ColorMap, Copper, ViridisRGB, VulcanoHSL};
use plotters_bitmap::BitMapBackend;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur during visualization.
#[derive(Error, Debug)]
pub enum VisualizationError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("plotting error: {0}")]
    Plotting(String),

    #[error("empty point set")]
    EmptyInput,

    #[error(
        "array length mismatch: x={x_len}, y={y_len}, z={z_len}, values={values_len}"
    )]
    LengthMismatch {
        x_len: usize,
        y_len: usize,
        z_len: usize,
        values_len: usize,
    },
}

/// Result type for visualization operations.
pub type Result<T> = std::result::Result<T, VisualizationError>;

/// Number of segments in the color-scale strip.
const COLORBAR_STEPS: usize = 128;

/// Width in pixels reserved for the color-scale strip.
const COLORBAR_WIDTH: u32 = 90;

/// Supported value-to-color mappings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Colormap {
    Viridis,
    Bone,
    Copper,
    Vulcano,
}

impl Colormap {
    /// Sample the colormap at `t` in [0, 1] with the given alpha.
    pub fn sample(&self, t: f64, alpha: f64) -> RGBAColor {
        let h = t.clamp(0.0, 1.0) as f32;
        let color = match self {
            Colormap::Viridis => ViridisRGB.get_color(h).to_rgba(),
            Colormap::Bone => Bone.get_color(h).to_rgba(),
            Colormap::Copper => Copper.get_color(h).to_rgba(),
            Colormap::Vulcano => VulcanoHSL.get_color(h).to_rgba(),
        };
        RGBAColor(color.0, color.1, color.2, alpha)
    }
}

impl FromStr for Colormap {
    type Err = String;

    fn from_str(name: &str) -> std::result::Result<Self, Self::Err> {
        match name.to_ascii_lowercase().as_str() {
            "viridis" => Ok(Colormap::Viridis),
            "bone" => Ok(Colormap::Bone),
            "copper" => Ok(Colormap::Copper),
            "vulcano" => Ok(Colormap::Vulcano),
            other => Err(format!(
                "unknown colormap '{}' (expected viridis, bone, copper, or vulcano)",
                other
            )),
        }
    }
}

impl std::fmt::Display for Colormap {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Colormap::Viridis => "viridis",
            Colormap::Bone => "bone",
            Colormap::Copper => "copper",
            Colormap::Vulcano => "vulcano",
        };
        f.write_str(name)
    }
}

/// Display options for scatter plots.
#[derive(Debug, Clone)]
pub struct PlotOptions {
    /// Plot title (not rendered, see module docs).
    pub title: String,
    /// Color-scale label (not rendered, see module docs).
    pub color_label: String,
    /// Value-to-color mapping.
    pub colormap: Colormap,
    /// Point radius in pixels.
    pub point_size: u32,
    /// Point transparency, 0.0 to 1.0.
    pub alpha: f64,
    /// Maximum number of points to plot (subsamples if exceeded).
    pub max_points: usize,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl Default for PlotOptions {
    fn default() -> Self {
        Self {
            title: "3D Point Cloud".to_string(),
            color_label: "Values".to_string(),
            colormap: Colormap::Viridis,
            point_size: 3,
            alpha: 0.6,
            max_points: 1_000_000,
            width: 1600,
            height: 1200,
        }
    }
}

/// Render a color-mapped 3D scatter plot to a PNG file.
///
/// Takes four equal-length sequences: point coordinates and the values
/// that drive the color mapping. Inputs are not mutated. Points beyond
/// `options.max_points` are dropped by regular stride subsampling.
///
/// # Errors
///
/// Returns `LengthMismatch` if the sequences differ in length,
/// `EmptyInput` if they are empty, and `Plotting` if the backend fails.
pub fn scatter_3d(
    output_path: &Path,
    x: &[f64],
    y: &[f64],
    z: &[f64],
    values: &[f64],
    options: &PlotOptions,
) -> Result<()> {
    if x.len() != y.len() || x.len() != z.len() || x.len() != values.len() {
        return Err(VisualizationError::LengthMismatch {
            x_len: x.len(),
            y_len: y.len(),
            z_len: z.len(),
            values_len: values.len(),
        });
    }
    if x.is_empty() {
        return Err(VisualizationError::EmptyInput);
    }

    let n = x.len();
    let step = if n > options.max_points {
        n / options.max_points
    } else {
        1
    };

    let (v_min, v_max) = min_max(values);
    let v_span = v_max - v_min;

    // Collect points with their colors, subsampled.
    let alpha = options.alpha.clamp(0.0, 1.0);
    let mut points: Vec<(f64, f64, f64, RGBAColor)> = Vec::with_capacity(n / step + 1);
    for idx in (0..n).step_by(step) {
        let t = if v_span > 0.0 {
            (values[idx] - v_min) / v_span
        } else {
            0.5
        };
        points.push((x[idx], y[idx], z[idx], options.colormap.sample(t, alpha)));
    }

    let (x_min, x_max) = padded_range(x);
    let (y_min, y_max) = padded_range(y);
    let (z_min, z_max) = padded_range(z);

    let root = BitMapBackend::new(output_path, (options.width, options.height)).into_drawing_area();
    root.fill(&WHITE)
        .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    let (cloud_area, bar_area) =
        root.split_horizontally((options.width.saturating_sub(COLORBAR_WIDTH)) as i32);

    let mut chart = ChartBuilder::on(&cloud_area)
        .margin(20)
        .build_cartesian_3d(x_min..x_max, y_min..y_max, z_min..z_max)
        .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    chart
        .draw_series(
            points
                .iter()
                .map(|&(px, py, pz, color)| {
                    Circle::new((px, py, pz), options.point_size as i32, color.filled())
                }),
        )
        .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    draw_colorbar(&bar_area, options)?;

    root.present()
        .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    Ok(())
}

/// Draw the vertical color-scale strip, low values at the bottom.
fn draw_colorbar<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    options: &PlotOptions,
) -> Result<()> {
    let mut bar = ChartBuilder::on(area)
        .margin(20)
        .build_cartesian_2d(0.0..1.0, 0.0..1.0)
        .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    bar.draw_series((0..COLORBAR_STEPS).map(|s| {
        let t0 = s as f64 / COLORBAR_STEPS as f64;
        let t1 = (s + 1) as f64 / COLORBAR_STEPS as f64;
        Rectangle::new(
            [(0.0, t0), (1.0, t1)],
            options.colormap.sample(t0, 1.0).filled(),
        )
    }))
    .map_err(|e| VisualizationError::Plotting(e.to_string()))?;

    Ok(())
}

/// Min and max of a non-empty slice.
fn min_max(values: &[f64]) -> (f64, f64) {
    let mut lo = f64::MAX;
    let mut hi = f64::MIN;
    for &v in values {
        if v < lo {
            lo = v;
        }
        if v > hi {
            hi = v;
        }
    }
    (lo, hi)
}

/// Axis range with 5% padding; degenerate ranges are widened.
fn padded_range(values: &[f64]) -> (f64, f64) {
    let (mut lo, mut hi) = min_max(values);
    if (hi - lo).abs() < f64::EPSILON {
        lo -= 1.0;
        hi += 1.0;
    }
    let pad = (hi - lo) * 0.05;
    (lo - pad, hi + pad)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_scatter_3d_writes_png() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("cloud.png");

        let x = vec![0.0, 1.0, 2.0, 3.0];
        let y = vec![0.0, 1.0, 0.0, 1.0];
        let z = vec![-1.0, -2.0, -3.0, -4.0];
        let values = vec![1500.0, 1550.0, 1600.0, 1650.0];

        let options = PlotOptions {
            width: 320,
            height: 240,
            ..PlotOptions::default()
        };

        scatter_3d(&path, &x, &y, &z, &values, &options).unwrap();

        assert!(path.exists());
        assert!(std::fs::metadata(&path).unwrap().len() > 0);
    }

    #[test]
    fn test_scatter_3d_uniform_values() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("flat.png");

        let coords = vec![0.0, 1.0, 2.0];
        let values = vec![1500.0; 3];

        let options = PlotOptions {
            width: 320,
            height: 240,
            ..PlotOptions::default()
        };

        scatter_3d(&path, &coords, &coords, &coords, &values, &options).unwrap();

        assert!(path.exists());
    }

    #[test]
    fn test_scatter_3d_length_mismatch() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("bad.png");

        let err = scatter_3d(
            &path,
            &[0.0, 1.0],
            &[0.0],
            &[0.0, 1.0],
            &[1.0, 2.0],
            &PlotOptions::default(),
        )
        .unwrap_err();

        assert!(matches!(err, VisualizationError::LengthMismatch { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_scatter_3d_empty_input() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.png");

        let err = scatter_3d(&path, &[], &[], &[], &[], &PlotOptions::default()).unwrap_err();

        assert!(matches!(err, VisualizationError::EmptyInput));
    }

    #[test]
    fn test_colormap_round_trip_names() {
        for name in ["viridis", "bone", "copper", "vulcano"] {
            let cmap: Colormap = name.parse().unwrap();
            assert_eq!(cmap.to_string(), name);
        }
        assert!("jet".parse::<Colormap>().is_err());
    }

    #[test]
    fn test_colormap_sample_clamps() {
        let low = Colormap::Viridis.sample(-1.0, 1.0);
        let zero = Colormap::Viridis.sample(0.0, 1.0);
        assert_eq!((low.0, low.1, low.2), (zero.0, zero.1, zero.2));

        let high = Colormap::Viridis.sample(2.0, 0.5);
        assert_eq!(high.3, 0.5);
    }
}

//! Command-line interface for the gslib pipeline.

use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use log::{error, info, warn};
use std::path::PathBuf;
use std::time::Instant;

use crate::config::PipelineConfig;
use crate::core::loaders::{load_gslib, load_value_series};
use crate::core::transforms::{ColumnValue, JointParams};
use crate::processors::{convert_batch, convert_gslib, export_points};
use crate::visualization::{scatter_3d, Colormap, PlotOptions};

#[derive(Parser)]
#[command(name = "gslib-pipeline")]
#[command(about = "Gslib point-attribute conversion pipeline", version)]
pub struct Cli {
    /// Path to YAML config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a 7-column velocity gslib file to a 10-column joint file
    Convert {
        /// Input gslib file (or directory in batch mode)
        input_path: PathBuf,
        /// Output gslib file (or directory in batch mode)
        output_path: PathBuf,
        /// Offset added to every i_index
        #[arg(long)]
        i_offset: Option<i32>,
        /// Offset added to every j_index
        #[arg(long)]
        j_offset: Option<i32>,
        /// Offset added to every k_index
        #[arg(long)]
        k_offset: Option<i32>,
        /// Dip angle in degrees, applied to every row
        #[arg(long)]
        dip: Option<f64>,
        /// Strike angle in degrees, applied to every row
        #[arg(long)]
        strike: Option<f64>,
        /// Normal stiffness, applied to every row
        #[arg(long)]
        kn: Option<f64>,
        /// Shear stiffness, applied to every row
        #[arg(long)]
        ks: Option<f64>,
        /// File with one dip angle per data row (overrides --dip)
        #[arg(long)]
        dip_file: Option<PathBuf>,
        /// File with one strike angle per data row (overrides --strike)
        #[arg(long)]
        strike_file: Option<PathBuf>,
        /// File with one normal stiffness per data row (overrides --kn)
        #[arg(long)]
        kn_file: Option<PathBuf>,
        /// File with one shear stiffness per data row (overrides --ks)
        #[arg(long)]
        ks_file: Option<PathBuf>,
        /// Process every .gslib file in the input directory
        #[arg(long)]
        batch: bool,
        /// Limit number of files to process in batch mode
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Export a 7-column gslib file as an x,y,z,velocity CSV
    Export {
        /// Input gslib file
        input_path: PathBuf,
        /// Output CSV file
        output_path: PathBuf,
    },

    /// Render a gslib file as a velocity-colored 3D scatter plot (PNG)
    Visualize {
        /// Input gslib file
        input_path: PathBuf,
        /// Output PNG file path (defaults to same name with .png extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Maximum number of points to plot (subsamples if exceeded)
        #[arg(long)]
        max_points: Option<usize>,
        /// Alpha/transparency value for points (0.0 to 1.0)
        #[arg(long)]
        alpha: Option<f64>,
        /// Point radius in pixels
        #[arg(long)]
        point_size: Option<u32>,
        /// Colormap name (viridis, bone, copper, vulcano)
        #[arg(long)]
        cmap: Option<Colormap>,
        /// Title for the plot
        #[arg(long)]
        title: Option<String>,
    },
}

/// Create a spinner for indeterminate operations
fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(80));
    pb
}

/// Print a summary box
fn print_summary(title: &str, items: &[(&str, String)]) {
    println!();
    println!("╔══════════════════════════════════════════════════════════════╗");
    println!("║ {:<62} ║", title);
    println!("╠══════════════════════════════════════════════════════════════╣");
    for (key, value) in items {
        let display_value = if value.len() > 41 {
            format!("{}...", &value[..38])
        } else {
            value.clone()
        };
        println!("║ {:<18}: {:<41} ║", key, display_value);
    }
    println!("╚══════════════════════════════════════════════════════════════╝");
    println!();
}

pub fn run() {
    let cli = Cli::parse();

    // Initialize logging based on verbosity (must come first)
    env_logger::Builder::new()
        .filter_level(match cli.verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            _ => log::LevelFilter::Debug,
        })
        .format_timestamp_secs()
        .init();

    // Load config
    let config = match &cli.config {
        Some(path) => match PipelineConfig::from_yaml(path) {
            Ok(cfg) => {
                info!("Loaded config from: {}", path.display());
                cfg
            }
            Err(e) => {
                warn!(
                    "Failed to load config from {}: {}, using defaults",
                    path.display(),
                    e
                );
                PipelineConfig::default()
            }
        },
        None => PipelineConfig::default(),
    };

    match cli.command {
        Commands::Convert {
            input_path,
            output_path,
            i_offset,
            j_offset,
            k_offset,
            dip,
            strike,
            kn,
            ks,
            dip_file,
            strike_file,
            kn_file,
            ks_file,
            batch,
            limit,
        } => {
            let params = match build_params(
                &config, i_offset, j_offset, k_offset, dip, strike, kn, ks, dip_file,
                strike_file, kn_file, ks_file,
            ) {
                Ok(p) => p,
                Err(e) => {
                    error!("Invalid parameters: {:#}", e);
                    std::process::exit(1);
                }
            };
            cmd_convert(&input_path, &output_path, &params, batch, limit);
        }
        Commands::Export {
            input_path,
            output_path,
        } => {
            cmd_export(&input_path, &output_path);
        }
        Commands::Visualize {
            input_path,
            output,
            max_points,
            alpha,
            point_size,
            cmap,
            title,
        } => {
            cmd_visualize(
                &input_path,
                output,
                max_points,
                alpha,
                point_size,
                cmap,
                title,
                &config,
            );
        }
    }
}

/// Resolve one attribute column from an optional value file and an
/// optional scalar override, falling back to the configured default.
fn resolve_column(
    file: Option<PathBuf>,
    scalar: Option<f64>,
    default: f64,
) -> anyhow::Result<ColumnValue> {
    match file {
        Some(path) => {
            let values = load_value_series(&path)?;
            Ok(ColumnValue::PerRow(values))
        }
        None => Ok(ColumnValue::Scalar(scalar.unwrap_or(default))),
    }
}

#[allow(clippy::too_many_arguments)]
fn build_params(
    config: &PipelineConfig,
    i_offset: Option<i32>,
    j_offset: Option<i32>,
    k_offset: Option<i32>,
    dip: Option<f64>,
    strike: Option<f64>,
    kn: Option<f64>,
    ks: Option<f64>,
    dip_file: Option<PathBuf>,
    strike_file: Option<PathBuf>,
    kn_file: Option<PathBuf>,
    ks_file: Option<PathBuf>,
) -> anyhow::Result<JointParams> {
    Ok(JointParams {
        i_offset: i_offset.unwrap_or(config.offsets.i),
        j_offset: j_offset.unwrap_or(config.offsets.j),
        k_offset: k_offset.unwrap_or(config.offsets.k),
        dip_angle: resolve_column(dip_file, dip, config.joints.dip_angle)?,
        strike_angle: resolve_column(strike_file, strike, config.joints.strike_angle)?,
        kn: resolve_column(kn_file, kn, config.joints.kn)?,
        ks: resolve_column(ks_file, ks, config.joints.ks)?,
    })
}

fn cmd_convert(
    input_path: &PathBuf,
    output_path: &PathBuf,
    params: &JointParams,
    batch: bool,
    limit: Option<usize>,
) {
    let start = Instant::now();

    if batch {
        println!("Converting gslib files in batch mode...");
        println!("Input directory: {}", input_path.display());
        println!("Output directory: {}", output_path.display());

        if let Some(lim) = limit {
            println!("Processing limit: {} files", lim);
        }

        match convert_batch(input_path, output_path, params, limit) {
            Ok(files) => {
                print_summary(
                    "Batch Conversion Complete",
                    &[
                        ("Input directory", input_path.display().to_string()),
                        ("Output directory", output_path.display().to_string()),
                        ("Files converted", files.to_string()),
                        ("Duration", format!("{:.2?}", start.elapsed())),
                    ],
                );
            }
            Err(e) => {
                error!("Batch conversion failed: {:#}", e);
                std::process::exit(1);
            }
        }
    } else {
        println!("Converting single file...");
        println!("Input: {}", input_path.display());
        println!("Output: {}", output_path.display());

        let spinner = create_spinner("Converting to joint attributes...");

        match convert_gslib(input_path, output_path, params) {
            Ok(rows) => {
                spinner.finish_and_clear();

                print_summary(
                    "Conversion Complete",
                    &[
                        ("Input file", input_path.display().to_string()),
                        ("Output file", output_path.display().to_string()),
                        ("Rows converted", rows.to_string()),
                        (
                            "Offsets",
                            format!(
                                "i={}, j={}, k={}",
                                params.i_offset, params.j_offset, params.k_offset
                            ),
                        ),
                        ("Duration", format!("{:.2?}", start.elapsed())),
                    ],
                );
            }
            Err(e) => {
                spinner.finish_and_clear();
                error!("Conversion failed: {:#}", e);
                std::process::exit(1);
            }
        }
    }
}

fn cmd_export(input_path: &PathBuf, output_path: &PathBuf) {
    let start = Instant::now();

    println!("Exporting points to CSV...");
    println!("Input: {}", input_path.display());
    println!("Output: {}", output_path.display());

    let spinner = create_spinner("Exporting point data...");

    match export_points(input_path, output_path) {
        Ok(points) => {
            spinner.finish_and_clear();

            print_summary(
                "Export Complete",
                &[
                    ("Input file", input_path.display().to_string()),
                    ("Output CSV", output_path.display().to_string()),
                    ("Points exported", points.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Export failed: {:#}", e);
            std::process::exit(1);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn cmd_visualize(
    input_path: &PathBuf,
    output: Option<PathBuf>,
    max_points: Option<usize>,
    alpha: Option<f64>,
    point_size: Option<u32>,
    cmap: Option<Colormap>,
    title: Option<String>,
    config: &PipelineConfig,
) {
    let start = Instant::now();

    // Determine output path (default to same name as input with .png extension)
    let output_path = output.unwrap_or_else(|| {
        let mut path = input_path.clone();
        path.set_extension("png");
        path
    });

    // Determine title (default to filename)
    let plot_title = title.unwrap_or_else(|| {
        input_path
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_else(|| "Point Cloud".to_string())
    });

    let options = PlotOptions {
        title: plot_title,
        color_label: "P-Velocity".to_string(),
        colormap: cmap.unwrap_or(config.plot.colormap),
        point_size: point_size.unwrap_or(config.plot.point_size),
        alpha: alpha.unwrap_or(config.plot.alpha),
        max_points: max_points.unwrap_or(config.plot.max_points),
        width: config.plot.width,
        height: config.plot.height,
    };

    println!("Visualizing gslib point data...");
    println!("Input: {}", input_path.display());
    println!("Output: {}", output_path.display());
    println!("Colormap: {}", options.colormap);

    let spinner = create_spinner("Loading gslib file...");

    let model = match load_gslib(input_path) {
        Ok(m) => m,
        Err(e) => {
            spinner.finish_and_clear();
            error!("Failed to load gslib file: {}", e);
            std::process::exit(1);
        }
    };

    spinner.set_message("Generating plot...");

    match scatter_3d(
        &output_path,
        &model.x,
        &model.y,
        &model.z,
        &model.velocity,
        &options,
    ) {
        Ok(()) => {
            spinner.finish_and_clear();

            print_summary(
                "Visualization Complete",
                &[
                    ("Input file", input_path.display().to_string()),
                    ("Output PNG", output_path.display().to_string()),
                    ("Points in file", model.len().to_string()),
                    ("Max points plotted", options.max_points.to_string()),
                    ("Colormap", options.colormap.to_string()),
                    ("Alpha", options.alpha.to_string()),
                    ("Duration", format!("{:.2?}", start.elapsed())),
                ],
            );
        }
        Err(e) => {
            spinner.finish_and_clear();
            error!("Visualization failed: {}", e);
            std::process::exit(1);
        }
    }
}

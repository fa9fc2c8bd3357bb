//! wsi-pyramid - Pyramid assembly and slide geometry for DICOM WSI series.
//!
//! This binary assembles a pyramid from a metadata JSON file and reports the
//! derived geometry, or resolves a single tile address to a frame location.

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use serde::Serialize;
use tracing::error;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

use wsi_pyramid::{
    config::{CheckConfig, Cli, Command, LookupConfig},
    Pyramid, RawImageMetadata,
};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.into_command() {
        Command::Check(config) => run_check(config),
        Command::Lookup(config) => run_lookup(config),
    }
}

/// Initialize the tracing/logging subsystem.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "wsi_pyramid=debug"
    } else {
        "wsi_pyramid=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Read and assemble a pyramid from a metadata JSON file.
fn load_pyramid(path: &Path) -> Result<Pyramid, String> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let records: Vec<RawImageMetadata> = serde_json::from_str(&contents)
        .map_err(|e| format!("cannot parse {}: {}", path.display(), e))?;
    Pyramid::assemble(&records).map_err(|e| e.to_string())
}

// =============================================================================
// Check Command
// =============================================================================

/// One row of the machine-readable check report.
#[derive(Debug, Serialize)]
struct LevelReport {
    level: usize,
    sop_instance_uid: String,
    total_pixel_matrix: (u32, u32),
    tile_size: (u32, u32),
    grid_size: (u32, u32),
    resolution: f64,
    number_of_frames: u32,
}

/// The machine-readable check report.
#[derive(Debug, Serialize)]
struct PyramidReport {
    levels: Vec<LevelReport>,
    extent: [f64; 4],
    rotation_degrees: u32,
}

fn run_check(config: CheckConfig) -> ExitCode {
    init_logging(config.verbose);

    let pyramid = match load_pyramid(&config.metadata) {
        Ok(pyramid) => pyramid,
        Err(e) => {
            error!("Failed to assemble pyramid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = PyramidReport {
        levels: pyramid
            .levels()
            .iter()
            .enumerate()
            .map(|(index, level)| LevelReport {
                level: index,
                sop_instance_uid: level.metadata.sop_instance_uid.clone(),
                total_pixel_matrix: (
                    level.metadata.total_pixel_matrix_columns,
                    level.metadata.total_pixel_matrix_rows,
                ),
                tile_size: level.tile_size,
                grid_size: level.grid_size,
                resolution: level.resolution,
                number_of_frames: level.metadata.number_of_frames,
            })
            .collect(),
        extent: pyramid.extent(),
        rotation_degrees: pyramid.rotation().degrees(),
    };

    if config.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                error!("Failed to serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
        return ExitCode::SUCCESS;
    }

    println!("Pyramid levels (coarse to fine):");
    println!(
        "  {:<5} {:>14} {:>10} {:>9} {:>12} {:>7}",
        "level", "matrix", "tile", "grid", "resolution", "frames"
    );
    for row in &report.levels {
        println!(
            "  {:<5} {:>6} x {:<5} {:>4}x{:<4} {:>4} x {:<3} {:>12.4} {:>7}",
            row.level,
            row.total_pixel_matrix.0,
            row.total_pixel_matrix.1,
            row.tile_size.0,
            row.tile_size.1,
            row.grid_size.0,
            row.grid_size.1,
            row.resolution,
            row.number_of_frames,
        );
    }
    println!();
    println!("  Extent:   {:?}", report.extent);
    println!("  Rotation: {} degrees", report.rotation_degrees);
    println!();
    println!("✓ Assembled {} level(s)", report.levels.len());

    ExitCode::SUCCESS
}

// =============================================================================
// Lookup Command
// =============================================================================

fn run_lookup(config: LookupConfig) -> ExitCode {
    init_logging(config.verbose);

    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let pyramid = match load_pyramid(&config.metadata) {
        Ok(pyramid) => pyramid,
        Err(e) => {
            error!("Failed to assemble pyramid: {}", e);
            return ExitCode::FAILURE;
        }
    };

    if let Some(ref base_url) = config.base_url {
        let base = match Url::parse(base_url) {
            Ok(base) => base,
            Err(e) => {
                error!("Invalid base URL {}: {}", base_url, e);
                return ExitCode::FAILURE;
            }
        };
        match pyramid.frame_url(&base, config.level, config.column, config.row) {
            Some(url) => {
                println!("{}", url);
                ExitCode::SUCCESS
            }
            None => {
                error!(
                    "tile {}-{} not found at level {}",
                    config.column, config.row, config.level
                );
                ExitCode::FAILURE
            }
        }
    } else {
        match pyramid.frame_location(config.level, config.column, config.row) {
            Some(location) => {
                println!("{}", location);
                ExitCode::SUCCESS
            }
            None => {
                error!(
                    "tile {}-{} not found at level {}",
                    config.column, config.row, config.level
                );
                ExitCode::FAILURE
            }
        }
    }
}

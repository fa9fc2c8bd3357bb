//! Command-line configuration for the wsi-pyramid inspection tool.
//!
//! The binary operates on a JSON file holding an array of per-instance
//! metadata records in natural-name form, as returned by a DICOMweb series
//! metadata query.
//!
//! # Environment Variables
//!
//! - `WSI_DICOMWEB_URL` - DICOMweb base URL used to expand frame locations
//!   into full retrieval URLs

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

// =============================================================================
// CLI
// =============================================================================

/// wsi-pyramid - Pyramid assembly and slide geometry for DICOM WSI series.
///
/// Assembles a multi-resolution pyramid from per-instance metadata, reports
/// the derived geometry, and resolves tile addresses to frame locations.
#[derive(Parser, Debug, Clone)]
#[command(name = "wsi-pyramid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Command,
}

impl Cli {
    /// Consume the CLI arguments into the selected command.
    pub fn into_command(self) -> Command {
        self.command
    }
}

/// Available subcommands.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Assemble the pyramid and report per-level geometry
    Check(CheckConfig),

    /// Resolve one tile address to its frame storage location
    Lookup(LookupConfig),
}

// =============================================================================
// Check Command
// =============================================================================

/// Configuration for the `check` command.
#[derive(Args, Debug, Clone)]
pub struct CheckConfig {
    /// Path to a JSON array of per-instance metadata records.
    pub metadata: PathBuf,

    /// Emit the report as JSON instead of a table.
    #[arg(long, default_value_t = false)]
    pub json: bool,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

// =============================================================================
// Lookup Command
// =============================================================================

/// Configuration for the `lookup` command.
#[derive(Args, Debug, Clone)]
pub struct LookupConfig {
    /// Path to a JSON array of per-instance metadata records.
    pub metadata: PathBuf,

    /// Pyramid level index (0 = coarsest).
    #[arg(long)]
    pub level: usize,

    /// Tile column (1-based).
    #[arg(long)]
    pub column: u32,

    /// Tile row (1-based).
    #[arg(long)]
    pub row: u32,

    /// DICOMweb base URL; when set, the location is expanded to a full
    /// WADO-RS retrieval URL.
    #[arg(long, env = "WSI_DICOMWEB_URL")]
    pub base_url: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl LookupConfig {
    /// Validate the configuration and return an error message if invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.column == 0 || self.row == 0 {
            return Err("tile addresses are 1-based: --column and --row must be >= 1".to_string());
        }
        Ok(())
    }
}

// =============================================================================
// Tests
// =============================================================================

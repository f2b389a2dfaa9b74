use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use gdiv::Connectivity;

#[derive(Parser)]
#[command(name = "gdiv", version, about = "GDIV landscape metrics CLI")]
pub struct CliArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub scan: ScanArgs,

    /// Enable debug logging (otherwise RUST_LOG, default info)
    #[arg(long, global = true, default_value_t = false)]
    pub log: bool,

    /// Stop at the first raster that fails for a reason other than missing data
    #[arg(long, global = true, default_value_t = false)]
    pub fail_fast: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Mean, population standard deviation, min and max of valid cells
    Dispersion {
        /// Input rasters
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Shannon diversity and per-class proportions
    Diversity {
        /// Input rasters
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Whitelisted class codes, comma separated; output follows this order
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        classes: Vec<f64>,
    },
    /// Landscape shape index
    Shape {
        /// Input rasters
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Restrict the participating classes (comma separated)
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        classes: Vec<f64>,
    },
    /// Mean patch shape index (loads each raster's class grid into memory)
    Patches {
        /// Input rasters
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Dispersion, diversity and LSI from one scan per raster
    Profile {
        /// Input rasters
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Whitelisted class codes, comma separated
        #[arg(long, value_delimiter = ',', required = true, allow_hyphen_values = true)]
        classes: Vec<f64>,
    },
}

#[derive(Args)]
pub struct ScanArgs {
    /// JSON file with scan options; flags below override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// No-data value for rasters that declare none
    #[arg(long, global = true, allow_hyphen_values = true)]
    pub nodata: Option<f64>,

    /// Strip height in rows for rasters too large to read at once
    #[arg(long, global = true)]
    pub window_rows: Option<usize>,

    /// Read strips matching the band's native block height
    #[arg(long, global = true, default_value_t = false)]
    pub native_blocks: bool,

    /// Rasters whose f64 footprint fits this many MiB are read in one strip
    #[arg(long, global = true)]
    pub max_full_read_mb: Option<u64>,

    /// Patch connectivity (4 or 8)
    #[arg(long, global = true, value_enum)]
    pub connectivity: Option<Connectivity>,
}

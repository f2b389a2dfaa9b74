use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use gdiv::{
    BatchEntry, ClassWhitelist, Result as QueryResult, ScanOptions, query_dispersion,
    query_diversity, query_landscape, query_many, query_patch_shape, query_shape_index,
};

use super::args::{CliArgs, Command, ScanArgs};
use super::errors::AppError;

fn init_logging(debug: bool) {
    let filter = if debug {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    // stdout carries the JSON results
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_options(args: &ScanArgs) -> Result<ScanOptions, AppError> {
    let mut opts = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)?;
            serde_json::from_str(&text).map_err(|source| AppError::InvalidConfig {
                path: path.display().to_string(),
                source,
            })?
        }
        None => ScanOptions::default(),
    };

    if let Some(nd) = args.nodata {
        opts.nodata_override = Some(nd);
    }
    if let Some(rows) = args.window_rows {
        opts.window_rows = rows;
    }
    if args.native_blocks {
        opts.use_native_blocks = true;
    }
    if let Some(mb) = args.max_full_read_mb {
        opts.max_bytes_full_read = mb.saturating_mul(1024 * 1024);
    }
    if let Some(conn) = args.connectivity {
        opts.connectivity = conn;
    }
    opts.validate()?;
    Ok(opts)
}

/// Run `query` over `paths` and print one JSON line per raster.
fn emit<T, F>(paths: &[PathBuf], query: F, fail_fast: bool) -> Result<(), AppError>
where
    T: Send + Serialize,
    F: Fn(&Path) -> QueryResult<T> + Sync,
{
    let (entries, report): (Vec<BatchEntry<T>>, _) = query_many(paths, query, !fail_fast)?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for entry in &entries {
        writeln!(out, "{}", serde_json::to_string(entry)?)?;
    }
    out.flush()?;

    info!("Processed: {}", report.processed);
    info!("No valid data: {}", report.no_data);
    info!("Errors: {}", report.errors);
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    init_logging(args.log);

    let opts = resolve_options(&args.scan)?;
    debug!("Scan options: {:?}", opts);
    let opts = &opts;

    match &args.command {
        Command::Dispersion { paths } => {
            emit(paths, |p| query_dispersion(p, opts), args.fail_fast)?;
        }
        Command::Diversity { paths, classes } => {
            // reject a bad whitelist once, up front, instead of per raster
            ClassWhitelist::from_values(classes)?;
            emit(paths, |p| query_diversity(p, classes, opts), args.fail_fast)?;
        }
        Command::Shape { paths, classes } => {
            let whitelist = if classes.is_empty() {
                None
            } else {
                Some(ClassWhitelist::from_values(classes)?)
            };
            emit(
                paths,
                |p| query_shape_index(p, whitelist.as_ref(), opts),
                args.fail_fast,
            )?;
        }
        Command::Patches { paths } => {
            emit(paths, |p| query_patch_shape(p, opts), args.fail_fast)?;
        }
        Command::Profile { paths, classes } => {
            let whitelist = ClassWhitelist::from_values(classes)?;
            emit(
                paths,
                |p| query_landscape(p, &whitelist, opts),
                args.fail_fast,
            )?;
        }
    }

    Ok(())
}

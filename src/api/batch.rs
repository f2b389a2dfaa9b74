//! Run one query per raster across a rayon pool.
//!
//! Each worker opens, scans and drops its own raster; nothing is shared
//! between them. Outcomes come back in input order.
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::api::MetricOutcome;
use crate::error::{Result, StatusCode};

/// Batch processing report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    pub processed: usize,
    /// Rasters without eligible cells; an expected outcome, not a failure
    pub no_data: usize,
    pub errors: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry<T> {
    pub path: PathBuf,
    #[serde(flatten)]
    pub outcome: MetricOutcome<T>,
}

/// Apply `query` to every path in parallel.
///
/// With `continue_on_error` false the first failure in input order, other
/// than `NoValidData`, is returned instead of the entries.
pub fn query_many<T, F>(
    paths: &[PathBuf],
    query: F,
    continue_on_error: bool,
) -> Result<(Vec<BatchEntry<T>>, BatchReport)>
where
    T: Send,
    F: Fn(&Path) -> Result<T> + Sync,
{
    info!("Starting batch of {} rasters", paths.len());
    let results: Vec<Result<T>> = paths.par_iter().map(|p| query(p.as_path())).collect();

    let mut report = BatchReport::default();
    let mut entries = Vec::with_capacity(results.len());
    for (path, result) in paths.iter().zip(results) {
        let outcome = match result {
            Ok(value) => {
                report.processed += 1;
                MetricOutcome {
                    status: StatusCode::Success,
                    value: Some(value),
                }
            }
            Err(e) if e.status() == StatusCode::NoValidData => {
                report.no_data += 1;
                MetricOutcome::from(Err(e))
            }
            Err(e) => {
                warn!("Error processing {:?}: {}", path, e);
                report.errors += 1;
                if !continue_on_error {
                    return Err(e);
                }
                MetricOutcome::from(Err(e))
            }
        };
        entries.push(BatchEntry {
            path: path.clone(),
            outcome,
        });
    }

    info!(
        "Batch complete: processed={} no_data={} errors={}",
        report.processed, report.no_data, report.errors
    );
    Ok((entries, report))
}

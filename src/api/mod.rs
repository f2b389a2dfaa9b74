//! High-level query API: one entry point per metric, each opening a raster,
//! running exactly one scan, and returning a typed result. Prefer these over
//! the low-level accumulators when integrating gdiv.
//!
//! The `*_of` functions take an opener closure instead of a path so callers
//! can supply any [`RasterSource`]; argument checks run before the opener is
//! called, so a rejected query never touches the raster.
use serde::{Deserialize, Serialize};

use crate::core::metrics::{
    ClassWhitelist, DispersionAccumulator, DispersionResult, DiversityAccumulator,
    DiversityResult, PatchShapeAccumulator, PatchShapeResult, ShapeAccumulator, ShapeResult,
};
use crate::core::params::ScanOptions;
use crate::core::scan::{Lenient, scan};
use crate::error::{Result, StatusCode, status_of};
use crate::io::source::RasterSource;
use crate::types::Dimensions;

pub mod batch;

#[cfg(feature = "gdal")]
mod paths;
#[cfg(feature = "gdal")]
pub use paths::{
    query_dispersion, query_diversity, query_landscape, query_patch_shape, query_shape_index,
};

/// Status plus value, for results reported alongside others.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricOutcome<T> {
    pub status: StatusCode,
    pub value: Option<T>,
}

impl<T> From<Result<T>> for MetricOutcome<T> {
    fn from(result: Result<T>) -> Self {
        let status = status_of(&result);
        Self {
            status,
            value: result.ok(),
        }
    }
}

/// Dispersion, diversity and LSI of one raster, from a single scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LandscapeProfile {
    pub dimensions: Dimensions,
    pub dispersion: MetricOutcome<DispersionResult>,
    pub diversity: MetricOutcome<DiversityResult>,
    /// LSI over every valid cell, not only whitelisted ones
    pub shape: MetricOutcome<ShapeResult>,
}

/// Mean, population std, min and max of the valid cells.
pub fn dispersion_of<S, F>(open: F, options: &ScanOptions) -> Result<DispersionResult>
where
    S: RasterSource,
    F: FnOnce() -> Result<S>,
{
    options.validate()?;
    let source = open()?;
    scan(&source, options, DispersionAccumulator::new())
}

/// Shannon diversity and per-class proportions over the cells whose class is
/// in `classes`. The whitelist is checked before the raster is opened.
pub fn diversity_of<S, F>(
    open: F,
    classes: &[f64],
    options: &ScanOptions,
) -> Result<DiversityResult>
where
    S: RasterSource,
    F: FnOnce() -> Result<S>,
{
    let whitelist = ClassWhitelist::from_values(classes)?;
    options.validate()?;
    let source = open()?;
    scan(&source, options, DiversityAccumulator::new(&whitelist))
}

/// Landscape shape index, optionally restricted to whitelisted classes.
pub fn shape_index_of<S, F>(
    open: F,
    whitelist: Option<&ClassWhitelist>,
    options: &ScanOptions,
) -> Result<ShapeResult>
where
    S: RasterSource,
    F: FnOnce() -> Result<S>,
{
    options.validate()?;
    let source = open()?;
    scan(&source, options, ShapeAccumulator::new(whitelist))
}

/// Mean patch shape index using `options.connectivity`.
pub fn patch_shape_of<S, F>(open: F, options: &ScanOptions) -> Result<PatchShapeResult>
where
    S: RasterSource,
    F: FnOnce() -> Result<S>,
{
    options.validate()?;
    let source = open()?;
    scan(&source, options, PatchShapeAccumulator::new(options.connectivity))
}

/// All three landscape metrics in one pass. Open and read failures fail the
/// whole call; a metric with no eligible cells only marks its own outcome.
pub fn landscape_profile_of<S, F>(
    open: F,
    whitelist: &ClassWhitelist,
    options: &ScanOptions,
) -> Result<LandscapeProfile>
where
    S: RasterSource,
    F: FnOnce() -> Result<S>,
{
    options.validate()?;
    let source = open()?;
    let (dispersion, diversity, shape) = scan(
        &source,
        options,
        (
            Lenient(DispersionAccumulator::new()),
            Lenient(DiversityAccumulator::new(whitelist)),
            Lenient(ShapeAccumulator::new(None)),
        ),
    )?;
    Ok(LandscapeProfile {
        dimensions: source.dimensions(),
        dispersion: dispersion.into(),
        diversity: diversity.into(),
        shape: shape.into(),
    })
}

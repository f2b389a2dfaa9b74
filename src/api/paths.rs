//! Path-based entry points backed by GDAL.
use std::path::Path;

use tracing::info;

use crate::api::{
    LandscapeProfile, dispersion_of, diversity_of, landscape_profile_of, patch_shape_of,
    shape_index_of,
};
use crate::core::metrics::{
    ClassWhitelist, DispersionResult, DiversityResult, PatchShapeResult, ShapeResult,
};
use crate::core::params::ScanOptions;
use crate::error::{Result, status_of};
use crate::io::gdal::GdalRaster;

fn log_outcome<T>(metric: &str, path: &Path, result: &Result<T>) {
    match result {
        Ok(_) => info!("{} {:?}: Success", metric, path),
        Err(e) => info!("{} {:?}: {} ({})", metric, path, status_of(result), e),
    }
}

/// Mean, population std, min and max of the valid cells of band 1.
pub fn query_dispersion(path: &Path, options: &ScanOptions) -> Result<DispersionResult> {
    let result = dispersion_of(|| GdalRaster::open(path, options), options);
    log_outcome("dispersion", path, &result);
    result
}

/// Shannon diversity and proportions over the whitelisted `classes`.
pub fn query_diversity(
    path: &Path,
    classes: &[f64],
    options: &ScanOptions,
) -> Result<DiversityResult> {
    let result = diversity_of(|| GdalRaster::open(path, options), classes, options);
    log_outcome("diversity", path, &result);
    result
}

/// Landscape shape index, optionally restricted to `whitelist`.
pub fn query_shape_index(
    path: &Path,
    whitelist: Option<&ClassWhitelist>,
    options: &ScanOptions,
) -> Result<ShapeResult> {
    let result = shape_index_of(|| GdalRaster::open(path, options), whitelist, options);
    log_outcome("lsi", path, &result);
    result
}

/// Mean patch shape index. Holds the raster's class grid in memory.
pub fn query_patch_shape(path: &Path, options: &ScanOptions) -> Result<PatchShapeResult> {
    let result = patch_shape_of(|| GdalRaster::open(path, options), options);
    log_outcome("patch shape", path, &result);
    result
}

/// Dispersion, diversity and LSI in one scan.
pub fn query_landscape(
    path: &Path,
    whitelist: &ClassWhitelist,
    options: &ScanOptions,
) -> Result<LandscapeProfile> {
    let result = landscape_profile_of(|| GdalRaster::open(path, options), whitelist, options);
    log_outcome("profile", path, &result);
    result
}

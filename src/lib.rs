#![doc = r#"
GDIV: landscape-diversity statistics for single-band rasters.

This crate computes, per raster file, the metrics spatial-ecology workflows
tabulate per site and factor: a dispersion statistic (mean and population
standard deviation), a Shannon diversity index over a caller whitelist of class
codes, and a landscape shape index (LSI) from class-boundary edge geometry.
Rasters are read through GDAL in row strips; nothing requires the whole grid in
memory except the optional mean patch shape index.

Requirements
------------
- GDAL development headers and runtime available on your system (default
  `gdal` feature). Without it, the in-memory [`GridRaster`] and the `*_of`
  functions remain available.
- Rust 2024 edition toolchain.

Quick start
-----------
```rust,no_run
use std::path::Path;
use gdiv::{query_dispersion, query_diversity, query_shape_index, ScanOptions};

fn main() -> gdiv::Result<()> {
    let opts = ScanOptions::default();
    let path = Path::new("/data/site_01/soil.tif");

    let d = query_dispersion(path, &opts)?;
    println!("mean={} std={} n={}", d.mean, d.std, d.valid_count);

    let h = query_diversity(path, &[1.0, 2.0, 5.0], &opts)?;
    println!("H={} proportions={:?}", h.shannon, h.proportions);

    let s = query_shape_index(path, None, &opts)?;
    println!("LSI={}", s.lsi);
    Ok(())
}
```

Status codes
------------
Every failure folds into a closed [`StatusCode`]. `NoValidData` is an expected
outcome for sparse inputs ("metric unavailable"), not a crash.

```rust,no_run
use std::path::Path;
use gdiv::{query_dispersion, status_of, ScanOptions, StatusCode};

let result = query_dispersion(Path::new("/data/empty.tif"), &ScanOptions::default());
match status_of(&result) {
    StatusCode::Success => {}
    StatusCode::NoValidData => eprintln!("metric unavailable"),
    other => eprintln!("failed: {other} (code {})", other.code()),
}
```

In-memory rasters
-----------------
```rust
use gdiv::{diversity_of, GridRaster, ScanOptions};

let grid = GridRaster::from_vec(4, 1, vec![1.0, 1.0, 2.0, 2.0]).unwrap();
let h = diversity_of(move || Ok(grid), &[1.0, 2.0], &ScanOptions::default()).unwrap();
assert!((h.shannon - 2.0_f64.ln()).abs() < 1e-12);
```

Useful modules
--------------
- [`api`]: query entry points and the parallel batch driver.
- [`core`]: scan options, no-data filter, scan primitive and metric accumulators.
- [`io`]: the `RasterSource` trait, GDAL reader and in-memory grid.
- [`error`]: crate-level `Error`, `Result` and `StatusCode`.
"#]

// Core modules (public)
pub mod api;
pub mod core;
pub mod error;
pub mod io;
pub mod types;

// Curated public API surface
// Types
pub use crate::core::metrics::{
    ClassWhitelist, DispersionResult, DiversityResult, PatchShapeResult, ShapeResult,
};
pub use crate::core::params::ScanOptions;
pub use error::{Error, Result, StatusCode, status_of};
pub use types::{Connectivity, Dimensions, ValueKind};

// Readers
pub use io::{GridRaster, RasterSource};
#[cfg(feature = "gdal")]
pub use io::{GdalError, GdalMetadata, GdalRaster};

// High-level API re-exports
pub use api::batch::{BatchEntry, BatchReport, query_many};
pub use api::{
    LandscapeProfile, MetricOutcome, dispersion_of, diversity_of, landscape_profile_of,
    patch_shape_of, shape_index_of,
};
#[cfg(feature = "gdal")]
pub use api::{
    query_dispersion, query_diversity, query_landscape, query_patch_shape, query_shape_index,
};

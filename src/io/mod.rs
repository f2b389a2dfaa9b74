//! I/O layer: the `RasterSource` abstraction, the GDAL-backed reader, and an
//! in-memory grid for callers (and tests) that already hold the data.
pub mod source;
pub use source::RasterSource;

pub mod memory;
pub use memory::GridRaster;

#[cfg(feature = "gdal")]
pub mod gdal;
#[cfg(feature = "gdal")]
pub use gdal::{GdalError, GdalMetadata, GdalRaster};

use gdal::raster::GdalDataType;
use gdal::{Dataset, errors::GdalError as GdalCrateError};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::core::params::ScanOptions;
use crate::error::{Error, Result};
use crate::io::source::RasterSource;
use crate::types::{Dimensions, ValueKind};

/// Errors encountered when reading through GDAL
#[derive(Debug, Error)]
pub enum GdalError {
    #[error("GDAL error: {0}")]
    Gdal(#[from] GdalCrateError),
    #[error("Short read: expected {0} cells, got {1}")]
    ShortRead(usize, usize),
}

/// Metadata of band 1 of a GDAL-supported dataset
#[derive(Debug, Clone)]
pub struct GdalMetadata {
    /// Width (pixels) of the raster
    pub size_x: usize,
    /// Height (lines) of the raster
    pub size_y: usize,
    /// Number of raster bands in the dataset; only band 1 is read
    pub bands: usize,
    /// Effective no-data value (band declaration, else the configured override)
    pub nodata: Option<f64>,
    /// Raw band storage kind
    pub kind: ValueKind,
    /// Native block size (x, y) of band 1
    pub block_size: (usize, usize),
}

/// Single-band raster opened through GDAL. The dataset is closed when the
/// value is dropped.
pub struct GdalRaster {
    pub dataset: Dataset,
    pub metadata: GdalMetadata,
    path: PathBuf,
}

fn is_virtual(path: &Path) -> bool {
    path.to_str().is_some_and(|p| p.starts_with("/vsi"))
}

/// Rows per native block, for strip and tile layouts alike. A band stored
/// as one block spanning every row has none.
fn native_rows((_, block_y): (usize, usize), size_y: usize) -> Option<usize> {
    (block_y > 0 && block_y < size_y).then_some(block_y)
}

fn kind_of(band_type: GdalDataType) -> ValueKind {
    match band_type {
        GdalDataType::Float32 | GdalDataType::Float64 => ValueKind::Float,
        _ => ValueKind::Integer,
    }
}

impl GdalRaster {
    /// Open a GDAL-supported raster (e.g., GeoTIFF, ASCII grid, ENVI) for reading
    pub fn open<P: AsRef<Path>>(path: P, options: &ScanOptions) -> Result<Self> {
        let path = path.as_ref();
        let unreadable = |reason: String| Error::UnreadableRaster {
            path: path.to_path_buf(),
            reason,
        };

        // GDAL resolves /vsi* paths itself; only local paths can be missing
        let dataset = Dataset::open(path).map_err(|e| {
            if !is_virtual(path) && !path.exists() {
                Error::FileNotFound {
                    path: path.to_path_buf(),
                }
            } else {
                unreadable(e.to_string())
            }
        })?;
        let (size_x, size_y) = dataset.raster_size();
        let bands = dataset.raster_count() as usize;
        if bands == 0 {
            return Err(unreadable("No raster bands found".into()));
        }

        let (nodata, kind, block_size) = {
            let band = dataset
                .rasterband(1)
                .map_err(|e| unreadable(e.to_string()))?;
            let nodata = band.no_data_value().or(options.nodata_override);
            (nodata, kind_of(band.band_type()), band.block_size())
        };

        debug!(
            "Opened {:?}: {}x{} bands={} nodata={:?} kind={} block={:?}",
            path, size_x, size_y, bands, nodata, kind, block_size
        );

        Ok(GdalRaster {
            dataset,
            metadata: GdalMetadata {
                size_x,
                size_y,
                bands,
                nodata,
                kind,
                block_size,
            },
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_strip(
        &self,
        first_row: usize,
        row_count: usize,
        out: &mut Vec<f64>,
    ) -> std::result::Result<(), GdalError> {
        let band = self.dataset.rasterband(1)?;
        let window = (self.metadata.size_x, row_count);
        let buf = band.read_as::<f64>(
            (0, first_row as isize), // offset
            window,                  // window size
            window,                  // shape
            None,                    // no resampling
        )?;
        let expected = window.0 * window.1;
        let data = buf.data();
        if data.len() != expected {
            return Err(GdalError::ShortRead(expected, data.len()));
        }
        out.clear();
        out.extend_from_slice(data);
        Ok(())
    }
}

impl RasterSource for GdalRaster {
    fn dimensions(&self) -> Dimensions {
        Dimensions::new(self.metadata.size_x, self.metadata.size_y)
    }

    fn nodata(&self) -> Option<f64> {
        self.metadata.nodata
    }

    fn value_kind(&self) -> ValueKind {
        self.metadata.kind
    }

    fn native_block_rows(&self) -> Option<usize> {
        native_rows(self.metadata.block_size, self.metadata.size_y)
    }

    fn read_rows(&self, first_row: usize, row_count: usize, out: &mut Vec<f64>) -> Result<()> {
        self.read_strip(first_row, row_count, out)
            .map_err(|e| Error::UnreadableRaster {
                path: self.path.clone(),
                reason: e.to_string(),
            })
    }
}

use crate::core::validity::NoDataFilter;
use crate::error::Result;
use crate::types::{Dimensions, ValueKind};

/// A read-only, single-band raster that can be pulled in row strips.
///
/// Implementations hand out full-width strips so a scan sees cells in
/// row-major order; nothing requires the whole grid to be resident.
pub trait RasterSource {
    fn dimensions(&self) -> Dimensions;

    /// Declared no-data sentinel, if any.
    fn nodata(&self) -> Option<f64>;

    fn value_kind(&self) -> ValueKind;

    /// Height of the band's native storage blocks, when it has them.
    fn native_block_rows(&self) -> Option<usize> {
        None
    }

    /// Replace `out` with rows `first_row..first_row + row_count`, row-major.
    fn read_rows(&self, first_row: usize, row_count: usize, out: &mut Vec<f64>) -> Result<()>;

    /// The validity filter every metric applies to this raster.
    fn validity(&self) -> NoDataFilter {
        NoDataFilter::new(self.nodata(), self.value_kind())
    }
}

//! The single scan primitive every metric runs on.
//!
//! `scan` pulls full-width row strips from a [`RasterSource`], applies the
//! source's no-data filter and feeds each cell, in row-major order, to an
//! [`Accumulator`]. Metrics are accumulators; several metrics share one pass
//! by scanning a tuple of accumulators.
use tracing::debug;

use crate::core::params::ScanOptions;
use crate::error::{Error, Result};
use crate::io::source::RasterSource;
use crate::types::Dimensions;

pub trait Accumulator {
    type Output;

    /// Called once before the first cell.
    fn begin(&mut self, _dims: Dimensions) {}

    /// One cell in row-major order: `Some(value)` when valid, `None` for no-data.
    fn accept(&mut self, cell: Option<f64>);

    fn finalize(self) -> Result<Self::Output>;
}

impl<A: Accumulator, B: Accumulator> Accumulator for (A, B) {
    type Output = (A::Output, B::Output);

    fn begin(&mut self, dims: Dimensions) {
        self.0.begin(dims);
        self.1.begin(dims);
    }

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        self.0.accept(cell);
        self.1.accept(cell);
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok((self.0.finalize()?, self.1.finalize()?))
    }
}

impl<A: Accumulator, B: Accumulator, C: Accumulator> Accumulator for (A, B, C) {
    type Output = (A::Output, B::Output, C::Output);

    fn begin(&mut self, dims: Dimensions) {
        self.0.begin(dims);
        self.1.begin(dims);
        self.2.begin(dims);
    }

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        self.0.accept(cell);
        self.1.accept(cell);
        self.2.accept(cell);
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok((self.0.finalize()?, self.1.finalize()?, self.2.finalize()?))
    }
}

/// Wraps an accumulator so its failure is reported as a value instead of
/// failing the whole scan. Used when metrics are composed and each needs its
/// own status.
#[derive(Debug, Clone)]
pub struct Lenient<A>(pub A);

impl<A: Accumulator> Accumulator for Lenient<A> {
    type Output = Result<A::Output>;

    fn begin(&mut self, dims: Dimensions) {
        self.0.begin(dims);
    }

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        self.0.accept(cell);
    }

    fn finalize(self) -> Result<Self::Output> {
        Ok(self.0.finalize())
    }
}

/// Run one pass over `source`, feeding `acc`, and finalize it.
pub fn scan<S, A>(source: &S, options: &ScanOptions, mut acc: A) -> Result<A::Output>
where
    S: RasterSource + ?Sized,
    A: Accumulator,
{
    options.validate()?;
    let dims = source.dimensions();
    let filter = source.validity();
    let block_rows = options.block_rows(dims.width, dims.height, source.native_block_rows());
    debug!(
        "Scanning {} raster ({}), nodata={:?}, {} rows per strip",
        dims,
        source.value_kind(),
        filter.sentinel(),
        block_rows
    );

    acc.begin(dims);
    let mut buf = Vec::with_capacity(block_rows.saturating_mul(dims.width));
    let mut row = 0;
    while row < dims.height {
        let count = block_rows.min(dims.height - row);
        source.read_rows(row, count, &mut buf)?;
        if buf.len() != count * dims.width {
            return Err(Error::ShortStrip {
                first_row: row,
                expected: count * dims.width,
                actual: buf.len(),
            });
        }
        for &v in &buf {
            acc.accept(filter.filter(v));
        }
        row += count;
    }

    acc.finalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::GridRaster;
    use crate::types::ValueKind;
    use std::cell::RefCell;

    /// Records every cell it sees.
    #[derive(Default)]
    struct Recorder {
        dims: Option<Dimensions>,
        cells: Vec<Option<f64>>,
    }

    impl Accumulator for Recorder {
        type Output = (Option<Dimensions>, Vec<Option<f64>>);

        fn begin(&mut self, dims: Dimensions) {
            self.dims = Some(dims);
        }

        fn accept(&mut self, cell: Option<f64>) {
            self.cells.push(cell);
        }

        fn finalize(self) -> Result<Self::Output> {
            Ok((self.dims, self.cells))
        }
    }

    /// Counts strip reads.
    struct CountingSource {
        inner: GridRaster,
        reads: RefCell<usize>,
    }

    impl RasterSource for CountingSource {
        fn dimensions(&self) -> Dimensions {
            self.inner.dimensions()
        }
        fn nodata(&self) -> Option<f64> {
            self.inner.nodata()
        }
        fn value_kind(&self) -> ValueKind {
            self.inner.value_kind()
        }
        fn read_rows(&self, first_row: usize, row_count: usize, out: &mut Vec<f64>) -> Result<()> {
            *self.reads.borrow_mut() += 1;
            self.inner.read_rows(first_row, row_count, out)
        }
    }

    #[test]
    fn test_scan_feeds_row_major_with_filter() {
        let grid = GridRaster::from_vec(2, 2, vec![1.0, -1.0, 3.0, 4.0])
            .unwrap()
            .with_nodata(Some(-1.0));
        let (dims, cells) = scan(&grid, &ScanOptions::default(), Recorder::default()).unwrap();
        assert_eq!(dims, Some(Dimensions::new(2, 2)));
        assert_eq!(cells, vec![Some(1.0), None, Some(3.0), Some(4.0)]);
    }

    #[test]
    fn test_scan_in_strips() {
        let source = CountingSource {
            inner: GridRaster::from_vec(3, 5, (0..15).map(|v| v as f64).collect()).unwrap(),
            reads: RefCell::new(0),
        };
        let opts = ScanOptions {
            max_bytes_full_read: 8,
            window_rows: 2,
            ..ScanOptions::default()
        };
        let (_, cells) = scan(&source, &opts, Recorder::default()).unwrap();
        assert_eq!(*source.reads.borrow(), 3);
        let expected: Vec<Option<f64>> = (0..15).map(|v| Some(v as f64)).collect();
        assert_eq!(cells, expected);

        // restartable: a second pass sees the same sequence
        let (_, again) = scan(&source, &opts, Recorder::default()).unwrap();
        assert_eq!(again, expected);
    }

    #[test]
    fn test_tuple_sees_same_cells() {
        let grid = GridRaster::from_vec(2, 1, vec![5.0, 6.0]).unwrap();
        let ((_, a), (_, b)) = scan(
            &grid,
            &ScanOptions::default(),
            (Recorder::default(), Recorder::default()),
        )
        .unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_options_rejected_before_read() {
        let source = CountingSource {
            inner: GridRaster::filled(2, 2, 1.0),
            reads: RefCell::new(0),
        };
        let opts = ScanOptions {
            window_rows: 0,
            ..ScanOptions::default()
        };
        assert!(scan(&source, &opts, Recorder::default()).is_err());
        assert_eq!(*source.reads.borrow(), 0);
    }

    /// Drops the last cell of the strip starting at `short_at`.
    struct ShortSource {
        inner: GridRaster,
        short_at: usize,
    }

    impl RasterSource for ShortSource {
        fn dimensions(&self) -> Dimensions {
            self.inner.dimensions()
        }
        fn nodata(&self) -> Option<f64> {
            None
        }
        fn value_kind(&self) -> ValueKind {
            ValueKind::Float
        }
        fn read_rows(&self, first_row: usize, row_count: usize, out: &mut Vec<f64>) -> Result<()> {
            self.inner.read_rows(first_row, row_count, out)?;
            if first_row == self.short_at {
                out.pop();
            }
            Ok(())
        }
    }

    #[test]
    fn test_short_strip_reports_expected_and_actual() {
        let source = ShortSource {
            inner: GridRaster::from_vec(3, 5, (0..15).map(|v| v as f64).collect()).unwrap(),
            short_at: 2,
        };
        let opts = ScanOptions {
            max_bytes_full_read: 8,
            window_rows: 2,
            ..ScanOptions::default()
        };
        let err = scan(&source, &opts, Recorder::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::ShortStrip {
                first_row: 2,
                expected: 6,
                actual: 5
            }
        ));
        assert_eq!(err.to_string(), "Short read at row 2: expected 6 cells, got 5");
    }
}

//! In-memory raster backed by an `ndarray::Array2<f64>` of shape (height, width).
use ndarray::{Array2, s};

use crate::error::{Error, Result};
use crate::io::source::RasterSource;
use crate::types::{Dimensions, ValueKind};

#[derive(Debug, Clone)]
pub struct GridRaster {
    data: Array2<f64>,
    nodata: Option<f64>,
    kind: ValueKind,
}

impl GridRaster {
    /// Wrap an existing grid. The value kind is `Integer` when every finite
    /// cell holds a whole number.
    pub fn new(data: Array2<f64>) -> Self {
        let kind = if data.iter().all(|v| !v.is_finite() || v.fract() == 0.0) {
            ValueKind::Integer
        } else {
            ValueKind::Float
        };
        Self {
            data,
            nodata: None,
            kind,
        }
    }

    /// Build from a row-major vector.
    pub fn from_vec(width: usize, height: usize, values: Vec<f64>) -> Result<Self> {
        let len = values.len();
        let data = Array2::from_shape_vec((height, width), values).map_err(|_| {
            Error::invalid_argument("values", format!("{} cells for {}x{}", len, width, height))
        })?;
        Ok(Self::new(data))
    }

    /// A `width` x `height` grid holding one value everywhere.
    pub fn filled(width: usize, height: usize, value: f64) -> Self {
        Self::new(Array2::from_elem((height, width), value))
    }

    pub fn with_nodata(mut self, nodata: Option<f64>) -> Self {
        self.nodata = nodata;
        self
    }

    pub fn with_kind(mut self, kind: ValueKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn data(&self) -> &Array2<f64> {
        &self.data
    }
}

impl RasterSource for GridRaster {
    fn dimensions(&self) -> Dimensions {
        let (rows, cols) = self.data.dim();
        Dimensions::new(cols, rows)
    }

    fn nodata(&self) -> Option<f64> {
        self.nodata
    }

    fn value_kind(&self) -> ValueKind {
        self.kind
    }

    fn read_rows(&self, first_row: usize, row_count: usize, out: &mut Vec<f64>) -> Result<()> {
        let rows = self.data.nrows();
        let end = first_row.saturating_add(row_count);
        if end > rows {
            return Err(Error::invalid_argument(
                "rows",
                format!("{}..{} of {}", first_row, end, rows),
            ));
        }
        out.clear();
        out.extend(self.data.slice(s![first_row..end, ..]).iter().copied());
        Ok(())
    }
}

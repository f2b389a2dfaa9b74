use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::Connectivity;

/// Default budget under which a raster is read in a single strip (256 MiB).
pub const DEFAULT_MAX_BYTES_FULL_READ: u64 = 256 * 1024 * 1024;

/// Default strip height when the raster is read in blocks.
pub const DEFAULT_WINDOW_ROWS: usize = 512;

/// Scan parameters suitable for config files and CLI presets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanOptions {
    /// No-data value used when the band declares none
    pub nodata_override: Option<f64>,
    /// Prefer the band's native block height for strip reads
    pub use_native_blocks: bool,
    /// Strip height in rows when not using native blocks
    pub window_rows: usize,
    /// Rasters whose f64 footprint fits this budget are read in one strip
    pub max_bytes_full_read: u64,
    /// Neighbourhood for patch growth
    pub connectivity: Connectivity,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            nodata_override: None,
            use_native_blocks: false,
            window_rows: DEFAULT_WINDOW_ROWS,
            max_bytes_full_read: DEFAULT_MAX_BYTES_FULL_READ,
            connectivity: Connectivity::default(),
        }
    }
}

impl ScanOptions {
    pub fn validate(&self) -> Result<()> {
        if self.window_rows == 0 {
            return Err(Error::invalid_argument("window_rows", self.window_rows));
        }
        if self.max_bytes_full_read == 0 {
            return Err(Error::invalid_argument(
                "max_bytes_full_read",
                self.max_bytes_full_read,
            ));
        }
        if let Some(nd) = self.nodata_override {
            if nd.is_infinite() {
                return Err(Error::invalid_argument("nodata_override", nd));
            }
        }
        Ok(())
    }

    /// Rows per strip for a raster of the given size.
    ///
    /// `native_rows` is the band's block height, if it has one.
    pub fn block_rows(&self, width: usize, height: usize, native_rows: Option<usize>) -> usize {
        let footprint = (width as u64)
            .saturating_mul(height as u64)
            .saturating_mul(std::mem::size_of::<f64>() as u64);
        if footprint <= self.max_bytes_full_read {
            return height.max(1);
        }
        let rows = match native_rows {
            Some(r) if self.use_native_blocks && r > 0 && r < height => r,
            _ => self.window_rows,
        };
        rows.clamp(1, height.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        let opts = ScanOptions::default();
        assert!(opts.validate().is_ok());
        assert_eq!(opts.window_rows, 512);
        assert_eq!(opts.connectivity, Connectivity::Eight);
    }

    #[test]
    fn test_zero_window_rejected() {
        let opts = ScanOptions {
            window_rows: 0,
            ..ScanOptions::default()
        };
        assert!(matches!(
            opts.validate(),
            Err(Error::InvalidArgument { arg: "window_rows", .. })
        ));
    }

    #[test]
    fn test_block_rows_policy() {
        let small = ScanOptions::default();
        assert_eq!(small.block_rows(100, 80, Some(1)), 80);

        let tight = ScanOptions {
            max_bytes_full_read: 8,
            window_rows: 16,
            ..ScanOptions::default()
        };
        assert_eq!(tight.block_rows(100, 80, Some(4)), 16);
        assert_eq!(tight.block_rows(100, 10, None), 10);

        let native = ScanOptions {
            use_native_blocks: true,
            ..tight
        };
        assert_eq!(native.block_rows(100, 80, Some(4)), 4);
        assert_eq!(native.block_rows(100, 80, None), 16);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let opts: ScanOptions = serde_json::from_str(r#"{"nodata_override": -9999.0}"#).unwrap();
        assert_eq!(opts.nodata_override, Some(-9999.0));
        assert_eq!(opts.window_rows, DEFAULT_WINDOW_ROWS);
    }
}

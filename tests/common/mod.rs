//! GeoTIFF fixtures written through the GDAL `GTiff` driver.
#![allow(dead_code)]

use gdal::DriverManager;
use gdal::raster::{Buffer, GdalType};
use std::path::{Path, PathBuf};

/// Write a single-band GeoTIFF of `cols` x `rows` (row-major `data`) into `dir`.
pub fn write_tiff<T: GdalType + Copy>(
    dir: &Path,
    name: &str,
    cols: usize,
    rows: usize,
    data: &[T],
    nodata: Option<f64>,
) -> PathBuf {
    assert_eq!(data.len(), cols * rows, "fixture shape mismatch");
    let output = dir.join(name);
    let driver = DriverManager::get_driver_by_name("GTiff").expect("GTiff driver");
    let ds = driver
        .create_with_band_type::<T, _>(&output, cols, rows, 1)
        .expect("create fixture");
    let mut band = ds.rasterband(1).expect("band 1");
    if nodata.is_some() {
        band.set_no_data_value(nodata).expect("set nodata");
    }
    let mut buf = Buffer::new((cols, rows), data.to_vec());
    band.write((0, 0), (cols, rows), &mut buf).expect("write fixture");
    output
}

/// 4x4 grid, top half class 1, bottom half class 2.
pub fn halves() -> Vec<i32> {
    (0..16).map(|i| if i < 8 { 1 } else { 2 }).collect()
}

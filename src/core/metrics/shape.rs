//! Landscape shape index (LSI).
//!
//! Edge length is counted in cell sides. Every adjacency between two cell
//! positions, including the virtual positions just outside the raster, is
//! visited once. It contributes one unit when exactly one side holds valid
//! data, or when both do and their classes differ. The outer raster boundary
//! therefore counts as perimeter, like a boundary against no-data.
//!
//! `LSI = E / min_perimeter(A)` with `A` the number of valid cells.
use serde::{Deserialize, Serialize};

use crate::core::metrics::histogram::{ClassWhitelist, class_of};
use crate::core::scan::Accumulator;
use crate::error::{Error, Result};
use crate::types::Dimensions;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShapeResult {
    pub lsi: f64,
    /// Total class-boundary edge length, in cell sides
    pub edge_length: u64,
    /// Perimeter of the most compact layout of the same area
    pub min_perimeter: u64,
    /// Cells taking part in the area
    pub valid_count: u64,
}

/// Smallest perimeter, in cell sides, of any region of `area` cells.
///
/// With `n = floor(sqrt(A))` and `m = A - n^2`:
/// `4n` when `m == 0`, `4n + 2` when `0 < m <= n`, `4n + 4` when `m > n`.
pub fn min_perimeter(area: u64) -> u64 {
    if area == 0 {
        return 0;
    }
    let n = isqrt(area);
    let m = area - n * n;
    if m == 0 {
        4 * n
    } else if m <= n {
        4 * n + 2
    } else {
        4 * n + 4
    }
}

fn isqrt(v: u64) -> u64 {
    let mut n = (v as f64).sqrt() as u64;
    // correct the float estimate for large inputs
    while n * n > v {
        n -= 1;
    }
    while (n + 1) * (n + 1) <= v {
        n += 1;
    }
    n
}

#[inline]
fn boundary(a: Option<i64>, b: Option<i64>) -> u64 {
    match (a, b) {
        (Some(x), Some(y)) => (x != y) as u64,
        (None, None) => 0,
        _ => 1,
    }
}

/// Streaming edge counter. Holds the previous row only.
#[derive(Debug, Clone)]
pub struct ShapeAccumulator<'w> {
    whitelist: Option<&'w ClassWhitelist>,
    width: usize,
    above: Vec<Option<i64>>,
    current: Vec<Option<i64>>,
    edges: u64,
    area: u64,
}

impl<'w> ShapeAccumulator<'w> {
    /// Restrict the participating classes to `whitelist` when given; other
    /// cells then behave as no-data.
    pub fn new(whitelist: Option<&'w ClassWhitelist>) -> Self {
        Self {
            whitelist,
            width: 0,
            above: Vec::new(),
            current: Vec::new(),
            edges: 0,
            area: 0,
        }
    }

    #[inline]
    fn class(&self, cell: Option<f64>) -> Option<i64> {
        let class = class_of(cell?)?;
        match self.whitelist {
            Some(w) if !w.contains(class) => None,
            _ => Some(class),
        }
    }
}

impl Accumulator for ShapeAccumulator<'_> {
    type Output = ShapeResult;

    fn begin(&mut self, dims: Dimensions) {
        self.width = dims.width;
        self.above = vec![None; dims.width];
        self.current = Vec::with_capacity(dims.width);
    }

    fn accept(&mut self, cell: Option<f64>) {
        let class = self.class(cell);
        let col = self.current.len();
        let left = if col == 0 { None } else { self.current[col - 1] };
        let up = self.above.get(col).copied().flatten();
        self.edges += boundary(left, class) + boundary(up, class);
        if class.is_some() {
            self.area += 1;
        }
        self.current.push(class);

        if self.current.len() == self.width {
            // right side of the last column faces the outside
            self.edges += boundary(class, None);
            std::mem::swap(&mut self.above, &mut self.current);
            self.current.clear();
        }
    }

    fn finalize(mut self) -> Result<ShapeResult> {
        if !self.current.is_empty() {
            return Err(Error::TruncatedScan {
                cells: self.current.len(),
                width: self.width,
            });
        }
        // bottom side of the last row faces the outside
        self.edges += self.above.iter().filter(|c| c.is_some()).count() as u64;

        if self.area == 0 {
            return Err(Error::NoValidData { metric: "lsi" });
        }
        let min_perimeter = min_perimeter(self.area);
        Ok(ShapeResult {
            lsi: self.edges as f64 / min_perimeter as f64,
            edge_length: self.edges,
            min_perimeter,
            valid_count: self.area,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(
        width: usize,
        cells: &[Option<f64>],
        whitelist: Option<&ClassWhitelist>,
    ) -> Result<ShapeResult> {
        let height = cells.len() / width;
        let mut acc = ShapeAccumulator::new(whitelist);
        acc.begin(Dimensions::new(width, height));
        for &c in cells {
            acc.accept(c);
        }
        acc.finalize()
    }

    fn checkerboard(side: usize, period: usize) -> Vec<Option<f64>> {
        (0..side * side)
            .map(|i| {
                let (r, c) = (i / side, i % side);
                Some((((r / period) + (c / period)) % 2) as f64)
            })
            .collect()
    }

    #[test]
    fn test_min_perimeter_table() {
        assert_eq!(min_perimeter(1), 4);
        assert_eq!(min_perimeter(2), 6);
        assert_eq!(min_perimeter(3), 8);
        assert_eq!(min_perimeter(4), 8);
        assert_eq!(min_perimeter(5), 10);
        assert_eq!(min_perimeter(7), 12);
        assert_eq!(min_perimeter(16), 16);
        assert_eq!(min_perimeter(1_000_000), 4_000);
        assert_eq!(min_perimeter(0), 0);
    }

    #[test]
    fn test_compact_square_is_one() {
        let r = run(4, &[Some(1.0); 16], None).unwrap();
        assert_eq!(r.edge_length, 16);
        assert_eq!(r.min_perimeter, 16);
        assert!((r.lsi - 1.0).abs() < 1e-12);
        assert_eq!(r.valid_count, 16);
    }

    #[test]
    fn test_compact_rectangle_non_square_area() {
        // 2x3 block: perimeter 10, area 6 -> n=2, m=2 <= n -> 10
        let r = run(3, &[Some(5.0); 6], None).unwrap();
        assert_eq!(r.edge_length, 10);
        assert!((r.lsi - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_two_halves_add_internal_edge() {
        let cells: Vec<Option<f64>> = (0..16)
            .map(|i| Some(if i % 4 < 2 { 1.0 } else { 2.0 }))
            .collect();
        let r = run(4, &cells, None).unwrap();
        assert_eq!(r.edge_length, 16 + 4);
        assert!((r.lsi - 1.25).abs() < 1e-12);
    }

    #[test]
    fn test_nodata_hole_adds_perimeter() {
        let mut cells = vec![Some(1.0); 9];
        cells[4] = None;
        let r = run(3, &cells, None).unwrap();
        assert_eq!(r.valid_count, 8);
        assert_eq!(r.edge_length, 12 + 4);
    }

    #[test]
    fn test_checkerboard_monotone() {
        let side = 8;
        let lsi: Vec<f64> = [8, 4, 2, 1]
            .iter()
            .map(|&p| run(side, &checkerboard(side, p), None).unwrap().lsi)
            .collect();
        for pair in lsi.windows(2) {
            assert!(pair[1] > pair[0], "LSI should grow with alternation: {:?}", lsi);
        }
        // full checkerboard: 112 internal edges plus the 32 outer ones
        assert_eq!(lsi[3], 144.0 / 32.0);
    }

    #[test]
    fn test_whitelist_masks_other_classes() {
        let cells: Vec<Option<f64>> = (0..16)
            .map(|i| Some(if i % 4 < 2 { 1.0 } else { 2.0 }))
            .collect();
        let w = ClassWhitelist::new(&[1]).unwrap();
        let r = run(4, &cells, Some(&w)).unwrap();
        assert_eq!(r.valid_count, 8);
        assert_eq!(r.edge_length, 12);
    }

    #[test]
    fn test_all_invalid_is_no_valid_data() {
        assert!(matches!(
            run(2, &[None; 4], None),
            Err(Error::NoValidData { .. })
        ));
    }

    #[test]
    fn test_partial_row_is_truncated() {
        let mut acc = ShapeAccumulator::new(None);
        acc.begin(Dimensions::new(3, 1));
        acc.accept(Some(1.0));
        assert!(matches!(acc.finalize(), Err(Error::TruncatedScan { .. })));
    }
}

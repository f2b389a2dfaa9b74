//! Mean patch shape index.
//!
//! Patches are maximal connected groups of equal class (4- or 8-connected).
//! Each patch scores `perimeter / min_perimeter(area)`, perimeter counted over
//! the 4-neighbourhood, so a compact patch scores 1. The landscape value is
//! the mean over all patches. Growing patches needs random access, so this
//! accumulator keeps the whole class grid.
use serde::{Deserialize, Serialize};

use crate::core::metrics::histogram::class_of;
use crate::core::metrics::shape::min_perimeter;
use crate::core::scan::Accumulator;
use crate::error::{Error, Result};
use crate::types::{Connectivity, Dimensions};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PatchShapeResult {
    pub mean_shape: f64,
    pub patch_count: u64,
    pub valid_count: u64,
}

#[derive(Debug, Clone)]
pub struct PatchShapeAccumulator {
    connectivity: Connectivity,
    dims: Dimensions,
    classes: Vec<Option<i64>>,
}

impl PatchShapeAccumulator {
    pub fn new(connectivity: Connectivity) -> Self {
        Self {
            connectivity,
            dims: Dimensions::new(0, 0),
            classes: Vec::new(),
        }
    }

    #[inline]
    fn neighbour(&self, row: usize, col: usize, dr: isize, dc: isize) -> Option<usize> {
        let nr = row as isize + dr;
        let nc = col as isize + dc;
        if nr < 0 || nc < 0 || nr as usize >= self.dims.height || nc as usize >= self.dims.width {
            None
        } else {
            Some(nr as usize * self.dims.width + nc as usize)
        }
    }

    /// Flood-fill the patch holding `start`; returns (area, perimeter).
    fn grow(
        &self,
        start: usize,
        class: i64,
        seen: &mut [bool],
        stack: &mut Vec<usize>,
    ) -> (u64, u64) {
        let (mut area, mut perimeter) = (0u64, 0u64);
        seen[start] = true;
        stack.push(start);

        while let Some(idx) = stack.pop() {
            let (row, col) = (idx / self.dims.width, idx % self.dims.width);
            area += 1;

            for &(dr, dc) in Connectivity::Four.offsets() {
                match self.neighbour(row, col, dr, dc) {
                    Some(n) if self.classes[n] == Some(class) => {}
                    _ => perimeter += 1,
                }
            }

            for &(dr, dc) in self.connectivity.offsets() {
                if let Some(n) = self.neighbour(row, col, dr, dc) {
                    if !seen[n] && self.classes[n] == Some(class) {
                        seen[n] = true;
                        stack.push(n);
                    }
                }
            }
        }

        (area, perimeter)
    }
}

impl Accumulator for PatchShapeAccumulator {
    type Output = PatchShapeResult;

    fn begin(&mut self, dims: Dimensions) {
        self.dims = dims;
        self.classes = Vec::with_capacity(dims.cell_count());
    }

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        self.classes.push(cell.and_then(class_of));
    }

    fn finalize(self) -> Result<PatchShapeResult> {
        if self.classes.len() != self.dims.cell_count() {
            return Err(Error::TruncatedScan {
                cells: self.classes.len(),
                width: self.dims.width,
            });
        }

        let mut seen = vec![false; self.classes.len()];
        let mut stack = Vec::new();
        let mut sum_shape = 0.0;
        let mut patch_count = 0u64;
        let mut valid_count = 0u64;

        for idx in 0..self.classes.len() {
            let Some(class) = self.classes[idx] else {
                continue;
            };
            if seen[idx] {
                continue;
            }
            let (area, perimeter) = self.grow(idx, class, &mut seen, &mut stack);
            sum_shape += perimeter as f64 / min_perimeter(area) as f64;
            patch_count += 1;
            valid_count += area;
        }

        if patch_count == 0 {
            return Err(Error::NoValidData {
                metric: "patch shape",
            });
        }
        Ok(PatchShapeResult {
            mean_shape: sum_shape / patch_count as f64,
            patch_count,
            valid_count,
        })
    }
}

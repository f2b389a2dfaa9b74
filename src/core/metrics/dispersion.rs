use serde::{Deserialize, Serialize};

use crate::core::scan::Accumulator;
use crate::error::{Error, Result};

/// Mean, population standard deviation and range of the valid cells.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionResult {
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub valid_count: u64,
}

/// Welford single-pass accumulator.
#[derive(Debug, Clone, Copy)]
pub struct DispersionAccumulator {
    count: u64,
    mean: f64,
    m2: f64, // Sum of squares of differences from the current mean
    min: f64,
    max: f64,
}

impl Default for DispersionAccumulator {
    fn default() -> Self {
        Self {
            count: 0,
            mean: 0.0,
            m2: 0.0,
            min: f64::INFINITY,
            max: f64::NEG_INFINITY,
        }
    }
}

impl DispersionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn push(&mut self, v: f64) {
        self.count += 1;
        if v < self.min {
            self.min = v;
        }
        if v > self.max {
            self.max = v;
        }
        let delta = v - self.mean;
        self.mean += delta / (self.count as f64);
        let delta2 = v - self.mean;
        self.m2 += delta * delta2;
    }

    /// Combine two partial accumulators (Chan et al. pairwise update).
    pub fn merge(&mut self, other: &Self) {
        if other.count == 0 {
            return;
        }
        if self.count == 0 {
            *self = *other;
            return;
        }
        let n_a = self.count as f64;
        let n_b = other.count as f64;
        let n = n_a + n_b;
        let delta = other.mean - self.mean;
        self.mean += delta * n_b / n;
        self.m2 += other.m2 + delta * delta * n_a * n_b / n;
        self.count += other.count;
        self.min = self.min.min(other.min);
        self.max = self.max.max(other.max);
    }

    pub fn count(&self) -> u64 {
        self.count
    }
}

impl Accumulator for DispersionAccumulator {
    type Output = DispersionResult;

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        if let Some(v) = cell {
            self.push(v);
        }
    }

    fn finalize(self) -> Result<DispersionResult> {
        if self.count == 0 {
            return Err(Error::NoValidData {
                metric: "dispersion",
            });
        }
        // m2 can drift a hair below zero only through rounding
        let std = (self.m2.max(0.0) / self.count as f64).sqrt();
        Ok(DispersionResult {
            mean: self.mean,
            std,
            min: self.min,
            max: self.max,
            valid_count: self.count,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(values: &[f64]) -> Result<DispersionResult> {
        let mut acc = DispersionAccumulator::new();
        for &v in values {
            acc.accept(Some(v));
        }
        acc.finalize()
    }

    #[test]
    fn test_constant_has_zero_std() {
        let r = run(&[7.25; 1000]).unwrap();
        assert_eq!(r.std, 0.0);
        assert_eq!(r.mean, 7.25);
        assert_eq!(r.valid_count, 1000);
    }

    #[test]
    fn test_population_std() {
        let r = run(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((r.mean - 5.0).abs() < 1e-12);
        assert!((r.std - 2.0).abs() < 1e-12);
        assert_eq!(r.min, 2.0);
        assert_eq!(r.max, 9.0);
    }

    #[test]
    fn test_large_offset_is_stable() {
        // naive sum-of-squares loses everything at this magnitude
        let values: Vec<f64> = (0..10_000).map(|i| 1e9 + (i % 2) as f64).collect();
        let r = run(&values).unwrap();
        assert!((r.std - 0.5).abs() < 1e-6, "std={}", r.std);
    }

    #[test]
    fn test_invalid_cells_ignored() {
        let mut acc = DispersionAccumulator::new();
        acc.accept(None);
        acc.accept(Some(3.0));
        acc.accept(None);
        let r = acc.finalize().unwrap();
        assert_eq!(r.valid_count, 1);
        assert_eq!(r.std, 0.0);
    }

    #[test]
    fn test_empty_is_no_valid_data() {
        assert!(matches!(run(&[]), Err(Error::NoValidData { .. })));
    }

    #[test]
    fn test_merge_matches_single_pass() {
        let values: Vec<f64> = (0..101).map(|i| (i as f64 * 0.37).sin() * 10.0).collect();
        let whole = run(&values).unwrap();

        let mut a = DispersionAccumulator::new();
        let mut b = DispersionAccumulator::new();
        for &v in &values[..40] {
            a.push(v);
        }
        for &v in &values[40..] {
            b.push(v);
        }
        a.merge(&b);
        let merged = a.finalize().unwrap();
        assert!((merged.mean - whole.mean).abs() < 1e-12);
        assert!((merged.std - whole.std).abs() < 1e-12);
        assert_eq!(merged.min, whole.min);
        assert_eq!(merged.max, whole.max);
    }
}

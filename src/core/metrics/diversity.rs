//! Shannon diversity over whitelisted classes.
//!
//! `H = -sum(p_i * ln(p_i))` where `p_i` is the share of class `i` among the
//! cells that match the whitelist. Cells with other values, or no data, are
//! outside the population altogether.
use serde::{Deserialize, Serialize};

use crate::core::metrics::histogram::{ClassCounts, ClassHistogram, ClassWhitelist};
use crate::core::scan::Accumulator;
use crate::error::{Error, Result};
use crate::types::Dimensions;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiversityResult {
    /// Shannon index H
    pub shannon: f64,
    /// Class codes, in whitelist order
    pub classes: Vec<i64>,
    /// Share of each whitelisted class, in whitelist order
    pub proportions: Vec<f64>,
    /// Cells whose value is in the whitelist
    pub valid_count: u64,
}

impl DiversityResult {
    /// Simpson diversity `1 - sum(p_i^2)`.
    pub fn simpson(&self) -> f64 {
        1.0 - self.proportions.iter().map(|p| p * p).sum::<f64>()
    }

    /// Number of whitelisted classes actually present.
    pub fn richness(&self) -> usize {
        self.proportions.iter().filter(|&&p| p > 0.0).count()
    }

    /// Pielou evenness `H / ln(k)` over the k present classes; 0 when k <= 1.
    pub fn evenness(&self) -> f64 {
        let k = self.richness();
        if k <= 1 {
            0.0
        } else {
            self.shannon / (k as f64).ln()
        }
    }
}

/// Proportions and Shannon index from per-class counts.
pub fn diversity_index(counts: &ClassCounts) -> Result<DiversityResult> {
    let total = counts.total();
    if total == 0 {
        return Err(Error::NoValidData { metric: "diversity" });
    }
    let total_f = total as f64;
    let mut shannon = 0.0;
    let proportions: Vec<f64> = counts
        .counts
        .iter()
        .map(|&c| {
            let p = c as f64 / total_f;
            if p > 0.0 {
                shannon -= p * p.ln();
            }
            p
        })
        .collect();

    Ok(DiversityResult {
        // a single class gives -(1 * ln 1) = -0.0
        shannon: shannon.max(0.0),
        classes: counts.codes.clone(),
        proportions,
        valid_count: total,
    })
}

/// Class histogram that finalizes straight into a [`DiversityResult`].
#[derive(Debug, Clone)]
pub struct DiversityAccumulator<'w> {
    histogram: ClassHistogram<'w>,
}

impl<'w> DiversityAccumulator<'w> {
    pub fn new(whitelist: &'w ClassWhitelist) -> Self {
        Self {
            histogram: ClassHistogram::new(whitelist),
        }
    }
}

impl Accumulator for DiversityAccumulator<'_> {
    type Output = DiversityResult;

    fn begin(&mut self, dims: Dimensions) {
        self.histogram.begin(dims);
    }

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        self.histogram.accept(cell);
    }

    fn finalize(self) -> Result<DiversityResult> {
        diversity_index(&self.histogram.finalize()?)
    }
}

use std::collections::HashMap;

use crate::core::scan::Accumulator;
use crate::error::{Error, Result};

/// 2^63: first magnitude past the `i64` range.
const CLASS_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// Class code of a raw value: nearest integer, halves away from zero.
/// `None` when the rounded value does not fit an `i64`.
#[inline]
pub fn class_of(v: f64) -> Option<i64> {
    let r = v.round();
    if r >= -CLASS_BOUND && r < CLASS_BOUND {
        Some(r as i64)
    } else {
        None
    }
}

/// Ordered, non-empty set of distinct class codes.
///
/// The order is the caller's and fixes the order of every per-class output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassWhitelist {
    codes: Vec<i64>,
    index: HashMap<i64, usize>,
}

impl ClassWhitelist {
    pub fn new(codes: &[i64]) -> Result<Self> {
        if codes.is_empty() {
            return Err(Error::EmptyClassList);
        }
        let mut index = HashMap::with_capacity(codes.len());
        for (i, &code) in codes.iter().enumerate() {
            if index.insert(code, i).is_some() {
                return Err(Error::DuplicateClass { code });
            }
        }
        Ok(Self {
            codes: codes.to_vec(),
            index,
        })
    }

    /// Build from floating-point codes, rounding each to its class.
    /// Codes that collide after rounding count as duplicates.
    pub fn from_values(values: &[f64]) -> Result<Self> {
        let mut codes = Vec::with_capacity(values.len());
        for &v in values {
            match class_of(v) {
                Some(code) => codes.push(code),
                None => return Err(Error::invalid_argument("class", v)),
            }
        }
        Self::new(&codes)
    }

    pub fn codes(&self) -> &[i64] {
        &self.codes
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Position of `code` in the whitelist.
    #[inline]
    pub fn position(&self, code: i64) -> Option<usize> {
        self.index.get(&code).copied()
    }

    pub fn contains(&self, code: i64) -> bool {
        self.index.contains_key(&code)
    }
}

/// Per-class counts in whitelist order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassCounts {
    pub codes: Vec<i64>,
    pub counts: Vec<u64>,
}

impl ClassCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}

/// Counts valid cells per whitelisted class; everything else is ignored.
#[derive(Debug, Clone)]
pub struct ClassHistogram<'w> {
    whitelist: &'w ClassWhitelist,
    counts: Vec<u64>,
}

impl<'w> ClassHistogram<'w> {
    pub fn new(whitelist: &'w ClassWhitelist) -> Self {
        Self {
            whitelist,
            counts: vec![0; whitelist.len()],
        }
    }
}

impl Accumulator for ClassHistogram<'_> {
    type Output = ClassCounts;

    #[inline]
    fn accept(&mut self, cell: Option<f64>) {
        if let Some(i) = cell
            .and_then(class_of)
            .and_then(|c| self.whitelist.position(c)) {
            self.counts[i] += 1;
        }
    }

    fn finalize(self) -> Result<ClassCounts> {
        Ok(ClassCounts {
            codes: self.whitelist.codes.clone(),
            counts: self.counts,
        })
    }
}

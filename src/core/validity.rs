//! No-data policy shared by every metric.
use crate::types::ValueKind;

/// Relative tolerance for matching a floating-point no-data sentinel.
///
/// The comparison is `|v - nd| <= NODATA_RELATIVE_TOLERANCE * |nd|`, which is
/// exact equality for a sentinel of zero.
pub const NODATA_RELATIVE_TOLERANCE: f64 = 1e-6;

/// Decides whether a raw cell value carries data.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoDataFilter {
    sentinel: Option<f64>,
    kind: ValueKind,
}

impl NoDataFilter {
    pub fn new(sentinel: Option<f64>, kind: ValueKind) -> Self {
        Self { sentinel, kind }
    }

    pub fn sentinel(&self) -> Option<f64> {
        self.sentinel
    }

    #[inline]
    pub fn is_valid(&self, v: f64) -> bool {
        // NaN and infinities never carry data, sentinel or not
        if !v.is_finite() {
            return false;
        }
        let Some(nd) = self.sentinel else {
            return true;
        };
        if nd.is_nan() {
            return true;
        }
        match self.kind {
            ValueKind::Integer => v != nd,
            ValueKind::Float => (v - nd).abs() > NODATA_RELATIVE_TOLERANCE * nd.abs(),
        }
    }

    /// `Some(v)` for a valid value, `None` otherwise.
    #[inline]
    pub fn filter(&self, v: f64) -> Option<f64> {
        if self.is_valid(v) { Some(v) } else { None }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_sentinel_accepts_finite() {
        let f = NoDataFilter::new(None, ValueKind::Integer);
        assert!(f.is_valid(0.0));
        assert!(f.is_valid(-9999.0));
        assert!(!f.is_valid(f64::NAN));
        assert!(!f.is_valid(f64::INFINITY));
    }

    #[test]
    fn test_integer_exact_match() {
        let f = NoDataFilter::new(Some(255.0), ValueKind::Integer);
        assert!(!f.is_valid(255.0));
        assert!(f.is_valid(254.0));
        assert!(f.is_valid(255.0 + 1e-9));
    }

    #[test]
    fn test_float_tolerance() {
        let f = NoDataFilter::new(Some(-3.4028234663852886e38), ValueKind::Float);
        // f32::MIN widened to f64 and re-rounded
        assert!(!f.is_valid(f32::MIN as f64));
        assert!(f.is_valid(0.0));

        let f = NoDataFilter::new(Some(-9999.0), ValueKind::Float);
        assert!(!f.is_valid(-9999.0 + 1e-3));
        assert!(f.is_valid(-9999.1));
    }

    #[test]
    fn test_zero_sentinel_keeps_tiny_values() {
        let zero = NoDataFilter::new(Some(0.0), ValueKind::Float);
        assert!(!zero.is_valid(0.0));
        assert!(!zero.is_valid(-0.0));
        assert!(zero.is_valid(1e-7));
        assert!(zero.is_valid(-5e-7));
        assert!(zero.is_valid(1e-3));
    }

    #[test]
    fn test_nan_sentinel() {
        let f = NoDataFilter::new(Some(f64::NAN), ValueKind::Float);
        assert!(!f.is_valid(f64::NAN));
        assert!(f.is_valid(1.5));
        assert_eq!(f.filter(2.0), Some(2.0));
    }
}

//! Core building blocks: scan options, the no-data filter, the scan
//! primitive, and the metric accumulators. These are consumed by the
//! high-level `api` module.
pub mod metrics;
pub mod params;
pub mod scan;
pub mod validity;

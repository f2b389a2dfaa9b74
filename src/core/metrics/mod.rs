//! Metric accumulators: dispersion, class histogram and Shannon diversity,
//! landscape shape index, and mean patch shape.
pub mod dispersion;
pub mod diversity;
pub mod histogram;
pub mod patches;
pub mod shape;

pub use dispersion::{DispersionAccumulator, DispersionResult};
pub use diversity::{DiversityAccumulator, DiversityResult, diversity_index};
pub use histogram::{ClassCounts, ClassHistogram, ClassWhitelist, class_of};
pub use patches::{PatchShapeAccumulator, PatchShapeResult};
pub use shape::{ShapeAccumulator, ShapeResult, min_perimeter};

//! Tunable constants shared by the mesh core, the hull builder and the
//! operators.

/// Default distance below which two points are the same vertex. Also the
/// half-width of the band in which a point counts as coplanar with a face.
pub const DEFAULT_TOLERANCE: f64 = 1e-7;

/// Vectors shorter than this cannot be normalized.
pub const MIN_NORM: f64 = 1e-12;

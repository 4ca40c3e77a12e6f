use crate::error::Result;
use crate::Solid;

/// A structural transformation that reads one solid and builds another.
/// The input is never modified.
pub trait Operation {
  fn apply(&self, solid: &Solid) -> Result<Solid>;
}

mod dual;
mod hull;
mod kis;
mod smooth;
mod snub;
mod truncate;

pub use dual::Dual;
pub use hull::Hull;
pub use kis::Kis;
pub use smooth::SmoothFaces;
pub use snub::Expand;
pub use snub::Snub;
pub use truncate::Truncate;
pub use truncate::TruncateVertex;

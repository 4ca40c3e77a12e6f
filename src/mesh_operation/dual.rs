use crate::error::Result;
use crate::mesh_operation::Operation;
use crate::Solid;

use clap::Args;

/// Swap faces and vertices: each vertex becomes the face through the
/// centroids of the faces around it.
#[derive(Args, Clone, Debug, Default)]
pub struct Dual {}

impl Operation for Dual {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.conway_dual()
  }
}

impl Solid {
  /// Faces of the result can be non-planar unless the input is regular.
  pub fn conway_dual(&self) -> Result<Solid> {
    let mut dual = Solid::new(self.name(), self.tolerance());

    for id in 0..self.num_vertices() {
      let mut face_centers: Vec<_> = self
        .faces_with_vertex(id)?
        .into_iter()
        .map(|face_id| self.face_ref(face_id).center())
        .collect();
      face_centers.reverse();
      dual.add_face(&face_centers);
    }

    Ok(dual)
  }
}

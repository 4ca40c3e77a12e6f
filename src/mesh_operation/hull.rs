use crate::convex_solid::ConvexSolid;
use crate::error::Result;
use crate::mesh_operation::Operation;
use crate::Solid;

use clap::Args;

/// Replace a solid by the convex hull of its vertices.
#[derive(Args, Clone, Debug, Default)]
pub struct Hull {}

impl Operation for Hull {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    let hull =
      ConvexSolid::hull(solid.name(), solid.vertices(), solid.tolerance())?;
    Ok(hull.into_solid())
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::PlatonicSolid;

  #[test]
  fn hull_drops_interior_vertices() {
    let tetrahedron = PlatonicSolid::Tetrahedron.build("tet", 2.0).unwrap();
    let dented = tetrahedron.conway_kis(-0.1).unwrap();
    assert_eq!(dented.num_vertices(), 8);

    let hull = Hull {}.apply(&dented).unwrap();
    assert_eq!(hull.num_vertices(), 4);
    assert_eq!(hull.num_faces(), 4);
    for v in tetrahedron.vertices() {
      assert!(hull.find_vertex(v).is_some());
    }
  }

  #[test]
  fn hull_of_a_cube_keeps_square_faces() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    let hull = Hull {}.apply(&cube).unwrap();

    assert_eq!(hull.num_vertices(), 8);
    assert_eq!(hull.num_faces(), 6);
    assert!(hull.face_refs().all(|f| f.num_sides() == 4));
  }
}

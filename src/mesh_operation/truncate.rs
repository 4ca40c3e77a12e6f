use crate::config::MIN_NORM;
use crate::data_structure::{FaceId, Point, VertexId};
use crate::error::{MeshError, Result};
use crate::mesh_operation::Operation;
use crate::utils::{normalize, replace_all};
use crate::Solid;

use clap::Args;
use ordered_float::OrderedFloat;
use std::collections::HashMap;

/// Cut a single vertex off at a given depth.
#[derive(Args, Clone, Debug)]
pub struct TruncateVertex {
  /// Vertex to cut off
  pub id: VertexId,
  /// Distance from the vertex to the cutting plane
  pub depth: f64,
}

impl Operation for TruncateVertex {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.truncate_vertex(self.id, self.depth)
  }
}

/// Cut off every vertex, each as deep as `proportion` of the furthest it
/// could go without passing a neighbour.
#[derive(Args, Clone, Debug)]
pub struct Truncate {
  /// Fraction of the maximum cut depth, in (0, 0.5]
  pub proportion: f64,
}

/// Past this the cuts from the two ends of an edge can cross. At exactly
/// this value they meet on the shortest edges.
const MAX_PROPORTION: f64 = 0.5;

impl Operation for Truncate {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.conway_truncate(self.proportion)
  }
}

struct VertexCut {
  neighbors: Vec<VertexId>,
  // from each neighbour towards the vertex
  edge_vecs: Vec<Point>,
  // outward, so the cutting plane sits along -normal
  normal: Point,
}

impl Solid {
  fn vertex_cut(&self, id: VertexId) -> Result<VertexCut> {
    let v = self.get_position(id)?;
    let neighbors = self.neighbors_sorted(id)?;
    let edge_vecs: Vec<Point> =
      neighbors.iter().map(|n| v - self.vertices()[*n]).collect();

    let mut unit_sum = Point::zeros();
    for edge_vec in &edge_vecs {
      unit_sum += normalize(edge_vec)?;
    }
    let normal = normalize(&unit_sum)?;

    Ok(VertexCut {
      neighbors,
      edge_vecs,
      normal,
    })
  }

  /// Replace vertex `id` by a ring of points, one on each of its edges,
  /// where the edges cross a plane `depth` behind the vertex. The ring
  /// becomes a new face and every face around the vertex takes the two
  /// ring points on its sides in place of it.
  pub fn truncate_vertex(&self, id: VertexId, depth: f64) -> Result<Solid> {
    if depth <= 0.0 {
      return Err(MeshError::InvalidArgument(format!(
        "cut depth must be positive, got {}",
        depth
      )));
    }

    let v = self.get_position(id)?;
    let cut = self.vertex_cut(id)?;
    let cut_normal = -cut.normal * depth;

    let mut cut_pts = HashMap::with_capacity(cut.neighbors.len());
    let mut cap = Vec::with_capacity(cut.neighbors.len());
    for (neighbor, edge_vec) in cut.neighbors.iter().zip(&cut.edge_vecs) {
      let unit = normalize(edge_vec)?;
      let slope = unit.dot(&cut_normal);
      if slope.abs() < MIN_NORM {
        return Err(MeshError::ZeroLengthVector);
      }
      let along = depth * depth / slope;
      if -along > edge_vec.norm() + self.tolerance() {
        return Err(MeshError::InvalidArgument(format!(
          "cut depth {} passes neighbour {} of vertex {}",
          depth, neighbor, id
        )));
      }
      let cut_pt = v + unit * along;
      cut_pts.insert(*neighbor, cut_pt);
      cap.push(cut_pt);
    }

    let cut_pt = |face: FaceId, neighbor: Option<VertexId>| {
      neighbor
        .and_then(|n| cut_pts.get(&n).copied())
        .ok_or(MeshError::MissingImage {
          face,
          vertex: neighbor.unwrap_or(id),
        })
    };

    let mut truncated = Solid::new(self.name(), self.tolerance());
    truncated.add_face(&cap);

    for face in self.face_refs() {
      let coords = face.all_coords();
      if face.face().contains(id) {
        let cut1 = cut_pt(face.id(), face.face().prev_id(id))?;
        let cut2 = cut_pt(face.id(), face.face().next_id(id))?;
        truncated.add_face(&replace_all(&coords, &v, &[cut1, cut2]));
      } else {
        truncated.add_face(&coords);
      }
    }

    Ok(truncated)
  }

  /// Truncate every vertex in turn. Cut depths come from this solid so
  /// earlier cuts do not change later ones. Each cut runs at most
  /// `proportion` of the way along any of its edges, so a proportion of
  /// one half or less keeps the cuts from the two ends of an edge apart.
  pub fn conway_truncate(&self, proportion: f64) -> Result<Solid> {
    if !(proportion > 0.0 && proportion <= MAX_PROPORTION) {
      return Err(MeshError::InvalidArgument(format!(
        "truncation proportion must be in (0, {}], got {}",
        MAX_PROPORTION, proportion
      )));
    }

    let mut truncated = self.copy(self.name());

    for id in 0..self.num_vertices() {
      let cut = self.vertex_cut(id)?;
      let min_projection = match cut
        .edge_vecs
        .iter()
        .map(|edge_vec| OrderedFloat(cut.normal.dot(edge_vec)))
        .min()
      {
        Some(OrderedFloat(projection)) => projection,
        None => continue,
      };

      let v = self.vertices()[id];
      let current = truncated.find_vertex(&v).ok_or(MeshError::VertexNotFound {
        x: v.x,
        y: v.y,
        z: v.z,
      })?;
      truncated = truncated.truncate_vertex(current, proportion * min_projection)?;
    }

    log::debug!(
      "{}: truncated {} vertices into {} faces",
      self.name(),
      self.num_vertices(),
      truncated.num_faces()
    );

    Ok(truncated)
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::catalog::PlatonicSolid;
  use approx::assert_relative_eq;

  #[test]
  fn truncating_one_corner_adds_a_cap() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    let id = cube.find_vertex(&Point::new(1.0, 1.0, 1.0)).unwrap();
    let degree = cube.neighbors(id).unwrap().len();

    let cut = TruncateVertex { id, depth: 0.3 }.apply(&cube).unwrap();

    assert_eq!(cut.num_vertices(), cube.num_vertices() + degree - 1);
    assert_eq!(cut.num_faces(), cube.num_faces() + 1);
    assert_eq!(cut.euler_characteristic(), 2);
    assert!(cut.find_vertex(&Point::new(1.0, 1.0, 1.0)).is_none());
    for other in cube.vertices().iter().filter(|v| v.x + v.y + v.z < 3.0) {
      assert!(cut.find_vertex(other).is_some());
    }
  }

  #[test]
  fn cut_points_lie_on_the_cutting_plane() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    let corner = Point::new(1.0, 1.0, 1.0);
    let id = cube.find_vertex(&corner).unwrap();
    let cut = cube.truncate_vertex(id, 0.3).unwrap();

    let inward = -corner.normalize();
    let cap = cut.face(0).unwrap();
    assert_eq!(cap.num_sides(), 3);
    for point in cap.all_coords() {
      assert_relative_eq!(inward.dot(&(point - corner)), 0.3, epsilon = 1e-12);
    }
    assert!(cap.normal().unwrap().dot(&corner) > 0.0);
  }

  #[test]
  fn truncated_cube() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    let truncated = Truncate { proportion: 1.0 / 3.0 }.apply(&cube).unwrap();

    assert_eq!(truncated.num_vertices(), 24);
    assert_eq!(truncated.num_faces(), 14);
    assert_eq!(truncated.euler_characteristic(), 2);
    let octagons = truncated.face_refs().filter(|f| f.num_sides() == 8).count();
    assert_eq!(octagons, 6);
  }

  #[test]
  fn bad_parameters_are_rejected() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    assert!(cube.conway_truncate(0.0).is_err());
    assert!(cube.conway_truncate(1.5).is_err());
    assert!(cube.truncate_vertex(0, -1.0).is_err());
    assert!(cube.truncate_vertex(0, 5.0).is_err());
    assert!(matches!(
      cube.truncate_vertex(99, 0.1),
      Err(MeshError::VertexOutOfRange { .. })
    ));
  }

  #[test]
  fn crossing_cuts_are_rejected() {
    for kind in PlatonicSolid::ALL {
      let solid = kind.build("solid", 1.0).unwrap();
      for proportion in [0.6, 1.0] {
        assert!(matches!(
          solid.conway_truncate(proportion),
          Err(MeshError::InvalidArgument(_))
        ));
      }
    }
  }

  #[test]
  fn half_truncation_rectifies() {
    let cube = PlatonicSolid::Cube.build("cube", 2.0).unwrap();
    let cuboctahedron = cube.conway_truncate(0.5).unwrap();

    assert_eq!(cuboctahedron.num_vertices(), 12);
    assert_eq!(cuboctahedron.num_faces(), 14);
    assert_eq!(cuboctahedron.num_edges(), 24);
    for v in cuboctahedron.vertices() {
      assert_relative_eq!(v.norm(), 2.0_f64.sqrt(), epsilon = 1e-9);
    }
  }
}

//! Incremental convex hull.
//!
//! Seeds a tetrahedron from the first four non-coplanar points, then inserts
//! the rest one at a time: the faces a new point can see are cut away along
//! their horizon and the hole is closed with a fan of triangles to the point.
//! A point lying in the plane of a hidden face next to the horizon is folded
//! into that face instead, so coplanar points build polygons rather than
//! slivers.

use crate::data_structure::{FaceId, Point, Solid, VertexId};
use crate::error::{MeshError, Result};
use crate::utils::{distance, normalize};

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::ops::Deref;

pub struct ConvexSolid {
  solid: Solid,
}

impl Deref for ConvexSolid {
  type Target = Solid;

  fn deref(&self) -> &Solid {
    &self.solid
  }
}

impl From<ConvexSolid> for Solid {
  fn from(convex: ConvexSolid) -> Solid {
    convex.solid
  }
}

impl ConvexSolid {
  pub fn new(name: impl Into<String>, tolerance: f64) -> Self {
    ConvexSolid {
      solid: Solid::new(name, tolerance),
    }
  }

  pub fn into_solid(self) -> Solid {
    self.solid
  }

  pub fn translate(&mut self, offset: &Point) -> &mut Self {
    self.solid.translate(offset);
    self
  }

  pub fn origin_dilate(&mut self, factor: f64) -> &mut Self {
    self.solid.origin_dilate(factor);
    self
  }

  /// True when no face sees `point`, i.e. it is inside or on the hull.
  pub fn contains(&self, point: &Point) -> Result<bool> {
    for face in self.solid.face_refs() {
      if face.is_visible(point, true)? {
        return Ok(false);
      }
    }
    Ok(true)
  }

  /// Tetrahedron over four non-coplanar points with every face pointing
  /// away from the centroid.
  pub fn tetrahedron(
    name: impl Into<String>,
    points: [Point; 4],
    tolerance: f64,
  ) -> Result<Self> {
    let [p1, p2, p3, p4] = points;
    let projection = plane_offset([p1, p2, p3], &p4)?;
    if projection.abs() <= tolerance {
      return Err(MeshError::DegenerateHull {
        reason: "tetrahedron points are coplanar".to_string(),
      });
    }

    let faces = if projection > 0.0 {
      [[p1, p3, p2], [p2, p3, p4], [p1, p2, p4], [p1, p4, p3]]
    } else {
      [[p1, p2, p3], [p2, p4, p3], [p1, p4, p2], [p1, p3, p4]]
    };

    let mut convex = ConvexSolid::new(name, tolerance);
    for face in faces.iter() {
      if convex.solid.add_face(face).is_none() {
        return Err(MeshError::DegenerateHull {
          reason: "tetrahedron points coincide".to_string(),
        });
      }
    }

    Ok(convex)
  }

  /// Convex hull of `points`. The result's vertices are the extreme points
  /// (up to `tolerance`).
  pub fn hull(
    name: impl Into<String>,
    points: &[Point],
    tolerance: f64,
  ) -> Result<Self> {
    let seeds = seed_indices(points, tolerance)?;
    let mut convex =
      ConvexSolid::tetrahedron(name, seeds.map(|i| points[i]), tolerance)?;

    let mut inserted = 0;
    for (i, point) in points.iter().enumerate() {
      if !seeds.contains(&i) && convex.add_hull_vertex(point)? {
        inserted += 1;
      }
    }

    log::debug!(
      "{}: hull of {} points grew {} times, {} vertices and {} faces",
      convex.name(),
      points.len(),
      inserted,
      convex.num_vertices(),
      convex.num_faces()
    );

    Ok(convex)
  }

  /// Grow the hull to include `point`. Returns false when it was already
  /// inside.
  pub fn add_hull_vertex(&mut self, point: &Point) -> Result<bool> {
    if self.contains(point)? {
      return Ok(false);
    }

    let solid = &self.solid;

    let mut visible = HashSet::new();
    let mut visible_ids = Vec::new();
    for face in solid.face_refs() {
      if face.is_visible(point, true)? {
        visible.insert(face.id());
        visible_ids.push(face.id());
      }
    }

    let horizon = solid.boundary(&visible_ids)?;
    let mut grown = Solid::new(solid.name(), solid.tolerance());

    // hidden faces coplanar with the point, with the edges it folds across
    let mut folded: BTreeMap<FaceId, Vec<(VertexId, VertexId)>> =
      BTreeMap::new();

    let n = horizon.len();
    for i in 0..n {
      let (v1, v2) = (horizon[i], horizon[(i + 1) % n]);
      let [_, adjacent] = solid.faces_with_edge(v1, v2)?;

      if solid.face_ref(adjacent).is_visible(point, false)? {
        folded.entry(adjacent).or_default().push((v2, v1));
      } else {
        grown.add_face(&[
          solid.get_position(v1)?,
          solid.get_position(v2)?,
          *point,
        ]);
      }
    }

    for (face_id, edges) in &folded {
      let ring = fold_apex(solid.faces()[*face_id].vertex_ids(), edges);
      let coords: Vec<Point> = ring
        .iter()
        .map(|slot| match slot {
          Some(id) => solid.vertices()[*id],
          None => *point,
        })
        .collect();
      grown.add_face(&coords);
    }

    for face in solid.face_refs() {
      let id = face.id();
      if !visible.contains(&id) && !folded.contains_key(&id) {
        grown.add_face(&face.all_coords());
      }
    }

    self.solid.overwrite(&grown);
    Ok(true)
  }
}

/// Signed distance of `point` from the plane of `triangle`, measured from
/// the triangle's centroid along its right-handed normal.
fn plane_offset(triangle: [Point; 3], point: &Point) -> Result<f64> {
  let [p1, p2, p3] = triangle;
  let normal = normalize(&(p3 - p2).cross(&(p1 - p2))).map_err(|_| {
    MeshError::DegenerateHull {
      reason: "seed triangle is collinear".to_string(),
    }
  })?;
  Ok(normal.dot(&(point - (p1 + p2 + p3) / 3.0)))
}

/// Indices of four points spanning a tetrahedron: the first point, the
/// first one apart from it, the first one off their line and the first one
/// off the plane of those three.
fn seed_indices(points: &[Point], tolerance: f64) -> Result<[usize; 4]> {
  let degenerate = |reason: &str| MeshError::DegenerateHull {
    reason: reason.to_string(),
  };

  if points.len() < 4 {
    return Err(MeshError::DegenerateHull {
      reason: format!("need at least 4 points, got {}", points.len()),
    });
  }

  let p1 = points[0];
  let second = (1..points.len())
    .find(|i| distance(&points[*i], &p1) > tolerance)
    .ok_or_else(|| degenerate("all points coincide"))?;
  let direction = normalize(&(points[second] - p1))?;

  let third = (second + 1..points.len())
    .find(|i| (points[*i] - p1).cross(&direction).norm() > tolerance)
    .ok_or_else(|| degenerate("all points are collinear"))?;

  let triangle = [p1, points[second], points[third]];
  let mut fourth = None;
  for i in (1..points.len()).filter(|i| *i != second && *i != third) {
    if plane_offset(triangle, &points[i])?.abs() > tolerance {
      fourth = Some(i);
      break;
    }
  }
  let fourth = fourth.ok_or_else(|| degenerate("all points are coplanar"))?;

  Ok([0, second, third, fourth])
}

/// Splice an apex (`None`) into `cycle` along each of `edges`. A vertex left
/// between two apex slots lies inside the folded polygon and is dropped.
fn fold_apex(
  cycle: &[VertexId],
  edges: &[(VertexId, VertexId)],
) -> Vec<Option<VertexId>> {
  let n = cycle.len();
  let mut ring = Vec::with_capacity(n + edges.len());
  for i in 0..n {
    let (tail, head) = (cycle[i], cycle[(i + 1) % n]);
    ring.push(Some(tail));
    if edges.contains(&(tail, head)) {
      ring.push(None);
    }
  }

  loop {
    let len = ring.len();
    if len < 3 {
      break;
    }
    let swallowed = (0..len).find(|i| {
      ring[*i].is_some()
        && ring[(i + len - 1) % len].is_none()
        && ring[(i + 1) % len].is_none()
    });
    match swallowed {
      Some(i) => {
        ring.remove(i);
        let apex = i % ring.len();
        ring.remove(apex);
      }
      None => break,
    }
  }

  ring
}

#[cfg(test)]
mod tests {
  use super::*;

  fn cube_points() -> Vec<Point> {
    let mut points = Vec::new();
    for x in &[-1.0, 1.0] {
      for y in &[-1.0, 1.0] {
        for z in &[-1.0, 1.0] {
          points.push(Point::new(*x, *y, *z));
        }
      }
    }
    points
  }

  #[test]
  fn fold_inserts_apex_after_edge_tail() {
    assert_eq!(
      fold_apex(&[0, 1, 2, 3], &[(1, 2)]),
      vec![Some(0), Some(1), None, Some(2), Some(3)]
    );
  }

  #[test]
  fn fold_across_adjacent_edges_drops_the_corner() {
    assert_eq!(
      fold_apex(&[0, 1, 2, 3], &[(1, 2), (2, 3)]),
      vec![Some(0), Some(1), None, Some(3)]
    );
    assert_eq!(
      fold_apex(&[0, 1, 2, 3], &[(3, 0), (0, 1)]),
      vec![Some(1), Some(2), Some(3), None]
    );
  }

  #[test]
  fn tetrahedron_faces_point_outward() {
    let points = [
      Point::new(0.0, 0.0, 0.0),
      Point::new(1.0, 0.0, 0.0),
      Point::new(0.0, 1.0, 0.0),
      Point::new(0.0, 0.0, 1.0),
    ];
    let center = points.iter().sum::<Point>() / 4.0;

    for order in &[[0, 1, 2, 3], [0, 2, 1, 3]] {
      let tetrahedron = ConvexSolid::tetrahedron(
        "tetrahedron",
        [
          points[order[0]],
          points[order[1]],
          points[order[2]],
          points[order[3]],
        ],
        1e-7,
      )
      .unwrap();

      assert_eq!(tetrahedron.num_vertices(), 4);
      assert_eq!(tetrahedron.num_faces(), 4);
      for face in tetrahedron.face_refs() {
        assert_eq!(face.num_sides(), 3);
        let normal = face.normal().unwrap();
        assert!(normal.dot(&(face.center() - center)) > 0.0);
      }
    }
  }

  #[test]
  fn coplanar_tetrahedron_is_rejected() {
    let result = ConvexSolid::tetrahedron(
      "flat",
      [
        Point::new(0.0, 0.0, 0.0),
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(1.0, 1.0, 0.0),
      ],
      1e-7,
    );
    assert!(matches!(result, Err(MeshError::DegenerateHull { .. })));
  }

  #[test]
  fn interior_points_leave_the_hull_alone() {
    let mut hull = ConvexSolid::hull("cube", &cube_points(), 1e-7).unwrap();
    assert!(!hull.add_hull_vertex(&Point::new(0.2, -0.3, 0.5)).unwrap());
    assert!(!hull.add_hull_vertex(&Point::new(1.0, 0.0, 0.0)).unwrap());
    assert_eq!(hull.num_vertices(), 8);
  }

  #[test]
  fn coplanar_cube_corners_make_square_faces() {
    let hull = ConvexSolid::hull("cube", &cube_points(), 1e-7).unwrap();
    assert_eq!(hull.num_vertices(), 8);
    assert_eq!(hull.num_edges(), 12);
    assert_eq!(hull.num_faces(), 6);
    assert!(hull.face_refs().all(|face| face.num_sides() == 4));
  }

  #[test]
  fn point_beyond_a_corner_swallows_it() {
    let mut hull = ConvexSolid::hull("cube", &cube_points(), 1e-7).unwrap();
    assert!(hull.add_hull_vertex(&Point::new(1.5, 1.5, 1.0)).unwrap());

    assert!(hull.find_vertex(&Point::new(1.0, 1.0, 1.0)).is_none());
    assert_eq!(hull.num_vertices(), 8);
    assert_eq!(hull.euler_characteristic(), 2);
    for point in cube_points() {
      assert!(hull.contains(&point).unwrap());
    }
  }

  #[test]
  fn seeding_skips_collinear_and_repeated_points() {
    let origin = Point::new(0.0, 0.0, 0.0);
    let x = Point::new(1.0, 0.0, 0.0);
    let y = Point::new(0.0, 1.0, 0.0);
    let z = Point::new(0.0, 0.0, 1.0);

    let collinear = [origin, x, Point::new(2.0, 0.0, 0.0), y, z];
    assert_eq!(seed_indices(&collinear, 1e-7).unwrap(), [0, 1, 3, 4]);
    let hull = ConvexSolid::hull("collinear", &collinear, 1e-7).unwrap();
    assert_eq!(hull.euler_characteristic(), 2);
    for point in &collinear {
      assert!(hull.contains(point).unwrap());
    }

    let repeated = [origin, origin, x, y, z];
    assert_eq!(seed_indices(&repeated, 1e-7).unwrap(), [0, 2, 3, 4]);
    let hull = ConvexSolid::hull("repeated", &repeated, 1e-7).unwrap();
    assert_eq!(hull.num_vertices(), 4);
    assert_eq!(hull.num_faces(), 4);
  }

  #[test]
  fn lattice_in_scan_order() {
    let mut points = Vec::new();
    for i in 0..4 {
      for j in 0..4 {
        for k in 0..4 {
          points.push(Point::new(i as f64, j as f64, k as f64));
        }
      }
    }

    let hull = ConvexSolid::hull("lattice", &points, 1e-7).unwrap();
    assert_eq!(hull.euler_characteristic(), 2);
    for point in &points {
      assert!(hull.contains(point).unwrap());
    }
  }

  #[test]
  fn hull_and_tetrahedron_agree_on_coplanarity() {
    let triangle = [
      Point::new(0.0, 0.0, 0.0),
      Point::new(1.0, 0.0, 0.0),
      Point::new(0.0, 1.0, 0.0),
    ];
    let near = Point::new(0.2, 0.2, 1.2e-7);
    let nearer = Point::new(0.2, 0.2, 0.8e-7);

    let points = [triangle[0], triangle[1], triangle[2], near];
    let hull = ConvexSolid::hull("thin", &points, 1e-7).unwrap();
    assert_eq!(hull.num_faces(), 4);

    let points = [triangle[0], triangle[1], triangle[2], nearer];
    assert!(matches!(
      ConvexSolid::hull("flat", &points, 1e-7),
      Err(MeshError::DegenerateHull { .. })
    ));
  }

  #[test]
  fn too_few_or_flat_points_fail() {
    let flat: Vec<Point> = (0..6)
      .map(|i| Point::new(i as f64, (i * i) as f64, 0.0))
      .collect();
    assert!(matches!(
      ConvexSolid::hull("flat", &flat, 1e-7),
      Err(MeshError::DegenerateHull { .. })
    ));
    assert!(matches!(
      ConvexSolid::hull("short", &flat[..3], 1e-7),
      Err(MeshError::DegenerateHull { .. })
    ));
  }
}

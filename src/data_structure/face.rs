use crate::data_structure::base::{DirectedEdge, FaceId, Point, VertexId};
use crate::data_structure::Solid;
use crate::error::{MeshError, Result};
use crate::utils::{get_normal, normalize};

use std::collections::HashMap;

/// A cyclic sequence of vertex ids. Counterclockwise when seen from outside,
/// so the right-hand rule gives the outward normal.
#[derive(Clone, Debug)]
pub struct Face {
  vertex_ids: Vec<VertexId>,
  vertex_lookup: HashMap<VertexId, usize>,
}

impl Face {
  pub(crate) fn new(vertex_ids: Vec<VertexId>) -> Self {
    let vertex_lookup = vertex_ids
      .iter()
      .enumerate()
      .map(|(index, id)| (*id, index))
      .collect();

    Face {
      vertex_ids,
      vertex_lookup,
    }
  }

  pub fn vertex_ids(&self) -> &[VertexId] {
    &self.vertex_ids
  }

  pub fn num_sides(&self) -> usize {
    self.vertex_ids.len()
  }

  /// Id at a cyclic position.
  pub fn get_id(&self, index: usize) -> VertexId {
    self.vertex_ids[index % self.vertex_ids.len()]
  }

  pub fn contains(&self, id: VertexId) -> bool {
    self.vertex_lookup.contains_key(&id)
  }

  /// The vertex after `id` going counterclockwise.
  pub fn next_id(&self, id: VertexId) -> Option<VertexId> {
    self
      .vertex_lookup
      .get(&id)
      .map(|index| self.get_id(index + 1))
  }

  /// The vertex before `id` going counterclockwise.
  pub fn prev_id(&self, id: VertexId) -> Option<VertexId> {
    let n = self.vertex_ids.len();
    self
      .vertex_lookup
      .get(&id)
      .map(|index| self.get_id(index + n - 1))
  }

  pub fn edges(&self) -> impl Iterator<Item = DirectedEdge> + '_ {
    (0..self.vertex_ids.len()).map(move |i| (self.get_id(i), self.get_id(i + 1)))
  }
}

/// A triangle of an exported fan, with its outward unit normal.
#[derive(Clone, Debug, PartialEq)]
pub struct Triangle {
  pub points: [Point; 3],
  pub normal: Point,
}

impl Triangle {
  pub fn new(p1: Point, p2: Point, p3: Point) -> Result<Self> {
    let normal = normalize(&(p3 - p2).cross(&(p1 - p2)))?;
    Ok(Triangle {
      points: [p1, p2, p3],
      normal,
    })
  }
}

/// Handle to a face inside its owning solid, used for all geometric
/// queries that need coordinates.
#[derive(Clone, Copy)]
pub struct FaceRef<'a> {
  solid: &'a Solid,
  id: FaceId,
}

impl<'a> FaceRef<'a> {
  pub(crate) fn new(solid: &'a Solid, id: FaceId) -> Self {
    FaceRef { solid, id }
  }

  pub fn id(&self) -> FaceId {
    self.id
  }

  pub fn face(&self) -> &'a Face {
    &self.solid.faces()[self.id]
  }

  pub fn num_sides(&self) -> usize {
    self.face().num_sides()
  }

  pub fn get_coords(&self, index: usize) -> Point {
    self.solid.vertices()[self.face().get_id(index)]
  }

  pub fn all_coords(&self) -> Vec<Point> {
    (0..self.num_sides()).map(|i| self.get_coords(i)).collect()
  }

  pub fn center(&self) -> Point {
    self.all_coords().iter().sum::<Point>() / self.num_sides() as f64
  }

  fn corner_normal(&self, index: usize) -> Result<Point> {
    get_normal([
      self.get_coords(index),
      self.get_coords(index + 1),
      self.get_coords(index + 2),
    ])
  }

  /// Normal of the first three vertices. A collinear leading triple falls
  /// through to the next corner.
  pub fn normal(&self) -> Result<Point> {
    (0..self.num_sides())
      .find_map(|index| self.corner_normal(index).ok())
      .ok_or(MeshError::ZeroLengthVector)
  }

  /// Average of the unit normals at every corner. Usable on faces that are
  /// not quite planar.
  pub fn degenerate_normal(&self) -> Result<Point> {
    let total = (0..self.num_sides())
      .filter_map(|index| self.corner_normal(index).ok())
      .sum::<Point>();
    normalize(&total)
  }

  /// Strict: `point` lies beyond the face plane by more than the solid's
  /// tolerance. Loose: `point` is not inside by more than the tolerance, so
  /// coplanar points count.
  pub fn is_visible(&self, point: &Point, strict: bool) -> Result<bool> {
    let height = self.normal()?.dot(&(point - self.center()));
    let tolerance = self.solid.tolerance();
    Ok(if strict {
      height > tolerance
    } else {
      height > -tolerance
    })
  }

  /// Fan of triangles from the centroid across every edge.
  pub fn build(&self) -> Result<Vec<Triangle>> {
    let center = self.center();
    (0..self.num_sides())
      .map(|i| {
        Triangle::new(center, self.get_coords(i), self.get_coords(i + 1))
      })
      .collect()
  }
}

use crate::data_structure::base::{DirectedEdge, FaceId, Point, VertexId};
use crate::data_structure::face::{Face, FaceRef, Triangle};
use crate::error::{MeshError, Result};
use crate::utils::distance;

use std::collections::BTreeSet;
use std::collections::HashMap;
use std::collections::HashSet;

/// Polygonal mesh. Owns the vertex and face arenas along with two indices
/// derived from the faces: the undirected neighbour set of every vertex and
/// the face running along every directed edge.
///
/// On a closed, consistently oriented solid every directed edge maps to
/// exactly one face and its reverse maps to the face on the other side.
#[derive(Clone, Debug)]
pub struct Solid {
  name: String,
  tolerance: f64,
  vertices: Vec<Point>,
  edges: Vec<BTreeSet<VertexId>>,
  faces: Vec<Face>,
  faces_by_vertex: Vec<Vec<FaceId>>,
  faces_by_edge: HashMap<DirectedEdge, FaceId>,
}

impl Solid {
  pub fn new(name: impl Into<String>, tolerance: f64) -> Self {
    Solid {
      name: name.into(),
      tolerance,
      vertices: Vec::new(),
      edges: Vec::new(),
      faces: Vec::new(),
      faces_by_vertex: Vec::new(),
      faces_by_edge: HashMap::new(),
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn tolerance(&self) -> f64 {
    self.tolerance
  }

  pub fn num_vertices(&self) -> usize {
    self.vertices.len()
  }

  pub fn num_edges(&self) -> usize {
    self.edges.iter().map(BTreeSet::len).sum::<usize>() / 2
  }

  pub fn num_faces(&self) -> usize {
    self.faces.len()
  }

  /// V - E + F. Equal to 2 for a closed genus-0 solid.
  pub fn euler_characteristic(&self) -> i64 {
    self.num_vertices() as i64 - self.num_edges() as i64
      + self.num_faces() as i64
  }

  pub fn vertices(&self) -> &[Point] {
    &self.vertices
  }

  pub fn faces(&self) -> &[Face] {
    &self.faces
  }

  pub fn face(&self, id: FaceId) -> Option<FaceRef<'_>> {
    if id < self.faces.len() {
      Some(FaceRef::new(self, id))
    } else {
      None
    }
  }

  pub(crate) fn face_ref(&self, id: FaceId) -> FaceRef<'_> {
    FaceRef::new(self, id)
  }

  pub fn face_refs(&self) -> impl Iterator<Item = FaceRef<'_>> + '_ {
    (0..self.faces.len()).map(move |id| FaceRef::new(self, id))
  }

  fn check_vertex(&self, id: VertexId) -> Result<()> {
    if id < self.vertices.len() {
      Ok(())
    } else {
      Err(MeshError::VertexOutOfRange {
        id,
        count: self.vertices.len(),
      })
    }
  }

  pub fn get_position(&self, id: VertexId) -> Result<Point> {
    self.check_vertex(id)?;
    Ok(self.vertices[id])
  }

  pub fn set_position(&mut self, id: VertexId, position: &Point) -> Result<()> {
    self.check_vertex(id)?;
    self.vertices[id] = *position;
    Ok(())
  }

  pub fn neighbors(&self, id: VertexId) -> Result<&BTreeSet<VertexId>> {
    self.check_vertex(id)?;
    Ok(&self.edges[id])
  }

  /// Faces using vertex `id`, in no particular order.
  pub fn faces_touching(&self, id: VertexId) -> Result<&[FaceId]> {
    self.check_vertex(id)?;
    Ok(&self.faces_by_vertex[id])
  }

  /// Id of an existing vertex within tolerance of `point`.
  pub fn find_vertex(&self, point: &Point) -> Option<VertexId> {
    self
      .vertices
      .iter()
      .position(|v| distance(point, v) < self.tolerance)
  }

  /// Insert `point`, reusing an existing vertex within tolerance when
  /// `dedupe` is set.
  pub fn add_vertex(&mut self, point: &Point, dedupe: bool) -> VertexId {
    if dedupe {
      if let Some(id) = self.find_vertex(point) {
        return id;
      }
    }

    self.vertices.push(*point);
    self.edges.push(BTreeSet::new());
    self.faces_by_vertex.push(Vec::new());

    self.vertices.len() - 1
  }

  /// Record `a` and `b` as neighbours. Ignored when either is out of range.
  pub fn add_edge(&mut self, a: VertexId, b: VertexId) {
    if a.max(b) >= self.vertices.len() {
      return;
    }

    self.edges[a].insert(b);
    self.edges[b].insert(a);
  }

  /// Add a face through `points`, deduplicating them against the existing
  /// vertices. Runs of consecutive points that land on the same vertex
  /// collapse to one; returns `None` when fewer than three remain.
  pub fn add_face(&mut self, points: &[Point]) -> Option<FaceId> {
    let n = points.len();
    if n == 0 {
      return None;
    }

    let mut vertex_ids = Vec::with_capacity(n);
    let mut next_id = self.add_vertex(&points[0], true);
    for i in 0..n {
      let id = next_id;
      next_id = self.add_vertex(&points[(i + 1) % n], true);
      if id != next_id {
        vertex_ids.push(id);
      }
    }

    if vertex_ids.len() < 3 {
      log::debug!(
        "{}: dropping face of {} points that collapses to {} vertices",
        self.name,
        n,
        vertex_ids.len()
      );
      return None;
    }

    Some(self.insert_face(vertex_ids))
  }

  /// Add a face over vertices that already exist.
  pub fn add_face_ids(&mut self, vertex_ids: &[VertexId]) -> Result<FaceId> {
    if vertex_ids.len() < 3 {
      return Err(MeshError::DegenerateFace {
        sides: vertex_ids.len(),
      });
    }
    for id in vertex_ids {
      self.check_vertex(*id)?;
    }

    Ok(self.insert_face(vertex_ids.to_vec()))
  }

  fn insert_face(&mut self, vertex_ids: Vec<VertexId>) -> FaceId {
    let face_id = self.faces.len();
    let face = Face::new(vertex_ids);

    for (id, next_id) in face.edges() {
      self.add_edge(id, next_id);
      self.faces_by_vertex[id].push(face_id);
      self.faces_by_edge.insert((id, next_id), face_id);
    }

    self.faces.push(face);
    face_id
  }

  /// The face traversing `tail -> head`.
  pub fn face_on_edge(&self, tail: VertexId, head: VertexId) -> Result<FaceId> {
    self.check_vertex(tail)?;
    self.check_vertex(head)?;
    self
      .faces_by_edge
      .get(&(tail, head))
      .copied()
      .ok_or(MeshError::MissingEdge { tail, head })
  }

  /// `[face along a -> b, face along b -> a]`.
  pub fn faces_with_edge(&self, a: VertexId, b: VertexId) -> Result<[FaceId; 2]> {
    Ok([self.face_on_edge(a, b)?, self.face_on_edge(b, a)?])
  }

  /// Faces around `id` in fan order. Walks the directed-edge map, so the
  /// solid has to be closed and consistently oriented around `id`.
  pub fn faces_with_vertex(&self, id: VertexId) -> Result<Vec<FaceId>> {
    let neighbors = self.neighbors(id)?;
    let mut next_id = match neighbors.iter().next() {
      Some(next_id) => *next_id,
      None => return Ok(Vec::new()),
    };

    let mut faces = Vec::with_capacity(neighbors.len());
    for _ in 0..neighbors.len() {
      let face_id = self.face_on_edge(next_id, id)?;
      faces.push(face_id);
      next_id = self.faces[face_id].next_id(id).ok_or(MeshError::MissingEdge {
        tail: next_id,
        head: id,
      })?;
    }

    Ok(faces)
  }

  /// Neighbours of `id`, counterclockwise when seen from outside.
  pub fn neighbors_sorted(&self, id: VertexId) -> Result<Vec<VertexId>> {
    let mut neighbor_ids = Vec::new();
    for face_id in self.faces_with_vertex(id)? {
      if let Some(next_id) = self.faces[face_id].next_id(id) {
        neighbor_ids.push(next_id);
      }
    }
    neighbor_ids.reverse();

    Ok(neighbor_ids)
  }

  /// Perimeter of a patch of faces as a loop of vertex ids, oriented like
  /// the faces. The patch must have exactly one boundary loop; anything else
  /// is rejected rather than walked.
  pub fn boundary(&self, faces: &[FaceId]) -> Result<Vec<VertexId>> {
    if faces.is_empty() {
      return Ok(Vec::new());
    }

    let mut directed = HashSet::new();
    let mut ordered = Vec::new();
    for face_id in faces {
      let face = self.faces.get(*face_id).ok_or(MeshError::FaceOutOfRange {
        id: *face_id,
        count: self.faces.len(),
      })?;
      for edge in face.edges() {
        if directed.insert(edge) {
          ordered.push(edge);
        }
      }
    }

    // interior edges show up in both directions
    let boundary_edges: Vec<DirectedEdge> = ordered
      .into_iter()
      .filter(|(tail, head)| !directed.contains(&(*head, *tail)))
      .collect();

    let (start, mut head) =
      *boundary_edges.first().ok_or(MeshError::OpenBoundary)?;

    let mut successor = HashMap::with_capacity(boundary_edges.len());
    for (tail, head) in &boundary_edges {
      if successor.insert(*tail, *head).is_some() {
        return Err(MeshError::TangledBoundary);
      }
    }

    let mut boundary_ids = vec![start];
    while head != start {
      if boundary_ids.len() == boundary_edges.len() {
        return Err(MeshError::TangledBoundary);
      }
      boundary_ids.push(head);
      head = *successor.get(&head).ok_or(MeshError::OpenBoundary)?;
    }

    if boundary_ids.len() != boundary_edges.len() {
      return Err(MeshError::TangledBoundary);
    }

    Ok(boundary_ids)
  }

  /// Deep copy under a new name.
  pub fn copy(&self, name: impl Into<String>) -> Solid {
    Solid {
      name: name.into(),
      ..self.clone()
    }
  }

  /// Replace everything but the name with a copy of `other`.
  pub fn overwrite(&mut self, other: &Solid) -> &mut Self {
    *self = other.copy(std::mem::take(&mut self.name));
    self
  }

  pub fn translate(&mut self, offset: &Point) -> &mut Self {
    for v in &mut self.vertices {
      *v += offset;
    }
    self
  }

  pub fn origin_dilate(&mut self, factor: f64) -> &mut Self {
    for v in &mut self.vertices {
      *v *= factor;
    }
    self
  }

  /// Mean of the vertex positions.
  pub fn center(&self) -> Point {
    if self.vertices.is_empty() {
      return Point::zeros();
    }
    self.vertices.iter().sum::<Point>() / self.vertices.len() as f64
  }

  /// Triangle fans of every face.
  pub fn build(&self) -> Result<Vec<Triangle>> {
    let mut triangles = Vec::new();
    for face in self.face_refs() {
      triangles.extend(face.build()?);
    }
    Ok(triangles)
  }
}

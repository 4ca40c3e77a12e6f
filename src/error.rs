use crate::data_structure::{FaceId, VertexId};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, MeshError>;

#[derive(Debug, Error)]
pub enum MeshError {
  #[error("cannot build hull: {reason}")]
  DegenerateHull { reason: String },

  #[error("cannot normalize a zero-length vector")]
  ZeroLengthVector,

  #[error("vertex {id} out of range (solid has {count} vertices)")]
  VertexOutOfRange { id: VertexId, count: usize },

  #[error("no vertex within tolerance of ({x}, {y}, {z})")]
  VertexNotFound { x: f64, y: f64, z: f64 },

  #[error("face {id} out of range (solid has {count} faces)")]
  FaceOutOfRange { id: usize, count: usize },

  #[error("no face runs along edge {tail} -> {head}")]
  MissingEdge { tail: VertexId, head: VertexId },

  #[error("face {face} has no image of vertex {vertex}")]
  MissingImage { face: FaceId, vertex: VertexId },

  #[error("face needs at least 3 vertices, got {sides}")]
  DegenerateFace { sides: usize },

  #[error("face set has no closed boundary loop")]
  OpenBoundary,

  #[error("face set boundary is not a single simple loop")]
  TangledBoundary,

  #[error("invalid argument: {0}")]
  InvalidArgument(String),

  #[error("line {line}: {reason}")]
  Parse { line: usize, reason: String },

  #[error("no catalog solid with id {0}")]
  UnknownSolid(u32),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("obj error: {0}")]
  Obj(#[from] tobj::LoadError),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn missing_images_name_the_face_and_vertex() {
    let err = MeshError::MissingImage { face: 4, vertex: 7 };
    assert_eq!(err.to_string(), "face 4 has no image of vertex 7");
  }
}

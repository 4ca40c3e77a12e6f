use nalgebra::Vector3;

pub type Point = Vector3<f64>;

/// Index into a solid's vertex list. Never reused or reassigned.
pub type VertexId = usize;

/// Index into a solid's face list.
pub type FaceId = usize;

/// Ordered (tail, head) vertex pair.
pub type DirectedEdge = (VertexId, VertexId);

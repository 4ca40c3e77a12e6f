mod base;
pub use base::DirectedEdge;
pub use base::FaceId;
pub use base::Point;
pub use base::VertexId;

mod face;
pub use face::Face;
pub use face::FaceRef;
pub use face::Triangle;

mod solid;
pub use solid::Solid;

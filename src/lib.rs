pub mod catalog;
pub mod config;
pub mod convex_solid;
pub mod data_structure;
pub mod error;
mod mesh;
pub mod mesh_operation;
pub mod utils;

pub use data_structure::DirectedEdge;
pub use data_structure::Face;
pub use data_structure::FaceId;
pub use data_structure::FaceRef;
pub use data_structure::Point;
pub use data_structure::Solid;
pub use data_structure::Triangle;
pub use data_structure::VertexId;

pub use catalog::PlatonicSolid;
pub use config::DEFAULT_TOLERANCE;
pub use convex_solid::ConvexSolid;
pub use error::MeshError;
pub use error::Result;

pub use mesh_operation::Operation;

pub use mesh_operation::Dual;
pub use mesh_operation::Expand;
pub use mesh_operation::Hull;
pub use mesh_operation::Kis;
pub use mesh_operation::SmoothFaces;
pub use mesh_operation::Snub;
pub use mesh_operation::Truncate;
pub use mesh_operation::TruncateVertex;

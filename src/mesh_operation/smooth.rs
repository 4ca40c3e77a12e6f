use crate::data_structure::Point;
use crate::error::Result;
use crate::mesh_operation::Operation;
use crate::Solid;

use clap::Args;

/// Flatten faces by averaging each vertex's projections onto the planes of
/// the faces around it.
#[derive(Args, Clone, Debug)]
pub struct SmoothFaces {
  #[arg(default_value_t = 1)]
  pub iterations: usize,
}

impl Operation for SmoothFaces {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    let mut smoothed = solid.clone();
    smoothed.smooth_faces(self.iterations)?;
    Ok(smoothed)
  }
}

impl Solid {
  /// Each pass reads the positions left by the previous one. Vertices on no
  /// face stay put.
  pub fn smooth_faces(&mut self, iterations: usize) -> Result<&mut Self> {
    for _ in 0..iterations {
      let mut images: Vec<Vec<Point>> = vec![Vec::new(); self.num_vertices()];

      for face in self.face_refs() {
        let plane_pt = face.center();
        let plane_vec = face.degenerate_normal()?;
        for id in face.face().vertex_ids() {
          let dv = self.vertices()[*id] - plane_pt;
          let height = plane_vec * dv.dot(&plane_vec);
          images[*id].push(plane_pt + dv - height);
        }
      }

      for (id, vertex_images) in images.iter().enumerate() {
        if vertex_images.is_empty() {
          continue;
        }
        let average =
          vertex_images.iter().sum::<Point>() / vertex_images.len() as f64;
        self.set_position(id, &average)?;
      }
    }

    Ok(self)
  }
}

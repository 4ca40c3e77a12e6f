use crate::data_structure::{FaceId, Point, VertexId};
use crate::error::{MeshError, Result};
use crate::mesh_operation::Operation;
use crate::utils::rotate_about_line;
use crate::Solid;

use clap::Args;
use std::collections::HashMap;

/// Push the faces apart, optionally twisting each about the solid's center,
/// and fill the gaps with vertex caps and edge connectors.
#[derive(Args, Clone, Debug)]
pub struct Snub {
  /// How far each face moves along its normal
  #[arg(allow_negative_numbers = true)]
  pub distance: f64,
  /// Rotation of each pushed face in radians
  #[arg(allow_negative_numbers = true, default_value_t = 0.0)]
  pub twist: f64,
}

impl Operation for Snub {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.conway_snub(self.distance, self.twist)
  }
}

/// A snub without twist.
#[derive(Args, Clone, Debug)]
pub struct Expand {
  #[arg(allow_negative_numbers = true)]
  pub distance: f64,
}

impl Operation for Expand {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.conway_expand(self.distance)
  }
}

impl Solid {
  pub fn conway_expand(&self, distance: f64) -> Result<Solid> {
    self.conway_snub(distance, 0.0)
  }

  /// Every face is copied `distance` out along its normal and then turned
  /// `twist` radians about the axis through the solid's center parallel to
  /// the push. Each original vertex becomes a cap joining its images, and
  /// each original edge a quad (two triangles when twisted) joining the two
  /// faces' images of it.
  pub fn conway_snub(&self, distance: f64, twist: f64) -> Result<Solid> {
    let mut snub = Solid::new(self.name(), self.tolerance());
    let center = self.center();

    // image of each vertex under each face's push
    let mut pushed: Vec<HashMap<VertexId, Point>> =
      Vec::with_capacity(self.num_faces());

    for face in self.face_refs() {
      let normal = face.normal()?;
      let push = normal * distance;
      let axis = if distance < 0.0 { -normal } else { normal };

      let mut images = HashMap::with_capacity(face.num_sides());
      let mut coords = Vec::with_capacity(face.num_sides());
      for id in face.face().vertex_ids() {
        let mut image = self.vertices()[*id] + push;
        if twist != 0.0 {
          image = rotate_about_line(&image, &center, &axis, twist)?;
        }
        images.insert(*id, image);
        coords.push(image);
      }

      snub.add_face(&coords);
      pushed.push(images);
    }

    let image = |face: FaceId, vertex: VertexId| {
      pushed[face]
        .get(&vertex)
        .copied()
        .ok_or(MeshError::MissingImage { face, vertex })
    };

    for id in 0..self.num_vertices() {
      let mut cap = self
        .faces_with_vertex(id)?
        .into_iter()
        .map(|face_id| image(face_id, id))
        .collect::<Result<Vec<_>>>()?;
      cap.reverse();
      snub.add_face(&cap);
    }

    for id1 in 0..self.num_vertices() {
      for &id2 in self.neighbors(id1)?.iter().filter(|id2| id1 < **id2) {
        let [f1, f2] = self.faces_with_edge(id1, id2)?;
        let (f1v1, f1v2) = (image(f1, id1)?, image(f1, id2)?);
        let (f2v1, f2v2) = (image(f2, id1)?, image(f2, id2)?);

        if twist == 0.0 {
          snub.add_face(&[f1v1, f2v1, f2v2, f1v2]);
        } else {
          snub.add_face(&[f1v1, f2v1, f2v2]);
          snub.add_face(&[f2v2, f1v2, f1v1]);
        }
      }
    }

    log::debug!(
      "{}: snub({}, {}) gave {} vertices and {} faces",
      self.name(),
      distance,
      twist,
      snub.num_vertices(),
      snub.num_faces()
    );

    Ok(snub)
  }
}

use crate::error::Result;
use crate::mesh_operation::Operation;
use crate::Solid;

use clap::Args;

/// Raise a pyramid on every face.
#[derive(Args, Clone, Debug)]
pub struct Kis {
  /// Height of each apex above its face; negative values dig in
  #[arg(allow_negative_numbers = true)]
  pub distance: f64,
}

impl Operation for Kis {
  fn apply(&self, solid: &Solid) -> Result<Solid> {
    solid.conway_kis(self.distance)
  }
}

impl Solid {
  pub fn conway_kis(&self, distance: f64) -> Result<Solid> {
    let mut kis = Solid::new(self.name(), self.tolerance());

    for face in self.face_refs() {
      let peak = face.center() + face.degenerate_normal()? * distance;
      for index in 0..face.num_sides() {
        kis.add_face(&[peak, face.get_coords(index), face.get_coords(index + 1)]);
      }
    }

    Ok(kis)
  }
}

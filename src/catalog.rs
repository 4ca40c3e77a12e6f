//! Regular solids built as hulls of their canonical coordinates.

use crate::config::DEFAULT_TOLERANCE;
use crate::convex_solid::ConvexSolid;
use crate::data_structure::Point;
use crate::error::{MeshError, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlatonicSolid {
  Tetrahedron = 1,
  Octahedron = 2,
  Cube = 3,
  Dodecahedron = 4,
  Icosahedron = 5,
}

impl PlatonicSolid {
  pub const ALL: [PlatonicSolid; 5] = [
    PlatonicSolid::Tetrahedron,
    PlatonicSolid::Octahedron,
    PlatonicSolid::Cube,
    PlatonicSolid::Dodecahedron,
    PlatonicSolid::Icosahedron,
  ];

  pub fn from_id(id: u32) -> Result<Self> {
    PlatonicSolid::ALL
      .iter()
      .copied()
      .find(|solid| *solid as u32 == id)
      .ok_or(MeshError::UnknownSolid(id))
  }

  pub fn num_faces(self) -> usize {
    match self {
      PlatonicSolid::Tetrahedron => 4,
      PlatonicSolid::Octahedron => 8,
      PlatonicSolid::Cube => 6,
      PlatonicSolid::Dodecahedron => 12,
      PlatonicSolid::Icosahedron => 20,
    }
  }

  pub fn num_sides(self) -> usize {
    match self {
      PlatonicSolid::Cube => 4,
      PlatonicSolid::Dodecahedron => 5,
      _ => 3,
    }
  }

  // edge length of `coordinates()`
  fn edge_length(self) -> f64 {
    let phi = golden_ratio();
    match self {
      PlatonicSolid::Tetrahedron => 2.0 * 2f64.sqrt(),
      PlatonicSolid::Octahedron => 2f64.sqrt(),
      PlatonicSolid::Cube | PlatonicSolid::Icosahedron => 2.0,
      PlatonicSolid::Dodecahedron => 2.0 / phi,
    }
  }

  fn coordinates(self) -> Vec<Point> {
    let phi = golden_ratio();
    match self {
      PlatonicSolid::Tetrahedron => vec![
        Point::new(1.0, 1.0, 1.0),
        Point::new(1.0, -1.0, -1.0),
        Point::new(-1.0, 1.0, -1.0),
        Point::new(-1.0, -1.0, 1.0),
      ],
      PlatonicSolid::Octahedron => vec![
        Point::new(1.0, 0.0, 0.0),
        Point::new(0.0, 1.0, 0.0),
        Point::new(0.0, 0.0, 1.0),
        Point::new(-1.0, 0.0, 0.0),
        Point::new(0.0, -1.0, 0.0),
        Point::new(0.0, 0.0, -1.0),
      ],
      PlatonicSolid::Cube => signed(1.0, 1.0, 1.0),
      PlatonicSolid::Dodecahedron => {
        let mut points = signed(1.0, 1.0, 1.0);
        points.extend(cyclic(&signed(0.0, 1.0 / phi, phi)));
        points
      }
      PlatonicSolid::Icosahedron => cyclic(&signed(0.0, 1.0, phi)),
    }
  }

  /// The solid with every edge `side_length` long, centred on the origin.
  pub fn build(
    self,
    name: impl Into<String>,
    side_length: f64,
  ) -> Result<ConvexSolid> {
    self.build_with_tolerance(name, side_length, DEFAULT_TOLERANCE)
  }

  pub fn build_with_tolerance(
    self,
    name: impl Into<String>,
    side_length: f64,
    tolerance: f64,
  ) -> Result<ConvexSolid> {
    if side_length <= 0.0 {
      return Err(MeshError::InvalidArgument(format!(
        "side length must be positive, got {}",
        side_length
      )));
    }

    let mut solid = ConvexSolid::hull(name, &self.coordinates(), tolerance)?;
    solid.origin_dilate(side_length / self.edge_length());

    Ok(solid)
  }
}

fn golden_ratio() -> f64 {
  (1.0 + 5f64.sqrt()) / 2.0
}

// every sign combination of (x, y, z), skipping duplicate zeros
fn signed(x: f64, y: f64, z: f64) -> Vec<Point> {
  let signs = |v: f64| if v == 0.0 { vec![0.0] } else { vec![v, -v] };
  let mut points = Vec::new();
  for sx in signs(x) {
    for sy in signs(y) {
      for sz in signs(z) {
        points.push(Point::new(sx, sy, sz));
      }
    }
  }
  points
}

// the points along with their two cyclic coordinate rotations
fn cyclic(points: &[Point]) -> Vec<Point> {
  let mut out = Vec::with_capacity(points.len() * 3);
  for p in points {
    out.push(Point::new(p.x, p.y, p.z));
  }
  for p in points {
    out.push(Point::new(p.y, p.z, p.x));
  }
  for p in points {
    out.push(Point::new(p.z, p.x, p.y));
  }
  out
}

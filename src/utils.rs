use crate::config::MIN_NORM;
use crate::error::{MeshError, Result};
use crate::Point;

use nalgebra::{Rotation3, Unit};

pub fn distance(a: &Point, b: &Point) -> f64 {
  (a - b).norm()
}

pub fn normalize(v: &Point) -> Result<Point> {
  v.try_normalize(MIN_NORM).ok_or(MeshError::ZeroLengthVector)
}

// right-handed: counterclockwise order gives the outward normal
pub fn get_normal(vertices: [Point; 3]) -> Result<Point> {
  normalize(&(vertices[1] - vertices[0]).cross(&(vertices[2] - vertices[0])))
}

/// Rotate `point` by `theta` radians about the line through `base` with
/// direction `direction`, right-handed about `direction`.
pub fn rotate_about_line(
  point: &Point,
  base: &Point,
  direction: &Point,
  theta: f64,
) -> Result<Point> {
  let axis =
    Unit::try_new(*direction, MIN_NORM).ok_or(MeshError::ZeroLengthVector)?;
  let rotation = Rotation3::from_axis_angle(&axis, theta);
  Ok(base + rotation * (point - base))
}

/// Copy `items`, splicing `with` in place of every entry equal to `target`.
pub fn replace_all<T: PartialEq + Clone>(
  items: &[T],
  target: &T,
  with: &[T],
) -> Vec<T> {
  let mut out = Vec::with_capacity(items.len() + with.len());
  for item in items {
    if item == target {
      out.extend_from_slice(with);
    } else {
      out.push(item.clone());
    }
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;
  use approx::assert_relative_eq;
  use std::f64::consts::FRAC_PI_2;

  #[test]
  fn normal_follows_right_hand_rule() {
    let n = get_normal([
      Point::new(0.0, 0.0, 0.0),
      Point::new(1.0, 0.0, 0.0),
      Point::new(0.0, 1.0, 0.0),
    ])
    .unwrap();
    assert_relative_eq!(n, Point::new(0.0, 0.0, 1.0));
  }

  #[test]
  fn collinear_normal_is_an_error() {
    let result = get_normal([
      Point::new(0.0, 0.0, 0.0),
      Point::new(1.0, 0.0, 0.0),
      Point::new(2.0, 0.0, 0.0),
    ]);
    assert!(matches!(result, Err(MeshError::ZeroLengthVector)));
  }

  #[test]
  fn quarter_turn_about_offset_axis() {
    let rotated = rotate_about_line(
      &Point::new(2.0, 0.0, 5.0),
      &Point::new(1.0, 0.0, 0.0),
      &Point::new(0.0, 0.0, 3.0),
      FRAC_PI_2,
    )
    .unwrap();
    assert_relative_eq!(rotated, Point::new(1.0, 1.0, 5.0), epsilon = 1e-12);
  }

  #[test]
  fn rotation_needs_an_axis() {
    let result = rotate_about_line(
      &Point::new(1.0, 0.0, 0.0),
      &Point::zeros(),
      &Point::zeros(),
      1.0,
    );
    assert!(result.is_err());
  }

  #[test]
  fn replace_all_splices_every_match() {
    assert_eq!(replace_all(&[1, 2, 3, 2], &2, &[7, 8]), vec![1, 7, 8, 3, 7, 8]);
    assert_eq!(replace_all(&[1, 3], &2, &[7]), vec![1, 3]);
  }

  #[test]
  fn distance_is_euclidean() {
    assert_relative_eq!(
      distance(&Point::new(1.0, 2.0, 3.0), &Point::new(4.0, 6.0, 3.0)),
      5.0
    );
  }
}

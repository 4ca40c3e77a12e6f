use crate::data_structure::{Point, VertexId};
use crate::error::{MeshError, Result};
use crate::Solid;

use std::fs::File;
use std::io::prelude::*;
use std::io::BufReader;
use std::io::BufWriter;
use std::path::Path;

const VERTICES_HEADER: &str = "VERTICES:";
const FACES_HEADER: &str = "FACES:";

fn parse_error(line: usize, reason: impl Into<String>) -> MeshError {
  MeshError::Parse {
    line,
    reason: reason.into(),
  }
}

impl Solid {
  /// Plain text: a `VERTICES:` section of `x y z` lines followed by a
  /// `FACES:` section of whitespace separated vertex ids.
  pub fn write_solid<W: Write>(&self, writer: &mut W) -> Result<()> {
    writeln!(writer, "{}", VERTICES_HEADER)?;
    for v in self.vertices() {
      writeln!(writer, "{} {} {}", v.x, v.y, v.z)?;
    }

    writeln!(writer, "{}", FACES_HEADER)?;
    for face in self.faces() {
      let ids: Vec<String> =
        face.vertex_ids().iter().map(|id| id.to_string()).collect();
      writeln!(writer, "{}", ids.join(" "))?;
    }

    Ok(())
  }

  /// Inverse of `write_solid`. Vertices are taken as written, without
  /// merging nearby points.
  pub fn read_solid<R: BufRead>(
    reader: R,
    name: impl Into<String>,
    tolerance: f64,
  ) -> Result<Solid> {
    enum Section {
      Start,
      Vertices,
      Faces,
    }

    let mut solid = Solid::new(name, tolerance);
    let mut section = Section::Start;

    for (index, line) in reader.lines().enumerate() {
      let line_number = index + 1;
      let line = line?;
      let line = line.trim();

      if line.is_empty() {
        continue;
      }
      if line == VERTICES_HEADER {
        section = Section::Vertices;
        continue;
      }
      if line == FACES_HEADER {
        section = Section::Faces;
        continue;
      }

      match section {
        Section::Start => {
          return Err(parse_error(
            line_number,
            format!("expected {}, found {:?}", VERTICES_HEADER, line),
          ))
        }
        Section::Vertices => {
          let coords = line
            .split_whitespace()
            .map(|x| x.parse::<f64>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| parse_error(line_number, e.to_string()))?;
          if coords.len() != 3 {
            return Err(parse_error(
              line_number,
              format!("expected 3 coordinates, found {}", coords.len()),
            ));
          }
          solid.add_vertex(&Point::new(coords[0], coords[1], coords[2]), false);
        }
        Section::Faces => {
          let ids = line
            .split_whitespace()
            .map(|id| id.parse::<VertexId>())
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| parse_error(line_number, e.to_string()))?;
          solid
            .add_face_ids(&ids)
            .map_err(|e| parse_error(line_number, e.to_string()))?;
        }
      }
    }

    log::info!(
      "{}: loaded {} faces and {} vertices",
      solid.name(),
      solid.num_faces(),
      solid.num_vertices()
    );

    Ok(solid)
  }

  pub fn save(&self, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    self.write_solid(&mut writer)?;
    writer.flush()?;
    Ok(())
  }

  pub fn load(path: &Path, name: impl Into<String>, tolerance: f64) -> Result<Solid> {
    Solid::read_solid(BufReader::new(File::open(path)?), name, tolerance)
  }

  /// ASCII STL of the triangle fans of every face.
  pub fn write_stl<W: Write>(&self, writer: &mut W) -> Result<()> {
    let triangles = self.build()?;

    writeln!(writer, "solid {}", self.name())?;
    for triangle in &triangles {
      let n = &triangle.normal;
      writeln!(writer, "facet normal {} {} {}", n.x, n.y, n.z)?;
      writeln!(writer, "outer loop")?;
      for p in &triangle.points {
        writeln!(writer, "vertex {} {} {}", p.x, p.y, p.z)?;
      }
      writeln!(writer, "endloop")?;
      writeln!(writer, "endfacet")?;
    }
    writeln!(writer, "endsolid {}", self.name())?;

    log::info!("{}: wrote {} triangles", self.name(), triangles.len());

    Ok(())
  }

  pub fn save_stl(&self, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    self.write_stl(&mut writer)?;
    writer.flush()?;
    Ok(())
  }

  /// Read every model in an OBJ file into one solid, keeping polygons
  /// whole.
  pub fn from_obj(
    path: &Path,
    name: impl Into<String>,
    tolerance: f64,
  ) -> Result<Solid> {
    let options = tobj::LoadOptions {
      single_index: false,
      triangulate: false,
      ..Default::default()
    };
    let (models, _) = tobj::load_obj(path, &options)?;

    let mut solid = Solid::new(name, tolerance);
    for m in models {
      let mesh = &m.mesh;
      let offset = solid.num_vertices();
      for vals in mesh.positions.chunks_exact(3) {
        let point = Point::new(vals[0] as f64, vals[1] as f64, vals[2] as f64);
        solid.add_vertex(&point, false);
      }

      let arities: Vec<usize> = if mesh.face_arities.is_empty() {
        vec![3; mesh.indices.len() / 3]
      } else {
        mesh.face_arities.iter().map(|arity| *arity as usize).collect()
      };

      let mut start = 0;
      for arity in arities {
        let ids: Vec<VertexId> = mesh.indices[start..start + arity]
          .iter()
          .map(|id| offset + *id as usize)
          .collect();
        solid.add_face_ids(&ids)?;
        start += arity;
      }
    }

    log::info!(
      "{}: loaded {} faces and {} vertices",
      solid.name(),
      solid.num_faces(),
      solid.num_vertices()
    );

    Ok(solid)
  }

  pub fn save_obj(&self, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);

    writeln!(&mut writer, "o {}", self.name())?;
    for vertex in self.vertices() {
      writeln!(&mut writer, "v {} {} {}", vertex.x, vertex.y, vertex.z)?;
    }

    for face in self.faces() {
      let ids: Vec<String> = face
        .vertex_ids()
        .iter()
        .map(|id| (id + 1).to_string())
        .collect();
      writeln!(&mut writer, "f {}", ids.join(" "))?;
    }

    writer.flush()?;
    Ok(())
  }
}

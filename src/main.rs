use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use polyhedra::{
  Dual, Expand, Hull, Kis, Operation, PlatonicSolid, SmoothFaces, Snub,
  Solid, Truncate, TruncateVertex, DEFAULT_TOLERANCE,
};
use std::path::Path;

#[derive(Parser)]
#[command(version = "0.1", author = "Ryan G.")]
struct Opts {
  /// Input solid file (.solid or .obj), or platonic:<id> for a catalog
  /// solid (1 tetrahedron, 2 octahedron, 3 cube, 4 dodecahedron,
  /// 5 icosahedron)
  infile: String,
  /// Output file (.stl, .solid or .obj)
  outfile: String,

  /// Edge length of a catalog solid
  #[arg(long, default_value_t = 1.0)]
  side_length: f64,

  /// Distance below which points are merged
  #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
  tolerance: f64,
  /// Name written into the output
  #[arg(long)]
  name: Option<String>,

  #[command(subcommand)]
  /// method
  method: Methods,
}

#[derive(Subcommand)]
enum Methods {
  /// write the input unchanged in the output format
  Convert,
  /// convex hull of the input's vertices
  Hull(Hull),
  /// swap faces and vertices
  Dual(Dual),
  /// raise a pyramid on every face
  Kis(Kis),
  /// cut off a single vertex
  TruncateVertex(TruncateVertex),
  /// cut off every vertex
  Truncate(Truncate),
  /// push faces apart with a twist
  Snub(Snub),
  /// push faces apart
  Expand(Expand),
  /// flatten faces
  Smooth(SmoothFaces),
}

impl Methods {
  fn operation(&self) -> Option<&dyn Operation> {
    match self {
      Methods::Convert => None,
      Methods::Hull(op) => Some(op),
      Methods::Dual(op) => Some(op),
      Methods::Kis(op) => Some(op),
      Methods::TruncateVertex(op) => Some(op),
      Methods::Truncate(op) => Some(op),
      Methods::Snub(op) => Some(op),
      Methods::Expand(op) => Some(op),
      Methods::Smooth(op) => Some(op),
    }
  }
}

fn extension(path: &Path) -> String {
  path
    .extension()
    .and_then(|ext| ext.to_str())
    .unwrap_or("")
    .to_ascii_lowercase()
}

fn stem(path: &Path) -> String {
  path
    .file_stem()
    .and_then(|stem| stem.to_str())
    .unwrap_or("solid")
    .to_string()
}

const PLATONIC_PREFIX: &str = "platonic:";

fn load(opts: &Opts) -> anyhow::Result<Solid> {
  if let Some(id) = opts.infile.strip_prefix(PLATONIC_PREFIX) {
    let id: u32 = id
      .parse()
      .with_context(|| format!("bad catalog id {:?}", id))?;
    let kind = PlatonicSolid::from_id(id)?;
    let name = opts.name.clone().unwrap_or_else(|| format!("{:?}", kind));
    let solid =
      kind.build_with_tolerance(name, opts.side_length, opts.tolerance)?;
    return Ok(solid.into_solid());
  }

  let infile = Path::new(&opts.infile);
  let name = opts.name.clone().unwrap_or_else(|| stem(infile));

  let solid = match extension(infile).as_str() {
    "solid" => Solid::load(infile, name, opts.tolerance),
    "obj" => Solid::from_obj(infile, name, opts.tolerance),
    other => bail!("unsupported input format {:?}", other),
  }
  .with_context(|| format!("failed to read {}", infile.display()))?;

  Ok(solid)
}

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let opts: Opts = Opts::parse();

  let input = load(&opts)?;
  log::info!(
    "{}: {} vertices, {} edges, {} faces",
    input.name(),
    input.num_vertices(),
    input.num_edges(),
    input.num_faces()
  );

  let output = match opts.method.operation() {
    Some(op) => op.apply(&input)?,
    None => input,
  };

  let outfile = Path::new(&opts.outfile);
  match extension(outfile).as_str() {
    "stl" => output.save_stl(outfile),
    "solid" => output.save(outfile),
    "obj" => output.save_obj(outfile),
    other => bail!("unsupported output format {:?}", other),
  }
  .with_context(|| format!("failed to write {}", outfile.display()))?;

  log::info!(
    "{}: wrote {} vertices and {} faces to {}",
    output.name(),
    output.num_vertices(),
    output.num_faces(),
    outfile.display()
  );

  Ok(())
}

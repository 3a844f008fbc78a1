use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use glam::{
  Vec2,
  Vec3,
};

use crate::error::VelaMeshError;
use crate::mesh::expand::expand;
use crate::mesh::normals::synthesize_normals;
use crate::mesh::packed::VelaMesh;
use crate::mesh::raw::{VelaCorner, VelaRawMesh};

/// The OBJ loader.
///
/// Runs the whole load path synchronously on the calling thread:
/// parse, synthesize normals when the source declares none, expand per
/// corner, then normalize and pack. A malformed line or out-of-range
/// index fails the entire load; no partial mesh is ever returned.
pub struct VelaObjLoader;

/// The implementation of the OBJ loader.
impl VelaObjLoader {
  /// Load the OBJ file from the given path.
  /// param path: The path of the OBJ file.
  /// return: The packed mesh.
  pub fn load<P: AsRef<Path>>(path: P) -> Result<VelaMesh, VelaMeshError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|err| {
      if err.kind() == std::io::ErrorKind::NotFound {
        VelaMeshError::FileNotFound {
          path: path.to_path_buf(),
        }
      } else {
        VelaMeshError::Io(err)
      }
    })?;
    log::debug!("Loading OBJ file {:?}.", path);
    Self::load_from_reader(BufReader::new(file))
  }

  /// Load an OBJ mesh from any readable source.
  /// param reader: The OBJ text source.
  /// return: The packed mesh.
  pub fn load_from_reader<R: Read>(reader: R) -> Result<VelaMesh, VelaMeshError> {
    let mut raw = Self::parse(reader)?;

    if raw.normals.is_empty() {
      log::warn!("OBJ source declares no normals, synthesizing per-vertex normals.");
      let (normals, faces) = synthesize_normals(&raw)?;
      raw.normals = normals;
      raw.faces = faces;
    }

    let stream = expand(&raw)?;
    Ok(VelaMesh::pack(&raw, &stream))
  }

  /// Parse OBJ text into a raw mesh.
  ///
  /// Recognized tags are `v`, `vt`, `vn` and `f`; comments, blank lines
  /// and unknown tags are ignored. Faces with more than 3 corners are
  /// fan-triangulated around their first corner before storage.
  pub fn parse<R: Read>(reader: R) -> Result<VelaRawMesh, VelaMeshError> {
    let reader = BufReader::new(reader);
    let mut mesh = VelaRawMesh::default();

    for (idx, line) in reader.lines().enumerate() {
      let line_no = idx + 1;
      let line = line?;
      let line = line.trim();
      if line.is_empty() || line.starts_with('#') {
        continue;
      }

      let mut fields = line.split_whitespace();
      let tag = match fields.next() {
        Some(tag) => tag,
        None => continue,
      };

      match tag {
        "v" => {
          let x = parse_float(line_no, tag, fields.next())?;
          let y = parse_float(line_no, tag, fields.next())?;
          let z = parse_float(line_no, tag, fields.next())?;
          mesh.positions.push(Vec3::new(x, y, z));
        }
        "vt" => {
          // a bare `vt` line is skipped; a single field means (u, 0)
          let u = match fields.next() {
            Some(field) => parse_float(line_no, tag, Some(field))?,
            None => continue,
          };
          let v = match fields.next() {
            Some(field) => parse_float(line_no, tag, Some(field))?,
            None => 0.0,
          };
          mesh.tex_coords.push(Vec2::new(u, v));
        }
        "vn" => {
          let x = parse_float(line_no, tag, fields.next())?;
          let y = parse_float(line_no, tag, fields.next())?;
          let z = parse_float(line_no, tag, fields.next())?;
          mesh.normals.push(Vec3::new(x, y, z));
        }
        "f" => {
          let mut corners = Vec::with_capacity(4);
          for token in fields {
            let corner = parse_corner(token).ok_or_else(|| {
              VelaMeshError::malformed(
                line_no,
                format!("invalid face corner token {:?}", token),
              )
            })?;
            corners.push(corner);
          }
          if corners.len() < 3 {
            return Err(VelaMeshError::malformed(
              line_no,
              format!("`f` requires at least 3 corners, got {}", corners.len()),
            ));
          }
          // fan triangulation around the first corner
          for i in 1..corners.len() - 1 {
            mesh.faces.push([corners[0], corners[i], corners[i + 1]]);
          }
        }
        _ => {}
      }
    }

    log::debug!(
      "Parsed OBJ: {} positions, {} texture coordinates, {} normals, {} triangles.",
      mesh.positions.len(),
      mesh.tex_coords.len(),
      mesh.normals.len(),
      mesh.faces.len(),
    );
    Ok(mesh)
  }
}

fn parse_float(
  line: usize,
  tag: &str,
  field: Option<&str>,
) -> Result<f32, VelaMeshError> {
  let field = field.ok_or_else(|| {
    VelaMeshError::malformed(line, format!("`{}` is missing a numeric field", tag))
  })?;
  field.parse::<f32>().map_err(|_| {
    VelaMeshError::malformed(
      line,
      format!("unparsable number {:?} in `{}`", field, tag),
    )
  })
}

/// Parse one face corner token.
///
/// Accepted shapes are `v`, `v/t`, `v//n` and `v/t/n`; anything else is
/// malformed.
fn parse_corner(token: &str) -> Option<VelaCorner> {
  let parts: Vec<&str> = token.split('/').collect();
  match parts.as_slice() {
    [v] => Some(VelaCorner::position_only(v.parse().ok()?)),
    [v, t] if !t.is_empty() => Some(VelaCorner {
      position: v.parse().ok()?,
      tex_coord: Some(t.parse().ok()?),
      normal: None,
    }),
    [v, t, n] if t.is_empty() => Some(VelaCorner {
      position: v.parse().ok()?,
      tex_coord: None,
      normal: Some(n.parse().ok()?),
    }),
    [v, t, n] => Some(VelaCorner {
      position: v.parse().ok()?,
      tex_coord: Some(t.parse().ok()?),
      normal: Some(n.parse().ok()?),
    }),
    _ => None,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn parse_str(source: &str) -> Result<VelaRawMesh, VelaMeshError> {
    VelaObjLoader::parse(source.as_bytes())
  }

  #[test]
  fn test_load_nonexistent_file() {
    let result = VelaObjLoader::load("nonexistent.obj");
    assert!(matches!(result, Err(VelaMeshError::FileNotFound { .. })));
  }

  #[test]
  fn test_parse_recognized_tags() {
    let mesh = parse_str(
      "v 1 2 3\nvt 0.5 0.25\nvn 0 0 1\nf 1/1/1 1/1/1 1/1/1\n",
    )
    .unwrap();
    assert_eq!(mesh.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
    assert_eq!(mesh.tex_coords, vec![Vec2::new(0.5, 0.25)]);
    assert_eq!(mesh.normals, vec![Vec3::Z]);
    assert_eq!(mesh.faces.len(), 1);
  }

  #[test]
  fn test_comments_blanks_and_unknown_tags_ignored() {
    let mesh = parse_str(
      "# a comment\n\no cube\ng side\ns off\nmtllib things.mtl\nv 0 0 0\n",
    )
    .unwrap();
    assert_eq!(mesh.positions.len(), 1);
    assert!(mesh.faces.is_empty());
  }

  #[test]
  fn test_vertex_extra_fields_ignored() {
    let mesh = parse_str("v 1 2 3 1.0\n").unwrap();
    assert_eq!(mesh.positions, vec![Vec3::new(1.0, 2.0, 3.0)]);
  }

  #[test]
  fn test_vertex_missing_field_is_malformed() {
    let err = parse_str("v 1 2\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 1, .. }));
  }

  #[test]
  fn test_vertex_unparsable_number_is_malformed() {
    let err = parse_str("v 1 x 3\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 1, .. }));
  }

  #[test]
  fn test_texcoord_variants() {
    let mesh = parse_str("vt\nvt 0.5\nvt 0.5 0.5 0.0\n").unwrap();
    // bare tag skipped, single field pads v with 0, third field ignored
    assert_eq!(
      mesh.tex_coords,
      vec![Vec2::new(0.5, 0.0), Vec2::new(0.5, 0.5)]
    );
  }

  #[test]
  fn test_normal_missing_field_is_malformed() {
    let err = parse_str("vn 0 0\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 1, .. }));
  }

  #[test]
  fn test_corner_token_shapes() {
    let mesh = parse_str("v 0 0 0\nvt 0 0\nvn 0 0 1\nf 1 1/1 1//1 1/1/1\n").unwrap();
    // quad fans into 2 triangles; corner 0 shared by both
    assert_eq!(mesh.faces.len(), 2);
    let c = mesh.faces[0][0];
    assert_eq!((c.position, c.tex_coord, c.normal), (1, None, None));
    let c = mesh.faces[0][1];
    assert_eq!((c.position, c.tex_coord, c.normal), (1, Some(1), None));
    let c = mesh.faces[0][2];
    assert_eq!((c.position, c.tex_coord, c.normal), (1, None, Some(1)));
    let c = mesh.faces[1][2];
    assert_eq!((c.position, c.tex_coord, c.normal), (1, Some(1), Some(1)));
  }

  #[test]
  fn test_fan_triangulation_exact_corners() {
    let mesh = parse_str("v 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n").unwrap();
    assert_eq!(mesh.faces.len(), 2);
    let as_positions =
      |tri: &[VelaCorner; 3]| [tri[0].position, tri[1].position, tri[2].position];
    assert_eq!(as_positions(&mesh.faces[0]), [1, 2, 3]);
    assert_eq!(as_positions(&mesh.faces[1]), [1, 3, 4]);
  }

  #[test]
  fn test_pentagon_fans_into_three_triangles() {
    let mesh = parse_str(
      "v 0 0 0\nv 1 0 0\nv 2 1 0\nv 1 2 0\nv 0 1 0\nf 1 2 3 4 5\n",
    )
    .unwrap();
    assert_eq!(mesh.faces.len(), 3);
    assert_eq!(mesh.faces[2][0].position, 1);
    assert_eq!(mesh.faces[2][1].position, 4);
    assert_eq!(mesh.faces[2][2].position, 5);
  }

  #[test]
  fn test_face_with_two_corners_is_malformed() {
    let err = parse_str("v 0 0 0\nv 1 0 0\nf 1 2\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 3, .. }));
  }

  #[test]
  fn test_malformed_corner_token_aborts_load() {
    let err = parse_str("v 0 0 0\nf 1/2/3/4-bad 1 1\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 2, .. }));
  }

  #[test]
  fn test_trailing_slash_corner_is_malformed() {
    let err = parse_str("v 0 0 0\nf 1/ 1 1\n").unwrap_err();
    assert!(matches!(err, VelaMeshError::MalformedInput { line: 2, .. }));
  }

  #[test]
  fn test_negative_corner_indices_parse() {
    let mesh = parse_str("v 0 0 0\nv 1 0 0\nv 0 1 0\nf -3 -2 -1\n").unwrap();
    assert_eq!(mesh.faces[0][0].position, -3);
    assert_eq!(mesh.faces[0][2].position, -1);
  }
}

use glam::{
  Vec2,
  Vec3,
};

use crate::error::VelaMeshError;
use crate::mesh::raw::{resolve_index, VelaRawMesh};

/// The per-corner flattened vertex stream.
///
/// One entry per face corner, shared vertices duplicated; no index buffer
/// is produced. The three sequences are always the same length,
/// `3 * triangle_count`.
#[derive(Debug, Clone, Default)]
pub struct VelaVertexStream {
  pub positions: Vec<Vec3>,
  pub uvs: Vec<Vec2>,
  pub normals: Vec<Vec3>,
}

impl VelaVertexStream {
  /// The number of corners in the stream.
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }
}

/// Flatten a raw mesh into a per-corner vertex stream.
///
/// Texture coordinates are resolved only when the source declared any
/// `vt` entries; otherwise every corner gets `(0, 0)` regardless of its
/// per-corner index. The same rule applies to normals with fallback
/// `(0, 0, 1)`. A corner that omits an optional index always gets the
/// fallback, even when the channel is globally present. A present index
/// into a declared table that resolves out of bounds fails the load.
pub fn expand(mesh: &VelaRawMesh) -> Result<VelaVertexStream, VelaMeshError> {
  let has_uv = !mesh.tex_coords.is_empty();
  let has_normal = !mesh.normals.is_empty();

  let corner_count = mesh.faces.len() * 3;
  let mut stream = VelaVertexStream {
    positions: Vec::with_capacity(corner_count),
    uvs: Vec::with_capacity(corner_count),
    normals: Vec::with_capacity(corner_count),
  };

  for face in &mesh.faces {
    for corner in face {
      let position_idx = resolve_index(mesh.positions.len(), corner.position)
        .ok_or(VelaMeshError::IndexOutOfRange {
          table: "position",
          index: corner.position,
          len: mesh.positions.len(),
        })?;
      stream.positions.push(mesh.positions[position_idx]);

      let uv = match corner.tex_coord {
        Some(raw) if has_uv => {
          let idx = resolve_index(mesh.tex_coords.len(), raw).ok_or(
            VelaMeshError::IndexOutOfRange {
              table: "texture coordinate",
              index: raw,
              len: mesh.tex_coords.len(),
            },
          )?;
          mesh.tex_coords[idx]
        }
        _ => Vec2::ZERO,
      };
      stream.uvs.push(uv);

      let normal = match corner.normal {
        Some(raw) if has_normal => {
          let idx = resolve_index(mesh.normals.len(), raw).ok_or(
            VelaMeshError::IndexOutOfRange {
              table: "normal",
              index: raw,
              len: mesh.normals.len(),
            },
          )?;
          mesh.normals[idx]
        }
        _ => Vec3::Z,
      };
      stream.normals.push(normal);
    }
  }

  debug_assert_eq!(stream.positions.len(), stream.uvs.len());
  debug_assert_eq!(stream.positions.len(), stream.normals.len());
  Ok(stream)
}

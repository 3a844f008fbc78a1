use glam::Vec3;

use crate::error::VelaMeshError;
use crate::mesh::raw::{resolve_index, VelaCorner, VelaRawMesh};

/// Below this length a face normal is considered degenerate and falls
/// back to unit Z.
const DEGENERATE_EPSILON: f32 = 1e-8;

/// Synthesize per-vertex normals for a mesh that declares none.
///
/// For every triangle the face normal is `(v1 - v0).cross(v2 - v0)`,
/// normalized; counter-clockwise faces seen from +Z therefore synthesize
/// `(0, 0, 1)`. Face normals accumulate into per-source-vertex sums,
/// which are then averaged over the number of contributing faces and
/// renormalized. Vertices with no contributing faces, and degenerate
/// sums, fall back to `(0, 0, 1)`.
///
/// Returns the synthesized normal table (parallel to `mesh.positions`)
/// together with a rewritten face list whose corners address the new
/// table through their own position index.
pub fn synthesize_normals(
  mesh: &VelaRawMesh,
) -> Result<(Vec<Vec3>, Vec<[VelaCorner; 3]>), VelaMeshError> {
  let vertex_count = mesh.positions.len();
  let mut sums = vec![Vec3::ZERO; vertex_count];
  let mut counts = vec![0u32; vertex_count];

  for face in &mesh.faces {
    let mut indices = [0usize; 3];
    for (slot, corner) in indices.iter_mut().zip(face.iter()) {
      *slot = resolve_index(vertex_count, corner.position).ok_or(
        VelaMeshError::IndexOutOfRange {
          table: "position",
          index: corner.position,
          len: vertex_count,
        },
      )?;
    }

    let v0 = mesh.positions[indices[0]];
    let v1 = mesh.positions[indices[1]];
    let v2 = mesh.positions[indices[2]];
    let face_normal = face_normal(v0, v1, v2);

    for &idx in &indices {
      sums[idx] += face_normal;
      counts[idx] += 1;
    }
  }

  let mut normals = Vec::with_capacity(vertex_count);
  for (sum, count) in sums.iter().zip(counts.iter()) {
    if *count > 0 {
      let averaged = *sum / *count as f32;
      let length = averaged.length();
      if length > DEGENERATE_EPSILON {
        normals.push(averaged / length);
      } else {
        normals.push(Vec3::Z);
      }
    } else {
      normals.push(Vec3::Z);
    }
  }

  // The synthesized table is parallel to the position table, so a
  // corner's own position index addresses its normal under the same
  // 1-based/negative resolution rule.
  let faces = mesh
    .faces
    .iter()
    .map(|face| {
      face.map(|corner| VelaCorner {
        normal: Some(corner.position),
        ..corner
      })
    })
    .collect();

  Ok((normals, faces))
}

fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
  let normal = (v1 - v0).cross(v2 - v0);
  let length = normal.length();
  if length > DEGENERATE_EPSILON {
    normal / length
  } else {
    Vec3::Z
  }
}

use glam::Vec3;

use crate::mesh::bounds::VelaBounds;
use crate::mesh::expand::VelaVertexStream;
use crate::mesh::raw::VelaRawMesh;

/// The longest axis of a packed mesh maps to this length in model space.
pub const TARGET_EXTENT: f32 = 1.5;

/// Floor substituted for a zero bounding-box extent so the scale factor
/// never divides by zero.
const EXTENT_EPSILON: f32 = 1e-6;

const FLOAT_SIZE: usize = std::mem::size_of::<f32>();

/// A GPU-ready mesh: a flat interleaved attribute buffer plus the
/// metadata a rendering collaborator needs to bind it.
///
/// Layout per corner is `position.xyz`, then `uv.xy` when `has_uv`, then
/// `normal.xyz` when `has_normal`. There is no index buffer; a
/// non-indexed triangle-list draw of `vertex_count` vertices consumes the
/// whole buffer. The mesh is immutable once packed; a geometry change
/// requires a full reload.
#[derive(Debug, Clone)]
pub struct VelaMesh {
  data: Vec<f32>,
  vertex_count: usize,
  has_uv: bool,
  has_normal: bool,
  bounds: VelaBounds,
}

impl VelaMesh {
  /// Normalize and pack an expanded vertex stream.
  ///
  /// The bounding box is computed over the raw mesh's unique vertex
  /// table, not the expanded stream, so the transform is unaffected by
  /// how often a vertex is shared across faces. Every expanded position
  /// is centered on the box and uniformly rescaled so the longest
  /// original axis maps to `TARGET_EXTENT`.
  pub fn pack(raw: &VelaRawMesh, stream: &VelaVertexStream) -> Self {
    let has_uv = !raw.tex_coords.is_empty() && !stream.is_empty();
    let has_normal = !raw.normals.is_empty() && !stream.is_empty();

    let source_bounds = VelaBounds::from_points(&raw.positions);
    let size = source_bounds.get_size();
    let largest = size.x.max(size.y).max(size.z).max(EXTENT_EPSILON);
    let scale_factor = TARGET_EXTENT / largest;
    let center = source_bounds.center;

    let stride = 3 + if has_uv { 2 } else { 0 } + if has_normal { 3 } else { 0 };
    let mut data = Vec::with_capacity(stream.len() * stride);
    for i in 0..stream.len() {
      let p = (stream.positions[i] - center) * scale_factor;
      data.extend_from_slice(&[p.x, p.y, p.z]);
      if has_uv {
        let uv = stream.uvs[i];
        data.extend_from_slice(&[uv.x, uv.y]);
      }
      if has_normal {
        let n = stream.normals[i];
        data.extend_from_slice(&[n.x, n.y, n.z]);
      }
    }

    let bounds = VelaBounds::new(Vec3::ZERO, source_bounds.extents * scale_factor);

    log::debug!(
      "Packed mesh: {} vertices, stride {} floats, has_uv={}, has_normal={}.",
      stream.len(),
      stride,
      has_uv,
      has_normal,
    );

    Self {
      data,
      vertex_count: stream.len(),
      has_uv,
      has_normal,
      bounds,
    }
  }

  /// The interleaved attribute buffer.
  pub fn data(&self) -> &[f32] {
    &self.data
  }

  /// The number of corners, which is the vertex count for a non-indexed
  /// draw call.
  pub fn vertex_count(&self) -> usize {
    self.vertex_count
  }

  pub fn has_uv(&self) -> bool {
    self.has_uv
  }

  pub fn has_normal(&self) -> bool {
    self.has_normal
  }

  /// The per-vertex stride in floats.
  pub fn stride(&self) -> usize {
    3 + if self.has_uv { 2 } else { 0 } + if self.has_normal { 3 } else { 0 }
  }

  /// The per-vertex stride in bytes.
  pub fn stride_bytes(&self) -> usize {
    self.stride() * FLOAT_SIZE
  }

  /// Byte offset of the UV attribute within a vertex, if present.
  pub fn uv_offset_bytes(&self) -> Option<usize> {
    self.has_uv.then_some(3 * FLOAT_SIZE)
  }

  /// Byte offset of the normal attribute within a vertex, if present.
  pub fn normal_offset_bytes(&self) -> Option<usize> {
    self.has_normal.then(|| {
      (3 + if self.has_uv { 2 } else { 0 }) * FLOAT_SIZE
    })
  }

  /// The bounding box of the normalized geometry, centered at the
  /// origin.
  pub fn bounds(&self) -> &VelaBounds {
    &self.bounds
  }
}

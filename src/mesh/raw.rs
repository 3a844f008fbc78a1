use glam::{
  Vec2,
  Vec3,
};

/// One vertex of one face: a position index plus optional texture
/// coordinate and normal indices.
///
/// Indices are stored exactly as they appear in the source: 1-based when
/// positive, relative-from-end when negative. Index 0 never resolves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VelaCorner {
  pub position: isize,
  pub tex_coord: Option<isize>,
  pub normal: Option<isize>,
}

impl VelaCorner {
  /// Create a corner referencing only a position.
  pub fn position_only(position: isize) -> Self {
    Self {
      position,
      tex_coord: None,
      normal: None,
    }
  }
}

/// The parse output of an OBJ source: attribute tables plus a
/// triangulated face list.
///
/// Faces with more than 3 corners are fan-triangulated before storage, so
/// every entry here is exactly one triangle. Tables and faces accumulate
/// in source order; no reordering or deduplication occurs.
#[derive(Debug, Clone, Default)]
pub struct VelaRawMesh {
  pub positions: Vec<Vec3>,
  pub tex_coords: Vec<Vec2>,
  pub normals: Vec<Vec3>,
  pub faces: Vec<[VelaCorner; 3]>,
}

impl VelaRawMesh {
  /// The number of triangles in the mesh.
  pub fn triangle_count(&self) -> usize {
    self.faces.len()
  }
}

/// Resolve a raw 1-based or negative-from-end index against a table of
/// `len` entries.
///
/// Positive `raw` maps to `raw - 1`, negative `raw` maps to `len + raw`.
/// Returns `None` for index 0 and for anything that lands outside the
/// table. The parser, normal synthesizer and expander all share this
/// function so the addressing rule cannot drift between passes.
pub fn resolve_index(len: usize, raw: isize) -> Option<usize> {
  let resolved = if raw > 0 {
    raw - 1
  } else if raw < 0 {
    len as isize + raw
  } else {
    return None;
  };
  if resolved >= 0 && (resolved as usize) < len {
    Some(resolved as usize)
  } else {
    None
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_resolve_positive() {
    assert_eq!(resolve_index(5, 1), Some(0));
    assert_eq!(resolve_index(5, 5), Some(4));
    assert_eq!(resolve_index(5, 6), None);
  }

  #[test]
  fn test_resolve_negative() {
    assert_eq!(resolve_index(5, -1), Some(4));
    assert_eq!(resolve_index(5, -5), Some(0));
    assert_eq!(resolve_index(5, -6), None);
  }

  #[test]
  fn test_resolve_zero_never_valid() {
    assert_eq!(resolve_index(5, 0), None);
    assert_eq!(resolve_index(0, 0), None);
  }

  #[test]
  fn test_resolve_empty_table() {
    assert_eq!(resolve_index(0, 1), None);
    assert_eq!(resolve_index(0, -1), None);
  }
}

use std::path::PathBuf;

use thiserror::Error;

/// The error type of the vela-mesh crate.
///
/// Every fatal load failure carries enough context (resource path, line
/// number) to diagnose the offending input. Degenerate geometry is not an
/// error: zero-length face normals and zero bounding-box extents fall back
/// to safe defaults inside the load pipeline.
#[derive(Error, Debug)]
pub enum VelaMeshError {
  /// The mesh source file does not exist.
  #[error("mesh file not found: {path}")]
  FileNotFound {
    path: PathBuf,
  },

  /// A line violates the grammar for its tag.
  #[error("malformed input at line {line}: {message}")]
  MalformedInput {
    line: usize,
    message: String,
  },

  /// A face corner index falls outside its table after 1-based/negative
  /// resolution.
  #[error("{table} index {index} out of range (table has {len} entries)")]
  IndexOutOfRange {
    table: &'static str,
    index: isize,
    len: usize,
  },

  /// I/O failure while reading the mesh source.
  #[error("I/O error reading mesh: {0}")]
  Io(#[from] std::io::Error),
}

impl VelaMeshError {
  /// Create a `MalformedInput` error for the given 1-based line number.
  pub fn malformed(line: usize, message: impl Into<String>) -> Self {
    Self::MalformedInput {
      line,
      message: message.into(),
    }
  }
}

use glam::Vec3;

/// Axis-aligned bounding box (AABB) representation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VelaBounds {
  pub center: Vec3,
  pub extents: Vec3,
}

/// Implementation of VelaBounds.
impl VelaBounds {
  /// Create a new VelaBounds instance.
  /// param center: The center of the AABB.
  /// param extents: The extents of the AABB.
  /// return: The new VelaBounds instance.
  pub fn new(center: Vec3, extents: Vec3) -> Self {
    Self { center, extents }
  }

  /// Compute the AABB of a point set.
  ///
  /// An empty set yields a degenerate box at the origin.
  pub fn from_points(points: &[Vec3]) -> Self {
    let mut iter = points.iter();
    let first = match iter.next() {
      Some(p) => *p,
      None => return Self::new(Vec3::ZERO, Vec3::ZERO),
    };
    let (min, max) = iter.fold((first, first), |(min, max), p| {
      (min.min(*p), max.max(*p))
    });
    Self::from_min_max(min, max)
  }

  /// Create an AABB from its minimum and maximum corners.
  pub fn from_min_max(min: Vec3, max: Vec3) -> Self {
    let extents = (max - min) * 0.5;
    Self {
      center: min + extents,
      extents,
    }
  }

  /// Get the size of the AABB.
  /// return: The size of the AABB.
  pub fn get_size(&self) -> Vec3 {
    self.extents * 2.0
  }

  /// Get the minimum bounds of the AABB.
  /// return: The minimum bounds of the AABB.
  pub fn get_min(&self) -> Vec3 {
    self.center - self.extents
  }

  /// Get the maximum bounds of the AABB.
  /// return: The maximum bounds of the AABB.
  pub fn get_max(&self) -> Vec3 {
    self.center + self.extents
  }

  /// Grows the AABB to include the given point.
  /// param point: The point to include.
  pub fn encapsulate_point(&mut self, point: Vec3) {
    let min = self.get_min().min(point);
    let max = self.get_max().max(point);
    *self = Self::from_min_max(min, max);
  }
}

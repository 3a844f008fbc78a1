use glam::{
  Mat4,
  Vec3,
};

use crate::mesh::VelaMesh;

/// A placed instance of a packed mesh.
///
/// Placement is independent of the mesh: position, Euler rotation and
/// scale compose into a model matrix while the owned `VelaMesh` stays
/// immutable. Rotation angles are degrees (pitch, yaw, roll).
pub struct VelaModel {
  pub mesh: VelaMesh,
  pub position: Vec3,
  pub rotation: Vec3,
  pub scale: Vec3,
}

/// The implementation of the model.
impl VelaModel {
  /// Create a model at the origin with identity rotation and scale.
  /// param mesh: The packed mesh to place.
  /// return: The new model.
  pub fn new(mesh: VelaMesh) -> Self {
    Self {
      mesh,
      position: Vec3::ZERO,
      rotation: Vec3::ZERO,
      scale: Vec3::ONE,
    }
  }

  /// Compute the model matrix as `T * Rz * Ry * Rx * S`.
  /// return: The model matrix.
  pub fn model_matrix(&self) -> Mat4 {
    let t = Mat4::from_translation(self.position);
    let rx = Mat4::from_rotation_x(self.rotation.x.to_radians());
    let ry = Mat4::from_rotation_y(self.rotation.y.to_radians());
    let rz = Mat4::from_rotation_z(self.rotation.z.to_radians());
    let s = Mat4::from_scale(self.scale);
    t * rz * ry * rx * s
  }

  pub fn set_position(&mut self, position: Vec3) {
    self.position = position;
  }

  /// Set the Euler rotation in degrees.
  pub fn set_rotation(&mut self, rotation: Vec3) {
    self.rotation = rotation;
  }

  pub fn set_scale(&mut self, scale: Vec3) {
    self.scale = scale;
  }

  /// Set the same scale on all three axes.
  pub fn set_uniform_scale(&mut self, scale: f32) {
    self.scale = Vec3::splat(scale);
  }
}

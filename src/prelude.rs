pub use crate::error::VelaMeshError;
pub use crate::mesh::{
  VelaBounds,
  VelaCorner,
  VelaMesh,
  VelaRawMesh,
  VelaVertexStream,
};
pub use crate::mesh::loader::VelaObjLoader;
pub use crate::model::VelaModel;

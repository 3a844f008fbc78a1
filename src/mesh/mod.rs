pub mod raw;
pub mod normals;
pub mod expand;
pub mod bounds;
pub mod packed;
pub mod loader;

pub use raw::{VelaCorner, VelaRawMesh};
pub use expand::VelaVertexStream;
pub use bounds::VelaBounds;
pub use packed::VelaMesh;

/// Meshing: converts the voxel world into a flat list of textured triangles
pub mod face_mesher;
pub mod mesh;

pub use face_mesher::FaceCullingMesher;
pub use mesh::{face_triangles, Mesh, Triangle};

//! Read-only access to the triangles indexed by the trees.

pub use self::indexed_mesh::{IndexedMesh, MeshError};
pub use self::mesh_interface::MeshInterface;

mod indexed_mesh;
mod mesh_interface;

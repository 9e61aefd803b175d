use crate::shape::Triangle;
use alloc::vec::Vec;

/// A source of triangles.
///
/// This is the only view the trees and colliders have of the geometry: a triangle count and a
/// way to fetch the three vertices of any triangle. Triangle ids range from `0` to
/// `num_triangles() - 1`.
pub trait MeshInterface {
    /// The number of triangles of this mesh.
    fn num_triangles(&self) -> u32;

    /// The number of vertices of this mesh.
    fn num_vertices(&self) -> u32;

    /// The triangle with the given id.
    fn triangle(&self, id: u32) -> Triangle;
}

/// A triangle soup: each triangle owns its three vertices.
impl MeshInterface for [Triangle] {
    #[inline]
    fn num_triangles(&self) -> u32 {
        self.len() as u32
    }

    #[inline]
    fn num_vertices(&self) -> u32 {
        self.len() as u32 * 3
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        self[id as usize]
    }
}

impl MeshInterface for Vec<Triangle> {
    #[inline]
    fn num_triangles(&self) -> u32 {
        self.as_slice().num_triangles()
    }

    #[inline]
    fn num_vertices(&self) -> u32 {
        self.as_slice().num_vertices()
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        self[id as usize]
    }
}

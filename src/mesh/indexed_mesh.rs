use crate::math::{Point, Real};
use crate::mesh::MeshInterface;
use crate::shape::Triangle;
use alloc::vec::Vec;

/// Error indicating that an indexed mesh could not be created.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshError {
    /// A mesh must contain at least one triangle.
    #[error("a mesh must contain at least one triangle.")]
    EmptyIndices,
    /// A triangle references a vertex that does not exist.
    #[error("the triangle {triangle} references the vertex {vertex} which is out of bounds.")]
    VertexIndexOutOfBounds {
        /// The faulty triangle.
        triangle: u32,
        /// The out-of-bounds vertex index.
        vertex: u32,
    },
}

/// A triangle mesh defined by a vertex buffer and an index buffer.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct IndexedMesh {
    vertices: Vec<Point<Real>>,
    indices: Vec<[u32; 3]>,
}

impl IndexedMesh {
    /// Creates a new mesh, checking that every index refers to an existing vertex.
    pub fn new(vertices: Vec<Point<Real>>, indices: Vec<[u32; 3]>) -> Result<Self, MeshError> {
        if indices.is_empty() {
            return Err(MeshError::EmptyIndices);
        }

        for (triangle, idx) in indices.iter().enumerate() {
            if let Some(vertex) = idx.iter().find(|i| **i as usize >= vertices.len()) {
                return Err(MeshError::VertexIndexOutOfBounds {
                    triangle: triangle as u32,
                    vertex: *vertex,
                });
            }
        }

        Ok(Self { vertices, indices })
    }

    /// The vertex buffer of this mesh.
    pub fn vertices(&self) -> &[Point<Real>] {
        &self.vertices
    }

    /// Mutable access to the vertex buffer of this mesh.
    ///
    /// Moving vertices keeps the mesh topology unchanged: the trees built on this mesh can be
    /// refitted instead of rebuilt.
    pub fn vertices_mut(&mut self) -> &mut [Point<Real>] {
        &mut self.vertices
    }

    /// The index buffer of this mesh.
    pub fn indices(&self) -> &[[u32; 3]] {
        &self.indices
    }
}

impl MeshInterface for IndexedMesh {
    #[inline]
    fn num_triangles(&self) -> u32 {
        self.indices.len() as u32
    }

    #[inline]
    fn num_vertices(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    fn triangle(&self, id: u32) -> Triangle {
        let idx = self.indices[id as usize];
        Triangle::new(
            self.vertices[idx[0] as usize],
            self.vertices[idx[1] as usize],
            self.vertices[idx[2] as usize],
        )
    }
}

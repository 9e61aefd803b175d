use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::{Point, Real};
use crate::mesh::MeshInterface;

/// The primitives a tree is built on.
///
/// The builder only needs the bounding box of each primitive, and one scalar per axis used to
/// decide on which side of a split the primitive goes.
pub trait PrimitiveSource {
    /// The number of primitives.
    fn num_primitives(&self) -> u32;

    /// The bounding box of the primitive `id`.
    fn primitive_aabb(&self, id: u32) -> Aabb;

    /// The coordinate of the primitive `id` along `axis`, used to sort it during splits.
    fn split_value(&self, id: u32, axis: usize) -> Real;

    /// The union of the bounding boxes of the given primitives.
    fn compute_aabb(&self, primitives: &[u32]) -> Aabb {
        let mut aabb = Aabb::new_invalid();
        for id in primitives {
            aabb.merge(&self.primitive_aabb(*id));
        }
        aabb
    }
}

/// The triangles of a mesh, split at their centroids.
#[derive(Copy, Clone)]
pub struct TriangleSource<'a, M: ?Sized> {
    mesh: &'a M,
}

impl<'a, M: MeshInterface + ?Sized> TriangleSource<'a, M> {
    /// A source reading its triangles from `mesh`.
    pub fn new(mesh: &'a M) -> Self {
        Self { mesh }
    }
}

impl<M: MeshInterface + ?Sized> PrimitiveSource for TriangleSource<'_, M> {
    #[inline]
    fn num_primitives(&self) -> u32 {
        self.mesh.num_triangles()
    }

    #[inline]
    fn primitive_aabb(&self, id: u32) -> Aabb {
        self.mesh.triangle(id).aabb()
    }

    #[inline]
    fn split_value(&self, id: u32, axis: usize) -> Real {
        self.mesh.triangle(id).center()[axis]
    }
}

/// A set of boxes, split at their centers.
#[derive(Copy, Clone)]
pub struct AabbSource<'a> {
    aabbs: &'a [Aabb],
}

impl<'a> AabbSource<'a> {
    /// A source reading its primitives from `aabbs`.
    pub fn new(aabbs: &'a [Aabb]) -> Self {
        Self { aabbs }
    }
}

impl PrimitiveSource for AabbSource<'_> {
    #[inline]
    fn num_primitives(&self) -> u32 {
        self.aabbs.len() as u32
    }

    #[inline]
    fn primitive_aabb(&self, id: u32) -> Aabb {
        self.aabbs[id as usize]
    }

    #[inline]
    fn split_value(&self, id: u32, axis: usize) -> Real {
        self.aabbs[id as usize].center()[axis]
    }
}

/// A point cloud. Each point is a zero-extent primitive.
#[derive(Copy, Clone)]
pub struct VertexSource<'a> {
    vertices: &'a [Point<Real>],
}

impl<'a> VertexSource<'a> {
    /// A source reading its primitives from `vertices`.
    pub fn new(vertices: &'a [Point<Real>]) -> Self {
        Self { vertices }
    }
}

impl PrimitiveSource for VertexSource<'_> {
    #[inline]
    fn num_primitives(&self) -> u32 {
        self.vertices.len() as u32
    }

    #[inline]
    fn primitive_aabb(&self, id: u32) -> Aabb {
        let pt = self.vertices[id as usize];
        Aabb::new(pt, pt)
    }

    #[inline]
    fn split_value(&self, id: u32, axis: usize) -> Real {
        self.vertices[id as usize][axis]
    }
}

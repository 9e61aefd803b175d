use super::{ModelError, ModelSettings, ModelTree};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::mesh::MeshInterface;
use crate::partitioning::{
    AabbSource, AabbTree, AabbTreeNode, ArenaTree, OwnedTree, PrimitiveSource, TriangleSource,
};
use alloc::vec::Vec;
use core::ops::Range;

/// The maximum number of triangles per cluster of a [`HybridModel`].
const CLUSTER_SIZE: u32 = 16;

/// A cluster of at most 16 triangles, referenced by a leaf of a [`HybridModel`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct LeafTriangles {
    /// The number of triangles of this cluster.
    pub count: u32,
    /// The index of the first triangle of this cluster in [`HybridModel::indices`].
    pub start: u32,
}

impl LeafTriangles {
    /// The range of [`HybridModel::indices`] holding the triangles of this cluster.
    #[inline]
    pub fn range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }
}

/// A two-level collision model.
///
/// The triangles are first grouped into clusters of at most 16 triangles by a non-complete
/// tree. The model then only stores a complete tree over the cluster boxes, which is much
/// smaller than a complete tree over the triangles. Queries first find the clusters touched by
/// the query volume, then test their triangles.
///
/// As for [`Model`](super::Model), the mesh is passed to every query and refit.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct HybridModel {
    tree: Option<ModelTree>,
    leaves: Vec<LeafTriangles>,
    indices: Vec<u32>,
    source: Option<OwnedTree>,
    num_primitives: u32,
}

impl HybridModel {
    /// Builds a hybrid model over all the triangles of `mesh`.
    ///
    /// The leaf-size limit of the builder settings is ignored.
    pub fn build<M: MeshInterface + ?Sized>(
        mesh: &M,
        settings: &ModelSettings,
    ) -> Result<Self, ModelError> {
        let source = OwnedTree::new(
            &TriangleSource::new(mesh),
            settings
                .build
                .with_limit(CLUSTER_SIZE)
                .with_bounded_leaves(true),
        )?;

        let mut leaves = Vec::new();
        let mut leaf_aabbs = Vec::new();
        source.walk(|node, _| {
            if source.children(node).is_none() {
                let range = node.primitive_range();
                leaves.push(LeafTriangles {
                    count: range.len() as u32,
                    start: range.start as u32,
                });
                leaf_aabbs.push(*node.aabb());
            }
        });

        let tree = if leaves.len() == 1 {
            None
        } else {
            let clusters = ArenaTree::new(
                &AabbSource::new(&leaf_aabbs),
                settings.build.with_limit(1),
            )?;
            Some(ModelTree::new(&clusters, settings.no_leaf, settings.quantized)?)
        };

        log::debug!(
            "built a hybrid model with {} clusters over {} triangles",
            leaves.len(),
            mesh.num_triangles()
        );

        Ok(Self {
            tree,
            leaves,
            indices: source.permutation().to_vec(),
            num_primitives: mesh.num_triangles(),
            source: settings.keep_original.then_some(source),
        })
    }

    /// The tree over the cluster boxes, `None` if the model has a single cluster.
    #[inline]
    pub fn tree(&self) -> Option<&ModelTree> {
        self.tree.as_ref()
    }

    /// The tree the clusters were extracted from, if it was kept.
    #[inline]
    pub fn source_tree(&self) -> Option<&OwnedTree> {
        self.source.as_ref()
    }

    /// The clusters of this model, indexed by the primitives of [`HybridModel::tree`].
    #[inline]
    pub fn leaf_triangles(&self) -> &[LeafTriangles] {
        &self.leaves
    }

    /// The triangle ids, grouped by cluster.
    #[inline]
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// The triangles of the given cluster.
    #[inline]
    pub fn cluster_triangles(&self, cluster: u32) -> &[u32] {
        &self.indices[self.leaves[cluster as usize].range()]
    }

    /// The number of triangles of this model.
    #[inline]
    pub fn num_primitives(&self) -> u32 {
        self.num_primitives
    }

    /// Does this model have a single cluster, without any tree?
    #[inline]
    pub fn has_single_node(&self) -> bool {
        self.tree.is_none()
    }

    /// Updates the cluster boxes and the node boxes after the vertices of `mesh` moved.
    ///
    /// The triangle count and vertex indices of the mesh must not have changed since the model
    /// was built. Only models with a non-quantized no-leaf tree can be refitted.
    pub fn refit<M: MeshInterface + ?Sized>(&mut self, mesh: &M) -> Result<(), ModelError> {
        debug_assert_eq!(mesh.num_triangles(), self.num_primitives);

        match &mut self.tree {
            None => {}
            Some(ModelTree::NoLeaf(tree)) => tree.refit(&ClusterSource {
                mesh,
                leaves: &self.leaves,
                indices: &self.indices,
            }),
            Some(_) => return Err(ModelError::NotRefittable),
        }

        if let Some(original) = &mut self.source {
            original.refit(&TriangleSource::new(mesh));
        }

        Ok(())
    }
}

/// The clusters of a hybrid model, seen as primitives bounded by the union of their triangles.
struct ClusterSource<'a, M: ?Sized> {
    mesh: &'a M,
    leaves: &'a [LeafTriangles],
    indices: &'a [u32],
}

impl<M: MeshInterface + ?Sized> PrimitiveSource for ClusterSource<'_, M> {
    fn num_primitives(&self) -> u32 {
        self.leaves.len() as u32
    }

    fn primitive_aabb(&self, id: u32) -> Aabb {
        let mut aabb = Aabb::new_invalid();
        for tri in &self.indices[self.leaves[id as usize].range()] {
            aabb.merge(&self.mesh.triangle(*tri).aabb());
        }
        aabb
    }

    fn split_value(&self, id: u32, axis: usize) -> Real {
        self.primitive_aabb(id).center()[axis]
    }
}

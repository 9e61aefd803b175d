use super::{ContactStatus, QueryStats, QueryVolume};
use crate::mesh::MeshInterface;
use crate::model::{with_model_tree, HybridModel, Model};
use crate::partitioning::{Child, NodeContent, OptimizedTree};
use alloc::vec::Vec;
use smallvec::SmallVec;

/// The parameters of one volume query, shared by the whole traversal.
pub(crate) struct VolumeQuery<'a, Q, M: ?Sized> {
    pub volume: &'a Q,
    pub mesh: &'a M,
    pub first_contact: bool,
    pub skip_primitive_tests: bool,
}

impl<Q: QueryVolume, M: MeshInterface + ?Sized> VolumeQuery<'_, Q, M> {
    #[inline]
    fn contact_found(&self, stats: &QueryStats) -> bool {
        self.first_contact && stats.contact()
    }

    /// Reports `prim` if it touches the query volume, or unconditionally if primitive tests are
    /// skipped.
    #[inline]
    pub fn test_primitive(
        &self,
        prim: u32,
        flag: ContactStatus,
        touched: &mut Vec<u32>,
        stats: &mut QueryStats,
    ) {
        if !self.skip_primitive_tests {
            stats.nb_prim_tests += 1;
            if !self
                .volume
                .intersects_triangle(&self.mesh.triangle(prim))
            {
                return;
            }
        }

        stats.status |= flag;
        touched.push(prim);
    }

    /// Tests the only triangle of a single-node model.
    fn test_lone_primitive(&self, touched: &mut Vec<u32>, stats: &mut QueryStats) {
        if self.skip_primitive_tests {
            stats.nb_bv_tests += 1;
            if self
                .volume
                .intersects_aabb(&self.mesh.triangle(0).aabb())
            {
                stats.status |= ContactStatus::CONTACT;
                touched.push(0);
            }
        } else {
            self.test_primitive(0, ContactStatus::CONTACT, touched, stats);
        }
    }

    /// Reports the primitives of `tree` touching the query volume.
    pub fn collide_tree<T: OptimizedTree>(
        &self,
        tree: &T,
        touched: &mut Vec<u32>,
        stats: &mut QueryStats,
    ) {
        let mut stack: SmallVec<[Child; 32]> = SmallVec::new();
        stack.push(Child::Offset(0));

        while let Some(child) = stack.pop() {
            if self.contact_found(stats) {
                return;
            }

            let id = match child {
                Child::Primitive(prim) => {
                    self.test_primitive(prim, ContactStatus::CONTACT, touched, stats);
                    continue;
                }
                Child::Offset(id) => id,
            };

            let aabb = tree.node_aabb(id);
            stats.nb_bv_tests += 1;

            if !self.volume.intersects_aabb(&aabb) {
                continue;
            }

            if self.volume.contains_aabb(&aabb) {
                // Every primitive below this node touches the volume.
                stats.status |= ContactStatus::CONTACT;
                tree.for_each_primitive(child, |prim| touched.push(prim));
                continue;
            }

            match tree.node_content(id) {
                NodeContent::Leaf(prim) => {
                    self.test_primitive(prim, ContactStatus::CONTACT, touched, stats)
                }
                NodeContent::Branch([pos, neg]) => {
                    stack.push(neg);
                    stack.push(pos);
                }
            }
        }
    }

    /// Reports the triangles of `model` touching the query volume.
    pub fn collide_model(&self, model: &Model, touched: &mut Vec<u32>, stats: &mut QueryStats) {
        match model.tree() {
            None => self.test_lone_primitive(touched, stats),
            Some(tree) => with_model_tree!(tree, |tree| self.collide_tree(tree, touched, stats)),
        }
    }

    /// Reports the triangles of `model` touching the query volume.
    ///
    /// The clusters touching the volume are collected first, then their triangles are tested.
    pub fn collide_hybrid(
        &self,
        model: &HybridModel,
        touched: &mut Vec<u32>,
        stats: &mut QueryStats,
    ) {
        let Some(tree) = model.tree() else {
            for prim in 0..model.num_primitives() {
                self.test_primitive(prim, ContactStatus::CONTACT, touched, stats);
                if self.contact_found(stats) {
                    return;
                }
            }
            return;
        };

        // Clusters are not triangles: the cluster pass must never access the mesh.
        let cluster_query = VolumeQuery {
            volume: self.volume,
            mesh: self.mesh,
            first_contact: false,
            skip_primitive_tests: true,
        };
        let mut clusters = Vec::new();
        let mut cluster_stats = QueryStats::default();
        with_model_tree!(tree, |tree| cluster_query.collide_tree(
            tree,
            &mut clusters,
            &mut cluster_stats
        ));
        stats.nb_bv_tests += cluster_stats.nb_bv_tests;

        for cluster in clusters {
            for prim in model.cluster_triangles(cluster) {
                self.test_primitive(*prim, ContactStatus::CONTACT, touched, stats);
                if self.contact_found(stats) {
                    return;
                }
            }
        }
    }
}

use super::{ContactStatus, QueryFlags, QueryStats, SettingsError};
use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Real};
use crate::mesh::MeshInterface;
use crate::model::{with_model_tree, Model};
use crate::partitioning::{Child, CollisionTree, NodeContent, OptimizedTree};
use crate::query::details::{
    intersection_test_aabb_triangle, intersection_test_triangle_triangle, BoxBoxSat,
};
use crate::shape::Triangle;
use alloc::vec::Vec;
use smallvec::SmallVec;

/// The state a first-contact tree-tree query keeps from one call to the next.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct PairCache {
    /// The pair of triangles found colliding by the last query, if any.
    pub pair: Option<(u32, u32)>,
}

impl PairCache {
    /// Forgets the result of the previous query.
    pub fn invalidate(&mut self) {
        self.pair = None;
    }
}

/// Finds the pairs of intersecting triangles between two models.
///
/// Both models are traversed simultaneously. Node pairs are tested with a separating axis test
/// between oriented boxes, a node against a triangle with a box-triangle test, and two
/// triangles with an exact triangle-triangle test.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeCollider {
    flags: QueryFlags,
}

impl TreeCollider {
    /// Creates a tree collider with the given query flags.
    ///
    /// Temporal coherence caches a single pair, and therefore requires the first-contact mode.
    pub fn new(flags: QueryFlags) -> Result<Self, SettingsError> {
        if flags.contains(QueryFlags::SKIP_PRIMITIVE_TESTS) {
            return Err(SettingsError::PrimitiveTestsRequired);
        }

        if flags.contains(QueryFlags::TEMPORAL_COHERENCE)
            && !flags.contains(QueryFlags::FIRST_CONTACT)
        {
            return Err(SettingsError::TemporalCoherenceRequiresFirstContact);
        }

        Ok(Self { flags })
    }

    /// The flags of this collider.
    #[inline]
    pub fn flags(&self) -> QueryFlags {
        self.flags
    }

    /// Finds the pairs of intersecting triangles between `model0` placed at `pos0` and `model1`
    /// placed at `pos1`.
    ///
    /// `pairs` is cleared then filled with `(triangle of model0, triangle of model1)` pairs in
    /// discovery order. Each pair is reported at most once.
    pub fn collide<M0: MeshInterface + ?Sized, M1: MeshInterface + ?Sized>(
        &self,
        cache: &mut PairCache,
        pos0: &Isometry<Real>,
        model0: &Model,
        mesh0: &M0,
        pos1: &Isometry<Real>,
        model1: &Model,
        mesh1: &M1,
        pairs: &mut Vec<(u32, u32)>,
    ) -> QueryStats {
        debug_assert_eq!(mesh0.num_triangles(), model0.num_primitives());
        debug_assert_eq!(mesh1.num_triangles(), model1.num_primitives());

        pairs.clear();
        let mut stats = QueryStats::default();
        let temporal_coherence = self.flags.contains(QueryFlags::TEMPORAL_COHERENCE);

        let rel = pos0.inv_mul(pos1);
        let query = TreeQuery {
            mesh0,
            mesh1,
            rel,
            inv_rel: rel.inverse(),
            sat: BoxBoxSat::new(rel.rotation.to_rotation_matrix().matrix()),
            first_contact: self.flags.contains(QueryFlags::FIRST_CONTACT),
        };

        if temporal_coherence {
            if let Some((id0, id1)) = cache.pair {
                query.test_pair(id0, id1, ContactStatus::TEMPORAL_CONTACT, pairs, &mut stats);
                if stats.contact() {
                    return stats;
                }
            }
        }

        match (model0.tree(), model1.tree()) {
            (Some(tree0), Some(tree1)) => with_model_tree!(tree0, |tree0| with_model_tree!(
                tree1,
                |tree1| query.collide_trees(Some(tree0), Some(tree1), pairs, &mut stats)
            )),
            (Some(tree0), None) => with_model_tree!(tree0, |tree0| query.collide_trees(
                Some(tree0),
                None::<&CollisionTree>,
                pairs,
                &mut stats
            )),
            (None, Some(tree1)) => with_model_tree!(tree1, |tree1| query.collide_trees(
                None::<&CollisionTree>,
                Some(tree1),
                pairs,
                &mut stats
            )),
            (None, None) => query.collide_trees(
                None::<&CollisionTree>,
                None::<&CollisionTree>,
                pairs,
                &mut stats,
            ),
        }

        if temporal_coherence {
            cache.pair = pairs.first().copied();
        }

        stats
    }
}

struct TreeQuery<'a, M0: ?Sized, M1: ?Sized> {
    mesh0: &'a M0,
    mesh1: &'a M1,
    /// Maps the local frame of the second model to the local frame of the first one.
    rel: Isometry<Real>,
    inv_rel: Isometry<Real>,
    sat: BoxBoxSat,
    first_contact: bool,
}

impl<M0: MeshInterface + ?Sized, M1: MeshInterface + ?Sized> TreeQuery<'_, M0, M1> {
    /// A triangle of the second model, in the frame of the first one.
    #[inline]
    fn triangle1(&self, id1: u32) -> Triangle {
        self.mesh1.triangle(id1).transformed(&self.rel)
    }

    fn test_pair(
        &self,
        id0: u32,
        id1: u32,
        flag: ContactStatus,
        pairs: &mut Vec<(u32, u32)>,
        stats: &mut QueryStats,
    ) {
        stats.nb_prim_tests += 1;
        if intersection_test_triangle_triangle(&self.mesh0.triangle(id0), &self.triangle1(id1)) {
            stats.status |= flag;
            pairs.push((id0, id1));
        }
    }

    fn collide_trees<T0: OptimizedTree, T1: OptimizedTree>(
        &self,
        tree0: Option<&T0>,
        tree1: Option<&T1>,
        pairs: &mut Vec<(u32, u32)>,
        stats: &mut QueryStats,
    ) {
        // A single-node model is its lone triangle.
        let root0 = tree0.map_or(Child::Primitive(0), |_| Child::Offset(0));
        let root1 = tree1.map_or(Child::Primitive(0), |_| Child::Offset(0));

        let mut stack: SmallVec<[(Child, Child); 32]> = SmallVec::new();
        stack.push((root0, root1));

        while let Some(pair) = stack.pop() {
            if self.first_contact && stats.contact() {
                return;
            }

            match pair {
                (Child::Primitive(id0), Child::Primitive(id1)) => {
                    self.test_pair(id0, id1, ContactStatus::CONTACT, pairs, stats)
                }
                (Child::Primitive(id0), Child::Offset(node1)) => {
                    let Some(tree1) = tree1 else { continue };
                    let aabb1 = tree1.node_aabb(node1);

                    stats.nb_bv_prim_tests += 1;
                    let triangle0 = self.mesh0.triangle(id0).transformed(&self.inv_rel);
                    if intersection_test_aabb_triangle(&aabb1, &triangle0) {
                        push_children(tree1.node_content(node1), |child1| {
                            stack.push((Child::Primitive(id0), child1))
                        });
                    }
                }
                (Child::Offset(node0), Child::Primitive(id1)) => {
                    let Some(tree0) = tree0 else { continue };
                    let aabb0 = tree0.node_aabb(node0);

                    stats.nb_bv_prim_tests += 1;
                    if intersection_test_aabb_triangle(&aabb0, &self.triangle1(id1)) {
                        push_children(tree0.node_content(node0), |child0| {
                            stack.push((child0, Child::Primitive(id1)))
                        });
                    }
                }
                (Child::Offset(node0), Child::Offset(node1)) => {
                    let (Some(tree0), Some(tree1)) = (tree0, tree1) else {
                        continue;
                    };
                    let aabb0 = tree0.node_aabb(node0);
                    let aabb1 = tree1.node_aabb(node1);

                    stats.nb_bv_tests += 1;
                    if !self.boxes_intersect(&aabb0, &aabb1) {
                        continue;
                    }

                    match (tree0.node_content(node0), tree1.node_content(node1)) {
                        (NodeContent::Leaf(id0), NodeContent::Leaf(id1)) => {
                            self.test_pair(id0, id1, ContactStatus::CONTACT, pairs, stats)
                        }
                        (NodeContent::Leaf(id0), content1) => push_children(content1, |child1| {
                            stack.push((Child::Primitive(id0), child1))
                        }),
                        (content0, NodeContent::Leaf(id1)) => push_children(content0, |child0| {
                            stack.push((child0, Child::Primitive(id1)))
                        }),
                        (content0, content1) => {
                            // Descend into the larger node.
                            if aabb0.half_extents().norm_squared()
                                >= aabb1.half_extents().norm_squared()
                            {
                                push_children(content0, |child0| {
                                    stack.push((child0, Child::Offset(node1)))
                                });
                            } else {
                                push_children(content1, |child1| {
                                    stack.push((Child::Offset(node0), child1))
                                });
                            }
                        }
                    }
                }
            }
        }
    }

    /// Separating axis test between a node box of the first model and a node box of the second
    /// one, each expressed in the local frame of its model.
    #[inline]
    fn boxes_intersect(&self, aabb0: &Aabb, aabb1: &Aabb) -> bool {
        let t = self.rel * aabb1.center() - aabb0.center();
        self.sat
            .intersects(&aabb0.half_extents(), &aabb1.half_extents(), &t)
    }
}

/// Pushes the children of a node so that the first child is popped first.
#[inline]
fn push_children(content: NodeContent, mut push: impl FnMut(Child)) {
    match content {
        NodeContent::Leaf(prim) => push(Child::Primitive(prim)),
        NodeContent::Branch([pos, neg]) => {
            push(neg);
            push(pos);
        }
    }
}

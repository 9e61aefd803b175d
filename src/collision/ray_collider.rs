use super::{ContactStatus, QueryFlags, QueryStats, SettingsError};
use crate::math::Real;
use crate::mesh::MeshInterface;
use crate::model::{with_model_tree, HybridModel, Model};
use crate::partitioning::{Child, NodeContent, OptimizedTree};
use crate::query::{cast_ray_on_triangle, Ray, RayAabbTest};
use alloc::vec::Vec;
use smallvec::SmallVec;

/// A triangle stabbed by a ray.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionFace {
    /// The index of the triangle.
    pub face_id: u32,
    /// The ray parameter at the hit point, in units of the ray direction length.
    pub distance: Real,
    /// Barycentric coordinate of the hit point associated to the second vertex.
    pub u: Real,
    /// Barycentric coordinate of the hit point associated to the third vertex.
    pub v: Real,
}

/// Configuration of a [`RayCollider`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaySettings {
    /// The query flags. [`QueryFlags::SKIP_PRIMITIVE_TESTS`] is not supported by rays, and
    /// [`QueryFlags::TEMPORAL_COHERENCE`] requires [`QueryFlags::FIRST_CONTACT`].
    pub flags: QueryFlags,
    /// Only keep the hit with the smallest distance.
    pub closest_hit: bool,
    /// Ignore the triangles seen from behind, i.e. whose normal points away from the ray
    /// origin.
    pub culling: bool,
    /// The largest ray parameter considered. With a finite value the ray is a segment.
    pub max_dist: Real,
}

impl Default for RaySettings {
    /// All the front-facing hits along an unbounded ray.
    fn default() -> Self {
        Self {
            flags: QueryFlags::empty(),
            closest_hit: false,
            culling: true,
            max_dist: Real::MAX,
        }
    }
}

impl RaySettings {
    /// Settings answering "does anything lie between the ray origin and `max_dist`?", e.g. for
    /// shadow rays. The last occluder is cached.
    pub fn shadow_feeler(max_dist: Real) -> Self {
        Self {
            flags: QueryFlags::FIRST_CONTACT | QueryFlags::TEMPORAL_COHERENCE,
            closest_hit: false,
            culling: false,
            max_dist,
        }
    }

    /// Settings finding the first front-facing triangle along the ray.
    pub fn closest_hit() -> Self {
        Self {
            closest_hit: true,
            ..Self::default()
        }
    }

    /// Settings reporting every triangle crossed by the ray, front or back.
    ///
    /// For a closed mesh, the ray origin is inside of the mesh iff an odd number of triangles
    /// is crossed.
    pub fn in_out_test() -> Self {
        Self {
            culling: false,
            ..Self::default()
        }
    }

    /// Replaces the query flags.
    #[must_use]
    pub fn with_flags(mut self, flags: QueryFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Enables or disables backface culling.
    #[must_use]
    pub fn with_culling(mut self, culling: bool) -> Self {
        self.culling = culling;
        self
    }

    /// Sets the largest ray parameter considered.
    #[must_use]
    pub fn with_max_dist(mut self, max_dist: Real) -> Self {
        self.max_dist = max_dist;
        self
    }

    /// Checks these settings are consistent.
    pub fn validate(&self) -> Result<(), SettingsError> {
        let first_contact = self.flags.contains(QueryFlags::FIRST_CONTACT);
        let temporal_coherence = self.flags.contains(QueryFlags::TEMPORAL_COHERENCE);

        if !(self.max_dist >= 0.0) {
            Err(SettingsError::NegativeMaxDistance)
        } else if self.flags.contains(QueryFlags::SKIP_PRIMITIVE_TESTS) {
            Err(SettingsError::PrimitiveTestsRequired)
        } else if self.closest_hit && first_contact {
            Err(SettingsError::ClosestHitWithFirstContact)
        } else if self.closest_hit && temporal_coherence {
            Err(SettingsError::ClosestHitWithTemporalCoherence)
        } else if temporal_coherence && !first_contact {
            Err(SettingsError::TemporalCoherenceRequiresFirstContact)
        } else {
            Ok(())
        }
    }
}

/// The state a first-contact ray query keeps from one call to the next.
///
/// Like [`VolumeCache`](super::VolumeCache), a ray cache belongs to a single query stream.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RayCache {
    /// The triangle stabbed by the last query, if any.
    pub face: Option<u32>,
}

impl RayCache {
    /// Forgets the result of the previous query.
    pub fn invalidate(&mut self) {
        self.face = None;
    }
}

struct RayState {
    /// Hits farther than this are discarded.
    best: Real,
    first_face: Option<u32>,
    stats: QueryStats,
}

struct RayQuery<'a, M: ?Sized> {
    ray: Ray,
    aabb_test: RayAabbTest,
    mesh: &'a M,
    culling: bool,
    first_contact: bool,
    closest_hit: bool,
}

impl<M: MeshInterface + ?Sized> RayQuery<'_, M> {
    #[inline]
    fn done(&self, state: &RayState) -> bool {
        self.first_contact && state.stats.contact()
    }

    fn test_primitive(
        &self,
        prim: u32,
        flag: ContactStatus,
        state: &mut RayState,
        on_hit: &mut impl FnMut(&CollisionFace),
    ) {
        state.stats.nb_prim_tests += 1;

        let triangle = self.mesh.triangle(prim);
        let Some(hit) = cast_ray_on_triangle(&triangle, &self.ray, state.best, self.culling)
        else {
            return;
        };

        if self.closest_hit {
            if state.stats.contact() && hit.time_of_impact >= state.best {
                return;
            }
            state.best = hit.time_of_impact;
        }

        state.stats.status |= flag;
        let _ = state.first_face.get_or_insert(prim);
        on_hit(&CollisionFace {
            face_id: prim,
            distance: hit.time_of_impact,
            u: hit.u,
            v: hit.v,
        });
    }

    /// Runs `test_leaf` on every primitive of `tree` whose boxes are stabbed by the ray.
    fn collide_tree<T: OptimizedTree>(
        &self,
        tree: &T,
        state: &mut RayState,
        mut test_leaf: impl FnMut(&mut RayState, u32),
    ) {
        let mut stack: SmallVec<[Child; 32]> = SmallVec::new();
        stack.push(Child::Offset(0));

        while let Some(child) = stack.pop() {
            if self.done(state) {
                return;
            }

            let id = match child {
                Child::Primitive(prim) => {
                    test_leaf(state, prim);
                    continue;
                }
                Child::Offset(id) => id,
            };

            state.stats.nb_bv_tests += 1;
            match self.aabb_test.clip(&tree.node_aabb(id)) {
                Some((tmin, _)) if tmin <= state.best => {}
                _ => continue,
            }

            match tree.node_content(id) {
                NodeContent::Leaf(prim) => test_leaf(state, prim),
                NodeContent::Branch([pos, neg]) => {
                    stack.push(neg);
                    stack.push(pos);
                }
            }
        }
    }
}

#[derive(Copy, Clone)]
enum RayTarget<'a> {
    Model(&'a Model),
    Hybrid(&'a HybridModel),
}

impl RayTarget<'_> {
    fn num_primitives(&self) -> u32 {
        match self {
            RayTarget::Model(model) => model.num_primitives(),
            RayTarget::Hybrid(model) => model.num_primitives(),
        }
    }
}

/// Finds the triangles of a model stabbed by a ray or a segment.
///
/// The ray must be expressed in the local frame of the model.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayCollider {
    settings: RaySettings,
}

impl RayCollider {
    /// Creates a ray collider, after validating its settings.
    pub fn new(settings: RaySettings) -> Result<Self, SettingsError> {
        settings.validate()?;
        Ok(Self { settings })
    }

    /// The settings of this collider.
    #[inline]
    pub fn settings(&self) -> &RaySettings {
        &self.settings
    }

    /// Finds the triangles of `model` stabbed by `ray`.
    ///
    /// `faces` is cleared, then filled with the hits in discovery order. In closest-hit mode it
    /// contains at most one face.
    pub fn collide<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut RayCache,
        ray: &Ray,
        model: &Model,
        mesh: &M,
        faces: &mut Vec<CollisionFace>,
    ) -> QueryStats {
        faces.clear();
        let closest_hit = self.settings.closest_hit;
        self.collide_impl(cache, ray, RayTarget::Model(model), mesh, |face| {
            if closest_hit {
                faces.clear();
            }
            faces.push(*face);
        })
    }

    /// Finds the triangles of a hybrid `model` stabbed by `ray`.
    ///
    /// See [`RayCollider::collide`].
    pub fn collide_hybrid<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut RayCache,
        ray: &Ray,
        model: &HybridModel,
        mesh: &M,
        faces: &mut Vec<CollisionFace>,
    ) -> QueryStats {
        faces.clear();
        let closest_hit = self.settings.closest_hit;
        self.collide_impl(cache, ray, RayTarget::Hybrid(model), mesh, |face| {
            if closest_hit {
                faces.clear();
            }
            faces.push(*face);
        })
    }

    /// Calls `on_hit` on each triangle of `model` stabbed by `ray`, in discovery order.
    ///
    /// In closest-hit mode, only the hits closer than all the previous ones are reported: the
    /// last one is the closest.
    pub fn collide_with_callback<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut RayCache,
        ray: &Ray,
        model: &Model,
        mesh: &M,
        on_hit: impl FnMut(&CollisionFace),
    ) -> QueryStats {
        self.collide_impl(cache, ray, RayTarget::Model(model), mesh, on_hit)
    }

    /// Calls `on_hit` on each triangle of a hybrid `model` stabbed by `ray`, in discovery order.
    ///
    /// See [`RayCollider::collide_with_callback`].
    pub fn collide_hybrid_with_callback<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut RayCache,
        ray: &Ray,
        model: &HybridModel,
        mesh: &M,
        on_hit: impl FnMut(&CollisionFace),
    ) -> QueryStats {
        self.collide_impl(cache, ray, RayTarget::Hybrid(model), mesh, on_hit)
    }

    fn collide_impl<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut RayCache,
        ray: &Ray,
        target: RayTarget,
        mesh: &M,
        mut on_hit: impl FnMut(&CollisionFace),
    ) -> QueryStats {
        debug_assert_eq!(
            mesh.num_triangles(),
            target.num_primitives(),
            "The mesh does not match the model."
        );

        let first_contact = self.settings.flags.contains(QueryFlags::FIRST_CONTACT);
        let temporal_coherence = self
            .settings
            .flags
            .contains(QueryFlags::TEMPORAL_COHERENCE);
        let query = RayQuery {
            ray: *ray,
            aabb_test: RayAabbTest::new(ray, self.settings.max_dist),
            mesh,
            culling: self.settings.culling,
            first_contact,
            closest_hit: self.settings.closest_hit,
        };
        let mut state = RayState {
            best: self.settings.max_dist,
            first_face: None,
            stats: QueryStats::default(),
        };

        if temporal_coherence {
            if let Some(prev) = cache.face {
                debug_assert!(prev < mesh.num_triangles(), "Stale ray cache.");
                query.test_primitive(
                    prev,
                    ContactStatus::TEMPORAL_CONTACT,
                    &mut state,
                    &mut on_hit,
                );

                if state.stats.contact() {
                    return state.stats;
                }
            }
        }

        match target {
            RayTarget::Model(model) => match model.tree() {
                None => query.test_primitive(0, ContactStatus::CONTACT, &mut state, &mut on_hit),
                Some(tree) => with_model_tree!(tree, |tree| query.collide_tree(
                    tree,
                    &mut state,
                    |state, prim| {
                        query.test_primitive(prim, ContactStatus::CONTACT, state, &mut on_hit)
                    }
                )),
            },
            RayTarget::Hybrid(model) => {
                let mut test_cluster = |state: &mut RayState, cluster: Option<u32>| {
                    let prims = match cluster {
                        Some(cluster) => model.cluster_triangles(cluster),
                        None => model.indices(),
                    };

                    for prim in prims {
                        query.test_primitive(*prim, ContactStatus::CONTACT, state, &mut on_hit);
                        if query.done(state) {
                            return;
                        }
                    }
                };

                match model.tree() {
                    None => test_cluster(&mut state, None),
                    Some(tree) => with_model_tree!(tree, |tree| query.collide_tree(
                        tree,
                        &mut state,
                        |state, cluster| test_cluster(state, Some(cluster))
                    )),
                }
            }
        }

        if temporal_coherence {
            cache.face = state.first_face;
        }

        state.stats
    }
}

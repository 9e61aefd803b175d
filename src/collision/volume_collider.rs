use super::volume_traversal::VolumeQuery;
use super::{ColliderVolume, ContactStatus, Planes, QueryFlags, QueryStats, SettingsError};
use crate::bounding_volume::{Aabb, Obb};
use crate::math::Real;
use crate::mesh::MeshInterface;
use crate::model::{HybridModel, Model};
use crate::shape::{Ball, Capsule};
use alloc::vec::Vec;
use core::fmt;
use core::marker::PhantomData;

/// The default factor by which the cached volume is enlarged in all-contacts mode.
pub const DEFAULT_FAT_COEFF: Real = 1.1;

/// The state a volume query keeps from one call to the next.
///
/// A cache belongs to a single query stream (e.g. one moving object): sharing it between
/// unrelated queries, or reusing it after the queried model was rebuilt with a different
/// triangle count, gives stale results. Call [`VolumeCache::invalidate`] in that case.
#[derive(Clone, Debug)]
pub struct VolumeCache<V> {
    /// The triangles touched by the last query.
    pub touched: Vec<u32>,
    /// The enlarged volume the last all-contacts traversal was run with.
    pub fat_volume: Option<V>,
    /// The factor by which the volume is enlarged before a traversal, in all-contacts mode.
    ///
    /// Boxes have their extents scaled by this factor, spheres and capsules their squared
    /// radius.
    pub fat_coeff: Real,
}

impl<V> Default for VolumeCache<V> {
    fn default() -> Self {
        Self {
            touched: Vec::new(),
            fat_volume: None,
            fat_coeff: DEFAULT_FAT_COEFF,
        }
    }
}

impl<V> VolumeCache<V> {
    /// An empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty cache with a custom fattening factor.
    pub fn with_fat_coeff(fat_coeff: Real) -> Self {
        Self {
            fat_coeff,
            ..Self::default()
        }
    }

    /// Forgets the result of the previous query.
    pub fn invalidate(&mut self) {
        self.touched.clear();
        self.fat_volume = None;
    }

    /// The triangles touched by the last query.
    #[inline]
    pub fn touched_primitives(&self) -> &[u32] {
        &self.touched
    }
}

/// Cache of an [`AabbCollider`].
pub type AabbCache = VolumeCache<Aabb>;
/// Cache of an [`ObbCollider`].
pub type ObbCache = VolumeCache<Obb>;
/// Cache of a [`CapsuleCollider`].
pub type CapsuleCache = VolumeCache<Capsule>;
/// Cache of a [`SphereCollider`].
pub type SphereCache = VolumeCache<Ball>;
/// Cache of a [`PlanesCollider`].
pub type PlanesCache = VolumeCache<Planes>;

/// Finds the triangles of a model touching a volume of type `V`.
///
/// The volume must be expressed in the local frame of the model: transform it by the inverse
/// of the model pose before querying.
pub struct VolumeCollider<V> {
    flags: QueryFlags,
    _volume: PhantomData<fn(&V)>,
}

/// Finds the triangles touching an axis-aligned box.
pub type AabbCollider = VolumeCollider<Aabb>;
/// Finds the triangles touching an oriented box.
pub type ObbCollider = VolumeCollider<Obb>;
/// Finds the triangles touching a capsule (a swept sphere).
pub type CapsuleCollider = VolumeCollider<Capsule>;
/// Finds the triangles touching a sphere.
pub type SphereCollider = VolumeCollider<Ball>;
/// Finds the triangles touching a convex set of planes.
pub type PlanesCollider = VolumeCollider<Planes>;

impl<V> Clone for VolumeCollider<V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<V> Copy for VolumeCollider<V> {}

impl<V> fmt::Debug for VolumeCollider<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VolumeCollider")
            .field("flags", &self.flags)
            .finish()
    }
}

impl<V: ColliderVolume> Default for VolumeCollider<V> {
    /// An all-contacts collider without temporal coherence.
    fn default() -> Self {
        Self {
            flags: QueryFlags::empty(),
            _volume: PhantomData,
        }
    }
}

impl<V: ColliderVolume> VolumeCollider<V> {
    /// Creates a collider with the given query flags.
    pub fn new(flags: QueryFlags) -> Result<Self, SettingsError> {
        if !V::CACHES_ALL_CONTACTS
            && flags.contains(QueryFlags::TEMPORAL_COHERENCE)
            && !flags.contains(QueryFlags::FIRST_CONTACT)
        {
            return Err(SettingsError::TemporalCoherenceRequiresFirstContact);
        }

        Ok(Self {
            flags,
            _volume: PhantomData,
        })
    }

    /// The flags of this collider.
    #[inline]
    pub fn flags(&self) -> QueryFlags {
        self.flags
    }

    #[inline]
    fn first_contact(&self) -> bool {
        self.flags.contains(QueryFlags::FIRST_CONTACT)
    }

    #[inline]
    fn temporal_coherence(&self) -> bool {
        self.flags.contains(QueryFlags::TEMPORAL_COHERENCE)
    }

    fn query<'a, M: MeshInterface + ?Sized>(
        &self,
        volume: &'a V::Query,
        mesh: &'a M,
    ) -> VolumeQuery<'a, V::Query, M> {
        VolumeQuery {
            volume,
            mesh,
            first_contact: self.first_contact(),
            skip_primitive_tests: self.flags.contains(QueryFlags::SKIP_PRIMITIVE_TESTS),
        }
    }

    /// Consults the cache, and returns the volume a full traversal must be run with, if any.
    ///
    /// On return, `cache.touched` is empty if a traversal is needed.
    fn init_query<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut VolumeCache<V>,
        volume: &V,
        mesh: &M,
        stats: &mut QueryStats,
    ) -> Option<V> {
        if !self.temporal_coherence() {
            cache.touched.clear();
            return Some(volume.clone());
        }

        if self.first_contact() {
            // Test the triangle hit last time before anything else. The cached triangle is always
            // tested for real, even when primitive tests are skipped.
            if let Some(&prev) = cache.touched.first() {
                debug_assert!(prev < mesh.num_triangles(), "Stale volume cache.");
                cache.touched.clear();
                let prepared = volume.prepare();
                let query = VolumeQuery {
                    skip_primitive_tests: false,
                    ..self.query(&prepared, mesh)
                };
                query.test_primitive(
                    prev,
                    ContactStatus::TEMPORAL_CONTACT,
                    &mut cache.touched,
                    stats,
                );

                if stats.contact() {
                    return None;
                }
            }

            Some(volume.clone())
        } else {
            if let Some(fat_volume) = &cache.fat_volume {
                if fat_volume.contains_volume(volume) {
                    // The previous result is a superset of the current one.
                    if !cache.touched.is_empty() {
                        stats.status |= ContactStatus::TEMPORAL_CONTACT;
                    }
                    return None;
                }
            }

            cache.touched.clear();
            let fat_volume = volume.fattened(cache.fat_coeff);
            cache.fat_volume = Some(fat_volume.clone());
            Some(fat_volume)
        }
    }

    /// Finds the triangles of `model` touching `volume`.
    ///
    /// `mesh` must be the mesh `model` was built from. The touched triangles are stored in
    /// `cache.touched`. With temporal coherence in all-contacts mode, the result may contain
    /// triangles touching the enlarged volume only.
    pub fn collide<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut VolumeCache<V>,
        volume: &V,
        model: &Model,
        mesh: &M,
    ) -> QueryStats {
        debug_assert_eq!(
            mesh.num_triangles(),
            model.num_primitives(),
            "The mesh does not match the model."
        );

        let mut stats = QueryStats::default();

        if model.has_single_node() {
            cache.touched.clear();
            let prepared = volume.prepare();
            self.query(&prepared, mesh)
                .collide_model(model, &mut cache.touched, &mut stats);
            return stats;
        }

        if let Some(volume) = self.init_query(cache, volume, mesh, &mut stats) {
            let prepared = volume.prepare();
            self.query(&prepared, mesh)
                .collide_model(model, &mut cache.touched, &mut stats);
        }

        stats
    }

    /// Finds the triangles of a hybrid `model` touching `volume`.
    ///
    /// Behaves exactly like [`VolumeCollider::collide`] on a regular model built from the same
    /// mesh, up to the order of the touched triangles.
    pub fn collide_hybrid<M: MeshInterface + ?Sized>(
        &self,
        cache: &mut VolumeCache<V>,
        volume: &V,
        model: &HybridModel,
        mesh: &M,
    ) -> QueryStats {
        debug_assert_eq!(
            mesh.num_triangles(),
            model.num_primitives(),
            "The mesh does not match the model."
        );

        let mut stats = QueryStats::default();

        if let Some(volume) = self.init_query(cache, volume, mesh, &mut stats) {
            let prepared = volume.prepare();
            self.query(&prepared, mesh)
                .collide_hybrid(model, &mut cache.touched, &mut stats);
        }

        stats
    }
}

//! Colliders: queries finding the triangles of a model touching a volume, a ray, or another
//! model.
//!
//! Every collider works with all the tree layouts of [`Model`](crate::model::Model) and
//! [`HybridModel`](crate::model::HybridModel). Queries never modify the model, so any number of
//! queries may run concurrently on the same model. The state kept between two consecutive
//! queries for temporal coherence lives in caches owned by the caller, one per query stream.

pub use self::picking::{picking, CullMode};
pub use self::query_settings::{ContactStatus, QueryFlags, QueryStats, SettingsError};
pub use self::query_volume::{ColliderVolume, ObbQuery, Planes, QueryVolume, MAX_PLANES};
pub use self::ray_collider::{CollisionFace, RayCache, RayCollider, RaySettings};
pub use self::tree_collider::{PairCache, TreeCollider};
pub use self::volume_collider::{
    AabbCache, AabbCollider, CapsuleCache, CapsuleCollider, ObbCache, ObbCollider, PlanesCache,
    PlanesCollider, SphereCache, SphereCollider, VolumeCache, VolumeCollider, DEFAULT_FAT_COEFF,
};

mod picking;
mod query_settings;
mod query_volume;
mod ray_collider;
mod tree_collider;
mod volume_collider;
mod volume_traversal;

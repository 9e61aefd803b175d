use super::SettingsError;
use crate::bounding_volume::{Aabb, BoundingVolume, Obb};
use crate::math::{Matrix, Point, Real, Vector, DIM};
use crate::query::details::{
    ball_contains_aabb, capsule_contains_aabb, classify_aabb_wrt_planes,
    intersection_test_aabb_ball, intersection_test_aabb_capsule, intersection_test_aabb_triangle,
    intersection_test_ball_triangle, intersection_test_capsule_triangle,
    intersection_test_planes_triangle, BoxBoxSat, PlanesAabbLocation,
};
use crate::shape::{Ball, Capsule, Plane, Triangle};
use arrayvec::ArrayVec;

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// A volume that can be tested against the nodes and primitives of a tree.
///
/// All the tests treat the volume and the boxes as closed sets.
pub trait QueryVolume {
    /// Does this volume intersect `aabb`?
    fn intersects_aabb(&self, aabb: &Aabb) -> bool;

    /// Does this volume fully contain `aabb`?
    ///
    /// Returning `false` is always correct, but prevents the early-out reporting all the
    /// primitives of a node without testing them.
    fn contains_aabb(&self, aabb: &Aabb) -> bool;

    /// Does this volume intersect `triangle`?
    fn intersects_triangle(&self, triangle: &Triangle) -> bool;
}

/// A volume passed by the user to a [`VolumeCollider`](super::VolumeCollider).
pub trait ColliderVolume: Clone {
    /// The form of this volume prepared for repeated tests.
    type Query: QueryVolume;

    /// Computes the data needed to test this volume against many nodes.
    fn prepare(&self) -> Self::Query;

    /// Can all-contacts queries with this volume reuse the result of the previous query?
    ///
    /// If `false`, temporal coherence is only supported in first-contact mode.
    const CACHES_ALL_CONTACTS: bool = true;

    /// This volume, enlarged by `fat_coeff` for temporal coherence.
    fn fattened(&self, fat_coeff: Real) -> Self;

    /// Does `self` contain `other`?
    fn contains_volume(&self, other: &Self) -> bool;
}

impl QueryVolume for Aabb {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.intersects(aabb)
    }

    #[inline]
    fn contains_aabb(&self, aabb: &Aabb) -> bool {
        self.contains(aabb)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        intersection_test_aabb_triangle(self, triangle)
    }
}

impl ColliderVolume for Aabb {
    type Query = Aabb;

    #[inline]
    fn prepare(&self) -> Aabb {
        *self
    }

    fn fattened(&self, fat_coeff: Real) -> Self {
        self.scaled_wrt_center(&Vector::repeat(fat_coeff))
    }

    fn contains_volume(&self, other: &Self) -> bool {
        self.contains(other)
    }
}

/// An oriented box prepared for repeated tests against axis-aligned boxes.
#[derive(Copy, Clone, Debug)]
pub struct ObbQuery {
    obb: Obb,
    sat: BoxBoxSat,
    /// The transpose of the box rotation, mapping world directions to box-local directions.
    inv_rot: Matrix<Real>,
    abs_inv_rot: Matrix<Real>,
}

impl ObbQuery {
    /// Prepares `obb` for repeated tests.
    pub fn new(obb: &Obb) -> Self {
        let inv_rot = obb.rotation.transpose();
        Self {
            obb: *obb,
            sat: BoxBoxSat::new(&obb.rotation),
            inv_rot,
            abs_inv_rot: inv_rot.abs(),
        }
    }

    #[inline]
    fn to_local(&self, pt: &Point<Real>) -> Point<Real> {
        (self.inv_rot * (pt - self.obb.center)).into()
    }
}

impl QueryVolume for ObbQuery {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.sat.intersects(
            &aabb.half_extents(),
            &self.obb.half_extents,
            &(self.obb.center - aabb.center()),
        )
    }

    fn contains_aabb(&self, aabb: &Aabb) -> bool {
        let local_center = self.to_local(&aabb.center());
        let local_extents = self.abs_inv_rot * aabb.half_extents();

        (0..DIM).all(|i| local_center[i].abs() + local_extents[i] <= self.obb.half_extents[i])
    }

    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        let local_tri = Triangle::new(
            self.to_local(&triangle.a),
            self.to_local(&triangle.b),
            self.to_local(&triangle.c),
        );
        let local_box = Aabb::from_half_extents(Point::origin(), self.obb.half_extents);
        intersection_test_aabb_triangle(&local_box, &local_tri)
    }
}

impl ColliderVolume for Obb {
    type Query = ObbQuery;

    #[inline]
    fn prepare(&self) -> ObbQuery {
        ObbQuery::new(self)
    }

    fn fattened(&self, fat_coeff: Real) -> Self {
        Obb::new(self.center, self.half_extents * fat_coeff, self.rotation)
    }

    fn contains_volume(&self, other: &Self) -> bool {
        self.contains_obb(other)
    }
}

impl QueryVolume for Ball {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        intersection_test_aabb_ball(aabb, self)
    }

    #[inline]
    fn contains_aabb(&self, aabb: &Aabb) -> bool {
        ball_contains_aabb(self, aabb)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        intersection_test_ball_triangle(self, triangle)
    }
}

impl ColliderVolume for Ball {
    type Query = Ball;

    #[inline]
    fn prepare(&self) -> Ball {
        *self
    }

    /// The squared radius is scaled by `fat_coeff`.
    fn fattened(&self, fat_coeff: Real) -> Self {
        Ball::new(self.center, self.radius * fat_coeff.sqrt())
    }

    fn contains_volume(&self, other: &Self) -> bool {
        na::distance(&self.center, &other.center) + other.radius <= self.radius
    }
}

impl QueryVolume for Capsule {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        intersection_test_aabb_capsule(aabb, self)
    }

    #[inline]
    fn contains_aabb(&self, aabb: &Aabb) -> bool {
        capsule_contains_aabb(self, aabb)
    }

    #[inline]
    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        intersection_test_capsule_triangle(self, triangle)
    }
}

impl ColliderVolume for Capsule {
    type Query = Capsule;

    #[inline]
    fn prepare(&self) -> Capsule {
        *self
    }

    /// The squared radius is scaled by `fat_coeff`.
    fn fattened(&self, fat_coeff: Real) -> Self {
        Capsule::new(self.segment, self.radius * fat_coeff.sqrt())
    }

    fn contains_volume(&self, other: &Self) -> bool {
        self.contains_capsule(other)
    }
}

/// The maximum number of planes of a [`Planes`] volume.
pub const MAX_PLANES: usize = 32;

/// The convex volume bounded by a set of planes.
///
/// A point is inside of the volume if its signed distance to every plane is negative or zero.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Planes {
    planes: ArrayVec<Plane, MAX_PLANES>,
}

impl Planes {
    /// The volume bounded by the given planes.
    pub fn new(planes: &[Plane]) -> Result<Self, SettingsError> {
        if planes.len() > MAX_PLANES {
            return Err(SettingsError::TooManyPlanes(MAX_PLANES));
        }

        Ok(Self {
            planes: planes.iter().copied().collect(),
        })
    }

    /// The six planes bounding an oriented box.
    pub fn from_obb(obb: &Obb) -> Self {
        Self {
            planes: obb.planes().into_iter().collect(),
        }
    }

    /// The planes bounding this volume.
    #[inline]
    pub fn planes(&self) -> &[Plane] {
        &self.planes
    }
}

impl QueryVolume for Planes {
    #[inline]
    fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        classify_aabb_wrt_planes(&self.planes, aabb) != PlanesAabbLocation::Outside
    }

    #[inline]
    fn contains_aabb(&self, aabb: &Aabb) -> bool {
        classify_aabb_wrt_planes(&self.planes, aabb) == PlanesAabbLocation::Inside
    }

    #[inline]
    fn intersects_triangle(&self, triangle: &Triangle) -> bool {
        intersection_test_planes_triangle(&self.planes, triangle)
    }
}

impl ColliderVolume for Planes {
    type Query = Planes;
    const CACHES_ALL_CONTACTS: bool = false;

    #[inline]
    fn prepare(&self) -> Planes {
        self.clone()
    }

    fn fattened(&self, _: Real) -> Self {
        self.clone()
    }

    fn contains_volume(&self, _: &Self) -> bool {
        false
    }
}

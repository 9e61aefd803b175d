//! Oriented Bounding Box.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Matrix, Point, Real, Vector, DIM};
use crate::shape::Plane;

/// An Oriented Bounding Box (OBB).
///
/// The box is the set of points `center + rotation * local` where every component of `local`
/// lies in `[-half_extents[i], half_extents[i]]`. The columns of `rotation` are the box axes
/// expressed in the frame the box lives in. `rotation` is expected to be orthonormal: scaling is
/// carried by `half_extents` only.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Copy, Clone)]
pub struct Obb {
    /// The center of the box.
    pub center: Point<Real>,
    /// The half side lengths of the box along its own axes.
    pub half_extents: Vector<Real>,
    /// The box axes, stored column-wise.
    pub rotation: Matrix<Real>,
}

impl Obb {
    /// Creates a new oriented box.
    #[inline]
    pub fn new(center: Point<Real>, half_extents: Vector<Real>, rotation: Matrix<Real>) -> Self {
        Self {
            center,
            half_extents,
            rotation,
        }
    }

    /// An oriented box covering exactly the given axis-aligned box.
    #[inline]
    pub fn from_aabb(aabb: &Aabb) -> Self {
        Self::new(aabb.center(), aabb.half_extents(), Matrix::identity())
    }

    /// Creates a box with the given half-extents placed by `pos`.
    #[inline]
    pub fn from_isometry(pos: &Isometry<Real>, half_extents: Vector<Real>) -> Self {
        Self::new(
            pos.translation.vector.into(),
            half_extents,
            pos.rotation.to_rotation_matrix().into_inner(),
        )
    }

    /// This box transformed by `m`.
    #[inline]
    pub fn transform_by(&self, m: &Isometry<Real>) -> Self {
        Self::new(
            m * self.center,
            self.half_extents,
            m.rotation.to_rotation_matrix().matrix() * self.rotation,
        )
    }

    /// Expresses `pt` in the local frame of this box.
    #[inline]
    pub fn to_local(&self, pt: &Point<Real>) -> Point<Real> {
        (self.rotation.tr_mul(&(pt - self.center))).into()
    }

    /// Does this box contain the given point?
    #[inline]
    pub fn contains_local_point(&self, pt: &Point<Real>) -> bool {
        let local = self.to_local(pt);
        (0..DIM).all(|i| local[i].abs() <= self.half_extents[i])
    }

    /// The eight vertices of this box.
    pub fn vertices(&self) -> [Point<Real>; 8] {
        Aabb::from_half_extents(Point::origin(), self.half_extents)
            .vertices()
            .map(|v| self.center + self.rotation * v.coords)
    }

    /// The tightest axis-aligned box containing this oriented box.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, self.rotation.abs() * self.half_extents)
    }

    /// The six planes bounding this box, with normals pointing outward.
    pub fn planes(&self) -> [Plane; 6] {
        let mut result = [Plane::new(Vector::x(), 0.0); 6];

        for i in 0..DIM {
            let axis: Vector<Real> = self.rotation.column(i).into_owned();
            let dist = axis.dot(&self.center.coords);
            result[i * 2] = Plane::new(axis, -(dist + self.half_extents[i]));
            result[i * 2 + 1] = Plane::new(-axis, dist - self.half_extents[i]);
        }

        result
    }

    /// Does this box fully contain `other`?
    ///
    /// Both boxes being convex, this is the case iff all the vertices of `other` are inside of
    /// `self`.
    pub fn contains_obb(&self, other: &Obb) -> bool {
        other
            .vertices()
            .iter()
            .all(|pt| self.contains_local_point(pt))
    }
}

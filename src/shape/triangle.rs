//! Definition of the triangle shape.

use crate::bounding_volume::Aabb;
use crate::math::{Isometry, Point, Real, UnitVector, Vector};

/// A triangle shape.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[repr(C)]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Triangle {
    /// The triangle first point.
    pub a: Point<Real>,
    /// The triangle second point.
    pub b: Point<Real>,
    /// The triangle third point.
    pub c: Point<Real>,
}

impl Triangle {
    /// Creates a triangle from three points.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>, c: Point<Real>) -> Triangle {
        Triangle { a, b, c }
    }

    /// The array of the three vertices of this triangle.
    #[inline]
    pub fn vertices(&self) -> [Point<Real>; 3] {
        [self.a, self.b, self.c]
    }

    /// The three edge vectors `b - a`, `c - b` and `a - c`.
    #[inline]
    pub fn edges_scaled_directions(&self) -> [Vector<Real>; 3] {
        [self.b - self.a, self.c - self.b, self.a - self.c]
    }

    /// The normal of this triangle, scaled by twice its area.
    ///
    /// It points toward the side from which the vertices are seen in counter-clockwise order.
    #[inline]
    pub fn scaled_normal(&self) -> Vector<Real> {
        let ab = self.b - self.a;
        let ac = self.c - self.a;
        ab.cross(&ac)
    }

    /// The unit normal of this triangle, or `None` if it is degenerate.
    #[inline]
    pub fn normal(&self) -> Option<UnitVector<Real>> {
        UnitVector::try_new(self.scaled_normal(), crate::math::DEFAULT_EPSILON)
    }

    /// The barycenter of this triangle.
    #[inline]
    pub fn center(&self) -> Point<Real> {
        Point::from((self.a.coords + self.b.coords + self.c.coords) / 3.0)
    }

    /// This triangle transformed by `m`.
    #[inline]
    pub fn transformed(&self, m: &Isometry<Real>) -> Self {
        Triangle::new(m * self.a, m * self.b, m * self.c)
    }

    /// The tightest AABB containing this triangle.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::new(
            self.a.inf(&self.b).inf(&self.c),
            self.a.sup(&self.b).sup(&self.c),
        )
    }

    /// Is `view_point` on the back side of this triangle?
    ///
    /// The front side is the one the [`Triangle::scaled_normal`] points to.
    #[inline]
    pub fn is_backface(&self, view_point: &Point<Real>) -> bool {
        self.scaled_normal().dot(&(view_point - self.a)) < 0.0
    }
}

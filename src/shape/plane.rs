use crate::math::{Point, Real, Vector};

/// A plane, seen as the boundary of the half-space of the points it rejects.
///
/// A point `p` is outside of the plane when `normal.dot(p) + bias > 0`. The normal does not
/// need to be normalized for inside/outside classification, but signed distances are only
/// metric if it is.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
pub struct Plane {
    /// The outward normal of the plane.
    pub normal: Vector<Real>,
    /// The plane offset: `normal.dot(p) + bias == 0` on the plane.
    pub bias: Real,
}

impl Plane {
    /// Creates a plane from its outward normal and its bias.
    #[inline]
    pub fn new(normal: Vector<Real>, bias: Real) -> Self {
        Self { normal, bias }
    }

    /// The plane with outward normal `normal` and passing through `pt`.
    #[inline]
    pub fn from_point_normal(pt: &Point<Real>, normal: Vector<Real>) -> Self {
        Self::new(normal, -normal.dot(&pt.coords))
    }

    /// The signed distance from `pt` to this plane, positive outside.
    #[inline]
    pub fn signed_distance(&self, pt: &Point<Real>) -> Real {
        self.normal.dot(&pt.coords) + self.bias
    }
}

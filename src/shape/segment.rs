use crate::math::{Point, Real, Vector};

/// A line segment, used as the axis of a [`Capsule`](super::Capsule) and as a triangle edge by
/// the distance queries.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Segment {
    /// The start point.
    pub a: Point<Real>,
    /// The end point.
    pub b: Point<Real>,
}

impl Segment {
    /// Creates the segment from `a` to `b`.
    #[inline]
    pub fn new(a: Point<Real>, b: Point<Real>) -> Segment {
        Segment { a, b }
    }

    /// `b - a`.
    #[inline]
    pub fn scaled_direction(&self) -> Vector<Real> {
        self.b - self.a
    }

    /// The point at the parameter `t`: `a` for `t = 0`, `b` for `t = 1`.
    #[inline]
    pub fn point_at(&self, t: Real) -> Point<Real> {
        self.a + self.scaled_direction() * t
    }
}

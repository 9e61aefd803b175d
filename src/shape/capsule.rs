use crate::math::Real;
use crate::query::details::closest_points_segment_point;
use crate::shape::Segment;

/// A capsule (or line-swept sphere) shape: all the points within `radius` of `segment`.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Capsule {
    /// The axis of the capsule.
    pub segment: Segment,
    /// The radius of the capsule.
    pub radius: Real,
}

impl Capsule {
    /// Creates a new capsule around the given segment.
    pub fn new(segment: Segment, radius: Real) -> Self {
        Self { segment, radius }
    }

    /// Does this capsule fully contain `other`?
    ///
    /// A capsule is the convex hull of the two balls centered at its endpoints. Hence `other` is
    /// contained iff both of its end balls are.
    pub fn contains_capsule(&self, other: &Capsule) -> bool {
        [other.segment.a, other.segment.b].iter().all(|pt| {
            let proj = closest_points_segment_point(&self.segment, pt);
            na::distance(&proj, pt) + other.radius <= self.radius
        })
    }
}

use crate::math::{Point, Real};
use crate::shape::Segment;

/// The point of `segment` closest to `pt`.
#[inline]
pub fn closest_points_segment_point(segment: &Segment, pt: &Point<Real>) -> Point<Real> {
    let ab = segment.scaled_direction();
    let sqnab = ab.norm_squared();

    if sqnab == 0.0 {
        return segment.a;
    }

    let t = na::clamp(ab.dot(&(pt - segment.a)) / sqnab, 0.0, 1.0);
    segment.point_at(t)
}

/// The squared distance between a segment and a point.
#[inline]
pub fn distance_squared_segment_point(segment: &Segment, pt: &Point<Real>) -> Real {
    na::distance_squared(&closest_points_segment_point(segment, pt), pt)
}

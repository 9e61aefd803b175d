use super::{distance_squared_segment_segment, distance_squared_triangle_point};
use crate::bounding_volume::Aabb;
use crate::math::{Point, Real};
use crate::query::{cast_ray_on_triangle, intersection_test_ray_aabb, Ray};
use crate::shape::{Segment, Triangle};

/// The squared distance between a point and a (solid) AABB.
#[inline]
pub fn distance_squared_aabb_point(aabb: &Aabb, pt: &Point<Real>) -> Real {
    let proj = pt.sup(&aabb.mins).inf(&aabb.maxs);
    na::distance_squared(&proj, pt)
}

/// The squared distance between a segment and a (solid) AABB.
///
/// The closest features of two disjoint convex polytopes always include a vertex of one of
/// them or a pair of edges. So unless the segment crosses the box, the distance is reached
/// either at one segment endpoint or between the segment and one of the twelve box edges.
pub fn distance_squared_aabb_segment(aabb: &Aabb, segment: &Segment) -> Real {
    let ray = Ray::new(segment.a, segment.scaled_direction());
    if intersection_test_ray_aabb(&ray, 1.0, aabb) {
        return 0.0;
    }

    let mut best = distance_squared_aabb_point(aabb, &segment.a)
        .min(distance_squared_aabb_point(aabb, &segment.b));

    let vertices = aabb.vertices();
    for (i, j) in AABB_EDGES_VERTEX_IDS {
        let edge = Segment::new(vertices[i], vertices[j]);
        best = best.min(distance_squared_segment_segment(segment, &edge));
    }

    best
}

/// The squared distance between a segment and a (solid) triangle.
pub fn distance_squared_triangle_segment(triangle: &Triangle, segment: &Segment) -> Real {
    let ray = Ray::new(segment.a, segment.scaled_direction());
    if cast_ray_on_triangle(triangle, &ray, 1.0, false).is_some() {
        return 0.0;
    }

    let mut best = distance_squared_triangle_point(triangle, &segment.a)
        .min(distance_squared_triangle_point(triangle, &segment.b));

    let vertices = triangle.vertices();
    for i in 0..3 {
        let edge = Segment::new(vertices[i], vertices[(i + 1) % 3]);
        best = best.min(distance_squared_segment_segment(segment, &edge));
    }

    best
}

const AABB_EDGES_VERTEX_IDS: [(usize, usize); 12] = [
    (0, 1),
    (1, 2),
    (3, 2),
    (0, 3),
    (4, 5),
    (5, 6),
    (7, 6),
    (4, 7),
    (0, 4),
    (1, 5),
    (2, 6),
    (3, 7),
];

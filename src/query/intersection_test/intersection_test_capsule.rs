use crate::bounding_volume::Aabb;
use crate::query::details::{
    closest_points_segment_point, distance_squared_aabb_segment,
    distance_squared_triangle_segment,
};
use crate::shape::{Capsule, Triangle};

/// Tests if a capsule intersects an AABB.
#[inline]
pub fn intersection_test_aabb_capsule(aabb: &Aabb, capsule: &Capsule) -> bool {
    distance_squared_aabb_segment(aabb, &capsule.segment) <= capsule.radius * capsule.radius
}

/// Does the capsule fully contain the AABB?
///
/// This is the case iff all the box corners are within `radius` of the capsule axis.
pub fn capsule_contains_aabb(capsule: &Capsule, aabb: &Aabb) -> bool {
    let sq_radius = capsule.radius * capsule.radius;
    aabb.vertices().iter().all(|v| {
        let proj = closest_points_segment_point(&capsule.segment, v);
        na::distance_squared(&proj, v) <= sq_radius
    })
}

/// Tests if a capsule intersects a triangle.
#[inline]
pub fn intersection_test_capsule_triangle(capsule: &Capsule, triangle: &Triangle) -> bool {
    distance_squared_triangle_segment(triangle, &capsule.segment) <= capsule.radius * capsule.radius
}

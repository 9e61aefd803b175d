use crate::bounding_volume::Aabb;
use crate::query::details::{distance_squared_aabb_point, distance_squared_triangle_point};
use crate::shape::{Ball, Triangle};

/// Tests if a ball intersects an AABB.
#[inline]
pub fn intersection_test_aabb_ball(aabb: &Aabb, ball: &Ball) -> bool {
    distance_squared_aabb_point(aabb, &ball.center) <= ball.radius * ball.radius
}

/// Does the ball fully contain the AABB?
///
/// The ball being convex, this is the case iff all the box corners are strictly inside of it.
#[inline]
pub fn ball_contains_aabb(ball: &Ball, aabb: &Aabb) -> bool {
    let sq_radius = ball.radius * ball.radius;
    aabb.vertices()
        .iter()
        .all(|v| na::distance_squared(v, &ball.center) < sq_radius)
}

/// Tests if a ball intersects a triangle.
#[inline]
pub fn intersection_test_ball_triangle(ball: &Ball, triangle: &Triangle) -> bool {
    distance_squared_triangle_point(triangle, &ball.center) <= ball.radius * ball.radius
}

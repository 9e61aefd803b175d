//! Non-persistent geometric queries.
//!
//! The functions exported by the `details` submodule are the primitive tests run by the
//! colliders: closest points, squared distances and boolean intersection tests between
//! segments, triangles, boxes, balls, capsules and plane sets. They have the form
//! `[operation]_[shape1]_[shape2]()`.

pub use self::ray::{
    cast_ray_on_triangle, intersection_test_ray_aabb, local_ray_intersection_with_triangle, Ray,
    RayAabbTest, RayTriangleHit,
};

pub mod closest_points;
pub mod intersection_test;
mod ray;

/// Queries dedicated to specific pairs of shapes.
pub mod details {
    pub use super::closest_points::*;
    pub use super::intersection_test::*;
}

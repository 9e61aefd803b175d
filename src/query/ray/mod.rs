//! Ray-casting related definitions and implementations.

#[doc(inline)]
pub use self::ray::Ray;
pub use self::ray_aabb::{intersection_test_ray_aabb, RayAabbTest};
pub use self::ray_triangle::{
    cast_ray_on_triangle, local_ray_intersection_with_triangle, RayTriangleHit,
};

#[doc(hidden)]
pub mod ray;
mod ray_aabb;
mod ray_triangle;

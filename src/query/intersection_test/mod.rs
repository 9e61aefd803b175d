//! Boolean intersection tests between query volumes, tree nodes and triangles.

pub use self::intersection_test_aabb_triangle::intersection_test_aabb_triangle;
pub use self::intersection_test_ball::{
    ball_contains_aabb, intersection_test_aabb_ball, intersection_test_ball_triangle,
};
pub use self::intersection_test_capsule::{
    capsule_contains_aabb, intersection_test_aabb_capsule, intersection_test_capsule_triangle,
};
pub use self::intersection_test_obb_obb::{intersection_test_aabb_obb, BoxBoxSat, BOX_BOX_SAT_EPSILON};
pub use self::intersection_test_planes::{
    classify_aabb_wrt_planes, intersection_test_planes_triangle, PlanesAabbLocation,
};
pub use self::intersection_test_triangle_triangle::intersection_test_triangle_triangle;

mod intersection_test_aabb_triangle;
mod intersection_test_ball;
mod intersection_test_capsule;
mod intersection_test_obb_obb;
mod intersection_test_planes;
mod intersection_test_triangle_triangle;

//! Closest points and distances between the segments, triangles, points and boxes involved in
//! primitive tests.

pub use self::closest_points_segment_point::{
    closest_points_segment_point, distance_squared_segment_point,
};
pub use self::closest_points_segment_segment::{
    closest_points_segment_segment_parameters, distance_squared_segment_segment,
};
pub use self::closest_points_triangle_point::{
    closest_points_triangle_point, distance_squared_triangle_point,
};
pub use self::distance_segment_shape::{
    distance_squared_aabb_point, distance_squared_aabb_segment,
    distance_squared_triangle_segment,
};

mod closest_points_segment_point;
mod closest_points_segment_segment;
mod closest_points_triangle_point;
mod distance_segment_shape;

#[macro_use]
extern crate approx;
extern crate nalgebra as na;

mod box_pruning;
mod hybrid_model;
mod model_refit;
mod quantized_tree;
mod radix_sort;
mod ray_scenarios;
mod tree_tree;
mod volume_scenarios;

use na::{Point3, Vector3};
use optree3d::shape::Triangle;

/// Random triangles of size up to `size`, in a cube of side `extent` centered at the origin.
pub fn random_triangles(seed: u64, len: usize, extent: f32, size: f32) -> Vec<Triangle> {
    let mut rng = oorandom::Rand32::new(seed);
    let mut rand_vector = |scale: f32| {
        Vector3::new(
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
        ) * scale
    };

    (0..len)
        .map(|_| {
            let base = Point3::from(rand_vector(extent));
            Triangle::new(base, base + rand_vector(size), base + rand_vector(size))
        })
        .collect()
}

pub fn sorted<T: Ord>(mut values: Vec<T>) -> Vec<T> {
    values.sort_unstable();
    values
}

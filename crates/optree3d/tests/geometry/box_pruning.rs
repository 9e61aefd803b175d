use crate::sorted;
use na::{Point3, Vector3};
use optree3d::bounding_volume::Aabb;
use optree3d::partitioning::{
    bipartite_box_pruning, brute_force_bipartite_box_pruning, brute_force_complete_box_pruning,
    complete_box_pruning, Axes, BoxPruning,
};
use rand::{Rng, SeedableRng};
use rand_isaac::IsaacRng;

fn random_aabbs(rng: &mut IsaacRng, len: usize) -> Vec<Aabb> {
    (0..len)
        .map(|_| {
            let center = Point3::new(
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-100.0..100.0),
                rng.gen_range(-20.0..20.0),
            );
            let half_extents = Vector3::new(
                rng.gen_range(0.0..6.0),
                rng.gen_range(0.0..6.0),
                rng.gen_range(0.0..6.0),
            );
            Aabb::from_half_extents(center, half_extents)
        })
        .collect()
}

/// Orders the indices of each pair of a complete pruning.
fn normalized(pairs: Vec<(u32, u32)>) -> Vec<(u32, u32)> {
    sorted(pairs.into_iter().map(|(a, b)| (a.min(b), a.max(b))).collect())
}

#[test]
fn complete_pruning_agrees_with_brute_force_on_every_axis_order() {
    let mut rng = IsaacRng::seed_from_u64(10);
    let aabbs = random_aabbs(&mut rng, 800);
    let expected = normalized(brute_force_complete_box_pruning(&aabbs));
    assert!(!expected.is_empty());

    for axes in [Axes::new(0, 1, 2), Axes::new(1, 2, 0), Axes::new(2, 0, 1)] {
        assert_eq!(normalized(complete_box_pruning(&aabbs, axes)), expected);
    }
}

#[test]
fn bipartite_pruning_agrees_with_brute_force() {
    let mut rng = IsaacRng::seed_from_u64(11);
    let aabbs0 = random_aabbs(&mut rng, 500);
    let aabbs1 = random_aabbs(&mut rng, 300);
    let expected = sorted(brute_force_bipartite_box_pruning(&aabbs0, &aabbs1));
    assert!(!expected.is_empty());

    for axes in [Axes::new(0, 1, 2), Axes::new(2, 1, 0)] {
        assert_eq!(sorted(bipartite_box_pruning(&aabbs0, &aabbs1, axes)), expected);
    }
}

#[test]
fn persistent_pruning_over_moving_boxes() {
    let mut rng = IsaacRng::seed_from_u64(12);
    let mut aabbs = random_aabbs(&mut rng, 400);
    let mut pruning = BoxPruning::new();

    for _ in 0..5 {
        let shift = Vector3::new(rng.gen_range(-0.5..0.5), 0.0, rng.gen_range(-0.5..0.5));
        for aabb in &mut aabbs {
            aabb.mins += shift;
            aabb.maxs += shift;
        }

        let expected = normalized(brute_force_complete_box_pruning(&aabbs));
        assert_eq!(normalized(pruning.complete(&aabbs, Axes::default())), expected);
    }
}

#[test]
fn empty_sets_have_no_pairs() {
    let mut rng = IsaacRng::seed_from_u64(13);
    let aabbs = random_aabbs(&mut rng, 10);
    assert!(complete_box_pruning(&[], Axes::default()).is_empty());
    assert!(bipartite_box_pruning(&aabbs, &[], Axes::default()).is_empty());
    assert!(bipartite_box_pruning(&[], &aabbs, Axes::default()).is_empty());
}

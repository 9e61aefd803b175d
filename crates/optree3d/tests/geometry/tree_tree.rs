use crate::{random_triangles, sorted};
use na::{Isometry3, Vector3};
use optree3d::collision::{PairCache, QueryFlags, TreeCollider};
use optree3d::model::{Model, ModelSettings};
use optree3d::query::details::intersection_test_triangle_triangle;
use optree3d::shape::Triangle;

fn brute_force(
    pos0: &Isometry3<f32>,
    mesh0: &[Triangle],
    pos1: &Isometry3<f32>,
    mesh1: &[Triangle],
) -> Vec<(u32, u32)> {
    let rel = pos0.inv_mul(pos1);
    let mut pairs = Vec::new();
    for (i, tri0) in mesh0.iter().enumerate() {
        for (j, tri1) in mesh1.iter().enumerate() {
            if intersection_test_triangle_triangle(tri0, &tri1.transformed(&rel)) {
                pairs.push((i as u32, j as u32));
            }
        }
    }
    pairs
}

#[test]
fn tree_tree_queries_agree_with_brute_force() {
    let mesh0 = random_triangles(20, 400, 20.0, 4.0);
    let mesh1 = random_triangles(21, 300, 20.0, 4.0);
    let collider = TreeCollider::default();

    let layouts = [
        ModelSettings::default(),
        ModelSettings::default().with_quantized(false),
        ModelSettings::default().with_no_leaf(false),
    ];

    let mut rng = oorandom::Rand32::new(22);
    let mut rand_vector = |scale: f32| {
        Vector3::new(
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
        ) * scale
    };

    for settings in layouts {
        let model0 = Model::build(&mesh0, &settings).unwrap();
        let model1 = Model::build(&mesh1, &settings).unwrap();

        for _ in 0..5 {
            let pos0 = Isometry3::new(rand_vector(5.0), rand_vector(3.0));
            let pos1 = Isometry3::new(rand_vector(5.0), rand_vector(3.0));
            let expected = brute_force(&pos0, &mesh0, &pos1, &mesh1);

            let mut pairs = Vec::new();
            let stats = collider.collide(
                &mut PairCache::default(),
                &pos0,
                &model0,
                &mesh0,
                &pos1,
                &model1,
                &mesh1,
                &mut pairs,
            );
            assert_eq!(stats.contact(), !expected.is_empty());
            assert!((stats.nb_prim_tests as usize) < mesh0.len() * mesh1.len());
            assert_eq!(sorted(pairs), sorted(expected));
        }
    }
}

#[test]
fn first_contact_tree_tree_query_with_coherence() {
    let mesh0 = random_triangles(23, 200, 10.0, 3.0);
    let mesh1 = random_triangles(24, 200, 10.0, 3.0);
    let model0 = Model::build(&mesh0, &ModelSettings::default()).unwrap();
    let model1 = Model::build(&mesh1, &ModelSettings::default()).unwrap();
    let collider =
        TreeCollider::new(QueryFlags::FIRST_CONTACT | QueryFlags::TEMPORAL_COHERENCE).unwrap();
    let mut cache = PairCache::default();
    let mut pairs = Vec::new();

    let pos0 = Isometry3::identity();
    let pos1 = Isometry3::translation(0.5, 0.0, 0.0);
    let all = brute_force(&pos0, &mesh0, &pos1, &mesh1);
    assert!(!all.is_empty());

    let stats = collider.collide(
        &mut cache, &pos0, &model0, &mesh0, &pos1, &model1, &mesh1, &mut pairs,
    );
    assert!(stats.contact());
    assert_eq!(pairs.len(), 1);
    assert!(all.contains(&pairs[0]));
    assert_eq!(cache.pair, Some(pairs[0]));

    let stats = collider.collide(
        &mut cache, &pos0, &model0, &mesh0, &pos1, &model1, &mesh1, &mut pairs,
    );
    assert!(stats.temporal_contact());
    assert_eq!(stats.nb_prim_tests, 1);
    assert_eq!(stats.nb_bv_tests, 0);

    // Far apart: no contact, and the cache is cleared.
    let far = Isometry3::translation(1000.0, 0.0, 0.0);
    let stats = collider.collide(
        &mut cache, &pos0, &model0, &mesh0, &far, &model1, &mesh1, &mut pairs,
    );
    assert!(!stats.contact());
    assert!(pairs.is_empty());
    assert_eq!(cache.pair, None);
}

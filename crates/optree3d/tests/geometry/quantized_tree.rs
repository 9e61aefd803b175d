use crate::{random_triangles, sorted};
use na::{Point3, Vector3};
use optree3d::bounding_volume::Aabb;
use optree3d::collision::{AabbCache, AabbCollider, RayCache, RayCollider, RaySettings};
use optree3d::model::{Model, ModelSettings, ModelTree};
use optree3d::partitioning::OptimizedTree;
use optree3d::query::Ray;

fn assert_contains(outer: &Aabb, inner: &Aabb) {
    let eps = 1.0e-4 * (1.0 + inner.half_extents().amax());
    for i in 0..3 {
        assert!(outer.mins[i] <= inner.mins[i] + eps, "{:?} !⊇ {:?}", outer, inner);
        assert!(outer.maxs[i] >= inner.maxs[i] - eps, "{:?} !⊇ {:?}", outer, inner);
    }
}

#[test]
fn quantized_boxes_enclose_full_precision_boxes() {
    let mesh = random_triangles(6, 1500, 200.0, 5.0);

    for no_leaf in [false, true] {
        let settings = ModelSettings::default().with_no_leaf(no_leaf);
        let full = Model::build(&mesh, &settings.with_quantized(false)).unwrap();
        let quantized = Model::build(&mesh, &settings.with_quantized(true)).unwrap();
        assert_eq!(full.num_nodes(), quantized.num_nodes());

        match (full.tree().unwrap(), quantized.tree().unwrap()) {
            (ModelTree::Collision(full), ModelTree::Quantized(quantized)) => {
                assert!(!no_leaf);
                for id in 0..full.num_nodes() {
                    assert_contains(&quantized.node_aabb(id), &full.node_aabb(id));
                    assert_eq!(quantized.node_content(id), full.node_content(id));
                }
            }
            (ModelTree::NoLeaf(full), ModelTree::QuantizedNoLeaf(quantized)) => {
                assert!(no_leaf);
                for id in 0..full.num_nodes() {
                    assert_contains(&quantized.node_aabb(id), &full.node_aabb(id));
                    assert_eq!(quantized.node_content(id), full.node_content(id));
                }
            }
            _ => panic!("Unexpected tree layouts."),
        }
    }
}

#[test]
fn quantized_models_find_the_same_triangles() {
    let mesh = random_triangles(7, 1500, 200.0, 5.0);
    let full = Model::build(&mesh, &ModelSettings::default().with_quantized(false)).unwrap();
    let quantized = Model::build(&mesh, &ModelSettings::default()).unwrap();
    assert!(quantized.tree().unwrap().is_quantized());

    let mut rng = oorandom::Rand32::new(8);
    let mut rand_point = || {
        Point3::new(
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
        ) * 200.0
    };

    for _ in 0..40 {
        let aabb = Aabb::from_half_extents(rand_point(), Vector3::new(10.0, 20.0, 5.0));
        let (mut a, mut b) = (AabbCache::new(), AabbCache::new());
        let _ = AabbCollider::default().collide(&mut a, &aabb, &full, &mesh);
        let _ = AabbCollider::default().collide(&mut b, &aabb, &quantized, &mesh);
        assert_eq!(sorted(a.touched), sorted(b.touched));

        let origin = rand_point();
        let ray = Ray::new(origin, (rand_point() - origin).normalize());
        let collider = RayCollider::new(RaySettings::in_out_test()).unwrap();
        let (mut a, mut b) = (Vec::new(), Vec::new());
        let _ = collider.collide(&mut RayCache::default(), &ray, &full, &mesh, &mut a);
        let _ = collider.collide(&mut RayCache::default(), &ray, &quantized, &mesh, &mut b);
        assert_eq!(
            sorted(a.iter().map(|f| f.face_id).collect()),
            sorted(b.iter().map(|f| f.face_id).collect())
        );
    }
}

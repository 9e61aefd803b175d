use crate::{random_triangles, sorted};
use na::{Point3, Vector3};
use optree3d::bounding_volume::Aabb;
use optree3d::collision::{
    CapsuleCache, CapsuleCollider, RayCache, RayCollider, RaySettings, SphereCache,
    SphereCollider,
};
use optree3d::model::{HybridModel, Model, ModelSettings};
use optree3d::partitioning::AabbTree;
use optree3d::query::Ray;
use optree3d::shape::{Ball, Capsule, Segment, Triangle};

#[test]
fn hybrid_models_answer_like_plain_models() {
    let mesh = random_triangles(1, 2000, 60.0, 3.0);
    let settings = ModelSettings::default();
    let model = Model::build(&mesh, &settings).unwrap();
    let hybrid = HybridModel::build(&mesh, &settings).unwrap();
    assert!(hybrid.leaf_triangles().len() < mesh.len() / 2);

    let mut rng = oorandom::Rand32::new(2);
    let mut rand_point = || {
        Point3::new(
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
            rng.rand_float() - 0.5,
        ) * 60.0
    };

    for _ in 0..50 {
        let center = rand_point();
        let other = rand_point();

        let ball = Ball::new(center, 5.0);
        let (mut plain_cache, mut hybrid_cache) = (SphereCache::new(), SphereCache::new());
        let _ = SphereCollider::default().collide(&mut plain_cache, &ball, &model, &mesh);
        let _ = SphereCollider::default().collide_hybrid(&mut hybrid_cache, &ball, &hybrid, &mesh);
        assert_eq!(sorted(plain_cache.touched), sorted(hybrid_cache.touched));

        let capsule = Capsule::new(Segment::new(center, other), 1.0);
        let (mut plain_cache, mut hybrid_cache) = (CapsuleCache::new(), CapsuleCache::new());
        let _ = CapsuleCollider::default().collide(&mut plain_cache, &capsule, &model, &mesh);
        let _ =
            CapsuleCollider::default().collide_hybrid(&mut hybrid_cache, &capsule, &hybrid, &mesh);
        assert_eq!(sorted(plain_cache.touched), sorted(hybrid_cache.touched));

        let ray = Ray::new(center, (other - center).normalize());
        let collider = RayCollider::new(RaySettings::in_out_test()).unwrap();
        let (mut plain_faces, mut hybrid_faces) = (Vec::new(), Vec::new());
        let _ = collider.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut plain_faces);
        let _ = collider.collide_hybrid(
            &mut RayCache::default(),
            &ray,
            &hybrid,
            &mesh,
            &mut hybrid_faces,
        );
        assert_eq!(
            sorted(plain_faces.iter().map(|f| f.face_id).collect()),
            sorted(hybrid_faces.iter().map(|f| f.face_id).collect())
        );
    }
}

#[test]
fn hybrid_refit_matches_a_fresh_build() {
    let mut mesh = random_triangles(3, 500, 40.0, 3.0);
    let settings = ModelSettings::default().with_quantized(false);
    let mut hybrid = HybridModel::build(&mesh, &settings).unwrap();

    for (i, tri) in mesh.iter_mut().enumerate() {
        let offset = Vector3::new(0.0, (i % 7) as f32, -((i % 3) as f32));
        tri.a += offset;
        tri.b += offset;
        tri.c += offset * 0.5;
    }

    hybrid.refit(&mesh).unwrap();
    let fresh = Model::build(&mesh, &settings).unwrap();

    let aabbs = [
        Aabb::from_half_extents(Point3::origin(), Vector3::repeat(8.0)),
        Aabb::from_half_extents(Point3::new(10.0, 5.0, -3.0), Vector3::new(4.0, 9.0, 2.0)),
    ];
    for aabb in aabbs {
        let ball = Ball::new(aabb.center(), aabb.half_extents().norm());
        let (mut refitted, mut rebuilt) = (SphereCache::new(), SphereCache::new());
        let _ = SphereCollider::default().collide_hybrid(&mut refitted, &ball, &hybrid, &mesh);
        let _ = SphereCollider::default().collide(&mut rebuilt, &ball, &fresh, &mesh);
        assert!(!rebuilt.touched.is_empty());
        assert_eq!(sorted(refitted.touched), sorted(rebuilt.touched));
    }
}

#[test]
fn hybrid_leaves_cover_every_triangle() {
    let mesh = random_triangles(25, 1000, 50.0, 2.0);
    let hybrid = HybridModel::build(&mesh, &ModelSettings::default()).unwrap();

    let mut seen = vec![0; mesh.len()];
    for leaf in hybrid.leaf_triangles() {
        assert!(leaf.count >= 1 && leaf.count <= 16);
        for tri in &hybrid.indices()[leaf.range()] {
            seen[*tri as usize] += 1;
        }
    }
    assert!(seen.into_iter().all(|n| n == 1));
}

#[test]
fn coincident_triangles_are_split_into_small_clusters() {
    let tri = Triangle::new(
        Point3::new(0.0, 0.0, 0.0),
        Point3::new(1.0, 0.0, 0.0),
        Point3::new(0.0, 1.0, 0.0),
    );
    let far = Triangle::new(
        Point3::new(100.0, 100.0, 100.0),
        Point3::new(101.0, 100.0, 100.0),
        Point3::new(100.0, 101.0, 100.0),
    );
    let mut mesh = vec![tri; 100];
    mesh.push(far);

    let settings = ModelSettings::default().with_keep_original(true);
    let hybrid = HybridModel::build(&mesh, &settings).unwrap();
    assert!(hybrid.source_tree().unwrap().invalid_splits() > 0);

    let mut seen = vec![0; mesh.len()];
    for leaf in hybrid.leaf_triangles() {
        assert!(leaf.count >= 1 && leaf.count <= 16);
        for tri in &hybrid.indices()[leaf.range()] {
            seen[*tri as usize] += 1;
        }
    }
    assert!(seen.into_iter().all(|n| n == 1));

    let ball = Ball::new(Point3::new(0.25, 0.25, 0.0), 0.1);
    let mut cache = SphereCache::new();
    let _ = SphereCollider::default().collide_hybrid(&mut cache, &ball, &hybrid, &mesh);
    assert_eq!(sorted(cache.touched), (0..100).collect::<Vec<u32>>());
}

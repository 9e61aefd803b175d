use crate::sorted;
use na::{Point3, Rotation3, Vector3};
use optree3d::bounding_volume::{Aabb, Obb};
use optree3d::collision::{
    AabbCache, AabbCollider, ObbCache, ObbCollider, Planes, PlanesCache, PlanesCollider,
    QueryFlags, SphereCache, SphereCollider,
};
use optree3d::model::{Model, ModelSettings};
use optree3d::partitioning::{AabbTree, ArenaTree, BuildSettings, SplitRule, TriangleSource};
use optree3d::shape::{Ball, Plane, Triangle};

fn square_and_far_triangle() -> Vec<Triangle> {
    let p = |x: f32, y: f32, z: f32| Point3::new(x, y, z);
    vec![
        Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 1.0, 0.0)),
        Triangle::new(p(0.0, 0.0, 0.0), p(1.0, 1.0, 0.0), p(0.0, 1.0, 0.0)),
        Triangle::new(p(50.0, 50.0, 50.0), p(51.0, 50.0, 50.0), p(50.0, 51.0, 50.0)),
    ]
}

#[test]
fn box_query_returns_the_square_only() {
    let mesh = square_and_far_triangle();
    let aabb = Aabb::new(Point3::new(-0.5, -0.5, -0.5), Point3::new(1.5, 1.5, 0.5));

    for no_leaf in [false, true] {
        for quantized in [false, true] {
            let settings = ModelSettings::default()
                .with_no_leaf(no_leaf)
                .with_quantized(quantized);
            let model = Model::build(&mesh, &settings).unwrap();
            let mut cache = AabbCache::new();

            let stats = AabbCollider::default().collide(&mut cache, &aabb, &model, &mesh);
            assert!(stats.contact());
            assert_eq!(sorted(cache.touched.clone()), vec![0, 1]);
        }
    }
}

#[test]
fn touching_volumes_overlap() {
    let mesh = square_and_far_triangle();
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let mut cache = AabbCache::new();

    // Zero-distance separation with the square.
    let aabb = Aabb::new(Point3::new(1.0, 0.0, -1.0), Point3::new(2.0, 1.0, 1.0));
    let _ = AabbCollider::default().collide(&mut cache, &aabb, &model, &mesh);
    assert_eq!(sorted(cache.touched.clone()), vec![0, 1]);
}

#[test]
fn rotated_box_reaches_what_the_axis_aligned_box_misses() {
    // A diagonal row of small triangles along the line x = y.
    let mesh: Vec<_> = (0..20)
        .map(|i| {
            let base = Point3::new(i as f32, i as f32, 0.0) * 0.5;
            Triangle::new(
                base,
                base + Vector3::new(0.05, 0.0, 0.0),
                base + Vector3::new(0.0, 0.05, 0.0),
            )
        })
        .collect();
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();

    // A long thin box around the diagonal, rotated by 45 degrees around z.
    let center = Point3::new(4.75, 4.75, 0.0);
    let half_extents = Vector3::new(7.0, 0.3, 0.3);
    let rotation = Rotation3::from_axis_angle(&Vector3::z_axis(), std::f32::consts::FRAC_PI_4);
    let obb = Obb::new(center, half_extents, rotation.into_inner());

    let mut obb_cache = ObbCache::new();
    let _ = ObbCollider::default().collide(&mut obb_cache, &obb, &model, &mesh);
    assert_eq!(sorted(obb_cache.touched.clone()), (0..20).collect::<Vec<_>>());

    // The same box without its rotation misses the ends of the row.
    let mut aabb_cache = AabbCache::new();
    let aabb = Aabb::from_half_extents(center, half_extents);
    let _ = AabbCollider::default().collide(&mut aabb_cache, &aabb, &model, &mesh);
    assert!(aabb_cache.touched.len() < 20);

    // And the rotated box does not reach triangles off the diagonal.
    let off_diagonal = Triangle::new(
        Point3::new(8.0, 1.0, 0.0),
        Point3::new(8.1, 1.0, 0.0),
        Point3::new(8.0, 1.1, 0.0),
    );
    let mut mesh = mesh;
    mesh.push(off_diagonal);
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let flags = QueryFlags::empty();
    let _ = ObbCollider::new(flags)
        .unwrap()
        .collide(&mut obb_cache, &obb, &model, &mesh);
    assert!(!obb_cache.touched.contains(&20));
}

#[test]
fn coincident_triangles_still_build_a_complete_tree() {
    let p = Point3::new(1.0, 2.0, 3.0);
    let mesh = vec![Triangle::new(p, p, p); 1000];
    let source = TriangleSource::new(&mesh[..]);

    for rule in [
        SplitRule::LargestAxis,
        SplitRule::SplatterPoints,
        SplitRule::BestAxis,
        SplitRule::Balanced,
    ] {
        let tree = ArenaTree::new(&source, BuildSettings::default().with_rule(rule)).unwrap();
        assert_eq!(tree.node_count(), 1999);
        assert!(tree.invalid_splits() > 0);
        tree.assert_well_formed(&source);
    }

    let model = Model::build(&mesh, &ModelSettings::default().with_keep_original(true)).unwrap();
    assert!(model.source_tree().unwrap().invalid_splits() > 0);

    let mut cache = AabbCache::new();
    let aabb = Aabb::from_half_extents(p, Vector3::repeat(0.1));
    let _ = AabbCollider::default().collide(&mut cache, &aabb, &model, &mesh);
    assert_eq!(cache.touched.len(), 1000);
}

#[test]
fn half_space_keeps_the_triangles_on_its_inner_side() {
    let mesh = crate::random_triangles(30, 600, 40.0, 2.0);
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();

    // x <= 3 and y >= -5.
    let planes = Planes::new(&[
        Plane::from_point_normal(&Point3::new(3.0, 0.0, 0.0), Vector3::x()),
        Plane::from_point_normal(&Point3::new(0.0, -5.0, 0.0), -Vector3::y()),
    ])
    .unwrap();
    let mut cache = PlanesCache::new();
    let _ = PlanesCollider::default().collide(&mut cache, &planes, &model, &mesh);

    let found = sorted(cache.touched_primitives().to_vec());

    for (i, tri) in mesh.iter().enumerate() {
        let vertices = tri.vertices();
        let is_found = found.binary_search(&(i as u32)).is_ok();

        // A vertex inside of both half-spaces.
        if vertices.iter().any(|v| v.x <= 3.0 && v.y >= -5.0) {
            assert!(is_found);
        }
        // Fully outside of one of them.
        if vertices.iter().all(|v| v.x > 3.0) || vertices.iter().all(|v| v.y < -5.0) {
            assert!(!is_found);
        }
    }
    assert!(!found.is_empty());
}

#[test]
fn larger_fat_coefficient_absorbs_larger_moves() {
    let mesh = crate::random_triangles(31, 800, 40.0, 2.0);
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let collider = SphereCollider::new(QueryFlags::TEMPORAL_COHERENCE).unwrap();
    let mut tight = SphereCache::new();
    let mut loose = SphereCache::with_fat_coeff(4.0);

    let ball = Ball::new(Point3::origin(), 5.0);
    let _ = collider.collide(&mut tight, &ball, &model, &mesh);
    let _ = collider.collide(&mut loose, &ball, &model, &mesh);
    // The loose cache holds the triangles touching a ball of twice the radius.
    assert!(loose.touched_primitives().len() >= tight.touched_primitives().len());

    let moved = Ball::new(Point3::new(1.5, 0.0, 0.0), 5.0);
    let tight_stats = collider.collide(&mut tight, &moved, &model, &mesh);
    let loose_stats = collider.collide(&mut loose, &moved, &model, &mesh);
    assert!(tight_stats.nb_bv_tests > 0);
    assert_eq!(loose_stats.nb_bv_tests, 0);
}

use na::{Isometry3, Point3, Vector3};
use optree3d::collision::{
    ContactStatus, QueryFlags, RayCache, RayCollider, RaySettings,
};
use optree3d::model::{HybridModel, Model, ModelSettings};
use optree3d::query::Ray;
use optree3d::shape::Triangle;

/// A triangle in the plane `x = x0`, crossing the x axis, facing -x.
fn wall(x0: f32) -> Triangle {
    Triangle::new(
        Point3::new(x0, -1.0, -1.0),
        Point3::new(x0, -1.0, 2.0),
        Point3::new(x0, 2.0, -1.0),
    )
}

#[test]
fn first_contact_ray_through_a_single_triangle() {
    let mesh = vec![wall(5.0)];
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let ray = Ray::new(Point3::origin(), Vector3::x());
    let collider =
        RayCollider::new(RaySettings::default().with_flags(QueryFlags::FIRST_CONTACT)).unwrap();
    let mut faces = Vec::new();

    let stats = collider.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert!(stats.contact());
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_id, 0);
    assert_relative_eq!(faces[0].distance, 5.0);
}

#[test]
fn closest_hit_keeps_the_nearest_of_colinear_triangles() {
    // Put the far triangle first so that it is not simply the first one found.
    let mesh = vec![wall(10.0), wall(5.0), wall(20.0)];
    let ray = Ray::new(Point3::origin(), Vector3::x());
    let collider = RayCollider::new(RaySettings::closest_hit()).unwrap();
    let mut faces = Vec::new();

    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let _ = collider.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_id, 1);
    assert_relative_eq!(faces[0].distance, 5.0);

    let hybrid = HybridModel::build(&mesh, &ModelSettings::default()).unwrap();
    let _ = collider.collide_hybrid(&mut RayCache::default(), &ray, &hybrid, &mesh, &mut faces);
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_id, 1);

    // All hits, for comparison.
    let all = RayCollider::new(RaySettings::default()).unwrap();
    let _ = all.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert_eq!(faces.len(), 3);

    // A segment stops before the far triangles.
    let segment = RayCollider::new(RaySettings::default().with_max_dist(7.0)).unwrap();
    let _ = segment.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert_eq!(faces.len(), 1);
}

#[test]
fn backface_culling() {
    let mesh = vec![wall(5.0), wall(10.0)];
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let mut faces = Vec::new();

    // The walls face -x: seen from +x they are back faces.
    let ray = Ray::new(Point3::new(20.0, 0.0, 0.0), -Vector3::x());
    let culled = RayCollider::new(RaySettings::default()).unwrap();
    let _ = culled.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert!(faces.is_empty());

    let double_sided = RayCollider::new(RaySettings::in_out_test()).unwrap();
    let _ = double_sided.collide(&mut RayCache::default(), &ray, &model, &mesh, &mut faces);
    assert_eq!(faces.len(), 2);
}

#[test]
fn temporal_coherence_skips_the_traversal() {
    // Clutter away from the ray, so that the wall is the only triangle it hits.
    let mut mesh: Vec<_> = crate::random_triangles(0, 300, 40.0, 3.0)
        .into_iter()
        .filter(|tri| {
            let aabb = tri.aabb();
            aabb.mins.y > 2.0 || aabb.maxs.y < -2.0 || aabb.mins.z > 2.0 || aabb.maxs.z < -2.0
        })
        .collect();
    mesh.push(wall(5.0));
    let wall_id = mesh.len() as u32 - 1;
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    let collider = RayCollider::new(RaySettings::shadow_feeler(100.0)).unwrap();
    let mut cache = RayCache::default();
    let mut faces = Vec::new();

    let ray = Ray::new(Point3::new(0.0, 0.1, 0.1), Vector3::x());
    let stats = collider.collide(&mut cache, &ray, &model, &mesh, &mut faces);
    assert!(stats.contact());
    assert!(!stats.status.contains(ContactStatus::TEMPORAL_CONTACT));
    assert!(stats.nb_bv_tests > 0);
    assert_eq!(faces[0].face_id, wall_id);
    assert_eq!(cache.face, Some(wall_id));

    // Shift the segment slightly: the cached triangle is still hit.
    let shifted = Ray::new(Point3::new(0.0, 0.1 + 1.0e-3, 0.1), Vector3::x());
    let stats = collider.collide(&mut cache, &shifted, &model, &mesh, &mut faces);
    assert!(stats.temporal_contact());
    assert_eq!(stats.nb_bv_tests, 0);
    assert_eq!(stats.nb_prim_tests, 1);
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_id, wall_id);

    // Without coherence, the same query traverses the tree.
    let no_cache = RayCollider::new(
        RaySettings::shadow_feeler(100.0).with_flags(QueryFlags::FIRST_CONTACT),
    )
    .unwrap();
    let stats = no_cache.collide(&mut cache, &shifted, &model, &mesh, &mut faces);
    assert!(stats.contact() && !stats.temporal_contact());
    assert!(stats.nb_bv_tests > 0);
}

#[test]
fn world_space_ray_on_a_posed_model() {
    let mesh = vec![wall(5.0), wall(10.0)];
    let model = Model::build(&mesh, &ModelSettings::default()).unwrap();
    // The model is rotated so that its local +x axis points along the world +y axis.
    let pos = Isometry3::new(
        Vector3::new(1.0, 2.0, 3.0),
        Vector3::z() * std::f32::consts::FRAC_PI_2,
    );

    let world_ray = Ray::new(Point3::new(1.0, 2.0, 3.0), Vector3::y());
    let local_ray = world_ray.inverse_transform_by(&pos);
    assert_relative_eq!(local_ray.dir, Vector3::x(), epsilon = 1.0e-6);

    let collider = RayCollider::new(RaySettings::closest_hit()).unwrap();
    let mut faces = Vec::new();
    let _ = collider.collide(&mut RayCache::default(), &local_ray, &model, &mesh, &mut faces);
    assert_eq!(faces.len(), 1);
    assert_eq!(faces[0].face_id, 0);
    assert_relative_eq!(faces[0].distance, 5.0, epsilon = 1.0e-4);
}

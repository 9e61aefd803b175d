use crate::{random_triangles, sorted};
use na::{Isometry3, Point3, Vector3};
use optree3d::collision::{AabbCache, AabbCollider, ObbCache, ObbCollider};
use optree3d::bounding_volume::{Aabb, Obb};
use optree3d::mesh::{IndexedMesh, MeshInterface};
use optree3d::model::{Model, ModelSettings};

fn grid_mesh(n: u32) -> IndexedMesh {
    let mut vertices = Vec::new();
    let mut indices = Vec::new();

    for i in 0..=n {
        for j in 0..=n {
            vertices.push(Point3::new(i as f32, 0.0, j as f32));
        }
    }

    for i in 0..n {
        for j in 0..n {
            let v = i * (n + 1) + j;
            indices.push([v, v + 1, v + n + 1]);
            indices.push([v + 1, v + n + 2, v + n + 1]);
        }
    }

    IndexedMesh::new(vertices, indices).unwrap()
}

#[test]
fn refitted_model_matches_a_fresh_build() {
    let mut mesh = grid_mesh(30);
    let settings = ModelSettings::default().with_quantized(false);
    let mut model = Model::build(&mesh, &settings).unwrap();
    assert_eq!(model.num_primitives(), mesh.num_triangles());

    // Turn the flat grid into waves.
    for pt in mesh.vertices_mut() {
        pt.y = (pt.x * 0.4).sin() * 3.0 + (pt.z * 0.3).cos() * 2.0;
    }

    model.refit(&mesh).unwrap();
    let fresh = Model::build(&mesh, &settings).unwrap();

    let mut rng = oorandom::Rand32::new(4);
    for _ in 0..30 {
        let center = Point3::new(
            rng.rand_float() * 30.0,
            rng.rand_float() * 6.0 - 3.0,
            rng.rand_float() * 30.0,
        );
        let aabb = Aabb::from_half_extents(center, Vector3::new(2.0, 0.5, 3.0));
        let (mut refitted, mut rebuilt) = (AabbCache::new(), AabbCache::new());
        let _ = AabbCollider::default().collide(&mut refitted, &aabb, &model, &mesh);
        let _ = AabbCollider::default().collide(&mut rebuilt, &aabb, &fresh, &mesh);
        assert_eq!(sorted(refitted.touched), sorted(rebuilt.touched));

        let pos = Isometry3::new(center.coords, Vector3::new(0.3, 1.0, -0.2));
        let obb = Obb::from_isometry(&pos, Vector3::new(4.0, 1.0, 0.5));
        let (mut refitted, mut rebuilt) = (ObbCache::new(), ObbCache::new());
        let _ = ObbCollider::default().collide(&mut refitted, &obb, &model, &mesh);
        let _ = ObbCollider::default().collide(&mut rebuilt, &obb, &fresh, &mesh);
        assert_eq!(sorted(refitted.touched), sorted(rebuilt.touched));
    }
}

#[test]
fn triangle_soups_and_indexed_meshes_agree() {
    let soup = random_triangles(5, 400, 30.0, 2.0);
    let vertices = soup.iter().flat_map(|tri| tri.vertices()).collect();
    let indices = (0..soup.len() as u32)
        .map(|i| [3 * i, 3 * i + 1, 3 * i + 2])
        .collect();
    let indexed = IndexedMesh::new(vertices, indices).unwrap();

    let soup_model = Model::build(&soup, &ModelSettings::default()).unwrap();
    let indexed_model = Model::build(&indexed, &ModelSettings::default()).unwrap();

    let aabb = Aabb::from_half_extents(Point3::new(2.0, -1.0, 0.0), Vector3::repeat(6.0));
    let (mut a, mut b) = (AabbCache::new(), AabbCache::new());
    let _ = AabbCollider::default().collide(&mut a, &aabb, &soup_model, &soup);
    let _ = AabbCollider::default().collide(&mut b, &aabb, &indexed_model, &indexed);
    assert_eq!(sorted(a.touched), sorted(b.touched));
}

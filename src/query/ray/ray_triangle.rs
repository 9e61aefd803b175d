use crate::math::{Point, Real};
use crate::query::Ray;
use crate::shape::Triangle;

/// The result of a ray cast on a triangle.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RayTriangleHit {
    /// The ray parameter at the hit point.
    pub time_of_impact: Real,
    /// Barycentric coordinate of the hit point associated to the second vertex.
    pub u: Real,
    /// Barycentric coordinate of the hit point associated to the third vertex.
    pub v: Real,
    /// `true` if the ray hit the side opposite to the triangle normal.
    pub front_face: bool,
}

/// Computes the intersection between a triangle and a ray.
///
/// If an intersection is found, the time of impact and the barycentric coordinates of the
/// intersection point are returned. The hit point is `a + (b - a) * u + (c - a) * v`.
///
/// A hit is a `front_face` hit when the ray direction opposes the triangle normal, i.e. when the
/// ray sees the vertices in counter-clockwise order.
pub fn local_ray_intersection_with_triangle(
    a: &Point<Real>,
    b: &Point<Real>,
    c: &Point<Real>,
    ray: &Ray,
) -> Option<RayTriangleHit> {
    let ab = *b - *a;
    let ac = *c - *a;

    // normal
    let n = ab.cross(&ac);
    let d = n.dot(&ray.dir);

    // the normal and the ray direction are parallel
    if d == 0.0 {
        return None;
    }

    let ap = ray.origin - *a;
    let t = ap.dot(&n);

    // the ray does not intersect the halfspace defined by the triangle
    if (t < 0.0 && d < 0.0) || (t > 0.0 && d > 0.0) {
        return None;
    }

    let front_face = d < 0.0;
    let d = d.abs();

    //
    // intersection: compute barycentric coordinates
    //
    let e = -ray.dir.cross(&ap);

    let mut v;
    let mut w;
    let toi;

    if t < 0.0 {
        v = -ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        w = ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        let invd = 1.0 / d;
        toi = -t * invd;
        v *= invd;
        w *= invd;
    } else {
        v = ac.dot(&e);

        if v < 0.0 || v > d {
            return None;
        }

        w = -ab.dot(&e);

        if w < 0.0 || v + w > d {
            return None;
        }

        let invd = 1.0 / d;
        toi = t * invd;
        v *= invd;
        w *= invd;
    }

    Some(RayTriangleHit {
        time_of_impact: toi,
        u: v,
        v: w,
        front_face,
    })
}

/// Casts a ray on a triangle, optionally ignoring back-faces and hits past `max_toi`.
#[inline]
pub fn cast_ray_on_triangle(
    triangle: &Triangle,
    ray: &Ray,
    max_toi: Real,
    cull_backfaces: bool,
) -> Option<RayTriangleHit> {
    let hit = local_ray_intersection_with_triangle(&triangle.a, &triangle.b, &triangle.c, ray)?;

    if (cull_backfaces && !hit.front_face) || hit.time_of_impact > max_toi {
        None
    } else {
        Some(hit)
    }
}

use crate::math::{Real, Vector, DEFAULT_EPSILON};
use crate::shape::Triangle;

/// Tests if two triangles intersect.
///
/// Separating axis test on the two triangle normals, the nine cross products of pairs of edges,
/// and the six in-plane edge normals needed to separate coplanar triangles. Axes degenerating
/// to zero are skipped. Touching counts as intersecting.
pub fn intersection_test_triangle_triangle(triangle1: &Triangle, triangle2: &Triangle) -> bool {
    let v1 = triangle1.vertices().map(|p| p.coords);
    let v2 = triangle2.vertices().map(|p| p.coords);
    let e1 = triangle1.edges_scaled_directions();
    let e2 = triangle2.edges_scaled_directions();
    let n1 = triangle1.scaled_normal();
    let n2 = triangle2.scaled_normal();

    if separated_on_axis(&n1, &v1, &v2) || separated_on_axis(&n2, &v1, &v2) {
        return false;
    }

    for a in &e1 {
        for b in &e2 {
            let axis = a.cross(b);
            if axis.norm_squared() > DEFAULT_EPSILON * a.norm_squared() * b.norm_squared()
                && separated_on_axis(&axis, &v1, &v2)
            {
                return false;
            }
        }
    }

    for (n, edges) in [(&n1, &e1), (&n2, &e2)] {
        for e in edges {
            let axis = n.cross(e);
            if separated_on_axis(&axis, &v1, &v2) {
                return false;
            }
        }
    }

    true
}

#[inline]
fn separated_on_axis(axis: &Vector<Real>, v1: &[Vector<Real>; 3], v2: &[Vector<Real>; 3]) -> bool {
    let (min1, max1) = project(axis, v1);
    let (min2, max2) = project(axis, v2);
    max1 < min2 || max2 < min1
}

#[inline]
fn project(axis: &Vector<Real>, v: &[Vector<Real>; 3]) -> (Real, Real) {
    let p0 = axis.dot(&v[0]);
    let p1 = axis.dot(&v[1]);
    let p2 = axis.dot(&v[2]);
    (p0.min(p1).min(p2), p0.max(p1).max(p2))
}

use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector};
use crate::shape::Triangle;

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// Tests if a triangle intersects an AABB.
///
/// This is a separating axis test on 13 axes: the three box axes, the triangle normal and the
/// nine cross products of a box axis with a triangle edge. Touching counts as intersecting.
pub fn intersection_test_aabb_triangle(aabb: &Aabb, triangle: &Triangle) -> bool {
    let center = aabb.center();
    let half_extents = aabb.half_extents();
    let v = [
        triangle.a - center,
        triangle.b - center,
        triangle.c - center,
    ];

    // Box axes.
    for i in 0..3 {
        let min = v[0][i].min(v[1][i]).min(v[2][i]);
        let max = v[0][i].max(v[1][i]).max(v[2][i]);
        if min > half_extents[i] || max < -half_extents[i] {
            return false;
        }
    }

    // Triangle normal.
    let edges = [v[1] - v[0], v[2] - v[1], v[0] - v[2]];
    let normal = edges[0].cross(&edges[1]);
    let radius = half_extents.dot(&normal.abs());
    if normal.dot(&v[0]).abs() > radius {
        return false;
    }

    // Box axes crossed with the triangle edges.
    for edge in &edges {
        let axes = [
            Vector::new(0.0, -edge.z, edge.y),
            Vector::new(edge.z, 0.0, -edge.x),
            Vector::new(-edge.y, edge.x, 0.0),
        ];

        for axis in &axes {
            if separated_on_axis(axis, &v, &half_extents) {
                return false;
            }
        }
    }

    true
}

#[inline]
fn separated_on_axis(axis: &Vector<Real>, v: &[Vector<Real>; 3], half_extents: &Vector<Real>) -> bool {
    let p0 = axis.dot(&v[0]);
    let p1 = axis.dot(&v[1]);
    let p2 = axis.dot(&v[2]);
    let radius = half_extents.dot(&axis.abs());
    p0.min(p1).min(p2) > radius || p0.max(p1).max(p2) < -radius
}

use crate::math::{Point, Real};
use crate::shape::Triangle;

/// The point of the (solid) triangle closest to `pt`.
///
/// Degenerate triangles are supported: the Voronoï regions of the vertices and edges are tested
/// before any division by the triangle area.
pub fn closest_points_triangle_point(triangle: &Triangle, pt: &Point<Real>) -> Point<Real> {
    let a = triangle.a;
    let b = triangle.b;
    let c = triangle.c;

    let ab = b - a;
    let ac = c - a;
    let ap = pt - a;

    let ab_ap = ab.dot(&ap);
    let ac_ap = ac.dot(&ap);

    if ab_ap <= 0.0 && ac_ap <= 0.0 {
        // Voronoï region of `a`.
        return a;
    }

    let bp = pt - b;
    let ab_bp = ab.dot(&bp);
    let ac_bp = ac.dot(&bp);

    if ab_bp >= 0.0 && ac_bp <= ab_bp {
        // Voronoï region of `b`.
        return b;
    }

    let cp = pt - c;
    let ab_cp = ab.dot(&cp);
    let ac_cp = ac.dot(&cp);

    if ac_cp >= 0.0 && ab_cp <= ac_cp {
        // Voronoï region of `c`.
        return c;
    }

    // Explicit cross products are more numerically stable than the
    // determinant-based formulation.
    let n = ab.cross(&ac);
    let bc = c - b;

    let vc = n.dot(&ab.cross(&ap));
    if vc < 0.0 && ab_ap >= 0.0 && ab_bp <= 0.0 {
        // Voronoï region of `ab`.
        return a + ab * (ab_ap / ab.norm_squared());
    }

    let vb = -n.dot(&ac.cross(&cp));
    if vb < 0.0 && ac_ap >= 0.0 && ac_cp <= 0.0 {
        // Voronoï region of `ac`.
        return a + ac * (ac_ap / ac.norm_squared());
    }

    let va = n.dot(&bc.cross(&bp));
    if va < 0.0 && ac_bp - ab_bp >= 0.0 && ab_cp - ac_cp >= 0.0 {
        // Voronoï region of `bc`.
        return b + bc * ((ac_bp - ab_bp) / bc.norm_squared());
    }

    let denom = va + vb + vc;

    if denom == 0.0 {
        // Flat triangle whose edges regions did not catch the point: fall back to the
        // closest edge.
        let candidates = [
            a + ab * na::clamp(ab_ap / ab.norm_squared(), 0.0, 1.0),
            a + ac * na::clamp(ac_ap / ac.norm_squared(), 0.0, 1.0),
            b + bc * na::clamp(bc.dot(&bp) / bc.norm_squared(), 0.0, 1.0),
        ];

        return candidates
            .into_iter()
            .filter(|p| p.iter().all(|x| x.is_finite()))
            .min_by(|p1, p2| {
                na::distance_squared(p1, pt)
                    .partial_cmp(&na::distance_squared(p2, pt))
                    .unwrap_or(core::cmp::Ordering::Equal)
            })
            .unwrap_or(a);
    }

    // Inside the face.
    let inv_denom = 1.0 / denom;
    let v = vb * inv_denom;
    let w = vc * inv_denom;
    a + ab * v + ac * w
}

/// The squared distance between a (solid) triangle and a point.
#[inline]
pub fn distance_squared_triangle_point(triangle: &Triangle, pt: &Point<Real>) -> Real {
    na::distance_squared(&closest_points_triangle_point(triangle, pt), pt)
}

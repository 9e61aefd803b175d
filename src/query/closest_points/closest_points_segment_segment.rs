use crate::math::{Real, DEFAULT_EPSILON};
use crate::shape::Segment;

/// The parameters `(s, t)` of the closest points between two segments.
///
/// The closest points are `seg1.point_at(s)` and `seg2.point_at(t)`, with `s` and `t` in
/// `[0, 1]`. Degenerate (point-like) segments are supported.
pub fn closest_points_segment_segment_parameters(seg1: &Segment, seg2: &Segment) -> (Real, Real) {
    // Inspired by Real-time collision detection by Christer Ericson.
    let d1 = seg1.scaled_direction();
    let d2 = seg2.scaled_direction();
    let r = seg1.a - seg2.a;

    let a = d1.norm_squared();
    let e = d2.norm_squared();
    let f = d2.dot(&r);

    let mut s;
    let mut t;

    let eps = DEFAULT_EPSILON;
    if a <= eps && e <= eps {
        s = 0.0;
        t = 0.0;
    } else if a <= eps {
        s = 0.0;
        t = na::clamp(f / e, 0.0, 1.0);
    } else {
        let c = d1.dot(&r);
        if e <= eps {
            t = 0.0;
            s = na::clamp(-c / a, 0.0, 1.0);
        } else {
            let b = d1.dot(&d2);
            let ae = a * e;
            let bb = b * b;
            let denom = ae - bb;

            // Use absolute and ulps error to test collinearity.
            if denom > eps && !ulps_eq!(ae, bb) {
                s = na::clamp((b * f - c * e) / denom, 0.0, 1.0);
            } else {
                s = 0.0;
            }

            t = (b * s + f) / e;

            if t < 0.0 {
                t = 0.0;
                s = na::clamp(-c / a, 0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s = na::clamp((b - c) / a, 0.0, 1.0);
            }
        }
    }

    (s, t)
}

/// The squared distance between two segments.
#[inline]
pub fn distance_squared_segment_segment(seg1: &Segment, seg2: &Segment) -> Real {
    let (s, t) = closest_points_segment_segment_parameters(seg1, seg2);
    na::distance_squared(&seg1.point_at(s), &seg2.point_at(t))
}

use crate::bounding_volume::Aabb;
use crate::math::Real;
use crate::shape::{Plane, Triangle};

/// Where an AABB lies with respect to a set of planes.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum PlanesAabbLocation {
    /// The box is fully outside of at least one plane.
    Outside,
    /// The box straddles at least one plane and is not outside of any of them.
    Straddling,
    /// The box is inside of all the planes.
    Inside,
}

/// Classifies an AABB against a set of planes.
///
/// For each plane, the box is projected on the plane normal: with `d` the signed distance of its
/// center and `r` its projected radius, the box is outside when `d > r` and inside when
/// `d <= -r`.
pub fn classify_aabb_wrt_planes(planes: &[Plane], aabb: &Aabb) -> PlanesAabbLocation {
    let center = aabb.center();
    let half_extents = aabb.half_extents();
    let mut inside = true;

    for plane in planes {
        let d = plane.signed_distance(&center);
        let r = plane.normal.abs().dot(&half_extents);

        if d > r {
            return PlanesAabbLocation::Outside;
        }

        if d > -r {
            inside = false;
        }
    }

    if inside {
        PlanesAabbLocation::Inside
    } else {
        PlanesAabbLocation::Straddling
    }
}

/// Tests if a triangle is not fully outside of any of the given planes.
pub fn intersection_test_planes_triangle(planes: &[Plane], triangle: &Triangle) -> bool {
    !planes.iter().any(|plane| {
        let outside = |d: Real| d > 0.0;
        outside(plane.signed_distance(&triangle.a))
            && outside(plane.signed_distance(&triangle.b))
            && outside(plane.signed_distance(&triangle.c))
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::math::{Point, Vector};

    fn unit_cube_planes() -> [Plane; 6] {
        let aabb = Aabb::new(Point::origin(), Point::new(1.0, 1.0, 1.0));
        crate::bounding_volume::Obb::from_aabb(&aabb).planes()
    }

    #[test]
    fn aabb_classification() {
        let planes = unit_cube_planes();
        let inner = Aabb::new(Point::new(0.2, 0.2, 0.2), Point::new(0.8, 0.8, 0.8));
        let straddling = Aabb::new(Point::new(0.5, 0.5, 0.5), Point::new(1.5, 1.5, 1.5));
        let outer = Aabb::new(Point::new(1.5, 0.5, 0.5), Point::new(2.5, 1.5, 1.5));
        assert_eq!(classify_aabb_wrt_planes(&planes, &inner), PlanesAabbLocation::Inside);
        assert_eq!(
            classify_aabb_wrt_planes(&planes, &straddling),
            PlanesAabbLocation::Straddling
        );
        assert_eq!(classify_aabb_wrt_planes(&planes, &outer), PlanesAabbLocation::Outside);
        assert_eq!(classify_aabb_wrt_planes(&[], &outer), PlanesAabbLocation::Inside);
    }

    #[test]
    fn triangle_against_planes() {
        let planes = [Plane::new(Vector::x(), -1.0)];
        let crossing = Triangle::new(
            Point::new(0.0, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(0.0, 1.0, 0.0),
        );
        let outside = Triangle::new(
            Point::new(1.5, 0.0, 0.0),
            Point::new(2.0, 0.0, 0.0),
            Point::new(1.5, 1.0, 0.0),
        );
        assert!(intersection_test_planes_triangle(&planes, &crossing));
        assert!(!intersection_test_planes_triangle(&planes, &outside));
    }
}

use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DIM};
use crate::query::Ray;

/// A ray prepared for repeated slab tests against many AABBs.
///
/// The reciprocal direction is computed once. Axes along which the ray does not move are
/// flagged so they can be tested as a simple inclusion of the origin instead of dividing by
/// zero. The same code path handles infinite rays (`max_toi == Real::MAX`) and segments.
#[derive(Copy, Clone, Debug)]
pub struct RayAabbTest {
    ray: Ray,
    inv_dir: Vector<Real>,
    parallel: [bool; DIM],
    max_toi: Real,
}

impl RayAabbTest {
    /// Prepares `ray` for slab tests, limited to parameters in `[0, max_toi]`.
    pub fn new(ray: &Ray, max_toi: Real) -> Self {
        let mut inv_dir = Vector::zeros();
        let mut parallel = [false; DIM];

        for i in 0..DIM {
            if ray.dir[i] == 0.0 {
                parallel[i] = true;
            } else {
                inv_dir[i] = 1.0 / ray.dir[i];
            }
        }

        Self {
            ray: *ray,
            inv_dir,
            parallel,
            max_toi,
        }
    }

    /// The parameter interval where the ray is inside of `aabb`, if any.
    ///
    /// Intervals are closed: a ray grazing a face or starting on it hits the box.
    #[inline]
    pub fn clip(&self, aabb: &Aabb) -> Option<(Real, Real)> {
        let mut tmin: Real = 0.0;
        let mut tmax: Real = self.max_toi;

        for i in 0..DIM {
            if self.parallel[i] {
                if self.ray.origin[i] < aabb.mins[i] || self.ray.origin[i] > aabb.maxs[i] {
                    return None;
                }
            } else {
                let mut near = (aabb.mins[i] - self.ray.origin[i]) * self.inv_dir[i];
                let mut far = (aabb.maxs[i] - self.ray.origin[i]) * self.inv_dir[i];

                if near > far {
                    core::mem::swap(&mut near, &mut far);
                }

                tmin = tmin.max(near);
                tmax = tmax.min(far);

                if tmin > tmax {
                    // This covers the case where tmax is negative because tmin is
                    // initialized at zero.
                    return None;
                }
            }
        }

        Some((tmin, tmax))
    }

    /// Does the ray hit `aabb` within its parameter range?
    #[inline]
    pub fn intersects(&self, aabb: &Aabb) -> bool {
        self.clip(aabb).is_some()
    }
}

/// Tests if the ray intersects the AABB for a parameter in `[0, max_toi]`.
#[inline]
pub fn intersection_test_ray_aabb(ray: &Ray, max_toi: Real, aabb: &Aabb) -> bool {
    RayAabbTest::new(ray, max_toi).intersects(aabb)
}

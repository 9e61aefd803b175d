use crate::bounding_volume::Aabb;
use crate::math::{Point, Real, Vector};

/// A ball (sphere) placed at an explicit center.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(PartialEq, Debug, Copy, Clone)]
#[repr(C)]
pub struct Ball {
    /// The center of the ball.
    pub center: Point<Real>,
    /// The radius of the ball.
    pub radius: Real,
}

impl Ball {
    /// Creates a new ball.
    #[inline]
    pub fn new(center: Point<Real>, radius: Real) -> Ball {
        Ball { center, radius }
    }

    /// The tightest AABB containing this ball.
    #[inline]
    pub fn aabb(&self) -> Aabb {
        Aabb::from_half_extents(self.center, Vector::repeat(self.radius))
    }
}

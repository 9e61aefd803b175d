use crate::bounding_volume::{Aabb, Obb};
use crate::math::{Matrix, Real, Vector};

#[cfg(not(feature = "std"))]
use na::ComplexField;

/// The slack added to the absolute rotation matrix of [`BoxBoxSat`].
///
/// It keeps edge-cross axes from being reported as separating when two box edges are (almost)
/// parallel and their cross product degenerates.
pub const BOX_BOX_SAT_EPSILON: Real = 1.0e-6;

/// Separating axis test between two oriented boxes sharing a fixed relative orientation.
///
/// The rotation of the second box relative to the first one is set once, then many pairs of
/// boxes (e.g. the nodes of two trees) are tested against each other by only providing their
/// centers and half-extents.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BoxBoxSat {
    rot: Matrix<Real>,
    abs_rot: Matrix<Real>,
}

impl BoxBoxSat {
    /// Initializes the test from the rotation matrix `rot12` mapping directions expressed in the
    /// frame of the second box to the frame of the first box.
    pub fn new(rot12: &Matrix<Real>) -> Self {
        Self {
            rot: *rot12,
            abs_rot: rot12.abs().add_scalar(BOX_BOX_SAT_EPSILON),
        }
    }

    /// Tests two boxes against each other on the 15 candidate separating axes.
    ///
    /// The first box has half-extents `a` and is aligned with the axes of the reference frame.
    /// The second one has half-extents `b` and its center is at `t` relative to the center of
    /// the first box, expressed in the reference frame.
    pub fn intersects(&self, a: &Vector<Real>, b: &Vector<Real>, t: &Vector<Real>) -> bool {
        let r = &self.rot;
        let ar = &self.abs_rot;

        // Axes of the first box.
        for i in 0..3 {
            let rb = b.x * ar[(i, 0)] + b.y * ar[(i, 1)] + b.z * ar[(i, 2)];
            if t[i].abs() > a[i] + rb {
                return false;
            }
        }

        // Axes of the second box.
        for j in 0..3 {
            let ra = a.x * ar[(0, j)] + a.y * ar[(1, j)] + a.z * ar[(2, j)];
            let tl = t.x * r[(0, j)] + t.y * r[(1, j)] + t.z * r[(2, j)];
            if tl.abs() > ra + b[j] {
                return false;
            }
        }

        // Cross products `A_i x B_j`.
        for i in 0..3 {
            let i1 = (i + 1) % 3;
            let i2 = (i + 2) % 3;

            for j in 0..3 {
                let j1 = (j + 1) % 3;
                let j2 = (j + 2) % 3;

                let tl = t[i2] * r[(i1, j)] - t[i1] * r[(i2, j)];
                let ra = a[i1] * ar[(i2, j)] + a[i2] * ar[(i1, j)];
                let rb = b[j1] * ar[(i, j2)] + b[j2] * ar[(i, j1)];

                if tl.abs() > ra + rb {
                    return false;
                }
            }
        }

        true
    }
}

/// Tests if an oriented box intersects an AABB.
pub fn intersection_test_aabb_obb(aabb: &Aabb, obb: &Obb) -> bool {
    let sat = BoxBoxSat::new(&obb.rotation);
    sat.intersects(
        &aabb.half_extents(),
        &obb.half_extents,
        &(obb.center - aabb.center()),
    )
}

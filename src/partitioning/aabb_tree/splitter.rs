use super::{BuildSettings, PrimitiveSource, SplitRule};
use crate::bounding_volume::Aabb;
use crate::math::{Real, Vector, DIM};
use ordered_float::OrderedFloat;

/// The node subdivision logic shared by all the tree layouts.
pub(super) struct Splitter<'a, S: ?Sized> {
    source: &'a S,
    settings: BuildSettings,
    pub invalid_splits: u32,
}

impl<'a, S: PrimitiveSource + ?Sized> Splitter<'a, S> {
    pub fn new(source: &'a S, settings: BuildSettings) -> Self {
        Self {
            source,
            settings,
            invalid_splits: 0,
        }
    }

    #[inline]
    pub fn compute_aabb(&self, primitives: &[u32]) -> Aabb {
        self.source.compute_aabb(primitives)
    }

    /// Reorders `primitives` and returns the number of primitives assigned to the first child,
    /// or `None` if the node must stay a leaf.
    pub fn subdivide(&mut self, primitives: &mut [u32], aabb: &Aabb) -> Option<usize> {
        let nb = primitives.len();

        if nb <= 1 || nb <= self.settings.limit as usize {
            return None;
        }

        let nb_pos = match self.settings.rule {
            SplitRule::LargestAxis => {
                let axis = aabb.extents().imax();
                self.split(primitives, aabb, axis)
            }
            SplitRule::SplatterPoints => {
                let axis = self.largest_variance_axis(primitives);
                self.split(primitives, aabb, axis)
            }
            SplitRule::Balanced => {
                let mut best_axis = 0;
                let mut best_score = Real::MAX;

                for axis in 0..DIM {
                    let ratio = self.split(primitives, aabb, axis) as Real / nb as Real;
                    let score = (ratio - 0.5) * (ratio - 0.5);
                    if score < best_score {
                        best_score = score;
                        best_axis = axis;
                    }
                }

                self.split(primitives, aabb, best_axis)
            }
            SplitRule::BestAxis => {
                let extents = aabb.extents();
                let mut axes = [0, 1, 2];
                // Stable sort: equal extents keep the lowest axis first.
                axes.sort_by_key(|i| core::cmp::Reverse(OrderedFloat(extents[*i])));

                let mut nb_pos = 0;
                for axis in axes {
                    nb_pos = self.split(primitives, aabb, axis);
                    if nb_pos != 0 && nb_pos != nb {
                        break;
                    }
                }
                nb_pos
            }
            SplitRule::Fifty => nb / 2,
        };

        if nb_pos == 0 || nb_pos == nb {
            // All the primitives lie on the same side of the split.
            if self.settings.has_bounded_leaves() {
                self.invalid_splits += 1;
                Some(nb / 2)
            } else {
                None
            }
        } else {
            Some(nb_pos)
        }
    }

    fn split_value(&self, primitives: &[u32], aabb: &Aabb, axis: usize) -> Real {
        if self.settings.geom_center {
            let sum: Real = primitives
                .iter()
                .map(|id| self.source.split_value(*id, axis))
                .sum();
            sum / primitives.len() as Real
        } else {
            aabb.center()[axis]
        }
    }

    /// Moves the primitives beyond the split value to the front of the range, and returns
    /// their count.
    fn split(&self, primitives: &mut [u32], aabb: &Aabb, axis: usize) -> usize {
        let split_value = self.split_value(primitives, aabb, axis);
        let mut nb_pos = 0;

        for i in 0..primitives.len() {
            if self.source.split_value(primitives[i], axis) > split_value {
                primitives.swap(i, nb_pos);
                nb_pos += 1;
            }
        }

        nb_pos
    }

    fn largest_variance_axis(&self, primitives: &[u32]) -> usize {
        let nb = primitives.len() as Real;
        let mut means = Vector::zeros();

        for id in primitives {
            for axis in 0..DIM {
                means[axis] += self.source.split_value(*id, axis);
            }
        }
        means /= nb;

        let mut variances = Vector::zeros();
        for id in primitives {
            for axis in 0..DIM {
                let delta = self.source.split_value(*id, axis) - means[axis];
                variances[axis] += delta * delta;
            }
        }
        variances /= nb - 1.0;

        variances.imax()
    }
}

//! Sweep-and-prune overlap tests between sets of boxes.

use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::math::Real;
use crate::utils::RadixSort;
use alloc::vec::Vec;

/// The axes used by box pruning.
///
/// Boxes are sorted along `primary`, and the overlap of sweep candidates is then confirmed on
/// `secondary` and `tertiary`. Choosing the axis along which the boxes are the most spread out
/// as `primary` reduces the number of candidates.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Axes {
    /// The sorting axis.
    pub primary: usize,
    /// The first confirmation axis.
    pub secondary: usize,
    /// The second confirmation axis.
    pub tertiary: usize,
}

impl Default for Axes {
    fn default() -> Self {
        Self::new(0, 1, 2)
    }
}

impl Axes {
    /// Creates a new axis ordering. The three axes must be distinct.
    pub fn new(primary: usize, secondary: usize, tertiary: usize) -> Self {
        assert!(
            primary != secondary && primary != tertiary && secondary != tertiary,
            "Box pruning axes must be distinct."
        );
        Self {
            primary,
            secondary,
            tertiary,
        }
    }

    #[inline]
    fn overlap_on_secondary_axes(&self, a: &Aabb, b: &Aabb) -> bool {
        a.intersects_on_axis(b, self.secondary) && a.intersects_on_axis(b, self.tertiary)
    }
}

/// Box pruning with sorting state kept between calls.
///
/// Reusing the same `BoxPruning` for the same slowly moving sets, frame after frame, lets the
/// radix sorter exit early when the sorted order did not change.
#[derive(Clone, Debug, Default)]
pub struct BoxPruning {
    sorter0: RadixSort,
    sorter1: RadixSort,
}

impl BoxPruning {
    /// Creates box pruning state with empty sorters.
    pub fn new() -> Self {
        Self::default()
    }

    /// Finds all the intersecting pairs `(i, j)` with `i != j` among `aabbs`.
    ///
    /// Each intersecting pair is reported exactly once, in no particular order of its two
    /// indices.
    pub fn complete(&mut self, aabbs: &[Aabb], axes: Axes) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        let mins: Vec<Real> = aabbs.iter().map(|a| a.mins[axes.primary]).collect();
        let sorted = self.sorter0.sort_f32(&mins);

        for (k, &id0) in sorted.iter().enumerate() {
            let aabb0 = &aabbs[id0 as usize];

            for &id1 in &sorted[k + 1..] {
                if mins[id1 as usize] > aabb0.maxs[axes.primary] {
                    break;
                }

                if axes.overlap_on_secondary_axes(aabb0, &aabbs[id1 as usize]) {
                    pairs.push((id0, id1));
                }
            }
        }

        pairs
    }

    /// Finds all the intersecting pairs `(i, j)` with `i` an index in `aabbs0` and `j` an index
    /// in `aabbs1`.
    pub fn bipartite(&mut self, aabbs0: &[Aabb], aabbs1: &[Aabb], axes: Axes) -> Vec<(u32, u32)> {
        let mut pairs = Vec::new();
        let mins0: Vec<Real> = aabbs0.iter().map(|a| a.mins[axes.primary]).collect();
        let mins1: Vec<Real> = aabbs1.iter().map(|a| a.mins[axes.primary]).collect();
        let sorted0 = self.sorter0.sort_f32(&mins0);
        let sorted1 = self.sorter1.sort_f32(&mins1);

        // Boxes of the second set starting at or after the start of a box of the first set.
        let mut first = 0;
        for &id0 in sorted0 {
            let aabb0 = &aabbs0[id0 as usize];

            while first < sorted1.len() && mins1[sorted1[first] as usize] < mins0[id0 as usize] {
                first += 1;
            }

            for &id1 in &sorted1[first..] {
                if mins1[id1 as usize] > aabb0.maxs[axes.primary] {
                    break;
                }

                if axes.overlap_on_secondary_axes(aabb0, &aabbs1[id1 as usize]) {
                    pairs.push((id0, id1));
                }
            }
        }

        // Boxes of the first set starting strictly after the start of a box of the second set.
        let mut first = 0;
        for &id1 in sorted1 {
            let aabb1 = &aabbs1[id1 as usize];

            while first < sorted0.len() && mins0[sorted0[first] as usize] <= mins1[id1 as usize] {
                first += 1;
            }

            for &id0 in &sorted0[first..] {
                if mins0[id0 as usize] > aabb1.maxs[axes.primary] {
                    break;
                }

                if axes.overlap_on_secondary_axes(&aabbs0[id0 as usize], aabb1) {
                    pairs.push((id0, id1));
                }
            }
        }

        pairs
    }
}

/// Finds all the intersecting pairs `(i, j)` with `i < j` among `aabbs`.
///
/// See [`BoxPruning::complete`] for a version reusing its sorting state.
pub fn complete_box_pruning(aabbs: &[Aabb], axes: Axes) -> Vec<(u32, u32)> {
    BoxPruning::new()
        .complete(aabbs, axes)
        .into_iter()
        .map(|(i, j)| (i.min(j), i.max(j)))
        .collect()
}

/// Finds all the intersecting pairs between `aabbs0` and `aabbs1`.
///
/// See [`BoxPruning::bipartite`] for a version reusing its sorting state.
pub fn bipartite_box_pruning(aabbs0: &[Aabb], aabbs1: &[Aabb], axes: Axes) -> Vec<(u32, u32)> {
    BoxPruning::new().bipartite(aabbs0, aabbs1, axes)
}

/// Finds all the intersecting pairs `(i, j)` with `i < j` among `aabbs`, in `O(n²)`.
pub fn brute_force_complete_box_pruning(aabbs: &[Aabb]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();

    for (i, aabb0) in aabbs.iter().enumerate() {
        for (j, aabb1) in aabbs.iter().enumerate().skip(i + 1) {
            if aabb0.intersects(aabb1) {
                pairs.push((i as u32, j as u32));
            }
        }
    }

    pairs
}

/// Finds all the intersecting pairs between `aabbs0` and `aabbs1`, in `O(n·m)`.
pub fn brute_force_bipartite_box_pruning(aabbs0: &[Aabb], aabbs1: &[Aabb]) -> Vec<(u32, u32)> {
    let mut pairs = Vec::new();

    for (i, aabb0) in aabbs0.iter().enumerate() {
        for (j, aabb1) in aabbs1.iter().enumerate() {
            if aabb0.intersects(aabb1) {
                pairs.push((i as u32, j as u32));
            }
        }
    }

    pairs
}

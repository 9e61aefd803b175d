use super::splitter::Splitter;
use super::{AabbTree, AabbTreeNode, BuildError, BuildSettings, PrimitiveSource};
use crate::bounding_volume::{Aabb, BoundingVolume};
use alloc::vec::Vec;
use core::ops::Range;
use smallvec::SmallVec;

/// A node of an [`ArenaTree`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ArenaNode {
    /// The box bounding the primitives of this node.
    pub aabb: Aabb,
    /// The index of the first child. The second child is at `children + 1`. `0` for leaves.
    pub children: u32,
    /// The first index of this node's range of the tree permutation.
    pub start: u32,
    /// The number of primitives of this node.
    pub count: u32,
}

impl ArenaNode {
    fn new(start: u32, count: u32) -> Self {
        Self {
            aabb: Aabb::new_invalid(),
            children: 0,
            start,
            count,
        }
    }

    /// Is this node a leaf?
    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.children == 0
    }
}

impl AabbTreeNode for ArenaNode {
    #[inline]
    fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    #[inline]
    fn primitive_range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }
}

/// A complete AABB tree stored in a single pre-allocated array of `2N - 1` nodes.
///
/// The root is at index 0, and the children of any node are stored at two consecutive indices
/// greater than the index of their parent.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct ArenaTree {
    nodes: Vec<ArenaNode>,
    permutation: Vec<u32>,
    invalid_splits: u32,
}

impl ArenaTree {
    /// Builds a complete tree on the primitives of `source`.
    ///
    /// The leaf-size limit of `settings` must be 1.
    pub fn new<S: PrimitiveSource + ?Sized>(
        source: &S,
        settings: BuildSettings,
    ) -> Result<Self, BuildError> {
        if settings.limit == 0 {
            return Err(BuildError::ZeroLimit);
        }

        if !settings.is_complete() {
            return Err(BuildError::NotComplete);
        }

        let nb = source.num_primitives();
        if nb == 0 {
            return Err(BuildError::EmptySource);
        }

        let mut permutation: Vec<u32> = (0..nb).collect();
        let mut nodes = Vec::with_capacity(2 * nb as usize - 1);
        nodes.push(ArenaNode::new(0, nb));

        let mut splitter = Splitter::new(source, settings);
        let mut stack: SmallVec<[u32; 32]> = SmallVec::new();
        stack.push(0);

        while let Some(id) = stack.pop() {
            let node = &mut nodes[id as usize];
            let range = node.primitive_range();
            node.aabb = splitter.compute_aabb(&permutation[range.clone()]);
            let aabb = node.aabb;

            if let Some(nb_pos) = splitter.subdivide(&mut permutation[range.clone()], &aabb) {
                let children = nodes.len() as u32;
                nodes[id as usize].children = children;
                nodes.push(ArenaNode::new(range.start as u32, nb_pos as u32));
                nodes.push(ArenaNode::new(
                    (range.start + nb_pos) as u32,
                    (range.len() - nb_pos) as u32,
                ));
                stack.push(children + 1);
                stack.push(children);
            }
        }

        debug_assert_eq!(nodes.len(), 2 * nb as usize - 1);

        let result = Self {
            nodes,
            permutation,
            invalid_splits: splitter.invalid_splits,
        };
        super::log_build_stats(&result);
        Ok(result)
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[ArenaNode] {
        &self.nodes
    }

    /// Recomputes the boxes of all the nodes from the current primitive boxes.
    ///
    /// The source must have the same primitive count as the one this tree was built on.
    pub fn refit<S: PrimitiveSource + ?Sized>(&mut self, source: &S) {
        debug_assert_eq!(source.num_primitives() as usize, self.permutation.len());

        // Children are always stored after their parent.
        for i in (0..self.nodes.len()).rev() {
            let node = self.nodes[i];
            self.nodes[i].aabb = if node.is_leaf() {
                source.compute_aabb(&self.permutation[node.primitive_range()])
            } else {
                let pos = &self.nodes[node.children as usize];
                let neg = &self.nodes[node.children as usize + 1];
                pos.aabb.merged(&neg.aabb)
            };
        }
    }
}

impl AabbTree for ArenaTree {
    type Node = ArenaNode;

    #[inline]
    fn root(&self) -> &ArenaNode {
        &self.nodes[0]
    }

    #[inline]
    fn children<'a>(&'a self, node: &'a ArenaNode) -> Option<[&'a ArenaNode; 2]> {
        if node.is_leaf() {
            None
        } else {
            let i = node.children as usize;
            Some([&self.nodes[i], &self.nodes[i + 1]])
        }
    }

    #[inline]
    fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    #[inline]
    fn node_count(&self) -> u32 {
        self.nodes.len() as u32
    }

    #[inline]
    fn invalid_splits(&self) -> u32 {
        self.invalid_splits
    }
}

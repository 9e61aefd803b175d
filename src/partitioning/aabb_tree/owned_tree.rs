use super::splitter::Splitter;
use super::{AabbTree, AabbTreeNode, BuildError, BuildSettings, PrimitiveSource};
use crate::bounding_volume::{Aabb, BoundingVolume};
use alloc::boxed::Box;
use alloc::vec::Vec;
use core::ops::Range;

/// A node of an [`OwnedTree`], owning its two children.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, PartialEq)]
pub struct OwnedNode {
    /// The box bounding the primitives of this node.
    pub aabb: Aabb,
    /// The first index of this node's range of the tree permutation.
    pub start: u32,
    /// The number of primitives of this node.
    pub count: u32,
    /// The two children of this node, `None` for leaves.
    pub children: Option<Box<[OwnedNode; 2]>>,
}

impl AabbTreeNode for OwnedNode {
    #[inline]
    fn aabb(&self) -> &Aabb {
        &self.aabb
    }

    #[inline]
    fn primitive_range(&self) -> Range<usize> {
        self.start as usize..(self.start + self.count) as usize
    }
}

/// An AABB tree with individually allocated nodes, and any number of primitives per leaf.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct OwnedTree {
    root: OwnedNode,
    permutation: Vec<u32>,
    node_count: u32,
    invalid_splits: u32,
}

impl OwnedTree {
    /// Builds a tree on the primitives of `source`.
    pub fn new<S: PrimitiveSource + ?Sized>(
        source: &S,
        settings: BuildSettings,
    ) -> Result<Self, BuildError> {
        if settings.limit == 0 {
            return Err(BuildError::ZeroLimit);
        }

        let nb = source.num_primitives();
        if nb == 0 {
            return Err(BuildError::EmptySource);
        }

        let mut permutation: Vec<u32> = (0..nb).collect();
        let mut splitter = Splitter::new(source, settings);
        let mut node_count = 0;
        let root = Self::build_node(&mut splitter, &mut permutation, 0, &mut node_count);

        let result = Self {
            root,
            permutation,
            node_count,
            invalid_splits: splitter.invalid_splits,
        };
        super::log_build_stats(&result);
        Ok(result)
    }

    fn build_node<S: PrimitiveSource + ?Sized>(
        splitter: &mut Splitter<S>,
        primitives: &mut [u32],
        start: u32,
        node_count: &mut u32,
    ) -> OwnedNode {
        *node_count += 1;
        let aabb = splitter.compute_aabb(primitives);
        let count = primitives.len() as u32;

        let children = splitter.subdivide(primitives, &aabb).map(|nb_pos| {
            let (pos, neg) = primitives.split_at_mut(nb_pos);
            let pos = Self::build_node(splitter, pos, start, node_count);
            let neg = Self::build_node(splitter, neg, start + nb_pos as u32, node_count);
            Box::new([pos, neg])
        });

        OwnedNode {
            aabb,
            start,
            count,
            children,
        }
    }

    /// Recomputes the boxes of all the nodes from the current primitive boxes.
    ///
    /// The source must have the same primitive count as the one this tree was built on.
    pub fn refit<S: PrimitiveSource + ?Sized>(&mut self, source: &S) {
        debug_assert_eq!(source.num_primitives() as usize, self.permutation.len());
        Self::refit_node(&mut self.root, &self.permutation, source);
    }

    fn refit_node<S: PrimitiveSource + ?Sized>(
        node: &mut OwnedNode,
        permutation: &[u32],
        source: &S,
    ) {
        let range = node.primitive_range();
        node.aabb = match &mut node.children {
            Some(children) => {
                let [pos, neg] = &mut **children;
                Self::refit_node(pos, permutation, source);
                Self::refit_node(neg, permutation, source);
                pos.aabb.merged(&neg.aabb)
            }
            None => source.compute_aabb(&permutation[range]),
        };
    }
}

impl AabbTree for OwnedTree {
    type Node = OwnedNode;

    #[inline]
    fn root(&self) -> &OwnedNode {
        &self.root
    }

    #[inline]
    fn children<'a>(&'a self, node: &'a OwnedNode) -> Option<[&'a OwnedNode; 2]> {
        node.children.as_ref().map(|c| [&c[0], &c[1]])
    }

    #[inline]
    fn permutation(&self) -> &[u32] {
        &self.permutation
    }

    #[inline]
    fn node_count(&self) -> u32 {
        self.node_count
    }

    #[inline]
    fn invalid_splits(&self) -> u32 {
        self.invalid_splits
    }
}

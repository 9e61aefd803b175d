use super::PrimitiveSource;
use crate::bounding_volume::{Aabb, BoundingVolume};
use alloc::vec;
use core::ops::Range;
use smallvec::SmallVec;

/// A node of a generic AABB tree.
pub trait AabbTreeNode {
    /// The box bounding all the primitives of this node.
    fn aabb(&self) -> &Aabb;

    /// The range of the tree permutation holding the primitives of this node.
    fn primitive_range(&self) -> Range<usize>;
}

/// A binary AABB tree produced by the top-down builder.
///
/// The primitives of any node are a contiguous range of a single permutation array owned by the
/// tree. The two children of a node split that range in two consecutive, non-empty, ranges.
pub trait AabbTree {
    /// The node type of this tree.
    type Node: AabbTreeNode;

    /// The root of the tree.
    fn root(&self) -> &Self::Node;

    /// The two children of `node`, or `None` if it is a leaf.
    fn children<'a>(&'a self, node: &'a Self::Node) -> Option<[&'a Self::Node; 2]>;

    /// The primitive ids, reordered so that every node references a contiguous range of it.
    fn permutation(&self) -> &[u32];

    /// The total number of nodes of this tree.
    fn node_count(&self) -> u32;

    /// The number of degenerate splits replaced by an arbitrary 50/50 split during the build.
    fn invalid_splits(&self) -> u32;

    /// The primitives of `node`.
    #[inline]
    fn primitives(&self, node: &Self::Node) -> &[u32] {
        &self.permutation()[node.primitive_range()]
    }

    /// Does every leaf of this tree hold exactly one primitive?
    fn is_complete(&self) -> bool {
        self.node_count() as usize == 2 * self.permutation().len() - 1
    }

    /// Calls `f` on every node with its depth, in depth-first order.
    ///
    /// The root has a depth of 1.
    fn walk<'a>(&'a self, mut f: impl FnMut(&'a Self::Node, u32)) {
        let mut stack: SmallVec<[(&Self::Node, u32); 32]> = SmallVec::new();
        stack.push((self.root(), 1));

        while let Some((node, depth)) = stack.pop() {
            f(node, depth);

            if let Some([pos, neg]) = self.children(node) {
                stack.push((neg, depth + 1));
                stack.push((pos, depth + 1));
            }
        }
    }

    /// The number of nodes on the longest path from the root to a leaf.
    fn depth(&self) -> u32 {
        let mut result = 0;
        self.walk(|_, depth| result = result.max(depth));
        result
    }

    /// The number of leaves of this tree.
    fn leaf_count(&self) -> u32 {
        let mut result = 0;
        self.walk(|node, _| {
            if self.children(node).is_none() {
                result += 1;
            }
        });
        result
    }

    /// Panics if the tree is not well-formed with respect to `source`.
    ///
    /// The tree is well-formed if:
    /// - the permutation references every primitive of the source exactly once;
    /// - the root covers the whole permutation and the children of every node split its range
    ///   in two consecutive, non-empty, ranges;
    /// - the box of every node contains the boxes of its children, and the box of every leaf
    ///   contains the boxes of its primitives;
    /// - the number of reachable nodes matches [`AabbTree::node_count`].
    fn assert_well_formed<S: PrimitiveSource + ?Sized>(&self, source: &S) {
        let permutation = self.permutation();
        assert_eq!(permutation.len(), source.num_primitives() as usize);

        let mut seen = vec![false; permutation.len()];
        for id in permutation {
            assert!(!seen[*id as usize], "primitive {} is referenced twice", id);
            seen[*id as usize] = true;
        }

        assert_eq!(self.root().primitive_range(), 0..permutation.len());

        let mut num_nodes = 0;
        self.walk(|node, _| {
            num_nodes += 1;
            let range = node.primitive_range();
            assert!(!range.is_empty());

            if let Some([pos, neg]) = self.children(node) {
                let pos_range = pos.primitive_range();
                let neg_range = neg.primitive_range();
                assert_eq!(pos_range.start, range.start);
                assert_eq!(pos_range.end, neg_range.start);
                assert_eq!(neg_range.end, range.end);
                assert!(node.aabb().contains(pos.aabb()));
                assert!(node.aabb().contains(neg.aabb()));
            } else {
                for id in &permutation[range] {
                    assert!(node.aabb().contains(&source.primitive_aabb(*id)));
                }
            }
        });

        assert_eq!(num_nodes, self.node_count());
    }
}

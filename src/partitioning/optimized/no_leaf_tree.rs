use super::{Child, NodeContent, OptimizedTree};
use crate::bounding_volume::{Aabb, BoundingVolume};
use crate::partitioning::aabb_tree::{AabbTree, AabbTreeNode, BuildError, PrimitiveSource};
use alloc::vec::Vec;
use smallvec::SmallVec;

/// A node of a [`NoLeafTree`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct NoLeafNode {
    /// The box bounding this node.
    pub aabb: Aabb,
    /// The two children of this node.
    pub children: [Child; 2],
}

/// A complete tree where single-primitive leaves are stored inline in their parent.
///
/// A tree over `N ≥ 2` primitives has exactly `N - 1` nodes, all of them internal.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct NoLeafTree {
    nodes: Vec<NoLeafNode>,
}

impl NoLeafTree {
    /// Emits the no-leaf layout of a complete tree over at least two primitives.
    pub fn new<T: AabbTree + ?Sized>(tree: &T) -> Result<Self, BuildError> {
        if !tree.is_complete() {
            return Err(BuildError::NotComplete);
        }

        if tree.permutation().len() < 2 {
            return Err(BuildError::SinglePrimitive);
        }

        let mut nodes: Vec<NoLeafNode> = Vec::with_capacity(tree.permutation().len() - 1);
        nodes.push(NoLeafNode {
            aabb: *tree.root().aabb(),
            children: [Child::Primitive(0); 2],
        });

        let mut stack: SmallVec<[(&T::Node, usize); 32]> = SmallVec::new();
        stack.push((tree.root(), 0));

        while let Some((node, id)) = stack.pop() {
            let Some(children) = tree.children(node) else {
                continue;
            };

            for (k, child) in children.into_iter().enumerate() {
                nodes[id].children[k] = if tree.children(child).is_some() {
                    let child_id = nodes.len();
                    nodes.push(NoLeafNode {
                        aabb: *child.aabb(),
                        children: [Child::Primitive(0); 2],
                    });
                    stack.push((child, child_id));
                    Child::Offset(child_id as u32)
                } else {
                    Child::Primitive(tree.primitives(child)[0])
                };
            }
        }

        Ok(Self { nodes })
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[NoLeafNode] {
        &self.nodes
    }

    /// Recomputes the node boxes from the current primitive boxes, without changing the
    /// topology of the tree.
    pub fn refit<S: PrimitiveSource + ?Sized>(&mut self, source: &S) {
        debug_assert_eq!(source.num_primitives(), self.num_primitives());

        // Children are always stored after their parent.
        for i in (0..self.nodes.len()).rev() {
            let [pos, neg] = self.nodes[i].children;
            let child_aabb = |child: Child| match child {
                Child::Primitive(prim) => source.primitive_aabb(prim),
                Child::Offset(id) => self.nodes[id as usize].aabb,
            };
            let aabb = child_aabb(pos).merged(&child_aabb(neg));
            self.nodes[i].aabb = aabb;
        }
    }
}

impl OptimizedTree for NoLeafTree {
    #[inline]
    fn num_nodes(&self) -> u32 {
        self.nodes.len() as u32
    }

    #[inline]
    fn num_primitives(&self) -> u32 {
        self.nodes.len() as u32 + 1
    }

    #[inline]
    fn node_aabb(&self, id: u32) -> Aabb {
        self.nodes[id as usize].aabb
    }

    #[inline]
    fn node_content(&self, id: u32) -> NodeContent {
        NodeContent::Branch(self.nodes[id as usize].children)
    }
}

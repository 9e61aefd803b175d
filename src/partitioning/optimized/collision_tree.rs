use super::{Child, NodeContent, OptimizedTree};
use crate::bounding_volume::Aabb;
use crate::partitioning::aabb_tree::{AabbTree, AabbTreeNode, BuildError};
use alloc::vec::Vec;
use smallvec::SmallVec;

/// A node of a [`CollisionTree`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CollisionNode {
    /// The box bounding this node.
    pub aabb: Aabb,
    /// The primitive of this node if it is a leaf, or the index of its first child. The second
    /// child is stored right after the first one.
    pub data: Child,
}

/// A complete tree with `2N - 1` nodes, every leaf holding one primitive.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct CollisionTree {
    nodes: Vec<CollisionNode>,
}

impl CollisionTree {
    /// Emits the full-node layout of a complete tree.
    pub fn new<T: AabbTree + ?Sized>(tree: &T) -> Result<Self, BuildError> {
        if !tree.is_complete() {
            return Err(BuildError::NotComplete);
        }

        let mut nodes = Vec::with_capacity(tree.node_count() as usize);
        nodes.push(CollisionNode {
            aabb: *tree.root().aabb(),
            data: Child::Primitive(0),
        });

        let mut stack: SmallVec<[(&T::Node, usize); 32]> = SmallVec::new();
        stack.push((tree.root(), 0));

        while let Some((node, id)) = stack.pop() {
            nodes[id].data = match tree.children(node) {
                Some([pos, neg]) => {
                    let first = nodes.len();
                    for child in [pos, neg] {
                        nodes.push(CollisionNode {
                            aabb: *child.aabb(),
                            data: Child::Primitive(0),
                        });
                    }
                    stack.push((neg, first + 1));
                    stack.push((pos, first));
                    Child::Offset(first as u32)
                }
                None => Child::Primitive(tree.primitives(node)[0]),
            };
        }

        Ok(Self { nodes })
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[CollisionNode] {
        &self.nodes
    }
}

impl OptimizedTree for CollisionTree {
    #[inline]
    fn num_nodes(&self) -> u32 {
        self.nodes.len() as u32
    }

    #[inline]
    fn num_primitives(&self) -> u32 {
        (self.nodes.len() as u32).div_ceil(2)
    }

    #[inline]
    fn node_aabb(&self, id: u32) -> Aabb {
        self.nodes[id as usize].aabb
    }

    #[inline]
    fn node_content(&self, id: u32) -> NodeContent {
        match self.nodes[id as usize].data {
            Child::Primitive(prim) => NodeContent::Leaf(prim),
            Child::Offset(first) => {
                NodeContent::Branch([Child::Offset(first), Child::Offset(first + 1)])
            }
        }
    }
}

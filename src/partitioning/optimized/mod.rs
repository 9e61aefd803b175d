//! Compact node layouts emitted from a complete AABB tree, and used by queries.
//!
//! All these layouts store the root at index 0 and the children of a node at indices greater
//! than the index of the node itself.

pub use self::collision_tree::{CollisionNode, CollisionTree};
pub use self::no_leaf_tree::{NoLeafNode, NoLeafTree};
pub use self::quantization::{Dequantization, QuantizedBox};
pub use self::quantized_tree::{
    QuantizedNoLeafNode, QuantizedNoLeafTree, QuantizedNode, QuantizedTree,
};

use crate::bounding_volume::Aabb;
use smallvec::SmallVec;

mod collision_tree;
mod no_leaf_tree;
mod quantization;
mod quantized_tree;


/// A reference from a node to one of its children.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Child {
    /// The child is the node stored at this index.
    Offset(u32),
    /// The child is a single primitive, stored inline instead of in a leaf node.
    Primitive(u32),
}

/// What a node holds besides its bounding box.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NodeContent {
    /// A leaf containing a single primitive.
    Leaf(u32),
    /// An internal node with its two children.
    Branch([Child; 2]),
}

/// A read-only tree layout suitable for queries.
pub trait OptimizedTree {
    /// The number of nodes of this tree.
    fn num_nodes(&self) -> u32;

    /// The number of primitives referenced by this tree.
    fn num_primitives(&self) -> u32;

    /// The (dequantized) bounding box of the node `id`.
    fn node_aabb(&self, id: u32) -> Aabb;

    /// The content of the node `id`.
    fn node_content(&self, id: u32) -> NodeContent;

    /// The box bounding the whole tree.
    #[inline]
    fn root_aabb(&self) -> Aabb {
        self.node_aabb(0)
    }

    /// Calls `f` on every primitive of the subtree rooted at `child`.
    fn for_each_primitive(&self, child: Child, mut f: impl FnMut(u32)) {
        let mut stack: SmallVec<[Child; 32]> = SmallVec::new();
        stack.push(child);

        while let Some(child) = stack.pop() {
            match child {
                Child::Primitive(prim) => f(prim),
                Child::Offset(id) => match self.node_content(id) {
                    NodeContent::Leaf(prim) => f(prim),
                    NodeContent::Branch([pos, neg]) => {
                        stack.push(neg);
                        stack.push(pos);
                    }
                },
            }
        }
    }
}

use super::{
    Child, CollisionTree, Dequantization, NoLeafTree, NodeContent, OptimizedTree, QuantizedBox,
};
use crate::bounding_volume::Aabb;
use crate::partitioning::aabb_tree::{AabbTree, BuildError};
use alloc::vec::Vec;

/// A node of a [`QuantizedTree`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantizedNode {
    /// The compressed box bounding this node.
    pub qbox: QuantizedBox,
    /// The primitive of this node if it is a leaf, or the index of its first child.
    pub data: Child,
}

/// A [`CollisionTree`] with compressed node boxes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct QuantizedTree {
    nodes: Vec<QuantizedNode>,
    dequantization: Dequantization,
}

impl QuantizedTree {
    /// Emits the quantized full-node layout of a complete tree.
    pub fn new<T: AabbTree + ?Sized>(tree: &T) -> Result<Self, BuildError> {
        Ok(Self::from_collision_tree(&CollisionTree::new(tree)?))
    }

    /// Compresses the boxes of a [`CollisionTree`].
    pub fn from_collision_tree(tree: &CollisionTree) -> Self {
        let dequantization = Dequantization::new(tree.nodes().iter().map(|n| &n.aabb));
        let nodes = tree
            .nodes()
            .iter()
            .map(|n| QuantizedNode {
                qbox: dequantization.encode(&n.aabb),
                data: n.data,
            })
            .collect();

        Self {
            nodes,
            dequantization,
        }
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[QuantizedNode] {
        &self.nodes
    }

    /// The coefficients used to decode the node boxes.
    #[inline]
    pub fn dequantization(&self) -> &Dequantization {
        &self.dequantization
    }
}

impl OptimizedTree for QuantizedTree {
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
        self.dequantization.decode(&self.nodes[id as usize].qbox)
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

/// A node of a [`QuantizedNoLeafTree`].
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantizedNoLeafNode {
    /// The compressed box bounding this node.
    pub qbox: QuantizedBox,
    /// The two children of this node.
    pub children: [Child; 2],
}

/// A [`NoLeafTree`] with compressed node boxes.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug, Default)]
pub struct QuantizedNoLeafTree {
    nodes: Vec<QuantizedNoLeafNode>,
    dequantization: Dequantization,
}

impl QuantizedNoLeafTree {
    /// Emits the quantized no-leaf layout of a complete tree over at least two primitives.
    pub fn new<T: AabbTree + ?Sized>(tree: &T) -> Result<Self, BuildError> {
        Ok(Self::from_no_leaf_tree(&NoLeafTree::new(tree)?))
    }

    /// Compresses the boxes of a [`NoLeafTree`].
    pub fn from_no_leaf_tree(tree: &NoLeafTree) -> Self {
        let dequantization = Dequantization::new(tree.nodes().iter().map(|n| &n.aabb));
        let nodes = tree
            .nodes()
            .iter()
            .map(|n| QuantizedNoLeafNode {
                qbox: dequantization.encode(&n.aabb),
                children: n.children,
            })
            .collect();

        Self {
            nodes,
            dequantization,
        }
    }

    /// The nodes of this tree. The root is the first one.
    #[inline]
    pub fn nodes(&self) -> &[QuantizedNoLeafNode] {
        &self.nodes
    }

    /// The coefficients used to decode the node boxes.
    #[inline]
    pub fn dequantization(&self) -> &Dequantization {
        &self.dequantization
    }
}

impl OptimizedTree for QuantizedNoLeafTree {
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
        self.dequantization.decode(&self.nodes[id as usize].qbox)
    }

    #[inline]
    fn node_content(&self, id: u32) -> NodeContent {
        NodeContent::Branch(self.nodes[id as usize].children)
    }
}

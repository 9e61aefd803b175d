//! Spatial partitioning tools.

pub use self::aabb_tree::{
    AabbSource, AabbTree, AabbTreeNode, ArenaNode, ArenaTree, BuildError, BuildSettings,
    OwnedNode, OwnedTree, PrimitiveSource, SplitRule, TriangleSource, VertexSource,
};
pub use self::box_pruning::{
    bipartite_box_pruning, brute_force_bipartite_box_pruning, brute_force_complete_box_pruning,
    complete_box_pruning, Axes, BoxPruning,
};
pub use self::optimized::{
    Child, CollisionNode, CollisionTree, Dequantization, NoLeafNode, NoLeafTree, NodeContent,
    OptimizedTree, QuantizedBox, QuantizedNoLeafNode, QuantizedNoLeafTree, QuantizedNode,
    QuantizedTree,
};

mod aabb_tree;
mod box_pruning;
mod optimized;

//! Top-down construction of binary AABB trees.

pub use self::aabb_tree::{AabbTree, AabbTreeNode};
pub use self::arena_tree::{ArenaNode, ArenaTree};
pub use self::build_settings::{BuildError, BuildSettings, SplitRule};
pub use self::owned_tree::{OwnedNode, OwnedTree};
pub use self::primitive_source::{AabbSource, PrimitiveSource, TriangleSource, VertexSource};

mod aabb_tree;
mod arena_tree;
mod build_settings;
mod owned_tree;
mod primitive_source;
mod splitter;


fn log_build_stats(tree: &impl AabbTree) {
    log::debug!(
        "built an AABB tree over {} primitives: {} nodes, depth {}, {} invalid splits",
        tree.permutation().len(),
        tree.node_count(),
        tree.depth(),
        tree.invalid_splits()
    );

    if tree.invalid_splits() != 0 {
        log::warn!(
            "{} degenerate splits were forced to 50/50 to bound the leaf size",
            tree.invalid_splits()
        );
    }
}

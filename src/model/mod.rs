//! Collision models: optimized trees built over the triangles of a mesh.

/// Evaluates `$body` with `$tree` bound to the concrete tree layout of a [`ModelTree`].
///
/// This lets generic code be monomorphized once per layout instead of dispatching on every
/// node access.
macro_rules! with_model_tree {
    ($model_tree: expr, |$tree: ident| $body: expr) => {
        match $model_tree {
            $crate::model::ModelTree::Collision($tree) => $body,
            $crate::model::ModelTree::NoLeaf($tree) => $body,
            $crate::model::ModelTree::Quantized($tree) => $body,
            $crate::model::ModelTree::QuantizedNoLeaf($tree) => $body,
        }
    };
}

pub(crate) use with_model_tree;

pub use self::hybrid_model::{HybridModel, LeafTriangles};
pub use self::model::{Model, ModelTree};
pub use self::model_settings::{ModelError, ModelSettings};

mod hybrid_model;
mod model;
mod model_settings;

use super::{ModelError, ModelSettings};
use crate::mesh::MeshInterface;
use crate::partitioning::{
    ArenaTree, BuildError, CollisionTree, NoLeafTree, OptimizedTree, QuantizedNoLeafTree,
    QuantizedTree, TriangleSource,
};

/// One of the four optimized tree layouts.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub enum ModelTree {
    /// Full nodes.
    Collision(CollisionTree),
    /// No-leaf nodes.
    NoLeaf(NoLeafTree),
    /// Quantized full nodes.
    Quantized(QuantizedTree),
    /// Quantized no-leaf nodes.
    QuantizedNoLeaf(QuantizedNoLeafTree),
}

impl ModelTree {
    /// Emits the selected layout of a complete tree.
    pub fn new(tree: &ArenaTree, no_leaf: bool, quantized: bool) -> Result<Self, BuildError> {
        let result = match (no_leaf, quantized) {
            (false, false) => ModelTree::Collision(CollisionTree::new(tree)?),
            (true, false) => ModelTree::NoLeaf(NoLeafTree::new(tree)?),
            (false, true) => ModelTree::Quantized(QuantizedTree::new(tree)?),
            (true, true) => ModelTree::QuantizedNoLeaf(QuantizedNoLeafTree::new(tree)?),
        };
        Ok(result)
    }

    /// The number of nodes of this tree.
    pub fn num_nodes(&self) -> u32 {
        with_model_tree!(self, |tree| tree.num_nodes())
    }

    /// Are the node boxes of this tree quantized?
    pub fn is_quantized(&self) -> bool {
        matches!(
            self,
            ModelTree::Quantized(_) | ModelTree::QuantizedNoLeaf(_)
        )
    }

    /// Does this tree store single-primitive leaves as separate nodes?
    pub fn has_leaf_nodes(&self) -> bool {
        matches!(self, ModelTree::Collision(_) | ModelTree::Quantized(_))
    }
}

/// A collision model over the triangles of a mesh.
///
/// The model does not keep a reference to the mesh: every query and refit takes the mesh the
/// model was built on as an argument. Passing another mesh, or the same mesh with a different
/// triangle count, is a logic error.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Clone, Debug)]
pub struct Model {
    tree: Option<ModelTree>,
    source: Option<ArenaTree>,
    num_primitives: u32,
}

impl Model {
    /// Builds a model over all the triangles of `mesh`.
    ///
    /// The builder settings must describe a complete tree (a leaf-size limit of 1). A mesh with a
    /// single triangle does not need any tree: queries then test that triangle directly.
    pub fn build<M: MeshInterface + ?Sized>(
        mesh: &M,
        settings: &ModelSettings,
    ) -> Result<Self, ModelError> {
        if settings.build.limit == 0 {
            return Err(BuildError::ZeroLimit.into());
        }

        if !settings.build.is_complete() {
            return Err(BuildError::NotComplete.into());
        }

        let num_primitives = mesh.num_triangles();

        match num_primitives {
            0 => Err(BuildError::EmptySource.into()),
            1 => Ok(Self {
                tree: None,
                source: None,
                num_primitives,
            }),
            _ => {
                let source = ArenaTree::new(&TriangleSource::new(mesh), settings.build)?;
                let tree = ModelTree::new(&source, settings.no_leaf, settings.quantized)?;

                Ok(Self {
                    tree: Some(tree),
                    source: settings.keep_original.then_some(source),
                    num_primitives,
                })
            }
        }
    }

    /// The optimized tree of this model, `None` if the model has a single triangle.
    #[inline]
    pub fn tree(&self) -> Option<&ModelTree> {
        self.tree.as_ref()
    }

    /// The generic tree the optimized tree was emitted from, if it was kept.
    #[inline]
    pub fn source_tree(&self) -> Option<&ArenaTree> {
        self.source.as_ref()
    }

    /// The number of triangles of this model.
    #[inline]
    pub fn num_primitives(&self) -> u32 {
        self.num_primitives
    }

    /// Is this a model of a single triangle, without any tree?
    #[inline]
    pub fn has_single_node(&self) -> bool {
        self.tree.is_none()
    }

    /// The number of nodes of this model.
    pub fn num_nodes(&self) -> u32 {
        self.tree.as_ref().map(|t| t.num_nodes()).unwrap_or(1)
    }

    /// Updates the node boxes after the vertices of `mesh` moved.
    ///
    /// The triangle count and vertex indices of the mesh must not have changed since the model
    /// was built. Only models with a non-quantized no-leaf tree can be refitted.
    pub fn refit<M: MeshInterface + ?Sized>(&mut self, mesh: &M) -> Result<(), ModelError> {
        debug_assert_eq!(mesh.num_triangles(), self.num_primitives);
        let source = TriangleSource::new(mesh);

        match &mut self.tree {
            None => {}
            Some(ModelTree::NoLeaf(tree)) => tree.refit(&source),
            Some(_) => return Err(ModelError::NotRefittable),
        }

        if let Some(original) = &mut self.source {
            original.refit(&source);
        }

        Ok(())
    }
}

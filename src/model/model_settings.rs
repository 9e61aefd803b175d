use crate::partitioning::{BuildError, BuildSettings};

/// Parameters of the construction of a [`Model`](super::Model) or a
/// [`HybridModel`](super::HybridModel).
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ModelSettings {
    /// The settings of the tree builder. The leaf-size limit must be 1 for a [`Model`](super::Model),
    /// and is ignored by a [`HybridModel`](super::HybridModel).
    pub build: BuildSettings,
    /// Store single-primitive leaves inline in their parent node.
    pub no_leaf: bool,
    /// Compress the node boxes to 16 bits per axis.
    pub quantized: bool,
    /// Keep the generic tree the optimized one was emitted from.
    pub keep_original: bool,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            build: BuildSettings::default(),
            no_leaf: true,
            quantized: true,
            keep_original: false,
        }
    }
}

impl ModelSettings {
    /// Sets the settings of the tree builder.
    #[must_use]
    pub fn with_build_settings(mut self, build: BuildSettings) -> Self {
        self.build = build;
        self
    }

    /// Enables or disables the no-leaf layout.
    #[must_use]
    pub fn with_no_leaf(mut self, no_leaf: bool) -> Self {
        self.no_leaf = no_leaf;
        self
    }

    /// Enables or disables the quantization of node boxes.
    #[must_use]
    pub fn with_quantized(mut self, quantized: bool) -> Self {
        self.quantized = quantized;
        self
    }

    /// Enables or disables keeping the generic tree.
    #[must_use]
    pub fn with_keep_original(mut self, keep_original: bool) -> Self {
        self.keep_original = keep_original;
        self
    }
}

/// Error indicating that a model could not be built or updated.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum ModelError {
    /// The tree could not be built.
    #[error(transparent)]
    Build(#[from] BuildError),
    /// Only models with a non-quantized no-leaf tree can be refitted.
    #[error("only models with a non-quantized no-leaf tree can be refitted.")]
    NotRefittable,
}

/// The heuristic used to choose how a node is split in two.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum SplitRule {
    /// Split along the axis with the largest node extent.
    LargestAxis,
    /// Split along the axis with the largest variance of the primitive split values.
    #[default]
    SplatterPoints,
    /// Try the axes by decreasing node extent until one of them splits the node.
    BestAxis,
    /// Split along the axis that divides the primitives into the two most equal halves.
    Balanced,
    /// Split the primitive range in two halves, ignoring positions.
    Fifty,
}

/// Parameters of the top-down construction of an AABB tree.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct BuildSettings {
    /// The maximum number of primitives per leaf.
    ///
    /// A limit of `1` builds a complete tree: a split that fails to separate the primitives is
    /// then replaced by an arbitrary 50/50 split and counted as an invalid split.
    pub limit: u32,
    /// The splitting heuristic.
    pub rule: SplitRule,
    /// Split at the mean split value of the node primitives instead of the node box center.
    pub geom_center: bool,
    /// Never let a leaf hold more than `limit` primitives.
    ///
    /// A node that cannot be split and still holds more than `limit` primitives is then split
    /// 50/50 and counted as an invalid split, as in a complete tree. Otherwise, such a node stays
    /// a leaf whatever its size.
    pub bounded_leaves: bool,
}

impl Default for BuildSettings {
    fn default() -> Self {
        Self {
            limit: 1,
            rule: SplitRule::SplatterPoints,
            geom_center: true,
            bounded_leaves: false,
        }
    }
}

impl BuildSettings {
    /// Settings for a tree with at most `limit` primitives per leaf.
    pub fn new(limit: u32, rule: SplitRule) -> Self {
        Self {
            limit,
            rule,
            geom_center: false,
            bounded_leaves: false,
        }
    }

    /// Sets the maximum number of primitives per leaf.
    #[must_use]
    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Sets the splitting heuristic.
    #[must_use]
    pub fn with_rule(mut self, rule: SplitRule) -> Self {
        self.rule = rule;
        self
    }

    /// Enables or disables splitting at the mean split value.
    #[must_use]
    pub fn with_geom_center(mut self, geom_center: bool) -> Self {
        self.geom_center = geom_center;
        self
    }

    /// Enables or disables forced splits of oversized leaves.
    #[must_use]
    pub fn with_bounded_leaves(mut self, bounded_leaves: bool) -> Self {
        self.bounded_leaves = bounded_leaves;
        self
    }

    /// Do these settings guarantee at most `limit` primitives per leaf?
    #[inline]
    pub fn has_bounded_leaves(&self) -> bool {
        self.bounded_leaves || self.is_complete()
    }

    /// Do these settings produce complete trees, i.e. one primitive per leaf?
    #[inline]
    pub fn is_complete(&self) -> bool {
        self.limit == 1
    }
}

/// Error indicating that a tree could not be built.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A tree must contain at least one primitive.
    #[error("cannot build a tree without any primitive.")]
    EmptySource,
    /// The leaf-size limit must be at least one.
    #[error("the maximum number of primitives per leaf must be at least 1.")]
    ZeroLimit,
    /// A complete tree (one primitive per leaf) was required.
    #[error("this operation requires a complete tree, i.e., a leaf-size limit of 1.")]
    NotComplete,
    /// The operation requires at least two primitives.
    #[error("this operation requires at least two primitives.")]
    SinglePrimitive,
}

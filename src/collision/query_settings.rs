use bitflags::bitflags;

bitflags! {
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    /// Flags controlling the behavior of a collision query.
    pub struct QueryFlags: u8 {
        /// Stop the query as soon as one primitive is found touching the query volume.
        const FIRST_CONTACT = 1 << 0;
        /// Reuse the result of the previous query stored in the cache when possible.
        const TEMPORAL_COHERENCE = 1 << 1;
        /// Report the primitives of every node touching the query volume, without testing the
        /// actual primitives.
        const SKIP_PRIMITIVE_TESTS = 1 << 2;
    }
}

bitflags! {
    #[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
    #[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
    /// The outcome of a collision query.
    pub struct ContactStatus: u8 {
        /// At least one contact was found.
        const CONTACT = 1 << 0;
        /// The contacts were found by checking the result cached by the previous query,
        /// without traversing the tree.
        const TEMPORAL_CONTACT = 1 << 1;
    }
}

/// Statistics about the work performed by a collision query.
#[cfg_attr(feature = "serde-serialize", derive(Serialize, Deserialize))]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct QueryStats {
    /// Did the query find any contact, and how?
    pub status: ContactStatus,
    /// The number of query volume vs. node box tests.
    pub nb_bv_tests: u32,
    /// The number of query volume vs. primitive tests.
    pub nb_prim_tests: u32,
    /// The number of node box vs. primitive tests (tree vs. tree queries only).
    pub nb_bv_prim_tests: u32,
}

impl QueryStats {
    /// Did the query find at least one contact?
    #[inline]
    pub fn contact(&self) -> bool {
        !self.status.is_empty()
    }

    /// Was the result provided by the temporal coherence cache?
    #[inline]
    pub fn temporal_contact(&self) -> bool {
        self.status.contains(ContactStatus::TEMPORAL_CONTACT)
    }
}

/// Error indicating an invalid collider configuration.
#[derive(thiserror::Error, Copy, Clone, Debug, PartialEq, Eq)]
pub enum SettingsError {
    /// This query only caches the first contact found.
    #[error("temporal coherence on this query requires the first contact mode.")]
    TemporalCoherenceRequiresFirstContact,
    /// The closest hit is only known after all the hits were found.
    #[error("the closest hit mode is incompatible with the first contact mode.")]
    ClosestHitWithFirstContact,
    /// A cached hit is not guaranteed to be the closest one.
    #[error("the closest hit mode is incompatible with temporal coherence.")]
    ClosestHitWithTemporalCoherence,
    /// The maximum distance of a ray must not be negative.
    #[error("the maximum ray distance must be positive.")]
    NegativeMaxDistance,
    /// Ray and tree-tree queries always test the primitives.
    #[error("this query cannot skip primitive tests.")]
    PrimitiveTestsRequired,
    /// A plane set exceeds the supported number of planes.
    #[error("a plane set contains at most {0} planes.")]
    TooManyPlanes(usize),
}

/// Errors reported by [`OpeningPlayer`](crate::OpeningPlayer).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayerError {
    /// No configured opening has this name.
    #[display("unknown opening: {name:?}")]
    UnknownOpening {
        /// The requested name.
        name: String,
    },
    /// The operation needs a selected opening.
    #[display("no opening selected")]
    NoOpeningSelected,
}

/// Errors reported by [`DrillEngine`](crate::DrillEngine).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DrillError {
    /// The requested drill does not exist.
    #[display("drill {index} out of range (have {len})")]
    DrillIndexOutOfRange {
        /// The requested index.
        index: usize,
        /// Number of configured drills.
        len: usize,
    },
    /// An answer was submitted before any drill was loaded.
    #[display("no drill loaded")]
    NoDrillLoaded,
}

use std::{io, path::PathBuf};

use chessunlocked_core::MalformedBoardError;

/// Errors found while building an [`Opening`](crate::Opening).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum OpeningDefinitionError {
    /// The opening has no steps.
    #[display("opening has no steps")]
    NoSteps,
    /// A step's board is not a valid 8×8 board.
    #[display("step {step}: {source}")]
    Board {
        /// Zero-based step index.
        step: usize,
        /// The board error.
        source: MalformedBoardError,
    },
}

/// Errors found while building a [`DrillQuestion`](crate::DrillQuestion).
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum DrillDefinitionError {
    /// The drill's board is not a valid 8×8 board.
    #[display("{_0}")]
    Board(MalformedBoardError),
    /// Fewer than two options were given.
    #[display("drill needs at least 2 options, found {count}")]
    TooFewOptions {
        /// Number of options given.
        count: usize,
    },
    /// The same option string appears twice.
    #[display("duplicate option {option:?}")]
    DuplicateOption {
        /// The repeated option.
        option: String,
    },
    /// The answer does not match any option exactly.
    #[display("answer {answer:?} is not one of the options")]
    AnswerNotInOptions {
        /// The stored answer.
        answer: String,
    },
}

/// Errors that make a catalog unusable.
///
/// These are fatal at startup: a catalog that fails to load has no safe
/// default.
#[derive(Debug, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum ConfigError {
    /// The catalog file could not be read.
    #[display("failed to read catalog {}: {source}", path.display())]
    #[from(ignore)]
    Io {
        /// Path of the catalog file.
        path: PathBuf,
        /// The I/O error.
        source: io::Error,
    },
    /// The catalog is not valid JSON or does not match the expected shape.
    #[display("invalid catalog JSON: {_0}")]
    Json(serde_json::Error),
    /// An opening entry is invalid.
    #[display("opening {name:?}: {source}")]
    #[from(ignore)]
    Opening {
        /// Name of the opening.
        name: String,
        /// What is wrong with it.
        source: OpeningDefinitionError,
    },
    /// Two openings share a name.
    #[display("duplicate opening name {name:?}")]
    #[from(ignore)]
    DuplicateOpening {
        /// The repeated name.
        name: String,
    },
    /// A drill entry is invalid.
    #[display("drill #{index}: {source}")]
    #[from(ignore)]
    Drill {
        /// Zero-based drill index.
        index: usize,
        /// What is wrong with it.
        source: DrillDefinitionError,
    },
}

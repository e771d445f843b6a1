use chessunlocked_core::BoardState;

use crate::OpeningDefinitionError;

/// One position in an opening sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpeningStep {
    board: BoardState,
    move_label: String,
    position_name: Option<String>,
}

impl OpeningStep {
    /// Creates a step from a board and the move that produced it.
    #[must_use]
    pub fn new(board: BoardState, move_label: impl Into<String>) -> Self {
        Self {
            board,
            move_label: move_label.into(),
            position_name: None,
        }
    }

    /// Attaches a human-readable position name (e.g. `Starting Position`).
    #[must_use]
    pub fn with_position_name(mut self, name: impl Into<String>) -> Self {
        self.position_name = Some(name.into());
        self
    }

    /// Returns the board at this step.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the move label, e.g. `1.e4` or `1...e5`.
    #[must_use]
    pub fn move_label(&self) -> &str {
        &self.move_label
    }

    /// Returns the position name, if one was authored.
    #[must_use]
    pub fn position_name(&self) -> Option<&str> {
        self.position_name.as_deref()
    }

    /// Returns the text shown under the board for this step.
    ///
    /// The position name wins over the move label when both exist.
    #[must_use]
    pub fn display_label(&self) -> &str {
        self.position_name().unwrap_or(&self.move_label)
    }
}

/// A named, non-empty sequence of steps played back in order.
///
/// # Examples
///
/// ```
/// use chessunlocked_catalog::{Opening, OpeningStep};
/// use chessunlocked_core::BoardState;
///
/// let opening = Opening::new(
///     "Ruy Lopez",
///     vec![OpeningStep::new(BoardState::starting_position(), "Start")
///         .with_position_name("Starting Position")],
/// )
/// .unwrap();
/// assert_eq!(opening.len(), 1);
///
/// assert!(Opening::new("Empty", vec![]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Opening {
    name: String,
    steps: Vec<OpeningStep>,
}

impl Opening {
    /// Creates an opening.
    ///
    /// # Errors
    ///
    /// Returns [`OpeningDefinitionError::NoSteps`] if `steps` is empty.
    pub fn new(
        name: impl Into<String>,
        steps: Vec<OpeningStep>,
    ) -> Result<Self, OpeningDefinitionError> {
        if steps.is_empty() {
            return Err(OpeningDefinitionError::NoSteps);
        }
        Ok(Self {
            name: name.into(),
            steps,
        })
    }

    /// Returns the opening name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the steps in playback order.
    #[must_use]
    pub fn steps(&self) -> &[OpeningStep] {
        &self.steps
    }

    /// Returns the step at `index`.
    #[must_use]
    pub fn step(&self, index: usize) -> Option<&OpeningStep> {
        self.steps.get(index)
    }

    /// Returns the number of steps (always at least 1).
    #[must_use]
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    /// Returns the index of the final step.
    #[must_use]
    pub fn last_index(&self) -> usize {
        self.steps.len() - 1
    }
}

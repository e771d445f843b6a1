use chessunlocked_core::BoardState;

use crate::DrillDefinitionError;

/// A static position with a multiple-choice question.
///
/// The answer is authored ground truth and always equals exactly one option.
///
/// # Examples
///
/// ```
/// use chessunlocked_catalog::{DrillDefinitionError, DrillQuestion};
/// use chessunlocked_core::BoardState;
///
/// let drill = DrillQuestion::new(
///     BoardState::starting_position(),
///     "White to move. Best first move?",
///     ["Nf3", "Bb5", "d4"],
///     "Bb5",
/// )
/// .unwrap();
/// assert!(drill.is_answer("Bb5"));
/// assert!(!drill.is_answer("bb5"));
///
/// let err = DrillQuestion::new(BoardState::empty(), "?", ["a", "b"], "c").unwrap_err();
/// assert!(matches!(err, DrillDefinitionError::AnswerNotInOptions { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DrillQuestion {
    board: BoardState,
    prompt: String,
    options: Vec<String>,
    answer: String,
    opening: Option<String>,
}

impl DrillQuestion {
    /// Creates a drill question.
    ///
    /// # Errors
    ///
    /// Returns [`DrillDefinitionError`] if there are fewer than two options,
    /// an option repeats, or `answer` is not one of the options.
    pub fn new<I, S>(
        board: BoardState,
        prompt: impl Into<String>,
        options: I,
        answer: impl Into<String>,
    ) -> Result<Self, DrillDefinitionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let options: Vec<String> = options.into_iter().map(Into::into).collect();
        let answer = answer.into();

        if options.len() < 2 {
            return Err(DrillDefinitionError::TooFewOptions {
                count: options.len(),
            });
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].contains(option) {
                return Err(DrillDefinitionError::DuplicateOption {
                    option: option.clone(),
                });
            }
        }
        if !options.contains(&answer) {
            return Err(DrillDefinitionError::AnswerNotInOptions { answer });
        }

        Ok(Self {
            board,
            prompt: prompt.into(),
            options,
            answer,
            opening: None,
        })
    }

    /// Records the opening this position comes from.
    #[must_use]
    pub fn with_opening(mut self, opening: impl Into<String>) -> Self {
        self.opening = Some(opening.into());
        self
    }

    /// Returns the drill position.
    #[must_use]
    pub fn board(&self) -> &BoardState {
        &self.board
    }

    /// Returns the question text.
    #[must_use]
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Returns the options in authored order.
    #[must_use]
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Returns the stored answer.
    #[must_use]
    pub fn answer(&self) -> &str {
        &self.answer
    }

    /// Returns the opening name, if one was authored.
    #[must_use]
    pub fn opening(&self) -> Option<&str> {
        self.opening.as_deref()
    }

    /// Returns `true` iff `selected` equals the answer exactly (case-sensitive).
    #[must_use]
    pub fn is_answer(&self, selected: &str) -> bool {
        self.answer == selected
    }
}

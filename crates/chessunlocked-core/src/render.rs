//! Board rendering.
//!
//! [`render`] is a pure function from a [`BoardState`] to a [`BoardView`]: 64
//! squares, each with its shade and piece. Presentation layers consume the view
//! and never look at the board directly.
//!
//! [`BoardSurface`] is the single shared surface written by whichever component
//! presented last. Each presentation replaces the whole view, so no piece from
//! an earlier board can survive a later one.

use crate::{BoardState, MalformedBoardError, Piece, Square, SquareSet};

/// Shade of a board square, decided by the parity of `row + col`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SquareShade {
    /// `row + col` is even.
    Light,
    /// `row + col` is odd.
    Dark,
}

/// One rendered square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RenderedSquare {
    /// The square's coordinates.
    pub square: Square,
    /// Background shade.
    pub shade: SquareShade,
    /// Piece shown on the square, if any.
    pub piece: Option<Piece>,
}

/// The rendered form of a board: exactly 64 squares in row-major order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BoardView {
    squares: [RenderedSquare; 64],
}

impl BoardView {
    /// Returns all 64 squares in row-major order.
    #[must_use]
    pub fn squares(&self) -> &[RenderedSquare; 64] {
        &self.squares
    }

    /// Returns the rendered square at `square`.
    #[must_use]
    pub fn get(&self, square: Square) -> &RenderedSquare {
        &self.squares[square.index()]
    }

    /// Returns the squares whose contents differ from `other`.
    #[must_use]
    pub fn diff(&self, other: &Self) -> SquareSet {
        self.squares
            .iter()
            .zip(&other.squares)
            .filter(|(a, b)| a.piece != b.piece)
            .map(|(a, _)| a.square)
            .collect()
    }
}

/// Renders a board into 64 shaded squares.
///
/// # Examples
///
/// ```
/// use chessunlocked_core::{BoardState, Square, SquareShade, render};
///
/// let view = render(&BoardState::empty());
/// assert_eq!(view.squares().len(), 64);
/// assert!(view.squares().iter().all(|s| s.piece.is_none()));
/// assert_eq!(view.get(Square::new(0, 1)).shade, SquareShade::Dark);
/// ```
#[must_use]
pub fn render(board: &BoardState) -> BoardView {
    let squares = std::array::from_fn(|index| {
        let square = Square::from_index(index);
        let shade = if square.is_light() {
            SquareShade::Light
        } else {
            SquareShade::Dark
        };
        RenderedSquare {
            square,
            shade,
            piece: board.piece_at(square),
        }
    });
    BoardView { squares }
}

/// Renders a board straight from authored rows.
///
/// # Errors
///
/// Returns [`MalformedBoardError`] when the rows are not 8 rows of 8 valid
/// symbols; nothing is rendered in that case.
pub fn render_rows<S>(rows: &[S]) -> Result<BoardView, MalformedBoardError>
where
    S: AsRef<str>,
{
    let board = BoardState::from_rows(rows)?;
    Ok(render(&board))
}

/// The single visual board surface.
///
/// Holds the most recently presented view and the squares that changed
/// relative to the presentation before it.
///
/// # Examples
///
/// ```
/// use chessunlocked_core::{BoardState, BoardSurface, Square};
///
/// let mut surface = BoardSurface::new();
/// surface.present(&BoardState::starting_position());
///
/// let after_e4: BoardState =
///     "rnbqkbnr/pppppppp/......../......../....P.../......../PPPP.PPP/RNBQKBNR"
///         .parse()
///         .unwrap();
/// surface.present(&after_e4);
///
/// let changed: Vec<_> = surface.changed().iter().map(|sq| sq.to_string()).collect();
/// assert_eq!(changed, ["e4", "e2"]);
/// assert!(surface.view().unwrap().get(Square::new(6, 4)).piece.is_none());
/// ```
#[derive(Debug, Clone, Default)]
pub struct BoardSurface {
    view: Option<BoardView>,
    changed: SquareSet,
}

impl BoardSurface {
    /// Creates a blank surface.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the surface content with `board`.
    ///
    /// Changed squares are computed against the previous view; the first
    /// presentation reports no changes.
    pub fn present(&mut self, board: &BoardState) -> &BoardView {
        let view = render(board);
        self.changed = self
            .view
            .as_ref()
            .map_or(SquareSet::EMPTY, |prev| view.diff(prev));
        self.view.insert(view)
    }

    /// Clears the surface.
    pub fn clear(&mut self) {
        self.view = None;
        self.changed = SquareSet::EMPTY;
    }

    /// Returns the current view, if anything has been presented.
    #[must_use]
    pub fn view(&self) -> Option<&BoardView> {
        self.view.as_ref()
    }

    /// Returns the squares changed by the last presentation.
    #[must_use]
    pub fn changed(&self) -> SquareSet {
        self.changed
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;
    use crate::BOARD_SIZE;

    const ALPHABET: &[char] = &[
        '.', 'K', 'Q', 'R', 'B', 'N', 'P', 'k', 'q', 'r', 'b', 'n', 'p',
    ];

    fn board_strategy() -> impl Strategy<Value = BoardState> {
        prop::collection::vec(
            prop::collection::vec(prop::sample::select(ALPHABET), BOARD_SIZE)
                .prop_map(|cells| cells.into_iter().collect::<String>()),
            BOARD_SIZE,
        )
        .prop_map(|rows| BoardState::from_rows(&rows).unwrap())
    }

    #[test]
    fn test_shades_alternate_by_parity() {
        let view = render(&BoardState::starting_position());
        for rendered in view.squares() {
            let parity = (rendered.square.row() + rendered.square.col()) % 2;
            let expected = if parity == 0 {
                SquareShade::Light
            } else {
                SquareShade::Dark
            };
            assert_eq!(rendered.shade, expected, "{}", rendered.square);
        }
    }

    #[test]
    fn test_render_rows_fails_fast_on_malformed_input() {
        let rows = ["rnbqkbnr"; 7];
        assert_eq!(
            render_rows(&rows),
            Err(MalformedBoardError::RowCount { len: 7 })
        );
        let mut rows = ["........"; 8];
        rows[0] = "rnbqkbnrr";
        assert_eq!(
            render_rows(&rows),
            Err(MalformedBoardError::ColumnCount { row: 0, len: 9 })
        );
    }

    #[test]
    fn test_present_replaces_previous_content() {
        let mut surface = BoardSurface::new();
        assert!(surface.view().is_none());

        surface.present(&BoardState::starting_position());
        assert_eq!(
            surface
                .view()
                .unwrap()
                .squares()
                .iter()
                .filter(|s| s.piece.is_some())
                .count(),
            32
        );
        assert!(surface.changed().is_empty());

        surface.present(&BoardState::empty());
        let view = surface.view().unwrap();
        assert!(view.squares().iter().all(|s| s.piece.is_none()));
        assert_eq!(surface.changed().len(), 32);

        surface.clear();
        assert!(surface.view().is_none());
        assert!(surface.changed().is_empty());
    }

    proptest! {
        #[test]
        fn prop_render_has_64_squares_matching_board(board in board_strategy()) {
            let view = render(&board);
            prop_assert_eq!(view.squares().len(), 64);
            for (square, piece) in board.squares() {
                prop_assert_eq!(view.get(square).piece, piece);
            }
        }

        #[test]
        fn prop_present_leaves_no_stale_pieces(first in board_strategy(), second in board_strategy()) {
            let mut surface = BoardSurface::new();
            surface.present(&first);
            let view = surface.present(&second).clone();
            prop_assert_eq!(&view, &render(&second));
            prop_assert_eq!(surface.view(), Some(&view));
            // Presenting the same board again changes nothing.
            surface.present(&second);
            prop_assert!(surface.changed().is_empty());
        }
    }
}

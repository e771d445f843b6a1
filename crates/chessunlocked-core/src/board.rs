//! Board state and square coordinates.

use std::{
    fmt::{self, Display},
    str::FromStr,
};

use crate::Piece;

/// Number of rows and columns on a chessboard.
pub const BOARD_SIZE: usize = 8;

/// Symbol marking an empty cell in authored rows.
pub const EMPTY_SYMBOL: char = '.';

/// A square on the board, addressed by row and column.
///
/// Row 0 is the top row as authored (rank 8), column 0 is file `a`.
///
/// # Examples
///
/// ```
/// use chessunlocked_core::Square;
///
/// let sq = Square::new(6, 4);
/// assert_eq!(sq.to_string(), "e2");
/// assert_eq!(sq.index(), 52);
/// assert!(sq.is_light());
/// assert!(!Square::new(7, 0).is_light());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Square {
    row: u8,
    col: u8,
}

impl Square {
    /// All 64 squares in row-major order.
    pub const ALL: [Self; 64] = {
        let mut all = [Self { row: 0, col: 0 }; 64];
        let mut i = 0;
        #[expect(clippy::cast_possible_truncation)]
        while i < 64 {
            all[i] = Self {
                row: (i / BOARD_SIZE) as u8,
                col: (i % BOARD_SIZE) as u8,
            };
            i += 1;
        }
        all
    };

    /// Creates a square.
    ///
    /// # Panics
    ///
    /// Panics if `row` or `col` is 8 or greater.
    #[must_use]
    pub const fn new(row: u8, col: u8) -> Self {
        assert!(row < 8 && col < 8, "square out of range");
        Self { row, col }
    }

    /// Returns the square at a row-major index (0-63).
    ///
    /// # Panics
    ///
    /// Panics if `index` is 64 or greater.
    #[must_use]
    pub const fn from_index(index: usize) -> Self {
        assert!(index < 64, "square index out of range");
        Self::ALL[index]
    }

    /// Returns the row (0-7, top to bottom).
    #[must_use]
    pub const fn row(self) -> u8 {
        self.row
    }

    /// Returns the column (0-7, left to right).
    #[must_use]
    pub const fn col(self) -> u8 {
        self.col
    }

    /// Returns the row-major index (0-63).
    #[must_use]
    pub const fn index(self) -> usize {
        self.row as usize * BOARD_SIZE + self.col as usize
    }

    /// Returns `true` when `(row + col)` is even.
    #[must_use]
    pub const fn is_light(self) -> bool {
        (self.row + self.col) % 2 == 0
    }
}

impl Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let file = char::from(b'a' + self.col);
        let rank = 8 - self.row;
        write!(f, "{file}{rank}")
    }
}

/// Error returned when authored rows do not describe an 8×8 board.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MalformedBoardError {
    /// The number of rows was not 8.
    #[display("expected 8 rows, found {len}")]
    RowCount {
        /// Number of rows found.
        len: usize,
    },
    /// A row did not contain exactly 8 cells.
    #[display("row {row} has {len} cells, expected 8")]
    ColumnCount {
        /// Zero-based row index.
        row: usize,
        /// Number of cells found in the row.
        len: usize,
    },
    /// A cell held a symbol outside the piece alphabet.
    #[display("unknown symbol {symbol:?} at row {row}, column {col}")]
    UnknownSymbol {
        /// Zero-based row index.
        row: usize,
        /// Zero-based column index.
        col: usize,
        /// The offending character.
        symbol: char,
    },
}

/// Piece placement on an 8×8 grid at one point in time.
///
/// A `BoardState` can only be built from well-formed input, so every value of
/// this type has exactly 8 rows of exactly 8 cells.
///
/// # Examples
///
/// ```
/// use chessunlocked_core::{BoardState, Square};
///
/// let board = BoardState::from_rows(&[
///     "rnbqkbnr", "pppppppp", "........", "........",
///     "....P...", "........", "PPPP.PPP", "RNBQKBNR",
/// ])
/// .unwrap();
///
/// assert_eq!(board.piece_at(Square::new(4, 4)).map(|p| p.symbol()), Some('P'));
/// assert!(board.piece_at(Square::new(6, 4)).is_none());
///
/// // Wrong shapes are rejected instead of rendered.
/// assert!(BoardState::from_rows(&["rnbqkbnr"]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct BoardState {
    cells: [[Option<Piece>; BOARD_SIZE]; BOARD_SIZE],
}

impl BoardState {
    /// Creates a board with no pieces.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            cells: [[None; BOARD_SIZE]; BOARD_SIZE],
        }
    }

    /// Creates the standard chess starting position.
    #[must_use]
    #[expect(clippy::missing_panics_doc)]
    pub fn starting_position() -> Self {
        Self::from_rows(&[
            "rnbqkbnr", "pppppppp", "........", "........", "........", "........", "PPPPPPPP",
            "RNBQKBNR",
        ])
        .expect("starting position is well-formed")
    }

    /// Builds a board from 8 authored rows of 8 symbols each.
    ///
    /// Each symbol is either [`EMPTY_SYMBOL`] or one of the 12 piece codes.
    ///
    /// # Errors
    ///
    /// Returns [`MalformedBoardError`] if the row count, a row's length, or a
    /// symbol is invalid.
    pub fn from_rows<S>(rows: &[S]) -> Result<Self, MalformedBoardError>
    where
        S: AsRef<str>,
    {
        if rows.len() != BOARD_SIZE {
            return Err(MalformedBoardError::RowCount { len: rows.len() });
        }

        let mut cells = [[None; BOARD_SIZE]; BOARD_SIZE];
        for (row, (line, out)) in rows.iter().zip(&mut cells).enumerate() {
            let line = line.as_ref();
            let len = line.chars().count();
            if len != BOARD_SIZE {
                return Err(MalformedBoardError::ColumnCount { row, len });
            }
            for (col, (symbol, cell)) in line.chars().zip(out.iter_mut()).enumerate() {
                if symbol == EMPTY_SYMBOL {
                    continue;
                }
                *cell = Some(
                    Piece::from_symbol(symbol)
                        .ok_or(MalformedBoardError::UnknownSymbol { row, col, symbol })?,
                );
            }
        }

        Ok(Self { cells })
    }

    /// Returns the piece on `square`, if any.
    #[must_use]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.cells[usize::from(square.row())][usize::from(square.col())]
    }

    /// Iterates over all squares with their contents in row-major order.
    pub fn squares(&self) -> impl Iterator<Item = (Square, Option<Piece>)> + '_ {
        Square::ALL.into_iter().map(|sq| (sq, self.piece_at(sq)))
    }

    /// Returns the number of occupied squares.
    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.cells.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Returns the board as 8 authored row strings.
    #[must_use]
    pub fn to_rows(&self) -> Vec<String> {
        self.cells
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| cell.map_or(EMPTY_SYMBOL, Piece::symbol))
                    .collect()
            })
            .collect()
    }
}

impl Default for BoardState {
    fn default() -> Self {
        Self::empty()
    }
}

impl TryFrom<Vec<String>> for BoardState {
    type Error = MalformedBoardError;

    fn try_from(rows: Vec<String>) -> Result<Self, Self::Error> {
        Self::from_rows(&rows)
    }
}

impl From<BoardState> for Vec<String> {
    fn from(board: BoardState) -> Self {
        board.to_rows()
    }
}

/// Parses rows separated by `/` (e.g. `rnbqkbnr/pppppppp/......../...`).
impl FromStr for BoardState {
    type Err = MalformedBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows: Vec<&str> = s.split('/').collect();
        Self::from_rows(&rows)
    }
}

impl Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.to_rows().iter().enumerate() {
            if i > 0 {
                f.write_str("/")?;
            }
            f.write_str(row)?;
        }
        Ok(())
    }
}

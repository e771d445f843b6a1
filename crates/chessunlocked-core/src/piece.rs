//! Chess piece representation.

use std::fmt::{self, Display};

/// The side a piece belongs to.
///
/// By convention uppercase symbols are white and lowercase symbols are black.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    /// Uppercase symbols.
    White,
    /// Lowercase symbols.
    Black,
}

/// The six kinds of chess pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    /// `K` / `k`.
    King,
    /// `Q` / `q`.
    Queen,
    /// `R` / `r`.
    Rook,
    /// `B` / `b`.
    Bishop,
    /// `N` / `n`.
    Knight,
    /// `P` / `p`.
    Pawn,
}

impl PieceKind {
    /// All piece kinds, from king to pawn.
    pub const ALL: [Self; 6] = [
        Self::King,
        Self::Queen,
        Self::Rook,
        Self::Bishop,
        Self::Knight,
        Self::Pawn,
    ];

    const fn lower_symbol(self) -> char {
        match self {
            Self::King => 'k',
            Self::Queen => 'q',
            Self::Rook => 'r',
            Self::Bishop => 'b',
            Self::Knight => 'n',
            Self::Pawn => 'p',
        }
    }
}

/// A colored chess piece occupying one cell of a board.
///
/// # Examples
///
/// ```
/// use chessunlocked_core::{Color, Piece, PieceKind};
///
/// let knight = Piece::from_symbol('N').unwrap();
/// assert_eq!(knight, Piece::new(Color::White, PieceKind::Knight));
/// assert_eq!(knight.symbol(), 'N');
/// assert_eq!(knight.glyph(), '♘');
///
/// assert!(Piece::from_symbol('x').is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// The side owning the piece.
    pub color: Color,
    /// The kind of piece.
    pub kind: PieceKind,
}

impl Piece {
    /// Creates a piece of the given color and kind.
    #[must_use]
    pub const fn new(color: Color, kind: PieceKind) -> Self {
        Self { color, kind }
    }

    /// Parses one of the 12 piece codes.
    ///
    /// Returns `None` for any other character, including the empty marker.
    #[must_use]
    pub fn from_symbol(symbol: char) -> Option<Self> {
        let color = if symbol.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match symbol.to_ascii_lowercase() {
            'k' => PieceKind::King,
            'q' => PieceKind::Queen,
            'r' => PieceKind::Rook,
            'b' => PieceKind::Bishop,
            'n' => PieceKind::Knight,
            'p' => PieceKind::Pawn,
            _ => return None,
        };
        Some(Self { color, kind })
    }

    /// Returns the piece code: uppercase for white, lowercase for black.
    #[must_use]
    pub const fn symbol(self) -> char {
        let lower = self.kind.lower_symbol();
        match self.color {
            Color::White => lower.to_ascii_uppercase(),
            Color::Black => lower,
        }
    }

    /// Returns the Unicode chess glyph, for text output where a chess-capable
    /// font is available.
    #[must_use]
    pub const fn glyph(self) -> char {
        match (self.color, self.kind) {
            (Color::White, PieceKind::King) => '♔',
            (Color::White, PieceKind::Queen) => '♕',
            (Color::White, PieceKind::Rook) => '♖',
            (Color::White, PieceKind::Bishop) => '♗',
            (Color::White, PieceKind::Knight) => '♘',
            (Color::White, PieceKind::Pawn) => '♙',
            (Color::Black, PieceKind::King) => '♚',
            (Color::Black, PieceKind::Queen) => '♛',
            (Color::Black, PieceKind::Rook) => '♜',
            (Color::Black, PieceKind::Bishop) => '♝',
            (Color::Black, PieceKind::Knight) => '♞',
            (Color::Black, PieceKind::Pawn) => '♟',
        }
    }
}

impl Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_symbol_round_trip_covers_alphabet() {
        let mut symbols = Vec::new();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                let piece = Piece::new(color, kind);
                assert_eq!(Piece::from_symbol(piece.symbol()), Some(piece));
                symbols.push(piece.symbol());
            }
        }
        symbols.sort_unstable();
        assert_eq!(symbols.iter().collect::<String>(), "BKNPQRbknpqr");
    }

    #[test]
    fn test_case_decides_color() {
        assert_eq!(Piece::from_symbol('q').map(|p| p.color), Some(Color::Black));
        assert_eq!(Piece::from_symbol('Q').map(|p| p.color), Some(Color::White));
    }

    #[test]
    fn test_glyphs_are_distinct_per_piece() {
        let mut glyphs = Vec::new();
        for color in [Color::White, Color::Black] {
            for kind in PieceKind::ALL {
                glyphs.push(Piece::new(color, kind).glyph());
            }
        }
        glyphs.sort_unstable();
        glyphs.dedup();
        assert_eq!(glyphs.len(), 12);
        assert!(glyphs.iter().all(|g| ('♔'..='♟').contains(g)));
    }

    #[test]
    fn test_rejects_non_piece_symbols() {
        for symbol in ['.', ' ', 'x', 'Z', '1', '♔'] {
            assert!(Piece::from_symbol(symbol).is_none(), "{symbol:?}");
        }
    }
}

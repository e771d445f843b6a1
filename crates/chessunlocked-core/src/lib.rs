//! Core data structures for the ChessUnlocked trainer.
//!
//! This crate provides the board model shared by the opening player, the drill
//! engine, and the application UI.
//!
//! # Overview
//!
//! 1. **Pieces** - [`piece`]: the 12 piece codes (6 kinds × 2 colors) and their
//!    single-character symbols.
//! 2. **Board** - [`board`]: [`BoardState`], a validated 8×8 grid of cells, and
//!    [`Square`] coordinates.
//! 3. **Rendering** - [`render`]: the pure board renderer producing a
//!    [`BoardView`] of exactly 64 squares, and [`BoardSurface`], the single
//!    visual surface that is wholly replaced on each presentation.
//!
//! # Examples
//!
//! ```
//! use chessunlocked_core::{BoardState, SquareShade, render};
//!
//! let board = BoardState::starting_position();
//! let view = render(&board);
//!
//! assert_eq!(view.squares().len(), 64);
//! assert_eq!(view.squares()[0].shade, SquareShade::Light);
//! assert_eq!(view.squares()[0].piece.map(|p| p.symbol()), Some('r'));
//! ```

pub mod board;
pub mod piece;
pub mod render;
pub mod square_set;

pub use self::{
    board::{BOARD_SIZE, BoardState, EMPTY_SYMBOL, MalformedBoardError, Square},
    piece::{Color, Piece, PieceKind},
    render::{BoardSurface, BoardView, RenderedSquare, SquareShade, render, render_rows},
    square_set::SquareSet,
};

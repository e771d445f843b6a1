//! Opening playback and practice drills.
//!
//! Two independent components drive the shared [`BoardSurface`]:
//!
//! - [`OpeningPlayer`] steps through an opening's positions, either manually or
//!   on a timer. `play()` hands out a [`TimerHandle`]; ticks carrying a stale
//!   handle are ignored, so pausing, stepping, or selecting another opening
//!   cancels any pending advance.
//! - [`DrillEngine`] shows a static position with a multiple-choice question
//!   and grades answers by exact string comparison.
//!
//! Both are single-threaded state machines. Time is supplied by the caller
//! through [`OpeningPlayer::advance_clock`] or [`OpeningPlayer::fire`], which
//! keeps them deterministic under test.
//!
//! [`BoardSurface`]: chessunlocked_core::BoardSurface
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use chessunlocked_catalog::Catalog;
//! use chessunlocked_core::BoardSurface;
//! use chessunlocked_trainer::{OpeningPlayer, PlaybackState};
//!
//! let (openings, _drills) = Catalog::builtin().unwrap().into_parts();
//! let mut player = OpeningPlayer::new(openings, Duration::from_millis(1500));
//! let mut surface = BoardSurface::new();
//!
//! player.select_opening("Queen's Gambit", &mut surface).unwrap();
//! player.play().unwrap();
//! player.advance_clock(Duration::from_secs(10), &mut surface);
//!
//! assert_eq!(player.state(), PlaybackState::Paused(3));
//! ```

pub use self::{drill::*, error::*, player::*};

mod drill;
mod error;
mod player;

//! Authored opening and drill data.
//!
//! The catalog is static configuration: a set of named [`Opening`]s, each an
//! ordered list of [`OpeningStep`]s, and an ordered list of
//! [`DrillQuestion`]s. It is loaded once at startup and never mutated.
//!
//! All validation happens at load time. A catalog that loads successfully
//! cannot produce a malformed board, an empty opening, or a drill whose answer
//! is missing from its options.
//!
//! # Examples
//!
//! ```
//! use chessunlocked_catalog::Catalog;
//!
//! let catalog = Catalog::builtin().unwrap();
//! let ruy_lopez = catalog.opening("Ruy Lopez").unwrap();
//! assert_eq!(ruy_lopez.steps()[0].position_name(), Some("Starting Position"));
//! assert!(!catalog.drills().is_empty());
//! ```

pub use self::{catalog::*, drill::*, error::*, opening::*};

mod catalog;
mod drill;
mod error;
mod opening;
mod raw;

//! A compact set of board squares.

use std::{fmt, iter::FusedIterator};

use crate::Square;

/// A set of squares backed by a 64-bit mask (bit `i` = row-major index `i`).
///
/// # Examples
///
/// ```
/// use chessunlocked_core::{Square, SquareSet};
///
/// let mut set = SquareSet::EMPTY;
/// set.insert(Square::new(6, 4));
/// set.insert(Square::new(4, 4));
///
/// assert_eq!(set.len(), 2);
/// assert!(set.contains(Square::new(4, 4)));
/// assert_eq!(set.iter().next(), Some(Square::new(4, 4)));
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SquareSet(u64);

impl SquareSet {
    /// The empty set.
    pub const EMPTY: Self = Self(0);

    /// Returns `true` if no square is in the set.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns the number of squares in the set.
    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if `square` is in the set.
    #[must_use]
    pub const fn contains(self, square: Square) -> bool {
        self.0 & (1 << square.index()) != 0
    }

    /// Adds `square` to the set.
    pub fn insert(&mut self, square: Square) {
        self.0 |= 1 << square.index();
    }

    /// Iterates over the squares in row-major order.
    #[must_use]
    pub fn iter(self) -> SquareSetIter {
        SquareSetIter(self.0)
    }
}

impl fmt::Debug for SquareSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

impl FromIterator<Square> for SquareSet {
    fn from_iter<T: IntoIterator<Item = Square>>(iter: T) -> Self {
        let mut set = Self::EMPTY;
        for square in iter {
            set.insert(square);
        }
        set
    }
}

impl IntoIterator for SquareSet {
    type Item = Square;
    type IntoIter = SquareSetIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over a [`SquareSet`].
#[derive(Debug, Clone)]
pub struct SquareSetIter(u64);

impl Iterator for SquareSetIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        if self.0 == 0 {
            return None;
        }
        let index = self.0.trailing_zeros() as usize;
        self.0 &= self.0 - 1;
        Some(Square::from_index(index))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.0.count_ones() as usize;
        (len, Some(len))
    }
}

impl ExactSizeIterator for SquareSetIter {}

impl FusedIterator for SquareSetIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_iterate_in_order() {
        let set: SquareSet = [Square::new(7, 7), Square::new(0, 0), Square::new(3, 5)]
            .into_iter()
            .collect();
        let squares: Vec<_> = set.iter().collect();
        assert_eq!(
            squares,
            vec![Square::new(0, 0), Square::new(3, 5), Square::new(7, 7)]
        );
        assert_eq!(set.iter().len(), 3);
    }

    #[test]
    fn test_duplicate_insert_is_idempotent() {
        let mut set = SquareSet::EMPTY;
        assert!(set.is_empty());
        set.insert(Square::new(2, 2));
        set.insert(Square::new(2, 2));
        assert_eq!(set.len(), 1);
        assert!(!set.contains(Square::new(2, 3)));
    }
}

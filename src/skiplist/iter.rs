use core::iter::FusedIterator;

use super::{SkipList, DEFAULT_MAX_HEIGHT};
use crate::{
    error::{Result, SkipListError},
    height::{HeightSource, SeededHeights},
    internal::utils::{Arena, Link},
};

/// The order in which a [Cursor] walks the list.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Smallest value first.
    Forward,
    /// Largest value first.
    Backward,
}

/// A bidirectional position along the bottom level of a [SkipList].
///
/// The cursor borrows the list, so the list cannot be changed while the cursor is alive.
///
/// ```
/// use skipset::{Direction, SkipList};
///
/// let mut list = SkipList::new(4).unwrap();
/// list.extend([3, 1, 2]);
///
/// let mut cursor = list.cursor(Direction::Backward);
/// let mut values = Vec::new();
///
/// while !cursor.at_end() {
///     values.push(cursor.value().unwrap());
///     cursor.advance();
/// }
///
/// assert_eq!(values, vec![3, 2, 1]);
/// assert!(cursor.value().is_err());
/// ```
#[derive(Clone)]
pub struct Cursor<'a> {
    nodes: &'a Arena,
    first: Link,
    last: Link,
    direction: Direction,
    curr: Link,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(nodes: &'a Arena, first: Link, last: Link, direction: Direction) -> Self {
        let mut cursor = Cursor {
            nodes,
            first,
            last,
            direction,
            curr: None,
        };

        cursor.begin();
        cursor
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Moves back to the smallest value for a forward cursor, the largest for a backward one.
    pub fn begin(&mut self) -> &mut Self {
        self.curr = match self.direction {
            Direction::Forward => self.first,
            Direction::Backward => self.last,
        };

        self
    }

    /// Whether the cursor has walked past the last value, or the list is empty.
    pub fn at_end(&self) -> bool {
        self.curr.is_none()
    }

    /// Steps to the next value in the cursor's direction. Does nothing at the end.
    pub fn advance(&mut self) -> &mut Self {
        if let Some(id) = self.curr {
            self.curr = match self.direction {
                Direction::Forward => self.nodes[id].next(0),
                Direction::Backward => self.nodes[id].prev(0),
            };
        }

        self
    }

    /// The value under the cursor.
    ///
    /// Fails with [SkipListError::CursorAtEnd] once the cursor is past the end.
    pub fn value(&self) -> Result<i64> {
        self.curr
            .map(|id| self.nodes[id].value)
            .ok_or(SkipListError::CursorAtEnd)
    }
}

/// An iterator over the values of a [SkipList], ascending from the front and descending from
/// the back.
#[derive(Clone)]
pub struct Iter<'a> {
    nodes: &'a Arena,
    front: Link,
    back: Link,
    remaining: usize,
}

impl<'a> Iter<'a> {
    pub(crate) fn new(nodes: &'a Arena, front: Link, back: Link, len: usize) -> Self {
        Iter {
            nodes,
            front,
            back,
            remaining: len,
        }
    }
}

impl<'a> Iterator for Iter<'a> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.nodes[self.front?];

        self.front = node.next(0);
        self.remaining -= 1;

        Some(node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a> DoubleEndedIterator for Iter<'a> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = &self.nodes[self.back?];

        self.back = node.prev(0);
        self.remaining -= 1;

        Some(node.value)
    }
}

impl<'a> ExactSizeIterator for Iter<'a> {}

impl<'a> FusedIterator for Iter<'a> {}

impl<'a, H> IntoIterator for &'a SkipList<H> {
    type Item = i64;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<H> Extend<i64> for SkipList<H>
where
    H: HeightSource,
{
    fn extend<T: IntoIterator<Item = i64>>(&mut self, iter: T) {
        for value in iter {
            self.insert(value);
        }
    }
}

impl FromIterator<i64> for SkipList<SeededHeights> {
    /// Collects into a list of height [DEFAULT_MAX_HEIGHT], seeded with the default seed.
    fn from_iter<T: IntoIterator<Item = i64>>(iter: T) -> Self {
        let mut list = SkipList::build(DEFAULT_MAX_HEIGHT, SeededHeights::default());

        list.extend(iter);
        list
    }
}

use core::fmt::{self, Debug};

use super::Link;

/// Handle to a [Node] stored in the list's [Arena](super::Arena).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(pub(crate) usize);

/// A single element of the list together with its pointer tower.
///
/// Both towers are exactly `height` long. `forward[level]` points to the next larger value on
/// `level`, `backward[level]` to the next smaller one.
pub(crate) struct Node {
    pub(crate) value: i64,
    pub(crate) forward: Box<[Link]>,
    pub(crate) backward: Box<[Link]>,
}

impl Node {
    /// Creates a node of the given height with both towers filled from the iterator of
    /// `(backward, forward)` pairs.
    pub(crate) fn new(value: i64, links: impl ExactSizeIterator<Item = (Link, Link)>) -> Self {
        assert!(links.len() > 0);

        let (backward, forward): (Vec<_>, Vec<_>) = links.unzip();

        Node {
            value,
            forward: forward.into_boxed_slice(),
            backward: backward.into_boxed_slice(),
        }
    }

    pub(crate) fn height(&self) -> usize {
        self.forward.len()
    }

    pub(crate) fn next(&self, level: usize) -> Link {
        self.forward[level]
    }

    pub(crate) fn prev(&self, level: usize) -> Link {
        self.backward[level]
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.height() == other.height()
    }
}

impl Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node")
            .field("value", &self.value)
            .field("height", &self.height())
            .field("forward", &self.forward)
            .field("backward", &self.backward)
            .finish()
    }
}

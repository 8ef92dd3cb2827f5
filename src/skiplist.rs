use core::{
    cmp::Ordering,
    fmt::{self, Debug, Display},
};

use crate::{
    error::{Result, SkipListError},
    height::{HeightSource, SeededHeights, DEFAULT_SEED},
    internal::utils::{below, highest, Arena, Link, Node, NodeId},
};

pub mod iter;

pub use iter::{Cursor, Direction, Iter};

/// The maximum height of lists built through [FromIterator].
pub const DEFAULT_MAX_HEIGHT: usize = 16;

/// An ordered set of `i64` values stored in a doubly linked skip list.
///
/// Every node is linked in both directions on each of the levels it occupies, and the list
/// keeps the first and last node of every level, so it can be walked from either end.
/// The maximum height is fixed when the list is created; each inserted node draws a height
/// uniformly from `1..=max_height` using the list's [HeightSource].
pub struct SkipList<H = SeededHeights> {
    nodes: Arena,
    heads: Box<[Link]>,
    tails: Box<[Link]>,
    state: ListState<H>,
}

struct ListState<H> {
    len: usize,
    max_height: usize,
    heights: H,
}

/// The outcome of [SkipList::search].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Search {
    /// Whether the value is in the list.
    pub found: bool,
    /// One plus the number of forward jumps the descent took. Never less than 1.
    pub operations: usize,
}

struct SearchResult {
    target: Option<NodeId>,
    operations: usize,
}

impl SkipList<SeededHeights> {
    /// Instantiates a new, empty [SkipList] whose heights are drawn from a [SeededHeights]
    /// seeded with [DEFAULT_SEED].
    pub fn new(max_height: usize) -> Result<Self> {
        Self::with_seed(max_height, DEFAULT_SEED)
    }

    /// Like [SkipList::new], with an explicit seed for the height generator.
    pub fn with_seed(max_height: usize, seed: u64) -> Result<Self> {
        Self::with_height_source(max_height, SeededHeights::new(seed))
    }
}

impl<H> SkipList<H>
where
    H: HeightSource,
{
    /// Instantiates a new, empty [SkipList] drawing its node heights from `heights`.
    ///
    /// Fails with [SkipListError::ZeroHeight] if `max_height` is 0.
    pub fn with_height_source(max_height: usize, heights: H) -> Result<Self> {
        if max_height == 0 {
            return Err(SkipListError::ZeroHeight);
        }

        Ok(Self::build(max_height, heights))
    }

    /// `max_height` must not be 0.
    pub(crate) fn build(max_height: usize, heights: H) -> Self {
        SkipList {
            nodes: Arena::new(),
            heads: vec![None; max_height].into_boxed_slice(),
            tails: vec![None; max_height].into_boxed_slice(),
            state: ListState {
                len: 0,
                max_height,
                heights,
            },
        }
    }

    /// Draws the height of a new node, in `1..=max_height`.
    fn gen_height(&mut self) -> usize {
        self.state.heights.next_in_range(self.state.max_height - 1) + 1
    }

    /// Inserts `value` if it is not yet present.
    ///
    /// Returns `false`, leaving the list untouched, if the value was already there.
    pub fn insert(&mut self, value: i64) -> bool {
        // The first node after the insertion point on every level, and the last one before it.
        let mut next = self.heads.to_vec();
        let mut prev: Vec<Link> = vec![None; self.state.max_height];

        let mut probe = highest(&next, self.top());

        while let Some((level, id)) = probe {
            let node = &self.nodes[id];

            match node.value.cmp(&value) {
                Ordering::Greater => probe = below(&next, level),
                Ordering::Less => {
                    let height = node.height();

                    for (level, (left, right)) in
                        prev.iter_mut().zip(next.iter_mut()).enumerate().take(height)
                    {
                        *left = Some(id);
                        *right = node.next(level);
                    }

                    probe = highest(&next, height - 1);
                }
                Ordering::Equal => return false,
            }
        }

        let height = self.gen_height();
        let new_node = self
            .nodes
            .alloc(Node::new(value, prev.into_iter().zip(next).take(height)));

        self.link_node(new_node);

        self.state.len += 1;
        true
    }

    /// Points the neighbours of `new_node`, or the heads and tails where it has none, at it.
    fn link_node(&mut self, new_node: NodeId) {
        for level in 0..self.nodes[new_node].height() {
            let (left, right) = (
                self.nodes[new_node].prev(level),
                self.nodes[new_node].next(level),
            );

            match left {
                Some(left) => self.nodes[left].forward[level] = Some(new_node),
                None => self.heads[level] = Some(new_node),
            }

            match right {
                Some(right) => self.nodes[right].backward[level] = Some(new_node),
                None => self.tails[level] = Some(new_node),
            }
        }
    }
}

impl<H> SkipList<H> {
    /// Gets the length of the [SkipList].
    pub fn len(&self) -> usize {
        self.state.len
    }

    pub fn is_empty(&self) -> bool {
        self.state.len < 1
    }

    /// The number of levels fixed at construction.
    pub fn max_height(&self) -> usize {
        self.state.max_height
    }

    fn top(&self) -> usize {
        self.state.max_height - 1
    }

    /// Looks for `value`, reporting how many operations the descent took.
    pub fn search(&self, value: i64) -> Search {
        let SearchResult { target, operations } = self.find(value);

        Search {
            found: target.is_some(),
            operations,
        }
    }

    pub fn contains(&self, value: i64) -> bool {
        self.find(value).target.is_some()
    }

    /// Removes `value` from the list.
    ///
    /// Returns `false`, leaving the list untouched, if the value was not there.
    pub fn remove(&mut self, value: i64) -> bool {
        let Some(target) = self.find(value).target else {
            return false;
        };

        let node = self.nodes.release(target);

        self.unlink(&node);

        self.state.len -= 1;
        true
    }

    /// Links the neighbours of a released node to one-another.
    fn unlink(&mut self, node: &Node) {
        for (level, (&left, &right)) in node.backward.iter().zip(node.forward.iter()).enumerate() {
            match right {
                Some(right) => self.nodes[right].backward[level] = left,
                None => self.tails[level] = left,
            }

            match left {
                Some(left) => self.nodes[left].forward[level] = right,
                None => self.heads[level] = right,
            }
        }
    }

    /// Top-down descent shared by [search](SkipList::search) and [remove](SkipList::remove).
    fn find(&self, value: i64) -> SearchResult {
        let mut operations = 1;
        let mut links: &[Link] = &self.heads;
        let mut probe = highest(links, self.top());

        while let Some((level, id)) = probe {
            let node = &self.nodes[id];

            match node.value.cmp(&value) {
                Ordering::Equal => {
                    return SearchResult {
                        target: Some(id),
                        operations,
                    }
                }
                Ordering::Greater => probe = below(links, level),
                Ordering::Less => {
                    links = &node.forward;
                    probe = highest(links, node.height() - 1);
                    operations += 1;
                }
            }
        }

        SearchResult {
            target: None,
            operations,
        }
    }

    /// Returns the value at position `index` in ascending order, walking the bottom level.
    pub fn ith(&self, index: usize) -> Result<i64> {
        self.iter()
            .nth(index)
            .ok_or(SkipListError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    /// Calls `visitor` once for every value, in ascending order.
    pub fn for_each<F>(&self, visitor: F)
    where
        F: FnMut(i64),
    {
        self.iter().for_each(visitor)
    }

    pub fn first(&self) -> Option<i64> {
        self.heads[0].map(|id| self.nodes[id].value)
    }

    pub fn last(&self) -> Option<i64> {
        self.tails[0].map(|id| self.nodes[id].value)
    }

    /// Releases every node, keeping the maximum height and the height source.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.heads.fill(None);
        self.tails.fill(None);
        self.state.len = 0;
    }

    /// An iterator over the values, smallest first. Also walks backwards.
    pub fn iter(&self) -> Iter<'_> {
        Iter::new(&self.nodes, self.heads[0], self.tails[0], self.len())
    }

    /// A [Cursor] positioned at the first value in `direction`.
    pub fn cursor(&self, direction: Direction) -> Cursor<'_> {
        Cursor::new(&self.nodes, self.heads[0], self.tails[0], direction)
    }

    fn display_link(&self, link: Link) -> String {
        link.map_or_else(|| "/".to_owned(), |id| self.nodes[id].value.to_string())
    }
}

impl<H> Debug for SkipList<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.iter()).finish()
    }
}

/// Dumps the heads and tails of every level, followed by every node with its left and right
/// neighbour on each of its levels.
impl<H> Display for SkipList<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Heads")?;
        for (level, head) in self.heads.iter().enumerate() {
            writeln!(f, "{:>4}: {}", level, self.display_link(*head))?;
        }

        let mut curr = self.heads[0];
        while let Some(id) = curr {
            let node = &self.nodes[id];

            writeln!(f, "Node {}", node.value)?;
            for level in 0..node.height() {
                writeln!(
                    f,
                    "{:>4}: {} - {}",
                    level,
                    self.display_link(node.prev(level)),
                    self.display_link(node.next(level)),
                )?;
            }

            curr = node.next(0);
        }

        writeln!(f, "Tails")?;
        for (level, tail) in self.tails.iter().enumerate() {
            writeln!(f, "{:>4}: {}", level, self.display_link(*tail))?;
        }

        Ok(())
    }
}

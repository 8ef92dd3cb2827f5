use core::ops::{Index, IndexMut};

mod node;

pub(crate) use node::{Node, NodeId};

/// A single pointer of a tower, or of the list's head and tail arrays.
pub(crate) type Link = Option<NodeId>;

/// Finds the highest level at or below `from` whose link is set.
///
/// Returns the level together with the node it points to, or `None` when every level down to
/// and including 0 is empty.
pub(crate) fn highest(links: &[Link], from: usize) -> Option<(usize, NodeId)> {
    links[..=from]
        .iter()
        .enumerate()
        .rev()
        .find_map(|(level, link)| link.map(|id| (level, id)))
}

/// Same as [highest], starting one level below `level`.
pub(crate) fn below(links: &[Link], level: usize) -> Option<(usize, NodeId)> {
    level.checked_sub(1).and_then(|from| highest(links, from))
}

enum Slot {
    Vacant { next_free: Option<usize> },
    Occupied { node: Node },
}

/// Owns every node of a list. Slots of released nodes are recycled through an intrusive free
/// list, so a [NodeId] stays stable for as long as its node lives.
pub(crate) struct Arena {
    slots: Vec<Slot>,
    free_head: Option<usize>,
}

impl Arena {
    pub(crate) fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn alloc(&mut self, node: Node) -> NodeId {
        match self.free_head {
            Some(index) => {
                let next_free = match self.slots[index] {
                    Slot::Vacant { next_free } => next_free,
                    Slot::Occupied { .. } => panic!("freelist corruption: occupied slot in freelist"),
                };

                self.free_head = next_free;
                self.slots[index] = Slot::Occupied { node };

                NodeId(index)
            }
            None => {
                self.slots.push(Slot::Occupied { node });

                NodeId(self.slots.len() - 1)
            }
        }
    }

    pub(crate) fn release(&mut self, id: NodeId) -> Node {
        let vacant = Slot::Vacant {
            next_free: self.free_head,
        };

        match core::mem::replace(&mut self.slots[id.0], vacant) {
            Slot::Occupied { node } => {
                self.free_head = Some(id.0);
                node
            }
            Slot::Vacant { .. } => panic!("releasing vacant slot"),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.slots.clear();
        self.free_head = None;
    }
}

impl Index<NodeId> for Arena {
    type Output = Node;

    fn index(&self, id: NodeId) -> &Self::Output {
        match &self.slots[id.0] {
            Slot::Occupied { node } => node,
            Slot::Vacant { .. } => panic!("accessing vacant slot"),
        }
    }
}

impl IndexMut<NodeId> for Arena {
    fn index_mut(&mut self, id: NodeId) -> &mut Self::Output {
        match &mut self.slots[id.0] {
            Slot::Occupied { node } => node,
            Slot::Vacant { .. } => panic!("accessing vacant slot"),
        }
    }
}

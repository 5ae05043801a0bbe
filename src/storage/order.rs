//! Recency List Module
//!
//! Arena-backed doubly-linked list of keys ordered by last write.

// == Slot Handle ==
/// Stable handle to a node in a [`RecencyList`].
///
/// A handle stays valid until its node is removed; after that the slot may be
/// reused for another key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

#[derive(Debug)]
struct Node {
    key: String,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

// == Recency List ==
/// Tracks write order for front-only eviction.
///
/// - Front = least recently written
/// - Back = most recently written
///
/// Nodes live in a `Vec` of slots with a free list, so insert, remove by
/// handle, move-to-back and front lookup are all O(1).
#[derive(Debug, Default)]
pub struct RecencyList {
    slots: Vec<Option<Node>>,
    free: Vec<usize>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl RecencyList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends `key` as the most recently written entry.
    pub fn push_back(&mut self, key: String) -> SlotId {
        let node = Node {
            key,
            prev: None,
            next: None,
        };
        let id = match self.free.pop() {
            Some(index) => {
                self.slots[index] = Some(node);
                SlotId(index)
            }
            None => {
                self.slots.push(Some(node));
                SlotId(self.slots.len() - 1)
            }
        };
        self.link_back(id);
        id
    }

    // == Move To Back ==
    /// Marks the node as most recently written.
    ///
    /// Returns false if the handle does not point at a live node.
    pub fn move_to_back(&mut self, id: SlotId) -> bool {
        if self.key(id).is_none() {
            return false;
        }
        if self.tail != Some(id) {
            self.unlink(id);
            self.link_back(id);
        }
        true
    }

    // == Remove ==
    /// Removes the node and returns its key.
    pub fn remove(&mut self, id: SlotId) -> Option<String> {
        self.key(id)?;
        self.unlink(id);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);
        Some(node.key)
    }

    // == Front ==
    /// Returns the least recently written node without removing it.
    pub fn front(&self) -> Option<(SlotId, &str)> {
        let id = self.head?;
        Some((id, self.node(id).key.as_str()))
    }

    // == Key ==
    /// Returns the key stored at `id`, if the slot is live.
    pub fn key(&self, id: SlotId) -> Option<&str> {
        self.slots
            .get(id.0)
            .and_then(Option::as_ref)
            .map(|node| node.key.as_str())
    }

    // == Iter ==
    /// Iterates keys from front (oldest) to back (newest).
    pub fn iter(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::successors(self.head, move |id| self.node(*id).next)
            .map(move |id| self.node(id).key.as_str())
    }

    // == Length ==
    /// Returns the number of live nodes.
    pub fn len(&self) -> usize {
        self.len
    }

    // == Is Empty ==
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Attaches a detached live node after the current tail.
    fn link_back(&mut self, id: SlotId) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(id);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Detaches a live node from its neighbours, leaving it in its slot.
    fn unlink(&mut self, id: SlotId) {
        let (prev, next) = {
            let node = self.node(id);
            (node.prev, node.next)
        };
        match prev {
            Some(prev) => self.node_mut(prev).next = next,
            None => self.head = next,
        }
        match next {
            Some(next) => self.node_mut(next).prev = prev,
            None => self.tail = prev,
        }
        self.len -= 1;
    }

    fn node(&self, id: SlotId) -> &Node {
        match self.slots.get(id.0).and_then(Option::as_ref) {
            Some(node) => node,
            None => panic!("recency list corrupted: slot {} is linked but vacant", id.0),
        }
    }

    fn node_mut(&mut self, id: SlotId) -> &mut Node {
        match self.slots.get_mut(id.0).and_then(Option::as_mut) {
            Some(node) => node,
            None => panic!("recency list corrupted: slot {} is linked but vacant", id.0),
        }
    }
}

//! LRU Order Module
//!
//! Eviction-order bookkeeping for the cache: a slab-backed doubly-linked list
//! of keys with constant-time push, move and pop.

use crate::kv::Key;

// == Node Handle ==
/// Stable handle to a node in an [`LruList`].
///
/// A handle is valid until its node is removed; the slot may then be reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug)]
struct Node {
    key: Key,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

// == LRU List ==
/// Tracks access order for LRU eviction.
///
/// - Front = least recently used (evicted first)
/// - Back = most recently used
#[derive(Debug, Default)]
pub struct LruList {
    /// Node storage; `None` marks a free slot
    slots: Vec<Option<Node>>,
    /// Free slot indices for reuse
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl LruList {
    // == Constructor ==
    /// Creates a new empty list.
    pub fn new() -> Self {
        Self::default()
    }

    // == Push Back ==
    /// Appends `key` as the most recently used and returns its handle.
    pub fn push_back(&mut self, key: Key) -> NodeId {
        let node = Node {
            key,
            prev: self.tail,
            next: None,
        };

        let id = match self.free.pop() {
            Some(slot) => {
                self.slots[slot] = Some(node);
                NodeId(slot)
            }
            None => {
                self.slots.push(Some(node));
                NodeId(self.slots.len() - 1)
            }
        };

        match self.tail {
            Some(tail) => {
                if let Some(n) = self.node_mut(tail) {
                    n.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
        id
    }

    // == Move To Back ==
    /// Marks the node as most recently used.
    ///
    /// Returns false if `id` does not refer to a live node.
    pub fn move_to_back(&mut self, id: NodeId) -> bool {
        let (prev, next) = match self.node(id) {
            Some(n) => (n.prev, n.next),
            None => return false,
        };

        if self.tail == Some(id) {
            return true;
        }

        self.unlink(prev, next);

        let old_tail = self.tail;
        match old_tail {
            Some(tail) => {
                if let Some(n) = self.node_mut(tail) {
                    n.next = Some(id);
                }
            }
            None => self.head = Some(id),
        }
        if let Some(n) = self.node_mut(id) {
            n.prev = old_tail;
            n.next = None;
        }
        self.tail = Some(id);
        true
    }

    // == Pop Front ==
    /// Removes and returns the least recently used key.
    ///
    /// Returns None if the list is empty.
    pub fn pop_front(&mut self) -> Option<Key> {
        let head = self.head?;
        self.remove(head)
    }

    // == Remove ==
    /// Unlinks a node and returns its key, or None if `id` is not live.
    pub fn remove(&mut self, id: NodeId) -> Option<Key> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.unlink(node.prev, node.next);
        self.free.push(id.0);
        self.len -= 1;
        Some(node.key)
    }

    // == Peek Front ==
    /// Returns the least recently used key without removing it.
    pub fn front(&self) -> Option<&Key> {
        self.head.and_then(|id| self.key(id))
    }

    /// Returns the key stored at `id`, if live.
    pub fn key(&self, id: NodeId) -> Option<&Key> {
        self.node(id).map(|n| &n.key)
    }

    /// Iterates keys from least to most recently used.
    pub fn iter(&self) -> impl Iterator<Item = &Key> + '_ {
        std::iter::successors(self.head.and_then(|id| self.node(id)), move |n| {
            n.next.and_then(|id| self.node(id))
        })
        .map(|n| &n.key)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Joins `prev` and `next` around a node being taken out.
    fn unlink(&mut self, prev: Option<NodeId>, next: Option<NodeId>) {
        match prev {
            Some(p) => {
                if let Some(n) = self.node_mut(p) {
                    n.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(nx) => {
                if let Some(n) = self.node_mut(nx) {
                    n.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    fn node(&self, id: NodeId) -> Option<&Node> {
        self.slots.get(id.0)?.as_ref()
    }

    fn node_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.slots.get_mut(id.0)?.as_mut()
    }
}

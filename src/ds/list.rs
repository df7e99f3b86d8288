//! Intrusive doubly linked list over a shared [`SlabAllocator`].
//!
//! A `LinkedList` is only a header (`head`, `tail`, `len`). Node storage and
//! the `prev`/`next` links live in the slab, so any number of lists can thread
//! nodes drawn from a single pool, and moving a node from one list to another
//! is a relink with no allocation.
//!
//! ## Architecture
//!
//! ```text
//!   slab (SlabAllocator<T>)
//!   ┌────────┬──────────────────────────────────────────────┐
//!   │ NodeId │ { value, prev, next }                        │
//!   ├────────┼──────────────────────────────────────────────┤
//!   │ n0     │ { A, prev: None,     next: Some(n2) }        │
//!   │ n1     │ { X, ... belongs to another list ... }       │
//!   │ n2     │ { B, prev: Some(n0), next: None }            │
//!   └────────┴──────────────────────────────────────────────┘
//!
//!   list: head ─► [n0] ◄──► [n2] ◄── tail     len = 2
//! ```
//!
//! ## Operations
//!
//! | Operation                    | Time |
//! |------------------------------|------|
//! | `push_front` / `push_back`   | O(1) |
//! | `insert_before` / `insert_after` | O(1) |
//! | `remove`                     | O(1) |
//! | `head` / `tail` / `len`      | O(1) |
//! | `iter`                       | O(n) |
//!
//! Callers must pass the slab the nodes came from and must only hand a node
//! to one list at a time; linking a node that is already linked corrupts both
//! lists. `debug_validate_invariants()` is available in debug/test builds.

use std::fmt;
use std::marker::PhantomData;

use crate::ds::slab::{NodeId, SlabAllocator};

/// List header threading nodes of a [`SlabAllocator<T>`].
pub struct LinkedList<T> {
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
    _marker: PhantomData<fn() -> T>,
}

impl<T> LinkedList<T> {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            _marker: PhantomData,
        }
    }

    pub fn head(&self) -> Option<NodeId> {
        self.head
    }

    pub fn tail(&self) -> Option<NodeId> {
        self.tail
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the node after `id`.
    pub fn next(&self, slab: &SlabAllocator<T>, id: NodeId) -> Option<NodeId> {
        slab.next(id)
    }

    /// Returns the node before `id`.
    pub fn prev(&self, slab: &SlabAllocator<T>, id: NodeId) -> Option<NodeId> {
        slab.prev(id)
    }

    /// Links `id` as the new head.
    pub fn push_front(&mut self, slab: &mut SlabAllocator<T>, id: NodeId) {
        match self.head {
            Some(head) => self.insert_before(slab, head, id),
            None => self.link_only(slab, id),
        }
    }

    /// Links `id` as the new tail.
    pub fn push_back(&mut self, slab: &mut SlabAllocator<T>, id: NodeId) {
        match self.tail {
            Some(tail) => self.insert_after(slab, tail, id),
            None => self.link_only(slab, id),
        }
    }

    /// Links `id` immediately before `target`, which must be in this list.
    pub fn insert_before(&mut self, slab: &mut SlabAllocator<T>, target: NodeId, id: NodeId) {
        let prev = slab.prev(target);
        slab.set_prev(id, prev);
        slab.set_next(id, Some(target));
        match prev {
            Some(prev) => slab.set_next(prev, Some(id)),
            None => self.head = Some(id),
        }
        slab.set_prev(target, Some(id));
        self.len += 1;
    }

    /// Links `id` immediately after `target`, which must be in this list.
    pub fn insert_after(&mut self, slab: &mut SlabAllocator<T>, target: NodeId, id: NodeId) {
        let next = slab.next(target);
        slab.set_prev(id, Some(target));
        slab.set_next(id, next);
        match next {
            Some(next) => slab.set_prev(next, Some(id)),
            None => self.tail = Some(id),
        }
        slab.set_next(target, Some(id));
        self.len += 1;
    }

    /// Unlinks `id` and hands it back; the slot stays live in the slab.
    pub fn remove(&mut self, slab: &mut SlabAllocator<T>, id: NodeId) -> NodeId {
        let prev = slab.prev(id);
        let next = slab.next(id);
        match prev {
            Some(prev) => slab.set_next(prev, next),
            None => {
                debug_assert_eq!(self.head, Some(id), "node is not in this list");
                self.head = next;
            },
        }
        match next {
            Some(next) => slab.set_prev(next, prev),
            None => {
                debug_assert_eq!(self.tail, Some(id), "node is not in this list");
                self.tail = prev;
            },
        }
        slab.set_prev(id, None);
        slab.set_next(id, None);
        self.len -= 1;
        id
    }

    /// Unlinks and returns the tail, if any.
    pub fn pop_back(&mut self, slab: &mut SlabAllocator<T>) -> Option<NodeId> {
        let tail = self.tail?;
        Some(self.remove(slab, tail))
    }

    /// Moves `id` (already in this list) to the head.
    pub fn move_to_front(&mut self, slab: &mut SlabAllocator<T>, id: NodeId) {
        if self.head == Some(id) {
            return;
        }
        self.remove(slab, id);
        self.push_front(slab, id);
    }

    /// Returns an iterator of `(NodeId, &T)` from head to tail.
    pub fn iter<'a>(&self, slab: &'a SlabAllocator<T>) -> Iter<'a, T> {
        Iter {
            slab,
            current: self.head,
            remaining: self.len,
        }
    }

    /// Returns an iterator of node ids from head to tail.
    pub fn iter_ids<'a>(&self, slab: &'a SlabAllocator<T>) -> impl Iterator<Item = NodeId> + 'a {
        self.iter(slab).map(|(id, _)| id)
    }

    fn link_only(&mut self, slab: &mut SlabAllocator<T>, id: NodeId) {
        debug_assert!(self.head.is_none() && self.tail.is_none());
        slab.set_prev(id, None);
        slab.set_next(id, None);
        self.head = Some(id);
        self.tail = Some(id);
        self.len = 1;
    }

    #[cfg(any(test, debug_assertions))]
    pub fn debug_validate_invariants(&self, slab: &SlabAllocator<T>) {
        if self.head.is_none() || self.tail.is_none() {
            assert!(self.head.is_none());
            assert!(self.tail.is_none());
            assert_eq!(self.len, 0);
            return;
        }

        let mut seen = std::collections::HashSet::new();
        let mut count = 0usize;
        let mut current = self.head;
        let mut prev = None;
        while let Some(id) = current {
            assert!(seen.insert(id), "cycle at {:?}", id);
            assert!(slab.contains(id), "list links free slot {:?}", id);
            assert_eq!(slab.prev(id), prev);
            prev = Some(id);
            current = slab.next(id);
            count += 1;
            assert!(count <= self.len);
        }
        assert_eq!(self.tail, prev);
        assert_eq!(count, self.len);
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LinkedList")
            .field("head", &self.head)
            .field("tail", &self.tail)
            .field("len", &self.len)
            .finish()
    }
}

/// Iterator over `(NodeId, &T)` pairs from head to tail.
pub struct Iter<'a, T> {
    slab: &'a SlabAllocator<T>,
    current: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = (NodeId, &'a T);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.current?;
        let value = self
            .slab
            .get(id)
            .unwrap_or_else(|| panic!("list links free slot {}", id.index()));
        self.current = self.slab.next(id);
        self.remaining = self.remaining.saturating_sub(1);
        Some((id, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining))
    }
}

//! Fixed-capacity slab of list nodes.
//!
//! Every slot is reserved up front; `acquire` hands out a slot (reusing freed
//! slots first, then the never-used tail) and `release` returns it. The slab
//! never grows past the capacity given to [`SlabAllocator::with_capacity`], so
//! running out of slots is a caller bug and panics.
//!
//! ```text
//!   nodes: [ n0 | n1 | n2 | n3 | .. reserve .. ]   limit = capacity
//!             ▲         ▲
//!   free:   [ 2 , 0 ]   pop → next acquire reuses n0
//! ```
//!
//! Slots carry `prev`/`next` links so that [`LinkedList`](super::list::LinkedList)
//! headers can thread nodes without owning them.

/// Stable handle to a slot in a [`SlabAllocator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug)]
struct Node<T> {
    value: Option<T>,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Occupancy counters for one pool.
///
/// `in_use + free + untouched == capacity` holds for every pool at all times.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolStats {
    pub capacity: usize,
    pub in_use: usize,
    pub free: usize,
    pub untouched: usize,
}

impl PoolStats {
    /// Returns `true` if the counters account for every slot.
    pub fn is_conserved(&self) -> bool {
        self.in_use + self.free + self.untouched == self.capacity
    }
}

#[derive(Debug)]
pub struct SlabAllocator<T> {
    nodes: Vec<Node<T>>,
    free: Vec<NodeId>,
    limit: usize,
    in_use: usize,
}

impl<T> SlabAllocator<T> {
    /// Reserves storage for exactly `capacity` nodes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Vec::with_capacity(capacity),
            free: Vec::with_capacity(capacity),
            limit: capacity,
            in_use: 0,
        }
    }

    /// Stores `value` in a free slot and returns its id.
    ///
    /// # Panics
    ///
    /// Panics if every slot is in use.
    pub fn acquire(&mut self, value: T) -> NodeId {
        let id = if let Some(id) = self.free.pop() {
            let node = &mut self.nodes[id.0];
            debug_assert!(node.value.is_none());
            node.value = Some(value);
            id
        } else if self.nodes.len() < self.limit {
            self.nodes.push(Node {
                value: Some(value),
                prev: None,
                next: None,
            });
            NodeId(self.nodes.len() - 1)
        } else {
            panic!("slab allocator exhausted: all {} slots in use", self.limit);
        };
        self.in_use += 1;
        id
    }

    /// Clears the slot and returns its value.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not a live slot.
    pub fn release(&mut self, id: NodeId) -> T {
        let node = self
            .nodes
            .get_mut(id.0)
            .unwrap_or_else(|| panic!("release of unknown slot {}", id.0));
        let value = node
            .value
            .take()
            .unwrap_or_else(|| panic!("release of free slot {}", id.0));
        node.prev = None;
        node.next = None;
        self.free.push(id);
        self.in_use -= 1;
        value
    }

    pub fn get(&self, id: NodeId) -> Option<&T> {
        self.nodes.get(id.0).and_then(|node| node.value.as_ref())
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut T> {
        self.nodes.get_mut(id.0).and_then(|node| node.value.as_mut())
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Total slots, fixed at construction.
    pub fn capacity(&self) -> usize {
        self.limit
    }

    pub fn in_use(&self) -> usize {
        self.in_use
    }

    /// Slots released and waiting for reuse.
    pub fn free_len(&self) -> usize {
        self.free.len()
    }

    /// Slots never handed out since construction (or the last `clear`).
    pub fn untouched(&self) -> usize {
        self.limit - self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.in_use == 0
    }

    pub fn is_full(&self) -> bool {
        self.in_use == self.limit
    }

    pub fn stats(&self) -> PoolStats {
        PoolStats {
            capacity: self.limit,
            in_use: self.in_use,
            free: self.free.len(),
            untouched: self.untouched(),
        }
    }

    /// Drops every value and returns all slots to the untouched reserve.
    ///
    /// Backing storage is kept, so later acquires still do not allocate.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.in_use = 0;
    }

    pub(crate) fn prev(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).prev
    }

    pub(crate) fn next(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).next
    }

    pub(crate) fn set_prev(&mut self, id: NodeId, prev: Option<NodeId>) {
        self.node_mut(id).prev = prev;
    }

    pub(crate) fn set_next(&mut self, id: NodeId, next: Option<NodeId>) {
        self.node_mut(id).next = next;
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        let node = &self.nodes[id.0];
        debug_assert!(node.value.is_some(), "link access on free slot {}", id.0);
        node
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        let node = &mut self.nodes[id.0];
        debug_assert!(node.value.is_some(), "link access on free slot {}", id.0);
        node
    }
}

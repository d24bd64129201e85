//! Order list used by the FIFO and MRU trackers.
//!
//! A doubly linked list whose nodes live in a slot arena and link to each
//! other by slot index rather than by pointer. Handles (`SlotId`) stay valid
//! until the node is removed, so the cache map can hold a `SlotId` per key
//! and reorder or delete entries in O(1) without any raw-pointer plumbing.
//!
//! ```text
//!   nodes (slot arena)
//!   ┌──────┬──────────────────────────────────────────┐
//!   │ slot │ Node { value, prev, next }               │
//!   ├──────┼──────────────────────────────────────────┤
//!   │  0   │ { value: C, prev: None,    next: Some(2)}│
//!   │  1   │ (free)                                   │
//!   │  2   │ { value: B, prev: Some(0), next: Some(3)}│
//!   │  3   │ { value: A, prev: Some(2), next: None   }│
//!   └──────┴──────────────────────────────────────────┘
//!
//!   head ─► [0] ◄──► [2] ◄──► [3] ◄── tail
//! ```
//!
//! Freed slots are recycled through a free list, so a cache that churns at
//! capacity never grows the arena past its capacity.
//!
//! This module is internal infrastructure; library consumers interact with
//! the cache types, never with the list directly.

extern crate alloc;

use alloc::vec::Vec;

/// Stable handle to a node in an [`OrderList`].
///
/// A `SlotId` is only meaningful for the list that issued it, and only until
/// that node is removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct SlotId(usize);

#[derive(Debug)]
struct Node<T> {
    value: T,
    prev: Option<SlotId>,
    next: Option<SlotId>,
}

/// Doubly linked list backed by a slot arena.
///
/// The front of the list is the most recently pushed end; which end a cache
/// evicts from is the policy's decision (FIFO pops the back, MRU pops the
/// front).
#[derive(Debug)]
pub(crate) struct OrderList<T> {
    nodes: Vec<Option<Node<T>>>,
    free: Vec<SlotId>,
    head: Option<SlotId>,
    tail: Option<SlotId>,
    len: usize,
}

impl<T> OrderList<T> {
    /// Creates an empty list with room for `capacity` nodes before the arena
    /// reallocates.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        OrderList {
            nodes: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Returns the number of nodes in the list.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no nodes.
    #[cfg(test)]
    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a reference to the value stored at `id`.
    #[inline]
    pub(crate) fn get(&self, id: SlotId) -> Option<&T> {
        self.nodes.get(id.0)?.as_ref().map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored at `id`.
    #[inline]
    pub(crate) fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.nodes.get_mut(id.0)?.as_mut().map(|node| &mut node.value)
    }

    /// Returns the handle of the front node, if any.
    #[cfg(test)]
    #[inline]
    pub(crate) fn front_id(&self) -> Option<SlotId> {
        self.head
    }

    /// Returns the handle of the back node, if any.
    #[cfg(test)]
    #[inline]
    pub(crate) fn back_id(&self) -> Option<SlotId> {
        self.tail
    }

    /// Returns a reference to the value at the back of the list.
    #[cfg(test)]
    #[inline]
    pub(crate) fn back(&self) -> Option<&T> {
        self.tail.and_then(|id| self.get(id))
    }

    /// Returns a reference to the value at the front of the list.
    #[inline]
    pub(crate) fn front(&self) -> Option<&T> {
        self.head.and_then(|id| self.get(id))
    }

    fn alloc(&mut self, node: Node<T>) -> SlotId {
        match self.free.pop() {
            Some(id) => {
                self.nodes[id.0] = Some(node);
                id
            }
            None => {
                let id = SlotId(self.nodes.len());
                self.nodes.push(Some(node));
                id
            }
        }
    }

    /// Pushes a value onto the front of the list and returns its handle.
    pub(crate) fn push_front(&mut self, value: T) -> SlotId {
        let id = self.alloc(Node {
            value,
            prev: None,
            next: self.head,
        });
        match self.head {
            Some(old_head) => {
                if let Some(node) = self.nodes[old_head.0].as_mut() {
                    node.prev = Some(id);
                }
            }
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
        id
    }

    /// Unlinks the node at `id` from its neighbours without freeing its slot.
    ///
    /// The node's own `prev`/`next` fields are left stale; callers either
    /// free the slot or relink the node immediately.
    fn detach(&mut self, _id: SlotId, prev: Option<SlotId>, next: Option<SlotId>) {
        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p.0].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }
        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n.0].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }
    }

    /// Removes the node at `id`, returning its value.
    ///
    /// Returns `None` if the slot is not currently occupied.
    pub(crate) fn remove(&mut self, id: SlotId) -> Option<T> {
        let node = self.nodes.get_mut(id.0)?.take()?;
        self.detach(id, node.prev, node.next);
        self.free.push(id);
        self.len -= 1;
        Some(node.value)
    }

    /// Removes and returns the value at the back of the list.
    pub(crate) fn pop_back(&mut self) -> Option<T> {
        let id = self.tail?;
        self.remove(id)
    }

    /// Removes and returns the value at the front of the list.
    pub(crate) fn pop_front(&mut self) -> Option<T> {
        let id = self.head?;
        self.remove(id)
    }

    /// Moves the node at `id` to the front of the list.
    ///
    /// Returns `false` if the slot is not occupied.
    pub(crate) fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.head == Some(id) {
            return self.nodes.get(id.0).map_or(false, Option::is_some);
        }
        let (prev, next) = match self.nodes.get(id.0).and_then(Option::as_ref) {
            Some(node) => (node.prev, node.next),
            None => return false,
        };
        self.detach(id, prev, next);

        let old_head = self.head;
        if let Some(node) = self.nodes[id.0].as_mut() {
            node.prev = None;
            node.next = old_head;
        }
        if let Some(h) = old_head {
            if let Some(node) = self.nodes[h.0].as_mut() {
                node.prev = Some(id);
            }
        } else {
            self.tail = Some(id);
        }
        self.head = Some(id);
        true
    }

    /// Removes every node, keeping the arena's allocation.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free.clear();
        self.head = None;
        self.tail = None;
        self.len = 0;
    }

    /// Iterates the values front to back.
    #[cfg(test)]
    pub(crate) fn iter(&self) -> OrderIter<'_, T> {
        OrderIter {
            list: self,
            current: self.head,
        }
    }
}

/// Front-to-back iterator over an [`OrderList`].
#[cfg(test)]
#[derive(Debug)]
pub(crate) struct OrderIter<'a, T> {
    list: &'a OrderList<T>,
    current: Option<SlotId>,
}

#[cfg(test)]
impl<'a, T> Iterator for OrderIter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        let id = self.current?;
        let node = self.list.nodes[id.0].as_ref()?;
        self.current = node.next;
        Some(&node.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn collect<T: Copy>(list: &OrderList<T>) -> Vec<T> {
        list.iter().copied().collect()
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = OrderList::with_capacity(4);
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(collect(&list), [3, 2, 1]);
        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&3));
        assert_eq!(list.back(), Some(&1));
    }

    #[test]
    fn test_pop_back_returns_oldest() {
        let mut list = OrderList::with_capacity(2);
        list.push_front("a");
        list.push_front("b");
        assert_eq!(list.pop_back(), Some("a"));
        assert_eq!(list.pop_back(), Some("b"));
        assert_eq!(list.pop_back(), None);
        assert!(list.is_empty());
    }

    #[test]
    fn test_pop_front_returns_newest() {
        let mut list = OrderList::with_capacity(2);
        list.push_front("a");
        list.push_front("b");
        assert_eq!(list.pop_front(), Some("b"));
        assert_eq!(list.pop_front(), Some("a"));
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn test_remove_middle_relinks_neighbours() {
        let mut list = OrderList::with_capacity(4);
        let _c = list.push_front(1);
        let b = list.push_front(2);
        let _a = list.push_front(3);
        assert_eq!(list.remove(b), Some(2));
        assert_eq!(collect(&list), [3, 1]);
        // Removing twice is a no-op.
        assert_eq!(list.remove(b), None);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_remove_head_and_tail() {
        let mut list = OrderList::with_capacity(4);
        let c = list.push_front(1);
        list.push_front(2);
        let a = list.push_front(3);
        assert_eq!(list.remove(a), Some(3));
        assert_eq!(list.front(), Some(&2));
        assert_eq!(list.remove(c), Some(1));
        assert_eq!(list.back(), Some(&2));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_move_to_front_from_back() {
        let mut list = OrderList::with_capacity(4);
        let c = list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert!(list.move_to_front(c));
        assert_eq!(collect(&list), [1, 3, 2]);
        assert_eq!(list.back(), Some(&2));
    }

    #[test]
    fn test_move_to_front_of_head_is_noop() {
        let mut list = OrderList::with_capacity(2);
        list.push_front(1);
        let b = list.push_front(2);
        assert!(list.move_to_front(b));
        assert_eq!(collect(&list), [2, 1]);
    }

    #[test]
    fn test_move_to_front_single_element() {
        let mut list = OrderList::with_capacity(1);
        let a = list.push_front(7);
        assert!(list.move_to_front(a));
        assert_eq!(collect(&list), [7]);
        assert_eq!(list.front_id(), Some(a));
        assert_eq!(list.back_id(), Some(a));
    }

    #[test]
    fn test_slots_are_recycled() {
        let mut list = OrderList::with_capacity(2);
        for i in 0..100 {
            list.push_front(i);
            if list.len() > 2 {
                list.pop_back();
            }
        }
        // Arena never grows past capacity + 1 under steady churn.
        assert!(list.nodes.len() <= 3);
        assert_eq!(collect(&list), [99, 98]);
    }

    #[test]
    fn test_stale_id_after_recycle_points_at_new_value() {
        let mut list = OrderList::with_capacity(2);
        let a = list.push_front(1);
        list.remove(a);
        let b = list.push_front(2);
        // The slot is reused; the old handle now aliases the new node. The
        // caches never retain ids across removal, this just pins the model.
        assert_eq!(a, b);
        assert_eq!(list.get(a), Some(&2));
    }

    #[test]
    fn test_clear() {
        let mut list = OrderList::with_capacity(4);
        list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
        list.push_front(3);
        assert_eq!(collect(&list), [3]);
    }

    #[test]
    fn test_get_mut() {
        let mut list = OrderList::with_capacity(2);
        let a = list.push_front(10);
        if let Some(v) = list.get_mut(a) {
            *v = 20;
        }
        assert_eq!(list.get(a), Some(&20));
    }
}

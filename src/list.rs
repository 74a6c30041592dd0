extern crate alloc;

use alloc::fmt;
use alloc::vec::Vec;
use core::iter::FusedIterator;
use core::marker::PhantomData;
use core::mem;

/// Link value marking the end of a chain.
const NIL: usize = usize::MAX;

/// A stable handle to an entry in a [`List`].
///
/// The handle is a plain index into the list's slab. It stays valid until the
/// entry it names is removed; after that the slot may be reused by a later
/// insertion, so callers must drop handles together with the entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SlotId(usize);

impl SlotId {
    /// Returns the raw slab index.
    #[cfg(test)]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A live entry: the value plus its neighbours in recency order.
#[derive(Clone)]
struct Entry<T> {
    val: T,
    prev: usize,
    next: usize,
}

#[derive(Clone)]
enum Slot<T> {
    Occupied(Entry<T>),
    /// A free slot, linked to the next free slot.
    Vacant(usize),
}

impl<T> Slot<T> {
    fn entry(&self) -> Option<&Entry<T>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant(_) => None,
        }
    }

    fn entry_mut(&mut self) -> Option<&mut Entry<T>> {
        match self {
            Slot::Occupied(entry) => Some(entry),
            Slot::Vacant(_) => None,
        }
    }
}

/// A doubly linked list whose nodes live in a slab.
///
/// Nodes are addressed by [`SlotId`] and linked through `prev`/`next` indices,
/// so moving or unlinking a node never invalidates the handles of other nodes.
/// Vacated slots are threaded onto a free list and reused by the next
/// insertion, keeping the slab no larger than the peak number of live entries.
///
/// The front of the list is the most recently attached entry.
///
/// # Examples
///
/// ```ignore
/// let mut list = List::with_capacity(4);
/// let a = list.push_front(1);
/// let _b = list.push_front(2);
/// list.move_to_front(a);
/// assert_eq!(list.front(), Some(&1));
/// ```
#[derive(Clone)]
pub struct List<T> {
    slots: Vec<Slot<T>>,
    head: usize,
    tail: usize,
    free: usize,
    len: usize,
}

impl<T> List<T> {
    /// Creates an empty list with room for `capacity` entries before the slab
    /// has to grow.
    pub fn with_capacity(capacity: usize) -> List<T> {
        List {
            slots: Vec::with_capacity(capacity),
            head: NIL,
            tail: NIL,
            free: NIL,
            len: 0,
        }
    }

    /// Returns the current number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list holds no entries.
    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Handle of the front (most recently attached) entry.
    pub fn front_id(&self) -> Option<SlotId> {
        (self.head != NIL).then_some(SlotId(self.head))
    }

    /// Handle of the back (least recently attached) entry.
    pub fn back_id(&self) -> Option<SlotId> {
        (self.tail != NIL).then_some(SlotId(self.tail))
    }

    pub fn front(&self) -> Option<&T> {
        self.front_id().and_then(|id| self.get(id))
    }

    pub fn back(&self) -> Option<&T> {
        self.back_id().and_then(|id| self.get(id))
    }

    /// Returns the value behind `id`, or `None` if the slot is vacant.
    pub fn get(&self, id: SlotId) -> Option<&T> {
        self.slots
            .get(id.0)
            .and_then(Slot::entry)
            .map(|entry| &entry.val)
    }

    pub fn get_mut(&mut self, id: SlotId) -> Option<&mut T> {
        self.slots
            .get_mut(id.0)
            .and_then(Slot::entry_mut)
            .map(|entry| &mut entry.val)
    }

    /// Adds a value to the front of the list and returns its handle.
    ///
    /// Reuses a vacant slot when one is available.
    pub fn push_front(&mut self, val: T) -> SlotId {
        let entry = Entry {
            val,
            prev: NIL,
            next: NIL,
        };
        let idx = if self.free != NIL {
            let idx = self.free;
            self.free = match self.slots[idx] {
                Slot::Vacant(next_free) => next_free,
                Slot::Occupied(_) => NIL,
            };
            self.slots[idx] = Slot::Occupied(entry);
            idx
        } else {
            self.slots.push(Slot::Occupied(entry));
            self.slots.len() - 1
        };
        self.attach(idx);
        self.len += 1;
        SlotId(idx)
    }

    /// Unlinks the entry behind `id`, frees its slot and returns the value.
    ///
    /// Returns `None` if `id` does not name a live entry.
    pub fn remove(&mut self, id: SlotId) -> Option<T> {
        self.slots.get(id.0).and_then(Slot::entry)?;
        self.detach(id.0);
        let slot = mem::replace(&mut self.slots[id.0], Slot::Vacant(self.free));
        self.free = id.0;
        self.len -= 1;
        match slot {
            Slot::Occupied(entry) => Some(entry.val),
            Slot::Vacant(_) => None,
        }
    }

    /// Removes the back entry.
    pub fn pop_back(&mut self) -> Option<T> {
        let id = self.back_id()?;
        self.remove(id)
    }

    /// Removes the front entry.
    pub fn pop_front(&mut self) -> Option<T> {
        let id = self.front_id()?;
        self.remove(id)
    }

    /// Moves the entry behind `id` to the front of the list.
    ///
    /// Returns false if `id` does not name a live entry.
    pub fn move_to_front(&mut self, id: SlotId) -> bool {
        if self.slots.get(id.0).and_then(Slot::entry).is_none() {
            return false;
        }
        if self.head != id.0 {
            self.detach(id.0);
            self.attach(id.0);
        }
        true
    }

    /// Drops every entry; the slab keeps its allocation.
    pub fn clear(&mut self) {
        self.slots.clear();
        self.head = NIL;
        self.tail = NIL;
        self.free = NIL;
        self.len = 0;
    }

    /// Iterates front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            slots: &self.slots,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Iterates front to back with mutable access to the values.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            slots: self.slots.as_mut_ptr(),
            slot_count: self.slots.len(),
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    fn links(&self, idx: usize) -> (usize, usize) {
        match &self.slots[idx] {
            Slot::Occupied(entry) => (entry.prev, entry.next),
            Slot::Vacant(_) => (NIL, NIL),
        }
    }

    fn set_prev(&mut self, idx: usize, prev: usize) {
        if let Slot::Occupied(entry) = &mut self.slots[idx] {
            entry.prev = prev;
        }
    }

    fn set_next(&mut self, idx: usize, next: usize) {
        if let Slot::Occupied(entry) = &mut self.slots[idx] {
            entry.next = next;
        }
    }

    /// Unlinks `idx` from its neighbours. The slot stays occupied.
    fn detach(&mut self, idx: usize) {
        let (prev, next) = self.links(idx);
        if prev == NIL {
            self.head = next;
        } else {
            self.set_next(prev, next);
        }
        if next == NIL {
            self.tail = prev;
        } else {
            self.set_prev(next, prev);
        }
        self.set_prev(idx, NIL);
        self.set_next(idx, NIL);
    }

    /// Links a detached, occupied slot in at the front.
    fn attach(&mut self, idx: usize) {
        let old_head = self.head;
        self.set_prev(idx, NIL);
        self.set_next(idx, old_head);
        if old_head == NIL {
            self.tail = idx;
        } else {
            self.set_prev(old_head, idx);
        }
        self.head = idx;
    }
}

impl<T: fmt::Debug> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Borrowing iterator over a [`List`], front to back.
pub struct Iter<'a, T> {
    slots: &'a [Slot<T>],
    front: usize,
    back: usize,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.get(self.front).and_then(Slot::entry)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some(&entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.slots.get(self.back).and_then(Slot::entry)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some(&entry.val)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

impl<T> Clone for Iter<'_, T> {
    fn clone(&self) -> Self {
        Iter { ..*self }
    }
}

impl<T: fmt::Debug> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}

/// Mutable iterator over a [`List`], front to back.
pub struct IterMut<'a, T> {
    slots: *mut Slot<T>,
    slot_count: usize,
    front: usize,
    back: usize,
    remaining: usize,
    _marker: PhantomData<&'a mut [Slot<T>]>,
}

impl<'a, T> IterMut<'a, T> {
    /// Returns the entry at `idx` with the iterator's full lifetime.
    fn entry_at(&mut self, idx: usize) -> Option<&'a mut Entry<T>> {
        if idx >= self.slot_count {
            return None;
        }
        // SAFETY: `slots` points to `slot_count` initialized slots that are
        // exclusively borrowed for 'a. Every live entry sits on the chain
        // exactly once and `remaining` stops the walk before the front and
        // back cursors cross, so no slot is ever handed out twice.
        let slot = unsafe { &mut *self.slots.add(idx) };
        slot.entry_mut()
    }
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.entry_at(self.front)?;
        self.front = entry.next;
        self.remaining -= 1;
        Some(&mut entry.val)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for IterMut<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let entry = self.entry_at(self.back)?;
        self.back = entry.prev;
        self.remaining -= 1;
        Some(&mut entry.val)
    }
}

impl<T> ExactSizeIterator for IterMut<'_, T> {}

impl<T> FusedIterator for IterMut<'_, T> {}

impl<T> fmt::Debug for IterMut<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IterMut")
            .field("remaining", &self.remaining)
            .finish()
    }
}

// SAFETY: IterMut behaves like `&'a mut [Slot<T>]`.
unsafe impl<T: Send> Send for IterMut<'_, T> {}

// SAFETY: shared access to IterMut only reads its cursors.
unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::String;
    use alloc::vec;

    fn collect<T: Clone>(list: &List<T>) -> Vec<T> {
        list.iter().cloned().collect()
    }

    #[test]
    fn test_push_front_orders_newest_first() {
        let mut list = List::with_capacity(3);
        list.push_front(10);
        list.push_front(20);
        list.push_front(30);
        assert_eq!(list.len(), 3);
        assert_eq!(collect(&list), vec![30, 20, 10]);
        assert_eq!(list.front(), Some(&30));
        assert_eq!(list.back(), Some(&10));
    }

    #[test]
    fn test_get_and_get_mut() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(String::from("a"));
        let b = list.push_front(String::from("b"));
        assert_eq!(list.get(a).map(String::as_str), Some("a"));
        if let Some(v) = list.get_mut(b) {
            v.push('!');
        }
        assert_eq!(list.get(b).map(String::as_str), Some("b!"));
        assert_eq!(list.get(SlotId(99)), None);
    }

    #[test]
    fn test_remove_middle_front_and_back() {
        let mut list = List::with_capacity(4);
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);
        let d = list.push_front(4);

        assert_eq!(list.remove(b), Some(2));
        assert_eq!(collect(&list), vec![4, 3, 1]);
        assert_eq!(list.remove(d), Some(4));
        assert_eq!(collect(&list), vec![3, 1]);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(collect(&list), vec![3]);
        assert_eq!(list.front_id(), Some(c));
        assert_eq!(list.back_id(), Some(c));
        assert_eq!(list.remove(c), Some(3));
        assert!(list.is_empty());
        assert_eq!(list.front_id(), None);
        assert_eq!(list.back_id(), None);
    }

    #[test]
    fn test_remove_stale_handle_is_noop() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(1);
        list.push_front(2);
        assert_eq!(list.remove(a), Some(1));
        assert_eq!(list.remove(a), None);
        assert!(!list.move_to_front(a));
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_slots_are_reused() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(1);
        let b = list.push_front(2);
        list.remove(a);
        list.remove(b);
        let c = list.push_front(3);
        let d = list.push_front(4);
        // Free list is LIFO.
        assert_eq!(c.index(), b.index());
        assert_eq!(d.index(), a.index());
        assert_eq!(list.slots.len(), 2);
        assert_eq!(collect(&list), vec![4, 3]);
    }

    #[test]
    fn test_move_to_front() {
        let mut list = List::with_capacity(3);
        let a = list.push_front(1);
        let b = list.push_front(2);
        let c = list.push_front(3);

        assert!(list.move_to_front(a));
        assert_eq!(collect(&list), vec![1, 3, 2]);
        assert!(list.move_to_front(b));
        assert_eq!(collect(&list), vec![2, 1, 3]);
        // Already at the front.
        assert!(list.move_to_front(b));
        assert_eq!(collect(&list), vec![2, 1, 3]);
        assert_eq!(list.back_id(), Some(c));
        assert_eq!(list.len(), 3);
    }

    #[test]
    fn test_pop_back_and_front() {
        let mut list = List::with_capacity(3);
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        assert_eq!(list.pop_back(), Some(1));
        assert_eq!(list.pop_front(), Some(3));
        assert_eq!(list.pop_back(), Some(2));
        assert_eq!(list.pop_back(), None);
        assert_eq!(list.pop_front(), None);
    }

    #[test]
    fn test_clear() {
        let mut list = List::with_capacity(3);
        let a = list.push_front(1);
        list.push_front(2);
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.get(a), None);
        assert_eq!(list.iter().count(), 0);
        list.push_front(5);
        assert_eq!(collect(&list), vec![5]);
    }

    #[test]
    fn test_iter_double_ended() {
        let mut list = List::with_capacity(4);
        for i in 1..=4 {
            list.push_front(i);
        }
        let mut iter = list.iter();
        assert_eq!(iter.len(), 4);
        assert_eq!(iter.next(), Some(&4));
        assert_eq!(iter.next_back(), Some(&1));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next_back(), Some(&2));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);

        let reversed: Vec<i32> = list.iter().rev().copied().collect();
        assert_eq!(reversed, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_iter_mut() {
        let mut list = List::with_capacity(3);
        list.push_front(1);
        list.push_front(2);
        list.push_front(3);
        for v in list.iter_mut() {
            *v *= 10;
        }
        assert_eq!(collect(&list), vec![30, 20, 10]);

        let mut iter = list.iter_mut();
        if let Some(last) = iter.next_back() {
            *last = 0;
        }
        assert_eq!(iter.len(), 2);
        assert_eq!(collect(&list), vec![30, 20, 0]);
    }

    #[test]
    fn test_length_consistency_after_complex_operations() {
        let mut list = List::with_capacity(5);
        let mut ids = Vec::new();
        for i in 0..5 {
            ids.push(list.push_front(i));
        }
        list.move_to_front(ids[0]);
        list.remove(ids[2]);
        list.move_to_front(ids[4]);
        list.pop_back();
        list.push_front(9);
        assert_eq!(list.len(), list.iter().count());
        assert_eq!(list.len(), list.iter().rev().count());
        assert_eq!(collect(&list), vec![9, 4, 0, 3]);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut list = List::with_capacity(2);
        let a = list.push_front(1);
        list.push_front(2);
        let copy = list.clone();
        list.remove(a);
        assert_eq!(collect(&copy), vec![2, 1]);
        assert_eq!(collect(&list), vec![2]);
    }
}

//! Type-erased doubly-linked list.
//!
//! [`RawList`] stores elements of a type it only knows through a
//! [`TypeInfo`]: each node owns one slot of the descriptor's layout, filled
//! by the descriptor's `copy` and emptied by its `destroy`. Node links are
//! arena indices; `next` and `prev` are plain indices and neither owns
//! anything, the arena owns every node record.
//!
//! For a concrete Rust type, [`List`](crate::List) wraps this with a safe,
//! typed API.
//!
//! # Example
//!
//! ```
//! use nexus_lists::{RawList, TypeInfo};
//!
//! let ty = TypeInfo::of::<u32>();
//! let mut list = RawList::new(&ty).unwrap();
//!
//! for value in [1u32, 2] {
//!     unsafe { list.push_back((&value as *const u32).cast()) }.unwrap();
//! }
//! unsafe { list.push_front((&0u32 as *const u32).cast()) }.unwrap();
//!
//! let values: Vec<u32> = list
//!     .iter()
//!     .map(|ptr| unsafe { *ptr.cast::<u32>().as_ref() })
//!     .collect();
//! assert_eq!(values, [0, 1, 2]);
//! ```
//!
//! # Cursors
//!
//! [`begin`](RawList::begin) and friends return a [`Cursor`] positioned on
//! an end element. Cursors are walked with [`advance`](RawList::advance)
//! and read with [`get`](RawList::get):
//!
//! ```
//! use nexus_lists::{RawList, TypeInfo};
//!
//! let ty = TypeInfo::of::<u32>();
//! let mut list = RawList::new(&ty).unwrap();
//! for value in [1u32, 2, 3] {
//!     unsafe { list.push_back((&value as *const u32).cast()) }.unwrap();
//! }
//!
//! let mut seen = Vec::new();
//! let mut cursor = list.rbegin().unwrap();
//! loop {
//!     seen.push(unsafe { *list.get(&cursor).unwrap().cast::<u32>().as_ref() });
//!     if !list.advance(&mut cursor).unwrap() {
//!         break;
//!     }
//! }
//! assert_eq!(seen, [3, 2, 1]);
//! ```

use std::alloc::Layout;
use std::fmt;
use std::mem;
use std::ptr::NonNull;
use std::sync::atomic::{AtomicU64, Ordering};

use log::{debug, trace};

use crate::arena::{Arena, NONE, Node};
use crate::cursor::Position;
use crate::type_info::{CopyFn, DestroyFn};
use crate::{Cursor, Direction, Error, Global, RawAlloc, Result, TypeInfo};

static NEXT_LIST_ID: AtomicU64 = AtomicU64::new(0);

/// A doubly-linked list of type-erased elements.
///
/// # Type Parameters
///
/// - `'t`: lifetime of the borrowed [`TypeInfo`]
/// - `A`: allocator for element slots (default [`Global`])
pub struct RawList<'t, A: RawAlloc = Global> {
    id: u64,
    ty: &'t TypeInfo,
    layout: Layout,
    copy: CopyFn,
    destroy: DestroyFn,
    nodes: Arena,
    head: u32,
    tail: u32,
    len: usize,
    alloc: A,
}

impl<'t> RawList<'t, Global> {
    /// Creates an empty list of elements described by `ty`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `ty` fails [`TypeInfo::validate`].
    #[inline]
    pub fn new(ty: &'t TypeInfo) -> Result<Self> {
        Self::new_in(ty, Global)
    }
}

impl<'t, A: RawAlloc> RawList<'t, A> {
    /// Creates an empty list that takes element slots from `alloc`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `ty` fails [`TypeInfo::validate`].
    pub fn new_in(ty: &'t TypeInfo, alloc: A) -> Result<Self> {
        let resolved = ty.resolve().inspect_err(|_| {
            debug!("rejected type descriptor {ty:?}");
        })?;

        let id = NEXT_LIST_ID.fetch_add(1, Ordering::Relaxed);
        trace!("list {id}: created, element layout {:?}", resolved.layout);

        Ok(Self {
            id,
            ty,
            layout: resolved.layout,
            copy: resolved.copy,
            destroy: resolved.destroy,
            nodes: Arena::new(),
            head: NONE,
            tail: NONE,
            len: 0,
            alloc,
        })
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the descriptor this list was created with.
    #[inline]
    pub const fn type_info(&self) -> &'t TypeInfo {
        self.ty
    }

    /// Returns the slot allocator.
    #[inline]
    pub const fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Returns the slot allocator mutably.
    #[inline]
    pub fn allocator_mut(&mut self) -> &mut A {
        &mut self.alloc
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Adds a copy of `*value` at the front of the list.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `value` is null.
    /// - [`Error::OutOfMemory`] if allocation fails; the list is unchanged.
    ///
    /// # Safety
    ///
    /// A non-null `value` must point to a constructed element of the type
    /// this list's descriptor describes.
    #[inline]
    pub unsafe fn push_front(&mut self, value: *const u8) -> Result<()> {
        let value = NonNull::new(value.cast_mut()).ok_or(Error::InvalidArgument)?;
        let index = unsafe { self.create_node(value) }?;
        self.link_front(index);
        Ok(())
    }

    /// Adds a copy of `*value` at the back of the list.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `value` is null.
    /// - [`Error::OutOfMemory`] if allocation fails; the list is unchanged.
    ///
    /// # Safety
    ///
    /// Same as [`push_front`](Self::push_front).
    #[inline]
    pub unsafe fn push_back(&mut self, value: *const u8) -> Result<()> {
        let value = NonNull::new(value.cast_mut()).ok_or(Error::InvalidArgument)?;
        let index = unsafe { self.create_node(value) }?;
        self.link_back(index);
        Ok(())
    }

    /// Inserts a copy of `*value` at the position of `cursor`, then points
    /// `cursor` at the new element.
    ///
    /// The new element takes the cursor's place in the cursor's walking
    /// order: advancing from it reaches the element the cursor was on.
    /// For a forward cursor that means it is linked before the current
    /// element, for a backward cursor after it. An exhausted forward
    /// cursor appends at the back; an exhausted backward cursor, at the
    /// front. Only links move; existing elements are not copied.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `value` is null, or `cursor` is stale
    ///   or belongs to another list.
    /// - [`Error::OutOfMemory`] if allocation fails; the list and `cursor`
    ///   are unchanged.
    ///
    /// # Safety
    ///
    /// Same as [`push_front`](Self::push_front).
    pub unsafe fn insert(&mut self, cursor: &mut Cursor, value: *const u8) -> Result<()> {
        let value = NonNull::new(value.cast_mut()).ok_or(Error::InvalidArgument)?;
        let at = self.resolve(cursor)?;
        let index = unsafe { self.create_node(value) }?;

        match (at, cursor.direction) {
            (Some(at), Direction::Forward) => self.link_before(at, index),
            (Some(at), Direction::Backward) => self.link_after(at, index),
            (None, Direction::Forward) => self.link_back(index),
            (None, Direction::Backward) => self.link_front(index),
        }

        cursor.position = Position::Node(self.nodes.id(index));
        Ok(())
    }

    /// Allocates an unlinked node holding a copy of `*value`.
    ///
    /// Nothing observable changes unless this returns `Ok`.
    unsafe fn create_node(&mut self, value: NonNull<u8>) -> Result<u32> {
        self.nodes.try_reserve().inspect_err(|_| {
            debug!("list {}: node table growth failed", self.id);
        })?;

        let Some(slot) = self.alloc.allocate(self.layout) else {
            debug!("list {}: element allocation failed ({:?})", self.id, self.layout);
            return Err(Error::OutOfMemory);
        };

        // Releases the slot if `copy` unwinds
        let guard = SlotGuard {
            alloc: &mut self.alloc,
            slot,
            layout: self.layout,
        };
        // Safety: slot is fresh with the descriptor's layout; value points
        // to a constructed element (caller contract)
        unsafe { (self.copy)(slot, value) };
        mem::forget(guard);

        Ok(self.nodes.insert(Node::new(slot)).index)
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Destroys and removes the front element.
    ///
    /// Returns `false`, doing nothing, if the list is empty.
    #[inline]
    pub fn pop_front(&mut self) -> bool {
        if self.head == NONE {
            return false;
        }

        let index = self.head;
        self.unlink(index);
        self.release(index);
        true
    }

    /// Destroys and removes the back element.
    ///
    /// Returns `false`, doing nothing, if the list is empty.
    #[inline]
    pub fn pop_back(&mut self) -> bool {
        if self.tail == NONE {
            return false;
        }

        let index = self.tail;
        self.unlink(index);
        self.release(index);
        true
    }

    /// Destroys every element, front to back.
    ///
    /// Cursors into the list become stale. If `destroy` panics, the
    /// remaining elements are still destroyed and the list is left empty.
    pub fn clear(&mut self) {
        // Detach first: the list is empty whatever happens below
        let mut index = mem::replace(&mut self.head, NONE);
        self.tail = NONE;
        self.len = 0;

        while index != NONE {
            // Safety: index came from traversing the detached chain
            let next = unsafe { self.nodes.get_unchecked(index) }.next;
            let mut guard = ReleaseChain { list: self, next };
            guard.list.release(index);
            mem::forget(guard);
            index = next;
        }
    }

    /// Removes an unlinked node from the arena, destroys its element and
    /// frees its slot.
    #[inline]
    fn release(&mut self, index: u32) {
        if let Some(node) = self.nodes.remove(index) {
            // Frees the slot after destroy, or if destroy unwinds
            let _slot = SlotGuard {
                alloc: &mut self.alloc,
                slot: node.slot,
                layout: self.layout,
            };
            // Safety: slot holds a constructed element
            unsafe { (self.destroy)(node.slot) };
        }
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a pointer to the front element.
    #[inline]
    pub fn front(&self) -> Option<NonNull<u8>> {
        if self.head == NONE {
            None
        } else {
            // Safety: head is valid when not NONE
            Some(unsafe { self.nodes.get_unchecked(self.head) }.slot)
        }
    }

    /// Returns a pointer to the back element.
    #[inline]
    pub fn back(&self) -> Option<NonNull<u8>> {
        if self.tail == NONE {
            None
        } else {
            // Safety: tail is valid when not NONE
            Some(unsafe { self.nodes.get_unchecked(self.tail) }.slot)
        }
    }

    /// Returns an iterator over element pointers, front to back.
    #[inline]
    pub fn iter(&self) -> RawIter<'_, A> {
        RawIter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    // ========================================================================
    // Cursor construction
    // ========================================================================

    /// Forward cursor on the first element, or `None` if empty.
    #[inline]
    pub fn begin(&self) -> Option<Cursor> {
        self.cursor_at(self.head, Direction::Forward)
    }

    /// Forward cursor on the last element, or `None` if empty.
    ///
    /// This is the last element itself, not a past-the-end position, so
    /// [`insert`](Self::insert) through it links the new element *before*
    /// the last one. To append through a cursor, [`advance`](Self::advance)
    /// it once first; inserting at the resulting past-the-end position is
    /// the same as [`push_back`](Self::push_back).
    ///
    /// ```
    /// use nexus_lists::{List, TypeInfo};
    ///
    /// let ty = TypeInfo::of::<u32>();
    /// let mut list: List<u32> = List::new(&ty).unwrap();
    /// list.push_back(&1).unwrap();
    /// list.push_back(&3).unwrap();
    ///
    /// let mut cursor = list.end().unwrap();
    /// list.insert(&mut cursor, &2).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
    ///
    /// let mut cursor = list.end().unwrap();
    /// assert!(!list.advance(&mut cursor).unwrap());
    /// list.insert(&mut cursor, &4).unwrap();
    /// assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3, 4]);
    /// ```
    #[inline]
    pub fn end(&self) -> Option<Cursor> {
        self.cursor_at(self.tail, Direction::Forward)
    }

    /// Backward cursor on the last element, or `None` if empty.
    #[inline]
    pub fn rbegin(&self) -> Option<Cursor> {
        self.cursor_at(self.tail, Direction::Backward)
    }

    /// Backward cursor on the first element, or `None` if empty.
    #[inline]
    pub fn rend(&self) -> Option<Cursor> {
        self.cursor_at(self.head, Direction::Backward)
    }

    #[inline]
    fn cursor_at(&self, index: u32, direction: Direction) -> Option<Cursor> {
        if index == NONE {
            return None;
        }
        let position = Position::Node(self.nodes.id(index));
        Some(Cursor::new(self.id, position, direction))
    }

    // ========================================================================
    // Cursor traversal
    // ========================================================================

    /// Returns a pointer to the element under `cursor`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `cursor` is exhausted, stale, or
    /// belongs to another list.
    #[inline]
    pub fn get(&self, cursor: &Cursor) -> Result<NonNull<u8>> {
        let index = self.resolve(cursor)?.ok_or(Error::InvalidArgument)?;
        // Safety: resolve only returns live indices
        Ok(unsafe { self.nodes.get_unchecked(index) }.slot)
    }

    /// Moves `cursor` one element in its direction.
    ///
    /// Returns `true` if the cursor is on an element afterwards. Stepping
    /// off the last element exhausts the cursor and returns `false`; an
    /// exhausted cursor stays exhausted.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `cursor` is stale or belongs to
    /// another list.
    #[inline]
    pub fn advance(&self, cursor: &mut Cursor) -> Result<bool> {
        let Some(index) = self.resolve(cursor)? else {
            return Ok(false);
        };

        let next = self.step(index, cursor.direction);
        if next == NONE {
            cursor.position = Position::End;
            Ok(false)
        } else {
            cursor.position = Position::Node(self.nodes.id(next));
            Ok(true)
        }
    }

    /// Returns `true` if [`advance`](Self::advance) would land on an
    /// element.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `cursor` is stale or belongs to
    /// another list.
    #[inline]
    pub fn has_next(&self, cursor: &Cursor) -> Result<bool> {
        Ok(match self.resolve(cursor)? {
            Some(index) => self.step(index, cursor.direction) != NONE,
            None => false,
        })
    }

    /// Checks `cursor` against this list.
    ///
    /// Returns the live node index, or `None` for an exhausted cursor.
    #[inline]
    fn resolve(&self, cursor: &Cursor) -> Result<Option<u32>> {
        if cursor.list != self.id {
            return Err(Error::InvalidArgument);
        }
        match cursor.position {
            Position::End => Ok(None),
            Position::Node(id) if self.nodes.contains(id) => Ok(Some(id.index)),
            Position::Node(_) => Err(Error::InvalidArgument),
        }
    }

    #[inline]
    fn step(&self, index: u32, direction: Direction) -> u32 {
        // Safety: callers pass live indices
        let node = unsafe { self.nodes.get_unchecked(index) };
        match direction {
            Direction::Forward => node.next,
            Direction::Backward => node.prev,
        }
    }

    // ========================================================================
    // Linking
    // ========================================================================

    #[inline]
    fn link_back(&mut self, index: u32) {
        // Safety: index is a freshly inserted node
        let node = unsafe { self.nodes.get_unchecked_mut(index) };
        node.prev = self.tail;
        node.next = NONE;

        if self.tail != NONE {
            // Safety: tail is valid when not NONE
            unsafe { self.nodes.get_unchecked_mut(self.tail) }.next = index;
        } else {
            self.head = index;
        }

        self.tail = index;
        self.len += 1;
    }

    #[inline]
    fn link_front(&mut self, index: u32) {
        // Safety: index is a freshly inserted node
        let node = unsafe { self.nodes.get_unchecked_mut(index) };
        node.next = self.head;
        node.prev = NONE;

        if self.head != NONE {
            // Safety: head is valid when not NONE
            unsafe { self.nodes.get_unchecked_mut(self.head) }.prev = index;
        } else {
            self.tail = index;
        }

        self.head = index;
        self.len += 1;
    }

    #[inline]
    fn link_before(&mut self, before: u32, index: u32) {
        // Safety: before was resolved as live
        let prev = unsafe { self.nodes.get_unchecked(before) }.prev;
        let node = unsafe { self.nodes.get_unchecked_mut(index) };
        node.next = before;
        node.prev = prev;

        unsafe { self.nodes.get_unchecked_mut(before) }.prev = index;

        if prev != NONE {
            // Safety: prev is valid when not NONE (list invariant)
            unsafe { self.nodes.get_unchecked_mut(prev) }.next = index;
        } else {
            self.head = index;
        }

        self.len += 1;
    }

    #[inline]
    fn link_after(&mut self, after: u32, index: u32) {
        // Safety: after was resolved as live
        let next = unsafe { self.nodes.get_unchecked(after) }.next;
        let node = unsafe { self.nodes.get_unchecked_mut(index) };
        node.prev = after;
        node.next = next;

        unsafe { self.nodes.get_unchecked_mut(after) }.next = index;

        if next != NONE {
            // Safety: next is valid when not NONE (list invariant)
            unsafe { self.nodes.get_unchecked_mut(next) }.prev = index;
        } else {
            self.tail = index;
        }

        self.len += 1;
    }

    #[inline]
    fn unlink(&mut self, index: u32) {
        // Safety: callers pass linked nodes
        let node = unsafe { self.nodes.get_unchecked(index) };
        let prev = node.prev;
        let next = node.next;

        if prev != NONE {
            unsafe { self.nodes.get_unchecked_mut(prev) }.next = next;
        } else {
            self.head = next;
        }

        if next != NONE {
            unsafe { self.nodes.get_unchecked_mut(next) }.prev = prev;
        } else {
            self.tail = prev;
        }

        let node = unsafe { self.nodes.get_unchecked_mut(index) };
        node.prev = NONE;
        node.next = NONE;

        self.len -= 1;
    }
}

impl<A: RawAlloc> Drop for RawList<'_, A> {
    fn drop(&mut self) {
        trace!("list {}: destroying {} elements", self.id, self.len);
        self.clear();
        debug_assert_eq!(self.nodes.len(), 0);
    }
}

impl<A: RawAlloc> fmt::Debug for RawList<'_, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RawList")
            .field("id", &self.id)
            .field("len", &self.len)
            .field("layout", &self.layout)
            .finish_non_exhaustive()
    }
}

/// Frees an element slot when dropped.
struct SlotGuard<'a, A: RawAlloc> {
    alloc: &'a mut A,
    slot: NonNull<u8>,
    layout: Layout,
}

impl<A: RawAlloc> Drop for SlotGuard<'_, A> {
    fn drop(&mut self) {
        // Safety: slot came from this allocator and holds no element
        unsafe { self.alloc.deallocate(self.slot, self.layout) }
    }
}

/// Releases the rest of a detached chain if a `destroy` in
/// [`RawList::clear`] unwinds.
struct ReleaseChain<'l, 't, A: RawAlloc> {
    list: &'l mut RawList<'t, A>,
    next: u32,
}

impl<A: RawAlloc> Drop for ReleaseChain<'_, '_, A> {
    fn drop(&mut self) {
        while self.next != NONE {
            let index = self.next;
            // Safety: index is a node of the detached chain, not yet released
            self.next = unsafe { self.list.nodes.get_unchecked(index) }.next;
            self.list.release(index);
        }
    }
}

// =============================================================================
// Iterator
// =============================================================================

/// Iterator over element pointers of a [`RawList`].
pub struct RawIter<'a, A: RawAlloc = Global> {
    list: &'a RawList<'a, A>,
    front: u32,
    back: u32,
    remaining: usize,
}

impl<A: RawAlloc> Iterator for RawIter<'_, A> {
    type Item = NonNull<u8>;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: list invariants guarantee front is valid while remaining > 0
        let node = unsafe { self.list.nodes.get_unchecked(self.front) };
        self.front = node.next;
        self.remaining -= 1;
        Some(node.slot)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<A: RawAlloc> DoubleEndedIterator for RawIter<'_, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        // Safety: list invariants guarantee back is valid while remaining > 0
        let node = unsafe { self.list.nodes.get_unchecked(self.back) };
        self.back = node.prev;
        self.remaining -= 1;
        Some(node.slot)
    }
}

impl<A: RawAlloc> ExactSizeIterator for RawIter<'_, A> {}

impl<A: RawAlloc> Clone for RawIter<'_, A> {
    fn clone(&self) -> Self {
        Self {
            list: self.list,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
        }
    }
}


#[cfg(test)]
mod bench_global_alloc {
    use super::*;
    use hdrhistogram::Histogram;

    #[inline]
    fn rdtscp() -> u64 {
        #[cfg(target_arch = "x86_64")]
        unsafe {
            core::arch::x86_64::__rdtscp(&mut 0)
        }
        #[cfg(not(target_arch = "x86_64"))]
        {
            std::time::Instant::now().elapsed().as_nanos() as u64
        }
    }

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:4} cycles | p99: {:4} cycles | p999: {:5} cycles | min: {:4} | max: {:5}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    fn push_back(list: &mut RawList<'_>, value: u64) {
        let _ = unsafe { list.push_back((&value as *const u64).cast()) };
    }

    #[test]
    #[ignore]
    fn bench_list_push_back() {
        let ty = TypeInfo::of::<u64>();
        let mut list = RawList::new(&ty).unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            push_back(&mut list, i as u64);
            list.pop_back();
        }

        for i in 0..ITERATIONS {
            let start = rdtscp();
            push_back(&mut list, i as u64);
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
            list.pop_back();
        }

        print_histogram("push_back", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_pop_front() {
        let ty = TypeInfo::of::<u64>();
        let mut list = RawList::new(&ty).unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            push_back(&mut list, i as u64);
            list.pop_front();
        }

        for i in 0..ITERATIONS {
            push_back(&mut list, i as u64);
            let start = rdtscp();
            list.pop_front();
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("pop_front", &hist);
    }

    #[test]
    #[ignore]
    fn bench_list_insert_middle() {
        let ty = TypeInfo::of::<u64>();
        let mut list = RawList::new(&ty).unwrap();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..1000 {
            push_back(&mut list, i);
        }
        let mut cursor = list.begin().unwrap();
        for _ in 0..500 {
            list.advance(&mut cursor).unwrap();
        }

        for i in 0..ITERATIONS {
            let value = i as u64;
            let start = rdtscp();
            let _ = unsafe { list.insert(&mut cursor, (&value as *const u64).cast()) };
            let elapsed = rdtscp() - start;
            hist.record(elapsed).unwrap();
        }

        print_histogram("insert (middle)", &hist);
    }
}

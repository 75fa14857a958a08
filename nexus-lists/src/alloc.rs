//! Element slot allocation.
//!
//! Every list node owns one slot sized and aligned for the element type.
//! Slots come from a [`RawAlloc`], so allocation failure can be surfaced as
//! [`Error::OutOfMemory`](crate::Error::OutOfMemory) instead of aborting,
//! and tests can make it fail on demand with [`Quota`].

use std::alloc::Layout;
use std::ptr::NonNull;

/// Source of element slots.
pub trait RawAlloc {
    /// Allocates a block for `layout`, or returns `None` on failure.
    ///
    /// `layout` always has a non-zero size.
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>>;

    /// Releases a block returned by [`allocate`](Self::allocate).
    ///
    /// # Safety
    ///
    /// `ptr` must come from `allocate` on this allocator with the same
    /// `layout`, and must not be used afterwards.
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout);
}

/// The process-wide allocator.
#[derive(Debug, Default, Clone, Copy)]
pub struct Global;

impl RawAlloc for Global {
    #[inline]
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        debug_assert!(layout.size() > 0);
        // Safety: layout has non-zero size
        NonNull::new(unsafe { std::alloc::alloc(layout) })
    }

    #[inline]
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        // Safety: ptr came from alloc with this layout (caller contract)
        unsafe { std::alloc::dealloc(ptr.as_ptr(), layout) }
    }
}

/// Allocator that succeeds a fixed number of times, then fails.
///
/// Deallocation always goes through to the inner allocator and does not
/// refund the quota.
///
/// # Example
///
/// ```
/// use nexus_lists::{Error, Quota, RawList, TypeInfo};
///
/// let ty = TypeInfo::of::<u32>();
/// let mut list = RawList::new_in(&ty, Quota::new(1)).unwrap();
///
/// let value = 7u32;
/// let ptr = (&value as *const u32).cast::<u8>();
/// unsafe {
///     assert!(list.push_back(ptr).is_ok());
///     assert_eq!(list.push_back(ptr), Err(Error::OutOfMemory));
/// }
/// assert_eq!(list.len(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct Quota<A = Global> {
    inner: A,
    remaining: usize,
}

impl Quota<Global> {
    /// Allows `remaining` allocations from the global allocator.
    #[inline]
    pub const fn new(remaining: usize) -> Self {
        Self::with_inner(Global, remaining)
    }
}

impl<A> Quota<A> {
    /// Allows `remaining` allocations from `inner`.
    #[inline]
    pub const fn with_inner(inner: A, remaining: usize) -> Self {
        Self { inner, remaining }
    }

    /// Allocations left before failures start.
    #[inline]
    pub const fn remaining(&self) -> usize {
        self.remaining
    }

    /// Resets the number of allocations left.
    #[inline]
    pub fn set_remaining(&mut self, remaining: usize) {
        self.remaining = remaining;
    }
}

impl<A: RawAlloc> RawAlloc for Quota<A> {
    #[inline]
    fn allocate(&mut self, layout: Layout) -> Option<NonNull<u8>> {
        if self.remaining == 0 {
            return None;
        }
        let ptr = self.inner.allocate(layout)?;
        self.remaining -= 1;
        Some(ptr)
    }

    #[inline]
    unsafe fn deallocate(&mut self, ptr: NonNull<u8>, layout: Layout) {
        unsafe { self.inner.deallocate(ptr, layout) }
    }
}

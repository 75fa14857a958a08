//! Typed wrapper over [`RawList`].
//!
//! [`List<T>`] takes and returns `&T` instead of raw pointers, so none of its
//! methods are `unsafe`. It is still driven by a [`TypeInfo`]: elements are
//! copied with the descriptor's `copy` and released with its `destroy`.
//!
//! # Example
//!
//! ```
//! use nexus_lists::{List, TypeInfo};
//!
//! let ty = TypeInfo::of::<String>();
//! let mut list: List<String> = List::new(&ty).unwrap();
//!
//! list.push_back(&"b".to_string()).unwrap();
//! list.push_front(&"a".to_string()).unwrap();
//!
//! let mut cursor = list.end().unwrap();
//! list.advance(&mut cursor).unwrap(); // now past the end
//! list.insert(&mut cursor, &"c".to_string()).unwrap();
//!
//! assert_eq!(list.iter().collect::<Vec<_>>(), ["a", "b", "c"]);
//! assert_eq!(list.get(&cursor).unwrap(), "c");
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::list::RawIter;
use crate::{Cursor, Error, Global, RawAlloc, RawList, Result, TypeInfo};

/// A doubly-linked list of `T`.
pub struct List<'t, T, A: RawAlloc = Global> {
    raw: RawList<'t, A>,
    _marker: PhantomData<T>,
}

impl<'t, T: 'static> List<'t, T, Global> {
    /// Creates an empty list.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `ty` is invalid or was not built by
    /// [`TypeInfo::of::<T>`](TypeInfo::of).
    #[inline]
    pub fn new(ty: &'t TypeInfo) -> Result<Self> {
        Self::new_in(ty, Global)
    }
}

impl<'t, T: 'static, A: RawAlloc> List<'t, T, A> {
    /// Creates an empty list that takes element slots from `alloc`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `ty` is invalid or was not built by
    /// [`TypeInfo::of::<T>`](TypeInfo::of).
    pub fn new_in(ty: &'t TypeInfo, alloc: A) -> Result<Self> {
        if !ty.describes::<T>() {
            return Err(Error::InvalidArgument);
        }
        Ok(Self {
            raw: RawList::new_in(ty, alloc)?,
            _marker: PhantomData,
        })
    }
}

impl<'t, T, A: RawAlloc> List<'t, T, A> {
    /// Returns the type-erased list underneath.
    #[inline]
    pub fn as_raw(&self) -> &RawList<'t, A> {
        &self.raw
    }

    /// Returns the number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns `true` if the list is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the slot allocator mutably.
    #[inline]
    pub fn allocator_mut(&mut self) -> &mut A {
        self.raw.allocator_mut()
    }

    /// Adds a copy of `value` at the front.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] if allocation fails; the list is unchanged.
    #[inline]
    pub fn push_front(&mut self, value: &T) -> Result<()> {
        // Safety: value is a live T and the descriptor matches T
        unsafe { self.raw.push_front(erase(value)) }
    }

    /// Adds a copy of `value` at the back.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfMemory`] if allocation fails; the list is unchanged.
    #[inline]
    pub fn push_back(&mut self, value: &T) -> Result<()> {
        // Safety: value is a live T and the descriptor matches T
        unsafe { self.raw.push_back(erase(value)) }
    }

    /// Inserts a copy of `value` at `cursor` and moves `cursor` onto it.
    ///
    /// See [`RawList::insert`] for placement rules.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidArgument`] if `cursor` is stale or foreign.
    /// - [`Error::OutOfMemory`] if allocation fails; list and cursor are
    ///   unchanged.
    #[inline]
    pub fn insert(&mut self, cursor: &mut Cursor, value: &T) -> Result<()> {
        // Safety: value is a live T and the descriptor matches T
        unsafe { self.raw.insert(cursor, erase(value)) }
    }

    /// Destroys the front element. Returns `false` if the list was empty.
    #[inline]
    pub fn pop_front(&mut self) -> bool {
        self.raw.pop_front()
    }

    /// Destroys the back element. Returns `false` if the list was empty.
    #[inline]
    pub fn pop_back(&mut self) -> bool {
        self.raw.pop_back()
    }

    /// Destroys every element.
    #[inline]
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Returns the front element.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        // Safety: every slot holds a constructed T
        self.raw.front().map(|ptr| unsafe { ptr.cast::<T>().as_ref() })
    }

    /// Returns the back element.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        // Safety: every slot holds a constructed T
        self.raw.back().map(|ptr| unsafe { ptr.cast::<T>().as_ref() })
    }

    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, A> {
        Iter {
            raw: self.raw.iter(),
            _marker: PhantomData,
        }
    }

    /// See [`RawList::begin`].
    #[inline]
    pub fn begin(&self) -> Option<Cursor> {
        self.raw.begin()
    }

    /// See [`RawList::end`].
    #[inline]
    pub fn end(&self) -> Option<Cursor> {
        self.raw.end()
    }

    /// See [`RawList::rbegin`].
    #[inline]
    pub fn rbegin(&self) -> Option<Cursor> {
        self.raw.rbegin()
    }

    /// See [`RawList::rend`].
    #[inline]
    pub fn rend(&self) -> Option<Cursor> {
        self.raw.rend()
    }

    /// Returns the element under `cursor`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if `cursor` is exhausted, stale or foreign.
    #[inline]
    pub fn get(&self, cursor: &Cursor) -> Result<&T> {
        let ptr = self.raw.get(cursor)?;
        // Safety: every slot holds a constructed T
        Ok(unsafe { ptr.cast::<T>().as_ref() })
    }

    /// See [`RawList::advance`].
    #[inline]
    pub fn advance(&self, cursor: &mut Cursor) -> Result<bool> {
        self.raw.advance(cursor)
    }

    /// See [`RawList::has_next`].
    #[inline]
    pub fn has_next(&self, cursor: &Cursor) -> Result<bool> {
        self.raw.has_next(cursor)
    }
}

#[inline]
fn erase<T>(value: &T) -> *const u8 {
    (value as *const T).cast()
}

impl<T: fmt::Debug, A: RawAlloc> fmt::Debug for List<'_, T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<'a, T, A: RawAlloc> IntoIterator for &'a List<'_, T, A> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T, A>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over references to list elements.
pub struct Iter<'a, T, A: RawAlloc = Global> {
    raw: RawIter<'a, A>,
    _marker: PhantomData<&'a T>,
}

impl<'a, T: 'a, A: RawAlloc> Iterator for Iter<'a, T, A> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        // Safety: every slot holds a constructed T, borrowed for 'a
        self.raw.next().map(|ptr| unsafe { ptr.cast::<T>().as_ref() })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.raw.size_hint()
    }
}

impl<'a, T: 'a, A: RawAlloc> DoubleEndedIterator for Iter<'a, T, A> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.raw.next_back().map(|ptr| unsafe { ptr.cast::<T>().as_ref() })
    }
}

impl<'a, T: 'a, A: RawAlloc> ExactSizeIterator for Iter<'a, T, A> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CopyFn, DestroyFn, Quota};
    use std::ptr::NonNull;

    #[test]
    fn type_mismatch_rejected() {
        let ty = TypeInfo::of::<u32>();
        assert_eq!(List::<u64>::new(&ty).unwrap_err(), Error::InvalidArgument);
        assert_eq!(List::<u16>::new(&ty).unwrap_err(), Error::InvalidArgument);
        assert!(List::<u32>::new(&ty).is_ok());
        // Same layout, different type
        assert_eq!(List::<i32>::new(&ty).unwrap_err(), Error::InvalidArgument);

        let ty = TypeInfo::of::<usize>();
        assert!(List::<Box<u8>>::new(&ty).is_err());
    }

    #[test]
    fn raw_descriptor_has_no_typed_list() {
        unsafe fn copy(dst: NonNull<u8>, src: NonNull<u8>) {
            unsafe { dst.cast::<u32>().write(src.cast::<u32>().read()) }
        }
        unsafe fn destroy(_: NonNull<u8>) {}

        let (copy, destroy): (CopyFn, DestroyFn) = (copy, destroy);
        let ty = unsafe { TypeInfo::from_raw_parts(4, 4, Some(copy), Some(destroy)) };
        assert!(ty.validate().is_ok());
        assert_eq!(List::<u32>::new(&ty).unwrap_err(), Error::InvalidArgument);
        assert!(RawList::new(&ty).is_ok());
    }

    #[test]
    fn zero_sized_rejected() {
        let ty = TypeInfo::of::<()>();
        assert_eq!(List::<()>::new(&ty).unwrap_err(), Error::InvalidArgument);
    }

    #[test]
    fn strings_are_cloned_and_dropped() {
        let ty = TypeInfo::of::<String>();
        let mut list: List<String> = List::new(&ty).unwrap();

        let mut owned = String::from("one");
        list.push_back(&owned).unwrap();
        owned.push_str("-changed");
        list.push_back(&"two".to_string()).unwrap();

        assert_eq!(list.front().map(String::as_str), Some("one"));
        assert_eq!(list.back().map(String::as_str), Some("two"));
        assert_eq!(owned, "one-changed");

        assert!(list.pop_front());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn drop_runs_element_destructors() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let ty = TypeInfo::of::<Rc<()>>();
        {
            let mut list: List<Rc<()>> = List::new(&ty).unwrap();
            for _ in 0..4 {
                list.push_back(&tracker).unwrap();
            }
            assert_eq!(Rc::strong_count(&tracker), 5);

            list.pop_back();
            assert_eq!(Rc::strong_count(&tracker), 4);
        }
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn cursor_walk_and_insert() {
        let ty = TypeInfo::of::<i64>();
        let mut list: List<i64> = List::new(&ty).unwrap();
        for v in [10, 30] {
            list.push_back(&v).unwrap();
        }

        let mut cursor = list.begin().unwrap();
        assert!(list.advance(&mut cursor).unwrap());
        list.insert(&mut cursor, &20).unwrap();
        assert_eq!(*list.get(&cursor).unwrap(), 20);
        assert!(list.has_next(&cursor).unwrap());

        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
        assert_eq!(list.iter().rev().copied().collect::<Vec<_>>(), vec![30, 20, 10]);

        let mut rcursor = list.rbegin().unwrap();
        assert_eq!(*list.get(&rcursor).unwrap(), 30);
        assert!(list.advance(&mut rcursor).unwrap());
        assert_eq!(*list.get(&rcursor).unwrap(), 20);
        assert_eq!(*list.get(&list.rend().unwrap()).unwrap(), 10);
    }

    #[test]
    fn out_of_memory_keeps_contents() {
        let ty = TypeInfo::of::<String>();
        let mut list = List::<String, _>::new_in(&ty, Quota::new(1)).unwrap();

        list.push_back(&"kept".to_string()).unwrap();
        assert_eq!(list.push_back(&"lost".to_string()), Err(Error::OutOfMemory));
        assert_eq!(list.push_front(&"lost".to_string()), Err(Error::OutOfMemory));
        assert_eq!(list.iter().collect::<Vec<_>>(), ["kept"]);

        list.allocator_mut().set_remaining(1);
        list.push_back(&"added".to_string()).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn panicking_clone_leaves_list_intact() {
        use std::panic::{AssertUnwindSafe, catch_unwind};

        #[derive(Debug)]
        struct Bomb(u8);

        impl Clone for Bomb {
            fn clone(&self) -> Self {
                if self.0 == 0 {
                    panic!("boom");
                }
                Bomb(self.0)
            }
        }

        let ty = TypeInfo::of::<Bomb>();
        let mut list = List::<Bomb, _>::new_in(&ty, Quota::new(8)).unwrap();
        list.push_back(&Bomb(1)).unwrap();

        let result = catch_unwind(AssertUnwindSafe(|| list.push_back(&Bomb(0))));
        assert!(result.is_err());
        assert_eq!(list.len(), 1);
        assert_eq!(list.front().map(|b| b.0), Some(1));

        list.push_back(&Bomb(2)).unwrap();
        assert_eq!(list.iter().map(|b| b.0).collect::<Vec<_>>(), vec![1, 2]);
    }

    #[test]
    fn panicking_drop_during_clear_leaves_list_empty() {
        use std::cell::Cell;
        use std::panic::{AssertUnwindSafe, catch_unwind};

        thread_local! {
            static ARMED: Cell<bool> = const { Cell::new(false) };
            static DROPS: Cell<usize> = const { Cell::new(0) };
        }

        #[derive(Debug, Clone)]
        struct Fuse(u8);

        impl Drop for Fuse {
            fn drop(&mut self) {
                DROPS.with(|d| d.set(d.get() + 1));
                if self.0 == 1 && ARMED.with(|a| a.replace(false)) {
                    panic!("fuse blew");
                }
            }
        }

        let ty = TypeInfo::of::<Fuse>();
        let mut list: List<Fuse> = List::new(&ty).unwrap();
        for v in [1, 2, 3] {
            list.push_back(&Fuse(v)).unwrap();
        }
        DROPS.with(|d| d.set(0));
        ARMED.with(|a| a.set(true));

        let result = catch_unwind(AssertUnwindSafe(|| list.clear()));
        assert!(result.is_err());

        assert_eq!(DROPS.with(Cell::get), 3);
        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        assert!(list.front().is_none());
        assert!(list.back().is_none());

        list.push_back(&Fuse(4)).unwrap();
        assert_eq!(list.iter().map(|f| f.0).collect::<Vec<_>>(), vec![4]);
    }

    #[test]
    fn debug_lists_elements() {
        let ty = TypeInfo::of::<u8>();
        let mut list: List<u8> = List::new(&ty).unwrap();
        for v in [1u8, 2, 3] {
            list.push_back(&v).unwrap();
        }
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");

        let collected: Vec<u8> = (&list).into_iter().copied().collect();
        assert_eq!(collected, vec![1, 2, 3]);
    }
}

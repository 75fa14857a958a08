//! Doubly-linked lists over type-erased elements.
//!
//! A list here does not know its element type statically. It is created from
//! a [`TypeInfo`], a small capability record giving the element's size and
//! alignment plus a `copy` and a `destroy` operation, and stores each element
//! in its own slot of that layout. One implementation therefore hosts any
//! element type, including types defined outside Rust.
//!
//! # Layers
//!
//! ```text
//! TypeInfo        - size, align, copy, destroy (borrowed by the list)
//! RawList<'t, A>  - type-erased list, pointer-based API (unsafe inserts)
//! List<'t, T, A>  - typed facade, safe API over RawList
//! Cursor          - detached, directional position into a list
//! RawAlloc        - where element slots come from (Global, Quota)
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_lists::{List, TypeInfo};
//!
//! let ty = TypeInfo::of::<u64>();
//! let mut list: List<u64> = List::new(&ty).unwrap();
//!
//! list.push_back(&1).unwrap();
//! list.push_back(&2).unwrap();
//! list.push_front(&0).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [0, 1, 2]);
//!
//! list.pop_front();
//! list.pop_back();
//! assert_eq!(list.len(), 1);
//! ```
//!
//! # Cursors
//!
//! [`begin`](RawList::begin) / [`end`](RawList::end) give forward cursors on
//! the first and last element, [`rbegin`](RawList::rbegin) /
//! [`rend`](RawList::rend) backward cursors on the last and first. Note that
//! `end` is the last element itself; a cursor only becomes past-the-end by
//! [`advance`](RawList::advance)-ing off the last element.
//!
//! A [`Cursor`] does not borrow its list, so it can be kept across
//! mutations. Every use is checked: a cursor whose element was removed, or
//! that came from another list, yields [`Error::InvalidArgument`].
//!
//! ```
//! use nexus_lists::{Error, List, TypeInfo};
//!
//! let ty = TypeInfo::of::<u32>();
//! let mut list: List<u32> = List::new(&ty).unwrap();
//! list.push_back(&1).unwrap();
//! list.push_back(&3).unwrap();
//!
//! let mut cursor = list.end().unwrap();
//! list.insert(&mut cursor, &2).unwrap();
//! assert_eq!(*list.get(&cursor).unwrap(), 2);
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), [1, 2, 3]);
//!
//! list.pop_front();
//! let stale = list.rend();
//! list.pop_front();
//! assert_eq!(list.get(&stale.unwrap()), Err(Error::InvalidArgument));
//! ```
//!
//! # Errors
//!
//! Fallible operations return [`Error::InvalidArgument`] or
//! [`Error::OutOfMemory`] and leave the list untouched when they do.
//! Removing from an empty list is not an error: `pop_front` and `pop_back`
//! return `false`.
//!
//! # Threading
//!
//! Lists are not synchronised and are neither `Send` nor `Sync`.

#![warn(missing_docs)]

pub mod alloc;
mod arena;
pub mod cursor;
pub mod error;
pub mod list;
pub mod type_info;
pub mod typed;

pub use alloc::{Global, Quota, RawAlloc};
pub use cursor::{Cursor, Direction};
pub use error::{Error, Result};
pub use list::{RawIter, RawList};
pub use type_info::{CopyFn, DestroyFn, TypeInfo};
pub use typed::{Iter, List};

//! Type descriptors for type-erased element storage.
//!
//! A [`TypeInfo`] tells a list how large one element is and how to
//! copy-construct and destroy it. The list never looks inside an element;
//! it only moves raw bytes through these two operations.
//!
//! # Example
//!
//! ```
//! use nexus_lists::TypeInfo;
//!
//! let ty = TypeInfo::of::<String>();
//! assert_eq!(ty.size(), std::mem::size_of::<String>());
//! assert!(ty.validate().is_ok());
//!
//! // Zero-sized types cannot be stored.
//! assert!(TypeInfo::of::<()>().validate().is_err());
//! ```

use std::alloc::Layout;
use std::any::TypeId;
use std::ptr::NonNull;

use crate::{Error, Result};

/// Copy-constructs the element at `src` into the uninitialised slot `dst`.
///
/// # Safety
///
/// `src` must point to a constructed element and `dst` to writable storage
/// of the descriptor's size and alignment.
pub type CopyFn = unsafe fn(dst: NonNull<u8>, src: NonNull<u8>);

/// Destroys the constructed element at `value`, leaving the slot
/// uninitialised.
///
/// # Safety
///
/// `value` must point to a constructed element that is not used again.
pub type DestroyFn = unsafe fn(value: NonNull<u8>);

/// Describes how to store one element of a caller-defined type.
#[derive(Debug, Clone, Copy)]
pub struct TypeInfo {
    size: usize,
    align: usize,
    copy: Option<CopyFn>,
    destroy: Option<DestroyFn>,
    /// Set by [`TypeInfo::of`]; lets [`List`](crate::List) check its `T`.
    type_id: Option<TypeId>,
}

/// A validated descriptor, with the operations unwrapped.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Resolved {
    pub(crate) layout: Layout,
    pub(crate) copy: CopyFn,
    pub(crate) destroy: DestroyFn,
}

impl TypeInfo {
    /// Describes `T` using [`Clone::clone`] for copies and
    /// [`drop_in_place`](core::ptr::drop_in_place) for destruction.
    ///
    /// The result fails [`validate`](Self::validate) if `T` is zero-sized.
    pub fn of<T: Clone + 'static>() -> Self {
        Self {
            size: size_of::<T>(),
            align: align_of::<T>(),
            copy: Some(clone_into::<T> as CopyFn),
            destroy: Some(drop_in_place::<T> as DestroyFn),
            type_id: Some(TypeId::of::<T>()),
        }
    }

    /// Builds a descriptor from its parts.
    ///
    /// No validation happens here; lists validate when they are created.
    /// The result carries no Rust type, so it only backs a
    /// [`RawList`](crate::RawList).
    ///
    /// # Safety
    ///
    /// When present, `copy` and `destroy` must be correct for every element
    /// a list built from this descriptor is handed, given `size` and `align`.
    pub const unsafe fn from_raw_parts(
        size: usize,
        align: usize,
        copy: Option<CopyFn>,
        destroy: Option<DestroyFn>,
    ) -> Self {
        Self {
            size,
            align,
            copy,
            destroy,
            type_id: None,
        }
    }

    /// Size of one element in bytes.
    #[inline]
    pub const fn size(&self) -> usize {
        self.size
    }

    /// Alignment of one element in bytes.
    #[inline]
    pub const fn align(&self) -> usize {
        self.align
    }

    /// Checks that the descriptor can back a list.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidArgument`] if the size is zero, `copy` or `destroy`
    /// is missing, or size and alignment do not form a valid layout.
    #[inline]
    pub fn validate(&self) -> Result<()> {
        self.resolve().map(drop)
    }

    /// Returns `true` if this descriptor was built by
    /// [`TypeInfo::of::<T>`](Self::of).
    #[inline]
    pub fn describes<T: 'static>(&self) -> bool {
        self.type_id == Some(TypeId::of::<T>())
    }

    pub(crate) fn resolve(&self) -> Result<Resolved> {
        if self.size == 0 {
            return Err(Error::InvalidArgument);
        }
        let (Some(copy), Some(destroy)) = (self.copy, self.destroy) else {
            return Err(Error::InvalidArgument);
        };
        let layout =
            Layout::from_size_align(self.size, self.align).map_err(|_| Error::InvalidArgument)?;

        Ok(Resolved {
            layout,
            copy,
            destroy,
        })
    }
}

unsafe fn clone_into<T: Clone>(dst: NonNull<u8>, src: NonNull<u8>) {
    // Safety: caller upholds CopyFn's contract for T
    unsafe {
        let value = src.cast::<T>().as_ref().clone();
        dst.cast::<T>().write(value);
    }
}

unsafe fn drop_in_place<T>(value: NonNull<u8>) {
    // Safety: caller upholds DestroyFn's contract for T
    unsafe { value.cast::<T>().drop_in_place() }
}

//! Error type shared by every fallible list operation.

use std::collections::TryReserveError;

use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T, E = Error> = core::result::Result<T, E>;

/// The two ways a list operation can fail.
///
/// Every check happens before the list is touched, so an `Err` always
/// leaves the list (and any cursor passed in) exactly as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error)]
pub enum Error {
    /// A null value, an invalid type descriptor, or a cursor that is stale,
    /// past-the-end where an element is required, or bound to another list.
    #[error("invalid argument")]
    InvalidArgument,
    /// Allocating a node or its element slot failed.
    #[error("out of memory")]
    OutOfMemory,
}

impl Error {
    /// Returns the positive `errno` value for this error.
    ///
    /// ```
    /// use nexus_lists::Error;
    ///
    /// assert_eq!(Error::InvalidArgument.errno(), libc::EINVAL);
    /// assert_eq!(Error::OutOfMemory.errno(), libc::ENOMEM);
    /// ```
    #[inline]
    pub const fn errno(self) -> i32 {
        match self {
            Error::InvalidArgument => libc::EINVAL,
            Error::OutOfMemory => libc::ENOMEM,
        }
    }
}

impl From<TryReserveError> for Error {
    #[inline]
    fn from(_: TryReserveError) -> Self {
        Error::OutOfMemory
    }
}

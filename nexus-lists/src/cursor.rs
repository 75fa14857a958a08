//! Detached position handles into a list.
//!
//! A [`Cursor`] names one element of one list, together with the direction
//! it walks in. It does not borrow the list: dereferencing and advancing go
//! through the list ([`RawList::get`](crate::RawList::get),
//! [`RawList::advance`](crate::RawList::advance)), which lets a cursor be
//! held across mutations such as [`RawList::insert`](crate::RawList::insert).
//!
//! Cursors are checked on every use. One whose element has been removed,
//! or one created by a different list, is rejected with
//! [`Error::InvalidArgument`](crate::Error::InvalidArgument) rather than
//! left dangling.

use crate::arena::NodeId;

/// Traversal direction a cursor is bound to at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Head to tail.
    Forward,
    /// Tail to head.
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Position {
    Node(NodeId),
    /// Stepped off the last element in the cursor's direction.
    End,
}

/// A directional position in a list.
///
/// Obtained from [`begin`](crate::RawList::begin),
/// [`end`](crate::RawList::end), [`rbegin`](crate::RawList::rbegin) or
/// [`rend`](crate::RawList::rend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Cursor {
    pub(crate) list: u64,
    pub(crate) position: Position,
    pub(crate) direction: Direction,
}

impl Cursor {
    #[inline]
    pub(crate) const fn new(list: u64, position: Position, direction: Direction) -> Self {
        Self {
            list,
            position,
            direction,
        }
    }

    /// The direction this cursor advances in.
    #[inline]
    pub const fn direction(&self) -> Direction {
        self.direction
    }

    /// Returns `true` once the cursor has stepped past the last element in
    /// its direction.
    ///
    /// Inserting through an exhausted forward cursor appends at the tail;
    /// through an exhausted backward cursor, at the head.
    #[inline]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self.position, Position::End)
    }
}

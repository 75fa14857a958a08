//! Node arena with generation-checked slot indices.
//!
//! Nodes live in a growable slot table and link to each other by `u32`
//! index, with [`NONE`] as the null link. Removed slots go on a free stack
//! and are reused by later inserts. Each slot carries a generation that is
//! bumped on removal, so a [`NodeId`] taken before the removal no longer
//! resolves, even after the slot is reused. A slot whose generation is
//! exhausted is retired rather than wrapped, so an old id can never match
//! again.

use std::ptr::NonNull;

use crate::{Error, Result};

/// Null link.
pub(crate) const NONE: u32 = u32::MAX;

/// A slot index plus the generation it was issued under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId {
    pub(crate) index: u32,
    pub(crate) generation: u32,
}

/// Links for one list node, plus the element slot it owns.
#[derive(Debug)]
pub(crate) struct Node {
    pub(crate) slot: NonNull<u8>,
    pub(crate) prev: u32,
    pub(crate) next: u32,
}

impl Node {
    /// Creates an unlinked node.
    #[inline]
    pub(crate) fn new(slot: NonNull<u8>) -> Self {
        Self {
            slot,
            prev: NONE,
            next: NONE,
        }
    }
}

#[derive(Debug)]
struct Entry {
    generation: u32,
    node: Option<Node>,
}

#[derive(Debug, Default)]
pub(crate) struct Arena {
    entries: Vec<Entry>,
    /// Vacant slot indices. Capacity is kept >= `entries.len()` so pushing
    /// on removal never reallocates.
    free: Vec<u32>,
    /// Vacant slots that are never handed out again.
    retired: usize,
}

impl Arena {
    #[inline]
    pub(crate) const fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            retired: 0,
        }
    }

    /// Number of occupied slots.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.entries.len() - self.free.len() - self.retired
    }

    /// Makes room for one more node.
    ///
    /// After `Ok`, the next [`insert`](Self::insert) cannot allocate.
    pub(crate) fn try_reserve(&mut self) -> Result<()> {
        if !self.free.is_empty() {
            return Ok(());
        }
        if self.entries.len() >= NONE as usize {
            return Err(Error::OutOfMemory);
        }

        self.entries.try_reserve(1)?;
        self.free.try_reserve(self.entries.len() + 1)?;
        Ok(())
    }

    /// Stores `node`, reusing a vacant slot if there is one.
    ///
    /// Call [`try_reserve`](Self::try_reserve) first.
    #[inline]
    pub(crate) fn insert(&mut self, node: Node) -> NodeId {
        if let Some(index) = self.free.pop() {
            let entry = &mut self.entries[index as usize];
            debug_assert!(entry.node.is_none());
            entry.node = Some(node);
            return NodeId {
                index,
                generation: entry.generation,
            };
        }

        let index = self.entries.len() as u32;
        self.entries.push(Entry {
            generation: 0,
            node: Some(node),
        });
        NodeId {
            index,
            generation: 0,
        }
    }

    /// Removes and returns the node at `index`, retiring its generation.
    #[inline]
    pub(crate) fn remove(&mut self, index: u32) -> Option<Node> {
        let entry = self.entries.get_mut(index as usize)?;
        let node = entry.node.take()?;
        match entry.generation.checked_add(1) {
            Some(generation) => {
                entry.generation = generation;
                self.free.push(index);
            }
            None => self.retired += 1,
        }
        Some(node)
    }

    /// Returns `true` if `id` still names a live node.
    #[inline]
    pub(crate) fn contains(&self, id: NodeId) -> bool {
        self.entries
            .get(id.index as usize)
            .is_some_and(|entry| entry.generation == id.generation && entry.node.is_some())
    }

    /// Returns the current id of the occupied slot at `index`.
    #[inline]
    pub(crate) fn id(&self, index: u32) -> NodeId {
        debug_assert!(self.entries[index as usize].node.is_some());
        NodeId {
            index,
            generation: self.entries[index as usize].generation,
        }
    }

    /// # Safety
    ///
    /// `index` must be occupied.
    #[inline]
    pub(crate) unsafe fn get_unchecked(&self, index: u32) -> &Node {
        unsafe {
            self.entries
                .get_unchecked(index as usize)
                .node
                .as_ref()
                .unwrap_unchecked()
        }
    }

    /// # Safety
    ///
    /// `index` must be occupied.
    #[inline]
    pub(crate) unsafe fn get_unchecked_mut(&mut self, index: u32) -> &mut Node {
        unsafe {
            self.entries
                .get_unchecked_mut(index as usize)
                .node
                .as_mut()
                .unwrap_unchecked()
        }
    }
}

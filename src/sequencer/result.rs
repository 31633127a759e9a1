/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Outcome of a single insertion.

/// What the sequencer did with an inserted item.
///
/// Stale and duplicate items are not errors; the variants exist so callers
/// can count them if they care.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertResult {
    /// The item filled the watermark and was emitted, followed by any
    /// buffered successors. `count` includes the inserted item.
    Emitted {
        /// Number of items written to the conduit.
        count: usize,
    },

    /// The item is ahead of the watermark and now waits in the pending buffer.
    Buffered,

    /// The item's position was already emitted; it was dropped.
    Stale,

    /// An item with the same position is already buffered; the new one was dropped.
    Duplicate,

    /// The pending buffer is at capacity; the item was dropped.
    Rejected,
}

impl InsertResult {
    /// Returns `true` if anything was written to the conduit.
    #[inline]
    #[must_use]
    pub fn is_emitted(&self) -> bool {
        matches!(self, Self::Emitted { .. })
    }

    /// Returns `true` if the item was dropped without being kept.
    #[inline]
    #[must_use]
    pub fn is_discarded(&self) -> bool {
        matches!(self, Self::Stale | Self::Duplicate | Self::Rejected)
    }

    /// Number of items emitted by this insertion.
    #[inline]
    #[must_use]
    pub fn emitted(&self) -> usize {
        match self {
            Self::Emitted { count } => *count,
            _ => 0,
        }
    }
}

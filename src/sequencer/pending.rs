/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sorted holding area for items that arrived ahead of the watermark.
//!
//! [`PendingQueue`] keeps items ordered ascending by position with no two
//! items sharing a position. Lookup is a binary search; insertion shifts the
//! tail, which is cheap for the small reordering windows this is meant for.

use crate::sequenced::Sequenced;
use std::collections::VecDeque;

/// Result of searching the queue for a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    /// An item with this position is already buffered at the given index.
    Occupied(usize),
    /// No item with this position; inserting at the given index keeps order.
    Vacant(usize),
}

/// Position-sorted, duplicate-free buffer.
///
/// # Examples
///
/// ```
/// use reorder_rs::sequencer::pending::PendingQueue;
///
/// let mut queue: PendingQueue<i64> = PendingQueue::new();
/// assert!(queue.insert(5));
/// assert!(queue.insert(3));
/// assert!(!queue.insert(5));
/// assert_eq!(queue.len(), 2);
/// assert_eq!(queue.front_position(), Some(3));
/// ```
#[derive(Debug)]
pub struct PendingQueue<T> {
    items: VecDeque<T>,
}

impl<T> Default for PendingQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> PendingQueue<T> {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self {
            items: VecDeque::new(),
        }
    }

    /// Creates an empty queue with room for `capacity` items.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            items: VecDeque::with_capacity(capacity),
        }
    }

    /// Number of buffered items.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if nothing is buffered.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Iterates buffered items in ascending position order.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        self.items.iter()
    }
}

impl<T: Sequenced> PendingQueue<T> {
    /// Finds where `position` lives, or where it would be inserted.
    #[must_use]
    pub fn search(&self, position: i64) -> Slot {
        match self.items.binary_search_by_key(&position, |item| item.position()) {
            Ok(index) => Slot::Occupied(index),
            Err(index) => Slot::Vacant(index),
        }
    }

    /// Inserts `item` in position order.
    ///
    /// Returns `false`, dropping `item`, when its position is already taken:
    /// the first arrival wins.
    pub fn insert(&mut self, item: T) -> bool {
        match self.search(item.position()) {
            Slot::Occupied(_) => false,
            Slot::Vacant(index) => {
                self.insert_at(index, item);
                true
            }
        }
    }

    /// Inserts at an index previously returned as [`Slot::Vacant`].
    pub(crate) fn insert_at(&mut self, index: usize, item: T) {
        debug_assert!(index == 0 || self.items[index - 1].position() < item.position());
        debug_assert!(index == self.items.len() || self.items[index].position() > item.position());
        self.items.insert(index, item);
    }

    /// Position of the lowest buffered item.
    #[inline]
    #[must_use]
    pub fn front_position(&self) -> Option<i64> {
        self.items.front().map(|item| item.position())
    }

    /// Removes the front item if it sits exactly at `position`.
    pub fn pop_if_at(&mut self, position: i64) -> Option<T> {
        if self.front_position() == Some(position) {
            self.items.pop_front()
        } else {
            None
        }
    }
}

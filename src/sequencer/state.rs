/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Watermark bookkeeping shared by the blocking and async sequencers.
//!
//! [`ReorderState`] decides what happens to each item and hands back the ones
//! that are ready. It never touches a channel: the engines own the conduit and
//! call [`ReorderState::advance`] after each successful emission.

use super::config::SequencerConfig;
use super::error::SequencerError;
use super::pending::{PendingQueue, Slot};
use crate::sequenced::Sequenced;
use tracing::{debug, trace, warn};

/// Decision taken for an incoming item.
#[derive(Debug)]
pub(crate) enum Admission<T> {
    /// The item sits exactly at the watermark and must be emitted now.
    Ready(T),
    /// The item was stored in the pending buffer.
    Buffered,
    /// Below the watermark; dropped.
    Stale,
    /// Position already buffered; dropped.
    Duplicate,
    /// Pending buffer full; dropped.
    Rejected,
}

/// Expected-next position, pending buffer and lifecycle flags.
#[derive(Debug)]
pub(crate) struct ReorderState<T> {
    next_position: i64,
    pending: PendingQueue<T>,
    capacity: Option<usize>,
    closed: bool,
    /// Set once the item at `i64::MAX` has been emitted.
    exhausted: bool,
}

impl<T: Sequenced> ReorderState<T> {
    pub(crate) fn new(config: SequencerConfig) -> Self {
        Self {
            next_position: config.start_position,
            pending: PendingQueue::new(),
            capacity: config.capacity,
            closed: false,
            exhausted: false,
        }
    }

    #[inline]
    pub(crate) fn next_position(&self) -> i64 {
        self.next_position
    }

    #[inline]
    pub(crate) fn queue_len(&self) -> usize {
        self.pending.len()
    }

    #[inline]
    pub(crate) fn is_closed(&self) -> bool {
        self.closed
    }

    /// Classifies `item` against the watermark, buffering it if it is early.
    ///
    /// # Panics
    ///
    /// Panics if the state has been closed.
    pub(crate) fn admit(&mut self, item: T) -> Admission<T> {
        assert!(!self.closed, "cannot insert into a closed sequencer");

        let position = item.position();
        if self.exhausted || position < self.next_position {
            trace!(position, next = self.next_position, "dropping stale item");
            return Admission::Stale;
        }
        if position == self.next_position {
            return Admission::Ready(item);
        }

        match self.pending.search(position) {
            Slot::Occupied(_) => {
                trace!(position, "dropping duplicate of buffered item");
                Admission::Duplicate
            }
            Slot::Vacant(_) if self.is_full() => {
                warn!(
                    position,
                    next = self.next_position,
                    pending = self.pending.len(),
                    "pending buffer full, rejecting item"
                );
                Admission::Rejected
            }
            Slot::Vacant(index) => {
                self.pending.insert_at(index, item);
                trace!(position, pending = self.pending.len(), "buffered early item");
                Admission::Buffered
            }
        }
    }

    /// Moves the watermark past an item that has just been emitted.
    ///
    /// Emitting `i64::MAX` leaves the watermark in place and marks the
    /// sequence exhausted: every later item is stale.
    #[inline]
    pub(crate) fn advance(&mut self) {
        match self.next_position.checked_add(1) {
            Some(next) => self.next_position = next,
            None => {
                self.exhausted = true;
                debug!(last = self.next_position, "position range exhausted");
            }
        }
    }

    /// Returns `true` if the buffered front item sits at the watermark.
    #[inline]
    pub(crate) fn has_ready(&self) -> bool {
        !self.exhausted && self.pending.front_position() == Some(self.next_position)
    }

    /// Pops the buffered item sitting at the watermark, if any.
    #[inline]
    pub(crate) fn pop_ready(&mut self) -> Option<T> {
        if self.exhausted {
            return None;
        }
        self.pending.pop_if_at(self.next_position)
    }

    /// Marks the state closed and reports whether the sequence was complete.
    ///
    /// # Panics
    ///
    /// Panics if the state was already closed.
    pub(crate) fn close(&mut self) -> Result<(), SequencerError> {
        assert!(!self.closed, "sequencer finalized twice");
        self.closed = true;

        let pending = self.pending.len();
        if pending == 0 {
            debug!(next = self.next_position, "sequencer finalized");
            return Ok(());
        }
        warn!(
            missing = self.next_position,
            pending, "sequencer finalized with a gap"
        );
        Err(SequencerError::MissingItem {
            position: self.next_position,
            pending,
        })
    }

    fn is_full(&self) -> bool {
        self.capacity
            .is_some_and(|capacity| self.pending.len() >= capacity)
    }
}

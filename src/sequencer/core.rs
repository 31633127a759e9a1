/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Blocking Sequencer implementation.
//!
//! This module provides the main Sequencer struct that accepts positioned
//! items in any order and hands them to consumers, in position order, over a
//! zero-capacity channel.

use super::config::SequencerConfig;
use super::error::SequencerError;
use super::result::InsertResult;
use super::state::{Admission, ReorderState};
use crate::sequenced::Sequenced;
use crossbeam::channel::{self, Receiver, Sender};
use tracing::debug;

/// Reorders items by position and emits them on a rendezvous channel.
///
/// A single producer owns the `Sequencer` and calls [`insert`](Self::insert)
/// and finally [`finalize`](Self::finalize); both take `&mut self`, so two
/// producers cannot race on the same instance. Any number of consumer threads
/// read from clones of [`receiver`](Self::receiver) until the channel closes.
///
/// Emitting blocks the producer until a consumer takes the item. The sequencer
/// holds a receiver of its own, so an emission with no consumer attached waits
/// indefinitely rather than failing. Early items wait in an unbounded pending
/// buffer unless a capacity is configured.
///
/// # Examples
///
/// ```
/// use reorder_rs::sequencer::Sequencer;
/// use std::thread;
///
/// let mut sequencer = Sequencer::<i64>::new();
/// let rx = sequencer.receiver();
///
/// let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());
///
/// for pos in [2, 0, 1] {
///     sequencer.insert(pos);
/// }
/// sequencer.finalize().unwrap();
///
/// assert_eq!(consumer.join().unwrap(), vec![0, 1, 2]);
/// ```
#[derive(Debug)]
pub struct Sequencer<T> {
    /// Watermark, pending buffer and lifecycle flag.
    state: ReorderState<T>,

    /// Producer side of the conduit; `None` once finalized.
    tx: Option<Sender<T>>,

    /// Consumer side, kept so receivers can be handed out at any time.
    rx: Receiver<T>,
}

impl<T: Sequenced> Default for Sequencer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Sequenced> Sequencer<T> {
    /// Creates a sequencer expecting position `0` first.
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(SequencerConfig::default())
    }

    /// Creates a sequencer expecting `start_position` first.
    ///
    /// # Examples
    ///
    /// ```
    /// use reorder_rs::sequencer::Sequencer;
    ///
    /// let sequencer = Sequencer::<i64>::starting_at(100);
    /// assert_eq!(sequencer.next_position(), 100);
    /// ```
    #[must_use]
    pub fn starting_at(start_position: i64) -> Self {
        Self::from_parts(SequencerConfig::starting_at(start_position))
    }

    /// Creates a sequencer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidConfig`] if the configuration is rejected
    /// by [`SequencerConfig::validate`].
    pub fn with_config(config: SequencerConfig) -> Result<Self, SequencerError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: SequencerConfig) -> Self {
        let (tx, rx) = channel::bounded(0);
        Self {
            state: ReorderState::new(config),
            tx: Some(tx),
            rx,
        }
    }

    /// Returns a handle to the output conduit.
    ///
    /// Receivers may be cloned and shared between consumer threads; each item
    /// is delivered to exactly one of them. Iteration ends after finalization
    /// once every emitted item has been taken.
    #[must_use]
    pub fn receiver(&self) -> Receiver<T> {
        self.rx.clone()
    }

    /// Adds an item. Items can be added in any order.
    ///
    /// - Below [`next_position`](Self::next_position): a re-delivery, discarded.
    /// - Equal: sent immediately, followed by every buffered item that now
    ///   continues the sequence without a gap.
    /// - Above: buffered until the gap before it is filled. A second item at
    ///   an already buffered position is discarded.
    ///
    /// Once the item at `i64::MAX` has been emitted the position range is
    /// exhausted: the watermark stays at `i64::MAX` and every later item is
    /// stale.
    ///
    /// Blocks while each emitted item waits for a consumer.
    ///
    /// # Panics
    ///
    /// Panics if [`finalize`](Self::finalize) has already been called.
    pub fn insert(&mut self, item: T) -> InsertResult {
        match self.state.admit(item) {
            Admission::Ready(item) => {
                self.send(item);
                let count = 1 + self.drain();
                InsertResult::Emitted { count }
            }
            Admission::Buffered => InsertResult::Buffered,
            Admission::Stale => InsertResult::Stale,
            Admission::Duplicate => InsertResult::Duplicate,
            Admission::Rejected => InsertResult::Rejected,
        }
    }

    /// Closes the output channel and checks that nothing was left behind.
    ///
    /// Buffered items are not emitted; they are dropped with the sequencer.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::MissingItem`] naming the first position that
    /// never arrived if any items are still buffered.
    ///
    /// # Panics
    ///
    /// Panics if called more than once.
    pub fn finalize(&mut self) -> Result<(), SequencerError> {
        let outcome = self.state.close();
        self.tx = None;
        outcome
    }

    /// Number of items waiting for a gap to be filled.
    #[inline]
    #[must_use]
    pub fn queue_len(&self) -> usize {
        self.state.queue_len()
    }

    /// Position of the next item that will be emitted.
    #[inline]
    #[must_use]
    pub fn next_position(&self) -> i64 {
        self.state.next_position()
    }

    /// Returns `true` once [`finalize`](Self::finalize) has been called.
    #[inline]
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.state.is_closed()
    }

    /// Emits buffered items for as long as they continue the sequence.
    fn drain(&mut self) -> usize {
        let mut count = 0;
        while let Some(item) = self.state.pop_ready() {
            self.send(item);
            count += 1;
        }
        if count > 0 {
            debug!(
                drained = count,
                next = self.state.next_position(),
                pending = self.state.queue_len(),
                "drained pending items"
            );
        }
        count
    }

    fn send(&mut self, item: T) {
        // `self.rx` keeps the channel connected while the sequencer is open.
        if let Some(tx) = &self.tx {
            let _ = tx.send(item);
        }
        self.state.advance();
    }
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Async Sequencer implementation on top of tokio channels.
//!
//! [`AsyncSequencer`] has the same semantics as the blocking
//! [`Sequencer`](super::Sequencer) but awaits instead of blocking when the
//! consumer is slow. It can also be moved into a task with
//! [`spawn`](AsyncSequencer::spawn), which turns any number of producers into
//! the single writer the engine requires.

use super::config::SequencerConfig;
use super::error::SequencerError;
use super::result::InsertResult;
use super::state::{Admission, ReorderState};
use crate::sequenced::Sequenced;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Default buffer size of the input channel created by [`AsyncSequencer::spawn`].
pub const DEFAULT_INPUT_CAPACITY: usize = 1024;

/// Reorders items by position and emits them on a tokio channel.
///
/// The output channel holds at most one item, so the producer is suspended
/// until the consumer keeps up. Unlike the blocking sequencer the output has a
/// single consumer; if it is dropped, emitted items are discarded and the
/// watermark keeps advancing.
///
/// # Examples
///
/// ```
/// use reorder_rs::sequencer::AsyncSequencer;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let (mut sequencer, mut rx) = AsyncSequencer::<i64>::new();
///
/// let consumer = tokio::spawn(async move {
///     let mut seen = Vec::new();
///     while let Some(pos) = rx.recv().await {
///         seen.push(pos);
///     }
///     seen
/// });
///
/// for pos in [1, 2, 0] {
///     sequencer.insert(pos).await;
/// }
/// sequencer.finalize()?;
///
/// assert_eq!(consumer.await?, vec![0, 1, 2]);
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AsyncSequencer<T> {
    /// Watermark, pending buffer and lifecycle flag.
    state: ReorderState<T>,

    /// Output channel; `None` once finalized.
    tx: Option<mpsc::Sender<T>>,

    /// Set once an emission found the receiver gone.
    disconnected: bool,
}

impl<T: Sequenced> AsyncSequencer<T> {
    /// Creates a sequencer expecting position `0` first, with its output receiver.
    #[must_use]
    pub fn new() -> (Self, mpsc::Receiver<T>) {
        Self::from_parts(SequencerConfig::default())
    }

    /// Creates a sequencer expecting `start_position` first, with its output receiver.
    #[must_use]
    pub fn starting_at(start_position: i64) -> (Self, mpsc::Receiver<T>) {
        Self::from_parts(SequencerConfig::starting_at(start_position))
    }

    /// Creates a sequencer from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidConfig`] if the configuration is rejected
    /// by [`SequencerConfig::validate`].
    pub fn with_config(
        config: SequencerConfig,
    ) -> Result<(Self, mpsc::Receiver<T>), SequencerError> {
        config.validate()?;
        Ok(Self::from_parts(config))
    }

    fn from_parts(config: SequencerConfig) -> (Self, mpsc::Receiver<T>) {
        let (tx, rx) = mpsc::channel(1);
        let sequencer = Self {
            state: ReorderState::new(config),
            tx: Some(tx),
            disconnected: false,
        };
        (sequencer, rx)
    }

    /// Adds an item. Items can be added in any order.
    ///
    /// Follows the same rules as [`Sequencer::insert`](super::Sequencer::insert),
    /// awaiting channel capacity for each emitted item. A drain left unfinished
    /// by a cancelled call is resumed first; those items are included in the
    /// count only when this call emits as well.
    ///
    /// # Cancel safety
    ///
    /// Buffered items are only removed once channel capacity has been
    /// reserved for them, so dropping this future never loses an item that
    /// was already buffered. If it is dropped before `item` itself is sent,
    /// `item` is discarded and the watermark is unchanged; inserting it again
    /// resumes normally. Use [`flush`](Self::flush) to finish an interrupted
    /// drain without inserting anything.
    ///
    /// # Panics
    ///
    /// Panics if [`finalize`](Self::finalize) has already been called.
    pub async fn insert(&mut self, item: T) -> InsertResult {
        assert!(!self.is_closed(), "cannot insert into a closed sequencer");
        let resumed = self.drain().await;

        match self.state.admit(item) {
            Admission::Ready(item) => {
                let permit = reserve(&self.tx).await;
                deliver(permit, item, &mut self.disconnected);
                self.state.advance();
                let count = resumed + 1 + self.drain().await;
                InsertResult::Emitted { count }
            }
            Admission::Buffered => InsertResult::Buffered,
            Admission::Stale => InsertResult::Stale,
            Admission::Duplicate => InsertResult::Duplicate,
            Admission::Rejected => InsertResult::Rejected,
        }
    }

    /// Emits buffered items that already continue the sequence.
    ///
    /// Only needed after an [`insert`](Self::insert) future was dropped
    /// mid-drain; returns the number of items emitted.
    ///
    /// # Cancel safety
    ///
    /// Cancel safe: no buffered item is removed before it can be sent.
    ///
    /// # Panics
    ///
    /// Panics if [`finalize`](Self::finalize) has already been called.
    pub async fn flush(&mut self) -> usize {
        assert!(!self.is_closed(), "cannot flush a closed sequencer");
        self.drain().await
    }

    /// Closes the output channel and checks that nothing was left behind.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::MissingItem`] if any items are still buffered,
    /// including items an interrupted drain did not get to; call
    /// [`flush`](Self::flush) first after cancelling an insert.
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
    async fn drain(&mut self) -> usize {
        let mut count = 0;
        while self.state.has_ready() {
            let permit = reserve(&self.tx).await;
            let Some(item) = self.state.pop_ready() else {
                break;
            };
            deliver(permit, item, &mut self.disconnected);
            self.state.advance();
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
}

/// Waits for room on the output channel. `None` if the receiver is gone.
async fn reserve<T>(tx: &Option<mpsc::Sender<T>>) -> Option<mpsc::Permit<'_, T>> {
    match tx {
        Some(tx) => tx.reserve().await.ok(),
        None => None,
    }
}

fn deliver<T: Sequenced>(permit: Option<mpsc::Permit<'_, T>>, item: T, disconnected: &mut bool) {
    match permit {
        Some(permit) => permit.send(item),
        None if !*disconnected => {
            *disconnected = true;
            warn!(
                position = item.position(),
                "output receiver dropped, discarding emitted items"
            );
        }
        None => {}
    }
}

impl<T: Sequenced + Send + 'static> AsyncSequencer<T> {
    /// Moves the sequencer into a new task fed by a multi-producer channel.
    ///
    /// Items sent through any clone of the returned [`SequencerInput`] are
    /// inserted in the order the task receives them. When every input handle
    /// has been dropped the task finalizes the sequencer, closing the output
    /// channel, and the outcome is available from [`SequencerHandle::wait`].
    ///
    /// # Panics
    ///
    /// Panics if the sequencer has already been finalized.
    #[must_use]
    pub fn spawn(self) -> (SequencerInput<T>, SequencerHandle) {
        self.spawn_with_capacity(DEFAULT_INPUT_CAPACITY)
    }

    /// Like [`spawn`](Self::spawn) with a specific input channel capacity.
    ///
    /// # Panics
    ///
    /// Panics if the sequencer has already been finalized or `capacity` is zero.
    #[must_use]
    pub fn spawn_with_capacity(
        mut self,
        capacity: usize,
    ) -> (SequencerInput<T>, SequencerHandle) {
        assert!(!self.is_closed(), "cannot spawn a closed sequencer");
        let (input_tx, input_rx) = mpsc::channel(capacity);

        let handle = tokio::spawn(async move { self.run_loop(input_rx).await });

        (SequencerInput { tx: input_tx }, SequencerHandle { handle })
    }

    /// Inserts everything received on `input_rx`, then finalizes.
    async fn run_loop(&mut self, mut input_rx: mpsc::Receiver<T>) -> Result<(), SequencerError> {
        while let Some(item) = input_rx.recv().await {
            self.insert(item).await;
        }
        self.finalize()
    }
}

/// Cloneable producer handle for a spawned [`AsyncSequencer`].
#[derive(Debug)]
pub struct SequencerInput<T> {
    tx: mpsc::Sender<T>,
}

impl<T> Clone for SequencerInput<T> {
    fn clone(&self) -> Self {
        Self {
            tx: self.tx.clone(),
        }
    }
}

impl<T> SequencerInput<T> {
    /// Submits an item to the sequencer task.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Shutdown`] if the task is no longer running.
    pub async fn send(&self, item: T) -> Result<(), SequencerError> {
        self.tx
            .send(item)
            .await
            .map_err(|_| SequencerError::Shutdown)
    }

    /// Submits an item from synchronous code.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::Shutdown`] if the task is no longer running.
    ///
    /// # Panics
    ///
    /// Panics if called from within an async execution context.
    pub fn blocking_send(&self, item: T) -> Result<(), SequencerError> {
        self.tx
            .blocking_send(item)
            .map_err(|_| SequencerError::Shutdown)
    }
}

/// Handle to a spawned sequencer task.
#[derive(Debug)]
pub struct SequencerHandle {
    handle: tokio::task::JoinHandle<Result<(), SequencerError>>,
}

impl SequencerHandle {
    /// Cancels the task. Items still buffered are dropped and the output
    /// channel closes; [`wait`](Self::wait) then reports
    /// [`SequencerError::TaskFailed`].
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// Waits for the task to finalize and returns the finalization outcome.
    ///
    /// # Errors
    ///
    /// - [`SequencerError::MissingItem`] if the input closed with a gap
    /// - [`SequencerError::TaskFailed`] if the task panicked or was aborted
    pub async fn wait(self) -> Result<(), SequencerError> {
        self.handle
            .await
            .map_err(|source| SequencerError::TaskFailed { source })?
    }
}

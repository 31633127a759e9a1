/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! # reorder-rs
//!
//! An in-memory reordering primitive. Producers push items that carry an
//! integer position, in whatever order they arrive; consumers read them back
//! as a strictly increasing, gap-free sequence.
//!
//! The crate is built around a single engine:
//!
//! - [`Sequenced`]: the capability an item needs, a stable `i64` position
//! - [`Sequencer`]: blocking engine emitting on a `crossbeam` rendezvous channel
//! - [`AsyncSequencer`]: the same engine on `tokio` channels, optionally
//!   spawned as a task behind cloneable producer handles
//!
//! Re-delivered items (positions already emitted) and duplicates of buffered
//! positions are dropped silently, which makes the sequencer a good fit for
//! at-least-once sources. Items waiting on a gap are held in memory without a
//! bound unless [`SequencerConfig::capacity`] is set.
//!
//! ## Quick start
//!
//! ```
//! use reorder_rs::{Sequencer, Sequenced};
//! use std::thread;
//!
//! #[derive(Debug, PartialEq)]
//! struct Chunk {
//!     index: i64,
//!     bytes: Vec<u8>,
//! }
//!
//! impl Sequenced for Chunk {
//!     fn position(&self) -> i64 {
//!         self.index
//!     }
//! }
//!
//! let mut sequencer = Sequencer::new();
//! let rx = sequencer.receiver();
//! let consumer = thread::spawn(move || rx.iter().map(|c: Chunk| c.index).collect::<Vec<_>>());
//!
//! for index in [3, 1, 0, 2, 1] {
//!     sequencer.insert(Chunk { index, bytes: vec![0; 4] });
//! }
//! assert_eq!(sequencer.queue_len(), 0);
//! sequencer.finalize().unwrap();
//!
//! assert_eq!(consumer.join().unwrap(), vec![0, 1, 2, 3]);
//! ```

pub mod sequenced;
pub mod sequencer;

pub use sequenced::Sequenced;
pub use sequencer::{
    AsyncSequencer, InsertResult, Sequencer, SequencerConfig, SequencerError,
};

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer module for restoring the order of out-of-order items.
//!
//! Items implementing [`Sequenced`](crate::Sequenced) are inserted in any
//! arrival order and emitted on an output channel as a strictly increasing,
//! gap-free run of positions, starting at a configured position.
//!
//! # Architecture
//!
//! - Items below the expected position are re-deliveries and are discarded
//! - An item at the expected position is emitted at once, then every buffered
//!   item that continues the run is drained behind it
//! - Items ahead of the expected position wait in a sorted pending buffer;
//!   the first arrival for a position wins
//! - Finalizing closes the output channel and reports the first missing
//!   position if anything is still buffered
//! - Inserting after finalization panics: it is a bug in the caller
//!
//! One producer drives a sequencer at a time. [`Sequencer`] blocks on a
//! rendezvous channel; [`AsyncSequencer`] awaits on a tokio channel and can be
//! spawned behind a cloneable [`SequencerInput`] when several producers feed
//! the same stream.
//!
//! # Examples
//!
//! ```
//! use reorder_rs::sequencer::{InsertResult, Sequencer, SequencerError};
//! use std::thread;
//!
//! let mut sequencer = Sequencer::<(i64, &str)>::new();
//! let rx = sequencer.receiver();
//! let consumer = thread::spawn(move || rx.iter().map(|(_, word)| word).collect::<Vec<_>>());
//!
//! assert_eq!(sequencer.insert((1, "world")), InsertResult::Buffered);
//! assert_eq!(sequencer.insert((0, "hello")), InsertResult::Emitted { count: 2 });
//! assert_eq!(sequencer.insert((3, "later")), InsertResult::Buffered);
//!
//! let err = sequencer.finalize().unwrap_err();
//! assert!(matches!(err, SequencerError::MissingItem { position: 2, pending: 1 }));
//! assert_eq!(consumer.join().unwrap(), vec!["hello", "world"]);
//! ```

pub mod async_core;
pub mod config;
pub mod core;
pub mod error;
pub mod pending;
pub mod result;
mod state;

#[cfg(test)]
mod tests;

// Re-export main types
pub use self::core::Sequencer;
pub use async_core::{AsyncSequencer, SequencerHandle, SequencerInput};
pub use config::SequencerConfig;
pub use error::SequencerError;
pub use pending::PendingQueue;
pub use result::InsertResult;

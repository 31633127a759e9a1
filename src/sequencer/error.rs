/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Errors reported by the sequencer.
//!
//! Only recoverable conditions live here. Inserting into (or finalizing) a
//! closed sequencer is caller misuse and panics instead.

use thiserror::Error;

/// Errors that can occur when interacting with a sequencer.
#[derive(Debug, Error)]
pub enum SequencerError {
    /// The sequencer was finalized while items were still waiting on a gap.
    #[error("never got item at position {position} ({pending} items still pending)")]
    MissingItem {
        /// The earliest position that was expected but never delivered.
        position: i64,
        /// Number of buffered items that will never be emitted.
        pending: usize,
    },

    /// The configuration could not be loaded or is inconsistent.
    #[error("invalid sequencer configuration: {0}")]
    InvalidConfig(String),

    /// The configuration document could not be parsed.
    #[error("failed to parse sequencer configuration: {source}")]
    ConfigParse {
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The spawned sequencer task is no longer accepting items.
    #[error("sequencer has been shut down")]
    Shutdown,

    /// The spawned sequencer task panicked or was cancelled.
    #[error("sequencer task failed: {source}")]
    TaskFailed {
        /// The join error reported by the runtime.
        #[source]
        source: tokio::task::JoinError,
    },
}

impl SequencerError {
    /// Returns the missing position if this is a [`SequencerError::MissingItem`].
    #[must_use]
    pub fn missing_position(&self) -> Option<i64> {
        match self {
            Self::MissingItem { position, .. } => Some(*position),
            _ => None,
        }
    }
}

/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Sequencer construction options.

use super::error::SequencerError;
use serde::{Deserialize, Serialize};

/// Options fixed when a sequencer is built.
///
/// Both fields default when omitted, so `{}` is a valid document.
///
/// # Examples
///
/// ```
/// use reorder_rs::sequencer::SequencerConfig;
///
/// let config = SequencerConfig::from_json(r#"{ "start_position": 10 }"#).unwrap();
/// assert_eq!(config.start_position, 10);
/// assert_eq!(config.capacity, None);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequencerConfig {
    /// Position of the first item the sequencer will emit.
    pub start_position: i64,

    /// Maximum number of buffered items. `None` means unbounded.
    ///
    /// When full, items that would need buffering are rejected and dropped.
    pub capacity: Option<usize>,
}

impl SequencerConfig {
    /// Config starting at `start_position`, unbounded.
    #[must_use]
    pub fn starting_at(start_position: i64) -> Self {
        Self {
            start_position,
            capacity: None,
        }
    }

    /// Returns a copy with the pending buffer limited to `capacity` items.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = Some(capacity);
        self
    }

    /// Parses and validates a JSON document.
    ///
    /// # Errors
    ///
    /// - [`SequencerError::ConfigParse`] if the document is not valid JSON for this type
    /// - [`SequencerError::InvalidConfig`] if [`validate`](Self::validate) fails
    pub fn from_json(json: &str) -> Result<Self, SequencerError> {
        let config: Self =
            serde_json::from_str(json).map_err(|source| SequencerError::ConfigParse { source })?;
        config.validate()?;
        Ok(config)
    }

    /// Checks the options for consistency.
    ///
    /// # Errors
    ///
    /// Returns [`SequencerError::InvalidConfig`] if `capacity` is zero.
    pub fn validate(&self) -> Result<(), SequencerError> {
        if self.capacity == Some(0) {
            return Err(SequencerError::InvalidConfig(
                "capacity must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

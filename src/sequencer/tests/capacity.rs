/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 19/10/26
******************************************************************************/

//! Tests for configuration and the optional pending-buffer limit.

#[cfg(test)]
mod tests {
    use crate::sequencer::{InsertResult, Sequencer, SequencerConfig, SequencerError};
    use std::thread;

    #[test]
    fn test_default_config_is_unbounded_from_zero() {
        let config = SequencerConfig::default();
        assert_eq!(config.start_position, 0);
        assert_eq!(config.capacity, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_from_json() {
        let config =
            SequencerConfig::from_json(r#"{ "start_position": -5, "capacity": 16 }"#).unwrap();
        assert_eq!(config, SequencerConfig::starting_at(-5).with_capacity(16));

        let empty = SequencerConfig::from_json("{}").unwrap();
        assert_eq!(empty, SequencerConfig::default());
    }

    #[test]
    fn test_config_round_trips_through_json() {
        let config = SequencerConfig::starting_at(3).with_capacity(2);
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(SequencerConfig::from_json(&json).unwrap(), config);
    }

    #[test]
    fn test_config_rejects_zero_capacity() {
        let err = SequencerConfig::from_json(r#"{ "capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, SequencerError::InvalidConfig(_)));

        let err = Sequencer::<i64>::with_config(SequencerConfig::default().with_capacity(0))
            .unwrap_err();
        assert!(matches!(err, SequencerError::InvalidConfig(_)));
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        let err = SequencerConfig::from_json(r#"{ "start_position": "zero" }"#).unwrap_err();
        assert!(matches!(err, SequencerError::ConfigParse { .. }));

        let err = SequencerConfig::from_json(r#"{ "window": 4 }"#).unwrap_err();
        assert!(matches!(err, SequencerError::ConfigParse { .. }));
    }

    #[test]
    fn test_full_buffer_rejects_future_items() {
        let config = SequencerConfig::default().with_capacity(2);
        let mut sequencer = Sequencer::<i64>::with_config(config).unwrap();
        let rx = sequencer.receiver();
        let consumer = thread::spawn(move || rx.iter().collect::<Vec<_>>());

        assert_eq!(sequencer.insert(5), InsertResult::Buffered);
        assert_eq!(sequencer.insert(2), InsertResult::Buffered);
        assert_eq!(sequencer.insert(7), InsertResult::Rejected);
        assert_eq!(sequencer.insert(5), InsertResult::Duplicate);
        assert_eq!(sequencer.queue_len(), 2);

        // The watermark item never needs buffer space.
        assert_eq!(sequencer.insert(0), InsertResult::Emitted { count: 1 });
        assert_eq!(sequencer.insert(1), InsertResult::Emitted { count: 2 });
        assert_eq!(sequencer.queue_len(), 1);
        assert_eq!(sequencer.insert(7), InsertResult::Buffered);

        let err = sequencer.finalize().unwrap_err();
        assert_eq!(err.missing_position(), Some(3));
        assert_eq!(consumer.join().unwrap(), vec![0, 1, 2]);
    }

    #[test]
    fn test_insert_result_helpers() {
        assert!(InsertResult::Emitted { count: 2 }.is_emitted());
        assert_eq!(InsertResult::Emitted { count: 2 }.emitted(), 2);
        assert_eq!(InsertResult::Buffered.emitted(), 0);
        assert!(!InsertResult::Buffered.is_discarded());
        assert!(InsertResult::Stale.is_discarded());
        assert!(InsertResult::Duplicate.is_discarded());
        assert!(InsertResult::Rejected.is_discarded());
    }
}

use reorder_rs::{InsertResult, Sequenced, Sequencer, SequencerConfig, SequencerError};
use std::thread;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    struct Frame {
        seq: i64,
        body: String,
    }

    impl Sequenced for Frame {
        fn position(&self) -> i64 {
            self.seq
        }
    }

    fn frame(seq: i64) -> Frame {
        Frame {
            seq,
            body: format!("frame-{seq}"),
        }
    }

    fn collect_frames(sequencer: &Sequencer<Frame>) -> thread::JoinHandle<Vec<Frame>> {
        let rx = sequencer.receiver();
        thread::spawn(move || rx.iter().collect())
    }

    // --- Scenario: out-of-order arrival with re-deliveries ---

    #[test]
    fn test_out_of_order_frames_are_restored() {
        let mut sequencer = Sequencer::new();
        let consumer = collect_frames(&sequencer);

        let results: Vec<InsertResult> = [2, 1, 1, 0, 1, 3]
            .into_iter()
            .map(|seq| sequencer.insert(frame(seq)))
            .collect();

        assert_eq!(
            results,
            vec![
                InsertResult::Buffered,
                InsertResult::Buffered,
                InsertResult::Duplicate,
                InsertResult::Emitted { count: 3 },
                InsertResult::Stale,
                InsertResult::Emitted { count: 1 },
            ]
        );
        assert!(sequencer.finalize().is_ok());

        let frames = consumer.join().unwrap();
        assert_eq!(frames, (0..4).map(frame).collect::<Vec<_>>());
    }

    // --- Scenario: the first position never arrives ---

    #[test]
    fn test_missing_first_frame() {
        let mut sequencer = Sequencer::new();
        let consumer = collect_frames(&sequencer);

        sequencer.insert(frame(1));
        match sequencer.finalize() {
            Err(SequencerError::MissingItem { position, pending }) => {
                assert_eq!(position, 0);
                assert_eq!(pending, 1);
            }
            other => panic!("expected a missing item, got {other:?}"),
        }

        assert!(consumer.join().unwrap().is_empty());
    }

    // --- Scenario: nothing inserted ---

    #[test]
    fn test_empty_stream_finalizes_cleanly() {
        let mut sequencer = Sequencer::<Frame>::new();
        let consumer = collect_frames(&sequencer);

        assert!(sequencer.finalize().is_ok());
        assert!(consumer.join().unwrap().is_empty());
    }

    // --- Scenario: misuse after finalization ---

    #[test]
    fn test_insert_after_finalize_is_fatal() {
        let result = std::panic::catch_unwind(|| {
            let mut sequencer = Sequencer::<Frame>::new();
            sequencer.finalize().ok();
            sequencer.insert(frame(0));
        });
        assert!(result.is_err());
    }

    // --- Configuration ---

    #[test]
    fn test_sequencer_from_json_config() {
        let config = SequencerConfig::from_json(r#"{ "start_position": 1000 }"#).unwrap();
        let mut sequencer = Sequencer::with_config(config).unwrap();
        let consumer = collect_frames(&sequencer);

        for seq in [1002, 999, 1001, 1000] {
            sequencer.insert(frame(seq));
        }
        assert_eq!(sequencer.next_position(), 1003);
        assert!(sequencer.finalize().is_ok());

        let seqs: Vec<i64> = consumer.join().unwrap().iter().map(|f| f.seq).collect();
        assert_eq!(seqs, vec![1000, 1001, 1002]);
    }

    #[test]
    fn test_heterogeneous_payloads() {
        let mut sequencer = Sequencer::<Box<dyn Sequenced + Send>>::new();
        let rx = sequencer.receiver();
        let consumer =
            thread::spawn(move || rx.iter().map(|item| item.position()).collect::<Vec<_>>());

        sequencer.insert(Box::new(frame(2)));
        sequencer.insert(Box::new((1_i64, vec![0_u8; 8])));
        sequencer.insert(Box::new(0_i64));
        assert!(sequencer.finalize().is_ok());

        assert_eq!(consumer.join().unwrap(), vec![0, 1, 2]);
    }
}

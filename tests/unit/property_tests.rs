use proptest::prelude::*;
use reorder_rs::{InsertResult, Sequencer};
use std::collections::BTreeSet;
use std::thread;

/// Inserts `positions` in order, returning what was emitted, the final queue
/// length and whether finalization succeeded.
fn drive(start: i64, positions: &[i64]) -> (Vec<i64>, usize, bool, Vec<InsertResult>) {
    let mut sequencer = Sequencer::starting_at(start);
    let rx = sequencer.receiver();
    let consumer = thread::spawn(move || rx.iter().collect::<Vec<i64>>());

    let results = positions.iter().map(|&p| sequencer.insert(p)).collect();
    let queue_len = sequencer.queue_len();
    let ok = sequencer.finalize().is_ok();

    (consumer.join().unwrap(), queue_len, ok, results)
}

proptest! {
    #[test]
    fn emitted_positions_are_contiguous_from_start(
        start in -50_i64..50,
        offsets in prop::collection::vec(0_i64..40, 0..120),
    ) {
        let positions: Vec<i64> = offsets.iter().map(|o| start + o).collect();
        let (emitted, queue_len, ok, _) = drive(start, &positions);

        let distinct: BTreeSet<i64> = positions.iter().copied().collect();
        let mut expected = Vec::new();
        let mut next = start;
        while distinct.contains(&next) {
            expected.push(next);
            next += 1;
        }
        let left_behind = distinct.iter().filter(|&&p| p > next).count();

        prop_assert_eq!(emitted, expected);
        prop_assert_eq!(queue_len, left_behind);
        prop_assert_eq!(ok, left_behind == 0);
    }

    #[test]
    fn repeating_the_stream_changes_nothing(
        offsets in prop::collection::vec(0_i64..30, 1..60),
    ) {
        let (once, once_len, once_ok, _) = drive(0, &offsets);

        let mut twice = offsets.clone();
        twice.extend_from_slice(&offsets);
        let (emitted, len, ok, results) = drive(0, &twice);

        prop_assert_eq!(emitted, once);
        prop_assert_eq!(len, once_len);
        prop_assert_eq!(ok, once_ok);
        prop_assert!(results[offsets.len()..].iter().all(InsertResult::is_discarded));
    }

    #[test]
    fn emitted_count_matches_insert_results(
        offsets in prop::collection::vec(0_i64..25, 0..80),
    ) {
        let (emitted, _, _, results) = drive(0, &offsets);
        let reported: usize = results.iter().map(InsertResult::emitted).sum();
        prop_assert_eq!(reported, emitted.len());
    }
}

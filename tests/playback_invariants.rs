//! Replay ordering and cancellation, plus the full session round trip.

use proptest::prelude::*;
use quicksort_visualizer::engine::sort_with_trace;
use quicksort_visualizer::model::{SessionEvent, SortDirection, MAX_NUMBER};
use quicksort_visualizer::player::{StepPlayer, Tick};
use quicksort_visualizer::session::{Session, SessionConfig};

fn sequences() -> impl Strategy<Value = Vec<u32>> {
    proptest::collection::vec(1u32..=MAX_NUMBER, 0..=40)
}

proptest! {
    #[test]
    fn steps_arrive_in_trace_order_then_one_completion(input in sequences()) {
        let trace = sort_with_trace(&input, SortDirection::Ascending);
        let mut player = StepPlayer::new();
        player.play(trace.clone());

        let mut delivered = Vec::new();
        let mut completions = 0;
        for _ in 0..trace.len() + 5 {
            match player.tick() {
                Tick::Step { index, step } => {
                    prop_assert_eq!(completions, 0);
                    prop_assert_eq!(index, delivered.len());
                    delivered.push(step.clone());
                }
                Tick::Completed => completions += 1,
                Tick::Inactive => {}
            }
        }
        prop_assert_eq!(delivered, trace);
        prop_assert_eq!(completions, 1);
    }

    #[test]
    fn stopped_trace_never_delivers_after_restart(
        first in sequences(),
        second in sequences(),
        played in 0usize..5,
    ) {
        let first_trace = sort_with_trace(&first, SortDirection::Descending);
        let second_trace = sort_with_trace(&second, SortDirection::Ascending);
        let mut player = StepPlayer::new();
        player.play(first_trace);
        for _ in 0..played {
            let _ = player.tick();
        }
        player.stop();
        prop_assert_eq!(player.tick(), Tick::Inactive);

        player.play(second_trace.clone());
        let mut delivered = Vec::new();
        player.run_to_completion(|snap, hl| delivered.push((snap.to_vec(), hl.clone())), || {});
        let expected: Vec<_> = second_trace
            .into_iter()
            .map(|s| (s.snapshot, s.highlighted))
            .collect();
        prop_assert_eq!(delivered, expected);
    }

    #[test]
    fn session_round_trip_keeps_multiset(count in 1usize..=60, seed in any::<u64>()) {
        let mut session = Session::new(SessionConfig { seed: Some(seed), ..Default::default() });
        session.on_count_submitted(count);
        let mut before = session.sequence().to_vec();
        before.sort_unstable();

        session.on_sort_requested();
        let mut completed = 0;
        loop {
            let events = session.tick();
            if events.is_empty() {
                break;
            }
            completed += events.iter().filter(|e| **e == SessionEvent::PlaybackCompleted).count();
        }
        prop_assert_eq!(completed, 1);

        let mut after = session.sequence().to_vec();
        prop_assert!(SortDirection::Ascending.is_ordered(&after));
        after.sort_unstable();
        prop_assert_eq!(after, before);
    }
}

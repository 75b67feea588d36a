//! Step-recording quicksort.
//!
//! Sorting runs over a private copy of the input. After every partition call, and
//! before recursing into its two sub-ranges, one [`Step`] is appended to the trace.

mod partition;

pub use partition::{lomuto, Partition};

use crate::model::{SortDirection, Step, Trace};

/// Sort a copy of `sequence` and return the recorded trace.
///
/// Sequences of length 0 or 1 yield an empty trace. The last step's snapshot is the
/// fully sorted sequence in `direction`.
pub fn sort_with_trace(sequence: &[u32], direction: SortDirection) -> Trace {
    let mut working = sequence.to_vec();
    let mut trace = Vec::new();
    let len = working.len();
    quicksort(&mut working, 0, len, direction, &mut trace);
    tracing::debug!(
        len,
        steps = trace.len(),
        ?direction,
        "recorded quicksort trace"
    );
    trace
}

/// Sort the half-open range `start..end`, recursing left then right.
fn quicksort(
    arr: &mut [u32],
    start: usize,
    end: usize,
    direction: SortDirection,
    trace: &mut Trace,
) {
    if end.saturating_sub(start) <= 1 {
        return;
    }

    let Partition {
        pivot_index,
        touched,
    } = lomuto(arr, start, end - 1, direction);
    trace.push(Step {
        snapshot: arr.to_vec(),
        highlighted: touched,
    });

    quicksort(arr, start, pivot_index, direction, trace);
    quicksort(arr, pivot_index + 1, end, direction, trace);
}

/// The fully sorted sequence a trace ends on, or `None` for an empty trace.
pub fn terminal_snapshot(trace: &Trace) -> Option<&[u32]> {
    trace.last().map(|step| step.snapshot.as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn highlights(trace: &Trace) -> Vec<BTreeSet<usize>> {
        trace.iter().map(|s| s.highlighted.clone()).collect()
    }

    #[test]
    fn descending_example() {
        let trace = sort_with_trace(&[5, 40, 30, 1], SortDirection::Descending);
        assert_eq!(
            trace,
            vec![
                Step {
                    snapshot: vec![5, 40, 30, 1],
                    highlighted: BTreeSet::from([0, 1, 2, 3]),
                },
                Step {
                    snapshot: vec![40, 30, 5, 1],
                    highlighted: BTreeSet::from([0, 1, 2]),
                },
            ]
        );
        assert_eq!(terminal_snapshot(&trace), Some(&[40, 30, 5, 1][..]));
    }

    #[test]
    fn singleton_and_empty_yield_no_steps() {
        assert!(sort_with_trace(&[30], SortDirection::Descending).is_empty());
        assert!(sort_with_trace(&[], SortDirection::Ascending).is_empty());
        assert_eq!(terminal_snapshot(&Vec::new()), None);
    }

    #[test]
    fn left_range_is_recorded_before_right_range() {
        let trace = sort_with_trace(&[2, 5, 1, 4, 3], SortDirection::Ascending);
        assert_eq!(
            highlights(&trace),
            vec![
                BTreeSet::from([0, 1, 2, 4]),
                BTreeSet::from([0, 1]),
                BTreeSet::from([3, 4]),
            ]
        );
        assert_eq!(trace[0].snapshot, vec![2, 1, 3, 4, 5]);
        assert_eq!(trace[2].snapshot, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn pivot_at_front_recurses_right_only() {
        let trace = sort_with_trace(&[1, 2, 3, 4], SortDirection::Descending);
        assert_eq!(
            highlights(&trace),
            vec![
                BTreeSet::from([0, 3]),
                BTreeSet::from([1, 2, 3]),
                BTreeSet::from([1, 2]),
            ]
        );
        assert_eq!(trace[2].snapshot, vec![4, 3, 2, 1]);
    }

    #[test]
    fn input_is_not_mutated() {
        let input = vec![3, 1, 2];
        let trace = sort_with_trace(&input, SortDirection::Ascending);
        assert_eq!(input, vec![3, 1, 2]);
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].snapshot, vec![1, 2, 3]);
        assert_eq!(trace[0].highlighted, BTreeSet::from([0, 1, 2]));
    }

    #[test]
    fn repeated_calls_are_identical() {
        let input = [17, 900, 3, 3, 512, 44, 1000, 1];
        for direction in [SortDirection::Descending, SortDirection::Ascending] {
            assert_eq!(
                sort_with_trace(&input, direction),
                sort_with_trace(&input, direction)
            );
        }
    }
}

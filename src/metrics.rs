use crate::model::Trace;
use serde::{Deserialize, Serialize};

/// Aggregate statistics over a recorded trace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TraceSummary {
    pub steps: usize,
    /// Sum of highlight-set sizes across all steps.
    pub touched_total: usize,
    pub max_touched: usize,
    /// Steps whose snapshot differs from the state before them.
    pub changed_steps: usize,
}

/// Compute trace statistics. `input` is the sequence the trace was recorded from.
pub fn summarize(input: &[u32], trace: &Trace) -> TraceSummary {
    let mut summary = TraceSummary {
        steps: trace.len(),
        ..Default::default()
    };
    let mut previous = input;
    for step in trace {
        let touched = step.highlighted.len();
        summary.touched_total += touched;
        summary.max_touched = summary.max_touched.max(touched);
        if step.snapshot.as_slice() != previous {
            summary.changed_steps += 1;
        }
        previous = step.snapshot.as_slice();
    }
    summary
}

/// Mean highlight-set size, or `None` for an empty trace.
pub fn mean_touched(summary: &TraceSummary) -> Option<f64> {
    if summary.steps == 0 {
        return None;
    }
    Some(summary.touched_total as f64 / summary.steps as f64)
}

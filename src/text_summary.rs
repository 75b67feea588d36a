//! Text rendering for headless mode.
//!
//! Steps print as one line each; highlighted positions are bracketed.

use quicksort_visualizer::metrics;
use quicksort_visualizer::model::{SortDirection, Step, Trace};
use std::collections::BTreeSet;

/// Pre-formatted lines for text output.
pub(crate) struct TextSummary {
    pub lines: Vec<String>,
}

/// Join values with spaces, bracketing highlighted positions.
pub(crate) fn format_values(values: &[u32], highlighted: Option<&BTreeSet<usize>>) -> String {
    values
        .iter()
        .enumerate()
        .map(|(i, v)| match highlighted {
            Some(h) if h.contains(&i) => format!("[{v}]"),
            _ => v.to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// One line per replayed step, e.g. `step 2/3: 40 [30] [5] 1`.
pub(crate) fn format_step(index: usize, total: usize, step: &Step) -> String {
    format!(
        "step {}/{}: {}",
        index + 1,
        total,
        format_values(&step.snapshot, Some(&step.highlighted))
    )
}

/// Closing lines printed after the replay finishes.
pub(crate) fn build_text_summary(
    input: &[u32],
    trace: &Trace,
    direction: SortDirection,
) -> TextSummary {
    let mut lines = Vec::new();
    let summary = metrics::summarize(input, trace);

    let sorted = trace
        .last()
        .map(|s| s.snapshot.as_slice())
        .unwrap_or(input);
    lines.push(format!(
        "Sorted {}: {}",
        direction.arrow(),
        format_values(sorted, None)
    ));

    match metrics::mean_touched(&summary) {
        Some(mean) => lines.push(format!(
            "Steps: {} (changed {}), touched avg {:.1} max {}",
            summary.steps, summary.changed_steps, mean, summary.max_touched
        )),
        None => lines.push("Steps: 0 (nothing to sort)".to_string()),
    }

    TextSummary { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksort_visualizer::engine::sort_with_trace;

    #[test]
    fn brackets_highlighted_values() {
        let h = BTreeSet::from([1, 2]);
        assert_eq!(format_values(&[40, 30, 5, 1], Some(&h)), "40 [30] [5] 1");
        assert_eq!(format_values(&[40, 30], None), "40 30");
    }

    #[test]
    fn step_line_is_one_based() {
        let step = Step {
            snapshot: vec![3, 1],
            highlighted: BTreeSet::from([0]),
        };
        assert_eq!(format_step(0, 2, &step), "step 1/2: [3] 1");
    }

    #[test]
    fn summary_for_example() {
        let input = [5, 40, 30, 1];
        let trace = sort_with_trace(&input, SortDirection::Descending);
        let s = build_text_summary(&input, &trace, SortDirection::Descending);
        assert_eq!(
            s.lines,
            vec![
                "Sorted ↓: 40 30 5 1".to_string(),
                "Steps: 2 (changed 1), touched avg 3.5 max 4".to_string(),
            ]
        );
    }

    #[test]
    fn summary_for_singleton() {
        let s = build_text_summary(&[30], &Vec::new(), SortDirection::Ascending);
        assert_eq!(s.lines[0], "Sorted ↑: 30");
        assert_eq!(s.lines[1], "Steps: 0 (nothing to sort)");
    }
}

//! JSON export of a recorded trace.

use anyhow::{Context, Result};
use quicksort_visualizer::metrics::{self, TraceSummary};
use quicksort_visualizer::model::{RunConfig, SortDirection, Step, Trace};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraceExport {
    #[serde(default)]
    pub timestamp_utc: String,
    pub config: RunConfig,
    pub direction: SortDirection,
    pub input: Vec<u32>,
    pub steps: Vec<Step>,
    pub summary: TraceSummary,
}

pub fn build_export(cfg: &RunConfig, input: &[u32], trace: &Trace) -> TraceExport {
    TraceExport {
        timestamp_utc: time::OffsetDateTime::now_utc()
            .format(&time::format_description::well_known::Rfc3339)
            .unwrap_or_else(|_| "now".into()),
        config: cfg.clone(),
        direction: cfg.direction,
        input: input.to_vec(),
        steps: trace.clone(),
        summary: metrics::summarize(input, trace),
    }
}

pub fn export_json(path: &Path, export: &TraceExport) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create export directory {}", parent.display()))?;
    }
    let data = serde_json::to_vec_pretty(export)?;
    std::fs::write(path, data).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksort_visualizer::engine::sort_with_trace;
    use std::time::Duration;

    fn cfg() -> RunConfig {
        RunConfig {
            count: Some(4),
            seed: Some(1),
            tick_interval: Duration::from_millis(300),
            max_count: 100,
            direction: SortDirection::Descending,
        }
    }

    #[test]
    fn export_round_trips_through_file() {
        let input = [5, 40, 30, 1];
        let trace = sort_with_trace(&input, SortDirection::Descending);
        let export = build_export(&cfg(), &input, &trace);
        assert_eq!(export.summary.steps, 2);

        let dir = std::env::temp_dir().join(format!(
            "quicksort-visualizer-test-{}",
            std::process::id()
        ));
        let path = dir.join("trace.json");
        export_json(&path, &export).unwrap();

        let raw = std::fs::read_to_string(&path).unwrap();
        let back: TraceExport = serde_json::from_str(&raw).unwrap();
        assert_eq!(back.steps, trace);
        assert_eq!(back.input, input.to_vec());
        assert_eq!(back.config.tick_interval, Duration::from_millis(300));
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["config"]["tick_interval"], "300ms");
        assert_eq!(value["direction"], "descending");

        let _ = std::fs::remove_dir_all(&dir);
    }
}

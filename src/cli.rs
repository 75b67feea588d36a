use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use quicksort_visualizer::engine::sort_with_trace;
use quicksort_visualizer::generator::{generate, make_rng};
use quicksort_visualizer::model::{RunConfig, SortDirection, Trace, DEFAULT_TICK};
use quicksort_visualizer::player::{StepPlayer, Tick};
use quicksort_visualizer::session::{validate_count, DEFAULT_MAX_COUNT};
use std::io::Write;
use std::time::Duration;
use tokio::sync::mpsc;

/// Output line routing for stdout/stderr writer.
enum OutputLine {
    Stdout(String),
    Stderr(String),
}

/// Spawn a blocking writer for stdout/stderr to avoid blocking async tasks.
fn spawn_output_writer() -> (
    mpsc::UnboundedSender<OutputLine>,
    tokio::task::JoinHandle<()>,
) {
    let (tx, mut rx) = mpsc::unbounded_channel::<OutputLine>();
    let handle = tokio::task::spawn_blocking(move || {
        let stdout = std::io::stdout();
        let stderr = std::io::stderr();
        let mut out = std::io::LineWriter::new(stdout.lock());
        let mut err = std::io::LineWriter::new(stderr.lock());

        while let Some(line) = rx.blocking_recv() {
            match line {
                OutputLine::Stdout(msg) => {
                    let _ = writeln!(out, "{}", msg);
                }
                OutputLine::Stderr(msg) => {
                    let _ = writeln!(err, "{}", msg);
                }
            }
        }

        let _ = out.flush();
        let _ = err.flush();
    });
    (tx, handle)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum DirectionArg {
    Desc,
    Asc,
}

impl From<DirectionArg> for SortDirection {
    fn from(d: DirectionArg) -> Self {
        match d {
            DirectionArg::Desc => SortDirection::Descending,
            DirectionArg::Asc => SortDirection::Ascending,
        }
    }
}

#[derive(Debug, Parser, Clone)]
#[command(
    name = "quicksort-visualizer",
    version,
    about = "Watch quicksort partition a random sequence, one swap at a time"
)]
pub struct Cli {
    /// Number of values to generate (skips the input screen)
    #[arg(long)]
    pub count: Option<usize>,

    /// Seed the generator for reproducible sequences
    #[arg(long)]
    pub seed: Option<u64>,

    /// Delay between replayed steps
    #[arg(long, default_value_t = humantime::Duration::from(DEFAULT_TICK))]
    pub tick: humantime::Duration,

    /// Largest count accepted from the input screen or --count
    #[arg(long, default_value_t = DEFAULT_MAX_COUNT)]
    pub max_count: usize,

    /// Sort direction for --text and --json runs
    #[arg(long, value_enum, default_value_t = DirectionArg::Desc)]
    pub direction: DirectionArg,

    /// Print each step as text and exit (no TUI)
    #[arg(long, conflicts_with = "json")]
    pub text: bool,

    /// Print the recorded trace as JSON and exit (no TUI)
    #[arg(long)]
    pub json: bool,

    /// Export the recorded trace as JSON (with --text or --json)
    #[arg(long)]
    pub export_json: Option<std::path::PathBuf>,

    /// Append logs to this file (the TUI never logs to the terminal)
    #[arg(long)]
    pub log_file: Option<std::path::PathBuf>,
}

impl Cli {
    pub fn is_headless(&self) -> bool {
        self.text || self.json
    }
}

pub async fn run(args: Cli) -> Result<()> {
    if args.is_headless() && args.count.is_none() {
        return Err(anyhow::anyhow!(
            "--text and --json need --count to know how many values to generate."
        ));
    }
    if args.export_json.is_some() && !args.is_headless() {
        return Err(anyhow::anyhow!(
            "--export-json can only be used with --text or --json."
        ));
    }

    let cfg = build_config(&args);

    if !args.is_headless() {
        #[cfg(feature = "tui")]
        {
            return crate::tui::run(cfg).await;
        }
        #[cfg(not(feature = "tui"))]
        {
            // Fallback when built without TUI support.
            if cfg.count.is_none() {
                return Err(anyhow::anyhow!(
                    "built without TUI support; pass --count to run in text mode"
                ));
            }
            return run_text(&args, cfg).await;
        }
    }

    if args.json {
        return run_json(&args, cfg).await;
    }

    run_text(&args, cfg).await
}

/// Build a `RunConfig` from CLI arguments.
pub fn build_config(args: &Cli) -> RunConfig {
    RunConfig {
        count: args.count,
        seed: args.seed,
        tick_interval: Duration::from(args.tick),
        max_count: args.max_count,
        direction: args.direction.into(),
    }
}

/// Generate the input sequence and record its trace for a one-shot run.
fn record(cfg: &RunConfig) -> Result<(Vec<u32>, Trace)> {
    let count = cfg
        .count
        .context("a count is required for headless runs")?;
    let count = validate_count(count, cfg.max_count).context("invalid --count")?;
    let input = generate(count, &mut make_rng(cfg.seed));
    let trace = sort_with_trace(&input, cfg.direction);
    tracing::info!(count, steps = trace.len(), direction = ?cfg.direction, "recorded trace");
    Ok((input, trace))
}

async fn run_json(args: &Cli, cfg: RunConfig) -> Result<()> {
    let (input, trace) = record(&cfg)?;
    let export = crate::storage::build_export(&cfg, &input, &trace);

    handle_exports(args, &export)?;

    let (out_tx, out_handle) = spawn_output_writer();
    let out = serde_json::to_string_pretty(&export)?;
    let _ = out_tx.send(OutputLine::Stdout(out));
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

async fn run_text(args: &Cli, cfg: RunConfig) -> Result<()> {
    let (input, trace) = record(&cfg)?;
    let (out_tx, out_handle) = spawn_output_writer();

    let _ = out_tx.send(OutputLine::Stderr(format!(
        "== Sorting {} values {} ==",
        input.len(),
        cfg.direction.arrow()
    )));
    let _ = out_tx.send(OutputLine::Stdout(crate::text_summary::format_values(
        &input, None,
    )));

    let total = trace.len();
    let mut player = StepPlayer::new();
    player.play(trace.clone());

    // A zero interval replays as fast as the writer drains.
    let mut ticker = (!cfg.tick_interval.is_zero()).then(|| {
        let mut t = tokio::time::interval(cfg.tick_interval);
        t.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        t
    });
    if let Some(t) = ticker.as_mut() {
        // The first interval tick fires immediately; consume it so step 1 waits a full period.
        t.tick().await;
    }

    loop {
        if let Some(t) = ticker.as_mut() {
            t.tick().await;
        }
        match player.tick() {
            Tick::Step { index, step } => {
                let line = crate::text_summary::format_step(index, total, step);
                let _ = out_tx.send(OutputLine::Stdout(line));
            }
            Tick::Completed | Tick::Inactive => break,
        }
    }

    handle_exports(args, &crate::storage::build_export(&cfg, &input, &trace))?;

    let summary = crate::text_summary::build_text_summary(&input, &trace, cfg.direction);
    for line in summary.lines {
        let _ = out_tx.send(OutputLine::Stderr(line));
    }
    drop(out_tx);
    let _ = out_handle.await;
    Ok(())
}

/// Write the trace export if one was requested.
fn handle_exports(args: &Cli, export: &crate::storage::TraceExport) -> Result<()> {
    if let Some(p) = args.export_json.as_deref() {
        crate::storage::export_json(p, export)?;
        tracing::info!(path = %p.display(), "exported trace");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_use_300ms_cadence() {
        let args = Cli::parse_from(["quicksort-visualizer"]);
        let cfg = build_config(&args);
        assert_eq!(cfg.tick_interval, DEFAULT_TICK);
        assert_eq!(cfg.tick_interval, Duration::from_millis(300));
        assert_eq!(cfg.count, None);
        assert_eq!(cfg.direction, SortDirection::Descending);
        assert_eq!(cfg.max_count, DEFAULT_MAX_COUNT);
    }

    #[test]
    fn parses_headless_flags() {
        let args = Cli::parse_from([
            "quicksort-visualizer",
            "--text",
            "--count",
            "12",
            "--seed",
            "9",
            "--direction",
            "asc",
            "--tick",
            "50ms",
        ]);
        assert!(args.is_headless());
        let cfg = build_config(&args);
        assert_eq!(cfg.count, Some(12));
        assert_eq!(cfg.seed, Some(9));
        assert_eq!(cfg.direction, SortDirection::Ascending);
        assert_eq!(cfg.tick_interval, Duration::from_millis(50));
    }

    #[test]
    fn text_and_json_conflict() {
        let res = Cli::try_parse_from(["quicksort-visualizer", "--text", "--json"]);
        assert!(res.is_err());
    }

    #[test]
    fn record_rejects_zero_count() {
        let args = Cli::parse_from(["quicksort-visualizer", "--json", "--count", "0"]);
        assert!(record(&build_config(&args)).is_err());
    }

    #[test]
    fn record_is_reproducible_with_seed() {
        let args = Cli::parse_from(["quicksort-visualizer", "--json", "--count", "25", "--seed", "3"]);
        let cfg = build_config(&args);
        let (a_in, a_trace) = record(&cfg).unwrap();
        let (b_in, b_trace) = record(&cfg).unwrap();
        assert_eq!(a_in, b_in);
        assert_eq!(a_trace, b_trace);
        assert!(SortDirection::Descending.is_ordered(&a_trace.last().unwrap().snapshot));
    }
}

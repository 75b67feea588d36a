//! Session lifecycle controller.
//!
//! Owns the [`Session`], applies UI commands to it, and drives replay ticks from a
//! tokio interval. Every resulting event is forwarded to the presentation layer.

use anyhow::Result;
use quicksort_visualizer::model::{RunConfig, SessionEvent};
use quicksort_visualizer::session::{Session, SessionConfig};
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};
use tokio::time::{Duration, MissedTickBehavior};

/// Commands emitted by UI layers to drive the session.
#[derive(Debug, Clone)]
pub(crate) enum UiCommand {
    /// Raw text typed on the input screen.
    SubmitCount(String),
    SelectValue(u32),
    Sort,
    Reset,
    Quit,
}

/// Forward events; returns false once the presentation layer has gone away.
fn forward(event_tx: &UnboundedSender<SessionEvent>, events: Vec<SessionEvent>) -> bool {
    events.into_iter().all(|ev| event_tx.send(ev).is_ok())
}

/// Apply UI commands to the session and replay steps at the configured cadence.
pub(crate) async fn run_controller(
    cfg: &RunConfig,
    event_tx: UnboundedSender<SessionEvent>,
    mut cmd_rx: UnboundedReceiver<UiCommand>,
) -> Result<()> {
    let mut session = Session::new(SessionConfig::from(cfg));
    if let Some(count) = cfg.count {
        forward(&event_tx, session.on_count_submitted(count));
    }

    // tokio intervals panic on a zero period.
    let period = cfg.tick_interval.max(Duration::from_millis(1));
    let mut ticker = tokio::time::interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            cmd = cmd_rx.recv() => {
                let events = match cmd {
                    Some(UiCommand::SubmitCount(text)) => session.on_input_submitted(&text),
                    Some(UiCommand::SelectValue(v)) => session.on_value_selected(v),
                    Some(UiCommand::Sort) => {
                        let events = session.on_sort_requested();
                        // The first step lands one full period after the request.
                        ticker.reset();
                        events
                    }
                    Some(UiCommand::Reset) => session.on_reset_requested(),
                    Some(UiCommand::Quit) | None => {
                        if session.is_playing() {
                            let _ = session.on_reset_requested();
                        }
                        tracing::debug!("controller shutting down");
                        break Ok(());
                    }
                };
                if !forward(&event_tx, events) {
                    break Ok(());
                }
            }
            _ = ticker.tick(), if session.is_playing() => {
                if !forward(&event_tx, session.tick()) {
                    break Ok(());
                }
            }
        }
    }
}

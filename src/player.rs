//! Cooperative replay of a recorded trace.
//!
//! The player never sleeps or owns a timer. The host decides what drives [`StepPlayer::tick`]:
//! a tokio interval in the app, a manual loop in tests, or [`StepPlayer::run_to_completion`]
//! in headless modes.

use crate::model::{Step, Trace};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerState {
    /// Nothing loaded yet.
    Idle,
    Playing,
    /// Ran past the last step; `on_complete` has fired.
    Finished,
    /// Cancelled by [`StepPlayer::stop`] before finishing.
    Stopped,
}

/// What a single tick produced.
#[derive(Debug, PartialEq, Eq)]
pub enum Tick<'a> {
    Step { index: usize, step: &'a Step },
    Completed,
    /// The player is not active; nothing happened.
    Inactive,
}

#[derive(Debug)]
pub struct StepPlayer {
    trace: Trace,
    cursor: usize,
    state: PlayerState,
}

impl Default for StepPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl StepPlayer {
    pub fn new() -> Self {
        Self {
            trace: Vec::new(),
            cursor: 0,
            state: PlayerState::Idle,
        }
    }

    /// Load `trace` and start playing from its first step.
    ///
    /// Any session still in flight is stopped first, so at most one trace is ever live.
    pub fn play(&mut self, trace: Trace) {
        if self.is_active() {
            self.stop();
        }
        self.trace = trace;
        self.cursor = 0;
        self.state = PlayerState::Playing;
    }

    /// Halt future ticks. The cursor stays where it was; delivered steps are not undone.
    pub fn stop(&mut self) {
        if self.state == PlayerState::Playing {
            tracing::debug!(cursor = self.cursor, total = self.trace.len(), "playback stopped");
            self.state = PlayerState::Stopped;
        }
    }

    /// Advance by one step.
    ///
    /// Reaching the end of the trace yields [`Tick::Completed`] exactly once; every tick
    /// after that (or after [`stop`](Self::stop)) yields [`Tick::Inactive`].
    pub fn tick(&mut self) -> Tick<'_> {
        if self.state != PlayerState::Playing {
            return Tick::Inactive;
        }
        if self.cursor >= self.trace.len() {
            self.state = PlayerState::Finished;
            return Tick::Completed;
        }
        let index = self.cursor;
        self.cursor += 1;
        Tick::Step {
            index,
            step: &self.trace[index],
        }
    }

    /// Tick once, dispatching to the callbacks. Returns whether playback is still active.
    pub fn tick_with<S, C>(&mut self, on_step: S, on_complete: C) -> bool
    where
        S: FnOnce(&[u32], &BTreeSet<usize>),
        C: FnOnce(),
    {
        match self.tick() {
            Tick::Step { step, .. } => {
                on_step(&step.snapshot, &step.highlighted);
                true
            }
            Tick::Completed => {
                on_complete();
                false
            }
            Tick::Inactive => false,
        }
    }

    /// Drive the loaded trace synchronously until it completes or is inactive.
    pub fn run_to_completion<S, C>(&mut self, mut on_step: S, on_complete: C)
    where
        S: FnMut(&[u32], &BTreeSet<usize>),
        C: FnOnce(),
    {
        let mut on_complete = Some(on_complete);
        loop {
            match self.tick() {
                Tick::Step { step, .. } => on_step(&step.snapshot, &step.highlighted),
                Tick::Completed => {
                    if let Some(done) = on_complete.take() {
                        done();
                    }
                    break;
                }
                Tick::Inactive => break,
            }
        }
    }

    pub fn is_active(&self) -> bool {
        self.state == PlayerState::Playing
    }

    pub fn state(&self) -> PlayerState {
        self.state
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn len(&self) -> usize {
        self.trace.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trace.is_empty()
    }

    /// Final snapshot of the loaded trace, if it has any steps.
    pub fn terminal_snapshot(&self) -> Option<&[u32]> {
        crate::engine::terminal_snapshot(&self.trace)
    }
}

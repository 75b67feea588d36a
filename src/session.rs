//! Session state and its transitions.
//!
//! [`Session`] owns everything the presentation layer displays. Each entry point
//! mutates the session and returns the [`SessionEvent`]s the presentation layer
//! must apply; nothing else writes to the displayed state.

use crate::engine::sort_with_trace;
use crate::generator::{generate, make_rng};
use crate::model::{Notice, RunConfig, Screen, SessionEvent, SortDirection, MIN_VALUE};
use crate::player::{StepPlayer, Tick};
use rand::rngs::StdRng;
use std::collections::BTreeSet;
use thiserror::Error;

/// Upper bound on a submitted count unless configured otherwise.
pub const DEFAULT_MAX_COUNT: usize = 100_000;

/// Errors recovered inside the session by surfacing a notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("invalid count {input:?}: expected a positive integer")]
    InvalidCount { input: String },
    #[error("count {count} exceeds the maximum of {max}")]
    CountTooLarge { count: usize, max: usize },
    #[error("value {value} is larger than {max}")]
    ValueTooLarge { value: u32, max: u32 },
}

impl SessionError {
    pub fn notice(&self) -> Notice {
        match self {
            SessionError::InvalidCount { .. } => Notice::InvalidCount,
            SessionError::CountTooLarge { max, .. } => Notice::CountTooLarge { max: *max },
            SessionError::ValueTooLarge { max, .. } => Notice::ValueTooLarge { max: *max },
        }
    }
}

/// Parse user input into a positive count. Surrounding whitespace is ignored.
pub fn parse_count(input: &str) -> Result<usize, SessionError> {
    let invalid = || SessionError::InvalidCount {
        input: input.to_string(),
    };
    let n: i64 = input.trim().parse().map_err(|_| invalid())?;
    if n <= 0 {
        return Err(invalid());
    }
    usize::try_from(n).map_err(|_| invalid())
}

/// Check a count against the accepted range `1..=max`.
pub fn validate_count(count: usize, max: usize) -> Result<usize, SessionError> {
    if count == 0 {
        return Err(SessionError::InvalidCount {
            input: count.to_string(),
        });
    }
    if count > max {
        return Err(SessionError::CountTooLarge { count, max });
    }
    Ok(count)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    pub max_count: usize,
    /// Seed for the generator; `None` draws from OS entropy.
    pub seed: Option<u64>,
}

impl From<&RunConfig> for SessionConfig {
    fn from(cfg: &RunConfig) -> Self {
        Self {
            max_count: cfg.max_count,
            seed: cfg.seed,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_count: DEFAULT_MAX_COUNT,
            seed: None,
        }
    }
}

pub struct Session {
    screen: Screen,
    sequence: Vec<u32>,
    highlighted: BTreeSet<usize>,
    direction: SortDirection,
    player: StepPlayer,
    rng: StdRng,
    max_count: usize,
}

impl Session {
    pub fn new(cfg: SessionConfig) -> Self {
        Self {
            screen: Screen::Input,
            sequence: Vec::new(),
            highlighted: BTreeSet::new(),
            direction: SortDirection::Descending,
            player: StepPlayer::new(),
            rng: make_rng(cfg.seed),
            max_count: cfg.max_count,
        }
    }

    /// Raw text from the input screen.
    pub fn on_input_submitted(&mut self, input: &str) -> Vec<SessionEvent> {
        match parse_count(input) {
            Ok(count) => self.on_count_submitted(count),
            Err(e) => Self::reject(e),
        }
    }

    /// A validated count: generate a fresh data set and enter the browsing screen.
    pub fn on_count_submitted(&mut self, count: usize) -> Vec<SessionEvent> {
        let count = match validate_count(count, self.max_count) {
            Ok(count) => count,
            Err(e) => return Self::reject(e),
        };
        let mut events = self.cancel_playback();
        events.extend(self.load(count));
        events
    }

    /// Drill-down: a small value regenerates the data set with that many numbers.
    /// The value is already bounded by [`MIN_VALUE`], so `max_count` does not apply.
    pub fn on_value_selected(&mut self, value: u32) -> Vec<SessionEvent> {
        if self.screen != Screen::Browsing {
            return Vec::new();
        }
        if value > MIN_VALUE {
            return Self::reject(SessionError::ValueTooLarge {
                value,
                max: MIN_VALUE,
            });
        }
        if value == 0 {
            return Self::reject(SessionError::InvalidCount {
                input: value.to_string(),
            });
        }
        let mut events = self.cancel_playback();
        events.extend(self.load(value as usize));
        events
    }

    /// Toggle the direction, record a fresh trace of the displayed sequence, and start
    /// replaying it. Any replay still running is cancelled first.
    pub fn on_sort_requested(&mut self) -> Vec<SessionEvent> {
        if self.screen != Screen::Browsing {
            return Vec::new();
        }
        let mut events = self.cancel_playback();

        self.direction = self.direction.toggled();
        self.highlighted.clear();
        let trace = sort_with_trace(&self.sequence, self.direction);
        let steps = trace.len();
        self.player.play(trace);
        tracing::info!(direction = ?self.direction, steps, len = self.sequence.len(), "sort started");

        events.push(SessionEvent::DirectionChanged {
            direction: self.direction,
        });
        events.push(SessionEvent::PlaybackStarted {
            direction: self.direction,
            steps,
        });
        events
    }

    /// Stop any replay and go back to the input screen.
    pub fn on_reset_requested(&mut self) -> Vec<SessionEvent> {
        let mut events = self.cancel_playback();
        self.highlighted.clear();
        self.screen = Screen::Input;
        events.push(SessionEvent::ScreenChanged {
            screen: Screen::Input,
        });
        events
    }

    /// Advance the replay by one step. Does nothing while no replay is active.
    /// The displayed order always follows the current sort direction.
    pub fn tick(&mut self) -> Vec<SessionEvent> {
        let total = self.player.len();
        match self.player.tick() {
            Tick::Step { index, step } => {
                self.sequence.clone_from(&step.snapshot);
                self.highlighted.clone_from(&step.highlighted);
                vec![
                    SessionEvent::StepPlayed { index, total },
                    self.render(),
                ]
            }
            Tick::Completed => {
                if let Some(sorted) = self.player.terminal_snapshot() {
                    self.sequence = sorted.to_vec();
                }
                self.highlighted.clear();
                tracing::info!(steps = total, "playback completed");
                vec![SessionEvent::PlaybackCompleted, self.render()]
            }
            Tick::Inactive => Vec::new(),
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn sequence(&self) -> &[u32] {
        &self.sequence
    }

    pub fn highlighted(&self) -> &BTreeSet<usize> {
        &self.highlighted
    }

    pub fn direction(&self) -> SortDirection {
        self.direction
    }

    pub fn is_playing(&self) -> bool {
        self.player.is_active()
    }

    fn load(&mut self, count: usize) -> Vec<SessionEvent> {
        self.sequence = generate(count, &mut self.rng);
        self.highlighted.clear();
        self.direction = SortDirection::Descending;
        self.screen = Screen::Browsing;
        tracing::info!(count, "generated data set");
        vec![
            SessionEvent::ScreenChanged {
                screen: Screen::Browsing,
            },
            SessionEvent::DirectionChanged {
                direction: self.direction,
            },
            SessionEvent::Notice(Notice::Generated { count }),
            self.render(),
        ]
    }

    fn cancel_playback(&mut self) -> Vec<SessionEvent> {
        if self.player.is_active() {
            self.player.stop();
            vec![SessionEvent::PlaybackCancelled]
        } else {
            Vec::new()
        }
    }

    fn render(&self) -> SessionEvent {
        SessionEvent::Render {
            snapshot: self.sequence.clone(),
            highlighted: self.highlighted.clone(),
        }
    }

    fn reject(e: SessionError) -> Vec<SessionEvent> {
        tracing::debug!(error = %e, "rejected input");
        vec![SessionEvent::Notice(e.notice())]
    }
}

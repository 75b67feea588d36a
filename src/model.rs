use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Largest value the generator will produce (inclusive).
pub const MAX_NUMBER: u32 = 1000;
/// Values at or below this are "small": every generated sequence holds at least one,
/// and only these can be selected to regenerate the data set.
pub const MIN_VALUE: u32 = 30;
/// Number of value cells stacked in one column of the browsing grid.
pub const ROWS_PER_COLUMN: usize = 10;
/// Replay cadence between two recorded steps.
pub const DEFAULT_TICK: Duration = Duration::from_millis(300);

/// Resolved run configuration, built from CLI arguments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Count submitted on launch; `None` starts on the input screen.
    #[serde(default)]
    pub count: Option<usize>,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    pub max_count: usize,
    /// Direction for one-shot headless runs.
    pub direction: SortDirection,
}

/// One recorded partition step: the full working array right after the partition
/// call returned, plus every index its swaps touched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub snapshot: Vec<u32>,
    pub highlighted: BTreeSet<usize>,
}

/// Steps in the order their partition calls completed.
pub type Trace = Vec<Step>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Descending,
    Ascending,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Descending => SortDirection::Ascending,
            SortDirection::Ascending => SortDirection::Descending,
        }
    }

    /// Whether `element` belongs before `pivot` in this direction.
    pub fn precedes(self, element: u32, pivot: u32) -> bool {
        match self {
            SortDirection::Descending => element > pivot,
            SortDirection::Ascending => element < pivot,
        }
    }

    /// Whether `values` is ordered per this direction (ties allowed).
    pub fn is_ordered(self, values: &[u32]) -> bool {
        match self {
            SortDirection::Descending => values.windows(2).all(|w| w[0] >= w[1]),
            SortDirection::Ascending => values.windows(2).all(|w| w[0] <= w[1]),
        }
    }

    pub fn arrow(self) -> &'static str {
        match self {
            SortDirection::Descending => "↓",
            SortDirection::Ascending => "↑",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Input,
    Browsing,
}

/// Events emitted by the session and consumed by presentation layers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEvent {
    ScreenChanged {
        screen: Screen,
    },
    /// Render request: sent once on initial display and once per playback tick.
    Render {
        snapshot: Vec<u32>,
        highlighted: BTreeSet<usize>,
    },
    DirectionChanged {
        direction: SortDirection,
    },
    PlaybackStarted {
        direction: SortDirection,
        steps: usize,
    },
    StepPlayed {
        index: usize,
        total: usize,
    },
    PlaybackCompleted,
    PlaybackCancelled,
    Notice(Notice),
}

/// User-facing messages surfaced by the session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Notice {
    InvalidCount,
    CountTooLarge { max: usize },
    ValueTooLarge { max: u32 },
    Generated { count: usize },
}

impl Notice {
    /// Render a human-readable message for UI/CLI layers.
    pub fn to_message(&self) -> String {
        match self {
            Notice::InvalidCount => "Enter a valid positive number.".to_string(),
            Notice::CountTooLarge { max } => {
                format!("Enter a number no larger than {}.", max)
            }
            Notice::ValueTooLarge { max } => {
                format!("Please select a value smaller or equal to {}.", max)
            }
            Notice::Generated { count } => format!("Generated {} numbers", count),
        }
    }
}

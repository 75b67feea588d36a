use quicksort_visualizer::model::{Screen, SessionEvent, SortDirection, ROWS_PER_COLUMN};
use std::collections::BTreeSet;

/// Presentation-side copy of what the session last told us to show.
///
/// Only [`apply_event`] writes the session-derived fields; key handling touches
/// the input buffer, cursor, and help toggle.
pub struct UiState {
    pub screen: Screen,
    pub input: String,
    pub sequence: Vec<u32>,
    pub highlighted: BTreeSet<usize>,
    pub direction: SortDirection,
    pub playing: bool,
    /// Steps shown so far and trace length.
    pub progress: (usize, usize),
    pub cursor: usize,
    pub info: String,
    pub show_help: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            screen: Screen::Input,
            input: String::new(),
            sequence: Vec::new(),
            highlighted: BTreeSet::new(),
            direction: SortDirection::Descending,
            playing: false,
            progress: (0, 0),
            cursor: 0,
            info: String::new(),
            show_help: false,
        }
    }
}

/// Cursor movement across the column-major value grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    Up,
    Down,
    Left,
    Right,
}

impl UiState {
    pub fn move_cursor(&mut self, m: Move) {
        let len = self.sequence.len();
        if len == 0 {
            self.cursor = 0;
            return;
        }
        let cur = self.cursor.min(len - 1);
        self.cursor = match m {
            Move::Up => cur.saturating_sub(1),
            Move::Down => (cur + 1).min(len - 1),
            Move::Left => cur.checked_sub(ROWS_PER_COLUMN).unwrap_or(cur),
            Move::Right => {
                let next = cur + ROWS_PER_COLUMN;
                if next < len {
                    next
                } else {
                    cur
                }
            }
        };
    }

    /// Value under the cursor, if the sequence is non-empty.
    pub fn selected_value(&self) -> Option<u32> {
        self.sequence.get(self.cursor).copied()
    }

    /// Label of the sort control, mirroring the direction of the last sort.
    pub fn sort_label(&self) -> String {
        format!("Sort {}", self.direction.arrow())
    }
}

/// First grid column to draw so the cursor's column stays visible.
pub fn first_visible_column(cursor: usize, visible_columns: usize) -> usize {
    let cursor_col = cursor / ROWS_PER_COLUMN;
    cursor_col.saturating_sub(visible_columns.saturating_sub(1))
}

pub fn apply_event(state: &mut UiState, ev: SessionEvent) {
    match ev {
        SessionEvent::ScreenChanged { screen } => {
            state.screen = screen;
            if screen == Screen::Browsing {
                state.cursor = 0;
                state.show_help = false;
            }
        }
        SessionEvent::Render {
            snapshot,
            highlighted,
        } => {
            state.sequence = snapshot;
            state.highlighted = highlighted;
            if state.cursor >= state.sequence.len() {
                state.cursor = state.sequence.len().saturating_sub(1);
            }
        }
        SessionEvent::DirectionChanged { direction } => state.direction = direction,
        SessionEvent::PlaybackStarted { direction, steps } => {
            state.playing = true;
            state.progress = (0, steps);
            state.info = format!("Sorting {} ({} steps)", direction.arrow(), steps);
        }
        SessionEvent::StepPlayed { index, total } => {
            state.progress = (index + 1, total);
        }
        SessionEvent::PlaybackCompleted => {
            state.playing = false;
            state.info = "Sorted".into();
        }
        SessionEvent::PlaybackCancelled => {
            state.playing = false;
            state.info = "Playback cancelled".into();
        }
        SessionEvent::Notice(notice) => state.info = notice.to_message(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quicksort_visualizer::model::Notice;

    fn with_len(len: usize) -> UiState {
        UiState {
            sequence: (1..=len as u32).collect(),
            ..Default::default()
        }
    }

    #[test]
    fn cursor_moves_within_column_major_grid() {
        let mut s = with_len(25);
        s.move_cursor(Move::Right);
        assert_eq!(s.cursor, 10);
        s.move_cursor(Move::Right);
        assert_eq!(s.cursor, 20);
        // Column 3 would start at 30, past the end.
        s.move_cursor(Move::Right);
        assert_eq!(s.cursor, 20);
        s.move_cursor(Move::Down);
        assert_eq!(s.cursor, 21);
        s.move_cursor(Move::Left);
        assert_eq!(s.cursor, 11);
        s.move_cursor(Move::Up);
        s.move_cursor(Move::Up);
        assert_eq!(s.cursor, 9);
        s.cursor = 24;
        s.move_cursor(Move::Down);
        assert_eq!(s.cursor, 24);
    }

    #[test]
    fn cursor_on_empty_sequence_stays_at_zero() {
        let mut s = UiState::default();
        s.move_cursor(Move::Down);
        assert_eq!(s.cursor, 0);
        assert_eq!(s.selected_value(), None);
    }

    #[test]
    fn first_visible_column_tracks_cursor() {
        assert_eq!(first_visible_column(0, 4), 0);
        assert_eq!(first_visible_column(39, 4), 0);
        assert_eq!(first_visible_column(40, 4), 1);
        assert_eq!(first_visible_column(95, 4), 6);
        assert_eq!(first_visible_column(95, 0), 9);
    }

    #[test]
    fn render_clamps_cursor() {
        let mut s = with_len(20);
        s.cursor = 15;
        apply_event(
            &mut s,
            SessionEvent::Render {
                snapshot: vec![3, 2, 1],
                highlighted: BTreeSet::from([0, 2]),
            },
        );
        assert_eq!(s.cursor, 2);
        assert_eq!(s.selected_value(), Some(1));
        assert!(s.highlighted.contains(&2));
    }

    #[test]
    fn playback_events_update_progress() {
        let mut s = with_len(5);
        apply_event(
            &mut s,
            SessionEvent::PlaybackStarted {
                direction: SortDirection::Ascending,
                steps: 3,
            },
        );
        assert!(s.playing);
        apply_event(&mut s, SessionEvent::StepPlayed { index: 1, total: 3 });
        assert_eq!(s.progress, (2, 3));
        apply_event(&mut s, SessionEvent::PlaybackCompleted);
        assert!(!s.playing);
        assert_eq!(s.info, "Sorted");
    }

    #[test]
    fn sort_label_follows_last_sort() {
        let mut s = UiState::default();
        assert_eq!(s.sort_label(), "Sort ↓");
        apply_event(
            &mut s,
            SessionEvent::DirectionChanged {
                direction: SortDirection::Ascending,
            },
        );
        assert_eq!(s.sort_label(), "Sort ↑");
    }

    #[test]
    fn notices_land_in_status_line() {
        let mut s = UiState::default();
        apply_event(
            &mut s,
            SessionEvent::Notice(Notice::ValueTooLarge { max: 30 }),
        );
        assert_eq!(s.info, "Please select a value smaller or equal to 30.");
    }
}

mod help;
mod state;

use crate::orchestrator::{self, UiCommand};
use anyhow::{Context, Result};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use quicksort_visualizer::model::{RunConfig, Screen, SessionEvent, MAX_NUMBER, ROWS_PER_COLUMN};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Bar, BarChart, BarGroup, Block, Borders, Paragraph},
    Terminal,
};
use state::{apply_event, first_visible_column, Move, UiState};
use std::{io, time::Duration, time::Instant};
use tokio::sync::mpsc;
use tokio::sync::mpsc::{UnboundedReceiver, UnboundedSender};

const HIGHLIGHT: Color = Color::Rgb(255, 165, 0);
const VALUE_BG: Color = Color::Rgb(0x00, 0x7B, 0xFF);
const CONTROL_BG: Color = Color::Rgb(0x28, 0xA7, 0x45);
/// Width of one value cell in the grid, including spacing.
const CELL_WIDTH: u16 = 7;

pub async fn run(cfg: RunConfig) -> Result<()> {
    let (event_tx, event_rx) = mpsc::unbounded_channel::<SessionEvent>();
    let (cmd_tx, cmd_rx) = mpsc::unbounded_channel::<UiCommand>();

    // TUI runs in a dedicated thread to keep all blocking I/O out of the Tokio runtime.
    let ui_handle = std::thread::spawn(move || run_threaded(event_rx, cmd_tx));

    let res = orchestrator::run_controller(&cfg, event_tx, cmd_rx).await;

    let join_res = tokio::task::spawn_blocking(move || ui_handle.join()).await;
    if let Ok(joined) = join_res {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => return Err(e),
            Err(_) => return Err(anyhow::anyhow!("TUI thread panicked")),
        }
    }

    res
}

/// Run the TUI loop on a dedicated thread.
pub fn run_threaded(
    mut event_rx: UnboundedReceiver<SessionEvent>,
    cmd_tx: UnboundedSender<UiCommand>,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen).ok();

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;
    terminal.clear().ok();

    // UiState is owned by the UI thread only; the controller talks to it through events.
    let mut state = UiState::default();

    let frame_rate = Duration::from_millis(50);
    let mut last_frame = Instant::now()
        .checked_sub(frame_rate)
        .unwrap_or_else(Instant::now);

    let res = loop {
        // Drain events without blocking to keep UI responsive.
        while let Ok(ev) = event_rx.try_recv() {
            apply_event(&mut state, ev);
        }

        if last_frame.elapsed() >= frame_rate {
            terminal.draw(|f| draw(f.area(), f, &state)).ok();
            last_frame = Instant::now();
        }

        // Poll input with a short timeout to avoid blocking the render loop.
        if event::poll(Duration::from_millis(10)).unwrap_or(false) {
            if let Ok(Event::Key(k)) = event::read() {
                if k.kind != KeyEventKind::Press {
                    continue;
                }
                if k.modifiers == KeyModifiers::CONTROL && k.code == KeyCode::Char('c') {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
                let quit = match state.screen {
                    Screen::Input => handle_input_key(&mut state, k.code, &cmd_tx),
                    Screen::Browsing => handle_browsing_key(&mut state, k.code, &cmd_tx),
                };
                if quit {
                    let _ = cmd_tx.send(UiCommand::Quit);
                    break Ok(());
                }
            }
        }
    };

    disable_raw_mode().ok();
    let mut stdout = io::stdout();
    execute!(stdout, LeaveAlternateScreen).ok();
    res
}

/// Returns true when the user asked to quit.
fn handle_input_key(state: &mut UiState, code: KeyCode, cmd_tx: &UnboundedSender<UiCommand>) -> bool {
    match code {
        KeyCode::Esc => return true,
        KeyCode::Enter => {
            let _ = cmd_tx.send(UiCommand::SubmitCount(state.input.clone()));
        }
        KeyCode::Backspace => {
            state.input.pop();
        }
        KeyCode::Char('?') => state.show_help = !state.show_help,
        KeyCode::Char(c) if !c.is_control() && state.input.chars().count() < 12 => {
            state.input.push(c);
        }
        _ => {}
    }
    false
}

/// Returns true when the user asked to quit.
fn handle_browsing_key(
    state: &mut UiState,
    code: KeyCode,
    cmd_tx: &UnboundedSender<UiCommand>,
) -> bool {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => return true,
        KeyCode::Char('s') => {
            let _ = cmd_tx.send(UiCommand::Sort);
        }
        KeyCode::Char('r') => {
            let _ = cmd_tx.send(UiCommand::Reset);
        }
        KeyCode::Char('?') => state.show_help = !state.show_help,
        KeyCode::Enter | KeyCode::Char(' ') => {
            if let Some(v) = state.selected_value() {
                let _ = cmd_tx.send(UiCommand::SelectValue(v));
            }
        }
        KeyCode::Up | KeyCode::Char('k') => state.move_cursor(Move::Up),
        KeyCode::Down | KeyCode::Char('j') => state.move_cursor(Move::Down),
        KeyCode::Left | KeyCode::Char('h') => state.move_cursor(Move::Left),
        KeyCode::Right | KeyCode::Char('l') => state.move_cursor(Move::Right),
        _ => {}
    }
    false
}

fn draw(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(area);

    if state.show_help {
        help::draw_help(chunks[0], f);
    } else {
        match state.screen {
            Screen::Input => draw_input(chunks[0], f, state),
            Screen::Browsing => draw_browsing(chunks[0], f, state),
        }
    }

    let mut status = vec![Span::styled(
        state.info.clone(),
        Style::default().fg(Color::Yellow),
    )];
    if state.playing {
        let (shown, total) = state.progress;
        status.push(Span::raw(format!("  step {shown}/{total}")));
    }
    let p = Paragraph::new(Line::from(status)).block(
        Block::default()
            .borders(Borders::ALL)
            .title("quicksort-visualizer (? for help)"),
    );
    f.render_widget(p, chunks[1]);
}

fn draw_input(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(35),
                Constraint::Length(5),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Min(0),
                Constraint::Length(32),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(rows[1]);

    let p = Paragraph::new(vec![
        Line::from("Enter number count:"),
        Line::from(vec![
            Span::styled(state.input.clone(), Style::default().fg(Color::White)),
            Span::styled("_", Style::default().add_modifier(Modifier::SLOW_BLINK)),
        ]),
        Line::from(Span::styled(
            "Enter to generate",
            Style::default().fg(Color::Gray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL).title("Sort Application"));
    f.render_widget(p, cols[1]);
}

fn draw_browsing(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(16)].as_ref())
        .split(area);
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Percentage(45),
                Constraint::Length(ROWS_PER_COLUMN as u16 + 2),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(cols[0]);

    draw_bars(rows[0], f, state);
    draw_grid(rows[1], f, state);
    draw_controls(cols[1], f, state);
}

fn draw_bars(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let n = state.sequence.len().max(1);
    let inner = area.width.saturating_sub(2) as usize;
    let slot = (inner / n).max(1);
    let gap = if slot > 1 { 1 } else { 0 };
    let width = (slot - gap).clamp(1, 6) as u16;

    let bars: Vec<Bar> = state
        .sequence
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let color = if state.highlighted.contains(&i) {
                HIGHLIGHT
            } else {
                VALUE_BG
            };
            Bar::default()
                .value(v as u64)
                .text_value(String::new())
                .style(Style::default().fg(color))
        })
        .collect();

    let chart = BarChart::default()
        .block(Block::default().borders(Borders::ALL).title("Sequence"))
        .data(BarGroup::default().bars(&bars))
        .bar_width(width)
        .bar_gap(gap as u16)
        .max(MAX_NUMBER as u64);
    f.render_widget(chart, area);
}

fn draw_grid(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let visible = (area.width.saturating_sub(2) / CELL_WIDTH).max(1) as usize;
    let first = first_visible_column(state.cursor, visible);

    let lines: Vec<Line> = (0..ROWS_PER_COLUMN)
        .map(|row| {
            let spans: Vec<Span> = (first..first + visible)
                .filter_map(|col| {
                    let idx = col * ROWS_PER_COLUMN + row;
                    let v = state.sequence.get(idx)?;
                    let mut style = if state.highlighted.contains(&idx) {
                        Style::default().fg(Color::Black).bg(HIGHLIGHT)
                    } else {
                        Style::default().fg(Color::White).bg(VALUE_BG)
                    };
                    if idx == state.cursor {
                        style = style.add_modifier(Modifier::BOLD | Modifier::REVERSED);
                    }
                    Some(vec![
                        Span::styled(format!(" {:>4} ", v), style),
                        Span::raw(" "),
                    ])
                })
                .flatten()
                .collect();
            Line::from(spans)
        })
        .collect();

    let title = format!("Values ({})", state.sequence.len());
    let p = Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(p, area);
}

fn draw_controls(area: Rect, f: &mut ratatui::Frame, state: &UiState) {
    let button = Style::default().fg(Color::White).bg(CONTROL_BG);
    let p = Paragraph::new(vec![
        Line::from(""),
        Line::from(vec![
            Span::styled(format!(" {} ", state.sort_label()), button),
            Span::raw(" s"),
        ]),
        Line::from(""),
        Line::from(vec![Span::styled(" Reset ", button), Span::raw("  r")]),
        Line::from(""),
        Line::from(Span::styled(
            "Enter: pick",
            Style::default().fg(Color::Gray),
        )),
    ])
    .block(Block::default().borders(Borders::ALL));
    f.render_widget(p, area);
}

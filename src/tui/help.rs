use ratatui::{
    layout::Rect,
    style::Color,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

fn key_line(key: &'static str, pad: usize, what: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::raw("  "),
        Span::styled(key, Style::default().fg(Color::Magenta)),
        Span::raw(" ".repeat(pad)),
        Span::raw(what),
    ])
}

pub fn draw_help(area: Rect, f: &mut Frame) {
    let p = Paragraph::new(vec![
        Line::from("Input screen:"),
        key_line("0-9", 9, "Type the number count"),
        key_line("Enter", 7, "Generate numbers"),
        key_line("Esc", 9, "Quit"),
        Line::from(""),
        Line::from("Sort screen:"),
        key_line("s", 11, "Sort (direction toggles each time)"),
        key_line("r", 11, "Reset to input screen"),
        Line::from(vec![
            Span::raw("  "),
            Span::styled("←↑↓→", Style::default().fg(Color::Magenta)),
            Span::raw(" or "),
            Span::styled("hjkl", Style::default().fg(Color::Magenta)),
            Span::raw("  Move between values"),
        ]),
        key_line("Enter", 7, "Pick a value ≤ 30 to regenerate with that many numbers"),
        key_line("?", 11, "Toggle this help"),
        key_line("q", 11, "Quit"),
        Line::from(""),
        Line::from(vec![
            Span::raw("Highlighted "),
            Span::styled("values", Style::default().fg(Color::Black).bg(Color::Rgb(255, 165, 0))),
            Span::raw(" were touched by the partition step just shown."),
        ]),
    ])
    .block(Block::default().borders(Borders::ALL).title("Help"));
    f.render_widget(p, area);
}

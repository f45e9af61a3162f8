use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use bookcal::app::AppState;

pub fn render(f: &mut Frame, app: &AppState) {
    let area = f.size();
    let help_width = 54.min(area.width);
    let help_height = 20.min(area.height);
    let x = (area.width.saturating_sub(help_width)) / 2;
    let y = (area.height.saturating_sub(help_height)) / 2;

    let help_area = ratatui::layout::Rect {
        x,
        y,
        width: help_width,
        height: help_height,
    };

    f.render_widget(Clear, help_area);

    let section = Style::default().fg(app.theme.weekday_header);
    let help_text = vec![
        Line::from(vec![Span::styled("bookcal Help", Style::default().fg(app.theme.help_title).add_modifier(Modifier::BOLD))]),
        Line::from(""),
        Line::from(vec![Span::styled("Calendar:", section)]),
        Line::from("  h/l, ←/→    - Previous/next day"),
        Line::from("  k/j, ↑/↓    - Previous/next week"),
        Line::from("  H/L, { / }  - Previous/next month"),
        Line::from("  t           - Jump to today"),
        Line::from("  r           - Reload bookings"),
        Line::from(""),
        Line::from(vec![Span::styled("Booking:", section)]),
        Line::from("  Enter       - Show time slots for the day"),
        Line::from("                (today or later, this month only)"),
        Line::from(""),
        Line::from(vec![Span::styled("Legend:", section)]),
        Line::from("  bold day    - Service offered that weekday"),
        Line::from("  •N          - N bookings on that day"),
        Line::from(""),
        Line::from("  q/Esc       - Quit (closes help when open)"),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(Block::default()
            .borders(Borders::ALL)
            .title(" Help (? or q to close) ")
            .style(Style::default().bg(Color::Black)))
        .alignment(Alignment::Left);

    f.render_widget(help_paragraph, help_area);
}
